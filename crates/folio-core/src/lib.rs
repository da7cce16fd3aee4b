pub mod assets;
pub mod camera;
pub mod chime;
pub mod constants;
pub mod driver;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod lights;
pub mod loading;
pub mod perf;
pub mod scene;
pub mod scroll;
pub mod stage;
pub mod timeline;
pub mod viewport;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use assets::*;
pub use camera::*;
pub use driver::*;
pub use easing::Ease;
pub use error::*;
pub use timeline::*;
pub use viewport::*;
