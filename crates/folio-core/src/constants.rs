use glam::Vec3;

// Shared stage/camera/audio tuning constants used by the web frontend.

// Viewport classification
pub const MOBILE_MAX_WIDTH: f64 = 768.0; // widths strictly below this are mobile

// Camera
pub const CAMERA_FOV_DEG: f32 = 30.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;
pub const DEFAULT_CAMERA_POSITION: [f32; 3] = [0.0, 2.0, 10.0]; // canvas pose before any timeline
pub const DEFAULT_CAMERA_LOOK_AT: [f32; 3] = [0.0, 0.0, 0.0];

// Scroll
pub const SCROLL_PAGES: f32 = 5.0;
pub const SCROLL_DAMPING_SEC: f32 = 0.3; // smoothing time constant; 0 snaps
pub const SCROLL_SNAP_EPSILON: f32 = 1e-4;

// Stage layout
pub const STAGE_OFFSET: [f32; 3] = [0.0, -1.5, 0.0];
pub const SUBJECT_OFFSET: [f32; 3] = [0.0, -1.0, 0.0];
pub const SUBJECT_SCALE_LOADED: f32 = 1.8;
pub const SUBJECT_SCALE_STANDIN: f32 = 2.0;
pub const PODIUM_RADIUS: f32 = 3.0;
pub const PODIUM_HEIGHT: f32 = 0.1;
pub const PODIUM_SEGMENTS: u32 = 64;
pub const PODIUM_Y: f32 = -1.05;
pub const PODIUM_COLOR: &str = "#101010";

// Background and dust
pub const BACKGROUND_COLOR: &str = "#050505";
pub const STAR_COUNT: usize = 500;
pub const STAR_RADIUS: f32 = 50.0;
pub const STAR_DEPTH: f32 = 50.0;
pub const STAR_SEED: u64 = 0x5EED_DA57;
pub const STAR_SIZE: f32 = 0.08;

// Stage float motion
pub const FLOAT_SPEED: f32 = 0.5;
pub const FLOAT_ROTATION_INTENSITY: f32 = 0.1;
pub const FLOAT_INTENSITY: f32 = 0.2;

// Post-processing
pub const BLOOM_THRESHOLD: f32 = 1.2;
pub const BLOOM_INTENSITY: f32 = 1.2;
pub const BLOOM_RADIUS: f32 = 0.5;
pub const VIGNETTE_OFFSET: f32 = 0.1;
pub const VIGNETTE_DARKNESS: f32 = 0.8;
pub const NOISE_OPACITY: f32 = 0.03;

// Loading screen
pub const BOOT_MIN_SEC: f32 = 3.5; // logo animation must run at least this long
pub const BUTTON_REVEAL_DELAY_SEC: f32 = 0.5;

// Adaptive resolution
pub const DPR_MIN: f64 = 1.0;
pub const DPR_MAX: f64 = 1.5;
pub const PERF_WINDOW_FRAMES: usize = 30;
pub const PERF_FPS_UPPER: f32 = 55.0;
pub const PERF_FPS_LOWER: f32 = 40.0;

#[inline]
pub fn stage_offset_vec3() -> Vec3 {
    Vec3::from(STAGE_OFFSET)
}

#[inline]
pub fn subject_offset_vec3() -> Vec3 {
    Vec3::from(SUBJECT_OFFSET)
}
