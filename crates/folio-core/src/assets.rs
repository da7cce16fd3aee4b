use crate::constants::{subject_offset_vec3, SUBJECT_SCALE_LOADED};
use crate::error::AssetError;
use crate::scene::{standin_subject, Material, SceneManifest, SceneNode, Transform};
use fnv::FnvHashMap;

/// Outcome of one asset load attempt.
#[derive(Debug)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed(AssetError),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl<T> LoadState<T> {
    pub fn from_result(result: Result<T, AssetError>) -> Self {
        match result {
            Ok(v) => LoadState::Loaded(v),
            Err(e) => LoadState::Failed(e),
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, LoadState::Loading)
    }

    pub fn kind(&self) -> LoadKind {
        match self {
            LoadState::Loading => LoadKind::Loading,
            LoadState::Loaded(_) => LoadKind::Loaded,
            LoadState::Failed(_) => LoadKind::Failed,
        }
    }
}

/// Payload-free mirror of [`LoadState`], cheap to compare between frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoadKind {
    Loading,
    Loaded,
    Failed,
}

/// The subject tree to place on stage, with the material table it needs.
pub struct Subject {
    pub node: SceneNode,
    pub materials: FnvHashMap<String, Material>,
}

impl LoadState<SceneManifest> {
    /// The loaded subject, or the procedural stand-in while loading or after
    /// a failure.
    pub fn subject_or_standin(&self) -> Subject {
        match self {
            LoadState::Loaded(manifest) => Subject {
                node: SceneNode::group(
                    "subject",
                    Transform::at(subject_offset_vec3()).with_uniform_scale(SUBJECT_SCALE_LOADED),
                    vec![manifest.root.clone()],
                ),
                materials: manifest.materials.clone(),
            },
            LoadState::Loading | LoadState::Failed(_) => Subject {
                node: standin_subject(),
                materials: FnvHashMap::default(),
            },
        }
    }
}

/// Count of settled vs. requested assets for the loading bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadProgress {
    pub total: u32,
    pub done: u32,
}

impl LoadProgress {
    pub fn new(total: u32) -> Self {
        Self { total, done: 0 }
    }

    /// Mark one asset settled (loaded or failed).
    pub fn settle(&mut self) {
        self.done = (self.done + 1).min(self.total);
    }

    /// Percentage in [0, 100]; nothing requested counts as complete.
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            return 100.0;
        }
        (self.done as f32 / self.total as f32 * 100.0).clamp(0.0, 100.0)
    }
}
