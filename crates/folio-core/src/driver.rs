//! Per-frame timeline driver and the responsive camera rig built on it.

use crate::camera::CameraState;
use crate::timeline::{Act, Timeline};
use crate::viewport::{Classification, ResponsiveSelector};
use glam::Mat4;
use std::rc::Rc;

/// Sole writer of the camera state while active.
///
/// The active timeline is held behind a single `Rc`; installing a new one is
/// one pointer replacement, so a frame either sees the old timeline or the
/// complete new one.
#[derive(Debug, Default)]
pub struct TimelineDriver {
    timeline: Option<Rc<Timeline>>,
    camera: CameraState,
    last_time: Option<f32>,
}

impl TimelineDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeline(&self) -> Option<&Rc<Timeline>> {
        self.timeline.as_ref()
    }

    /// Swap in a fully built timeline and seek it to time 0.
    pub fn install(&mut self, timeline: Timeline) {
        let timeline = Rc::new(timeline);
        self.camera = timeline.evaluate(0.0);
        self.last_time = Some(0.0);
        self.timeline = Some(timeline);
    }

    /// `clamp(offset, 0, 1) × duration`, or `None` before a timeline exists.
    pub fn seek_time(&self, offset: f32) -> Option<f32> {
        let tl = self.timeline.as_ref()?;
        let offset = if offset.is_nan() { 0.0 } else { offset.clamp(0.0, 1.0) };
        Some(tl.clamp_time(offset * tl.duration()))
    }

    /// Seek to the scroll offset and write the camera. Returns `false` (and
    /// leaves the camera alone) when no timeline is installed yet.
    pub fn frame(&mut self, offset: f32) -> bool {
        let Some(t) = self.seek_time(offset) else {
            return false;
        };
        if let Some(tl) = &self.timeline {
            self.camera = tl.evaluate(t);
            self.last_time = Some(t);
        }
        true
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.camera.view_matrix()
    }

    pub fn current_act(&self) -> Option<Act> {
        let tl = self.timeline.as_ref()?;
        tl.act_at(self.last_time?)
    }
}

/// Responsive selector wired to a driver: resizes rebuild the camera path
/// only when the viewport classification flips.
#[derive(Debug, Default)]
pub struct CameraRig {
    selector: ResponsiveSelector,
    driver: TimelineDriver,
    rebuilds: u32,
}

impl CameraRig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a viewport width. Returns the new classification when the
    /// timeline was rebuilt.
    pub fn resize(&mut self, width: f64) -> Option<Classification> {
        let next = self.selector.observe(width)?;
        let timeline = Timeline::for_classification(next);
        log::info!(
            "[camera] viewport {:.0}px -> {:?}, timeline {:.1}s",
            width,
            next,
            timeline.duration()
        );
        self.driver.install(timeline);
        self.rebuilds += 1;
        Some(next)
    }

    pub fn frame(&mut self, offset: f32) -> bool {
        self.driver.frame(offset)
    }

    pub fn classification(&self) -> Option<Classification> {
        self.selector.current()
    }

    pub fn camera(&self) -> &CameraState {
        self.driver.camera()
    }

    pub fn driver(&self) -> &TimelineDriver {
        &self.driver
    }

    /// Number of timeline rebuilds so far.
    pub fn rebuilds(&self) -> u32 {
        self.rebuilds
    }
}
