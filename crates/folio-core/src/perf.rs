//! Adaptive device pixel ratio from a rolling frame-time window.

use crate::constants::{DPR_MAX, DPR_MIN, PERF_FPS_LOWER, PERF_FPS_UPPER, PERF_WINDOW_FRAMES};
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PerfChange {
    Incline,
    Decline,
}

#[derive(Clone, Debug)]
pub struct PerfMonitor {
    window: VecDeque<f32>,
    capacity: usize,
    upper_fps: f32,
    lower_fps: f32,
    dpr_min: f64,
    dpr_max: f64,
    dpr: f64,
}

impl Default for PerfMonitor {
    fn default() -> Self {
        Self::new(PERF_WINDOW_FRAMES, PERF_FPS_LOWER, PERF_FPS_UPPER, DPR_MIN, DPR_MAX)
    }
}

impl PerfMonitor {
    pub fn new(
        capacity: usize,
        lower_fps: f32,
        upper_fps: f32,
        dpr_min: f64,
        dpr_max: f64,
    ) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
            upper_fps,
            lower_fps,
            dpr_min,
            dpr_max: dpr_max.max(dpr_min),
            // Start optimistic, like the canvas default.
            dpr: dpr_max.max(dpr_min),
        }
    }

    pub fn dpr(&self) -> f64 {
        self.dpr
    }

    pub fn average_fps(&self) -> Option<f32> {
        if self.window.len() < self.capacity {
            return None;
        }
        let total: f32 = self.window.iter().sum();
        (total > 0.0).then(|| self.window.len() as f32 / total)
    }

    /// Record one frame delta in seconds. Returns a change only when the
    /// pixel ratio actually moves.
    pub fn record(&mut self, dt: f32) -> Option<PerfChange> {
        if !dt.is_finite() || dt <= 0.0 {
            return None;
        }
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(dt);
        let fps = self.average_fps()?;
        if fps > self.upper_fps && self.dpr < self.dpr_max {
            self.dpr = self.dpr_max;
            self.window.clear();
            Some(PerfChange::Incline)
        } else if fps < self.lower_fps && self.dpr > self.dpr_min {
            self.dpr = self.dpr_min;
            self.window.clear();
            Some(PerfChange::Decline)
        } else {
            None
        }
    }
}
