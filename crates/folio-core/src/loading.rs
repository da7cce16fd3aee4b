//! Loading screen state: when the enter button appears, and the one-shot
//! latch for the startup chime.

use crate::constants::{BOOT_MIN_SEC, BUTTON_REVEAL_DELAY_SEC};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Assets loading or minimum boot time not yet elapsed.
    Booting,
    /// Enter button visible.
    Ready,
    /// Visitor entered; the loading screen is gone.
    Started,
}

#[derive(Clone, Debug)]
pub struct LoadingGate {
    min_boot: f32,
    reveal_delay: f32,
    /// Time at which both conditions first held.
    settled_at: Option<f32>,
    phase: Phase,
}

impl Default for LoadingGate {
    fn default() -> Self {
        Self::new(BOOT_MIN_SEC, BUTTON_REVEAL_DELAY_SEC)
    }
}

impl LoadingGate {
    pub fn new(min_boot: f32, reveal_delay: f32) -> Self {
        Self {
            min_boot: min_boot.max(0.0),
            reveal_delay: reveal_delay.max(0.0),
            settled_at: None,
            phase: Phase::Booting,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Advance with seconds since mount and load progress in percent.
    pub fn tick(&mut self, elapsed: f32, progress: f32) -> Phase {
        if self.phase != Phase::Booting {
            return self.phase;
        }
        if self.settled_at.is_none() && progress >= 100.0 && elapsed >= self.min_boot {
            self.settled_at = Some(elapsed);
        }
        if let Some(at) = self.settled_at {
            if elapsed >= at + self.reveal_delay {
                self.phase = Phase::Ready;
            }
        }
        self.phase
    }

    /// Enter the experience. Only honoured once the button is showing.
    pub fn start(&mut self) -> bool {
        if self.phase == Phase::Ready {
            self.phase = Phase::Started;
            true
        } else {
            false
        }
    }
}

/// Fires exactly once: either the autoplay attempt on mount or the first
/// click/keypress after autoplay was refused.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChimeLatch {
    fired: bool,
}

impl ChimeLatch {
    pub fn fire(&mut self) -> bool {
        !std::mem::replace(&mut self.fired, true)
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
