//! Startup chime schedule.
//!
//! The sound is described as plain data (oscillators, envelopes, a filtered
//! noise sweep) so the timings can be checked without an audio context. The
//! web crate walks a [`ChimePlan`] and creates the matching WebAudio nodes.

use rand::prelude::*;

/// Seed for the swoosh noise; fixed so the chime sounds the same each visit.
pub const NOISE_SEED: u64 = 0xC41E_0A17;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ramp {
    Linear,
    Exponential,
}

/// One scheduled parameter move: reach `value` at `at` seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Envelope {
    pub at: f32,
    pub value: f32,
    pub ramp: Ramp,
}

impl Envelope {
    pub const fn linear(at: f32, value: f32) -> Self {
        Self {
            at,
            value,
            ramp: Ramp::Linear,
        }
    }

    pub const fn exponential(at: f32, value: f32) -> Self {
        Self {
            at,
            value,
            ramp: Ramp::Exponential,
        }
    }
}

/// A sine oscillator with its own gain envelope.
#[derive(Clone, Debug, PartialEq)]
pub struct Voice {
    pub frequency: f32,
    pub start: f32,
    pub stop: f32,
    /// Gain at `start`.
    pub initial_gain: f32,
    pub gain: Vec<Envelope>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NoiseSweep {
    pub duration: f32,
    pub filter_start_hz: f32,
    pub filter: Envelope,
    pub initial_gain: f32,
    pub gain: Envelope,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChimePlan {
    pub master_gain: f32,
    pub master: Envelope,
    /// Sustained pad, routed straight to the master.
    pub pad: Vec<Voice>,
    /// Arpeggio notes.
    pub chimes: Vec<Voice>,
    pub noise: NoiseSweep,
}

const CHIME_PEAK: f32 = 0.3;
const CHIME_ATTACK: f32 = 0.05;
const CHIME_FLOOR: f32 = 0.001;

fn chime(frequency: f32, start: f32, decay: f32) -> Voice {
    Voice {
        frequency,
        start,
        stop: start + decay,
        initial_gain: 0.0,
        gain: vec![
            Envelope::linear(start + CHIME_ATTACK, CHIME_PEAK),
            Envelope::exponential(start + decay, CHIME_FLOOR),
        ],
    }
}

fn pad(frequency: f32, length: f32) -> Voice {
    Voice {
        frequency,
        start: 0.0,
        stop: length,
        initial_gain: 1.0,
        gain: Vec::new(),
    }
}

impl ChimePlan {
    /// A 4 s swell: A3/E4 pad, rising A-major arpeggio and a filtered swoosh.
    pub fn startup() -> Self {
        let length = 4.0;
        Self {
            master_gain: 0.5,
            master: Envelope::linear(length, 0.0),
            pad: vec![pad(220.0, length), pad(329.63, length)],
            chimes: vec![
                chime(440.0, 0.1, 2.0),
                chime(554.37, 0.3, 2.0),
                chime(659.25, 0.5, 2.5),
                chime(880.0, 0.8, 3.0),
            ],
            noise: NoiseSweep {
                duration: 3.0,
                filter_start_hz: 100.0,
                filter: Envelope::exponential(2.0, 800.0),
                initial_gain: 0.05,
                gain: Envelope::linear(3.0, 0.0),
            },
        }
    }

    /// Time at which every scheduled node has stopped.
    pub fn length(&self) -> f32 {
        let voices = self
            .pad
            .iter()
            .chain(self.chimes.iter())
            .map(|v| v.stop)
            .fold(0.0_f32, f32::max);
        voices.max(self.master.at).max(self.noise.duration)
    }
}

/// White noise in [-1, 1).
pub fn noise_buffer(len: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_is_bounded_and_seeded() {
        let a = noise_buffer(4096, NOISE_SEED);
        let b = noise_buffer(4096, NOISE_SEED);
        assert_eq!(a, b);
        assert!(a.iter().all(|s| (-1.0..1.0).contains(s)));
        assert_ne!(a, noise_buffer(4096, NOISE_SEED + 1));
    }

    #[test]
    fn empty_noise_buffer() {
        assert!(noise_buffer(0, 1).is_empty());
    }
}
