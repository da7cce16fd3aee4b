//! Camera path timeline.
//!
//! A [`Timeline`] is an ordered list of keyframe segments on a shared time
//! axis. Each segment animates one [`Track`] (camera position or look-at
//! target) from a start value to an end value with its own [`Ease`].
//! Evaluation is a pure function of `t`; segments are applied in playback
//! order so a later segment overrides an earlier one once it has started.

use crate::camera::CameraState;
use crate::easing::Ease;
use crate::viewport::Classification;
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Track {
    Position,
    LookAt,
}

/// Named scroll range of the page narrative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Act {
    Intro,
    Projects,
    Skills,
    Contact,
}

impl Act {
    pub const ALL: [Act; 4] = [Act::Intro, Act::Projects, Act::Skills, Act::Contact];

    /// Start time on the timeline axis. Fixed across classifications.
    pub fn start(self) -> f32 {
        match self {
            Act::Intro => 0.0,
            Act::Projects => 1.5,
            Act::Skills => 4.0,
            Act::Contact => 5.5,
        }
    }

    pub fn duration(self) -> f32 {
        match self {
            Act::Intro => 1.5,
            Act::Projects => 2.0,
            Act::Skills => 1.5,
            Act::Contact => 1.5,
        }
    }

    pub fn ease(self) -> Ease {
        match self {
            Act::Intro => Ease::Power2InOut,
            Act::Projects => Ease::Power1InOut,
            Act::Skills => Ease::Power2InOut,
            Act::Contact => Ease::Power2Out,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Act::Intro => "intro",
            Act::Projects => "projects",
            Act::Skills => "skills",
            Act::Contact => "contact",
        }
    }
}

/// Camera framing reached at the end of one act.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Framing {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl Framing {
    const fn new(position: [f32; 3], look_at: [f32; 3]) -> Self {
        Self {
            position: Vec3::from_array(position),
            look_at: Vec3::from_array(look_at),
        }
    }
}

/// Keyframe endpoints for one classification: the initial pose plus one
/// framing per act, in [`Act::ALL`] order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraKeyframes {
    pub initial: Framing,
    pub acts: [Framing; 4],
}

const DESKTOP_KEYFRAMES: CameraKeyframes = CameraKeyframes {
    // Full body, frontal-ish
    initial: Framing::new([-3.0, 0.0, 8.0], [0.0, -0.5, 0.0]),
    acts: [
        // Side profile close up
        Framing::new([-4.0, 0.5, 5.0], [0.0, -0.2, 0.0]),
        // Orbit to the other side
        Framing::new([4.0, 1.0, 6.0], [0.0, -0.5, 0.0]),
        // Top down
        Framing::new([0.0, 6.0, 3.0], [0.0, -1.0, 0.0]),
        // Low angle hero shot
        Framing::new([0.0, -0.5, 6.0], [0.0, 0.0, 0.0]),
    ],
};

// Narrow viewports clip the subject at the desktop distances, so every pose
// sits further back on Z with the lateral swing reduced.
const MOBILE_KEYFRAMES: CameraKeyframes = CameraKeyframes {
    initial: Framing::new([-2.0, 0.0, 14.0], [0.0, -0.5, 0.0]),
    acts: [
        Framing::new([-2.5, 0.5, 10.0], [0.0, -0.2, 0.0]),
        Framing::new([2.5, 1.0, 11.0], [0.0, -0.5, 0.0]),
        Framing::new([0.0, 9.0, 5.0], [0.0, -1.0, 0.0]),
        Framing::new([0.0, -0.5, 11.0], [0.0, 0.0, 0.0]),
    ],
};

impl CameraKeyframes {
    pub fn for_classification(classification: Classification) -> Self {
        match classification {
            Classification::Desktop => DESKTOP_KEYFRAMES,
            Classification::Mobile => MOBILE_KEYFRAMES,
        }
    }
}

/// One animated property over one time interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub track: Track,
    pub act: Option<Act>,
    pub start_time: f32,
    pub duration: f32,
    pub start_value: Vec3,
    pub end_value: Vec3,
    pub ease: Ease,
}

impl Segment {
    pub fn end_time(&self) -> f32 {
        self.start_time + self.duration
    }

    /// Value of the track at time `t`, or `None` if the segment has not
    /// started yet.
    pub fn sample(&self, t: f32) -> Option<Vec3> {
        if t < self.start_time {
            return None;
        }
        let progress = if self.duration > 0.0 {
            (t - self.start_time) / self.duration
        } else {
            1.0
        };
        let k = self.ease.apply(progress);
        Some(self.start_value.lerp(self.end_value, k))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    initial: CameraState,
    segments: SmallVec<[Segment; 8]>,
    duration: f32,
}

impl Timeline {
    pub fn builder(initial: CameraState) -> TimelineBuilder {
        TimelineBuilder::new(initial)
    }

    /// Build the four-act camera path for a viewport classification.
    pub fn for_classification(classification: Classification) -> Self {
        let keys = CameraKeyframes::for_classification(classification);
        let initial = CameraState::new(keys.initial.position, keys.initial.look_at);
        let mut builder = TimelineBuilder::new(initial);
        for (act, framing) in Act::ALL.iter().zip(keys.acts.iter()) {
            builder = builder
                .act(*act, Track::Position, framing.position)
                .act(*act, Track::LookAt, framing.look_at);
        }
        builder.build()
    }

    pub fn initial(&self) -> CameraState {
        self.initial
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Camera state at time `t` (clamped to `[0, duration]`).
    pub fn evaluate(&self, t: f32) -> CameraState {
        let t = self.clamp_time(t);
        let mut state = self.initial;
        for seg in &self.segments {
            if let Some(v) = seg.sample(t) {
                match seg.track {
                    Track::Position => state.position = v,
                    Track::LookAt => state.look_at = v,
                }
            }
        }
        state
    }

    pub fn clamp_time(&self, t: f32) -> f32 {
        if t.is_nan() {
            return 0.0;
        }
        t.clamp(0.0, self.duration)
    }

    /// Latest act that has started by time `t`.
    pub fn act_at(&self, t: f32) -> Option<Act> {
        let t = self.clamp_time(t);
        self.segments
            .iter()
            .filter(|s| s.start_time <= t)
            .filter_map(|s| s.act)
            .last()
    }

    /// Same segments with every easing replaced. Start values are resolved
    /// again under the new easing, so overlapping segments still hand over
    /// without a jump.
    pub fn with_easing(&self, ease: Ease) -> Self {
        self.segments
            .iter()
            .fold(TimelineBuilder::new(self.initial), |builder, s| {
                builder.push(s.act, s.track, s.end_value, s.start_time, s.duration, ease)
            })
            .build()
    }
}

/// Incremental construction with "tween to" semantics: a segment's start
/// value is whatever its track holds at the moment the segment begins.
#[derive(Clone, Debug)]
pub struct TimelineBuilder {
    initial: CameraState,
    segments: SmallVec<[Segment; 8]>,
}

impl TimelineBuilder {
    pub fn new(initial: CameraState) -> Self {
        Self {
            initial,
            segments: SmallVec::new(),
        }
    }

    pub fn act(self, act: Act, track: Track, end_value: Vec3) -> Self {
        self.push(Some(act), track, end_value, act.start(), act.duration(), act.ease())
    }

    pub fn to(
        self,
        track: Track,
        end_value: Vec3,
        start_time: f32,
        duration: f32,
        ease: Ease,
    ) -> Self {
        self.push(None, track, end_value, start_time, duration, ease)
    }

    fn push(
        mut self,
        act: Option<Act>,
        track: Track,
        end_value: Vec3,
        start_time: f32,
        duration: f32,
        ease: Ease,
    ) -> Self {
        let start_time = sanitize(start_time);
        let duration = sanitize(duration);
        let start_value = self.value_at(track, start_time);
        let seg = Segment {
            track,
            act,
            start_time,
            duration,
            start_value,
            end_value,
            ease,
        };
        // Stable insert keeps equal start times in declaration order.
        let idx = self
            .segments
            .iter()
            .position(|s| s.start_time > start_time)
            .unwrap_or(self.segments.len());
        self.segments.insert(idx, seg);
        self
    }

    fn value_at(&self, track: Track, t: f32) -> Vec3 {
        let mut v = match track {
            Track::Position => self.initial.position,
            Track::LookAt => self.initial.look_at,
        };
        for seg in self.segments.iter().filter(|s| s.track == track) {
            if let Some(sampled) = seg.sample(t) {
                v = sampled;
            }
        }
        v
    }

    pub fn build(self) -> Timeline {
        let duration = self
            .segments
            .iter()
            .map(Segment::end_time)
            .fold(0.0_f32, f32::max);
        Timeline {
            initial: self.initial,
            segments: self.segments,
            duration,
        }
    }
}

#[inline]
fn sanitize(v: f32) -> f32 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_duration_covers_all_acts() {
        let tl = Timeline::for_classification(Classification::Desktop);
        assert_eq!(tl.duration(), 7.0);
        assert_eq!(tl.segments().len(), 8);
    }

    #[test]
    fn segment_start_values_chain_from_previous_end() {
        let tl = Timeline::for_classification(Classification::Desktop);
        let pos: Vec<&Segment> = tl
            .segments()
            .iter()
            .filter(|s| s.track == Track::Position)
            .collect();
        assert_eq!(pos[0].start_value, Vec3::new(-3.0, 0.0, 8.0));
        for pair in pos.windows(2) {
            assert_eq!(pair[1].start_value, pair[0].end_value);
        }
    }

    #[test]
    fn zero_duration_segment_jumps_to_end() {
        let tl = Timeline::builder(CameraState::default())
            .to(Track::Position, Vec3::X, 1.0, 0.0, Ease::Linear)
            .build();
        assert_eq!(tl.evaluate(0.5).position, CameraState::default().position);
        assert_eq!(tl.evaluate(1.0).position, Vec3::X);
    }

    #[test]
    fn negative_duration_is_clamped() {
        let tl = Timeline::builder(CameraState::default())
            .to(Track::LookAt, Vec3::Y, 0.0, -2.0, Ease::Linear)
            .build();
        assert_eq!(tl.duration(), 0.0);
        assert_eq!(tl.evaluate(0.0).look_at, Vec3::Y);
    }

    #[test]
    fn act_lookup_follows_start_times() {
        let tl = Timeline::for_classification(Classification::Desktop);
        assert_eq!(tl.act_at(0.0), Some(Act::Intro));
        assert_eq!(tl.act_at(1.49), Some(Act::Intro));
        assert_eq!(tl.act_at(1.5), Some(Act::Projects));
        assert_eq!(tl.act_at(3.9), Some(Act::Projects));
        assert_eq!(tl.act_at(4.0), Some(Act::Skills));
        assert_eq!(tl.act_at(100.0), Some(Act::Contact));
    }
}
