//! Easing curves for camera segments.
//!
//! Names follow the tween-engine convention (`power1` = quadratic,
//! `power2` = cubic, `power3` = quartic) so act definitions read the same as
//! the motion design notes they came from.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Ease {
    #[default]
    Linear,
    Power1In,
    Power1Out,
    Power1InOut,
    Power2In,
    Power2Out,
    Power2InOut,
    Power3In,
    Power3Out,
    Power3InOut,
}

impl Ease {
    /// Map linear progress `t` to eased progress. `t` is clamped to [0, 1].
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Ease::Linear => t,
            Ease::Power1In => ease_in(t, 2),
            Ease::Power1Out => ease_out(t, 2),
            Ease::Power1InOut => ease_in_out(t, 2),
            Ease::Power2In => ease_in(t, 3),
            Ease::Power2Out => ease_out(t, 3),
            Ease::Power2InOut => ease_in_out(t, 3),
            Ease::Power3In => ease_in(t, 4),
            Ease::Power3Out => ease_out(t, 4),
            Ease::Power3InOut => ease_in_out(t, 4),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let ease = match name {
            "none" | "linear" => Ease::Linear,
            "power1.in" => Ease::Power1In,
            "power1.out" | "power1" => Ease::Power1Out,
            "power1.inOut" => Ease::Power1InOut,
            "power2.in" => Ease::Power2In,
            "power2.out" | "power2" => Ease::Power2Out,
            "power2.inOut" => Ease::Power2InOut,
            "power3.in" => Ease::Power3In,
            "power3.out" | "power3" => Ease::Power3Out,
            "power3.inOut" => Ease::Power3InOut,
            _ => return None,
        };
        Some(ease)
    }

    pub fn name(self) -> &'static str {
        match self {
            Ease::Linear => "none",
            Ease::Power1In => "power1.in",
            Ease::Power1Out => "power1.out",
            Ease::Power1InOut => "power1.inOut",
            Ease::Power2In => "power2.in",
            Ease::Power2Out => "power2.out",
            Ease::Power2InOut => "power2.inOut",
            Ease::Power3In => "power3.in",
            Ease::Power3Out => "power3.out",
            Ease::Power3InOut => "power3.inOut",
        }
    }
}

#[inline]
fn ease_in(t: f32, power: i32) -> f32 {
    t.powi(power)
}

#[inline]
fn ease_out(t: f32, power: i32) -> f32 {
    1.0 - (1.0 - t).powi(power)
}

#[inline]
fn ease_in_out(t: f32, power: i32) -> f32 {
    if t < 0.5 {
        0.5 * (2.0 * t).powi(power)
    } else {
        1.0 - 0.5 * (2.0 - 2.0 * t).powi(power)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 10] = [
        Ease::Linear,
        Ease::Power1In,
        Ease::Power1Out,
        Ease::Power1InOut,
        Ease::Power2In,
        Ease::Power2Out,
        Ease::Power2InOut,
        Ease::Power3In,
        Ease::Power3Out,
        Ease::Power3InOut,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for ease in ALL {
            assert_eq!(ease.apply(0.0), 0.0, "{:?}", ease);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6, "{:?}", ease);
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for ease in ALL {
            let mut prev = ease.apply(0.0);
            for i in 1..=100 {
                let v = ease.apply(i as f32 / 100.0);
                assert!(v + 1e-6 >= prev, "{:?} dips at step {}", ease, i);
                prev = v;
            }
        }
    }

    #[test]
    fn in_out_curves_pass_through_half() {
        for ease in [Ease::Power1InOut, Ease::Power2InOut, Ease::Power3InOut] {
            assert!((ease.apply(0.5) - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(Ease::Power2Out.apply(-3.0), 0.0);
        assert_eq!(Ease::Power2Out.apply(7.0), 1.0);
        assert_eq!(Ease::Linear.apply(f32::NAN), 0.0);
    }

    #[test]
    fn names_round_trip() {
        for ease in ALL {
            assert_eq!(Ease::from_name(ease.name()), Some(ease));
        }
        assert_eq!(Ease::from_name("elastic.out"), None);
    }
}
