use crate::constants::MOBILE_MAX_WIDTH;

/// Coarse viewport bucket used to pick camera keyframe values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    Mobile,
    Desktop,
}

impl Classification {
    pub fn from_width(width: f64) -> Self {
        if width.is_finite() && width < MOBILE_MAX_WIDTH {
            Classification::Mobile
        } else {
            Classification::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        matches!(self, Classification::Mobile)
    }
}

/// Change detector over raw viewport widths. Only transitions between
/// classifications are reported; the first observation always is one.
#[derive(Clone, Debug, Default)]
pub struct ResponsiveSelector {
    current: Option<Classification>,
}

impl ResponsiveSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Classification> {
        self.current
    }

    pub fn observe(&mut self, width: f64) -> Option<Classification> {
        let next = Classification::from_width(width);
        if self.current == Some(next) {
            return None;
        }
        self.current = Some(next);
        Some(next)
    }
}
