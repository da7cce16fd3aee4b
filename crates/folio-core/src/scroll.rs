use crate::constants::{SCROLL_DAMPING_SEC, SCROLL_SNAP_EPSILON};

/// Normalised scroll offset of a scroll container, clamped to [0, 1].
/// A container with no scrollable range reports 0.
pub fn raw_offset(scroll_top: f64, scroll_height: f64, client_height: f64) -> f32 {
    let range = scroll_height - client_height;
    if !(range.is_finite() && range > 0.0) || !scroll_top.is_finite() {
        return 0.0;
    }
    (scroll_top / range).clamp(0.0, 1.0) as f32
}

/// Damped scroll offset, recomputed once per frame.
#[derive(Clone, Debug)]
pub struct ScrollProgress {
    pub damping: f32,
    offset: f32,
    initialized: bool,
}

impl Default for ScrollProgress {
    fn default() -> Self {
        Self::new(SCROLL_DAMPING_SEC)
    }
}

impl ScrollProgress {
    pub fn new(damping: f32) -> Self {
        Self {
            damping: damping.max(0.0),
            offset: 0.0,
            initialized: false,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Move toward `target` over `dt_sec`. The first update snaps so the page
    /// never eases in from the top after a reload mid-scroll.
    pub fn update(&mut self, target: f32, dt_sec: f32) -> f32 {
        let target = if target.is_nan() { 0.0 } else { target.clamp(0.0, 1.0) };
        if !self.initialized || self.damping <= 0.0 {
            self.offset = target;
            self.initialized = true;
            return self.offset;
        }
        let dt = if dt_sec.is_finite() { dt_sec.max(0.0) } else { 0.0 };
        let alpha = 1.0 - (-dt / self.damping).exp();
        self.offset += (target - self.offset) * alpha;
        if (target - self.offset).abs() < SCROLL_SNAP_EPSILON {
            self.offset = target;
        }
        self.offset = self.offset.clamp(0.0, 1.0);
        self.offset
    }
}

/// Scroll position (in pixels) of the top of page `page` for a viewport of
/// height `viewport_height`.
#[inline]
pub fn page_top(page: u32, viewport_height: f64) -> f64 {
    page as f64 * viewport_height.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_offset_clamps_overscroll() {
        assert_eq!(raw_offset(-40.0, 5000.0, 1000.0), 0.0);
        assert_eq!(raw_offset(2000.0, 5000.0, 1000.0), 0.5);
        assert_eq!(raw_offset(4300.0, 5000.0, 1000.0), 1.0);
        assert_eq!(raw_offset(10.0, 800.0, 800.0), 0.0);
    }

    #[test]
    fn damping_converges_and_snaps() {
        let mut s = ScrollProgress::new(0.3);
        s.update(0.0, 0.016);
        let mut last = 0.0;
        for _ in 0..600 {
            let v = s.update(1.0, 1.0 / 60.0);
            assert!(v >= last);
            last = v;
        }
        assert_eq!(s.offset(), 1.0);
    }

    #[test]
    fn zero_damping_snaps_immediately() {
        let mut s = ScrollProgress::new(0.0);
        s.update(0.2, 0.016);
        assert_eq!(s.update(0.8, 0.016), 0.8);
    }

    #[test]
    fn page_tops_scale_with_viewport() {
        assert_eq!(page_top(2, 900.0), 1800.0);
        assert_eq!(page_top(4, 900.0), 3600.0);
    }
}
