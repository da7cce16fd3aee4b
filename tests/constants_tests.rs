// Host-side tests for the page contract and tuning constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core_constants {
    include!("../crates/folio-core/src/constants.rs");
}

use constants::*;
use core_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn nav_targets_fall_inside_the_scroll_range() {
    assert!(NAV_PROJECTS_PAGE < NAV_CONTACT_PAGE);
    assert!((NAV_CONTACT_PAGE as f32) < SCROLL_PAGES);
}

#[test]
fn element_ids_are_distinct() {
    let ids = [
        CANVAS_ID,
        SCROLL_ROOT_ID,
        LOADING_SCREEN_ID,
        LOADING_BAR_ID,
        LOADING_PERCENT_ID,
        ENTER_BUTTON_ID,
        NAV_PROJECTS_ID,
        NAV_CONTACT_ID,
        OVERLAY_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        assert!(!a.starts_with('#'), "{} should be a bare id", a);
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn manifest_url_is_site_relative_json() {
    assert!(HERO_MANIFEST_URL.starts_with('/'));
    assert!(HERO_MANIFEST_URL.ends_with(".json"));
    assert!(BOOT_ASSET_COUNT >= 1);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn timing_constants_have_logical_relationships() {
    // A stalled tab must not fling the scroll damping.
    assert!(MAX_FRAME_DT_SEC > 0.0 && MAX_FRAME_DT_SEC < SCROLL_DAMPING_SEC);
    assert!(BOOT_MIN_SEC > BUTTON_REVEAL_DELAY_SEC);
    assert!(CHIME_NOISE_SEC > 0.0);
    assert!(DPR_MAX >= DPR_MIN && DPR_MIN >= 1.0);
    assert!(PERF_FPS_UPPER > PERF_FPS_LOWER);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_planes_enclose_the_star_shell() {
    assert!(CAMERA_ZNEAR > 0.0);
    assert!(CAMERA_ZFAR > STAR_RADIUS + STAR_DEPTH);
}
