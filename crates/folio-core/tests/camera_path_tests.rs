// Integration tests for the camera path: timeline evaluation, the driver's
// scroll seek and the responsive rebuilds through CameraRig.

use folio_core::scroll::{raw_offset, ScrollProgress};
use folio_core::*;
use glam::Vec3;

fn approx_vec(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < 1e-5
}

#[test]
fn evaluate_is_deterministic() {
    let tl = Timeline::for_classification(Classification::Desktop);
    for i in 0..=70 {
        let t = i as f32 * 0.1;
        assert_eq!(tl.evaluate(t), tl.evaluate(t));
    }
    let rebuilt = Timeline::for_classification(Classification::Desktop);
    assert_eq!(tl, rebuilt);
}

#[test]
fn desktop_intro_midpoint_with_linear_easing() {
    let tl = Timeline::for_classification(Classification::Desktop).with_easing(Ease::Linear);
    let state = tl.evaluate(0.75);
    assert_eq!(state.position, Vec3::new(-3.5, 0.25, 6.5));
    assert!(approx_vec(state.look_at, Vec3::new(0.0, -0.35, 0.0)));
}

#[test]
fn eased_intro_midpoint_matches_symmetric_curve() {
    // In-out curves pass through the halfway value at half time.
    let tl = Timeline::for_classification(Classification::Desktop);
    let state = tl.evaluate(0.75);
    assert!(approx_vec(state.position, Vec3::new(-3.5, 0.25, 6.5)));
}

#[test]
fn hold_between_projects_and_skills() {
    let tl = Timeline::for_classification(Classification::Desktop);
    let end_of_projects = tl.evaluate(3.5);
    assert!(approx_vec(end_of_projects.position, Vec3::new(4.0, 1.0, 6.0)));
    assert_eq!(tl.evaluate(3.75), end_of_projects);
    assert_eq!(tl.evaluate(4.0), end_of_projects);
}

#[test]
fn seek_time_is_offset_times_duration() {
    let mut driver = TimelineDriver::new();
    assert_eq!(driver.seek_time(0.5), None);
    driver.install(Timeline::for_classification(Classification::Desktop));
    assert_eq!(driver.seek_time(0.0), Some(0.0));
    assert_eq!(driver.seek_time(0.5), Some(3.5));
    assert_eq!(driver.seek_time(1.0), Some(7.0));
    assert_eq!(driver.seek_time(-0.2), Some(0.0));
    assert_eq!(driver.seek_time(1.3), Some(7.0));
    assert_eq!(driver.seek_time(f32::NAN), Some(0.0));
}

#[test]
fn offset_zero_is_initial_and_one_is_final() {
    let mut driver = TimelineDriver::new();
    let tl = Timeline::for_classification(Classification::Desktop);
    let initial = tl.initial();
    driver.install(tl);

    assert!(driver.frame(0.0));
    assert_eq!(*driver.camera(), initial);
    assert_eq!(initial.position, Vec3::new(-3.0, 0.0, 8.0));

    assert!(driver.frame(1.0));
    assert!(approx_vec(driver.camera().position, Vec3::new(0.0, -0.5, 6.0)));
    assert!(approx_vec(driver.camera().look_at, Vec3::ZERO));
    assert_eq!(driver.current_act(), Some(Act::Contact));
}

#[test]
fn out_of_range_offsets_clamp() {
    let mut driver = TimelineDriver::new();
    driver.install(Timeline::for_classification(Classification::Desktop));

    driver.frame(0.0);
    let at_zero = *driver.camera();
    driver.frame(-0.2);
    assert_eq!(*driver.camera(), at_zero);

    driver.frame(1.0);
    let at_one = *driver.camera();
    driver.frame(1.3);
    assert_eq!(*driver.camera(), at_one);
}

#[test]
fn frame_without_timeline_is_a_noop() {
    let mut driver = TimelineDriver::new();
    let before = *driver.camera();
    assert!(!driver.frame(0.5));
    assert_eq!(*driver.camera(), before);
    assert_eq!(before, CameraState::default());
    assert_eq!(driver.current_act(), None);
}

#[test]
fn install_seeks_to_start() {
    let mut driver = TimelineDriver::new();
    driver.install(Timeline::for_classification(Classification::Mobile));
    assert_eq!(
        *driver.camera(),
        Timeline::for_classification(Classification::Mobile).initial()
    );
    assert_eq!(driver.current_act(), Some(Act::Intro));
}

#[test]
fn mobile_poses_sit_further_back() {
    let desktop = Timeline::for_classification(Classification::Desktop);
    let mobile = Timeline::for_classification(Classification::Mobile);
    assert_eq!(desktop.duration(), mobile.duration());
    for i in 0..=14 {
        let t = i as f32 * 0.5;
        let d = desktop.evaluate(t);
        let m = mobile.evaluate(t);
        assert!(
            m.position.distance(m.look_at) >= d.position.distance(d.look_at),
            "t={t}"
        );
    }
}

#[test]
fn resize_rebuilds_only_on_classification_change() {
    let mut rig = CameraRig::new();
    assert_eq!(rig.resize(1280.0), Some(Classification::Desktop));
    assert_eq!(rig.resize(1024.0), None);
    assert_eq!(rig.resize(800.0), None);
    assert_eq!(rig.rebuilds(), 1);
    assert_eq!(rig.resize(500.0), Some(Classification::Mobile));
    assert_eq!(rig.resize(320.0), None);
    assert_eq!(rig.rebuilds(), 2);
    assert_eq!(rig.classification(), Some(Classification::Mobile));
}

#[test]
fn desktop_mobile_desktop_round_trip_is_bit_exact() {
    let mut rig = CameraRig::new();
    rig.resize(1440.0);
    rig.frame(0.37);
    let before = *rig.camera();

    rig.resize(390.0);
    rig.frame(0.37);
    assert_ne!(*rig.camera(), before);

    rig.resize(1440.0);
    rig.frame(0.37);
    let after = *rig.camera();
    assert_eq!(after.position.to_array(), before.position.to_array());
    assert_eq!(after.look_at.to_array(), before.look_at.to_array());
}

#[test]
fn rapid_toggles_always_leave_a_complete_timeline() {
    let mut rig = CameraRig::new();
    let widths = [1200.0, 600.0, 1200.0, 600.0, 767.0, 768.0, 300.0, 2000.0];
    for (i, w) in widths.iter().enumerate() {
        rig.resize(*w);
        let tl = rig.driver().timeline().expect("timeline installed");
        assert_eq!(tl.segments().len(), 8, "toggle {i}");
        assert_eq!(tl.duration(), 7.0);
        let expected = Timeline::for_classification(Classification::from_width(*w));
        assert_eq!(**tl, expected);
        assert!(rig.frame(0.5));
        assert_eq!(*rig.camera(), expected.evaluate(3.5));
    }
    // 600 -> 767 stays mobile, so one resize is not a rebuild.
    assert_eq!(rig.rebuilds(), widths.len() as u32 - 1);
}

#[test]
fn frame_before_first_resize_does_nothing() {
    let mut rig = CameraRig::new();
    assert!(!rig.frame(0.8));
    assert_eq!(*rig.camera(), CameraState::default());
    assert_eq!(rig.classification(), None);
}

#[test]
fn custom_timeline_overlapping_segments_later_wins() {
    let tl = Timeline::builder(CameraState::new(Vec3::ZERO, Vec3::ZERO))
        .to(Track::Position, Vec3::new(10.0, 0.0, 0.0), 0.0, 2.0, Ease::Linear)
        .to(Track::Position, Vec3::new(0.0, 4.0, 0.0), 1.0, 1.0, Ease::Linear)
        .build();
    assert_eq!(tl.duration(), 2.0);
    // Second segment starts from the first one's value at t=1.
    assert_eq!(tl.segments()[1].start_value, Vec3::new(5.0, 0.0, 0.0));
    assert_eq!(tl.evaluate(0.5).position, Vec3::new(2.5, 0.0, 0.0));
    assert_eq!(tl.evaluate(1.5).position, Vec3::new(2.5, 2.0, 0.0));
    assert_eq!(tl.evaluate(2.0).position, Vec3::new(0.0, 4.0, 0.0));
}

#[test]
fn with_easing_keeps_overlapping_handover_continuous() {
    let tl = Timeline::builder(CameraState::new(Vec3::ZERO, Vec3::ZERO))
        .to(Track::Position, Vec3::new(10.0, 0.0, 0.0), 0.0, 2.0, Ease::Power2Out)
        .to(Track::Position, Vec3::new(0.0, 4.0, 0.0), 1.0, 1.0, Ease::Power2Out)
        .build();
    let linear = tl.with_easing(Ease::Linear);
    // Second segment starts where the linear first one is at t=1.
    assert!(approx_vec(linear.segments()[1].start_value, Vec3::new(5.0, 0.0, 0.0)));
    let before = linear.evaluate(1.0 - 1e-4).position;
    let at = linear.evaluate(1.0).position;
    assert!((before - at).length() < 1e-2, "{:?} -> {:?}", before, at);
    assert!(linear.segments().iter().all(|s| s.ease == Ease::Linear));
    assert_eq!(linear.duration(), tl.duration());
}

#[test]
fn scroll_progress_feeds_driver() {
    let mut progress = ScrollProgress::default();
    let mut rig = CameraRig::new();
    rig.resize(1280.0);
    let raw = raw_offset(2000.0, 5000.0, 1000.0);
    let offset = progress.update(raw, 0.016);
    assert_eq!(offset, 0.5);
    assert!(rig.frame(offset));
    assert_eq!(rig.driver().seek_time(offset), Some(3.5));
    assert_eq!(rig.driver().current_act(), Some(Act::Projects));
}
