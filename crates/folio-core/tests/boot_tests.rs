// Integration tests for the loading screen gate, chime schedule and the
// adaptive pixel-ratio monitor.

use folio_core::chime::{ChimePlan, Ramp};
use folio_core::loading::{ChimeLatch, LoadingGate, Phase};
use folio_core::perf::{PerfChange, PerfMonitor};

#[test]
fn button_waits_for_minimum_boot_time() {
    let mut gate = LoadingGate::default();
    assert_eq!(gate.tick(0.5, 100.0), Phase::Booting);
    assert_eq!(gate.tick(3.0, 100.0), Phase::Booting);
    assert_eq!(gate.tick(3.5, 100.0), Phase::Booting);
    assert_eq!(gate.tick(3.9, 100.0), Phase::Booting);
    assert_eq!(gate.tick(4.0, 100.0), Phase::Ready);
}

#[test]
fn button_waits_for_assets() {
    let mut gate = LoadingGate::default();
    assert_eq!(gate.tick(5.0, 60.0), Phase::Booting);
    assert_eq!(gate.tick(6.0, 100.0), Phase::Booting);
    assert_eq!(gate.tick(6.25, 100.0), Phase::Booting);
    assert_eq!(gate.tick(6.5, 100.0), Phase::Ready);
}

#[test]
fn start_only_from_ready() {
    let mut gate = LoadingGate::default();
    assert!(!gate.start());
    gate.tick(10.0, 100.0);
    gate.tick(10.5, 100.0);
    assert_eq!(gate.phase(), Phase::Ready);
    assert!(gate.start());
    assert!(!gate.start());
    assert_eq!(gate.tick(11.0, 100.0), Phase::Started);
}

#[test]
fn chime_latch_fires_once() {
    let mut latch = ChimeLatch::default();
    assert!(!latch.has_fired());
    assert!(latch.fire());
    assert!(!latch.fire());
    assert!(!latch.fire());
    assert!(latch.has_fired());
}

#[test]
fn startup_chime_schedule() {
    let plan = ChimePlan::startup();
    assert_eq!(plan.master_gain, 0.5);
    assert_eq!(plan.master.at, 4.0);
    assert_eq!(plan.master.value, 0.0);
    assert_eq!(plan.length(), 4.0);

    let pad: Vec<f32> = plan.pad.iter().map(|v| v.frequency).collect();
    assert_eq!(pad, vec![220.0, 329.63]);

    let notes: Vec<(f32, f32, f32)> = plan
        .chimes
        .iter()
        .map(|v| (v.frequency, v.start, v.stop - v.start))
        .collect();
    assert_eq!(notes.len(), 4);
    let expected = [(440.0, 0.1, 2.0), (554.37, 0.3, 2.0), (659.25, 0.5, 2.5), (880.0, 0.8, 3.0)];
    for (got, want) in notes.iter().zip(expected.iter()) {
        assert_eq!(got.0, want.0);
        assert!((got.1 - want.1).abs() < 1e-6);
        assert!((got.2 - want.2).abs() < 1e-6);
    }

    for voice in &plan.chimes {
        assert_eq!(voice.initial_gain, 0.0);
        let attack = voice.gain[0];
        let release = voice.gain[1];
        assert_eq!(attack.ramp, Ramp::Linear);
        assert_eq!(attack.value, 0.3);
        assert!((attack.at - voice.start - 0.05).abs() < 1e-6);
        assert_eq!(release.ramp, Ramp::Exponential);
        assert_eq!(release.value, 0.001);
        assert!((release.at - voice.stop).abs() < 1e-6);
    }

    assert_eq!(plan.noise.duration, 3.0);
    assert_eq!(plan.noise.filter_start_hz, 100.0);
    assert_eq!(plan.noise.filter.value, 800.0);
    assert_eq!(plan.noise.filter.ramp, Ramp::Exponential);
    assert_eq!(plan.noise.initial_gain, 0.05);
    assert_eq!(plan.noise.gain.at, 3.0);
}

#[test]
fn perf_monitor_declines_then_inclines() {
    let mut perf = PerfMonitor::default();
    assert_eq!(perf.dpr(), 1.5);

    let mut changes = Vec::new();
    for _ in 0..30 {
        changes.extend(perf.record(1.0 / 30.0));
    }
    assert_eq!(changes, vec![PerfChange::Decline]);
    assert_eq!(perf.dpr(), 1.0);

    // Window restarts after a change.
    for _ in 0..29 {
        assert_eq!(perf.record(1.0 / 60.0), None);
    }
    assert_eq!(perf.record(1.0 / 60.0), Some(PerfChange::Incline));
    assert_eq!(perf.dpr(), 1.5);
}

#[test]
fn perf_monitor_reports_only_transitions() {
    let mut perf = PerfMonitor::default();
    for _ in 0..120 {
        assert_eq!(perf.record(1.0 / 60.0), None);
    }
    // In the dead band between the bounds nothing changes either.
    for _ in 0..120 {
        assert_eq!(perf.record(1.0 / 48.0), None);
    }
    assert_eq!(perf.record(0.0), None);
    assert_eq!(perf.record(f32::NAN), None);
    assert_eq!(perf.dpr(), 1.5);
}
