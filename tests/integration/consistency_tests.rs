//! Integration tests for the consistency-verification path.
//!
//! Commanded state vs. the independent indicator observation: matches,
//! advisory mismatches, the settle window after a power change, and the
//! divergence latch.

use crate::mock_hw::{MockHardware, RecordingSink};

use brewlink::app::commands::{CommandEvent, PowerCommand};
use brewlink::app::service::ApplianceService;
use brewlink::config::SystemConfig;
use brewlink::monitor::ConsistencyResult;

fn make_app() -> (ApplianceService, MockHardware, RecordingSink, SystemConfig) {
    let config = SystemConfig::default();
    let mut app = ApplianceService::new(&config);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);
    (app, hw, sink, config)
}

fn command_on(app: &mut ApplianceService, hw: &mut MockHardware, sink: &mut RecordingSink) {
    app.dispatch(Some(CommandEvent::Power(PowerCommand::On)), hw, sink)
        .unwrap();
}

// ── Spec scenarios ───────────────────────────────────────────

#[test]
fn commanded_on_with_bright_indicator_matches() {
    let (mut app, mut hw, mut sink, _) = make_app();
    command_on(&mut app, &mut hw, &mut sink);

    hw.adc_raw = 2500; // > 2000 threshold
    assert_eq!(
        app.run_consistency_check(&mut hw, &mut sink),
        ConsistencyResult::Match
    );
    assert_eq!(sink.mismatch_count(), 0);
}

#[test]
fn commanded_on_with_dark_indicator_mismatches() {
    let (mut app, mut hw, mut sink, _) = make_app();
    command_on(&mut app, &mut hw, &mut sink);

    hw.adc_raw = 500; // < 2000 threshold
    assert_eq!(
        app.run_consistency_check(&mut hw, &mut sink),
        ConsistencyResult::Mismatch {
            commanded: true,
            observed: false,
        }
    );
    assert_eq!(sink.mismatch_count(), 1);
}

#[test]
fn commanded_off_with_dark_indicator_matches() {
    let (mut app, mut hw, mut sink, _) = make_app();

    hw.adc_raw = 500;
    assert_eq!(
        app.run_consistency_check(&mut hw, &mut sink),
        ConsistencyResult::Match
    );
}

// ── Mismatches are advisory ──────────────────────────────────

#[test]
fn mismatch_never_halts_operation() {
    let (mut app, mut hw, mut sink, _) = make_app();
    command_on(&mut app, &mut hw, &mut sink);

    hw.adc_raw = 100;
    for _ in 0..20 {
        let _ = app.run_consistency_check(&mut hw, &mut sink);
    }

    // The commanded state is untouched and dispatch still works.
    assert!(app.power_commanded());
    app.dispatch(
        Some(CommandEvent::Power(PowerCommand::Off)),
        &mut hw,
        &mut sink,
    )
    .unwrap();
    assert!(!app.power_commanded());
}

// ── Settle window and divergence latch ───────────────────────

#[test]
fn transient_mismatch_during_settle_does_not_latch() {
    let (mut app, mut hw, mut sink, config) = make_app();
    command_on(&mut app, &mut hw, &mut sink);

    // Indicator lags the relay for the whole settle window, then catches
    // up — the classic actuation-latency transient.
    hw.adc_raw = 100;
    for _ in 0..config.consistency_settle_checks {
        let r = app.run_consistency_check(&mut hw, &mut sink);
        assert!(!r.is_match(), "raw mismatch is still reported");
    }
    hw.adc_raw = 2500;
    assert!(app.run_consistency_check(&mut hw, &mut sink).is_match());

    assert!(!app.diverged());
    assert!(!sink.divergence_latched());
}

#[test]
fn persistent_mismatch_latches_then_recovery_clears() {
    let (mut app, mut hw, mut sink, config) = make_app();
    command_on(&mut app, &mut hw, &mut sink);

    // Stuck dark well past the settle window.
    hw.adc_raw = 100;
    let checks = u32::from(config.consistency_settle_checks)
        + u32::from(config.mismatch_latch_count);
    for _ in 0..checks {
        let _ = app.run_consistency_check(&mut hw, &mut sink);
    }
    assert!(app.diverged(), "persistent mismatch must latch divergence");
    assert!(sink.divergence_latched());

    // One healthy reading clears it.
    hw.adc_raw = 2500;
    assert!(app.run_consistency_check(&mut hw, &mut sink).is_match());
    assert!(!app.diverged());
    assert!(sink.divergence_cleared());
}

#[test]
fn each_power_change_reopens_settle_window() {
    let (mut app, mut hw, mut sink, config) = make_app();

    // Run the monitor long past any window on a healthy dark machine.
    hw.adc_raw = 100;
    for _ in 0..10 {
        assert!(app.run_consistency_check(&mut hw, &mut sink).is_match());
    }

    // Now command on; the indicator lags but within the settle window,
    // so no divergence accumulates.
    command_on(&mut app, &mut hw, &mut sink);
    for _ in 0..config.consistency_settle_checks {
        let _ = app.run_consistency_check(&mut hw, &mut sink);
    }
    assert!(!app.diverged());
    assert_eq!(
        sink.mismatch_count(),
        usize::from(config.consistency_settle_checks),
        "transients are still reported, just not counted"
    );
}

// ── Telemetry ────────────────────────────────────────────────

#[test]
fn telemetry_reflects_last_check() {
    let (mut app, mut hw, mut sink, _) = make_app();
    command_on(&mut app, &mut hw, &mut sink);

    hw.adc_raw = 2500;
    let _ = app.run_consistency_check(&mut hw, &mut sink);

    let t = app.build_telemetry(&hw);
    assert!(t.power_commanded);
    assert!(t.relay_on);
    assert_eq!(t.indicator_raw, 2500);
    assert!(t.indicator_lit);
    assert_eq!(t.consecutive_mismatches, 0);
    assert!(!t.diverged);
}

// ── Full loop scenario ───────────────────────────────────────

#[test]
fn toggle_cycle_with_healthy_indicator_never_mismatches() {
    let (mut app, mut hw, mut sink, _) = make_app();

    // Five toggle cycles; the indicator follows the relay each time
    // before the check runs, as in the bring-up demo loop.
    for _ in 0..5 {
        app.dispatch(
            Some(CommandEvent::Power(PowerCommand::Toggle)),
            &mut hw,
            &mut sink,
        )
        .unwrap();
        hw.follow_relay();
        assert!(app.run_consistency_check(&mut hw, &mut sink).is_match());
    }
    assert_eq!(sink.mismatch_count(), 0);
    // Five toggles from off ends on.
    assert!(app.power_commanded());
}
