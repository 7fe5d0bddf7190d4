//! Integration tests for the command-dispatch chain.
//!
//! These verify the full path from a decoded network event down to the
//! relay port: binding filter, payload decode, attribute-store
//! write-through, and the status codes handed back to the stack.

use crate::mock_hw::{MockHardware, RecordingSink};

use brewlink::DispatchError;
use brewlink::app::commands::{CommandEvent, PowerCommand};
use brewlink::app::events::AppEvent;
use brewlink::app::service::ApplianceService;
use brewlink::config::SystemConfig;
use brewlink::zcl::{AttributePath, AttributeValue, ZbStatus};

fn make_app() -> (ApplianceService, MockHardware, RecordingSink) {
    let config = SystemConfig::default();
    let mut app = ApplianceService::new(&config);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);
    (app, hw, sink)
}

// ── Boot invariant ───────────────────────────────────────────

#[test]
fn boot_leaves_appliance_off() {
    let (app, hw, sink) = make_app();

    assert!(!app.power_commanded(), "commanded state must start off");
    assert_eq!(hw.relay_writes, vec![false], "relay must be driven to off");
    assert!(matches!(
        sink.events.as_slice(),
        [AppEvent::Started { power: false }]
    ));
}

// ── Matching attribute writes ────────────────────────────────

#[test]
fn matching_set_attribute_updates_store_and_relay() {
    let (mut app, mut hw, mut sink) = make_app();
    let path = app.binding().path();

    app.dispatch(Some(CommandEvent::set_on_off(path, true)), &mut hw, &mut sink)
        .unwrap();
    assert!(app.power_commanded());
    assert!(hw.relay_on(), "relay must be last driven with true");

    app.dispatch(Some(CommandEvent::set_on_off(path, false)), &mut hw, &mut sink)
        .unwrap();
    assert!(!app.power_commanded());
    assert!(!hw.relay_on(), "relay must be last driven with false");
}

#[test]
fn power_changed_emitted_once_per_transition() {
    let (mut app, mut hw, mut sink) = make_app();
    let path = app.binding().path();

    app.dispatch(Some(CommandEvent::set_on_off(path, true)), &mut hw, &mut sink)
        .unwrap();
    app.dispatch(Some(CommandEvent::set_on_off(path, true)), &mut hw, &mut sink)
        .unwrap();

    assert_eq!(
        sink.power_change_count(),
        1,
        "re-asserting the same state is not a transition"
    );
    // The store still writes through both times.
    assert_eq!(hw.relay_writes, vec![false, true, true]);
}

// ── Foreign traffic passes through ───────────────────────────

#[test]
fn wrong_endpoint_is_ignored_without_error() {
    let (mut app, mut hw, mut sink) = make_app();
    let mut path = app.binding().path();
    path.endpoint += 1;

    app.dispatch(Some(CommandEvent::set_on_off(path, true)), &mut hw, &mut sink)
        .unwrap();
    assert!(!app.power_commanded(), "state must be unchanged");
    assert_eq!(hw.relay_writes, vec![false], "no relay write after boot");
}

#[test]
fn wrong_cluster_is_ignored_without_error() {
    let (mut app, mut hw, mut sink) = make_app();
    let mut path = app.binding().path();
    path.cluster = 0x0008; // Level Control

    app.dispatch(Some(CommandEvent::set_on_off(path, true)), &mut hw, &mut sink)
        .unwrap();
    assert!(!app.power_commanded());
}

#[test]
fn wrong_attribute_is_ignored_without_error() {
    let (mut app, mut hw, mut sink) = make_app();
    let mut path = app.binding().path();
    path.attribute = 0x4000; // GlobalSceneControl

    app.dispatch(Some(CommandEvent::set_on_off(path, true)), &mut hw, &mut sink)
        .unwrap();
    assert!(!app.power_commanded());
}

#[test]
fn wrong_data_type_is_ignored_without_error() {
    let (mut app, mut hw, mut sink) = make_app();
    let path = app.binding().path();
    // Right address, but a uint8 payload instead of a boolean.
    let value = AttributeValue::from_slice(0x20, &[1]).unwrap();

    app.dispatch(
        Some(CommandEvent::SetAttribute { path, value }),
        &mut hw,
        &mut sink,
    )
    .unwrap();
    assert!(!app.power_commanded());
}

// ── Raw power commands ───────────────────────────────────────

#[test]
fn double_toggle_restores_original_state() {
    let (mut app, mut hw, mut sink) = make_app();

    for initial in [false, true] {
        app.dispatch(
            Some(CommandEvent::Power(if initial {
                PowerCommand::On
            } else {
                PowerCommand::Off
            })),
            &mut hw,
            &mut sink,
        )
        .unwrap();

        app.dispatch(Some(CommandEvent::Power(PowerCommand::Toggle)), &mut hw, &mut sink)
            .unwrap();
        app.dispatch(Some(CommandEvent::Power(PowerCommand::Toggle)), &mut hw, &mut sink)
            .unwrap();

        assert_eq!(app.power_commanded(), initial);
    }
}

#[test]
fn on_off_toggle_sequence_ends_on() {
    let (mut app, mut hw, mut sink) = make_app();

    for cmd in [PowerCommand::On, PowerCommand::Off, PowerCommand::Toggle] {
        app.dispatch(Some(CommandEvent::Power(cmd)), &mut hw, &mut sink)
            .unwrap();
    }
    assert!(app.power_commanded());
    assert!(hw.relay_on());
}

// ── Null events ──────────────────────────────────────────────

#[test]
fn null_event_fails_without_mutation() {
    let (mut app, mut hw, mut sink) = make_app();

    let err = app.dispatch(None, &mut hw, &mut sink).unwrap_err();
    assert_eq!(err, DispatchError::NullEvent);
    assert!(!app.power_commanded());
    assert_eq!(hw.relay_writes, vec![false]);
    assert_eq!(sink.power_change_count(), 0);
}

#[test]
fn network_event_status_codes() {
    let (mut app, mut hw, mut sink) = make_app();
    let foreign = AttributePath {
        endpoint: 99,
        cluster: 0x0300,
        attribute: 0x0007,
    };

    assert_eq!(app.on_network_event(None, &mut hw, &mut sink), ZbStatus::Fail);
    assert_eq!(
        app.on_network_event(
            Some(CommandEvent::set_on_off(foreign, true)),
            &mut hw,
            &mut sink
        ),
        ZbStatus::Ok,
        "foreign traffic is OK, not a failure"
    );
    assert_eq!(
        app.on_network_event(Some(CommandEvent::Other(0x1005)), &mut hw, &mut sink),
        ZbStatus::Ok,
        "unknown event kinds are never fatal"
    );
}

// ── Zigbee callback boundary → queue → dispatcher ────────────

// Single test: the command queue is a process-wide static, so the whole
// callback round-trip lives in one #[test] to stay off other tests' toes.
#[test]
fn zigbee_callback_roundtrip_through_queue() {
    use brewlink::adapters::zigbee::{AttributeReport, on_zb_action};
    use brewlink::events;
    use brewlink::zcl;

    let (mut app, mut hw, mut sink) = make_app();
    let binding = *app.binding();

    // Null message mirrors the SDK handing us a null pointer.
    assert_eq!(
        on_zb_action(zcl::ACTION_SET_ATTR_VALUE, None),
        ZbStatus::Fail
    );
    assert!(events::queue_is_empty(), "nothing queued for a null message");

    // Unknown callback ids are acknowledged and not queued.
    assert_eq!(on_zb_action(0x1005, None), ZbStatus::Ok);
    assert!(events::queue_is_empty());

    // A real attribute write is decoded once and queued.
    let report = AttributeReport {
        endpoint: binding.endpoint,
        cluster: binding.cluster,
        attribute: binding.attribute,
        data_type: zcl::ZCL_TYPE_BOOL,
        value: &[1],
    };
    assert_eq!(on_zb_action(zcl::ACTION_SET_ATTR_VALUE, Some(&report)), ZbStatus::Ok);
    assert_eq!(events::queue_len(), 1);

    // The main loop drains and dispatches it.
    events::drain_commands(|event| {
        app.dispatch(Some(event), &mut hw, &mut sink).unwrap();
    });
    assert!(app.power_commanded());
    assert!(hw.relay_on());

    // Raw cluster commands take the same road.
    use brewlink::adapters::zigbee::on_cluster_command;
    assert_eq!(on_cluster_command(zcl::CMD_OFF), ZbStatus::Ok);
    events::drain_commands(|event| {
        app.dispatch(Some(event), &mut hw, &mut sink).unwrap();
    });
    assert!(!app.power_commanded());

    // Unknown command ids are logged and acknowledged, nothing queued.
    assert_eq!(on_cluster_command(0x55), ZbStatus::Ok);
    assert!(events::queue_is_empty());
}
