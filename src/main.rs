//! BrewLink Firmware — Main Entry Point
//!
//! Hexagonal architecture with a queue-driven control loop:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                   │
//! │                                                            │
//! │  ZigbeeAdapter     HardwareAdapter      LogEventSink       │
//! │  (stack callback)  (Relay+Indicator)    (EventSink)        │
//! │  NvsAdapter                                                │
//! │  (ConfigPort)                                              │
//! │                                                            │
//! │  ─────────────── Port Trait Boundary ──────────────────    │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────────┐  │
//! │  │           ApplianceService (pure logic)              │  │
//! │  │  Dispatcher · Attribute Store · Consistency Monitor  │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The Zigbee stack task decodes attribute writes into the command queue;
//! this loop drains it, dispatches each event to completion, and runs the
//! commanded-vs-observed consistency check on its own period.
#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use brewlink::adapters::hardware::HardwareAdapter;
use brewlink::adapters::log_sink::LogEventSink;
use brewlink::adapters::nvs::NvsAdapter;
use brewlink::adapters::zigbee;
use brewlink::app::events::AppEvent;
use brewlink::app::ports::{ConfigPort, EventSink};
use brewlink::app::service::ApplianceService;
use brewlink::config::SystemConfig;
use brewlink::drivers::hw_init;
use brewlink::drivers::relay::RelayDriver;
use brewlink::events;
use brewlink::sensors::indicator::IndicatorSensor;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  BrewLink v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Load config from NVS (or defaults) ─────────────────
    let nvs = match NvsAdapter::new() {
        Ok(n) => n,
        Err(e) => {
            warn!("NVS init failed ({}), running with defaults and no persistence", e);
            NvsAdapter::default()
        }
    };
    let config = match nvs.load() {
        Ok(cfg) => {
            info!("Config loaded from NVS");
            cfg
        }
        Err(e) => {
            warn!("NVS config load failed ({}), using defaults", e);
            SystemConfig::default()
        }
    };

    // ── 4. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::new(
        RelayDriver::new(),
        IndicatorSensor::new(
            brewlink::pins::INDICATOR_ADC_GPIO,
            config.indicator_on_threshold,
            config.indicator_sample_count,
        ),
    );
    let mut sink = LogEventSink::new();

    // ── 5. Construct and start the app service ────────────────
    let mut service = ApplianceService::new(&config);
    service.start(&mut hw, &mut sink);

    // ── 6. Start the Zigbee stack ─────────────────────────────
    // Runs on its own task; attribute writes cross back through the
    // command queue.  Commissioning/joining is the SDK's business.
    zigbee::start(config.endpoint_id)?;

    info!("System ready. Entering control loop.");

    // ── 7. Control loop ───────────────────────────────────────
    let poll_ms = u64::from(config.command_poll_interval_ms);
    let checks_per_poll = (config.consistency_check_interval_ms
        / config.command_poll_interval_ms.max(1))
    .max(1) as u64;
    let telemetry_every_checks =
        (u64::from(config.telemetry_interval_secs) * 1000
            / u64::from(config.consistency_check_interval_ms))
        .max(1);

    let mut polls: u64 = 0;
    let mut checks: u64 = 0;

    loop {
        std::thread::sleep(std::time::Duration::from_millis(poll_ms));
        polls += 1;

        // Drain pending command events; each dispatches to completion.
        events::drain_commands(|event| {
            if let Err(e) = service.dispatch(Some(event), &mut hw, &mut sink) {
                warn!("dispatch failed: {}", e);
            }
        });

        // Consistency check on its own period.  Mismatches are advisory —
        // the sink reports them and the loop keeps running.
        if polls % checks_per_poll == 0 {
            let _ = service.run_consistency_check(&mut hw, &mut sink);
            checks += 1;

            if checks % telemetry_every_checks == 0 {
                let t = service.build_telemetry(&hw);
                sink.emit(&AppEvent::Telemetry(t));
            }
        }
    }
}
