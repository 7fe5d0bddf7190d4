//! Power relay driver.
//!
//! A single digital output drives the opto-isolated relay module that
//! switches the coffee machine's mains feed.  The driver is a dumb
//! actuator: the authoritative state lives in the attribute store, and this
//! module only mirrors it onto the pin.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

pub struct RelayDriver {
    on: bool,
}

impl RelayDriver {
    /// The relay pin is driven low by `hw_init::init_peripherals()` before
    /// the driver is constructed, so `on: false` reflects the hardware.
    pub fn new() -> Self {
        Self { on: false }
    }

    /// Drive the relay output.  Best-effort hardware write — a GPIO level
    /// set has no software-observable failure mode.
    pub fn apply(&mut self, on: bool) {
        hw_init::gpio_write(pins::RELAY_GPIO, on);
        self.on = on;
    }

    /// Last state the output was driven to.
    pub fn is_on(&self) -> bool {
        self.on
    }
}
