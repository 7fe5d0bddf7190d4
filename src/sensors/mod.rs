//! Sensor subsystem.
//!
//! BrewLink carries a single sensor: the analog sense line across the
//! coffee machine's power indicator LED, which gives the consistency
//! monitor an observation of the appliance that is independent of the
//! relay drive path.

pub mod indicator;
