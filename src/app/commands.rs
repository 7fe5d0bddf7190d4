//! Inbound command events.
//!
//! The network stack's raw callback traffic is decoded into these closed
//! variants exactly once at the boundary (see
//! [`adapters::zigbee`](crate::adapters::zigbee)); the dispatcher never
//! sees opaque callback ids or untyped payloads.

use crate::zcl::{AttributePath, AttributeValue, CMD_OFF, CMD_ON, CMD_TOGGLE};

/// A raw On/Off cluster command, applied unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerCommand {
    Off,
    On,
    Toggle,
}

impl PowerCommand {
    /// Decode a ZCL On/Off command id.
    pub fn from_zcl(cmd_id: u8) -> Option<Self> {
        match cmd_id {
            CMD_OFF => Some(Self::Off),
            CMD_ON => Some(Self::On),
            CMD_TOGGLE => Some(Self::Toggle),
            _ => None,
        }
    }
}

/// One decoded instruction from the network stack.
///
/// Transient: consumed exactly once by the dispatcher, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandEvent {
    /// A remote attribute write.  Carries the full target address so the
    /// dispatcher can filter against the configured binding — writes for
    /// other endpoints or clusters pass through unaffected.
    SetAttribute {
        path: AttributePath,
        value: AttributeValue,
    },

    /// A raw On/Off cluster command.
    Power(PowerCommand),

    /// Any other stack action, identified only for logging.
    Other(u16),
}

impl CommandEvent {
    /// Convenience constructor for an on/off attribute write.
    pub fn set_on_off(path: AttributePath, on: bool) -> Self {
        Self::SetAttribute {
            path,
            value: AttributeValue::boolean(on),
        }
    }
}
