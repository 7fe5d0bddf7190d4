//! Zigbee Cluster Library wire-level types and constants.
//!
//! Only the tiny slice of ZCL this appliance speaks: the Home Automation
//! On/Off cluster, its on/off boolean attribute, and the three On/Off
//! commands.  The raw identifiers arriving from the network stack are
//! decoded into the typed structures here exactly once, at the boundary —
//! nothing downstream handles opaque ids or void payloads.

use crate::config::SystemConfig;
use core::fmt;

// ---------------------------------------------------------------------------
// ZCL identifiers
// ---------------------------------------------------------------------------

/// Home Automation profile id.
pub const HA_PROFILE_ID: u16 = 0x0104;

/// On/Off cluster id.
pub const ON_OFF_CLUSTER_ID: u16 = 0x0006;

/// OnOff attribute id within the On/Off cluster.
pub const ON_OFF_ATTRIBUTE_ID: u16 = 0x0000;

/// ZCL boolean attribute data type.
pub const ZCL_TYPE_BOOL: u8 = 0x10;

/// On/Off cluster command ids.
pub const CMD_OFF: u8 = 0x00;
pub const CMD_ON: u8 = 0x01;
pub const CMD_TOGGLE: u8 = 0x02;

/// Core action callback id for "set attribute value" (the only action the
/// dispatcher consumes; everything else is reported as `Other`).
pub const ACTION_SET_ATTR_VALUE: u32 = 0x0000;

// ---------------------------------------------------------------------------
// Status returned to the network stack
// ---------------------------------------------------------------------------

/// Per-invocation status handed back to the stack's callback machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZbStatus {
    Ok,
    Fail,
}

impl ZbStatus {
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
}

// ---------------------------------------------------------------------------
// Attribute addressing and payload
// ---------------------------------------------------------------------------

/// Fully-qualified address of an attribute on this node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributePath {
    pub endpoint: u8,
    pub cluster: u16,
    pub attribute: u16,
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ep{}/cluster 0x{:04x}/attr 0x{:04x}",
            self.endpoint, self.cluster, self.attribute
        )
    }
}

/// Maximum attribute payload the dispatcher accepts.  The on/off boolean is
/// a single byte; the headroom covers the other short ZCL scalar types so a
/// foreign attribute write is carried intact to the filter instead of being
/// rejected at the wire.
pub const MAX_ATTR_PAYLOAD: usize = 8;

/// A typed attribute payload: the ZCL data type tag plus the raw value
/// bytes, copied out of the stack's transient message buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeValue {
    data_type: u8,
    len: u8,
    raw: [u8; MAX_ATTR_PAYLOAD],
}

impl AttributeValue {
    /// Copy a payload out of a wire buffer.  Returns `None` when the value
    /// is larger than any attribute this device models.
    pub fn from_slice(data_type: u8, value: &[u8]) -> Option<Self> {
        if value.len() > MAX_ATTR_PAYLOAD {
            return None;
        }
        let mut raw = [0u8; MAX_ATTR_PAYLOAD];
        raw[..value.len()].copy_from_slice(value);
        Some(Self {
            data_type,
            len: value.len() as u8,
            raw,
        })
    }

    /// Convenience constructor for a boolean payload.
    pub fn boolean(on: bool) -> Self {
        Self {
            data_type: ZCL_TYPE_BOOL,
            len: 1,
            raw: [u8::from(on), 0, 0, 0, 0, 0, 0, 0],
        }
    }

    pub fn data_type(&self) -> u8 {
        self.data_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.raw[..self.len as usize]
    }

    /// Decode as a ZCL boolean.  `None` unless the data type tag says
    /// boolean and at least one payload byte is present.
    pub fn as_bool(&self) -> Option<bool> {
        if self.data_type != ZCL_TYPE_BOOL || self.len == 0 {
            return None;
        }
        Some(self.raw[0] != 0)
    }
}

// ---------------------------------------------------------------------------
// Endpoint binding
// ---------------------------------------------------------------------------

/// Static binding of the appliance to one (endpoint, cluster, attribute,
/// data type) tuple.  Built once from configuration at startup and used by
/// the dispatcher as its filter key; immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointBinding {
    pub endpoint: u8,
    pub cluster: u16,
    pub attribute: u16,
    pub data_type: u8,
}

impl EndpointBinding {
    /// The On/Off power binding for the given endpoint.
    pub fn on_off(endpoint: u8) -> Self {
        Self {
            endpoint,
            cluster: ON_OFF_CLUSTER_ID,
            attribute: ON_OFF_ATTRIBUTE_ID,
            data_type: ZCL_TYPE_BOOL,
        }
    }

    /// Binding derived from the system configuration.
    pub fn from_config(config: &SystemConfig) -> Self {
        Self::on_off(config.endpoint_id)
    }

    /// Exact address match: endpoint, cluster and attribute must all agree.
    pub fn matches(&self, path: &AttributePath) -> bool {
        self.endpoint == path.endpoint
            && self.cluster == path.cluster
            && self.attribute == path.attribute
    }

    /// Address match plus payload data type match.
    pub fn accepts(&self, path: &AttributePath, value: &AttributeValue) -> bool {
        self.matches(path) && value.data_type() == self.data_type
    }

    /// The attribute path this binding listens on.
    pub fn path(&self) -> AttributePath {
        AttributePath {
            endpoint: self.endpoint,
            cluster: self.cluster,
            attribute: self.attribute,
        }
    }
}
