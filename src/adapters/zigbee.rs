//! Zigbee stack glue.
//!
//! The ESP Zigbee SDK delivers attribute writes through a core action
//! callback `(callback_id, message)`.  This adapter decodes that raw
//! traffic into [`CommandEvent`]s exactly once, at the boundary, and hands
//! them to the main loop through the command queue — the domain core never
//! sees callback ids or void payloads.
//!
//! The decode path ([`on_zb_action`], [`on_cluster_command`]) is pure Rust
//! and runs on the host test target; only the SDK registration and the
//! extern-C trampoline are espidf-gated.

use log::{debug, error, warn};

use crate::app::commands::{CommandEvent, PowerCommand};
use crate::events;
use crate::zcl::{self, AttributePath, AttributeValue, ZbStatus};

// ───────────────────────────────────────────────────────────────
// Decode boundary (both targets)
// ───────────────────────────────────────────────────────────────

/// Borrowed mirror of the SDK's set-attribute message, valid only for the
/// duration of one callback invocation.
#[derive(Debug, Clone, Copy)]
pub struct AttributeReport<'a> {
    pub endpoint: u8,
    pub cluster: u16,
    pub attribute: u16,
    pub data_type: u8,
    pub value: &'a [u8],
}

/// Handle one core action callback from the stack.
///
/// Returns the status the stack expects: `Fail` only for an absent or
/// malformed message — an attribute write addressed elsewhere is decoded
/// and queued so the dispatcher can ignore it by its own rules.
pub fn on_zb_action(callback_id: u32, msg: Option<&AttributeReport<'_>>) -> ZbStatus {
    if callback_id != zcl::ACTION_SET_ATTR_VALUE {
        debug!("zigbee: unhandled action callback 0x{:x}", callback_id);
        return ZbStatus::Ok;
    }

    let Some(report) = msg else {
        error!("zigbee: attribute callback with empty message");
        return ZbStatus::Fail;
    };

    let Some(value) = AttributeValue::from_slice(report.data_type, report.value) else {
        warn!(
            "zigbee: attribute payload too large ({} bytes), dropping",
            report.value.len()
        );
        return ZbStatus::Fail;
    };

    let event = CommandEvent::SetAttribute {
        path: AttributePath {
            endpoint: report.endpoint,
            cluster: report.cluster,
            attribute: report.attribute,
        },
        value,
    };

    if events::push_command(event) {
        ZbStatus::Ok
    } else {
        warn!("zigbee: command queue full, dropping attribute write");
        ZbStatus::Fail
    }
}

/// Handle a raw On/Off cluster command (On, Off, Toggle).
pub fn on_cluster_command(cmd_id: u8) -> ZbStatus {
    match PowerCommand::from_zcl(cmd_id) {
        Some(cmd) => {
            if events::push_command(CommandEvent::Power(cmd)) {
                ZbStatus::Ok
            } else {
                warn!("zigbee: command queue full, dropping {:?}", cmd);
                ZbStatus::Fail
            }
        }
        None => {
            debug!("zigbee: unknown On/Off command id {}", cmd_id);
            ZbStatus::Ok
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Stack bring-up (espidf only)
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
mod stack {
    use super::*;
    use crate::error::Error;
    use esp_idf_svc::sys::*;
    use log::info;

    /// Configure the Zigbee platform and start the stack task.
    ///
    /// The stack runs its own main loop on a dedicated thread; attribute
    /// writes arrive on that thread and cross into the main loop through
    /// the command queue.  Join/commissioning sequencing is entirely the
    /// SDK's business.
    pub fn start(endpoint: u8) -> crate::error::Result<()> {
        // SAFETY: platform config runs once, before the stack task exists.
        unsafe {
            let platform_cfg = esp_zb_platform_config_t {
                radio_config: esp_zb_radio_config_t {
                    radio_mode: esp_zb_radio_mode_t_ZB_RADIO_MODE_NATIVE,
                    ..Default::default()
                },
                host_config: esp_zb_host_config_t {
                    host_connection_mode:
                        esp_zb_host_connection_mode_t_ZB_HOST_CONNECTION_MODE_NONE,
                    ..Default::default()
                },
            };
            if esp_zb_platform_config(&platform_cfg) != ESP_OK {
                return Err(Error::Init("zigbee platform config"));
            }
        }

        std::thread::Builder::new()
            .name("zb_stack".into())
            .stack_size(8192)
            .spawn(move || zb_stack_task(endpoint))
            .map_err(|_| Error::Init("zigbee stack task spawn"))?;

        info!("zigbee: stack task started (endpoint {})", endpoint);
        Ok(())
    }

    /// The stack task: init as End Device, register the On/Off endpoint and
    /// the action handler, then enter the SDK main loop (never returns).
    fn zb_stack_task(endpoint: u8) {
        // SAFETY: all esp_zb_* setup calls below run on the stack task
        // before esp_zb_stack_main_loop takes over; the SDK requires
        // exactly this sequencing.
        unsafe {
            let mut nwk_cfg = esp_zb_cfg_t {
                esp_zb_role: esp_zb_nwk_device_type_t_ESP_ZB_DEVICE_TYPE_ED,
                install_code_policy: false,
                ..Default::default()
            };
            esp_zb_init(&mut nwk_cfg);

            let on_off_cfg = esp_zb_on_off_light_cfg_t::default();
            let ep_list = esp_zb_on_off_light_ep_create(endpoint, &on_off_cfg as *const _ as *mut _);
            esp_zb_device_register(ep_list);

            esp_zb_core_action_handler_register(Some(zb_action_handler));
            esp_zb_set_primary_network_channel_set(ESP_ZB_TRANSCEIVER_ALL_CHANNELS_MASK);

            if esp_zb_start(false) != ESP_OK {
                log::error!("zigbee: esp_zb_start failed");
                return;
            }
            esp_zb_stack_main_loop();
        }
    }

    /// Extern-C trampoline: mirror the SDK message into a borrowed
    /// [`AttributeReport`] and hand it to the pure decode path.
    unsafe extern "C" fn zb_action_handler(
        callback_id: esp_zb_core_action_callback_id_t,
        message: *const core::ffi::c_void,
    ) -> esp_err_t {
        let status = if callback_id == esp_zb_core_action_callback_id_t_ESP_ZB_CORE_SET_ATTR_VALUE_CB_ID
        {
            // SAFETY: the SDK hands an esp_zb_zcl_set_attr_value_message_t
            // for this callback id; the pointer is valid for the call.
            let msg = unsafe { message.cast::<esp_zb_zcl_set_attr_value_message_t>().as_ref() };
            match msg {
                None => super::on_zb_action(zcl::ACTION_SET_ATTR_VALUE, None),
                Some(m) => {
                    let value = if m.attribute.data.value.is_null() || m.attribute.data.size == 0 {
                        &[][..]
                    } else {
                        // SAFETY: value/size describe the attribute payload
                        // for the duration of the callback.
                        unsafe {
                            core::slice::from_raw_parts(
                                m.attribute.data.value.cast::<u8>(),
                                m.attribute.data.size as usize,
                            )
                        }
                    };
                    let report = AttributeReport {
                        endpoint: m.info.dst_endpoint,
                        cluster: m.info.cluster,
                        attribute: m.attribute.id,
                        data_type: m.attribute.data.type_,
                        value,
                    };
                    super::on_zb_action(zcl::ACTION_SET_ATTR_VALUE, Some(&report))
                }
            }
        } else {
            super::on_zb_action(callback_id, None)
        };

        match status {
            ZbStatus::Ok => ESP_OK,
            ZbStatus::Fail => ESP_FAIL,
        }
    }
}

#[cfg(target_os = "espidf")]
pub use stack::start;
