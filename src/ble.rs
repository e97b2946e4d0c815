// GestureLink — Wireless Link Front-End
//
// The publish task only ever talks to the `WirelessLink` trait; the GATT
// identity the node will expose (local name, motion service, prediction and
// confidence characteristics) lives here so the transport bring-up swaps
// only the backing implementation. Until the radio lands, `BleRadio` is a
// logging front-end that never reports a connected central — the same
// stub-first approach the classifier uses in `ei.rs`.

use anyhow::Result;

// GATT identity advertised by the node.
pub const DEVICE_NAME: &str = "5ClassForwarder";
pub const SERVICE_UUID: &str = "19B10010-E8F2-537E-4F6C-D104768A1214";
pub const PREDICTION_CHAR_UUID: &str = "19B10011-E8F2-537E-4F6C-D104768A1214";
pub const CONFIDENCE_CHAR_UUID: &str = "19B10012-E8F2-537E-4F6C-D104768A1214";

/// Wireless peripheral capability as seen by the publish task.
///
/// Connection state transitions are observed, not driven: `connected()`
/// reflects whatever the stack reports when polled. `publish` is
/// best-effort — a failed notify is logged, never propagated.
pub trait WirelessLink {
    /// (Re-)start advertising. Called at boot and after a disconnect.
    fn advertise(&mut self);

    /// Give the stack a chance to process pending radio events.
    fn poll(&mut self);

    fn connected(&self) -> bool;

    /// Push the latest prediction to the subscribed central.
    fn publish(&mut self, label: &str, confidence: f32);
}

pub struct BleRadio {
    advertising: bool,
}

impl BleRadio {
    pub fn init() -> Result<Self> {
        log::info!("BLE front-end up — identity '{}', service {}", DEVICE_NAME, SERVICE_UUID);
        Ok(Self { advertising: false })
    }
}

impl WirelessLink for BleRadio {
    fn advertise(&mut self) {
        if !self.advertising {
            log::info!("Advertising as '{}'", DEVICE_NAME);
            self.advertising = true;
        }
    }

    fn poll(&mut self) {
        // Event pump of the transport; nothing pending in the front-end.
    }

    fn connected(&self) -> bool {
        false
    }

    fn publish(&mut self, label: &str, confidence: f32) {
        log::info!("Publish: {} ({:.3})", label, confidence);
    }
}
