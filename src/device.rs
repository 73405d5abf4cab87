//! Remote device gateway
//!
//! The native backend owns the serial link to the hardware wallet and
//! exposes it as named commands over the desktop command channel.
//! [`DeviceBridge`] is that channel reduced to one call; [`DeviceClient`]
//! layers the typed operations on top so the stores never touch raw
//! JSON. Production wires the bridge to the host shell; tests script it.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::BackendError;
use crate::types::Device;

/// Command channel into the native device backend.
///
/// Implementations pass `args` through verbatim and return the backend's
/// JSON payload, or [`BackendError::Failure`] with the backend's message
/// when the command is rejected. The gateway does not retry and does not
/// reorder; calls resolve in whatever order the backend answers.
#[async_trait]
pub trait DeviceBridge: Send + Sync {
    async fn invoke(&self, command: &str, args: Value) -> Result<Value, BackendError>;
}

/// Typed façade over a [`DeviceBridge`].
#[derive(Clone)]
pub struct DeviceClient {
    bridge: Arc<dyn DeviceBridge>,
}

impl DeviceClient {
    pub fn new(bridge: Arc<dyn DeviceBridge>) -> Self {
        Self { bridge }
    }

    /// Enumerate candidate devices on the host. An empty list is a
    /// successful scan, not an error.
    pub async fn scan_devices(&self) -> Result<Vec<Device>, BackendError> {
        self.call("scan_devices", json!({})).await
    }

    /// Open a session with the device at `port`.
    pub async fn connect(&self, port: &str) -> Result<bool, BackendError> {
        self.call("connect", json!({ "port": port })).await
    }

    /// Close the current session. Safe to call without one.
    pub async fn disconnect(&self) -> Result<bool, BackendError> {
        self.call("disconnect", json!({})).await
    }

    /// Generate a seed on the device. The backend returns a sequence
    /// whose single element is the space-delimited recovery phrase;
    /// splitting it into words is the caller's job.
    pub async fn initialize_wallet(&self) -> Result<Vec<String>, BackendError> {
        self.call("initialize_wallet", json!({})).await
    }

    /// Wipe the seed from the connected device. The acknowledgement
    /// payload carries nothing and is discarded.
    pub async fn reset_wallet(&self) -> Result<(), BackendError> {
        self.bridge.invoke("reset_wallet", json!({})).await?;
        Ok(())
    }

    /// Ask the device whether it holds an initialized seed.
    pub async fn get_wallet_status(&self) -> Result<bool, BackendError> {
        self.call("get_wallet_status", json!({})).await
    }

    /// Derive the receive address at `index` on the device.
    pub async fn get_address(&self, index: u32) -> Result<String, BackendError> {
        self.call("get_address", json!({ "index": index })).await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        command: &str,
        args: Value,
    ) -> Result<T, BackendError> {
        let value = self.bridge.invoke(command, args).await?;
        serde_json::from_value(value).map_err(|e| BackendError::MalformedResponse {
            command: command.to_string(),
            reason: e.to_string(),
        })
    }
}
