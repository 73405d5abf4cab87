//! Device directory store
//!
//! Holds the most recent successful scan result. A failed scan leaves
//! the previous snapshot in place and propagates the error, so the UI
//! keeps showing the last known device list.

use crate::device::DeviceClient;
use crate::error::WalletError;
use crate::store::{Store, Subscription};
use crate::types::Device;

pub struct DeviceDirectory {
    device: DeviceClient,
    store: Store<Vec<Device>>,
}

impl DeviceDirectory {
    pub fn new(device: DeviceClient) -> Self {
        Self {
            device,
            store: Store::new(Vec::new()),
        }
    }

    /// Rescan the host and replace the directory with the result.
    /// An empty result is a valid outcome and clears the directory.
    pub async fn scan(&self) -> Result<(), WalletError> {
        let devices = self.device.scan_devices().await?;
        log::info!("Device scan found {} device(s)", devices.len());
        self.store.set(devices);
        Ok(())
    }

    /// Clear the directory without touching the backend.
    pub fn reset(&self) {
        self.store.set(Vec::new());
    }

    /// Snapshot of the current device list.
    pub fn devices(&self) -> Vec<Device> {
        self.store.get()
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&Vec<Device>) + Send + Sync + 'static,
    ) -> Subscription<Vec<Device>> {
        self.store.subscribe(listener)
    }
}
