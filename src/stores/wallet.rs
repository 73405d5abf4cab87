//! Wallet state store
//!
//! Coordinates the device gateway and the chain gateway behind one
//! reactive [`WalletState`]. Every operation applies its documented
//! state change and rethrows errors untouched; nothing is swallowed
//! here, the UI layer decides how to present failures.
//!
//! The store does not pre-check session state before device commands.
//! The native backend is the authority on ordering and rejects
//! out-of-order commands itself, so a rejection surfaces as a backend
//! error with the backend's own message.

use futures::future::try_join_all;

use crate::device::DeviceClient;
use crate::error::{BackendError, WalletError};
use crate::esplora::EsploraClient;
use crate::store::{Store, Subscription};
use crate::types::{Transaction, Utxo, WalletState};

/// How many receive addresses a full derivation pass fetches.
pub const DEFAULT_ADDRESS_COUNT: u32 = 10;

pub struct WalletStore {
    device: DeviceClient,
    chain: EsploraClient,
    state: Store<WalletState>,
}

impl WalletStore {
    pub fn new(device: DeviceClient, chain: EsploraClient) -> Self {
        Self {
            device,
            chain,
            state: Store::new(WalletState::default()),
        }
    }

    /// Snapshot of the current wallet state.
    pub fn state(&self) -> WalletState {
        self.state.get()
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&WalletState) + Send + Sync + 'static,
    ) -> Subscription<WalletState> {
        self.state.subscribe(listener)
    }

    /// Open a session with the device at `port`. Sets `is_connected` on
    /// success; on failure forces it false and propagates the error.
    pub async fn connect(&self, port: &str) -> Result<(), WalletError> {
        match self.device.connect(port).await {
            Ok(_) => {
                log::info!("Connected to device on port {}", port);
                self.state.update(|s| s.is_connected = true);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to connect to {}: {}", port, e);
                self.state.update(|s| s.is_connected = false);
                Err(e.into())
            }
        }
    }

    /// Close the session and return to the pristine state. If the
    /// device call fails the state is left untouched.
    pub async fn disconnect(&self) -> Result<(), WalletError> {
        self.device.disconnect().await?;
        log::info!("Disconnected from device");
        self.state.set(WalletState::default());
        Ok(())
    }

    /// Generate a seed on the device and return the recovery phrase as
    /// words. Marks the wallet initialized on success; any failure,
    /// including an unusable phrase payload, clears the flag and
    /// propagates.
    pub async fn initialize(&self) -> Result<Vec<String>, WalletError> {
        match self.fetch_mnemonic().await {
            Ok(words) => {
                log::info!("Wallet initialized ({} words)", words.len());
                self.state.update(|s| s.is_initialized = true);
                Ok(words)
            }
            Err(e) => {
                log::error!("Wallet initialization failed: {}", e);
                self.state.update(|s| s.is_initialized = false);
                Err(e)
            }
        }
    }

    async fn fetch_mnemonic(&self) -> Result<Vec<String>, WalletError> {
        let response = self.device.initialize_wallet().await?;
        let phrase = response.first().ok_or_else(|| BackendError::MalformedResponse {
            command: "initialize_wallet".to_string(),
            reason: "empty phrase list".to_string(),
        })?;
        Ok(phrase.split_whitespace().map(str::to_string).collect())
    }

    /// Wipe the seed from the device, then clear the initialization
    /// fields. The connection itself stays up; only `is_initialized`,
    /// `addresses` and `current_address` are cleared. Safe to repeat.
    pub async fn reset(&self) -> Result<(), WalletError> {
        self.device.reset_wallet().await?;
        log::info!("Wallet reset");
        self.state.update(|s| {
            s.is_initialized = false;
            s.addresses.clear();
            s.current_address.clear();
        });
        Ok(())
    }

    /// Refresh `is_initialized` from the device's own report. On
    /// failure the flag is forced false and the error propagates.
    pub async fn get_status(&self) -> Result<(), WalletError> {
        match self.device.get_wallet_status().await {
            Ok(status) => {
                self.state.update(|s| s.is_initialized = status);
                Ok(())
            }
            Err(e) => {
                self.state.update(|s| s.is_initialized = false);
                Err(e.into())
            }
        }
    }

    /// Derive the first [`DEFAULT_ADDRESS_COUNT`] receive addresses.
    ///
    /// All lookups are issued concurrently and the stored sequence is
    /// ordered by derivation index, not by completion order. If any
    /// lookup fails the state is left untouched.
    pub async fn get_addresses(&self) -> Result<(), WalletError> {
        let lookups: Vec<_> = (0..DEFAULT_ADDRESS_COUNT)
            .map(|index| self.device.get_address(index))
            .collect();
        let addresses = try_join_all(lookups).await?;
        log::debug!("Derived {} addresses", addresses.len());
        self.state.update(|s| s.addresses = addresses);
        Ok(())
    }

    /// Confirmed balance of `address` in satoshis. Unconfirmed outputs
    /// are excluded. Does not touch the wallet state.
    pub async fn get_balance(&self, address: &str) -> Result<u64, WalletError> {
        let utxos = self.chain.get_address_utxos(address).await?;
        let balance = utxos
            .iter()
            .filter(|utxo| utxo.status.confirmed)
            .map(|utxo| utxo.value)
            .sum();
        Ok(balance)
    }

    /// Transaction history for `address`, as the indexer orders it.
    pub async fn get_transactions(&self, address: &str) -> Result<Vec<Transaction>, WalletError> {
        Ok(self.chain.get_address_transactions(address).await?)
    }

    /// Unspent outputs for `address`, confirmed or not.
    pub async fn get_utxos(&self, address: &str) -> Result<Vec<Utxo>, WalletError> {
        Ok(self.chain.get_address_utxos(address).await?)
    }

    /// Mark `address` as the one the UI is focused on. Purely local.
    pub fn set_current_address(&self, address: &str) {
        self.state.update(|s| s.current_address = address.to_string());
    }
}
