//! Client-side state layer for a hardware-wallet desktop app
//!
//! This crate sits between the UI and two external services: the native
//! backend that drives the hardware wallet over its command channel, and
//! an Esplora-compatible chain indexer. It owns all session state the UI
//! renders and keeps it consistent across device operations.
//!
//! # Architecture
//!
//! - **Device gateway**: typed async operations over the [`DeviceBridge`]
//!   command channel
//! - **Chain gateway**: broadcast and per-address UTXO/history reads
//!   against Esplora
//! - **Reactive stores**: [`DeviceDirectory`] and [`WalletStore`] publish
//!   snapshots to synchronous subscribers
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use hww_store::{Config, DeviceClient, EsploraClient, WalletStore};
//!
//! let device = DeviceClient::new(Arc::new(bridge));
//! let chain = EsploraClient::from_config(&Config::from_env());
//! let wallet = WalletStore::new(device, chain);
//!
//! let _sub = wallet.subscribe(|state| {
//!     println!("connected: {}", state.is_connected);
//! });
//!
//! wallet.connect("/dev/ttyACM0").await?;
//! wallet.get_addresses().await?;
//! ```

// Public modules
pub mod config;
pub mod device;
pub mod error;
pub mod esplora;
pub mod store;
pub mod stores;
pub mod types;
pub mod units;

// Re-exports for convenience
pub use config::Config;
pub use device::{DeviceBridge, DeviceClient};
pub use error::{BackendError, ChainError, WalletError};
pub use esplora::EsploraClient;
pub use store::{Store, Subscription};
pub use stores::{DeviceDirectory, WalletStore, DEFAULT_ADDRESS_COUNT};
pub use types::{Device, Transaction, TxInput, TxOutput, TxStatus, Utxo, WalletState};
pub use units::{btc_to_sats, sats_to_btc};

// Common result type
pub type Result<T> = std::result::Result<T, WalletError>;
