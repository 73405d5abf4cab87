//! Reactive stores the UI binds to.

pub mod devices;
pub mod wallet;

pub use devices::DeviceDirectory;
pub use wallet::{WalletStore, DEFAULT_ADDRESS_COUNT};
