//! Shared data types
//!
//! Wire shapes match what the two external services actually emit: the
//! native backend's device records and the Esplora JSON for UTXOs and
//! transactions. Esplora omits block fields on unconfirmed entries, so
//! those are optional.

use serde::{Deserialize, Serialize};

/// A hardware wallet device visible on the host, as reported by a scan.
///
/// `port` identifies the device for the lifetime of one scan result set.
/// Manufacturer and product strings come from USB metadata and may be
/// missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub port: String,
    pub vid: u16,
    pub pid: u16,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
}

/// Snapshot of the wallet session held by the wallet store.
///
/// Starts all-false/empty; `Default` is the pristine state that
/// `disconnect` returns to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletState {
    pub is_connected: bool,
    pub is_initialized: bool,
    pub addresses: Vec<String>,
    pub current_address: String,
}

/// Confirmation status attached to UTXOs and transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxStatus {
    pub confirmed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_time: Option<u64>,
}

/// Unspent output from /address/{address}/utxo. `value` is in satoshis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    pub txid: String,
    pub vout: u32,
    pub status: TxStatus,
    pub value: u64,
}

/// Transaction summary from /address/{address}/txs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub txid: String,
    pub vin: Vec<TxInput>,
    pub vout: Vec<TxOutput>,
    pub status: TxStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    /// Output being spent. Absent for coinbase inputs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prevout: Option<TxOutput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    /// Absent for non-standard scripts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scriptpubkey_address: Option<String>,
    pub value: u64,
}
