//! Error types for the wallet store subsystem
//!
//! Gateways surface their own failure class and never swallow errors;
//! the stores wrap both classes into [`WalletError`] for the
//! presentation layer, after applying their documented state rollback.

use thiserror::Error;

/// Failure from the native device backend or the command channel itself.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend rejected or failed the command (device unplugged,
    /// timeout, permission denied, command sent out of order).
    #[error("Device backend error: {0}")]
    Failure(String),

    /// The backend answered, but the payload did not decode into the
    /// expected shape for the command.
    #[error("Malformed backend response for {command}: {reason}")]
    MalformedResponse { command: String, reason: String },
}

/// Failure talking to the chain indexing service.
#[derive(Error, Debug)]
pub enum ChainError {
    /// Transport failure, non-success status, or undecodable body.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The indexer refused a broadcast. No txid exists in this case.
    #[error("Broadcast rejected ({status}): {body}")]
    Broadcast {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Store-level error handed to the presentation layer.
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),
}
