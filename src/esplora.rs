//! Chain data gateway
//!
//! Thin client for the three Esplora endpoints the app consumes:
//! broadcasting a signed transaction and reading per-address UTXOs and
//! history. No retries and no timeouts here; callers own pacing.

use reqwest::StatusCode;

use crate::config::Config;
use crate::error::ChainError;
use crate::types::{Transaction, Utxo};

pub struct EsploraClient {
    client: reqwest::Client,
    base_url: String,
}

impl EsploraClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.esplora_url.clone())
    }

    /// Broadcast a signed raw transaction (hex) to the network.
    ///
    /// Esplora answers 200 with the txid as the body. Any other status
    /// means the transaction was rejected and no txid exists; the
    /// status and response body are carried in the error.
    pub async fn broadcast_transaction(&self, tx_hex: &str) -> Result<String, ChainError> {
        let url = format!("{}/tx", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "text/plain")
            .body(tx_hex.to_string())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            log::warn!("Broadcast rejected with {}: {}", status, body);
            return Err(ChainError::Broadcast { status, body });
        }

        log::info!("Broadcast accepted, txid: {}", body);
        Ok(body)
    }

    /// Unspent outputs for `address`. An address with no coins yields an
    /// empty list.
    pub async fn get_address_utxos(&self, address: &str) -> Result<Vec<Utxo>, ChainError> {
        let url = format!("{}/address/{}/utxo", self.base_url, address);
        let utxos = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(utxos)
    }

    /// Transaction history touching `address`, in the order the indexer
    /// returns it.
    pub async fn get_address_transactions(
        &self,
        address: &str,
    ) -> Result<Vec<Transaction>, ChainError> {
        let url = format!("{}/address/{}/txs", self.base_url, address);
        let txs = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(txs)
    }
}
