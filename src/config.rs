/// Configuration from environment variables
///
/// Controls the Esplora API endpoint the chain gateway talks to.
/// Defaults to the public testnet4 instance the desktop app ships with.
use std::env;

pub const DEFAULT_ESPLORA_URL: &str = "https://api.mempool.space/testnet4/api";

#[derive(Clone, Debug)]
pub struct Config {
    /// Esplora API base URL
    pub esplora_url: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// - `ESPLORA_URL`: Esplora API endpoint (optional; defaults to the
    ///   public testnet4 instance, point it at a local mock for tests)
    pub fn from_env() -> Self {
        let esplora_url =
            env::var("ESPLORA_URL").unwrap_or_else(|_| DEFAULT_ESPLORA_URL.to_string());
        log::info!("📡 Esplora URL: {}", esplora_url);

        Self { esplora_url }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            esplora_url: DEFAULT_ESPLORA_URL.to_string(),
        }
    }
}
