//! Satoshi/BTC conversion helpers for display formatting.

const SATS_PER_BTC: f64 = 100_000_000.0;

pub fn sats_to_btc(sats: u64) -> f64 {
    sats as f64 / SATS_PER_BTC
}

/// Rounds to the nearest satoshi, so display-rounded BTC amounts map
/// back without drift.
pub fn btc_to_sats(btc: f64) -> u64 {
    (btc * SATS_PER_BTC).round() as u64
}
