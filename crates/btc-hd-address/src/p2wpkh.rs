//! Native witness pubkey hash addresses (BIP84).
//!
//! Bech32(hrp, witness version 0, hash160(compressed pubkey))

#![forbid(unsafe_code)]

use btc_hd_core::{Network, Result};
use btc_hd_crypto::bech32;
use btc_hd_crypto::hash::hash160;

/// Witness version of P2WPKH outputs.
pub const WITNESS_VERSION: u8 = 0;

/// Encode a 20-byte witness pubkey hash.
pub fn encode_p2wpkh_hash(hash: &[u8; 20], network: Network) -> Result<String> {
    bech32::encode(network.bech32_hrp(), WITNESS_VERSION, hash)
}

/// Encode a compressed public key as a P2WPKH address.
pub fn encode_p2wpkh(compressed_pubkey: &[u8; 33], network: Network) -> Result<String> {
    encode_p2wpkh_hash(&hash160(compressed_pubkey), network)
}
