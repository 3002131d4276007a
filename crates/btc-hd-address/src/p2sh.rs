//! P2SH-wrapped witness pubkey hash addresses (BIP49).
//!
//! Redeem script: OP_0 PUSH20 hash160(compressed pubkey)
//! Address: Base58Check(p2sh version, hash160(redeem script))

#![forbid(unsafe_code)]

use btc_hd_core::Network;
use btc_hd_crypto::base58;
use btc_hd_crypto::hash::hash160;

/// Length of a version-0 witness pubkey hash script.
pub const REDEEM_SCRIPT_LEN: usize = 22;

/// `0x00 0x14 || hash160(compressed pubkey)`.
pub fn p2wpkh_redeem_script(compressed_pubkey: &[u8; 33]) -> [u8; REDEEM_SCRIPT_LEN] {
    let mut script = [0u8; REDEEM_SCRIPT_LEN];
    script[0] = 0x00;
    script[1] = 0x14;
    script[2..].copy_from_slice(&hash160(compressed_pubkey));
    script
}

/// Encode a 20-byte script hash.
pub fn encode_p2sh_hash(hash: &[u8; 20], network: Network) -> String {
    base58::encode_check(network.p2sh_version(), hash)
}

/// Encode a compressed public key as a P2SH-P2WPKH address.
pub fn encode_p2sh_p2wpkh(compressed_pubkey: &[u8; 33], network: Network) -> String {
    let script = p2wpkh_redeem_script(compressed_pubkey);
    encode_p2sh_hash(&hash160(&script), network)
}
