//! Hash chains used across the key and address formats.
//!
//! - SHA-256 for the BIP39 checksum
//! - double SHA-256 for Base58Check checksums
//! - hash160 = RIPEMD-160(SHA-256(x)) for fingerprints and addresses

#![forbid(unsafe_code)]

use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};

/// Base58Check checksum length in bytes.
pub const CHECKSUM_LEN: usize = 4;

/// Compute SHA-256 digest of input data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Compute SHA-256(SHA-256(data)).
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(data)).into()
}

/// Compute SHA-512 digest of input data.
pub fn sha512(data: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(&Sha512::digest(data));
    out
}

/// Compute RIPEMD-160(SHA-256(data)).
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(Sha256::digest(data)).into()
}

/// First four bytes of SHA-256d, as appended by Base58Check.
pub fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let hash = sha256d(data);
    [hash[0], hash[1], hash[2], hash[3]]
}
