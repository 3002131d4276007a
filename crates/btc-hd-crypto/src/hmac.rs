//! HMAC-SHA512 (RFC 2104).
//!
//! Keyed hash behind BIP32 master/child derivation and PBKDF2.

#![forbid(unsafe_code)]

use hmac::{Hmac, Mac};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Compute HMAC-SHA512.
pub fn hmac_sha512(key: &[u8], data: &[u8]) -> [u8; 64] {
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    finish(mac)
}

/// Compute HMAC-SHA512 over several data segments without concatenating them.
pub fn hmac_sha512_parts(key: &[u8], parts: &[&[u8]]) -> [u8; 64] {
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC accepts keys of any length");
    for part in parts {
        mac.update(part);
    }
    finish(mac)
}

fn finish(mac: HmacSha512) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}
