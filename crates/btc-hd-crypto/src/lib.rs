//! Cryptographic primitives for btc-hd.
//!
//! Thin wrappers over the RustCrypto crates (sha2, hmac, pbkdf2, ripemd)
//! and k256, plus the Base58Check and Bech32 text codecs.

#![forbid(unsafe_code)]

pub mod base58;
pub mod bech32;
pub mod hash;
pub mod hmac;
pub mod pbkdf2;
pub mod secp256k1;
