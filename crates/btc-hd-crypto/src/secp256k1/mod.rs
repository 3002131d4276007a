//! secp256k1 capability: scalars modulo the group order and public points.
//!
//! Point arithmetic is delegated to `k256`; this module only fixes the
//! encodings BIP32 and the address formats rely on.

#![forbid(unsafe_code)]

pub mod pubkey;
pub mod scalar;

pub use pubkey::PublicKey;
pub use scalar::Scalar;
