//! Scalar arithmetic modulo curve order n.
//!
//! n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
//! Used for private key operations. BIP32 derivation needs add mod n.

#![forbid(unsafe_code)]

use std::fmt;

use k256::elliptic_curve::ff::PrimeField;
use k256::{FieldBytes, Scalar as K256Scalar};

/// The secp256k1 curve order n, big-endian.
pub const CURVE_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Scalar element in Z/nZ where n is the secp256k1 curve order.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Scalar(K256Scalar);

impl Scalar {
    /// Zero scalar.
    pub const ZERO: Self = Self(K256Scalar::ZERO);

    /// One scalar.
    pub const ONE: Self = Self(K256Scalar::ONE);

    /// Create scalar from bytes (big-endian).
    /// Returns None if value >= n.
    pub fn from_bytes(bytes: &[u8; 32]) -> Option<Self> {
        Option::<K256Scalar>::from(K256Scalar::from_repr(FieldBytes::from(*bytes))).map(Self)
    }

    /// Create a private-key scalar from bytes (big-endian).
    /// Returns None unless 1 <= value < n.
    pub fn from_secret_bytes(bytes: &[u8; 32]) -> Option<Self> {
        Self::from_bytes(bytes).filter(|s| !s.is_zero())
    }

    /// Serialize to 32 bytes (big-endian).
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_repr().into()
    }

    pub fn is_zero(&self) -> bool {
        bool::from(self.0.is_zero())
    }

    /// (self + other) mod n.
    pub fn add(&self, other: &Self) -> Self {
        Self(self.0 + other.0)
    }

    pub(crate) fn inner(&self) -> &K256Scalar {
        &self.0
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Scalar(<redacted>)")
    }
}
