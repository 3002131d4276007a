//! Public key generation: P = k*G.
//!
//! Compressed format: [prefix][x-coordinate]
//! - prefix: 0x02 if y is even, 0x03 if y is odd
//! - x-coordinate: 32 bytes big-endian
//!
//! Uncompressed format: 0x04 || x || y (65 bytes).

#![forbid(unsafe_code)]

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{AffinePoint, ProjectivePoint, PublicKey as K256PublicKey};

use super::scalar::Scalar;

/// A point on secp256k1 other than the identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey {
    point: AffinePoint,
}

impl PublicKey {
    /// Generate public key from private key (scalar).
    /// Returns None if private key is zero.
    pub fn from_private_key(private_key: &Scalar) -> Option<Self> {
        if private_key.is_zero() {
            return None;
        }
        let point = (ProjectivePoint::GENERATOR * *private_key.inner()).to_affine();
        Some(Self { point })
    }

    /// Parse a SEC1 encoded point (33-byte compressed or 65-byte uncompressed).
    /// Returns None if the bytes do not describe a point on the curve.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Option<Self> {
        K256PublicKey::from_sec1_bytes(bytes)
            .ok()
            .map(|pk| Self { point: *pk.as_affine() })
    }

    /// Compute self + tweak*G.
    /// Returns None if the sum is the point at infinity.
    pub fn add_tweak(&self, tweak: &Scalar) -> Option<Self> {
        let sum = ProjectivePoint::GENERATOR * *tweak.inner() + ProjectivePoint::from(self.point);
        K256PublicKey::from_affine(sum.to_affine())
            .ok()
            .map(|pk| Self { point: *pk.as_affine() })
    }

    /// 33-byte compressed SEC1 encoding.
    pub fn compressed(&self) -> [u8; 33] {
        let encoded = self.point.to_encoded_point(true);
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(encoded.as_bytes());
        bytes
    }

    /// 65-byte uncompressed SEC1 encoding.
    pub fn uncompressed(&self) -> [u8; 65] {
        let encoded = self.point.to_encoded_point(false);
        let mut bytes = [0u8; 65];
        bytes.copy_from_slice(encoded.as_bytes());
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_from_hex(s: &str) -> Scalar {
        let bytes = hex::decode(s).unwrap();
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Scalar::from_bytes(&arr).unwrap()
    }

    #[test]
    fn test_pubkey_from_one() {
        // Private key = 1 -> Public key = G
        let pubkey = PublicKey::from_private_key(&Scalar::ONE).unwrap();

        // G's y is even, so prefix should be 0x02
        assert_eq!(
            hex::encode(pubkey.compressed()),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        assert_eq!(
            hex::encode(pubkey.uncompressed()),
            "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
             483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
        );
    }

    #[test]
    fn test_zero_private_key() {
        assert!(PublicKey::from_private_key(&Scalar::ZERO).is_none());
    }

    #[test]
    fn test_known_vectors() {
        // BIP32 test vector 1 master key
        let k = scalar_from_hex("e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35");
        let pubkey = PublicKey::from_private_key(&k).unwrap();
        assert_eq!(
            hex::encode(pubkey.compressed()),
            "0339a36013301597daef41fbe593a02cc513d0b55527ec2df1050e2e8ff49c85c2"
        );

        let k = scalar_from_hex("03902e4f09664bc177fe4e090dcd9906b432b50f15fb6151984475c1c75c35b6");
        let pubkey = PublicKey::from_private_key(&k).unwrap();
        assert_eq!(
            hex::encode(pubkey.compressed()),
            "02c5389a31ce6149c28ba20d14db8540b2319e5a65000a2919fbf7a6296e7840b5"
        );
    }

    #[test]
    fn test_sec1_roundtrip() {
        let k = scalar_from_hex("deadbeefcafebabedeadbeefcafebabedeadbeefcafebabedeadbeefcafebabe");
        let pubkey = PublicKey::from_private_key(&k).unwrap();

        assert_eq!(PublicKey::from_sec1_bytes(&pubkey.compressed()), Some(pubkey));
        assert_eq!(PublicKey::from_sec1_bytes(&pubkey.uncompressed()), Some(pubkey));
    }

    #[test]
    fn test_sec1_rejects_garbage() {
        let mut bad = [0u8; 33];
        bad[0] = 0x05;
        assert!(PublicKey::from_sec1_bytes(&bad).is_none());
        assert!(PublicKey::from_sec1_bytes(&[0x02; 10]).is_none());
    }

    #[test]
    fn test_add_tweak_matches_scalar_addition() {
        let a = scalar_from_hex("1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef");
        let b = scalar_from_hex("0000000000000000000000000000000000000000000000000000000000000003");

        let pa = PublicKey::from_private_key(&a).unwrap();
        let expected = PublicKey::from_private_key(&a.add(&b)).unwrap();
        assert_eq!(pa.add_tweak(&b), Some(expected));
    }

    #[test]
    fn test_add_tweak_to_infinity() {
        // G + (n-1)G = nG = infinity
        let n_minus_1 =
            scalar_from_hex("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140");
        let g = PublicKey::from_private_key(&Scalar::ONE).unwrap();
        assert!(g.add_tweak(&n_minus_1).is_none());
    }
}
