//! Wallet import format.
//!
//! Layout: version (1 byte) || key (32 bytes) || [0x01 if compressed] || checksum (4 bytes)
//! Encoded: Base58(...)

#![forbid(unsafe_code)]

use std::fmt;

use btc_hd_core::{Error, Network, Result};
use btc_hd_crypto::base58;
use btc_hd_crypto::secp256k1::Scalar;
use zeroize::{Zeroize, Zeroizing};

/// Suffix marking a key whose public key is used compressed.
pub const COMPRESSED_FLAG: u8 = 0x01;

/// Decoded WIF. The key is zeroed on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Wif {
    pub key: [u8; 32],
    pub network: Network,
    pub compressed: bool,
}

impl Drop for Wif {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl fmt::Debug for Wif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wif")
            .field("key", &"<redacted>")
            .field("network", &self.network)
            .field("compressed", &self.compressed)
            .finish()
    }
}

/// Encode a private key for `network`, with or without the compression flag.
pub fn encode_wif(key: &[u8; 32], network: Network, compressed: bool) -> String {
    let mut payload = Zeroizing::new(Vec::with_capacity(33));
    payload.extend_from_slice(key);
    if compressed {
        payload.push(COMPRESSED_FLAG);
    }
    base58::encode_check(network.wif_version(), &payload)
}

/// Mainnet, compressed WIF.
pub fn private_key_to_wif(key: &[u8; 32]) -> String {
    encode_wif(key, Network::Mainnet, true)
}

/// Decode a WIF string, checking checksum, version and key range.
pub fn decode_wif(s: &str) -> Result<Wif> {
    let (version, payload) = base58::decode_check(s)?;
    let payload = Zeroizing::new(payload);
    let network =
        Network::from_wif_version(version).ok_or(Error::UnsupportedVersion(version as u32))?;

    let compressed = match payload.len() {
        32 => false,
        33 if payload[32] == COMPRESSED_FLAG => true,
        33 => {
            return Err(Error::InvalidKey(format!(
                "compression flag {:#04x}",
                payload[32]
            )))
        }
        n => return Err(Error::InvalidLength(format!("WIF payload of {n} bytes"))),
    };

    let mut key = [0u8; 32];
    key.copy_from_slice(&payload[..32]);
    if Scalar::from_secret_bytes(&key).is_none() {
        key.zeroize();
        return Err(Error::InvalidKey("private key is zero or not below the curve order".into()));
    }

    Ok(Wif {
        key,
        network,
        compressed,
    })
}

/// Decode a WIF string to its 32 key bytes, dropping the compression flag.
pub fn wif_to_private_key(s: &str) -> Result<[u8; 32]> {
    decode_wif(s).map(|wif| wif.key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(hex_str: &str) -> [u8; 32] {
        hex::decode(hex_str).unwrap().try_into().unwrap()
    }

    fn key_one() -> [u8; 32] {
        let mut k = [0u8; 32];
        k[31] = 1;
        k
    }

    #[test]
    fn test_compressed_vectors() {
        let cases = [
            (
                "353acdd20da43ec797e9d9ce5ec2d2d4f361855d51a76504611521648c5d74b3",
                "Ky1BY5QkB6xb3iQQjJQmVcvqc6mkLBaZTW1xCWpf91aFGBh1kyQ7",
            ),
            (
                "7da2fdb47a93e15c8ff65315e4b9786a49b3fe69bd38a2cea3e82fae0ae5cc5f",
                "L1Rw26ZuhBqguYDSi77zAxyfHUZ2H1JAQunf3TEbxyfcBDjUvBse",
            ),
            (
                "0000000000000000000000000000000000000000000000000000000000000001",
                "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn",
            ),
        ];

        for (key_hex, wif) in cases {
            let k = key(key_hex);
            assert_eq!(private_key_to_wif(&k), wif);
            assert_eq!(wif_to_private_key(wif).unwrap(), k);

            let decoded = decode_wif(wif).unwrap();
            assert!(decoded.compressed);
            assert_eq!(decoded.network, Network::Mainnet);
        }
    }

    #[test]
    fn test_uncompressed_vectors() {
        let k = key("0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d");
        let wif = encode_wif(&k, Network::Mainnet, false);
        assert_eq!(wif, "5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ");

        let decoded = decode_wif(&wif).unwrap();
        assert!(!decoded.compressed);
        assert_eq!(decoded.key, k);

        assert_eq!(
            encode_wif(&key_one(), Network::Mainnet, false),
            "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf"
        );
    }

    #[test]
    fn test_testnet() {
        let compressed = encode_wif(&key_one(), Network::Testnet, true);
        assert_eq!(compressed, "cMahea7zqjxrtgAbB7LSGbcQUr1uX1ojuat9jZodMN87JcbXMTcA");
        let uncompressed = encode_wif(&key_one(), Network::Testnet, false);
        assert_eq!(uncompressed, "91avARGdfge8E4tZfYLoxeJ5sGBdNJQH4kvjJoQFacbgwmaKkrx");

        let decoded = decode_wif(&compressed).unwrap();
        assert_eq!(decoded.network, Network::Testnet);
        assert!(decoded.compressed);
        assert_eq!(decoded.key, key_one());
    }

    #[test]
    fn test_against_bs58_crate() {
        let k = key("353acdd20da43ec797e9d9ce5ec2d2d4f361855d51a76504611521648c5d74b3");
        let mut raw = vec![0x80];
        raw.extend_from_slice(&k);
        raw.push(0x01);
        let reference = bs58::encode(&raw).with_check().into_string();
        assert_eq!(private_key_to_wif(&k), reference);
    }

    #[test]
    fn test_rejects_bad_checksum() {
        let wif = "Ky1BY5QkB6xb3iQQjJQmVcvqc6mkLBaZTW1xCWpf91aFGBh1kyQ8";
        assert_eq!(decode_wif(wif), Err(Error::ChecksumMismatch));
    }

    #[test]
    fn test_rejects_unknown_version() {
        // Valid checksum over a P2PKH version byte
        let s = base58::encode_check(0x00, &key_one());
        assert_eq!(decode_wif(&s), Err(Error::UnsupportedVersion(0x00)));
    }

    #[test]
    fn test_rejects_bad_payloads() {
        let mut flagged = key_one().to_vec();
        flagged.push(0x02);
        assert!(matches!(
            decode_wif(&base58::encode_check(0x80, &flagged)),
            Err(Error::InvalidKey(_))
        ));

        assert!(matches!(
            decode_wif(&base58::encode_check(0x80, &[1u8; 31])),
            Err(Error::InvalidLength(_))
        ));

        assert!(matches!(
            decode_wif(&base58::encode_check(0x80, &[0u8; 32])),
            Err(Error::InvalidKey(_))
        ));
    }

    #[test]
    fn test_debug_is_redacted() {
        let wif = decode_wif("KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn").unwrap();
        assert!(format!("{wif:?}").contains("<redacted>"));
    }
}
