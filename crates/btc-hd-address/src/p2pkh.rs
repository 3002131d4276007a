//! Pay-to-pubkey-hash (legacy) addresses.
//!
//! Layout: version (1 byte) || hash160(pubkey) (20 bytes) || checksum (4 bytes)
//! Encoded: Base58(...)

#![forbid(unsafe_code)]

use btc_hd_core::Network;
use btc_hd_crypto::base58;
use btc_hd_crypto::hash::hash160;

/// P2PKH address length in bytes before Base58 encoding.
/// 1 (version) + 20 (hash) + 4 (checksum) = 25 bytes
pub const P2PKH_ADDRESS_BYTES: usize = 25;

/// Encode a 20-byte public key hash.
pub fn encode_p2pkh_hash(hash: &[u8; 20], network: Network) -> String {
    base58::encode_check(network.p2pkh_version(), hash)
}

/// Encode a SEC1 public key (33 or 65 bytes) as a P2PKH address.
///
/// The address commits to the exact encoding given.
pub fn encode_p2pkh(pubkey: &[u8], network: Network) -> String {
    encode_p2pkh_hash(&hash160(pubkey), network)
}

#[cfg(test)]
mod tests {
    use super::*;
    use btc_hd_crypto::secp256k1::{PublicKey, Scalar};

    fn pubkey_of(hex_key: &str) -> PublicKey {
        let bytes: [u8; 32] = hex::decode(hex_key).unwrap().try_into().unwrap();
        PublicKey::from_private_key(&Scalar::from_secret_bytes(&bytes).unwrap()).unwrap()
    }

    #[test]
    fn test_key_one() {
        let pk = pubkey_of("0000000000000000000000000000000000000000000000000000000000000001");
        assert_eq!(
            encode_p2pkh(&pk.uncompressed(), Network::Mainnet),
            "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm"
        );
        assert_eq!(
            encode_p2pkh(&pk.compressed(), Network::Mainnet),
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
        );
        assert_eq!(
            encode_p2pkh(&pk.uncompressed(), Network::Testnet),
            "mtoKs9V381UAhUia3d7Vb9GNak8Qvmcsme"
        );
        assert_eq!(
            encode_p2pkh(&pk.compressed(), Network::Testnet),
            "mrCDrCybB6J1vRfbwM5hemdJz73FwDBC8r"
        );
    }

    #[test]
    fn test_structure() {
        let pk = pubkey_of("03902e4f09664bc177fe4e090dcd9906b432b50f15fb6151984475c1c75c35b6");
        let addr = encode_p2pkh(&pk.compressed(), Network::Mainnet);
        let raw = bs58::decode(&addr).into_vec().unwrap();
        assert_eq!(raw.len(), P2PKH_ADDRESS_BYTES);
        assert_eq!(raw[0], 0x00);
        assert_eq!(&raw[1..21], &hash160(&pk.compressed()));
    }
}
