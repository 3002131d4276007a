//! Derived public keys and fingerprints checked against k256 directly.

use btc_hd_bip::bip32::ExtendedPrivateKey;
use btc_hd_bip::bip39::mnemonic_to_seed;
use btc_hd_bip::path::DerivationPath;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::SecretKey;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

const MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon \
                        abandon abandon abandon abandon abandon about";

fn reference_point(key: &[u8; 32], compressed: bool) -> Vec<u8> {
    let secret = SecretKey::from_slice(key).unwrap();
    secret
        .public_key()
        .to_encoded_point(compressed)
        .as_bytes()
        .to_vec()
}

#[test]
fn test_points_match_k256() {
    let seed = mnemonic_to_seed(MNEMONIC, "");
    let master = ExtendedPrivateKey::from_seed(seed.as_ref()).unwrap();

    for text in ["m", "m/0", "m/44'/0'/0'", "m/84'/0'/0'/0/0", "m/1/2/3/4/5", "m/2147483647'/7"] {
        let path: DerivationPath = text.parse().unwrap();
        let node = master.derive_path(&path).unwrap();

        assert_eq!(
            node.public_key().compressed().to_vec(),
            reference_point(node.private_key(), true),
            "{text}"
        );
        assert_eq!(
            node.public_key().uncompressed().to_vec(),
            reference_point(node.private_key(), false),
            "{text}"
        );
    }
}

#[test]
fn test_child_records_parent_fingerprint() {
    let seed = mnemonic_to_seed(MNEMONIC, "TREZOR");
    let parent = ExtendedPrivateKey::from_seed(seed.as_ref())
        .unwrap()
        .derive_path(&"m/49'/0'/0'".parse().unwrap())
        .unwrap();

    let id = Ripemd160::digest(Sha256::digest(reference_point(parent.private_key(), true)));
    let child = parent.derive_child(5).unwrap();
    assert_eq!(&child.parent_fingerprint()[..], &id[..4]);
    assert_eq!(parent.fingerprint(), child.parent_fingerprint());
}

#[test]
fn test_public_derivation_matches_k256() {
    let seed = mnemonic_to_seed(MNEMONIC, "");
    let account = ExtendedPrivateKey::from_seed(seed.as_ref())
        .unwrap()
        .derive_path(&"m/84'/0'/0'".parse().unwrap())
        .unwrap();
    let xpub = account.to_extended_public();

    for index in [0u32, 1, 19, 1000] {
        let public_child = xpub.derive_child(index).unwrap();
        let private_child = account.derive_child(index).unwrap();
        assert_eq!(
            public_child.public_key().compressed().to_vec(),
            reference_point(private_child.private_key(), true),
            "index {index}"
        );
    }
}
