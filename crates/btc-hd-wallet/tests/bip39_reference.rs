//! Validate our mnemonic engine against the bip39 crate.
//!
//! Both implementations start from the SAME entropy independently. If they
//! produce different mnemonics or seeds, our implementation is wrong.

use bip39::{Language, Mnemonic as Bip39Mnemonic};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use btc_hd_bip::bip39::{mnemonic_to_seed, MnemonicEngine, MnemonicType};
use btc_hd_core::Network;
use btc_hd_wallet::{derive_key, generate_mnemonic};

fn reference_mnemonic(entropy: &[u8]) -> String {
    Bip39Mnemonic::from_entropy_in(Language::English, entropy)
        .unwrap()
        .to_string()
}

fn reference_seed(mnemonic: &str, passphrase: &str) -> [u8; 64] {
    Bip39Mnemonic::parse_in_normalized(Language::English, mnemonic)
        .unwrap()
        .to_seed_normalized(passphrase)
}

#[test]
fn test_mnemonic_matches_bip39_crate() {
    let engine = MnemonicEngine::english();
    let test_cases: Vec<Vec<u8>> = vec![
        vec![0u8; 32],
        vec![0xffu8; 32],
        (0..32).collect(),
        vec![0x80u8; 20],
        vec![0x7fu8; 16],
        (0..28).map(|i| i * 9).collect(),
        vec![0x5au8; 24],
    ];

    for entropy in &test_cases {
        let ours = engine.entropy_to_mnemonic(entropy).unwrap();
        let reference = reference_mnemonic(entropy);

        assert_eq!(
            ours, reference,
            "Mnemonic mismatch for entropy {:02x?}!\n  Ours:      {}\n  Reference: {}",
            &entropy[..4],
            ours,
            reference
        );
        assert_eq!(&engine.mnemonic_to_entropy(&ours).unwrap(), entropy);
    }
}

#[test]
fn test_random_entropy_matches_bip39_crate() {
    let engine = MnemonicEngine::english();
    let mut rng = ChaCha20Rng::seed_from_u64(0x5eed);

    for round in 0..50 {
        let mtype = MnemonicType::ALL[round % MnemonicType::ALL.len()];
        let mut entropy = vec![0u8; mtype.entropy_bytes()];
        rng.fill_bytes(&mut entropy);

        assert_eq!(
            engine.entropy_to_mnemonic(&entropy).unwrap(),
            reference_mnemonic(&entropy)
        );
    }
}

#[test]
fn test_seed_matches_bip39_crate() {
    let engine = MnemonicEngine::english();
    let mut rng = ChaCha20Rng::seed_from_u64(42);

    for passphrase in ["", "TREZOR", "correct horse battery staple"] {
        let mnemonic = generate_mnemonic(&mut rng, &engine, MnemonicType::Words12).unwrap();
        let ours = mnemonic_to_seed(&mnemonic, passphrase);
        let reference = reference_seed(&mnemonic, passphrase);
        assert_eq!(ours.as_bytes(), &reference, "seed mismatch for {passphrase:?}");
    }
}

#[test]
fn test_reference_rejects_what_we_reject() {
    let engine = MnemonicEngine::english();
    let bad_checksum = "abandon abandon abandon abandon abandon abandon \
                        abandon abandon abandon abandon abandon abandon";
    assert!(!engine.is_valid(bad_checksum));
    assert!(Bip39Mnemonic::parse_in_normalized(Language::English, bad_checksum).is_err());
}

#[test]
fn test_generated_mnemonic_derives_addresses() {
    let engine = MnemonicEngine::english();
    let mut rng = ChaCha20Rng::seed_from_u64(99);
    let mnemonic = generate_mnemonic(&mut rng, &engine, MnemonicType::Words24).unwrap();

    let seed = mnemonic_to_seed(&mnemonic, "");
    assert_eq!(seed.as_bytes(), &reference_seed(&mnemonic, ""));

    let path = "m/84'/0'/0'/0/0".parse().unwrap();
    let key = derive_key(seed.as_ref(), &path, Network::Mainnet).unwrap();
    assert!(key.addresses.segwit.starts_with("bc1q"));
    assert!(key.addresses.legacy.starts_with('1'));
    assert!(key.addresses.script_hash.starts_with('3'));
}
