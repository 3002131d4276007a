//! PBKDF2-HMAC-SHA512 (RFC 8018).
//! This is the dominant cost in BIP39 seed derivation (2048 iterations).

#![forbid(unsafe_code)]

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;

/// Derive key using PBKDF2-HMAC-SHA512, filling `output` completely.
///
/// Panics if `iterations` is zero.
pub fn derive(password: &[u8], salt: &[u8], iterations: u32, output: &mut [u8]) {
    assert!(iterations >= 1, "PBKDF2 iterations must be >= 1");
    pbkdf2_hmac::<Sha512>(password, salt, iterations, output);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    #[test]
    fn test_bip39_no_passphrase() {
        // BIP39 test vector: mnemonic "abandon" x 11 + "about", no passphrase
        let mnemonic = "abandon abandon abandon abandon abandon abandon \
                        abandon abandon abandon abandon abandon about";
        let salt = "mnemonic"; // BIP39 uses "mnemonic" + passphrase as salt

        let mut seed = [0u8; 64];
        derive(mnemonic.as_bytes(), salt.as_bytes(), 2048, &mut seed);

        assert_eq!(
            to_hex(&seed),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
             9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn test_bip39_with_passphrase() {
        // BIP39 test vector: same mnemonic, passphrase "TREZOR"
        let mnemonic = "abandon abandon abandon abandon abandon abandon \
                        abandon abandon abandon abandon abandon about";
        let salt = "mnemonicTREZOR"; // "mnemonic" + passphrase

        let mut seed = [0u8; 64];
        derive(mnemonic.as_bytes(), salt.as_bytes(), 2048, &mut seed);

        assert_eq!(
            to_hex(&seed),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e5349553\
             1f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }

    #[test]
    fn test_short_output() {
        // Test with output shorter than one HMAC block
        let mut output = [0u8; 32];
        derive(b"password", b"salt", 1, &mut output);

        // Verify against reference
        let mut full = [0u8; 64];
        derive(b"password", b"salt", 1, &mut full);
        assert_eq!(&output[..], &full[..32]);
    }

    #[test]
    fn test_multi_block() {
        // Test output requiring multiple blocks (> 64 bytes)
        let mut output = [0u8; 100];
        derive(b"password", b"salt", 1, &mut output);

        // First 64 bytes should match single-block derivation
        let mut block1 = [0u8; 64];
        derive(b"password", b"salt", 1, &mut block1);
        assert_eq!(&output[..64], &block1[..]);
    }

    #[test]
    fn test_rfc6070_style_sha512() {
        // PBKDF2-HMAC-SHA512("password", "salt", c = 1, dkLen = 64)
        let mut output = [0u8; 64];
        derive(b"password", b"salt", 1, &mut output);
        assert_eq!(
            to_hex(&output),
            "867f70cf1ade02cff3752599a3a53dc4af34c7a669815ae5d513554e1c8cf252\
             c02d470a285a0501bad999bfe943c08f050235d7d68b1da55e63f73b60a57fce"
        );
    }
}
