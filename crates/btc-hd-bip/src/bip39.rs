//! BIP39 mnemonic implementation.
//!
//! Entropy → Mnemonic (with SHA-256 checksum)
//! Mnemonic → Entropy (checksum verified)
//! Mnemonic → Seed (PBKDF2 with NFKD normalization)

#![forbid(unsafe_code)]

use std::fmt;

use btc_hd_core::{Error, Result, Wordlist};
use btc_hd_crypto::{hash::sha256, pbkdf2};
use tracing::debug;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, Zeroizing};

/// PBKDF2 rounds used to stretch a mnemonic into a seed.
pub const PBKDF2_ROUNDS: u32 = 2048;

/// Seed length in bytes.
pub const SEED_LEN: usize = 64;

const BITS_PER_WORD: usize = 11;

/// Mnemonic word count options and their entropy sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MnemonicType {
    /// 12 words, 128-bit entropy, 4-bit checksum
    Words12,
    /// 15 words, 160-bit entropy, 5-bit checksum
    Words15,
    /// 18 words, 192-bit entropy, 6-bit checksum
    Words18,
    /// 21 words, 224-bit entropy, 7-bit checksum
    Words21,
    /// 24 words, 256-bit entropy, 8-bit checksum
    Words24,
}

impl MnemonicType {
    /// All sizes, shortest first.
    pub const ALL: [Self; 5] = [
        Self::Words12,
        Self::Words15,
        Self::Words18,
        Self::Words21,
        Self::Words24,
    ];

    /// Look up the type for an entropy length in bytes.
    pub fn for_entropy_len(len: usize) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.entropy_bytes() == len)
            .ok_or(Error::InvalidEntropyLength { got: len })
    }

    /// Look up the type for a word count.
    pub fn for_word_count(count: usize) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.word_count() == count)
            .ok_or(Error::InvalidWordCount { got: count })
    }

    /// Get entropy size in bytes.
    pub const fn entropy_bytes(&self) -> usize {
        match self {
            Self::Words12 => 16,
            Self::Words15 => 20,
            Self::Words18 => 24,
            Self::Words21 => 28,
            Self::Words24 => 32,
        }
    }

    /// Get entropy size in bits.
    pub const fn entropy_bits(&self) -> usize {
        self.entropy_bytes() * 8
    }

    /// Get checksum size in bits (ENT / 32).
    pub const fn checksum_bits(&self) -> usize {
        self.entropy_bits() / 32
    }

    /// Get word count.
    pub const fn word_count(&self) -> usize {
        match self {
            Self::Words12 => 12,
            Self::Words15 => 15,
            Self::Words18 => 18,
            Self::Words21 => 21,
            Self::Words24 => 24,
        }
    }
}

/// 64-byte BIP39 seed. Zeroed on drop.
#[derive(Clone)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    pub fn from_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Drop for Seed {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(<redacted>)")
    }
}

/// First `count` bits of the SHA-256 of `entropy`, MSB first.
fn checksum_bits(entropy: &[u8], count: usize) -> Vec<u8> {
    let hash = sha256(entropy);
    (0..count)
        .map(|i| (hash[i / 8] >> (7 - (i % 8))) & 1)
        .collect()
}

/// Mnemonic encoder/decoder bound to one vocabulary.
#[derive(Clone, Debug, Default)]
pub struct MnemonicEngine {
    wordlist: Wordlist,
}

impl MnemonicEngine {
    pub fn new(wordlist: Wordlist) -> Self {
        Self { wordlist }
    }

    /// Engine over the BIP39 English wordlist.
    pub fn english() -> Self {
        Self::new(Wordlist::english())
    }

    pub fn wordlist(&self) -> &Wordlist {
        &self.wordlist
    }

    /// Generate mnemonic from entropy bytes.
    ///
    /// The entropy length determines the mnemonic type:
    /// - 16 bytes → 12 words
    /// - 20 bytes → 15 words
    /// - 24 bytes → 18 words
    /// - 28 bytes → 21 words
    /// - 32 bytes → 24 words
    pub fn entropy_to_mnemonic(&self, entropy: &[u8]) -> Result<String> {
        let mtype = MnemonicType::for_entropy_len(entropy.len())?;

        // Build bit stream: entropy || checksum
        // Total bits = ENT + ENT/32 = word_count * 11
        let total_bits = mtype.entropy_bits() + mtype.checksum_bits();
        let mut bits = Zeroizing::new(Vec::with_capacity(total_bits));

        for &byte in entropy {
            for i in (0..8).rev() {
                bits.push((byte >> i) & 1);
            }
        }
        bits.extend(checksum_bits(entropy, mtype.checksum_bits()));

        // Convert to words (11 bits per word)
        let mut words = Vec::with_capacity(mtype.word_count());
        for chunk in bits.chunks_exact(BITS_PER_WORD) {
            let index = chunk.iter().fold(0u16, |acc, &bit| (acc << 1) | bit as u16);
            words.push(self.wordlist.word(index));
        }

        debug!(words = words.len(), "encoded entropy as mnemonic");
        Ok(words.join(" "))
    }

    /// Recover the entropy encoded by a mnemonic, verifying its checksum.
    ///
    /// Words may be separated by any whitespace.
    pub fn mnemonic_to_entropy(&self, mnemonic: &str) -> Result<Vec<u8>> {
        let words: Vec<&str> = mnemonic.split_whitespace().collect();
        let mtype = MnemonicType::for_word_count(words.len())?;

        // Convert words to bits
        let mut bits = Zeroizing::new(Vec::with_capacity(words.len() * BITS_PER_WORD));
        for word in &words {
            let normalized: String = word.nfkd().collect();
            let index = self
                .wordlist
                .index_of(&normalized)
                .or_else(|| self.wordlist.index_of(word))
                .ok_or_else(|| Error::InvalidWord((*word).to_string()))?;
            for i in (0..BITS_PER_WORD).rev() {
                bits.push(((index >> i) & 1) as u8);
            }
        }

        // Split into entropy and checksum
        let entropy_bits = mtype.entropy_bits();
        let mut entropy = vec![0u8; mtype.entropy_bytes()];
        for (i, byte) in entropy.iter_mut().enumerate() {
            *byte = bits[i * 8..i * 8 + 8]
                .iter()
                .fold(0u8, |acc, &bit| (acc << 1) | bit);
        }

        if checksum_bits(&entropy, mtype.checksum_bits()) != bits[entropy_bits..] {
            entropy.zeroize();
            return Err(Error::ChecksumMismatch);
        }

        Ok(entropy)
    }

    /// Check word count, vocabulary membership and checksum.
    pub fn validate(&self, mnemonic: &str) -> Result<()> {
        self.mnemonic_to_entropy(mnemonic).map(|mut entropy| entropy.zeroize())
    }

    pub fn is_valid(&self, mnemonic: &str) -> bool {
        self.validate(mnemonic).is_ok()
    }
}

/// Convert mnemonic to seed using PBKDF2-HMAC-SHA512.
///
/// Both mnemonic and passphrase are NFKD normalized per BIP39.
/// Salt = "mnemonic" + passphrase
/// Iterations = 2048
/// Output = 64 bytes
///
/// The mnemonic is not validated here.
pub fn mnemonic_to_seed(mnemonic: &str, passphrase: &str) -> Seed {
    let mnemonic_normalized: Zeroizing<String> = Zeroizing::new(mnemonic.nfkd().collect());
    let salt: Zeroizing<String> =
        Zeroizing::new(format!("mnemonic{}", passphrase.nfkd().collect::<String>()));

    let mut seed = [0u8; SEED_LEN];
    pbkdf2::derive(
        mnemonic_normalized.as_bytes(),
        salt.as_bytes(),
        PBKDF2_ROUNDS,
        &mut seed,
    );

    Seed(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon \
                                 abandon abandon abandon abandon abandon about";

    #[test]
    fn test_entropy_to_mnemonic_12_words() {
        // Test vector from BIP39
        let engine = MnemonicEngine::english();
        let entropy = hex::decode("00000000000000000000000000000000").unwrap();
        let mnemonic = engine.entropy_to_mnemonic(&entropy).unwrap();
        assert_eq!(
            mnemonic,
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about"
        );
    }

    #[test]
    fn test_entropy_to_mnemonic_vectors() {
        let engine = MnemonicEngine::english();
        let cases = [
            (
                "7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f",
                "legal winner thank year wave sausage worth useful legal winner thank yellow",
            ),
            (
                "ffffffffffffffffffffffffffffffff",
                "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong",
            ),
            (
                "8080808080808080808080808080808080808080",
                "letter advice cage absurd amount doctor acoustic avoid letter advice cage absurd amount doctor accident",
            ),
            (
                "f585c11aec520db57dd353c69554b21a89b20fb0650966fa0a9d6f74fd989d8f",
                "void come effort suffer camp survey warrior heavy shoot primary clutch crush \
                 open amazing screen patrol group space point ten exist slush involve unfold",
            ),
        ];

        for (entropy_hex, expected) in cases {
            let entropy = hex::decode(entropy_hex).unwrap();
            let mnemonic = engine.entropy_to_mnemonic(&entropy).unwrap();
            assert_eq!(mnemonic, expected);
            assert_eq!(engine.mnemonic_to_entropy(&mnemonic).unwrap(), entropy);
        }
    }

    #[test]
    fn test_entropy_to_mnemonic_24_words() {
        // All zeros → 24 words
        let engine = MnemonicEngine::english();
        let entropy = [0u8; 32];
        let mnemonic = engine.entropy_to_mnemonic(&entropy).unwrap();
        let words: Vec<&str> = mnemonic.split_whitespace().collect();
        assert_eq!(words.len(), 24);
        // First 23 words should be "abandon", last word includes checksum
        for word in &words[..23] {
            assert_eq!(*word, "abandon");
        }
        assert_eq!(words[23], "art");
    }

    #[test]
    fn test_invalid_entropy_length() {
        let engine = MnemonicEngine::english();
        for len in [0, 15, 17, 33] {
            assert_eq!(
                engine.entropy_to_mnemonic(&vec![0u8; len]),
                Err(Error::InvalidEntropyLength { got: len })
            );
        }
    }

    #[test]
    fn test_mnemonic_to_seed_no_passphrase() {
        // BIP39 test vector
        let seed = mnemonic_to_seed(ABANDON_ABOUT, "");
        assert_eq!(
            to_hex(seed.as_bytes()),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
             9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn test_mnemonic_to_seed_with_passphrase() {
        // BIP39 test vector with "TREZOR" passphrase
        let seed = mnemonic_to_seed(ABANDON_ABOUT, "TREZOR");
        assert_eq!(
            to_hex(seed.as_bytes()),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e5349553\
             1f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }

    #[test]
    fn test_mnemonic_to_seed_24_words() {
        let mnemonic = "void come effort suffer camp survey warrior heavy shoot primary clutch crush \
                        open amazing screen patrol group space point ten exist slush involve unfold";
        let seed = mnemonic_to_seed(mnemonic, "TREZOR");
        assert_eq!(
            to_hex(seed.as_bytes()),
            "01f5bced59dec48e362f2c45b5de68b9fd6c92c6634f44d6d40aab69056506f0\
             e35524a518034ddc1192e1dacd32c1ed3eaa3c3b131c88ed8e7e54c49a5d0998"
        );
    }

    #[test]
    fn test_passphrase_is_nfkd_normalized() {
        // U+00E9 and "e" + U+0301 normalize to the same bytes
        let composed = mnemonic_to_seed(ABANDON_ABOUT, "caf\u{e9}");
        let decomposed = mnemonic_to_seed(ABANDON_ABOUT, "cafe\u{301}");
        assert_eq!(composed.as_bytes(), decomposed.as_bytes());
        assert_ne!(
            composed.as_bytes(),
            mnemonic_to_seed(ABANDON_ABOUT, "cafe").as_bytes()
        );
    }

    #[test]
    fn test_seed_debug_is_redacted() {
        let seed = mnemonic_to_seed(ABANDON_ABOUT, "");
        assert_eq!(format!("{seed:?}"), "Seed(<redacted>)");
    }

    #[test]
    fn test_validate_mnemonic_valid() {
        let engine = MnemonicEngine::english();
        assert!(engine.is_valid(ABANDON_ABOUT));
        // Any whitespace separates words
        assert!(engine.is_valid(&ABANDON_ABOUT.replace(' ', "\n\t ")));
    }

    #[test]
    fn test_validate_mnemonic_invalid_checksum() {
        // Changed last word from "about" to "abandon"
        let engine = MnemonicEngine::english();
        let mnemonic = "abandon abandon abandon abandon abandon abandon \
                        abandon abandon abandon abandon abandon abandon";
        assert_eq!(engine.validate(mnemonic), Err(Error::ChecksumMismatch));
        assert!(!engine.is_valid(mnemonic));
    }

    #[test]
    fn test_validate_mnemonic_invalid_word() {
        let engine = MnemonicEngine::english();
        let mnemonic = "abandon abandon abandon abandon abandon abandon \
                        abandon abandon abandon abandon abandon notaword";
        assert_eq!(
            engine.mnemonic_to_entropy(mnemonic),
            Err(Error::InvalidWord("notaword".to_string()))
        );
    }

    #[test]
    fn test_validate_mnemonic_wrong_count() {
        let engine = MnemonicEngine::english();
        assert_eq!(
            engine.validate("abandon abandon abandon"),
            Err(Error::InvalidWordCount { got: 3 })
        );
        let thirteen = format!("{ABANDON_ABOUT} abandon");
        assert_eq!(
            engine.validate(&thirteen),
            Err(Error::InvalidWordCount { got: 13 })
        );
    }

    #[test]
    fn test_mnemonic_type_lookups() {
        for mtype in MnemonicType::ALL {
            assert_eq!(MnemonicType::for_entropy_len(mtype.entropy_bytes()), Ok(mtype));
            assert_eq!(MnemonicType::for_word_count(mtype.word_count()), Ok(mtype));
            assert_eq!(
                (mtype.entropy_bits() + mtype.checksum_bits()) % 11,
                0,
                "{mtype:?} does not fill whole words"
            );
        }
        assert!(MnemonicType::for_word_count(11).is_err());
    }

    #[test]
    fn test_words_matched_after_nfkd() {
        // Entry 0 stored decomposed; the sentence uses the precomposed form.
        let mut words: Vec<String> = (0..2048).map(|i| format!("w{i}")).collect();
        words[0] = "cafe\u{301}".to_string();
        let engine = MnemonicEngine::new(Wordlist::new(words).unwrap());

        let composed = ["caf\u{e9}"; 11].join(" ") + " w3";
        assert_eq!(engine.mnemonic_to_entropy(&composed).unwrap(), vec![0u8; 16]);

        let decomposed = ["cafe\u{301}"; 11].join(" ") + " w3";
        assert_eq!(engine.mnemonic_to_entropy(&decomposed).unwrap(), vec![0u8; 16]);
        assert_eq!(engine.entropy_to_mnemonic(&[0u8; 16]).unwrap(), decomposed);
    }

    #[test]
    fn test_roundtrip() {
        let engine = MnemonicEngine::english();
        for mtype in MnemonicType::ALL {
            let entropy: Vec<u8> = (0..mtype.entropy_bytes() as u8).map(|b| b.wrapping_mul(37)).collect();
            let mnemonic = engine.entropy_to_mnemonic(&entropy).unwrap();
            assert_eq!(mnemonic.split(' ').count(), mtype.word_count());
            assert_eq!(engine.mnemonic_to_entropy(&mnemonic).unwrap(), entropy);
        }
    }
}
