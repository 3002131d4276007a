use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid entropy length {got}: expected one of 16, 20, 24, 28, or 32 bytes")]
    InvalidEntropyLength { got: usize },

    #[error("invalid word count {got}: expected one of 12, 15, 18, 21, or 24 words")]
    InvalidWordCount { got: usize },

    #[error("invalid word in mnemonic: {0}")]
    InvalidWord(String),

    #[error("invalid wordlist: {0}")]
    InvalidWordlist(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid seed length {got}: expected between 16 and 64 bytes")]
    InvalidSeedLength { got: usize },

    #[error("seed produced an invalid master key; use a different seed")]
    InvalidMasterKey,

    #[error("child index {index:#010x} produced an invalid key; use a different index")]
    InvalidChildKey { index: u32 },

    #[error("cannot derive hardened child {index:#010x} from a public key")]
    HardenedFromPublic { index: u32 },

    #[error("derivation depth exceeds 255")]
    MaxDepthExceeded,

    #[error("invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("invalid character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    #[error("invalid length: {0}")]
    InvalidLength(String),

    #[error("invalid padding in 5-bit group conversion")]
    InvalidPadding,

    #[error("invalid human-readable part: {0}")]
    InvalidHrp(String),

    #[error("mixed-case bech32 string")]
    MixedCase,

    #[error("malformed extended key: {0}")]
    MalformedExtendedKey(String),

    #[error("unsupported version {0:#x}")]
    UnsupportedVersion(u32),

    #[error("invalid key: {0}")]
    InvalidKey(String),
}
