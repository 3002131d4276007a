//! BIP39/BIP32/BIP44 implementation.
//!
//! - [`bip39`]: entropy ↔ mnemonic, mnemonic → seed
//! - [`bip32`]: seed → master node → child nodes, xprv/xpub strings
//! - [`path`]: `m/44'/0'/0'/0/0` text form
//! - [`bip44`]: purpose/coin/account path helpers

#![forbid(unsafe_code)]

pub mod bip32;
pub mod bip39;
pub mod bip44;
pub mod path;

pub use bip32::{ExtendedPrivateKey, ExtendedPublicKey};
pub use bip39::{mnemonic_to_seed, MnemonicEngine, MnemonicType, Seed};
pub use path::{DerivationPath, HARDENED};
