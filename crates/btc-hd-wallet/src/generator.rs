//! Single-key pipeline.
//!
//! Full pipeline: entropy → mnemonic → seed → master key → derived key → pubkey → addresses

#![forbid(unsafe_code)]

use std::fmt;

use btc_hd_address::{addresses_for_public_key, encode_wif, Addresses};
use btc_hd_bip::bip32::ExtendedPrivateKey;
use btc_hd_bip::bip39::{mnemonic_to_seed, MnemonicEngine, MnemonicType};
use btc_hd_bip::path::DerivationPath;
use btc_hd_core::{Network, Result};
use rand::{CryptoRng, RngCore};
use serde::{Serialize, Serializer};
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

/// Everything derived for one node of the key tree.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct DerivedKey {
    /// Absolute path from the master node
    #[serde(serialize_with = "serialize_display")]
    pub path: DerivationPath,
    pub network: Network,
    /// Extended private key (xprv / tprv)
    pub xprv: String,
    /// Extended public key (xpub / tpub)
    pub xpub: String,
    /// The raw 32-byte private key
    #[serde(serialize_with = "serialize_hex")]
    pub private_key: [u8; 32],
    /// Compressed WIF
    pub wif: String,
    pub addresses: Addresses,
}

fn serialize_display<T: fmt::Display, S: Serializer>(
    value: &T,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

fn serialize_hex<S: Serializer>(
    bytes: &[u8; 32],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let encoded = Zeroizing::new(hex::encode(bytes));
    serializer.serialize_str(&encoded)
}

impl DerivedKey {
    /// Encode an already derived node found at `path`.
    pub fn from_node(
        path: DerivationPath,
        node: &ExtendedPrivateKey,
        network: Network,
    ) -> Result<Self> {
        Ok(Self {
            xprv: node.to_base58(network),
            xpub: node.to_extended_public().to_base58(network),
            private_key: *node.private_key(),
            wif: encode_wif(node.private_key(), network, true),
            addresses: addresses_for_public_key(node.public_key(), network)?,
            path,
            network,
        })
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.private_key.zeroize();
        self.xprv.zeroize();
        self.wif.zeroize();
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKey")
            .field("path", &format_args!("{}", self.path))
            .field("network", &self.network)
            .field("xprv", &"<redacted>")
            .field("xpub", &self.xpub)
            .field("private_key", &"<redacted>")
            .field("wif", &"<redacted>")
            .field("addresses", &self.addresses)
            .finish()
    }
}

/// Generate a random mnemonic of the given size.
///
/// Entropy comes from the caller's RNG.
pub fn generate_mnemonic<R: RngCore + CryptoRng>(
    rng: &mut R,
    engine: &MnemonicEngine,
    mnemonic_type: MnemonicType,
) -> Result<String> {
    let mut entropy = Zeroizing::new(vec![0u8; mnemonic_type.entropy_bytes()]);
    rng.fill_bytes(&mut entropy);
    engine.entropy_to_mnemonic(&entropy)
}

/// Derive the key at `path` from a seed.
pub fn derive_key(seed: &[u8], path: &DerivationPath, network: Network) -> Result<DerivedKey> {
    let node = ExtendedPrivateKey::from_seed(seed)?.derive_path(path)?;
    DerivedKey::from_node(path.clone(), &node, network)
}

/// Validate a mnemonic, stretch it and derive the key at `path`.
pub fn derive_from_mnemonic(
    engine: &MnemonicEngine,
    mnemonic: &str,
    passphrase: &str,
    path: &DerivationPath,
    network: Network,
) -> Result<DerivedKey> {
    engine.validate(mnemonic)?;
    let seed = mnemonic_to_seed(mnemonic, passphrase);
    debug!(%path, ?network, "derived seed from mnemonic");
    derive_key(seed.as_ref(), path, network)
}
