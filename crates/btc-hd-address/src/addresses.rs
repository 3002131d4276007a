//! All address forms for one private key.

#![forbid(unsafe_code)]

use btc_hd_core::{Error, Network, Result};
use btc_hd_crypto::secp256k1::{PublicKey, Scalar};
use serde::{Deserialize, Serialize};

use crate::kind::AddressKind;
use crate::p2pkh::encode_p2pkh;
use crate::p2sh::encode_p2sh_p2wpkh;
use crate::p2wpkh::encode_p2wpkh;

/// Display strings derived from one key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addresses {
    /// P2PKH over the uncompressed public key
    pub legacy: String,
    /// P2PKH over the compressed public key
    pub legacy_compressed: String,
    /// P2SH-P2WPKH
    pub script_hash: String,
    /// P2WPKH (bech32)
    pub segwit: String,
}

impl Addresses {
    /// Address of the given kind; P2PKH maps to the compressed form.
    pub fn get(&self, kind: AddressKind) -> &str {
        match kind {
            AddressKind::P2pkh => &self.legacy_compressed,
            AddressKind::P2sh => &self.script_hash,
            AddressKind::P2wpkh => &self.segwit,
        }
    }
}

/// Derive every address form for a public key.
pub fn addresses_for_public_key(public_key: &PublicKey, network: Network) -> Result<Addresses> {
    let compressed = public_key.compressed();
    Ok(Addresses {
        legacy: encode_p2pkh(&public_key.uncompressed(), network),
        legacy_compressed: encode_p2pkh(&compressed, network),
        script_hash: encode_p2sh_p2wpkh(&compressed, network),
        segwit: encode_p2wpkh(&compressed, network)?,
    })
}

/// Derive every address form for a 32-byte private key.
pub fn derive_addresses(private_key: &[u8; 32], network: Network) -> Result<Addresses> {
    let scalar = Scalar::from_secret_bytes(private_key)
        .ok_or_else(|| Error::InvalidKey("private key is zero or not below the curve order".into()))?;
    let public_key = PublicKey::from_private_key(&scalar)
        .ok_or_else(|| Error::InvalidKey("private key is zero".into()))?;
    addresses_for_public_key(&public_key, network)
}

/// [`derive_addresses`] on mainnet.
pub fn derive_addresses_mainnet(private_key: &[u8; 32]) -> Result<Addresses> {
    derive_addresses(private_key, Network::Mainnet)
}
