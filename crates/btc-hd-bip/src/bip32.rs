//! BIP32 hierarchical deterministic key derivation.
//!
//! Implements master key derivation, child derivation (hardened + normal),
//! public-only derivation and the 78-byte extended key serialization.
//! Invalid intermediate keys (IL >= n, key == 0) are reported, never skipped.

#![forbid(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use btc_hd_core::{Error, Network, Result};
use btc_hd_crypto::base58;
use btc_hd_crypto::hash::hash160;
use btc_hd_crypto::hmac::{hmac_sha512, hmac_sha512_parts};
use btc_hd_crypto::secp256k1::{PublicKey, Scalar};
use tracing::{debug, trace};
use zeroize::{Zeroize, Zeroizing};

use crate::path::{is_hardened, DerivationPath};

pub use crate::path::HARDENED;

/// HMAC key for the master node.
const MASTER_SECRET: &[u8] = b"Bitcoin seed";

/// Serialized extended key length (before checksum).
pub const EXTENDED_KEY_LEN: usize = 78;

/// Accepted seed lengths in bytes.
pub const SEED_LEN_RANGE: std::ops::RangeInclusive<usize> = 16..=64;

/// First four bytes of hash160 of a compressed public key.
pub type Fingerprint = [u8; 4];

fn fingerprint_of(public_key: &PublicKey) -> Fingerprint {
    let id = hash160(&public_key.compressed());
    [id[0], id[1], id[2], id[3]]
}

fn split_digest(digest: &[u8; 64]) -> ([u8; 32], [u8; 32]) {
    let mut il = [0u8; 32];
    let mut ir = [0u8; 32];
    il.copy_from_slice(&digest[..32]);
    ir.copy_from_slice(&digest[32..]);
    (il, ir)
}

/// Fields shared by both extended key kinds.
struct Header {
    network: Network,
    depth: u8,
    parent_fingerprint: Fingerprint,
    child_number: u32,
    chain_code: [u8; 32],
}

fn encode_extended(
    version: u32,
    depth: u8,
    parent_fingerprint: &Fingerprint,
    child_number: u32,
    chain_code: &[u8; 32],
    key_data: &[u8; 33],
) -> String {
    let mut payload = Zeroizing::new([0u8; EXTENDED_KEY_LEN]);
    payload[0..4].copy_from_slice(&version.to_be_bytes());
    payload[4] = depth;
    payload[5..9].copy_from_slice(parent_fingerprint);
    payload[9..13].copy_from_slice(&child_number.to_be_bytes());
    payload[13..45].copy_from_slice(chain_code);
    payload[45..78].copy_from_slice(key_data);
    base58::encode_check_raw(&payload[..])
}

/// Decode a Base58Check extended key, resolving its version through `lookup`.
fn decode_extended(
    s: &str,
    lookup: fn(u32) -> Option<Network>,
) -> Result<(Header, Zeroizing<[u8; 33]>)> {
    let payload = Zeroizing::new(base58::decode_check_raw(s).map_err(|e| match e {
        Error::InvalidLength(reason) => Error::MalformedExtendedKey(reason),
        other => other,
    })?);
    if payload.len() != EXTENDED_KEY_LEN {
        return Err(Error::MalformedExtendedKey(format!(
            "payload is {} bytes, expected {EXTENDED_KEY_LEN}",
            payload.len()
        )));
    }

    let version = u32::from_be_bytes([payload[0], payload[1], payload[2], payload[3]]);
    let network = lookup(version).ok_or_else(|| {
        Error::MalformedExtendedKey(format!("unexpected version {version:#010x}"))
    })?;

    let depth = payload[4];
    let mut parent_fingerprint = [0u8; 4];
    parent_fingerprint.copy_from_slice(&payload[5..9]);
    let child_number = u32::from_be_bytes([payload[9], payload[10], payload[11], payload[12]]);

    if depth == 0 && (parent_fingerprint != [0u8; 4] || child_number != 0) {
        return Err(Error::MalformedExtendedKey(
            "master node with non-zero parent fingerprint or child number".into(),
        ));
    }

    let mut chain_code = [0u8; 32];
    chain_code.copy_from_slice(&payload[13..45]);
    let mut key_data = Zeroizing::new([0u8; 33]);
    key_data.copy_from_slice(&payload[45..78]);

    Ok((
        Header {
            network,
            depth,
            parent_fingerprint,
            child_number,
            chain_code,
        },
        key_data,
    ))
}

/// Extended private key: a tree node holding the secret scalar.
///
/// Key and chain code are zeroed on drop.
#[derive(Clone)]
pub struct ExtendedPrivateKey {
    depth: u8,
    parent_fingerprint: Fingerprint,
    child_number: u32,
    chain_code: [u8; 32],
    /// 32-byte private key, always in [1, n)
    key: [u8; 32],
    public_key: PublicKey,
}

impl ExtendedPrivateKey {
    fn from_parts(
        depth: u8,
        parent_fingerprint: Fingerprint,
        child_number: u32,
        chain_code: [u8; 32],
        key: &Scalar,
    ) -> Result<Self> {
        let public_key = PublicKey::from_private_key(key)
            .ok_or_else(|| Error::InvalidKey("private key is zero".into()))?;
        Ok(Self {
            depth,
            parent_fingerprint,
            child_number,
            chain_code,
            key: key.to_bytes(),
            public_key,
        })
    }

    /// Derive master key from a seed.
    ///
    /// Uses HMAC-SHA512("Bitcoin seed", seed); seeds must be 16..=64 bytes.
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        if !SEED_LEN_RANGE.contains(&seed.len()) {
            return Err(Error::InvalidSeedLength { got: seed.len() });
        }

        let digest = Zeroizing::new(hmac_sha512(MASTER_SECRET, seed));
        let master = Self::master_from_digest(&digest)?;
        debug!(seed_len = seed.len(), "derived master key");
        Ok(master)
    }

    fn master_from_digest(digest: &[u8; 64]) -> Result<Self> {
        let (mut il, chain_code) = split_digest(digest);
        let key = Scalar::from_secret_bytes(&il);
        il.zeroize();
        let key = key.ok_or(Error::InvalidMasterKey)?;
        Self::from_parts(0, [0u8; 4], 0, chain_code, &key)
    }

    /// Derive hardened child key at given index.
    ///
    /// Convenience wrapper that adds HARDENED flag.
    pub fn derive_hardened(&self, index: u32) -> Result<Self> {
        self.derive_child(index | HARDENED)
    }

    /// Derive child key at given index.
    ///
    /// For hardened (index >= 0x80000000): Data = 0x00 || key || index
    /// For normal (index < 0x80000000): Data = compressed_pubkey || index
    pub fn derive_child(&self, index: u32) -> Result<Self> {
        let index_bytes = index.to_be_bytes();
        let digest = if is_hardened(index) {
            Zeroizing::new(hmac_sha512_parts(
                &self.chain_code,
                &[&[0x00u8][..], &self.key[..], &index_bytes[..]],
            ))
        } else {
            Zeroizing::new(hmac_sha512_parts(
                &self.chain_code,
                &[&self.public_key.compressed()[..], &index_bytes[..]],
            ))
        };

        let child = self.child_from_digest(index, &digest)?;
        trace!(
            depth = child.depth,
            index,
            hardened = is_hardened(index),
            "derived private child"
        );
        Ok(child)
    }

    fn child_from_digest(&self, index: u32, digest: &[u8; 64]) -> Result<Self> {
        let depth = self.depth.checked_add(1).ok_or(Error::MaxDepthExceeded)?;
        let (mut il, chain_code) = split_digest(digest);
        let tweak = Scalar::from_bytes(&il);
        il.zeroize();
        let tweak = tweak.ok_or(Error::InvalidChildKey { index })?;

        // Child key = IL + parent_key (mod n)
        let child = tweak.add(&self.private_key_scalar()?);
        if child.is_zero() {
            return Err(Error::InvalidChildKey { index });
        }

        Self::from_parts(depth, self.fingerprint(), index, chain_code, &child)
    }

    /// Derive the node at `path`, treating `self` as its root.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        debug!(%path, "deriving path");
        let mut current = self.clone();
        for index in path.iter() {
            current = current.derive_child(index)?;
        }
        Ok(current)
    }

    /// Neuter: the matching extended public key.
    pub fn to_extended_public(&self) -> ExtendedPublicKey {
        ExtendedPublicKey {
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_number: self.child_number,
            chain_code: self.chain_code,
            public_key: self.public_key,
        }
    }

    /// Get the raw 32-byte private key.
    pub fn private_key(&self) -> &[u8; 32] {
        &self.key
    }

    /// Get the private key as a Scalar.
    pub fn private_key_scalar(&self) -> Result<Scalar> {
        Scalar::from_secret_bytes(&self.key)
            .ok_or_else(|| Error::InvalidKey("private key out of range".into()))
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Get the 32-byte chain code.
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn parent_fingerprint(&self) -> Fingerprint {
        self.parent_fingerprint
    }

    /// Index this node was derived with (0 for the master).
    pub fn child_number(&self) -> u32 {
        self.child_number
    }

    /// This node's own fingerprint, recorded by its children.
    pub fn fingerprint(&self) -> Fingerprint {
        fingerprint_of(&self.public_key)
    }

    /// Serialize as xprv (mainnet) or tprv (testnet).
    pub fn to_base58(&self, network: Network) -> String {
        let mut key_data = Zeroizing::new([0u8; 33]);
        key_data[1..].copy_from_slice(&self.key);
        encode_extended(
            network.xprv_version(),
            self.depth,
            &self.parent_fingerprint,
            self.child_number,
            &self.chain_code,
            &key_data,
        )
    }

    /// Parse an xprv/tprv string, returning the network its version names.
    pub fn from_base58(s: &str) -> Result<(Network, Self)> {
        let (header, key_data) = decode_extended(s, Network::from_xprv_version)?;
        if key_data[0] != 0x00 {
            return Err(Error::MalformedExtendedKey(format!(
                "private key data starts with {:#04x}",
                key_data[0]
            )));
        }

        let mut key = [0u8; 32];
        key.copy_from_slice(&key_data[1..]);
        let scalar = Scalar::from_secret_bytes(&key);
        key.zeroize();
        let scalar = scalar.ok_or_else(|| {
            Error::MalformedExtendedKey("private key is zero or not below the curve order".into())
        })?;

        let xprv = Self::from_parts(
            header.depth,
            header.parent_fingerprint,
            header.child_number,
            header.chain_code,
            &scalar,
        )?;
        Ok((header.network, xprv))
    }
}

impl Drop for ExtendedPrivateKey {
    fn drop(&mut self) {
        self.key.zeroize();
        self.chain_code.zeroize();
    }
}

impl PartialEq for ExtendedPrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.depth == other.depth
            && self.parent_fingerprint == other.parent_fingerprint
            && self.child_number == other.child_number
            && self.chain_code == other.chain_code
            && self.key == other.key
    }
}

impl Eq for ExtendedPrivateKey {}

impl fmt::Debug for ExtendedPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedPrivateKey")
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_number", &self.child_number)
            .field("chain_code", &"<redacted>")
            .field("key", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for ExtendedPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58(Network::Mainnet))
    }
}

impl FromStr for ExtendedPrivateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_base58(s).map(|(_, xprv)| xprv)
    }
}

/// Extended public key: a tree node holding only the public point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtendedPublicKey {
    depth: u8,
    parent_fingerprint: Fingerprint,
    child_number: u32,
    chain_code: [u8; 32],
    public_key: PublicKey,
}

impl ExtendedPublicKey {
    /// Derive a non-hardened child: point(IL) + parent point.
    pub fn derive_child(&self, index: u32) -> Result<Self> {
        if is_hardened(index) {
            return Err(Error::HardenedFromPublic { index });
        }
        let depth = self.depth.checked_add(1).ok_or(Error::MaxDepthExceeded)?;

        let digest = hmac_sha512_parts(
            &self.chain_code,
            &[&self.public_key.compressed()[..], &index.to_be_bytes()[..]],
        );
        let (il, chain_code) = split_digest(&digest);
        let tweak = Scalar::from_bytes(&il).ok_or(Error::InvalidChildKey { index })?;
        let public_key = self
            .public_key
            .add_tweak(&tweak)
            .ok_or(Error::InvalidChildKey { index })?;

        trace!(depth, index, "derived public child");
        Ok(Self {
            depth,
            parent_fingerprint: self.fingerprint(),
            child_number: index,
            chain_code,
            public_key,
        })
    }

    /// Derive along a path of non-hardened indices.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        path.iter()
            .try_fold(*self, |node, index| node.derive_child(index))
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn parent_fingerprint(&self) -> Fingerprint {
        self.parent_fingerprint
    }

    pub fn child_number(&self) -> u32 {
        self.child_number
    }

    pub fn fingerprint(&self) -> Fingerprint {
        fingerprint_of(&self.public_key)
    }

    /// Serialize as xpub (mainnet) or tpub (testnet).
    pub fn to_base58(&self, network: Network) -> String {
        encode_extended(
            network.xpub_version(),
            self.depth,
            &self.parent_fingerprint,
            self.child_number,
            &self.chain_code,
            &self.public_key.compressed(),
        )
    }

    /// Parse an xpub/tpub string, returning the network its version names.
    pub fn from_base58(s: &str) -> Result<(Network, Self)> {
        let (header, key_data) = decode_extended(s, Network::from_xpub_version)?;
        if !matches!(key_data[0], 0x02 | 0x03) {
            return Err(Error::MalformedExtendedKey(format!(
                "public key data starts with {:#04x}",
                key_data[0]
            )));
        }
        let public_key = PublicKey::from_sec1_bytes(&key_data[..])
            .ok_or_else(|| Error::MalformedExtendedKey("public key is not on the curve".into()))?;

        Ok((
            header.network,
            Self {
                depth: header.depth,
                parent_fingerprint: header.parent_fingerprint,
                child_number: header.child_number,
                chain_code: header.chain_code,
                public_key,
            },
        ))
    }
}

impl fmt::Display for ExtendedPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58(Network::Mainnet))
    }
}

impl FromStr for ExtendedPublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_base58(s).map(|(_, xpub)| xpub)
    }
}

/// Derive the node at `path` from a seed's master key.
pub fn derive_from_path(seed: &[u8], path: &DerivationPath) -> Result<ExtendedPrivateKey> {
    ExtendedPrivateKey::from_seed(seed)?.derive_path(path)
}

/// Extract the 32-byte private key from an xprv/tprv string.
pub fn deserialize_extended_private(s: &str) -> Result<[u8; 32]> {
    let (_, xprv) = ExtendedPrivateKey::from_base58(s)?;
    Ok(*xprv.private_key())
}
