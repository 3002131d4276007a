//! Address kinds and parsing of address strings.

#![forbid(unsafe_code)]

use std::fmt;

use btc_hd_core::{Error, Network, Result};
use btc_hd_crypto::{base58, bech32};
use serde::{Deserialize, Serialize};

use crate::p2wpkh::WITNESS_VERSION;

/// Script template an address pays to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddressKind {
    /// Pay-to-pubkey-hash (Base58Check)
    P2pkh,
    /// Pay-to-script-hash (Base58Check)
    P2sh,
    /// Version-0 witness pubkey hash (Bech32)
    P2wpkh,
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::P2pkh => "p2pkh",
            Self::P2sh => "p2sh",
            Self::P2wpkh => "p2wpkh",
        })
    }
}

/// Result of [`parse_address`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAddress {
    pub network: Network,
    pub kind: AddressKind,
    /// hash160 committed to by the address
    #[serde(with = "hex::serde")]
    pub hash: [u8; 20],
}

fn looks_like_bech32(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    [Network::Mainnet, Network::Testnet]
        .iter()
        .any(|n| lower.starts_with(&format!("{}1", n.bech32_hrp())))
}

fn parse_segwit(s: &str) -> Result<ParsedAddress> {
    let (hrp, version, program) = bech32::decode(s)?;
    let network = Network::from_bech32_hrp(&hrp).ok_or_else(|| Error::InvalidHrp(hrp.clone()))?;
    if version != WITNESS_VERSION {
        return Err(Error::UnsupportedVersion(version as u32));
    }
    let hash: [u8; 20] = program.try_into().map_err(|p: Vec<u8>| {
        Error::InvalidLength(format!("witness program of {} bytes is not a pubkey hash", p.len()))
    })?;
    Ok(ParsedAddress {
        network,
        kind: AddressKind::P2wpkh,
        hash,
    })
}

fn parse_base58(s: &str) -> Result<ParsedAddress> {
    let (version, payload) = base58::decode_check(s)?;
    let hash: [u8; 20] = payload.try_into().map_err(|p: Vec<u8>| {
        Error::InvalidLength(format!("address payload of {} bytes", p.len()))
    })?;

    for network in [Network::Mainnet, Network::Testnet] {
        if version == network.p2pkh_version() {
            return Ok(ParsedAddress {
                network,
                kind: AddressKind::P2pkh,
                hash,
            });
        }
        if version == network.p2sh_version() {
            return Ok(ParsedAddress {
                network,
                kind: AddressKind::P2sh,
                hash,
            });
        }
    }
    Err(Error::UnsupportedVersion(version as u32))
}

/// Identify an address string's network, kind and committed hash.
pub fn parse_address(s: &str) -> Result<ParsedAddress> {
    if looks_like_bech32(s) {
        parse_segwit(s)
    } else {
        parse_base58(s)
    }
}
