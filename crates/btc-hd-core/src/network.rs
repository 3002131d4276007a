//! Bitcoin network parameters.
//!
//! Every version byte, prefix and extended-key tag used by the codecs is
//! selected through [`Network`].

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Bitcoin network type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Bitcoin mainnet
    #[default]
    Mainnet,
    /// Bitcoin testnet / signet / regtest share these parameters
    Testnet,
}

impl Network {
    /// Base58Check version byte for pay-to-pubkey-hash addresses.
    pub const fn p2pkh_version(self) -> u8 {
        match self {
            Self::Mainnet => 0x00,
            Self::Testnet => 0x6f,
        }
    }

    /// Base58Check version byte for pay-to-script-hash addresses.
    pub const fn p2sh_version(self) -> u8 {
        match self {
            Self::Mainnet => 0x05,
            Self::Testnet => 0xc4,
        }
    }

    /// Wallet import format version byte.
    pub const fn wif_version(self) -> u8 {
        match self {
            Self::Mainnet => 0x80,
            Self::Testnet => 0xef,
        }
    }

    /// Bech32 human-readable part for witness addresses.
    pub const fn bech32_hrp(self) -> &'static str {
        match self {
            Self::Mainnet => "bc",
            Self::Testnet => "tb",
        }
    }

    /// BIP32 version tag for extended private keys (xprv / tprv).
    pub const fn xprv_version(self) -> u32 {
        match self {
            Self::Mainnet => 0x0488_ADE4,
            Self::Testnet => 0x0435_8394,
        }
    }

    /// BIP32 version tag for extended public keys (xpub / tpub).
    pub const fn xpub_version(self) -> u32 {
        match self {
            Self::Mainnet => 0x0488_B21E,
            Self::Testnet => 0x0435_87CF,
        }
    }

    /// SLIP-44 coin type used in BIP44-style paths.
    pub const fn coin_type(self) -> u32 {
        match self {
            Self::Mainnet => 0,
            Self::Testnet => 1,
        }
    }

    /// Look up the network owning an extended private key version tag.
    pub fn from_xprv_version(version: u32) -> Option<Self> {
        [Self::Mainnet, Self::Testnet]
            .into_iter()
            .find(|n| n.xprv_version() == version)
    }

    /// Look up the network owning an extended public key version tag.
    pub fn from_xpub_version(version: u32) -> Option<Self> {
        [Self::Mainnet, Self::Testnet]
            .into_iter()
            .find(|n| n.xpub_version() == version)
    }

    /// Look up the network owning a WIF version byte.
    pub fn from_wif_version(version: u8) -> Option<Self> {
        [Self::Mainnet, Self::Testnet]
            .into_iter()
            .find(|n| n.wif_version() == version)
    }

    /// Look up the network owning a bech32 human-readable part.
    pub fn from_bech32_hrp(hrp: &str) -> Option<Self> {
        [Self::Mainnet, Self::Testnet]
            .into_iter()
            .find(|n| n.bech32_hrp() == hrp)
    }
}
