//! BIP44/49/84 derivation paths.
//!
//! Path structure: m / purpose' / coin_type' / account' / change / address_index
//! Bitcoin mainnet uses coin type 0, testnet coin type 1.

#![forbid(unsafe_code)]

use std::fmt;

use btc_hd_core::{Error, Network, Result};

use crate::bip32::ExtendedPrivateKey;
use crate::path::{is_hardened, DerivationPath, HARDENED};

/// Change level for receiving addresses.
pub const EXTERNAL_CHAIN: u32 = 0;

/// Change level for change addresses.
pub const INTERNAL_CHAIN: u32 = 1;

/// Address family selected by the purpose level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Purpose {
    /// Legacy pay-to-pubkey-hash
    Bip44,
    /// Witness pubkey hash nested in pay-to-script-hash
    Bip49,
    /// Native witness pubkey hash
    Bip84,
}

impl Purpose {
    pub const fn number(self) -> u32 {
        match self {
            Self::Bip44 => 44,
            Self::Bip49 => 49,
            Self::Bip84 => 84,
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BIP{}", self.number())
    }
}

fn check_level(name: &str, value: u32) -> Result<u32> {
    if is_hardened(value) {
        return Err(Error::InvalidPath(format!("{name} {value} must be below 2^31")));
    }
    Ok(value)
}

/// Build `m/purpose'/coin_type'/account'/change/index`.
pub fn account_path(
    purpose: Purpose,
    coin_type: u32,
    account: u32,
    change: u32,
    index: u32,
) -> Result<DerivationPath> {
    Ok(DerivationPath::from(vec![
        HARDENED | purpose.number(),
        HARDENED | check_level("coin type", coin_type)?,
        HARDENED | check_level("account", account)?,
        check_level("change", change)?,
        check_level("address index", index)?,
    ]))
}

/// Derive the key at the standard path for `network`.
pub fn derive_account_key(
    master: &ExtendedPrivateKey,
    purpose: Purpose,
    network: Network,
    account: u32,
    change: u32,
    address_index: u32,
) -> Result<ExtendedPrivateKey> {
    let path = account_path(purpose, network.coin_type(), account, change, address_index)?;
    master.derive_path(&path)
}

/// Derive the first receiving key, m/purpose'/coin'/0'/0/0.
pub fn derive_first_key(
    master: &ExtendedPrivateKey,
    purpose: Purpose,
    network: Network,
) -> Result<ExtendedPrivateKey> {
    derive_account_key(master, purpose, network, 0, EXTERNAL_CHAIN, 0)
}
