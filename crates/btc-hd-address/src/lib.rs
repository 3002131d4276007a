//! Bitcoin key and address encoding.
//!
//! - WIF (wallet import format) for private keys
//! - P2PKH, P2SH-P2WPKH and P2WPKH addresses
//! - Parsing address strings back to network, kind and hash

#![forbid(unsafe_code)]

pub mod addresses;
pub mod kind;
pub mod p2pkh;
pub mod p2sh;
pub mod p2wpkh;
pub mod wif;

pub use addresses::{addresses_for_public_key, derive_addresses, derive_addresses_mainnet, Addresses};
pub use kind::{parse_address, AddressKind, ParsedAddress};
pub use p2pkh::encode_p2pkh;
pub use p2sh::encode_p2sh_p2wpkh;
pub use p2wpkh::encode_p2wpkh;
pub use wif::{decode_wif, encode_wif, private_key_to_wif, wif_to_private_key, Wif};
