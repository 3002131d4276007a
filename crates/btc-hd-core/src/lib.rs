//! Core types, error taxonomy, network parameters and BIP39 wordlist for btc-hd.

#![forbid(unsafe_code)]

mod english;
mod error;
pub mod network;
pub mod wordlist;

pub use error::Error;
pub use network::Network;
pub use wordlist::{Wordlist, WORD_COUNT};

pub type Result<T> = std::result::Result<T, Error>;
