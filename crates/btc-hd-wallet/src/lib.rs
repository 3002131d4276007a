//! End-to-end HD wallet pipeline.
//!
//! mnemonic → seed → key tree node → WIF, extended keys and addresses,
//! for one path or a parallel batch of sibling indices.

#![forbid(unsafe_code)]

pub mod generator;
pub mod parallel;

pub use generator::{derive_from_mnemonic, derive_key, generate_mnemonic, DerivedKey};
pub use parallel::{derive_children, derive_range};
