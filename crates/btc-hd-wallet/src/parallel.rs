//! Multi-threaded batch derivation.

#![forbid(unsafe_code)]

use btc_hd_bip::bip32::ExtendedPrivateKey;
use btc_hd_bip::path::DerivationPath;
use btc_hd_core::{Network, Result};
use rayon::prelude::*;
use tracing::debug;

use crate::generator::DerivedKey;

/// Derive the children of `parent` at `indices`.
///
/// Uses all available CPU cores via rayon. Output order follows `indices`;
/// the first failure aborts the batch.
pub fn derive_children(
    parent: &ExtendedPrivateKey,
    parent_path: &DerivationPath,
    indices: &[u32],
    network: Network,
) -> Result<Vec<DerivedKey>> {
    debug!(count = indices.len(), parent = %parent_path, "deriving batch");
    indices
        .par_iter()
        .map(|&index| {
            let child = parent.derive_child(index)?;
            DerivedKey::from_node(parent_path.child(index), &child, network)
        })
        .collect()
}

/// Derive `parent_path` from the seed once, then its children at `indices`.
pub fn derive_range(
    seed: &[u8],
    parent_path: &DerivationPath,
    indices: &[u32],
    network: Network,
) -> Result<Vec<DerivedKey>> {
    let parent = ExtendedPrivateKey::from_seed(seed)?.derive_path(parent_path)?;
    derive_children(&parent, parent_path, indices, network)
}
