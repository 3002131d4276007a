//! BIP32 derivation path text form.
//!
//! `m` is the master node; `m/44'/0'/0'/0/0` walks five levels. A trailing
//! `'`, `h` or `H` sets the hardened bit.

#![forbid(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use btc_hd_core::{Error, Result};

/// Hardened derivation flag.
pub const HARDENED: u32 = 0x8000_0000;

/// Whether `index` selects hardened derivation.
pub const fn is_hardened(index: u32) -> bool {
    index & HARDENED != 0
}

/// Ordered list of child indices from the master node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<u32>);

impl DerivationPath {
    /// The empty path `m`.
    pub fn master() -> Self {
        Self(Vec::new())
    }

    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    pub fn is_master(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of derivation steps.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// This path extended by one index.
    pub fn child(&self, index: u32) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<u32>> for DerivationPath {
    fn from(indices: Vec<u32>) -> Self {
        Self(indices)
    }
}

impl From<&[u32]> for DerivationPath {
    fn from(indices: &[u32]) -> Self {
        Self(indices.to_vec())
    }
}

impl AsRef<[u32]> for DerivationPath {
    fn as_ref(&self) -> &[u32] {
        &self.0
    }
}

fn parse_segment(segment: &str) -> Result<u32> {
    let (digits, hardened) = match segment.strip_suffix(|c: char| matches!(c, '\'' | 'h' | 'H')) {
        Some(digits) => (digits, true),
        None => (segment, false),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidPath(format!("bad segment {segment:?}")));
    }
    let value: u32 = digits
        .parse()
        .map_err(|_| Error::InvalidPath(format!("segment {segment:?} out of range")))?;

    if hardened {
        if is_hardened(value) {
            return Err(Error::InvalidPath(format!(
                "hardened segment {segment:?} must be below 2^31"
            )));
        }
        Ok(value | HARDENED)
    } else {
        Ok(value)
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "m" {
            return Ok(Self::master());
        }
        let rest = s
            .strip_prefix("m/")
            .ok_or_else(|| Error::InvalidPath(format!("{s:?} must be \"m\" or start with \"m/\"")))?;

        rest.split('/')
            .map(parse_segment)
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for &index in &self.0 {
            if is_hardened(index) {
                write!(f, "/{}'", index & !HARDENED)?;
            } else {
                write!(f, "/{index}")?;
            }
        }
        Ok(())
    }
}
