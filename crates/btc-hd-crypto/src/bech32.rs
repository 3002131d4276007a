//! Bech32 segwit address codec (BIP173).
//!
//! Only the original Bech32 checksum constant is supported; Bech32m
//! strings for witness versions 1+ fail checksum verification.

#![forbid(unsafe_code)]

use btc_hd_core::{Error, Result};

/// Bech32 data alphabet.
pub const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Separator between human-readable part and data.
pub const SEPARATOR: char = '1';

/// Maximum total length of a Bech32 string.
pub const MAX_LENGTH: usize = 90;

const CHECKSUM_LENGTH: usize = 6;
const GENERATOR: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];
const BECH32_CONST: u32 = 1;
const MAX_WITNESS_VERSION: u8 = 16;

const fn build_charset_rev() -> [i8; 128] {
    let mut map = [-1i8; 128];
    let mut i = 0;
    while i < CHARSET.len() {
        map[CHARSET[i] as usize] = i as i8;
        i += 1;
    }
    map
}

const CHARSET_REV: [i8; 128] = build_charset_rev();

fn polymod(values: &[u8]) -> u32 {
    let mut chk: u32 = 1;
    for &v in values {
        let top = chk >> 25;
        chk = ((chk & 0x01ff_ffff) << 5) ^ v as u32;
        for (i, g) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= g;
            }
        }
    }
    chk
}

/// High bits of each HRP char, a zero, then the low bits.
fn hrp_expand(hrp: &str) -> Vec<u8> {
    let bytes = hrp.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() * 2 + 1);
    out.extend(bytes.iter().map(|b| b >> 5));
    out.push(0);
    out.extend(bytes.iter().map(|b| b & 0x1f));
    out
}

fn create_checksum(hrp: &str, data: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    values.extend_from_slice(&[0u8; CHECKSUM_LENGTH]);
    let pm = polymod(&values) ^ BECH32_CONST;

    let mut checksum = [0u8; CHECKSUM_LENGTH];
    for (i, c) in checksum.iter_mut().enumerate() {
        *c = ((pm >> (5 * (5 - i))) & 0x1f) as u8;
    }
    checksum
}

fn verify_checksum(hrp: &str, data: &[u8]) -> bool {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    polymod(&values) == BECH32_CONST
}

fn validate_hrp(hrp: &str) -> Result<()> {
    if hrp.is_empty() {
        return Err(Error::InvalidHrp("empty human-readable part".into()));
    }
    if hrp.len() > 83 {
        return Err(Error::InvalidHrp(format!("{} characters exceeds 83", hrp.len())));
    }
    if let Some(bad) = hrp.chars().find(|c| !(33..=126).contains(&(*c as u32))) {
        return Err(Error::InvalidHrp(format!("character {bad:?} out of range")));
    }
    Ok(())
}

fn validate_program(version: u8, program: &[u8]) -> Result<()> {
    if version > MAX_WITNESS_VERSION {
        return Err(Error::UnsupportedVersion(version as u32));
    }
    if !(2..=40).contains(&program.len()) {
        return Err(Error::InvalidLength(format!(
            "witness program of {} bytes",
            program.len()
        )));
    }
    if version == 0 && program.len() != 20 && program.len() != 32 {
        return Err(Error::InvalidLength(format!(
            "version 0 witness program of {} bytes",
            program.len()
        )));
    }
    Ok(())
}

/// Regroup `data` from `from`-bit to `to`-bit values.
///
/// With `pad`, a trailing partial group is zero-filled. Without it, more
/// than `from - 1` leftover bits or any non-zero leftover is `InvalidPadding`.
pub fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Result<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let max_value: u32 = (1 << to) - 1;
    let max_acc: u32 = (1 << (from + to - 1)) - 1;
    let mut out = Vec::with_capacity(data.len() * from as usize / to as usize + 1);

    for &value in data {
        let v = value as u32;
        if v >> from != 0 {
            return Err(Error::InvalidLength(format!("value {v} wider than {from} bits")));
        }
        acc = ((acc << from) | v) & max_acc;
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & max_value) as u8);
        }
    }

    if pad {
        if bits > 0 {
            out.push(((acc << (to - bits)) & max_value) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & max_value) != 0 {
        return Err(Error::InvalidPadding);
    }

    Ok(out)
}

/// Encode a witness program as a Bech32 address.
pub fn encode(hrp: &str, witness_version: u8, program: &[u8]) -> Result<String> {
    validate_hrp(hrp)?;
    validate_program(witness_version, program)?;

    let hrp = hrp.to_ascii_lowercase();
    let mut data = Vec::with_capacity(1 + program.len() * 8 / 5 + 1);
    data.push(witness_version);
    data.extend(convert_bits(program, 8, 5, true)?);
    let checksum = create_checksum(&hrp, &data);

    let mut out = String::with_capacity(hrp.len() + 1 + data.len() + CHECKSUM_LENGTH);
    out.push_str(&hrp);
    out.push(SEPARATOR);
    for &d in data.iter().chain(checksum.iter()) {
        out.push(CHARSET[d as usize] as char);
    }

    if out.len() > MAX_LENGTH {
        return Err(Error::InvalidLength(format!("{} characters exceeds {MAX_LENGTH}", out.len())));
    }
    Ok(out)
}

/// Decode a Bech32 address into `(hrp, witness_version, program)`.
///
/// The returned HRP is lowercase.
pub fn decode(s: &str) -> Result<(String, u8, Vec<u8>)> {
    if s.len() > MAX_LENGTH {
        return Err(Error::InvalidLength(format!("{} characters exceeds {MAX_LENGTH}", s.len())));
    }
    if let Some((position, ch)) = s.chars().enumerate().find(|(_, c)| !(33..=126).contains(&(*c as u32))) {
        return Err(Error::InvalidCharacter { ch, position });
    }

    let has_lower = s.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = s.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(Error::MixedCase);
    }
    let s = s.to_ascii_lowercase();

    let sep = s
        .rfind(SEPARATOR)
        .ok_or_else(|| Error::InvalidHrp("missing separator".into()))?;
    let (hrp, data_part) = (&s[..sep], &s[sep + 1..]);
    validate_hrp(hrp)?;
    if data_part.len() < CHECKSUM_LENGTH {
        return Err(Error::InvalidLength(format!(
            "data part of {} characters is shorter than the checksum",
            data_part.len()
        )));
    }

    let mut data = Vec::with_capacity(data_part.len());
    for (offset, ch) in data_part.chars().enumerate() {
        match CHARSET_REV[ch as usize] {
            -1 => {
                return Err(Error::InvalidCharacter { ch, position: sep + 1 + offset });
            }
            v => data.push(v as u8),
        }
    }

    if !verify_checksum(hrp, &data) {
        return Err(Error::ChecksumMismatch);
    }
    data.truncate(data.len() - CHECKSUM_LENGTH);

    let (&version, words) = data
        .split_first()
        .ok_or_else(|| Error::InvalidLength("empty data section".into()))?;
    if version > MAX_WITNESS_VERSION {
        return Err(Error::UnsupportedVersion(version as u32));
    }
    let program = convert_bits(words, 5, 8, false)?;
    validate_program(version, &program)?;

    Ok((hrp.to_string(), version, program))
}
