//! Base58 and Base58Check encoding.
//!
//! Uses Bitcoin alphabet (excludes 0, O, I, l to avoid confusion).
//! Base58Check appends the first four bytes of SHA-256d(data); leading
//! zero bytes survive the numeric conversion as leading '1' characters.

#![forbid(unsafe_code)]

use btc_hd_core::{Error, Result};

use crate::hash::{checksum, CHECKSUM_LEN};

/// Base58 alphabet (Bitcoin style).
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

const INVALID: u8 = 0xff;

const fn build_decode_map() -> [u8; 128] {
    let mut map = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        map[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    map
}

/// ASCII -> digit value, `INVALID` outside the alphabet.
const DECODE_MAP: [u8; 128] = build_decode_map();

fn digit_value(ch: char) -> Option<u8> {
    let code = ch as u32;
    if code >= 128 {
        return None;
    }
    match DECODE_MAP[code as usize] {
        INVALID => None,
        d => Some(d),
    }
}

/// Encode bytes to Base58 string.
pub fn encode(data: &[u8]) -> String {
    if data.is_empty() {
        return String::new();
    }

    // Count leading zeros
    let leading_zeros = data.iter().take_while(|&&b| b == 0).count();

    // Allocate enough space for result (log(256)/log(58) ≈ 1.37)
    let size = (data.len() * 138 / 100) + 1;
    let mut buf = vec![0u8; size];

    // Convert to base58
    for &byte in data {
        let mut carry = byte as u32;
        for digit in buf.iter_mut().rev() {
            carry += (*digit as u32) * 256;
            *digit = (carry % 58) as u8;
            carry /= 58;
        }
    }

    // Skip leading zeros in result buffer
    let first_non_zero = buf.iter().position(|&b| b != 0).unwrap_or(buf.len());

    let mut result = String::with_capacity(leading_zeros + buf.len() - first_non_zero);

    // Add '1' for each leading zero byte
    for _ in 0..leading_zeros {
        result.push('1');
    }

    for &digit in &buf[first_non_zero..] {
        result.push(ALPHABET[digit as usize] as char);
    }

    result
}

/// Decode a Base58 string to bytes.
///
/// Each leading '1' becomes one leading zero byte.
pub fn decode(s: &str) -> Result<Vec<u8>> {
    let leading_ones = s.bytes().take_while(|&b| b == b'1').count();

    // log(58)/log(256) ≈ 0.733
    let size = (s.len() * 733 / 1000) + 1;
    let mut buf = vec![0u8; size];

    for (position, ch) in s.chars().enumerate() {
        let value = digit_value(ch).ok_or(Error::InvalidCharacter { ch, position })?;
        let mut carry = value as u32;
        for byte in buf.iter_mut().rev() {
            carry += (*byte as u32) * 58;
            *byte = (carry & 0xff) as u8;
            carry >>= 8;
        }
    }

    let first_non_zero = buf.iter().position(|&b| b != 0).unwrap_or(buf.len());

    let mut result = vec![0u8; leading_ones];
    result.extend_from_slice(&buf[first_non_zero..]);
    Ok(result)
}

/// Base58Check-encode `data || checksum(data)`.
pub fn encode_check_raw(data: &[u8]) -> String {
    let mut buf = Vec::with_capacity(data.len() + CHECKSUM_LEN);
    buf.extend_from_slice(data);
    buf.extend_from_slice(&checksum(data));
    encode(&buf)
}

/// Base58Check-encode `version || payload || checksum`.
pub fn encode_check(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len());
    data.push(version);
    data.extend_from_slice(payload);
    encode_check_raw(&data)
}

/// Decode a Base58Check string, verify and strip the checksum.
pub fn decode_check_raw(s: &str) -> Result<Vec<u8>> {
    let mut data = decode(s)?;
    if data.len() < CHECKSUM_LEN {
        return Err(Error::InvalidLength(format!(
            "base58check payload of {} bytes is shorter than its checksum",
            data.len()
        )));
    }

    let split = data.len() - CHECKSUM_LEN;
    if checksum(&data[..split]) != data[split..] {
        return Err(Error::ChecksumMismatch);
    }
    data.truncate(split);
    Ok(data)
}

/// Decode a Base58Check string into its version byte and payload.
pub fn decode_check(s: &str) -> Result<(u8, Vec<u8>)> {
    let mut data = decode_check_raw(s)?;
    if data.is_empty() {
        return Err(Error::InvalidLength("missing version byte".into()));
    }
    let version = data.remove(0);
    Ok((version, data))
}
