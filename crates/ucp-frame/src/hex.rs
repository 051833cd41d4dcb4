//! Hex and bit helpers shared by the address and message encodings.

use std::fmt::Write;

use crate::error::{FrameError, Result};

/// Two uppercase hex digits, zero-padded.
pub fn byte_to_hex(byte: u8) -> String {
    format!("{byte:02X}")
}

/// Four uppercase hex digits, zero-padded, for code points above 255.
pub fn codepoint_to_hex(codepoint: u32) -> String {
    format!("{codepoint:04X}")
}

/// Hex-encode a sequence element-wise.
///
/// The width is picked once for the whole sequence: two digits per element
/// unless any element exceeds 255, in which case every element gets four.
pub fn encode_hex(values: &[u32]) -> String {
    let wide = values.iter().any(|value| *value > 0xFF);
    let mut out = String::with_capacity(values.len() * if wide { 4 } else { 2 });
    for value in values {
        if wide {
            let _ = write!(out, "{value:04X}");
        } else {
            let _ = write!(out, "{value:02X}");
        }
    }
    out
}

/// Hex-encode raw bytes, two digits each.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02X}");
    }
    out
}

/// Hex-encode the code points of `text` (see [`encode_hex`] for width).
pub fn text_to_hex(text: &str) -> String {
    let codepoints: Vec<u32> = text.chars().map(u32::from).collect();
    encode_hex(&codepoints)
}

fn nibble(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        _ => None,
    }
}

/// Decode pairs of hex digits into bytes.
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>> {
    let digits = hex.as_bytes();
    if digits.len() % 2 != 0 {
        return Err(FrameError::InvalidHex(format!("odd length {}", digits.len())));
    }
    digits
        .chunks_exact(2)
        .map(|pair| match (nibble(pair[0]), nibble(pair[1])) {
            (Some(high), Some(low)) => Ok((high << 4) | low),
            _ => Err(FrameError::InvalidHex(format!(
                "non-hex digits {:?}",
                String::from_utf8_lossy(pair)
            ))),
        })
        .collect()
}

/// Expand each hex digit into its four bits, most significant first.
///
/// Odd digit counts produce a stream that is not byte aligned; that is left
/// to the caller.
pub fn hex_to_bits(hex: &str) -> Result<Vec<bool>> {
    let mut bits = Vec::with_capacity(hex.len() * 4);
    for digit in hex.bytes() {
        let value = nibble(digit)
            .ok_or_else(|| FrameError::InvalidHex(format!("non-hex digit {:?}", digit as char)))?;
        bits.extend((0..4).rev().map(|shift| (value >> shift) & 1 == 1));
    }
    Ok(bits)
}

/// Split `bytes` into ordered slices of at most `max_size` bytes.
///
/// A buffer no larger than `max_size` (including an empty one) yields a
/// single chunk. A `max_size` of zero is treated as one.
pub fn chunk(bytes: &[u8], max_size: usize) -> Vec<&[u8]> {
    if bytes.len() <= max_size {
        return vec![bytes];
    }
    bytes.chunks(max_size.max(1)).collect()
}

/// Zero-pad `bytes` on the right up to the next multiple of `width`.
pub fn pad_right_to_multiple(bytes: &[u8], width: usize) -> Vec<u8> {
    let mut padded = bytes.to_vec();
    if width == 0 {
        return padded;
    }
    let remainder = bytes.len() % width;
    if remainder != 0 {
        padded.resize(bytes.len() + width - remainder, 0);
    }
    padded
}
