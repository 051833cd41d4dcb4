//! Reversed semi-octet strings, as used for telephony digits and timestamps.
//!
//! Digits are swapped pairwise ("4812" becomes "8421"). An odd-length input
//! is completed with the filler `F` in the second position of the final
//! pair, which after the swap puts it first: "123" becomes "21F3".

use crate::error::{FrameError, Result};

/// Filler digit completing an odd-length semi-octet string.
pub const FILLER: char = 'F';

fn is_filler(ch: char) -> bool {
    ch.eq_ignore_ascii_case(&FILLER)
}

/// Swap each pair of characters, padding an odd tail with [`FILLER`].
pub fn encode_reverse(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + 1);
    let mut chars = digits.chars();
    while let Some(first) = chars.next() {
        out.push(chars.next().unwrap_or(FILLER));
        out.push(first);
    }
    out
}

/// Undo [`encode_reverse`].
///
/// Fails on odd-length input and on a filler anywhere but the final pair.
pub fn decode_reverse(encoded: &str) -> Result<String> {
    let chars: Vec<char> = encoded.chars().collect();
    if chars.len() % 2 != 0 {
        return Err(FrameError::InvalidSemiOctets(format!(
            "odd length {}",
            chars.len()
        )));
    }

    let pairs = chars.len() / 2;
    let mut out = String::with_capacity(chars.len());
    for (index, pair) in chars.chunks_exact(2).enumerate() {
        let (first, second) = (pair[0], pair[1]);
        let is_last = index + 1 == pairs;
        if is_filler(second) {
            return Err(FrameError::InvalidSemiOctets(format!(
                "filler in pair {index}"
            )));
        }
        if is_filler(first) {
            if !is_last {
                return Err(FrameError::InvalidSemiOctets(format!(
                    "filler in pair {index}"
                )));
            }
            out.push(second);
            continue;
        }
        out.push(second);
        out.push(first);
    }
    Ok(out)
}
