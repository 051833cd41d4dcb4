//! Wrap-around sequence counters (TRN and concatenation REF).
//!
//! Counters are plain values passed in and returned; whoever owns a session
//! stores them and serialises advancement per connection.

use crate::error::{FrameError, Result};

/// Inclusive bounds of a rotating counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceRange {
    pub min: u32,
    pub max: u32,
}

impl SequenceRange {
    /// Transaction reference numbers, rendered as two decimal digits.
    pub const TRN: SequenceRange = SequenceRange { min: 0, max: 99 };

    /// Concatenation reference numbers, carried in a single octet.
    pub const REF: SequenceRange = SequenceRange { min: 0, max: 255 };

    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Next value after `value`, wrapping to `min` once `max` is reached.
    pub fn advance(&self, value: u32) -> u32 {
        advance(value, self.min, self.max)
    }
}

/// `min` if `value >= max`, otherwise `value + 1`.
pub fn advance(value: u32, min: u32, max: u32) -> u32 {
    if value >= max {
        min
    } else {
        value + 1
    }
}

/// Parse a decimal counter, then [`advance`] it.
pub fn advance_decimal(value: &str, min: u32, max: u32) -> Result<u32> {
    let parsed = value
        .trim()
        .parse::<u32>()
        .map_err(|_| FrameError::InvalidCounter(value.to_string()))?;
    Ok(advance(parsed, min, max))
}

/// Next transaction reference number.
pub fn next_trn(trn: u32) -> u32 {
    SequenceRange::TRN.advance(trn)
}

/// Next concatenation reference number.
pub fn next_ref(reference: u32) -> u32 {
    SequenceRange::REF.advance(reference)
}

/// Two-digit, zero-padded decimal rendering of a TRN.
pub fn render_trn(trn: u32) -> String {
    format!("{trn:02}")
}
