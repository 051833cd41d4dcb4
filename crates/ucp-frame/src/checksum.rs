//! Additive frame checksum: byte sum modulo 256, as two hex digits.

/// Sum of the byte values of `bytes`, modulo 256.
pub fn byte_sum<I: IntoIterator<Item = u8>>(bytes: I) -> u8 {
    bytes.into_iter().fold(0u8, |acc, byte| acc.wrapping_add(byte))
}

/// Checksum of a message up to and including its trailing separator.
///
/// Each character contributes its code modulo 256, which is its Latin-1 byte
/// on the wire.
pub fn checksum(message: &str) -> String {
    let sum = byte_sum(message.chars().map(|ch| (u32::from(ch) & 0xFF) as u8));
    format!("{sum:02X}")
}

/// Whether `received` matches the checksum of `message` (case-insensitive).
pub fn matches(message: &str, received: &str) -> bool {
    checksum(message).eq_ignore_ascii_case(received)
}
