//! Originator address (OAdC) encoding.
//!
//! Numeric senders travel as-is. Alphanumeric senders are flagged with
//! OTOA `5039` and carried as GSM 7-bit packed octets in hex, prefixed by the
//! packed length in semi-octets:
//!
//! ```text
//! "orange.pl" -> 10 6F79D87D2EBBE06C
//!                ^^ 16 semi-octets
//! ```

use ucp_frame::hex::{bytes_to_hex, hex_to_bytes};
use ucp_gsm::{Alphabet, Gsm};

use crate::error::{MessageError, Result};

/// OTOA value marking an alphanumeric, 7-bit packed originator.
pub const ALPHANUMERIC_OTOA: &str = "5039";

/// Whether `text` is a plain numeric address.
pub fn is_numeric(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

/// Encode a sender with the default GSM alphabet, returning `(otoa, oadc)`.
pub fn encode_sender(text: &str) -> (String, String) {
    encode_sender_with(&Gsm, text)
}

/// Encode a sender, returning `(otoa, oadc)`.
///
/// Numeric senders come back unchanged with an empty OTOA.
pub fn encode_sender_with<A: Alphabet + ?Sized>(alphabet: &A, text: &str) -> (String, String) {
    if is_numeric(text) {
        return (String::new(), text.to_string());
    }
    (
        ALPHANUMERIC_OTOA.to_string(),
        encode_alphanumeric(alphabet, text),
    )
}

/// Pack `text` as an alphanumeric OAdC regardless of its content.
pub fn encode_alphanumeric<A: Alphabet + ?Sized>(alphabet: &A, text: &str) -> String {
    let packed = alphabet.pack(&alphabet.to_wire(text));
    let hex = bytes_to_hex(&packed);
    format!("{:02X}{hex}", semi_octet_count(&hex))
}

/// Semi-octets used by a packed hex string.
///
/// Octets whose high digit is `0` count as one (a half-used final octet),
/// every other octet as two.
pub fn semi_octet_count(hex: &str) -> usize {
    hex.as_bytes()
        .chunks(2)
        .map(|pair| if pair[0] == b'0' { 1 } else { 2 })
        .sum()
}

/// Decode a sender with the default GSM alphabet.
pub fn decode_sender(otoa: &str, field: &str) -> Result<String> {
    decode_sender_with(&Gsm, otoa, field)
}

/// Decode an OAdC according to its OTOA.
///
/// Anything but `5039` is returned unchanged.
pub fn decode_sender_with<A: Alphabet + ?Sized>(alphabet: &A, otoa: &str, field: &str) -> Result<String> {
    if otoa != ALPHANUMERIC_OTOA {
        return Ok(field.to_string());
    }

    let (prefix, packed) = match (field.get(..2), field.get(2..)) {
        (Some(prefix), Some(packed)) => (prefix, packed),
        _ => {
            return Err(MessageError::InvalidAddress(format!(
                "alphanumeric address too short: {field:?}"
            )))
        }
    };
    let semi_octets = usize::from_str_radix(prefix, 16).map_err(|_| {
        MessageError::InvalidAddress(format!("invalid length prefix {prefix:?}"))
    })?;
    let packed = hex_to_bytes(packed).map_err(|err| MessageError::InvalidAddress(err.to_string()))?;
    if semi_octets > packed.len() * 2 {
        return Err(MessageError::InvalidAddress(format!(
            "{semi_octets} semi-octets declared for {} packed octets",
            packed.len()
        )));
    }

    let mut septets = alphabet.unpack(&packed);
    // Seven fill bits in the final octet unpack as a spurious '@'; an odd
    // semi-octet count says that octet was only partly used.
    if packed.len() % 7 == 0 && semi_octets % 2 == 1 && septets.last() == Some(&0) {
        septets.pop();
    }
    Ok(alphabet.to_local(&septets))
}
