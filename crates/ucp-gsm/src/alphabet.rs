use tracing::trace;

/// Escape code that switches to the extension table for one septet.
pub const ESCAPE: u8 = 0x1B;

/// Septet substituted for characters the alphabet cannot represent ('?').
pub const REPLACEMENT: u8 = 0x3F;

/// Converts between local text and wire septet codes.
pub trait Transcoder {
    /// Transcode local text into wire codes (each `< 0x80`).
    fn to_wire(&self, text: &str) -> Vec<u8>;

    /// Transcode wire codes back into local text.
    fn to_local(&self, wire: &[u8]) -> String;
}

/// GSM 03.38 default alphabet with the single-shift extension table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Gsm0338;

// 0x1B is the escape slot; it never decodes through this table.
const BASIC: [char; 128] = [
    '@', '£', '$', '¥', 'è', 'é', 'ù', 'ì', 'ò', 'Ç', '\n', 'Ø', 'ø', '\r', 'Å', 'å', //
    'Δ', '_', 'Φ', 'Γ', 'Λ', 'Ω', 'Π', 'Ψ', 'Σ', 'Θ', 'Ξ', '\u{A0}', 'Æ', 'æ', 'ß', 'É', //
    ' ', '!', '"', '#', '¤', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/', //
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?', //
    '¡', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', //
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'Ä', 'Ö', 'Ñ', 'Ü', '§', //
    '¿', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', //
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'ä', 'ö', 'ñ', 'ü', 'à', //
];

const EXTENSION: [(u8, char); 10] = [
    (0x0A, '\u{0C}'),
    (0x14, '^'),
    (0x28, '{'),
    (0x29, '}'),
    (0x2F, '\\'),
    (0x3C, '['),
    (0x3D, '~'),
    (0x3E, ']'),
    (0x40, '|'),
    (0x65, '€'),
];

fn basic_code(ch: char) -> Option<u8> {
    BASIC
        .iter()
        .enumerate()
        .find(|(code, candidate)| *code != ESCAPE as usize && **candidate == ch)
        .map(|(code, _)| code as u8)
}

fn extension_code(ch: char) -> Option<u8> {
    EXTENSION
        .iter()
        .find(|(_, candidate)| *candidate == ch)
        .map(|(code, _)| *code)
}

fn extension_char(code: u8) -> Option<char> {
    EXTENSION
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, ch)| *ch)
}

impl Transcoder for Gsm0338 {
    fn to_wire(&self, text: &str) -> Vec<u8> {
        let mut wire = Vec::with_capacity(text.len());
        for ch in text.chars() {
            if let Some(code) = basic_code(ch) {
                wire.push(code);
            } else if let Some(code) = extension_code(ch) {
                wire.push(ESCAPE);
                wire.push(code);
            } else {
                trace!(?ch, "character outside GSM 03.38, substituting");
                wire.push(REPLACEMENT);
            }
        }
        wire
    }

    fn to_local(&self, wire: &[u8]) -> String {
        let mut text = String::with_capacity(wire.len());
        let mut codes = wire.iter().copied();
        while let Some(code) = codes.next() {
            if code == ESCAPE {
                // An unknown escape sequence falls back to the basic character.
                if let Some(next) = codes.next() {
                    let next = next & 0x7F;
                    text.push(extension_char(next).unwrap_or(BASIC[next as usize]));
                }
                continue;
            }
            match BASIC.get(code as usize) {
                Some(ch) => text.push(*ch),
                None => text.push(BASIC[REPLACEMENT as usize]),
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_letters_and_digits_keep_their_codes() {
        let wire = Gsm0338.to_wire("orange.pl 42");
        assert_eq!(wire, b"orange.pl 42".to_vec());
    }

    #[test]
    fn national_characters_use_basic_table() {
        assert_eq!(Gsm0338.to_wire("@£$"), vec![0x00, 0x01, 0x02]);
        assert_eq!(Gsm0338.to_wire("ÄÖÜ"), vec![0x5B, 0x5C, 0x5E]);
    }

    #[test]
    fn extension_characters_are_escaped() {
        assert_eq!(Gsm0338.to_wire("€"), vec![ESCAPE, 0x65]);
        assert_eq!(Gsm0338.to_wire("[x]"), vec![ESCAPE, 0x3C, b'x', ESCAPE, 0x3E]);
    }

    #[test]
    fn unrepresentable_characters_become_question_mark() {
        assert_eq!(Gsm0338.to_wire("漢"), vec![REPLACEMENT]);
    }

    #[test]
    fn to_local_reverses_to_wire() {
        let text = "Zażółć? no: Grüße {ok} 5€";
        let wire = Gsm0338.to_wire(text);
        // ż, ó, ł, ć are outside the alphabet and come back as '?'.
        assert_eq!(Gsm0338.to_local(&wire), "Za????? no: Grüße {ok} 5€");
    }

    #[test]
    fn unknown_escape_falls_back_to_basic_character() {
        assert_eq!(Gsm0338.to_local(&[ESCAPE, b'A']), "A");
    }

    #[test]
    fn trailing_escape_is_dropped() {
        assert_eq!(Gsm0338.to_local(&[b'a', ESCAPE]), "a");
    }

    #[test]
    fn codes_above_seven_bits_decode_as_replacement() {
        assert_eq!(Gsm0338.to_local(&[0xC1]), "?");
    }
}
