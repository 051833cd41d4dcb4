use std::fmt;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::checksum;
use crate::counter::SequenceRange;
use crate::error::{FrameError, Result};

/// Start-of-frame delimiter.
pub const STX: u8 = 0x02;

/// End-of-frame delimiter.
pub const ETX: u8 = 0x03;

/// Field separator.
pub const SEPARATOR: u8 = b'/';

/// Header size: trn (2) + len (5) + role (1) + operation type (2) + 3 separators.
pub const HEADER_LEN: usize = 13;

/// Checksum size: two hex digits.
pub const CHECKSUM_LEN: usize = 2;

/// Largest value the five-digit length field can carry.
pub const MAX_LEN: usize = 99_999;

/// Default cap on buffered bytes while searching for an end delimiter.
pub const DEFAULT_MAX_FRAME_SIZE: usize = MAX_LEN + 2;

/// Whether a message is an operation or the result of one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// `O`: a request.
    Operation,
    /// `R`: a response (ack or nack).
    Result,
    /// Anything else seen on the wire.
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Operation => "O",
            Role::Result => "R",
            Role::Other(other) => other,
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value {
            "O" => Role::Operation,
            "R" => Role::Result,
            other => Role::Other(other.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::from(value.as_str())
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed-width message header: `TRN/LEN/R/OT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Transaction reference number (two digits on the wire).
    pub trn: u32,
    /// Declared length from the first header byte through the checksum.
    pub len: usize,
    pub role: Role,
    /// Two-digit operation type, e.g. `"51"`.
    pub operation_type: String,
}

impl Header {
    /// Create a header; `len` is filled in by [`compose`], which also rejects
    /// a `trn` above 99, a role other than one character and an operation
    /// type other than two digits.
    pub fn new(trn: u32, role: Role, operation_type: impl Into<String>) -> Self {
        Self {
            trn,
            len: 0,
            role,
            operation_type: operation_type.into(),
        }
    }

    /// Header fields in wire order.
    pub fn fields(&self) -> [String; 4] {
        [
            format!("{:02}", self.trn),
            format!("{:05}", self.len),
            self.role.as_str().to_string(),
            self.operation_type.clone(),
        ]
    }

    /// Parse the header region of a frame.
    pub fn parse(text: &str, separator: u8) -> Result<Self> {
        let fields = split_fields(text, separator);
        let [trn, len, role, operation_type] = fields.as_slice() else {
            return Err(FrameError::InvalidHeader(format!(
                "expected 4 fields, found {}",
                fields.len()
            )));
        };

        let trn = parse_decimal(trn)
            .ok_or_else(|| FrameError::InvalidHeader(format!("non-numeric trn {trn:?}")))?;
        let len = parse_decimal(len)
            .ok_or_else(|| FrameError::InvalidHeader(format!("non-numeric len {len:?}")))?;

        Ok(Self {
            trn: trn as u32,
            len,
            role: Role::from(*role),
            operation_type: (*operation_type).to_string(),
        })
    }
}

fn parse_decimal(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Protocol constants the codec works with.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Start delimiter byte. Default: 0x02.
    pub stx: u8,
    /// End delimiter byte. Default: 0x03.
    pub etx: u8,
    /// Field separator byte. Default: `/`.
    pub separator: u8,
    /// Header region length in bytes. Default: 13.
    pub header_len: usize,
    /// Checksum length in bytes. Default: 2.
    pub checksum_len: usize,
    /// Maximum bytes buffered while waiting for an end delimiter.
    pub max_frame_size: usize,
    /// Recompute and compare the checksum of received frames.
    pub verify_checksum: bool,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            stx: STX,
            etx: ETX,
            separator: SEPARATOR,
            header_len: HEADER_LEN,
            checksum_len: CHECKSUM_LEN,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            verify_checksum: true,
        }
    }
}

/// Split on the separator; `n` separators always yield `n + 1` fields.
pub fn split_fields(text: &str, separator: u8) -> Vec<&str> {
    text.split(separator as char).collect()
}

fn check_field(field: &str, config: &FrameConfig) -> Result<()> {
    match field.chars().find(|ch| {
        u32::from(*ch) > 0xFF
            || *ch == config.separator as char
            || *ch == config.stx as char
            || *ch == config.etx as char
    }) {
        Some(ch) => Err(FrameError::UnencodableChar(ch)),
        None => Ok(()),
    }
}

fn check_header(header: &Header, config: &FrameConfig) -> Result<()> {
    if header.trn > SequenceRange::TRN.max {
        return Err(FrameError::InvalidHeader(format!(
            "trn {} does not fit two digits",
            header.trn
        )));
    }
    let role = header.role.as_str();
    if role.chars().count() != 1 {
        return Err(FrameError::InvalidHeader(format!("role {role:?} is not one character")));
    }
    check_field(role, config)?;
    let operation_type = &header.operation_type;
    if operation_type.len() != 2 || !operation_type.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FrameError::InvalidHeader(format!(
            "operation type {operation_type:?} is not two digits"
        )));
    }
    Ok(())
}

/// Compose `header` and `body_fields` into a checksummed message.
///
/// The header's `len` is recomputed; the result carries no delimiters (see
/// [`wrap`]).
pub fn compose<S: AsRef<str>>(
    header: &Header,
    body_fields: &[S],
    config: &FrameConfig,
) -> Result<String> {
    let separator = (config.separator as char).to_string();
    let separator = separator.as_str();
    let mut body = Vec::with_capacity(body_fields.len());
    for field in body_fields {
        let field = field.as_ref();
        check_field(field, config)?;
        body.push(field);
    }
    let body = body.join(separator);

    check_header(header, config)?;
    let mut header = header.clone();
    header.len = 0;

    let provisional = format!("{}{separator}{body}", header.fields().join(separator));
    let len = provisional.chars().count() + 1 + config.checksum_len;
    if len > MAX_LEN {
        return Err(FrameError::FrameTooLarge {
            size: len,
            max: MAX_LEN,
        });
    }
    header.len = len;

    let mut message = format!(
        "{}{separator}{body}{separator}",
        header.fields().join(separator)
    );
    let sum = checksum::checksum(&message);
    message.push_str(&sum);
    trace!(%message, "composed message");
    Ok(message)
}

/// Surround a composed message with the start and end delimiters.
pub fn wrap(message: &str, config: &FrameConfig) -> Result<Bytes> {
    let mut dst = BytesMut::with_capacity(message.len() + 2);
    dst.put_u8(config.stx);
    for ch in message.chars() {
        let byte = u8::try_from(u32::from(ch)).map_err(|_| FrameError::UnencodableChar(ch))?;
        dst.put_u8(byte);
    }
    dst.put_u8(config.etx);
    Ok(dst.freeze())
}

/// A structurally valid frame whose body has not been interpreted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pub header: Header,
    /// Body text between the separators that follow the header and precede
    /// the checksum.
    pub body: String,
    pub checksum: String,
}

impl RawFrame {
    /// Body split into fields.
    pub fn body_fields(&self, separator: u8) -> Vec<&str> {
        split_fields(&self.body, separator)
    }
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| char::from(*byte)).collect()
}

fn reject(reason: &'static str) -> FrameError {
    debug!(reason, "rejecting frame");
    FrameError::InvalidMessage
}

/// Validate and slice exactly one delimited frame.
///
/// The declared length must carve the buffer into header, body and checksum
/// with nothing left over; a frame that only starts correctly is rejected.
pub fn decode_frame(buf: &[u8], config: &FrameConfig) -> Result<RawFrame> {
    let header_end = 1 + config.header_len;
    if buf.len() < header_end || buf[0] != config.stx {
        return Err(reject("missing start delimiter or header"));
    }

    let rest = &buf[header_end..];
    let etx_at = rest
        .iter()
        .position(|byte| *byte == config.etx)
        .ok_or_else(|| reject("missing end delimiter"))?;
    let trailing = rest.len() - etx_at - 1;
    if trailing > 0 {
        debug!(trailing, "rejecting frame with trailing bytes");
        return Err(FrameError::MessageTooLong { trailing });
    }

    let header = Header::parse(&latin1(&buf[1..header_end]), config.separator)?;

    let body_len = header
        .len
        .checked_sub(config.header_len + config.checksum_len + 2)
        .ok_or_else(|| reject("declared length shorter than fixed fields"))?;
    let body_start = header_end + 1;
    let body_end = body_start + body_len;
    let expected_total = body_end + 1 + config.checksum_len + 1;
    if buf.len() != expected_total {
        debug!(
            declared = header.len,
            actual = buf.len().saturating_sub(2),
            "rejecting frame with inconsistent length"
        );
        return Err(FrameError::InvalidMessage);
    }
    if buf[header_end] != config.separator || buf[body_end] != config.separator {
        return Err(reject("separator missing around body"));
    }

    let checksum_start = body_end + 1;
    let received = latin1(&buf[checksum_start..checksum_start + config.checksum_len]);
    if config.verify_checksum {
        let message = latin1(&buf[1..checksum_start]);
        if !checksum::matches(&message, &received) {
            let expected = checksum::checksum(&message);
            debug!(%expected, %received, "rejecting frame with bad checksum");
            return Err(FrameError::ChecksumMismatch {
                expected,
                actual: received,
            });
        }
    }

    let frame = RawFrame {
        header,
        body: latin1(&buf[body_start..body_end]),
        checksum: received,
    };
    trace!(?frame, "decoded frame");
    Ok(frame)
}

/// Take the next delimited frame off the front of a stream buffer.
///
/// Bytes before a start delimiter are discarded. Returns `Ok(None)` until an
/// end delimiter arrives. The returned slice still has to go through
/// [`decode_frame`].
pub fn next_frame(src: &mut BytesMut, config: &FrameConfig) -> Result<Option<BytesMut>> {
    match src.iter().position(|byte| *byte == config.stx) {
        None => {
            if !src.is_empty() {
                debug!(discarded = src.len(), "discarding bytes outside a frame");
                src.clear();
            }
            return Ok(None);
        }
        Some(0) => {}
        Some(start) => {
            debug!(discarded = start, "discarding bytes before start delimiter");
            src.advance(start);
        }
    }

    let Some(end) = src.iter().position(|byte| *byte == config.etx) else {
        if src.len() > config.max_frame_size {
            let size = src.len();
            src.clear();
            return Err(FrameError::FrameTooLarge {
                size,
                max: config.max_frame_size,
            });
        }
        return Ok(None); // Need more data
    };

    // A later start delimiter means the earlier frame was cut short.
    if let Some(restart) = src[1..end].iter().rposition(|byte| *byte == config.stx) {
        debug!(
            discarded = restart + 1,
            "discarding truncated frame before start delimiter"
        );
        src.advance(restart + 1);
        return Ok(Some(src.split_to(end - restart)));
    }

    Ok(Some(src.split_to(end + 1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> FrameConfig {
        FrameConfig::default()
    }

    fn framed(message: &str) -> Vec<u8> {
        wrap(message, &config()).unwrap().to_vec()
    }

    #[test]
    fn split_keeps_empty_fields() {
        assert_eq!(split_fields("ABC/DEF/GHI", SEPARATOR), vec!["ABC", "DEF", "GHI"]);
        assert_eq!(split_fields("///", SEPARATOR), vec!["", "", "", ""]);
        assert_eq!(split_fields("", SEPARATOR), vec![""]);
    }

    #[test]
    fn compose_fills_length_and_checksum() {
        let header = Header::new(1, Role::Operation, "31");
        let message = compose(&header, &["0234765439845", "0539"], &config()).unwrap();
        assert_eq!(message, "01/00035/O/31/0234765439845/0539/A3");
    }

    #[test]
    fn compose_response_with_empty_field() {
        let header = Header::new(2, Role::Result, "51");
        let message = compose(&header, &["A", "", "0612345678:090996101010"], &config()).unwrap();
        assert_eq!(message, "02/00043/R/51/A//0612345678:090996101010/43");
    }

    #[test]
    fn compose_ignores_stale_length() {
        let mut header = Header::new(1, Role::Result, "31");
        header.len = 12345;
        let message = compose(&header, &["A", "0003"], &config()).unwrap();
        assert_eq!(message, "01/00023/R/31/A/0003/2A");
    }

    #[test]
    fn compose_rejects_separator_inside_field() {
        let header = Header::new(1, Role::Operation, "31");
        let err = compose(&header, &["a/b", "0539"], &config()).unwrap_err();
        assert!(matches!(err, FrameError::UnencodableChar('/')));
    }

    #[test]
    fn compose_rejects_wide_characters() {
        let header = Header::new(1, Role::Operation, "31");
        let err = compose(&header, &["€"], &config()).unwrap_err();
        assert!(matches!(err, FrameError::UnencodableChar('€')));
    }

    #[test]
    fn compose_rejects_oversized_message() {
        let header = Header::new(1, Role::Operation, "51");
        let big = "A".repeat(MAX_LEN);
        let err = compose(&header, &[big.as_str()], &config()).unwrap_err();
        assert!(matches!(err, FrameError::FrameTooLarge { .. }));
    }

    #[test]
    fn compose_rejects_three_digit_trn() {
        let header = Header::new(100, Role::Operation, "31");
        let err = compose(&header, &["0234765439845", "0539"], &config()).unwrap_err();
        assert!(matches!(err, FrameError::InvalidHeader(_)));

        let header = Header::new(99, Role::Operation, "31");
        let message = compose(&header, &["0234765439845", "0539"], &config()).unwrap();
        assert_eq!(decode_frame(&framed(&message), &config()).unwrap().header.trn, 99);
    }

    #[test]
    fn compose_rejects_wide_role() {
        let header = Header::new(1, Role::Other("OR".into()), "31");
        let err = compose(&header, &["A", "0003"], &config()).unwrap_err();
        assert!(matches!(err, FrameError::InvalidHeader(_)));

        let header = Header::new(1, Role::Other(String::new()), "31");
        let err = compose(&header, &["A", "0003"], &config()).unwrap_err();
        assert!(matches!(err, FrameError::InvalidHeader(_)));
    }

    #[test]
    fn compose_rejects_malformed_operation_type() {
        for operation_type in ["5", "511", "5A", "", "٥١"] {
            let header = Header::new(1, Role::Operation, operation_type);
            let err = compose(&header, &["x"], &config()).unwrap_err();
            assert!(
                matches!(err, FrameError::InvalidHeader(_)),
                "{operation_type:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn wrap_adds_delimiters_only() {
        let bytes = wrap("01/00023/R/31/A/0003/2A", &config()).unwrap();
        assert_eq!(bytes.first(), Some(&STX));
        assert_eq!(bytes.last(), Some(&ETX));
        assert_eq!(&bytes[1..bytes.len() - 1], b"01/00023/R/31/A/0003/2A");
    }

    #[test]
    fn composed_frames_decode() {
        let header = Header::new(7, Role::Operation, "51");
        let fields = ["0612345678", "", "x y z"];
        let message = compose(&header, &fields, &config()).unwrap();
        let frame = decode_frame(&framed(&message), &config()).unwrap();

        assert_eq!(frame.header.trn, 7);
        assert_eq!(frame.header.role, Role::Operation);
        assert_eq!(frame.header.operation_type, "51");
        assert_eq!(frame.header.len, message.len());
        assert_eq!(frame.body_fields(SEPARATOR), fields.to_vec());
    }

    #[test]
    fn decode_known_frame() {
        let frame = decode_frame(&framed("01/00035/O/31/0234765439845/0539/A3"), &config()).unwrap();
        assert_eq!(frame.body, "0234765439845/0539");
        assert_eq!(frame.checksum, "A3");
    }

    #[test]
    fn decode_rejects_missing_start_delimiter() {
        let err = decode_frame(b"01/00023/R/31/A/0003/2A\x03", &config()).unwrap_err();
        assert!(matches!(err, FrameError::InvalidMessage));
    }

    #[test]
    fn decode_rejects_short_buffer() {
        let err = decode_frame(b"\x0201/00023/R", &config()).unwrap_err();
        assert!(matches!(err, FrameError::InvalidMessage));
    }

    #[test]
    fn decode_rejects_missing_end_delimiter() {
        let err = decode_frame(b"\x0201/00023/R/31/A/0003/2A", &config()).unwrap_err();
        assert!(matches!(err, FrameError::InvalidMessage));
    }

    #[test]
    fn decode_rejects_trailing_bytes() {
        let mut wire = framed("01/00023/R/31/A/0003/2A");
        wire.extend_from_slice(b"xy");
        let err = decode_frame(&wire, &config()).unwrap_err();
        assert!(matches!(err, FrameError::MessageTooLong { trailing: 2 }));
    }

    #[test]
    fn decode_rejects_bad_header_field_count() {
        let err = decode_frame(&framed("01/00023/R-31/A/0003/2A"), &config()).unwrap_err();
        assert!(matches!(err, FrameError::InvalidHeader(_)));
    }

    #[test]
    fn decode_rejects_non_numeric_length() {
        let err = decode_frame(&framed("01/0002x/R/31/A/0003/2A"), &config()).unwrap_err();
        assert!(matches!(err, FrameError::InvalidHeader(_)));
    }

    #[test]
    fn decode_rejects_length_mismatch() {
        // Declared 24, actual 23.
        let err = decode_frame(&framed("01/00024/R/31/A/0003/2B"), &config()).unwrap_err();
        assert!(matches!(err, FrameError::InvalidMessage));
    }

    #[test]
    fn decode_rejects_length_below_fixed_fields() {
        let err = decode_frame(&framed("01/00010/R/31/A/0003/2A"), &config()).unwrap_err();
        assert!(matches!(err, FrameError::InvalidMessage));
    }

    #[test]
    fn decode_rejects_misplaced_checksum() {
        // Right length, but the last separator sits inside the checksum slot.
        let err = decode_frame(&framed("01/00023/R/31/A/00032/A"), &config()).unwrap_err();
        assert!(matches!(err, FrameError::InvalidMessage));
    }

    #[test]
    fn decode_verifies_checksum() {
        let err = decode_frame(&framed("01/00023/R/31/A/0003/2B"), &config()).unwrap_err();
        assert!(matches!(
            err,
            FrameError::ChecksumMismatch { ref expected, ref actual }
                if expected == "2A" && actual == "2B"
        ));
    }

    #[test]
    fn decode_can_skip_checksum_verification() {
        let cfg = FrameConfig {
            verify_checksum: false,
            ..FrameConfig::default()
        };
        let frame = decode_frame(&framed("01/00023/R/31/A/0003/2B"), &cfg).unwrap();
        assert_eq!(frame.checksum, "2B");
    }

    #[test]
    fn decode_accepts_lowercase_checksum() {
        assert!(decode_frame(&framed("01/00023/R/31/A/0003/2a"), &config()).is_ok());
    }

    #[test]
    fn unknown_role_is_preserved() {
        let message = compose(
            &Header::new(3, Role::Other("X".into()), "31"),
            &["A", "x"],
            &config(),
        )
        .unwrap();
        let frame = decode_frame(&framed(&message), &config()).unwrap();
        assert_eq!(frame.header.role, Role::Other("X".into()));
    }

    #[test]
    fn next_frame_waits_for_end_delimiter() {
        let mut src = BytesMut::from(&b"\x0201/00023/R/31"[..]);
        assert!(next_frame(&mut src, &config()).unwrap().is_none());
        assert_eq!(src.len(), 14);
    }

    #[test]
    fn next_frame_skips_garbage() {
        let mut src = BytesMut::new();
        src.extend_from_slice(b"noise");
        src.extend_from_slice(&framed("01/00023/R/31/A/0003/2A"));
        src.extend_from_slice(b"\x02partial");

        let frame = next_frame(&mut src, &config()).unwrap().unwrap();
        assert!(decode_frame(&frame, &config()).is_ok());
        assert_eq!(&src[..], b"\x02partial");
    }

    #[test]
    fn next_frame_drops_truncated_frame() {
        let mut src = BytesMut::from(&b"\x0201/000"[..]);
        src.extend_from_slice(&framed("01/00023/R/31/A/0003/2A"));

        let frame = next_frame(&mut src, &config()).unwrap().unwrap();
        assert_eq!(frame.to_vec(), framed("01/00023/R/31/A/0003/2A"));
        assert!(src.is_empty());
    }

    #[test]
    fn next_frame_discards_bytes_without_start() {
        let mut src = BytesMut::from(&b"garbage"[..]);
        assert!(next_frame(&mut src, &config()).unwrap().is_none());
        assert!(src.is_empty());
    }

    #[test]
    fn next_frame_limits_buffered_bytes() {
        let cfg = FrameConfig {
            max_frame_size: 8,
            ..FrameConfig::default()
        };
        let mut src = BytesMut::from(&b"\x020123456789"[..]);
        let err = next_frame(&mut src, &cfg).unwrap_err();
        assert!(matches!(err, FrameError::FrameTooLarge { size: 11, max: 8 }));
        assert!(src.is_empty());
    }

    #[test]
    fn role_roundtrips_through_strings() {
        assert_eq!(Role::from("O"), Role::Operation);
        assert_eq!(Role::from("R"), Role::Result);
        assert_eq!(String::from(Role::Other("Z".into())), "Z");
        assert_eq!(Role::Result.to_string(), "R");
    }
}
