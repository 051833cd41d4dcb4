//! Builders for session login and short message submission, and helpers for
//! concatenated (multi-part) binary messages.

use ucp_frame::hex::{bytes_to_hex, chunk, hex_to_bytes};
use ucp_gsm::{Alphabet, Gsm};

use crate::address::{is_numeric, ALPHANUMERIC_OTOA};
use crate::body::{SessionRequest, SubmitShortMessage};
use crate::error::{MessageError, Result};

/// Message type for alphanumeric text.
pub const MT_ALPHANUMERIC: &str = "3";
/// Message type for transparent data.
pub const MT_TRANSPARENT: &str = "4";

/// Protocol version sent on login.
pub const SESSION_VERSION: &str = "0100";

impl SessionRequest {
    /// Open session request for a large account.
    ///
    /// `pwd` is plain text here; it is hex-encoded when the body is rendered.
    pub fn login(oadc: impl Into<String>, pwd: impl Into<String>) -> Self {
        Self {
            oadc: oadc.into(),
            oton: "6".into(),
            onpi: "5".into(),
            styp: "1".into(),
            pwd: pwd.into(),
            vers: SESSION_VERSION.into(),
            ..Self::default()
        }
    }
}

fn sender_fields(sender: &str) -> (String, String) {
    let otoa = if is_numeric(sender) {
        String::new()
    } else {
        ALPHANUMERIC_OTOA.to_string()
    };
    (otoa, sender.to_string())
}

impl SubmitShortMessage {
    /// Alphanumeric submission using the default GSM alphabet.
    pub fn text(recipient: &str, sender: &str, text: &str) -> Self {
        Self::text_with(&Gsm, recipient, sender, text)
    }

    /// Alphanumeric submission (`mt` 3).
    ///
    /// An alphanumeric `sender` gets OTOA `5039` and is packed when the body
    /// is rendered; a numeric one is sent as-is.
    pub fn text_with<A: Alphabet + ?Sized>(alphabet: &A, recipient: &str, sender: &str, text: &str) -> Self {
        let (otoa, oadc) = sender_fields(sender);
        Self {
            adc: recipient.to_string(),
            oadc,
            otoa,
            mt: MT_ALPHANUMERIC.into(),
            msg: bytes_to_hex(&alphabet.to_wire(text)),
            ..Self::default()
        }
    }

    /// Transparent data submission (`mt` 4) with an optional `xser` block.
    pub fn binary(recipient: &str, sender: &str, payload: &[u8], xser: &str) -> Self {
        let (otoa, oadc) = sender_fields(sender);
        Self {
            adc: recipient.to_string(),
            oadc,
            otoa,
            mt: MT_TRANSPARENT.into(),
            nb: (payload.len() * 8).to_string(),
            msg: bytes_to_hex(payload),
            xser: xser.to_string(),
            ..Self::default()
        }
    }

    /// Decoded text of an alphanumeric message.
    pub fn text_content(&self) -> Result<String> {
        self.text_content_with(&Gsm)
    }

    pub fn text_content_with<A: Alphabet + ?Sized>(&self, alphabet: &A) -> Result<String> {
        if self.mt != MT_ALPHANUMERIC {
            return Err(MessageError::InvalidField {
                field: "mt",
                reason: format!("expected {MT_ALPHANUMERIC}, found {:?}", self.mt),
            });
        }
        Ok(alphabet.to_local(&self.msg_bytes()?))
    }

    /// Payload of a transparent data message.
    pub fn binary_content(&self) -> Result<Vec<u8>> {
        if self.mt != MT_TRANSPARENT {
            return Err(MessageError::InvalidField {
                field: "mt",
                reason: format!("expected {MT_TRANSPARENT}, found {:?}", self.mt),
            });
        }
        self.msg_bytes()
    }

    fn msg_bytes(&self) -> Result<Vec<u8>> {
        hex_to_bytes(&self.msg).map_err(|err| MessageError::InvalidField {
            field: "msg",
            reason: err.to_string(),
        })
    }
}

/// `xser` block carrying a GSM user data header with an 8-bit concatenation
/// reference: service type `01`, length `06`, then `05 00 03 ref total seq`.
pub fn concat_user_data_header(reference: u8, total: u8, sequence: u8) -> String {
    format!("0106050003{reference:02X}{total:02X}{sequence:02X}")
}

/// Split `payload` into binary submissions of at most `max_part` bytes.
///
/// Every part copies `template` (addresses, options) and replaces its message
/// fields. A payload that fits in one part is sent without a concatenation
/// header; otherwise parts are numbered from 1 under `reference`.
pub fn split_for_concatenation(
    template: &SubmitShortMessage,
    reference: u8,
    payload: &[u8],
    max_part: usize,
) -> Result<Vec<SubmitShortMessage>> {
    let parts = chunk(payload, max_part);
    if parts.len() == 1 {
        return Ok(vec![with_payload(template, payload, &template.xser)]);
    }

    let total = u8::try_from(parts.len()).map_err(|_| MessageError::InvalidField {
        field: "msg",
        reason: format!("{} parts exceed the concatenation limit of 255", parts.len()),
    })?;
    Ok(parts
        .into_iter()
        .zip(1..=total)
        .map(|(part, sequence)| {
            with_payload(template, part, &concat_user_data_header(reference, total, sequence))
        })
        .collect())
}

fn with_payload(template: &SubmitShortMessage, payload: &[u8], xser: &str) -> SubmitShortMessage {
    SubmitShortMessage {
        mt: MT_TRANSPARENT.into(),
        nb: (payload.len() * 8).to_string(),
        msg: bytes_to_hex(payload),
        xser: xser.to_string(),
        ..template.clone()
    }
}
