//! Operation bodies and the dispatcher that picks a schema by header.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ucp_frame::hex::{bytes_to_hex, hex_to_bytes};
use ucp_frame::{split_fields, Header, Role, SEPARATOR};
use ucp_gsm::{Alphabet, Gsm};

use crate::address::{decode_sender_with, encode_alphanumeric, ALPHANUMERIC_OTOA};
use crate::error::{MessageError, Result};

/// Address information request.
pub const ADDRESS_INFO: &str = "31";
/// Submit short message.
pub const SUBMIT_SHORT_MESSAGE: &str = "51";
/// Delivery short message.
pub const DELIVER_SHORT_MESSAGE: &str = "52";
/// Delivery notification.
pub const DELIVER_NOTIFICATION: &str = "53";
/// Session management.
pub const SESSION_MANAGEMENT: &str = "60";

/// Positive result marker.
pub const ACK: &str = "A";
/// Negative result marker.
pub const NACK: &str = "N";

// Declares a flat, all-string record whose field order is its wire order.
macro_rules! ucp_record {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$field_meta:meta])* $field:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            $($(#[$field_meta])* pub $field: String,)+
        }

        impl $name {
            /// Number of fields on the wire.
            pub const FIELD_COUNT: usize = [$(stringify!($field)),+].len();

            fn from_wire(fields: &[&str]) -> Self {
                let mut fields = fields.iter().map(|field| field.to_string());
                Self {
                    $($field: fields.next().unwrap_or_default(),)+
                }
            }

            fn to_wire(&self) -> Vec<String> {
                vec![$(self.$field.clone()),+]
            }
        }
    };
}

ucp_record! {
    /// Operation 31: ask the SMSC about an address.
    AddressInfoRequest {
        /// Address code of the queried recipient.
        adc,
        /// Protocol identifier.
        pid,
    }
}

ucp_record! {
    /// Operation 60: open a session (login) or change password.
    SessionRequest {
        /// Originator address (the account).
        oadc,
        oton,
        onpi,
        /// Session type; `1` opens a session.
        styp,
        /// Password, IA5 hex-encoded on the wire.
        pwd,
        /// New password, IA5 hex-encoded on the wire.
        npwd,
        vers,
        ladc,
        lton,
        lnpi,
        opid,
        res1,
    }
}

ucp_record! {
    /// Operations 51, 52 and 53 share this layout.
    SubmitShortMessage {
        /// Recipient address.
        adc,
        /// Originator address; plain text when `otoa` is `5039`.
        oadc,
        ac,
        nrq,
        nadc,
        nt,
        npid,
        lrq,
        lrad,
        lpid,
        dd,
        ddt,
        vp,
        rpid,
        scts,
        dst,
        rsn,
        dscts,
        /// Message type: `2` numeric, `3` alphanumeric, `4` transparent data.
        mt,
        /// Bit count of transparent data.
        nb,
        /// Message content, hex-encoded for `mt` 3 and 4.
        msg,
        mms,
        pr,
        dcs,
        mcls,
        rpi,
        cpg,
        rply,
        otoa,
        hplmn,
        xser,
        res4,
        res5,
    }
}

/// Positive result, with an optional modified validity period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mvp: Option<String>,
    /// System message.
    pub sm: String,
}

/// Negative result with an error code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nack {
    /// Two-digit error code.
    pub ec: String,
    /// System message.
    pub sm: String,
}

/// Every body the codec understands, keyed by operation type and role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Body {
    AddressInfoRequest(AddressInfoRequest),
    SessionRequest(SessionRequest),
    SubmitShortMessage(SubmitShortMessage),
    Ack(Ack),
    Nack(Nack),
}

impl Body {
    /// Role a header carrying this body should have.
    pub fn role(&self) -> Role {
        match self {
            Body::Ack(_) | Body::Nack(_) => Role::Result,
            _ => Role::Operation,
        }
    }

    /// Natural operation type for request bodies; results echo their request.
    pub fn operation_type(&self) -> Option<&'static str> {
        match self {
            Body::AddressInfoRequest(_) => Some(ADDRESS_INFO),
            Body::SessionRequest(_) => Some(SESSION_MANAGEMENT),
            Body::SubmitShortMessage(_) => Some(SUBMIT_SHORT_MESSAGE),
            Body::Ack(_) | Body::Nack(_) => None,
        }
    }

    /// Wire fields using the default GSM alphabet.
    pub fn fields(&self) -> Vec<String> {
        self.fields_with(&Gsm)
    }

    /// Wire fields in schema order.
    pub fn fields_with<A: Alphabet + ?Sized>(&self, alphabet: &A) -> Vec<String> {
        match self {
            Body::AddressInfoRequest(request) => request.to_wire(),
            Body::SessionRequest(request) => {
                let mut wire = request.clone();
                wire.pwd = encode_ia5(alphabet, &request.pwd);
                wire.npwd = encode_ia5(alphabet, &request.npwd);
                wire.to_wire()
            }
            Body::SubmitShortMessage(submit) => {
                if submit.otoa == ALPHANUMERIC_OTOA {
                    let mut wire = submit.clone();
                    wire.oadc = encode_alphanumeric(alphabet, &submit.oadc);
                    wire.to_wire()
                } else {
                    submit.to_wire()
                }
            }
            Body::Ack(ack) => {
                let mut fields = vec![ACK.to_string()];
                fields.extend(ack.mvp.clone());
                fields.push(ack.sm.clone());
                fields
            }
            Body::Nack(nack) => vec![NACK.to_string(), nack.ec.clone(), nack.sm.clone()],
        }
    }
}

fn encode_ia5<A: Alphabet + ?Sized>(alphabet: &A, text: &str) -> String {
    bytes_to_hex(&alphabet.to_wire(text))
}

fn decode_ia5<A: Alphabet + ?Sized>(alphabet: &A, field: &'static str, hex: &str) -> Result<String> {
    let wire = hex_to_bytes(hex).map_err(|err| MessageError::InvalidField {
        field,
        reason: err.to_string(),
    })?;
    Ok(alphabet.to_local(&wire))
}

fn unsupported(header: &Header) -> MessageError {
    debug!(
        operation = %header.operation_type,
        role = %header.role,
        "unsupported operation"
    );
    MessageError::UnsupportedOperation {
        operation: header.operation_type.clone(),
        role: header.role.to_string(),
    }
}

fn expect_fields(header: &Header, fields: &[&str], expected: usize) -> Result<()> {
    if fields.len() != expected {
        debug!(
            operation = %header.operation_type,
            expected,
            actual = fields.len(),
            "invalid command syntax"
        );
        return Err(MessageError::InvalidCommandSyntax {
            operation: header.operation_type.clone(),
            expected,
            actual: fields.len(),
        });
    }
    Ok(())
}

/// Parse a body with the default separator and GSM alphabet.
pub fn parse_body(header: &Header, body: &str) -> Result<Body> {
    parse_body_with(&Gsm, header, body, SEPARATOR)
}

/// Parse a body according to the header's operation type and role.
pub fn parse_body_with<A: Alphabet + ?Sized>(
    alphabet: &A,
    header: &Header,
    body: &str,
    separator: u8,
) -> Result<Body> {
    let fields = split_fields(body, separator);
    match &header.role {
        Role::Operation => match header.operation_type.as_str() {
            ADDRESS_INFO => {
                expect_fields(header, &fields, AddressInfoRequest::FIELD_COUNT)?;
                Ok(Body::AddressInfoRequest(AddressInfoRequest::from_wire(&fields)))
            }
            SESSION_MANAGEMENT => {
                expect_fields(header, &fields, SessionRequest::FIELD_COUNT)?;
                let mut request = SessionRequest::from_wire(&fields);
                request.pwd = decode_ia5(alphabet, "pwd", &request.pwd)?;
                request.npwd = decode_ia5(alphabet, "npwd", &request.npwd)?;
                Ok(Body::SessionRequest(request))
            }
            SUBMIT_SHORT_MESSAGE | DELIVER_SHORT_MESSAGE | DELIVER_NOTIFICATION => {
                expect_fields(header, &fields, SubmitShortMessage::FIELD_COUNT)?;
                let mut submit = SubmitShortMessage::from_wire(&fields);
                submit.oadc = decode_sender_with(alphabet, &submit.otoa, &submit.oadc)?;
                Ok(Body::SubmitShortMessage(submit))
            }
            _ => Err(unsupported(header)),
        },
        Role::Result => match fields.as_slice() {
            [ACK, sm] => Ok(Body::Ack(Ack {
                mvp: None,
                sm: sm.to_string(),
            })),
            [ACK, mvp, sm] => Ok(Body::Ack(Ack {
                mvp: Some(mvp.to_string()),
                sm: sm.to_string(),
            })),
            [NACK, ec, sm] => Ok(Body::Nack(Nack {
                ec: ec.to_string(),
                sm: sm.to_string(),
            })),
            _ => Err(unsupported(header)),
        },
        Role::Other(_) => Err(unsupported(header)),
    }
}
