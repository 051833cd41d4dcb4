use bytes::Bytes;
use tracing::trace;
use ucp_frame::{compose, decode_frame, next_trn, wrap, FrameConfig, Header, RawFrame, Role};
use ucp_gsm::{Alphabet, Gsm};

use crate::body::{parse_body_with, Body};
use crate::error::Result;

/// A header paired with its interpreted body.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub header: Header,
    pub body: Body,
}

impl Message {
    pub fn new(header: Header, body: Body) -> Self {
        Self { header, body }
    }

    /// A role `O` message for `operation_type`.
    pub fn operation(trn: u32, operation_type: impl Into<String>, body: Body) -> Self {
        Self::new(Header::new(trn, Role::Operation, operation_type), body)
    }

    /// A role `O` message using the body's natural operation type.
    ///
    /// Returns `None` for result bodies, which only exist as responses.
    pub fn request(trn: u32, body: Body) -> Option<Self> {
        let operation_type = body.operation_type()?;
        Some(Self::operation(trn, operation_type, body))
    }

    /// Compose the checksummed message text, without delimiters.
    pub fn compose(&self, config: &FrameConfig) -> Result<String> {
        self.compose_with(&Gsm, config)
    }

    pub fn compose_with<A: Alphabet + ?Sized>(&self, alphabet: &A, config: &FrameConfig) -> Result<String> {
        Ok(compose(&self.header, &self.body.fields_with(alphabet), config)?)
    }

    /// Compose and wrap in start/end delimiters.
    pub fn encode(&self, config: &FrameConfig) -> Result<Bytes> {
        let message = self.compose(config)?;
        Ok(wrap(&message, config)?)
    }

    /// Validate one complete frame and interpret its body.
    pub fn decode(buf: &[u8], config: &FrameConfig) -> Result<Self> {
        Self::decode_with(&Gsm, buf, config)
    }

    pub fn decode_with<A: Alphabet + ?Sized>(alphabet: &A, buf: &[u8], config: &FrameConfig) -> Result<Self> {
        let frame = decode_frame(buf, config)?;
        Self::from_frame_with(alphabet, frame, config.separator)
    }

    /// Interpret a frame already validated by the frame layer.
    pub fn from_frame(frame: RawFrame, separator: u8) -> Result<Self> {
        Self::from_frame_with(&Gsm, frame, separator)
    }

    pub fn from_frame_with<A: Alphabet + ?Sized>(
        alphabet: &A,
        frame: RawFrame,
        separator: u8,
    ) -> Result<Self> {
        let body = parse_body_with(alphabet, &frame.header, &frame.body, separator)?;
        trace!(trn = frame.header.trn, operation = %frame.header.operation_type, "interpreted frame");
        Ok(Self::new(frame.header, body))
    }
}

/// Build the result for `request`, echoing its TRN and operation type.
pub fn respond(request: &Header, body: Body) -> Message {
    Message::new(
        Header::new(request.trn, Role::Result, request.operation_type.clone()),
        body,
    )
}

/// Advance the TRN and compose a role `O` message from raw body fields.
///
/// Returns the TRN that was used together with the composed text.
pub fn create_message<S: AsRef<str>>(
    current_trn: u32,
    operation_type: &str,
    body_fields: &[S],
    config: &FrameConfig,
) -> Result<(u32, String)> {
    let trn = next_trn(current_trn);
    let header = Header::new(trn, Role::Operation, operation_type);
    let message = compose(&header, body_fields, config)?;
    Ok((trn, message))
}

#[cfg(test)]
mod tests {
    use ucp_frame::FrameError;

    use super::*;
    use crate::body::{Ack, AddressInfoRequest, Nack, SessionRequest, SubmitShortMessage};
    use crate::error::MessageError;

    fn config() -> FrameConfig {
        FrameConfig::default()
    }

    fn framed(message: &str) -> Vec<u8> {
        let mut wire = vec![0x02];
        wire.extend_from_slice(message.as_bytes());
        wire.push(0x03);
        wire
    }

    #[test]
    fn encodes_address_info_request() {
        let message = Message::request(
            1,
            Body::AddressInfoRequest(AddressInfoRequest {
                adc: "0234765439845".into(),
                pid: "0539".into(),
            }),
        )
        .unwrap();

        assert_eq!(
            message.compose(&config()).unwrap(),
            "01/00035/O/31/0234765439845/0539/A3"
        );
        assert_eq!(
            message.encode(&config()).unwrap().as_ref(),
            framed("01/00035/O/31/0234765439845/0539/A3").as_slice()
        );
    }

    #[test]
    fn encodes_login() {
        let message = Message::request(5, Body::SessionRequest(SessionRequest::login("07656765", "secret")))
            .unwrap();
        assert_eq!(
            message.compose(&config()).unwrap(),
            "05/00055/O/60/07656765/6/5/1/736563726574//0100//////88"
        );
    }

    #[test]
    fn decodes_known_results() {
        let ack = Message::decode(&framed("01/00023/R/31/A/0003/2A"), &config()).unwrap();
        assert_eq!(ack.header.trn, 1);
        assert_eq!(ack.header.role, Role::Result);
        assert_eq!(
            ack.body,
            Body::Ack(Ack {
                mvp: None,
                sm: "0003".into()
            })
        );

        let ack = Message::decode(
            &framed("02/00043/R/51/A//0612345678:090996101010/43"),
            &config(),
        )
        .unwrap();
        assert_eq!(
            ack.body,
            Body::Ack(Ack {
                mvp: Some(String::new()),
                sm: "0612345678:090996101010".into()
            })
        );

        let nack = Message::decode(&framed("02/00034/R/51/N/02/syntax error/FB"), &config()).unwrap();
        assert_eq!(
            nack.body,
            Body::Nack(Nack {
                ec: "02".into(),
                sm: "syntax error".into()
            })
        );
    }

    #[test]
    fn decode_reports_frame_errors() {
        let err = Message::decode(&framed("01/00023/R/31/A/0003/2B"), &config()).unwrap_err();
        assert!(matches!(
            err,
            MessageError::Frame(FrameError::ChecksumMismatch { .. })
        ));

        let mut wire = framed("01/00023/R/31/A/0003/2A");
        wire.push(b'x');
        let err = Message::decode(&wire, &config()).unwrap_err();
        assert!(matches!(
            err,
            MessageError::Frame(FrameError::MessageTooLong { trailing: 1 })
        ));
    }

    #[test]
    fn decode_reports_body_errors() {
        // Valid frame, unknown operation type.
        let unknown = compose(&Header::new(1, Role::Operation, "99"), &["x"], &config()).unwrap();
        let err = Message::decode(&framed(&unknown), &config()).unwrap_err();
        assert!(matches!(err, MessageError::UnsupportedOperation { .. }));

        let short = compose(&Header::new(1, Role::Operation, "51"), &["a", "b"], &config()).unwrap();
        let err = Message::decode(&framed(&short), &config()).unwrap_err();
        assert!(matches!(err, MessageError::InvalidCommandSyntax { .. }));
    }

    #[test]
    fn submit_roundtrips_through_the_wire() {
        let submit = SubmitShortMessage::text("0612345678", "orange.pl", "Hello world");
        let message = Message::request(42, Body::SubmitShortMessage(submit)).unwrap();

        let wire = message.encode(&config()).unwrap();
        let decoded = Message::decode(&wire, &config()).unwrap();

        assert_eq!(decoded.header.len, wire.len() - 2);
        assert_eq!(decoded.header.trn, 42);
        assert_eq!(decoded.body, message.body);
    }

    #[test]
    fn respond_echoes_request() {
        let request = Header::new(17, Role::Operation, "51");
        let response = respond(&request, Body::Ack(Ack::new("0612345678:090996101010")));

        assert_eq!(response.header.trn, 17);
        assert_eq!(response.header.role, Role::Result);
        assert_eq!(response.header.operation_type, "51");

        let wire = response.encode(&config()).unwrap();
        assert_eq!(Message::decode(&wire, &config()).unwrap().body, response.body);
    }

    #[test]
    fn request_requires_an_operation_body() {
        assert!(Message::request(1, Body::Nack(Nack::new("02", "syntax error"))).is_none());
    }

    #[test]
    fn create_message_advances_trn() {
        let (trn, message) = create_message(0, "31", &["0234765439845", "0539"], &config()).unwrap();
        assert_eq!(trn, 1);
        assert_eq!(message, "01/00035/O/31/0234765439845/0539/A3");

        let (trn, message) = create_message(99, "31", &["0234765439845", "0539"], &config()).unwrap();
        assert_eq!(trn, 0);
        assert!(message.starts_with("00/00035/O/31/"));
    }

    #[test]
    fn encode_rejects_headers_that_do_not_fit() {
        let body = Body::AddressInfoRequest(AddressInfoRequest {
            adc: "0234765439845".into(),
            pid: "0539".into(),
        });

        let err = Message::operation(100, "31", body.clone()).encode(&config()).unwrap_err();
        assert!(matches!(err, MessageError::Frame(FrameError::InvalidHeader(_))));

        let err = Message::operation(1, "5", body).encode(&config()).unwrap_err();
        assert!(matches!(err, MessageError::Frame(FrameError::InvalidHeader(_))));
    }

    #[test]
    fn message_serializes_to_json() {
        let message = Message::decode(&framed("01/00023/R/31/A/0003/2A"), &config()).unwrap();
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["header"]["role"], "R");
        assert_eq!(json["header"]["operation_type"], "31");
        assert_eq!(json["body"]["kind"], "ack");
        assert_eq!(json["body"]["sm"], "0003");
    }
}
