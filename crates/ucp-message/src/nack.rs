//! Result bodies and the standard UCP error codes.

use std::fmt;

use ucp_frame::FrameError;

use crate::body::{Ack, Nack};
use crate::error::MessageError;

/// Error codes carried in the `ec` field of a negative result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NackCode {
    ChecksumError = 1,
    SyntaxError = 2,
    OperationNotSupported = 3,
    OperationNotAllowed = 4,
    CallBarringActive = 5,
    AdcInvalid = 6,
    AuthenticationFailure = 7,
    LegitimisationFailure = 8,
    GaNotValid = 9,
    RepetitionNotAllowed = 10,
    RepetitionLegitimisationFailure = 11,
    PriorityCallNotAllowed = 12,
    PriorityLegitimisationFailure = 13,
    UrgentMessageNotAllowed = 14,
    UrgentLegitimisationFailure = 15,
    ReverseChargingNotAllowed = 16,
    ReverseChargingLegitimisationFailure = 17,
    DeferredDeliveryNotAllowed = 18,
    NewAcNotValid = 19,
    NewLegitimisationCodeNotValid = 20,
    StandardTextNotValid = 21,
    TimePeriodNotValid = 22,
    MessageTypeNotSupported = 23,
    MessageTooLong = 24,
}

impl NackCode {
    const ALL: [NackCode; 24] = [
        NackCode::ChecksumError,
        NackCode::SyntaxError,
        NackCode::OperationNotSupported,
        NackCode::OperationNotAllowed,
        NackCode::CallBarringActive,
        NackCode::AdcInvalid,
        NackCode::AuthenticationFailure,
        NackCode::LegitimisationFailure,
        NackCode::GaNotValid,
        NackCode::RepetitionNotAllowed,
        NackCode::RepetitionLegitimisationFailure,
        NackCode::PriorityCallNotAllowed,
        NackCode::PriorityLegitimisationFailure,
        NackCode::UrgentMessageNotAllowed,
        NackCode::UrgentLegitimisationFailure,
        NackCode::ReverseChargingNotAllowed,
        NackCode::ReverseChargingLegitimisationFailure,
        NackCode::DeferredDeliveryNotAllowed,
        NackCode::NewAcNotValid,
        NackCode::NewLegitimisationCodeNotValid,
        NackCode::StandardTextNotValid,
        NackCode::TimePeriodNotValid,
        NackCode::MessageTypeNotSupported,
        NackCode::MessageTooLong,
    ];

    /// Two-digit wire form.
    pub fn code(self) -> String {
        format!("{:02}", self as u8)
    }

    pub fn description(self) -> &'static str {
        match self {
            NackCode::ChecksumError => "checksum error",
            NackCode::SyntaxError => "syntax error",
            NackCode::OperationNotSupported => "operation not supported by system",
            NackCode::OperationNotAllowed => "operation not allowed",
            NackCode::CallBarringActive => "call barring active",
            NackCode::AdcInvalid => "AdC invalid",
            NackCode::AuthenticationFailure => "authentication failure",
            NackCode::LegitimisationFailure => "legitimisation code for all calls, failure",
            NackCode::GaNotValid => "GA not valid",
            NackCode::RepetitionNotAllowed => "repetition not allowed",
            NackCode::RepetitionLegitimisationFailure => "legitimisation code for repetition, failure",
            NackCode::PriorityCallNotAllowed => "priority call not allowed",
            NackCode::PriorityLegitimisationFailure => "legitimisation code for priority call, failure",
            NackCode::UrgentMessageNotAllowed => "urgent message not allowed",
            NackCode::UrgentLegitimisationFailure => "legitimisation code for urgent message, failure",
            NackCode::ReverseChargingNotAllowed => "reverse charging not allowed",
            NackCode::ReverseChargingLegitimisationFailure => {
                "legitimisation code for reverse charging, failure"
            }
            NackCode::DeferredDeliveryNotAllowed => "deferred delivery not allowed",
            NackCode::NewAcNotValid => "new AC not valid",
            NackCode::NewLegitimisationCodeNotValid => "new legitimisation code not valid",
            NackCode::StandardTextNotValid => "standard text not valid",
            NackCode::TimePeriodNotValid => "time period not valid",
            NackCode::MessageTypeNotSupported => "message type not supported by system",
            NackCode::MessageTooLong => "message too long",
        }
    }

    /// Look up a wire code such as `"02"`.
    pub fn from_code(code: &str) -> Option<Self> {
        let value: u8 = code.parse().ok()?;
        Self::ALL.iter().copied().find(|known| *known as u8 == value)
    }
}

impl fmt::Display for NackCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.description())
    }
}

impl Ack {
    pub fn new(sm: impl Into<String>) -> Self {
        Self {
            mvp: None,
            sm: sm.into(),
        }
    }
}

impl Nack {
    pub fn new(ec: impl Into<String>, sm: impl Into<String>) -> Self {
        Self {
            ec: ec.into(),
            sm: sm.into(),
        }
    }

    /// Negative result carrying `code` and its standard description.
    pub fn with_code(code: NackCode) -> Self {
        Self::new(code.code(), code.description())
    }

    /// The standard code this result carries, if it is one.
    pub fn code(&self) -> Option<NackCode> {
        NackCode::from_code(&self.ec)
    }
}

impl MessageError {
    /// Error code to answer a peer with when its message failed to decode.
    pub fn nack_code(&self) -> NackCode {
        match self {
            MessageError::Frame(FrameError::ChecksumMismatch { .. }) => NackCode::ChecksumError,
            MessageError::Frame(FrameError::FrameTooLarge { .. }) => NackCode::MessageTooLong,
            MessageError::UnsupportedOperation { .. } => NackCode::OperationNotSupported,
            MessageError::InvalidAddress(_) => NackCode::AdcInvalid,
            MessageError::InvalidField { field: "mt", .. } => NackCode::MessageTypeNotSupported,
            _ => NackCode::SyntaxError,
        }
    }
}
