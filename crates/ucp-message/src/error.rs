use ucp_frame::FrameError;

/// Errors that can occur while building or interpreting messages.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// Frame-level error (delimiters, length, header, checksum).
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// A recognised operation carried the wrong number of fields.
    #[error("invalid command syntax: operation {operation} expects {expected} fields, found {actual}")]
    InvalidCommandSyntax {
        operation: String,
        expected: usize,
        actual: usize,
    },

    /// The operation type, role or ack/nack marker is not supported.
    #[error("unsupported operation {operation} (role {role})")]
    UnsupportedOperation { operation: String, role: String },

    /// An originator address could not be decoded.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// A field value is out of range or malformed.
    #[error("invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, MessageError>;
