/// Errors that can occur during frame composition and parsing.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The frame is structurally malformed (delimiters, length or layout).
    #[error("invalid message")]
    InvalidMessage,

    /// Bytes follow the end delimiter of an otherwise complete frame.
    #[error("message too long ({trailing} bytes after end delimiter)")]
    MessageTooLong { trailing: usize },

    /// The header does not split into trn/len/role/operation.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// The received checksum does not match the recomputed one.
    #[error("checksum mismatch (expected {expected}, received {actual})")]
    ChecksumMismatch { expected: String, actual: String },

    /// A character cannot be carried in a single wire byte.
    #[error("character {0:?} cannot be encoded on the wire")]
    UnencodableChar(char),

    /// The frame exceeds the configured or representable size.
    #[error("frame too large ({size} bytes, max {max})")]
    FrameTooLarge { size: usize, max: usize },

    /// A hex string is malformed.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// A semi-octet string is malformed.
    #[error("invalid semi-octets: {0}")]
    InvalidSemiOctets(String),

    /// A sequence counter is not a decimal number.
    #[error("invalid counter value: {0:?}")]
    InvalidCounter(String),

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream was closed before a complete frame was received.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
