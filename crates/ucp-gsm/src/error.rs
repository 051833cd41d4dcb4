/// Errors raised by the GSM alphabet helpers.
#[derive(Debug, thiserror::Error)]
pub enum GsmError {
    /// More septets were requested than the packed buffer can hold.
    #[error("{requested} septets requested but {packed} packed octets hold at most {available}")]
    InvalidSeptetCount {
        requested: usize,
        packed: usize,
        available: usize,
    },
}

pub type Result<T> = std::result::Result<T, GsmError>;
