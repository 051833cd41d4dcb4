//! `tokio_util` codec over delimited frames (requires the `async` feature).

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::codec::{decode_frame, next_frame, wrap, FrameConfig, RawFrame};
use crate::error::FrameError;

/// Splits a byte stream into validated frames and wraps outgoing messages.
///
/// Encodes already composed messages (see [`compose`](crate::compose)).
#[derive(Debug, Clone, Default)]
pub struct UcpCodec {
    config: FrameConfig,
}

impl UcpCodec {
    /// Create a codec with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with explicit configuration.
    pub fn with_config(config: FrameConfig) -> Self {
        Self { config }
    }

    /// Current codec configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

impl Decoder for UcpCodec {
    type Item = RawFrame;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match next_frame(src, &self.config)? {
            Some(raw) => decode_frame(&raw, &self.config).map(Some),
            None => Ok(None),
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(frame) => Ok(Some(frame)),
            None if src.is_empty() => Ok(None),
            None => {
                src.clear();
                Err(FrameError::ConnectionClosed)
            }
        }
    }
}

impl Encoder<String> for UcpCodec {
    type Error = FrameError;

    fn encode(&mut self, message: String, dst: &mut BytesMut) -> Result<(), Self::Error> {
        Encoder::<&str>::encode(self, message.as_str(), dst)
    }
}

impl Encoder<&str> for UcpCodec {
    type Error = FrameError;

    fn encode(&mut self, message: &str, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let wire = wrap(message, &self.config)?;
        dst.extend_from_slice(&wire);
        Ok(())
    }
}
