//! UCP/EMI frame layer.
//!
//! Every message travels as:
//!
//! ```text
//! STX  TRN/LEN/O|R/OT  /  BODY  /  CHECKSUM  ETX
//! 0x02 (13 bytes)         (...)    (2 hex)   0x03
//! ```
//!
//! `LEN` counts everything from the first header byte through the checksum,
//! and the checksum is the byte sum of header and body (with both trailing
//! separators) modulo 256. This crate composes and validates that layout and
//! provides the hex, semi-octet and counter helpers the message layer builds
//! on. Body fields are interpreted by `ucp-message`.

pub mod checksum;
pub mod codec;
pub mod counter;
pub mod error;
pub mod hex;
pub mod reader;
pub mod semi_octet;
pub mod writer;

#[cfg(feature = "async")]
pub mod tokio_codec;

pub use codec::{
    compose, decode_frame, next_frame, split_fields, wrap, FrameConfig, Header, RawFrame, Role,
    CHECKSUM_LEN, DEFAULT_MAX_FRAME_SIZE, ETX, HEADER_LEN, MAX_LEN, SEPARATOR, STX,
};
pub use counter::{advance, advance_decimal, next_ref, next_trn, render_trn, SequenceRange};
pub use error::{FrameError, Result};
pub use reader::FrameReader;
pub use semi_octet::{decode_reverse, encode_reverse};
pub use writer::FrameWriter;

#[cfg(feature = "async")]
pub use tokio_codec::UcpCodec;
