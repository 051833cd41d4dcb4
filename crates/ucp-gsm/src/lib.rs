//! GSM 03.38 default alphabet support for the UCP/EMI codec.
//!
//! Two collaborators live here, each behind a trait so callers can swap in
//! their own tables:
//! - [`Transcoder`] maps local text to wire septet codes and back
//! - [`SeptetPacker`] packs septets into octets (LSB first) and unpacks them
//!
//! [`Gsm`] implements both with the default alphabet and extension table.

pub mod alphabet;
pub mod error;
pub mod septet;

pub use alphabet::{Gsm0338, Transcoder, ESCAPE, REPLACEMENT};
pub use error::{GsmError, Result};
pub use septet::{packed_len, Gsm7Packer, SeptetPacker};

/// Default alphabet: GSM 03.38 transcoding plus 7-bit packing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Gsm;

impl Transcoder for Gsm {
    fn to_wire(&self, text: &str) -> Vec<u8> {
        Gsm0338.to_wire(text)
    }

    fn to_local(&self, wire: &[u8]) -> String {
        Gsm0338.to_local(wire)
    }
}

impl SeptetPacker for Gsm {
    fn pack(&self, septets: &[u8]) -> Vec<u8> {
        Gsm7Packer.pack(septets)
    }

    fn unpack(&self, packed: &[u8]) -> Vec<u8> {
        Gsm7Packer.unpack(packed)
    }
}

/// Anything that can both transcode and pack, as the address codec needs.
pub trait Alphabet: Transcoder + SeptetPacker {}

impl<T: Transcoder + SeptetPacker + ?Sized> Alphabet for T {}
