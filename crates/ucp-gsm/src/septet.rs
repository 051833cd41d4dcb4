use crate::error::{GsmError, Result};

/// Packs 7-bit septets into octets and back.
pub trait SeptetPacker {
    /// Pack septets LSB first; the final octet is zero-filled.
    fn pack(&self, septets: &[u8]) -> Vec<u8>;

    /// Unpack every whole septet contained in `packed`.
    ///
    /// Fill bits can yield one trailing `0x00` septet when the original
    /// length was a multiple of eight minus one; use [`unpack_exact`] when
    /// the count is known.
    ///
    /// [`unpack_exact`]: SeptetPacker::unpack_exact
    fn unpack(&self, packed: &[u8]) -> Vec<u8>;

    /// Unpack exactly `count` septets.
    fn unpack_exact(&self, packed: &[u8], count: usize) -> Result<Vec<u8>> {
        let available = packed.len() * 8 / 7;
        if count > available {
            return Err(GsmError::InvalidSeptetCount {
                requested: count,
                packed: packed.len(),
                available,
            });
        }
        let mut septets = self.unpack(packed);
        septets.truncate(count);
        Ok(septets)
    }
}

/// Number of octets needed to pack `septets` septets.
pub fn packed_len(septets: usize) -> usize {
    (septets * 7).div_ceil(8)
}

/// GSM 03.38 bit packing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Gsm7Packer;

impl SeptetPacker for Gsm7Packer {
    fn pack(&self, septets: &[u8]) -> Vec<u8> {
        let mut packed = Vec::with_capacity(packed_len(septets.len()));
        let mut acc: u16 = 0;
        let mut bits = 0u32;
        for septet in septets {
            acc |= u16::from(septet & 0x7F) << bits;
            bits += 7;
            if bits >= 8 {
                packed.push(acc as u8);
                acc >>= 8;
                bits -= 8;
            }
        }
        if bits > 0 {
            packed.push(acc as u8);
        }
        packed
    }

    fn unpack(&self, packed: &[u8]) -> Vec<u8> {
        let mut septets = Vec::with_capacity(packed.len() * 8 / 7);
        let mut acc: u16 = 0;
        let mut bits = 0u32;
        for octet in packed {
            acc |= u16::from(*octet) << bits;
            bits += 8;
            while bits >= 7 {
                septets.push((acc & 0x7F) as u8);
                acc >>= 7;
                bits -= 7;
            }
        }
        septets
    }
}
