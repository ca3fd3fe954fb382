//! Delegation pointers for pointer addresses

use crate::error::AddressError;
use crate::varint::{VarIntDecoder, VarIntEncoder};

/// Reference to a stake registration certificate by chain position
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Pointer {
    /// Slot number
    pub slot: u64,

    /// Transaction index within the slot
    pub tx_index: u64,

    /// Certificate index within the transaction
    pub cert_index: u64,
}

impl Pointer {
    /// Read a pointer at `offset`, returning it and the bytes consumed
    pub fn read(data: &[u8], offset: usize) -> Result<(Self, usize), AddressError> {
        let tail = data.get(offset..).unwrap_or(&[]);
        let mut decoder = VarIntDecoder::new(tail);

        let slot = decoder.read().map_err(|e| e.offset_by(offset))?;
        let tx_index = decoder.read().map_err(|e| e.offset_by(offset))?;
        let cert_index = decoder.read().map_err(|e| e.offset_by(offset))?;

        Ok((
            Pointer {
                slot,
                tx_index,
                cert_index,
            },
            decoder.position(),
        ))
    }

    /// Append the encoded pointer fields (slot, then tx index, then cert index)
    pub fn write(&self, out: &mut Vec<u8>) {
        let mut encoder = VarIntEncoder::new();
        encoder.push(self.slot);
        encoder.push(self.tx_index);
        encoder.push(self.cert_index);
        out.extend(encoder.to_vec());
    }
}
