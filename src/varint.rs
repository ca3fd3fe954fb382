//! Variable length integer encoding/decoding for pointer addresses

use crate::error::AddressError;

// Continuation-bit base-128 scheme, low chunk first:
//
//   VARIABLE-LENGTH-UINT = (%b1 | UINT7 | VARIABLE-LENGTH-UINT)
//                        / (%b0 | UINT7)
//
// The first byte carries bits 0..7 of the value, the next byte bits 7..14,
// and so on until a byte with the top bit clear terminates the chain.

/// Variable-length integer encoder
pub struct VarIntEncoder {
    data: Vec<u8>,
}

impl Default for VarIntEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl VarIntEncoder {
    /// Construct
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Push an integer, always in minimal-length form
    pub fn push(&mut self, mut num: u64) {
        loop {
            let chunk = (num & 0x7f) as u8;
            num >>= 7;
            if num == 0 {
                self.data.push(chunk);
                return;
            }
            self.data.push(chunk | 0x80);
        }
    }

    /// Get the resulting vector
    pub fn to_vec(self) -> Vec<u8> {
        self.data
    }
}

/// Variable length integer decoder
pub struct VarIntDecoder<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> VarIntDecoder<'a> {
    /// Create a new decoder from a byte slice
    pub fn new(data: &'a [u8]) -> Self {
        VarIntDecoder { data, position: 0 }
    }

    /// Read the next varint from the stream.
    ///
    /// Non-minimal encodings (chains longer than the value needs) are
    /// accepted and decode to the same value - the wire format does not
    /// demand canonical form, and rejecting it here would refuse inputs
    /// other decoders accept. Chains whose non-zero payload does not fit
    /// in 64 bits fail with `VarIntOverflow`; a chain that runs off the
    /// end of the buffer fails with `TruncatedVarInt`.
    pub fn read(&mut self) -> Result<u64, AddressError> {
        let start = self.position;
        let mut value: u64 = 0;
        let mut shift: u32 = 0;

        while self.position < self.data.len() {
            let byte = self.data[self.position];
            self.position += 1;

            let chunk = (byte & 0x7f) as u64;
            if chunk != 0 {
                if shift > 63 || (shift > 57 && chunk >> (64 - shift) != 0) {
                    return Err(AddressError::VarIntOverflow { offset: start });
                }
                value |= chunk << shift;
            }

            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift = shift.saturating_add(7);
        }

        Err(AddressError::TruncatedVarInt { offset: start })
    }

    /// Returns the current byte position (for diagnostics)
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns true if all input has been consumed
    pub fn is_finished(&self) -> bool {
        self.position >= self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serialize_uint(arg: u64) -> Vec<u8> {
        let mut e = VarIntEncoder::new();
        e.push(arg);
        e.to_vec()
    }

    #[test]
    fn uint_serialization() {
        assert_eq!(serialize_uint(0), vec![0x00]);
        assert_eq!(serialize_uint(1), vec![0x01]);
        assert_eq!(serialize_uint(127), vec![0x7f]);
        assert_eq!(serialize_uint(128), vec![0x80, 0x01]);
        assert_eq!(serialize_uint(16383), vec![0xff, 0x7f]);
        assert_eq!(serialize_uint(16384), vec![0x80, 0x80, 0x01]);

        let mut max = vec![0xff; 9];
        max.push(0x01);
        assert_eq!(serialize_uint(u64::MAX), max);
    }

    #[test]
    fn uint_deserialization() {
        assert_read(&[0x00], 0, 1);
        assert_read(&[0x7f], 127, 1);
        assert_read(&[0x80, 0x01], 128, 2);
        assert_read(&[0xff, 0x7f], 16383, 2);
        assert_read(&[0x80, 0x80, 0x01], 16384, 3);
    }

    fn assert_read(bytes: &[u8], value: u64, consumed: usize) {
        let mut d = VarIntDecoder::new(bytes);
        assert_eq!(d.read().unwrap(), value);
        assert_eq!(d.position(), consumed);
    }

    #[test]
    fn powers_of_two_round_trip_minimally() {
        for k in 0usize..64 {
            let val = 1u64 << k;
            let bytes = serialize_uint(val);
            assert_eq!(bytes.len(), (k / 7) + 1, "non-minimal encoding of 1<<{k}");

            let mut d = VarIntDecoder::new(&bytes);
            assert_eq!(d.read().unwrap(), val);
            assert_eq!(d.position(), bytes.len());
            assert!(d.is_finished());
        }
    }

    #[test]
    fn sequential_reads_track_position() {
        let mut e = VarIntEncoder::new();
        for num in [0u64, 1, 127, 128, 16384, u64::MAX] {
            e.push(num);
        }
        let data = e.to_vec();

        let mut d = VarIntDecoder::new(&data);
        for num in [0u64, 1, 127, 128, 16384, u64::MAX] {
            assert_eq!(d.read().unwrap(), num);
        }
        assert!(d.is_finished());
    }

    #[test]
    fn truncated_chain_errors() {
        let cases: [&[u8]; 4] = [&[], &[0x80], &[0x80, 0x80], &[0xff, 0xff]];
        for bytes in cases {
            let mut d = VarIntDecoder::new(bytes);
            assert_eq!(d.read(), Err(AddressError::TruncatedVarInt { offset: 0 }));
        }

        // Error offset points at the start of the failing varint
        let mut d = VarIntDecoder::new(&[0x80, 0x01, 0x80]);
        assert_eq!(d.read().unwrap(), 128);
        assert_eq!(d.read(), Err(AddressError::TruncatedVarInt { offset: 2 }));
    }

    #[test]
    fn non_minimal_encodings_accepted() {
        let mut d = VarIntDecoder::new(&[0x80, 0x00]);
        assert_eq!(d.read().unwrap(), 0);
        assert_eq!(d.position(), 2);

        let mut d = VarIntDecoder::new(&[0x81, 0x80, 0x00]);
        assert_eq!(d.read().unwrap(), 1);
        assert_eq!(d.position(), 3);

        // Zero padding past bit 63 carries no information and still decodes
        let mut padded = vec![0x80; 11];
        padded.push(0x00);
        let mut d = VarIntDecoder::new(&padded);
        assert_eq!(d.read().unwrap(), 0);
        assert_eq!(d.position(), 12);
    }

    #[test]
    fn overflow_rejected() {
        // 2^64: chunk value 2 in the tenth byte
        let mut two_to_64 = vec![0x80; 9];
        two_to_64.push(0x02);
        let mut d = VarIntDecoder::new(&two_to_64);
        assert_eq!(d.read(), Err(AddressError::VarIntOverflow { offset: 0 }));

        // Non-zero chunk entirely past bit 63
        let mut high_chunk = vec![0x80; 10];
        high_chunk.push(0x01);
        let mut d = VarIntDecoder::new(&high_chunk);
        assert_eq!(d.read(), Err(AddressError::VarIntOverflow { offset: 0 }));

        // u64::MAX itself is fine
        let mut max = vec![0xff; 9];
        max.push(0x01);
        let mut d = VarIntDecoder::new(&max);
        assert_eq!(d.read().unwrap(), u64::MAX);
    }
}
