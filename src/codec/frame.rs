//! Payload frame layout and bit packing.
//!
//! ```text
//! [7 bytes] marker "SSSTEGO"
//! [4 bytes] payload length (little-endian u32)
//! [N bytes] payload
//! ```
//!
//! Bytes are serialized least-significant bit first: the first bit written
//! (or read) is bit 0 of the byte.

/// Fixed marker identifying a hidden frame.
pub const MARKER: &[u8; 7] = b"SSSTEGO";

/// Size of the length field that follows the marker.
pub const LENGTH_FIELD_LEN: usize = 4;

/// Marker plus length field.
pub const HEADER_LEN: usize = MARKER.len() + LENGTH_FIELD_LEN;

/// Number of bits needed to embed a message of `message_len` bytes.
pub fn frame_bits(message_len: usize) -> u64 {
    (HEADER_LEN as u64 + message_len as u64) * 8
}

/// Build the full frame for a payload.
///
/// The caller must have checked that `payload.len()` fits in a `u32`; the
/// capacity check in the encoder guarantees this.
pub fn build_frame(payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(HEADER_LEN + payload.len());
    frame.extend_from_slice(MARKER);
    frame.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    frame.extend_from_slice(payload);
    frame
}

/// Iterate over the bits of `bytes`, LSB first within each byte.
pub fn bits_lsb_first(bytes: &[u8]) -> impl Iterator<Item = u8> + '_ {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).map(move |i| (byte >> i) & 1))
}

/// Accumulates bits into bytes, LSB first.
#[derive(Debug, Default, Clone)]
pub struct BitAccumulator {
    bytes: Vec<u8>,
    bit_count: u64,
}

impl BitAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bit: u8) {
        let offset = (self.bit_count % 8) as u8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if let Some(last) = self.bytes.last_mut() {
            *last |= (bit & 1) << offset;
        }
        self.bit_count += 1;
    }

    pub fn bit_count(&self) -> u64 {
        self.bit_count
    }

    /// Bytes whose eight bits have all been collected.
    pub fn complete_bytes(&self) -> &[u8] {
        let complete = (self.bit_count / 8) as usize;
        &self.bytes[..complete]
    }
}

/// Parsed frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub length: u32,
}

/// Parse the header from the first [`HEADER_LEN`] bytes.
///
/// Returns `None` when fewer bytes are supplied or the marker does not match.
pub fn parse_header(bytes: &[u8]) -> Option<Header> {
    if bytes.len() < HEADER_LEN || &bytes[..MARKER.len()] != MARKER {
        return None;
    }
    let mut length = [0u8; LENGTH_FIELD_LEN];
    length.copy_from_slice(&bytes[MARKER.len()..HEADER_LEN]);
    Some(Header {
        length: u32::from_le_bytes(length),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_frame_layout() {
        let frame = build_frame(b"hi");
        assert_eq!(frame.len(), 13);
        assert_eq!(&frame[..7], b"SSSTEGO");
        assert_eq!(&frame[7..11], &[2, 0, 0, 0]);
        assert_eq!(&frame[11..], b"hi");
    }

    #[test]
    fn test_frame_bits() {
        assert_eq!(frame_bits(2), 104);
        assert_eq!(frame_bits(0), 88);
    }

    #[test]
    fn test_bits_are_lsb_first() {
        let bits: Vec<u8> = bits_lsb_first(&[0b0000_0110]).collect();
        assert_eq!(bits, vec![0, 1, 1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_accumulator_inverts_bit_order() {
        let mut acc = BitAccumulator::new();
        for bit in bits_lsb_first(b"Az") {
            acc.push(bit);
        }
        acc.push(1);
        assert_eq!(acc.bit_count(), 17);
        assert_eq!(acc.complete_bytes(), b"Az");
    }

    #[test]
    fn test_parse_header() {
        let frame = build_frame(&[0xAB; 300]);
        assert_eq!(parse_header(&frame), Some(Header { length: 300 }));
        assert_eq!(parse_header(&frame[..10]), None);

        let mut corrupted = frame.clone();
        corrupted[0] = b'X';
        assert_eq!(parse_header(&corrupted), None);
    }
}
