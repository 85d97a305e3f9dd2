//! Packed chunk buffer decoding
//!
//! A chunk buffer packs `chunk_width^2` bits, eight per byte, MSB-first.
//! Stores may omit trailing all-zero bytes, so a short buffer is
//! implicitly zero-padded and an absent buffer means no bits are set.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::bit_mask;

/// Every bit position set in `buffer`, in ascending byte/bit scan order
/// (byte 0, inner position 0 first)
#[cfg(feature = "alloc")]
pub fn decode_set_positions(buffer: &[u8]) -> Vec<u64> {
    let mut positions = Vec::new();
    for (byte_idx, byte) in buffer.iter().enumerate() {
        if *byte == 0 {
            continue;
        }
        for inner in 0..8u8 {
            if byte & bit_mask(inner) != 0 {
                positions.push(byte_idx as u64 * 8 + inner as u64);
            }
        }
    }
    positions
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn decodes_msb_first() {
        assert_eq!(decode_set_positions(&[0x80]), vec![0]);
        assert_eq!(decode_set_positions(&[0x01]), vec![7]);
        assert_eq!(decode_set_positions(&[0x00, 0x80]), vec![8]);
    }

    #[test]
    fn decodes_in_ascending_order() {
        assert_eq!(decode_set_positions(&[0x41, 0x80]), vec![1, 7, 8]);
    }

    #[test]
    fn empty_and_zero_buffers_decode_to_nothing() {
        assert!(decode_set_positions(&[]).is_empty());
        assert!(decode_set_positions(&[0, 0, 0, 0]).is_empty());
    }
}
