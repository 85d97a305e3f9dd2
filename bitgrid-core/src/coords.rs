//! Coordinate mapping between absolute positions, chunks and packed bits
//!
//! The grid is split into square chunks of `chunk_width x chunk_width`
//! bits. Within a chunk, bits are laid out row-major with x as the
//! fast-varying axis, packed eight to a byte with bit 0 stored in the
//! most significant position (`0x80 >> inner_pos`). This layout is the
//! on-disk/on-wire contract shared with bit-addressable stores.

#[cfg(feature = "alloc")]
use alloc::{format, string::String};

/// Chunk coordinate holding the absolute position `(x, y)`
///
/// Coordinates are non-negative, so truncating division is floor
/// division.
pub const fn chunk_coords(x: i64, y: i64, chunk_width: u32) -> (i64, i64) {
    let width = chunk_width as i64;
    (x / width, y / width)
}

/// Bit position of `(x, y)` inside chunk `(cx, cy)`
///
/// Callers must pass the chunk coordinate that actually holds `(x, y)`.
/// Range is `[0, chunk_width^2)`.
pub const fn local_bit_index(cx: i64, cy: i64, x: i64, y: i64, chunk_width: u32) -> u64 {
    let width = chunk_width as i64;
    ((x - cx * width) + (y - cy * width) * width) as u64
}

/// Inverse of the packed layout: absolute coordinate of the bit found at
/// `byte_index`/`inner_pos` of chunk `(cx, cy)`
pub const fn coords_from_local(
    cx: i64,
    cy: i64,
    byte_index: usize,
    inner_pos: u8,
    chunk_width: u32,
) -> (i64, i64) {
    let width = chunk_width as i64;
    let local = byte_index as i64 * 8 + inner_pos as i64;
    (cx * width + local % width, cy * width + local / width)
}

/// Byte holding a bit position within a packed buffer
pub const fn byte_index(position: u64) -> usize {
    (position / 8) as usize
}

/// Position of a bit within its byte
pub const fn inner_pos(position: u64) -> u8 {
    (position % 8) as u8
}

/// MSB-first bit mask: inner position 0 is the most significant bit
pub const fn bit_mask(inner_pos: u8) -> u8 {
    0x80 >> inner_pos
}

/// Storage key addressing one chunk of one logical bitmap
///
/// The format `"<prefix>:<key>:<cx>:<cy>"` is stable; it is the only
/// addressing mechanism, no separate chunk directory exists.
#[cfg(feature = "alloc")]
pub fn chunk_key(prefix: &str, key: &str, cx: i64, cy: i64) -> String {
    format!("{prefix}:{key}:{cx}:{cy}")
}
