//! Configuration and coordinate validation
//!
//! All checks run before any store I/O is issued, so a failed validation
//! never leaves partial state behind.

use crate::{BitgridError, Result};

/// Smallest supported chunk width, in bits
pub const MIN_CHUNK_WIDTH: u32 = 8;

/// Chunk width used when none is configured
pub const DEFAULT_CHUNK_WIDTH: u32 = 128;

/// Key prefix used when none is configured
pub const DEFAULT_KEY_PREFIX: &str = "bitgrid";

/// Validate a chunk width: at least [`MIN_CHUNK_WIDTH`] and a multiple
/// of eight, so chunk rows pack into whole bytes
pub fn validate_chunk_width(chunk_width: u32) -> Result<()> {
    if chunk_width < MIN_CHUNK_WIDTH {
        return Err(BitgridError::ChunkWidthTooSmall(chunk_width));
    }
    if chunk_width % 8 != 0 {
        return Err(BitgridError::ChunkWidthNotByteAligned(chunk_width));
    }
    Ok(())
}

/// Validate a coordinate pair: the grid is unbounded above but never
/// negative
pub fn validate_coords(x: i64, y: i64) -> Result<()> {
    if x < 0 || y < 0 {
        return Err(BitgridError::NegativeCoordinate { x, y });
    }
    Ok(())
}
