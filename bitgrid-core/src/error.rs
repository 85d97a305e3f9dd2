//! Error types for bitgrid operations

#[cfg(feature = "alloc")]
use alloc::string::String;

/// Errors that can occur during bitmap operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitgridError {
    /// Chunk width below the supported minimum
    ChunkWidthTooSmall(u32),
    /// Chunk width is not a multiple of eight
    ChunkWidthNotByteAligned(u32),
    /// Key prefix is empty
    EmptyKeyPrefix,
    /// Negative coordinate supplied to a coordinate-taking operation
    NegativeCoordinate { x: i64, y: i64 },
    /// Read issued while a batch scope is active
    ReadWhileBatched,
    /// Batch scope entered while one is already active
    BatchAlreadyActive,
    /// Failure surfaced by the backing store, propagated unchanged
    #[cfg(feature = "alloc")]
    Backend(String),
}

impl core::fmt::Display for BitgridError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BitgridError::ChunkWidthTooSmall(width) => {
                write!(f, "chunk width {width} is below the minimum of 8")
            }
            BitgridError::ChunkWidthNotByteAligned(width) => {
                write!(f, "chunk width {width} is not a multiple of 8")
            }
            BitgridError::EmptyKeyPrefix => write!(f, "key prefix must not be empty"),
            BitgridError::NegativeCoordinate { x, y } => {
                write!(f, "coordinate ({x},{y}) is out of bounds")
            }
            BitgridError::ReadWhileBatched => {
                write!(f, "reads are unavailable inside a batch scope")
            }
            BitgridError::BatchAlreadyActive => write!(f, "a batch scope is already active"),
            #[cfg(feature = "alloc")]
            BitgridError::Backend(msg) => write!(f, "backing store: {msg}"),
        }
    }
}

/// Result type for bitgrid operations
pub type Result<T> = core::result::Result<T, BitgridError>;
