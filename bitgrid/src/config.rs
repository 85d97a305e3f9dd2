//! Bitmap configuration

use bitgrid_core::{
    validate_chunk_width, BitgridError, Result, DEFAULT_CHUNK_WIDTH, DEFAULT_KEY_PREFIX,
};

/// Configuration for a sparse bitmap, immutable after construction
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitmapConfig {
    /// Side length of a square chunk in bits; at least 8 and a multiple
    /// of 8
    pub chunk_width: u32,
    /// Namespace prepended to every storage key
    pub key_prefix: String,
}

impl BitmapConfig {
    /// Set the chunk width
    pub fn with_chunk_width(mut self, chunk_width: u32) -> Self {
        self.chunk_width = chunk_width;
        self
    }

    /// Set the key prefix
    pub fn with_key_prefix(mut self, key_prefix: impl Into<String>) -> Self {
        self.key_prefix = key_prefix.into();
        self
    }

    /// Check the configuration surface; bitmap construction refuses an
    /// invalid config rather than defaulting around it
    pub fn validate(&self) -> Result<()> {
        validate_chunk_width(self.chunk_width)?;
        if self.key_prefix.is_empty() {
            return Err(BitgridError::EmptyKeyPrefix);
        }
        Ok(())
    }
}

impl Default for BitmapConfig {
    fn default() -> Self {
        Self {
            chunk_width: DEFAULT_CHUNK_WIDTH,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}
