//! Bitgrid - sparse two-dimensional bitmap over pluggable backing stores
//!
//! A logically infinite grid of bits addressed by non-negative `(x, y)`
//! coordinates, where only set regions consume storage. The grid is cut
//! into square chunks; each chunk is one packed byte buffer under one
//! deterministic storage key, so any bit-addressable key-value store can
//! hold it.
//!
//! ## Architecture
//!
//! Bitgrid follows a clean specification/implementation separation:
//!
//! - **bitgrid-core**: Pure layout definitions, coordinate math and
//!   validation (no I/O)
//! - **bitgrid**: The backing-store contract, the default in-memory
//!   store, bounded scanning and the bitmap facade
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bitgrid::{BitmapConfig, Bounds, SparseBitmap};
//!
//! async fn example() -> bitgrid::Result<()> {
//!     let bitmap = SparseBitmap::in_memory(BitmapConfig::default())?;
//!
//!     bitmap.set("board", 3, 17).await?;
//!     assert_eq!(bitmap.get("board", 3, 17).await?, 1);
//!
//!     // every set bit inside the box, filtered and sorted
//!     let hits = bitmap
//!         .in_bounds("board", &Bounds::from_points(0, 0, 32, 32), true)
//!         .await?;
//!     assert_eq!(hits.len(), 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Pluggable backends**: any store with per-bit reads/writes and
//!   whole-buffer reads plugs in behind one trait
//! - **Batched scans**: stores that pipeline fetch a whole chunk
//!   rectangle in a single round trip
//! - **Key scoping**: independent bitmaps share one backend through
//!   namespaced storage keys
//! - **Batched mutation**: a scoped batch defers writes into one commit

// Re-export core layout definitions and error handling
pub use bitgrid_core::{
    // Coordinate math
    bit_mask, byte_index, chunk_coords, chunk_key, coords_from_local, decode_set_positions,
    inner_pos, local_bit_index,
    // Bounding boxes
    Bounds, Coord,
    // Error handling
    BitgridError, Result,
    // Validation utilities
    validate_chunk_width, validate_coords, DEFAULT_CHUNK_WIDTH, DEFAULT_KEY_PREFIX,
    MIN_CHUNK_WIDTH,
};

// Implementation modules
pub mod bitmap;
pub mod config;
pub mod memory;
pub mod scanner;
pub mod store;

// Public exports
pub use bitmap::{KeyBound, SparseBitmap};
pub use config::BitmapConfig;
pub use memory::MemoryStore;
pub use scanner::BoundedScanner;
pub use store::{BackingStore, BatchReply, StoreBatch};
