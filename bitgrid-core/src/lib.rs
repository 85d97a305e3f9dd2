#![no_std]

//! Bitgrid Core - Sparse 2D Bitmap Layout Definitions
//!
//! This crate provides the pure pieces of the bitgrid engine: coordinate
//! mapping, the packed chunk-buffer layout, bounding boxes, configuration
//! validation and error types. No I/O lives here.

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod bounds;
pub mod codec;
pub mod coords;
pub mod error;
pub mod validation;

pub use bounds::*;
pub use codec::*;
pub use coords::*;
pub use error::*;
pub use validation::*;
