//! Backing store contract
//!
//! This module defines the capability interface the bitmap engine depends
//! on. It is a pure interface: any conforming implementation — the
//! in-memory reference store, a remote bit-addressable service — is
//! interchangeable. The engine holds a shared reference and never manages
//! the store's lifecycle beyond use.

use async_trait::async_trait;
use bitgrid_core::Result;

/// Minimal capability set for bit-addressable storage
///
/// Bit positions follow the packed chunk layout: MSB-first per byte,
/// row-major with x fast-varying. A store exposing native per-bit
/// addressing must agree with this convention, since chunk buffers are
/// decoded directly into coordinates using it.
#[async_trait]
pub trait BackingStore: Send + Sync {
    /// Read one bit; absent keys and positions read as 0
    async fn get_bit(&self, key: &str, position: u64) -> Result<u8>;

    /// Write one bit, lazily allocating whatever storage the key needs
    async fn set_bit(&self, key: &str, position: u64, value: u8) -> Result<()>;

    /// Full packed buffer for a key, empty when the key does not exist
    ///
    /// Stores may omit trailing all-zero bytes; callers treat short
    /// buffers as zero-padded, never as an error.
    async fn get_buffer(&self, key: &str) -> Result<Vec<u8>>;

    /// Start a deferred batch, when the store supports pipelining
    ///
    /// The bitmap facade probes this once at construction to derive its
    /// pipeline capability; stores without batching keep the default.
    fn begin_batch(&self) -> Option<Box<dyn StoreBatch>> {
        None
    }
}

/// Result of one deferred batch operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BatchReply {
    /// Reply to a deferred `set_bit`
    #[default]
    Done,
    /// Reply to a deferred `get_bit`
    Bit(u8),
    /// Reply to a deferred `get_buffer`
    Buffer(Vec<u8>),
}

/// Deferred store operations executed as a single round trip
///
/// Each deferred call returns its slot: the index of its reply in the
/// vector resolved by [`commit`](StoreBatch::commit). Replies are
/// correlated by slot, never by arrival order. Nothing executes before
/// `commit`, and partial completion is never observable.
#[async_trait]
pub trait StoreBatch: Send {
    /// Queue a bit write; returns the reply slot
    fn set_bit(&mut self, key: &str, position: u64, value: u8) -> usize;

    /// Queue a bit read; returns the reply slot
    fn get_bit(&mut self, key: &str, position: u64) -> usize;

    /// Queue a buffer read; returns the reply slot
    fn get_buffer(&mut self, key: &str) -> usize;

    /// Execute every queued operation and resolve the replies as a unit
    async fn commit(self: Box<Self>) -> Result<Vec<BatchReply>>;
}
