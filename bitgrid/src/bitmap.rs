//! Sparse bitmap facade
//!
//! Composes coordinate mapping, the bounded scanner and a backing store
//! behind a validated configuration. The facade is either idle or inside
//! a batch scope; while batched, writes defer into the pending handle and
//! reads fail fast, since a deferred handle cannot resolve a read before
//! commit.

use std::future::Future;
use std::sync::Arc;

use bitgrid_core::{
    chunk_coords, chunk_key, local_bit_index, validate_coords, BitgridError, Bounds, Coord, Result,
};
use tokio::sync::Mutex;

use crate::config::BitmapConfig;
use crate::memory::MemoryStore;
use crate::scanner::BoundedScanner;
use crate::store::{BackingStore, StoreBatch};

/// Sparse, logically infinite 2D bitmap over a backing store
///
/// Independent bitmaps partition one backend through caller-supplied
/// logical keys. A single instance is meant for one writer at a time:
/// the batch scope is instance-wide state.
pub struct SparseBitmap {
    config: BitmapConfig,
    store: Arc<dyn BackingStore>,
    pipeline_capable: bool,
    batch: Mutex<Option<Box<dyn StoreBatch>>>,
}

impl SparseBitmap {
    /// Build a bitmap over `store`
    ///
    /// Validates the configuration and probes the store's batching
    /// capability once; the capability is never re-checked per call.
    pub fn new(config: BitmapConfig, store: Arc<dyn BackingStore>) -> Result<Self> {
        config.validate()?;
        let pipeline_capable = store.begin_batch().is_some();
        Ok(Self {
            config,
            store,
            pipeline_capable,
            batch: Mutex::new(None),
        })
    }

    /// Bitmap over a fresh default in-memory store
    pub fn in_memory(config: BitmapConfig) -> Result<Self> {
        Self::new(config, Arc::new(MemoryStore::new()))
    }

    pub fn config(&self) -> &BitmapConfig {
        &self.config
    }

    /// Whether the store advertised batching at construction
    pub fn pipeline_capable(&self) -> bool {
        self.pipeline_capable
    }

    /// Storage key and bit position addressing `(x, y)` under `key`
    fn bit_address(&self, key: &str, x: i64, y: i64) -> (String, u64) {
        let (cx, cy) = chunk_coords(x, y, self.config.chunk_width);
        let storage_key = chunk_key(&self.config.key_prefix, key, cx, cy);
        let position = local_bit_index(cx, cy, x, y, self.config.chunk_width);
        (storage_key, position)
    }

    /// Read the bit at `(x, y)` under `key`
    pub async fn get(&self, key: &str, x: i64, y: i64) -> Result<u8> {
        validate_coords(x, y)?;
        if self.batch.lock().await.is_some() {
            return Err(BitgridError::ReadWhileBatched);
        }
        let (storage_key, position) = self.bit_address(key, x, y);
        self.store.get_bit(&storage_key, position).await
    }

    /// Set the bit at `(x, y)` under `key`
    pub async fn set(&self, key: &str, x: i64, y: i64) -> Result<()> {
        self.write(key, x, y, 1).await
    }

    /// Clear the bit at `(x, y)` under `key`
    pub async fn unset(&self, key: &str, x: i64, y: i64) -> Result<()> {
        self.write(key, x, y, 0).await
    }

    async fn write(&self, key: &str, x: i64, y: i64, value: u8) -> Result<()> {
        validate_coords(x, y)?;
        let (storage_key, position) = self.bit_address(key, x, y);
        let mut batch = self.batch.lock().await;
        match batch.as_mut() {
            Some(handle) => {
                handle.set_bit(&storage_key, position, value);
                Ok(())
            }
            None => {
                drop(batch);
                self.store.set_bit(&storage_key, position, value).await
            }
        }
    }

    /// All set coordinates within `bounds` under `key`
    ///
    /// Non-strict (the default in the scan sense) returns every set bit
    /// in every chunk the box touches; strict filters to exactly the box
    /// and sorts ascending by x, ties broken by y. Both corners are
    /// coordinate-checked; callers keep `from <= to`.
    pub async fn in_bounds(&self, key: &str, bounds: &Bounds, strict: bool) -> Result<Vec<Coord>> {
        validate_coords(bounds.from.x, bounds.from.y)?;
        validate_coords(bounds.to.x, bounds.to.y)?;
        if self.batch.lock().await.is_some() {
            return Err(BitgridError::ReadWhileBatched);
        }
        BoundedScanner::new(
            self.store.as_ref(),
            self.config.chunk_width,
            &self.config.key_prefix,
        )
        .scan(key, bounds, strict)
        .await
    }

    /// View with `key` pre-bound, purely for ergonomics
    pub fn bound_to_key(&self, key: impl Into<String>) -> KeyBound<'_> {
        KeyBound {
            bitmap: self,
            key: key.into(),
        }
    }

    /// Run `scope` with its writes deferred into a single batch commit
    ///
    /// Passthrough when the store does not pipeline. The scope is
    /// expected to issue only `set`/`unset` calls; reads inside it fail
    /// with [`BitgridError::ReadWhileBatched`]. On success the handle
    /// commits as a unit; on failure it is dropped uncommitted. Either
    /// way the instance is idle again before this returns.
    pub async fn with_batch<T, F, Fut>(&self, scope: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if !self.pipeline_capable {
            return scope().await;
        }

        {
            let mut batch = self.batch.lock().await;
            if batch.is_some() {
                return Err(BitgridError::BatchAlreadyActive);
            }
            // probed capable at construction; a conforming store keeps
            // answering
            let handle = self.store.begin_batch().ok_or_else(|| {
                BitgridError::Backend("store stopped offering batches".to_string())
            })?;
            *batch = Some(handle);
        }

        let outcome = scope().await;
        let handle = self.batch.lock().await.take();

        match outcome {
            Ok(value) => {
                if let Some(handle) = handle {
                    handle.commit().await?;
                }
                Ok(value)
            }
            // the handle drops uncommitted, leaving no partial writes
            Err(err) => Err(err),
        }
    }
}

/// Key-scoped view over a bitmap
///
/// Carries no state beyond the bound key; every call delegates to the
/// underlying bitmap with the same guarantees.
pub struct KeyBound<'a> {
    bitmap: &'a SparseBitmap,
    key: String,
}

impl KeyBound<'_> {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub async fn get(&self, x: i64, y: i64) -> Result<u8> {
        self.bitmap.get(&self.key, x, y).await
    }

    pub async fn set(&self, x: i64, y: i64) -> Result<()> {
        self.bitmap.set(&self.key, x, y).await
    }

    pub async fn unset(&self, x: i64, y: i64) -> Result<()> {
        self.bitmap.unset(&self.key, x, y).await
    }

    pub async fn in_bounds(&self, bounds: &Bounds, strict: bool) -> Result<Vec<Coord>> {
        self.bitmap.in_bounds(&self.key, bounds, strict).await
    }
}
