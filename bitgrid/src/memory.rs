//! Default in-memory backing store
//!
//! A simple, unoptimized reference implementation of the store contract.
//! Buffers grow lazily up to the highest byte ever written under a key,
//! so two stores holding "the same" chunk may disagree on trailing
//! zero bytes while staying bit-equivalent.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bitgrid_core::{bit_mask, byte_index, inner_pos, Result};
use tokio::sync::RwLock;

use crate::store::{BackingStore, BatchReply, StoreBatch};

/// In-memory [`BackingStore`] backed by a map of packed buffers
///
/// Cloning is cheap and clones share the same storage.
#[derive(Clone, Default)]
pub struct MemoryStore {
    chunks: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    pipelined: bool,
}

impl MemoryStore {
    /// Plain store without the batching capability
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that advertises batching, queueing operations until commit
    /// the way a remote pipeline would
    pub fn pipelined() -> Self {
        Self {
            pipelined: true,
            ..Self::default()
        }
    }

    async fn read_bit(&self, key: &str, position: u64) -> u8 {
        let chunks = self.chunks.read().await;
        match chunks.get(key).and_then(|buf| buf.get(byte_index(position))) {
            Some(byte) => u8::from(byte & bit_mask(inner_pos(position)) != 0),
            None => 0,
        }
    }

    async fn write_bit(&self, key: &str, position: u64, value: u8) {
        let mut chunks = self.chunks.write().await;
        let buf = chunks.entry(key.to_string()).or_default();
        let idx = byte_index(position);
        if buf.len() <= idx {
            // lazy growth, only up to the highest byte written
            buf.resize(idx + 1, 0);
        }
        if value != 0 {
            buf[idx] |= bit_mask(inner_pos(position));
        } else {
            buf[idx] &= !bit_mask(inner_pos(position));
        }
    }

    async fn read_buffer(&self, key: &str) -> Vec<u8> {
        let chunks = self.chunks.read().await;
        chunks.get(key).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl BackingStore for MemoryStore {
    async fn get_bit(&self, key: &str, position: u64) -> Result<u8> {
        Ok(self.read_bit(key, position).await)
    }

    async fn set_bit(&self, key: &str, position: u64, value: u8) -> Result<()> {
        self.write_bit(key, position, value).await;
        Ok(())
    }

    async fn get_buffer(&self, key: &str) -> Result<Vec<u8>> {
        Ok(self.read_buffer(key).await)
    }

    fn begin_batch(&self) -> Option<Box<dyn StoreBatch>> {
        if !self.pipelined {
            return None;
        }
        Some(Box::new(MemoryBatch {
            store: self.clone(),
            ops: Vec::new(),
        }))
    }
}

enum QueuedOp {
    SetBit { key: String, position: u64, value: u8 },
    GetBit { key: String, position: u64 },
    GetBuffer { key: String },
}

struct MemoryBatch {
    store: MemoryStore,
    ops: Vec<QueuedOp>,
}

#[async_trait]
impl StoreBatch for MemoryBatch {
    fn set_bit(&mut self, key: &str, position: u64, value: u8) -> usize {
        self.ops.push(QueuedOp::SetBit {
            key: key.to_string(),
            position,
            value,
        });
        self.ops.len() - 1
    }

    fn get_bit(&mut self, key: &str, position: u64) -> usize {
        self.ops.push(QueuedOp::GetBit {
            key: key.to_string(),
            position,
        });
        self.ops.len() - 1
    }

    fn get_buffer(&mut self, key: &str) -> usize {
        self.ops.push(QueuedOp::GetBuffer {
            key: key.to_string(),
        });
        self.ops.len() - 1
    }

    async fn commit(self: Box<Self>) -> Result<Vec<BatchReply>> {
        let MemoryBatch { store, ops } = *self;
        let mut replies = Vec::with_capacity(ops.len());
        for op in ops {
            match op {
                QueuedOp::SetBit {
                    key,
                    position,
                    value,
                } => {
                    store.write_bit(&key, position, value).await;
                    replies.push(BatchReply::Done);
                }
                QueuedOp::GetBit { key, position } => {
                    replies.push(BatchReply::Bit(store.read_bit(&key, position).await));
                }
                QueuedOp::GetBuffer { key } => {
                    replies.push(BatchReply::Buffer(store.read_buffer(&key).await));
                }
            }
        }
        Ok(replies)
    }
}
