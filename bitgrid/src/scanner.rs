//! Bounding-box scans over chunked bitmap storage
//!
//! A scan touches every chunk the box intersects, fetches their packed
//! buffers — one batched round trip when the store pipelines, one await
//! per chunk otherwise — and decodes set bits back into absolute
//! coordinates.

use bitgrid_core::{
    byte_index, chunk_coords, chunk_key, coords_from_local, decode_set_positions, inner_pos,
    BitgridError, Bounds, Coord, Result,
};

use crate::store::{BackingStore, BatchReply};

/// Enumerates set coordinates within the chunks a bounding box touches
pub struct BoundedScanner<'a> {
    store: &'a dyn BackingStore,
    chunk_width: u32,
    key_prefix: &'a str,
}

impl<'a> BoundedScanner<'a> {
    pub fn new(store: &'a dyn BackingStore, chunk_width: u32, key_prefix: &'a str) -> Self {
        Self {
            store,
            chunk_width,
            key_prefix,
        }
    }

    /// All set coordinates in the chunks intersecting `bounds`
    ///
    /// Non-strict returns every set bit in every touched chunk, in chunk
    /// scan order — chunk boundaries rarely align with the box, so bits
    /// outside it may appear. Strict filters to exactly the box and sorts
    /// ascending by x, ties broken by y.
    pub async fn scan(&self, key: &str, bounds: &Bounds, strict: bool) -> Result<Vec<Coord>> {
        let (fcx, fcy) = chunk_coords(bounds.from.x, bounds.from.y, self.chunk_width);
        let (tcx, tcy) = chunk_coords(bounds.to.x, bounds.to.y, self.chunk_width);

        let mut chunk_list = Vec::new();
        for cx in fcx..=tcx {
            for cy in fcy..=tcy {
                chunk_list.push((cx, cy));
            }
        }

        let buffers = self.fetch_buffers(key, &chunk_list).await?;

        let mut coords = Vec::new();
        for ((cx, cy), buffer) in chunk_list.into_iter().zip(buffers) {
            if buffer.is_empty() {
                continue;
            }
            for position in decode_set_positions(&buffer) {
                let (x, y) = coords_from_local(
                    cx,
                    cy,
                    byte_index(position),
                    inner_pos(position),
                    self.chunk_width,
                );
                coords.push(Coord::new(x, y));
            }
        }

        if strict {
            coords.retain(|coord| bounds.contains(coord));
            coords.sort_unstable_by_key(|coord| (coord.x, coord.y));
        }

        Ok(coords)
    }

    /// One buffer per chunk, in `chunk_list` order
    ///
    /// With a pipelining store, every fetch is queued before the single
    /// commit and replies are matched back to their chunk by slot.
    async fn fetch_buffers(&self, key: &str, chunk_list: &[(i64, i64)]) -> Result<Vec<Vec<u8>>> {
        let Some(mut batch) = self.store.begin_batch() else {
            let mut buffers = Vec::with_capacity(chunk_list.len());
            for &(cx, cy) in chunk_list {
                let storage_key = chunk_key(self.key_prefix, key, cx, cy);
                buffers.push(self.store.get_buffer(&storage_key).await?);
            }
            return Ok(buffers);
        };

        let mut slots = Vec::with_capacity(chunk_list.len());
        for &(cx, cy) in chunk_list {
            slots.push(batch.get_buffer(&chunk_key(self.key_prefix, key, cx, cy)));
        }
        let mut replies = batch.commit().await?;

        let mut buffers = Vec::with_capacity(slots.len());
        for slot in slots {
            match replies.get_mut(slot).map(std::mem::take) {
                Some(BatchReply::Buffer(buffer)) => buffers.push(buffer),
                _ => {
                    return Err(BitgridError::Backend(format!(
                        "batch slot {slot} did not resolve to a buffer"
                    )))
                }
            }
        }
        Ok(buffers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    async fn seed(store: &MemoryStore, chunk_width: u32, coords: &[(i64, i64)]) {
        use bitgrid_core::local_bit_index;
        for &(x, y) in coords {
            let (cx, cy) = chunk_coords(x, y, chunk_width);
            let key = chunk_key("t", "k", cx, cy);
            let position = local_bit_index(cx, cy, x, y, chunk_width);
            store.set_bit(&key, position, 1).await.unwrap();
        }
    }

    #[tokio::test]
    async fn scans_across_chunk_borders() {
        let store = MemoryStore::new();
        seed(&store, 16, &[(0, 0), (15, 15), (16, 0), (0, 16), (17, 17)]).await;

        let scanner = BoundedScanner::new(&store, 16, "t");
        let found = scanner
            .scan("k", &Bounds::from_points(0, 0, 20, 20), true)
            .await
            .unwrap();
        assert_eq!(
            found,
            vec![
                Coord::new(0, 0),
                Coord::new(0, 16),
                Coord::new(15, 15),
                Coord::new(16, 0),
                Coord::new(17, 17),
            ]
        );
    }

    #[tokio::test]
    async fn non_strict_keeps_whole_chunks() {
        let store = MemoryStore::new();
        // (15, 15) is outside the box but inside the touched chunk
        seed(&store, 16, &[(1, 1), (15, 15)]).await;

        let scanner = BoundedScanner::new(&store, 16, "t");
        let loose = scanner
            .scan("k", &Bounds::from_points(0, 0, 2, 2), false)
            .await
            .unwrap();
        assert_eq!(loose, vec![Coord::new(1, 1), Coord::new(15, 15)]);

        let strict = scanner
            .scan("k", &Bounds::from_points(0, 0, 2, 2), true)
            .await
            .unwrap();
        assert_eq!(strict, vec![Coord::new(1, 1)]);
        assert!(strict.iter().all(|c| loose.contains(c)));
    }

    #[tokio::test]
    async fn empty_chunks_contribute_nothing() {
        let store = MemoryStore::new();
        let scanner = BoundedScanner::new(&store, 16, "t");
        let found = scanner
            .scan("k", &Bounds::from_points(0, 0, 100, 100), false)
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn single_chunk_box_is_valid() {
        let store = MemoryStore::new();
        seed(&store, 16, &[(5, 5)]).await;

        let scanner = BoundedScanner::new(&store, 16, "t");
        let found = scanner
            .scan("k", &Bounds::from_points(5, 5, 5, 5), true)
            .await
            .unwrap();
        assert_eq!(found, vec![Coord::new(5, 5)]);
    }

    #[tokio::test]
    async fn pipelined_scan_matches_sequential() {
        let plain = MemoryStore::new();
        let pipelined = MemoryStore::pipelined();
        let coords = [(0, 0), (9, 120), (200, 3), (255, 255), (128, 128)];
        seed(&plain, 128, &coords).await;
        seed(&pipelined, 128, &coords).await;

        let bounds = Bounds::from_points(0, 0, 300, 300);
        let sequential = BoundedScanner::new(&plain, 128, "t")
            .scan("k", &bounds, true)
            .await
            .unwrap();
        let batched = BoundedScanner::new(&pipelined, 128, "t")
            .scan("k", &bounds, true)
            .await
            .unwrap();
        assert_eq!(sequential, batched);
        assert_eq!(sequential.len(), coords.len());
    }
}
