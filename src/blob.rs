// Temporary handles for file and export bytes.
// A handle is acquired right before its single use and released when dropped,
// so every path (decode ok, decode failed, export) gives it back exactly once.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

#[derive(Default)]
struct Counters {
    next_id: AtomicU64,
    live: AtomicUsize,
}

/// Hands out `BlobHandle`s and counts the ones still alive.
#[derive(Clone, Default)]
pub struct BlobStore {
    counters: Arc<Counters>,
}

impl BlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self, bytes: Vec<u8>) -> BlobHandle {
        let id = self.counters.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.counters.live.fetch_add(1, Ordering::AcqRel);
        tracing::trace!(id, len = bytes.len(), "blob acquired");
        BlobHandle { id, bytes, counters: Arc::clone(&self.counters) }
    }

    /// Handles acquired and not yet dropped.
    pub fn live(&self) -> usize {
        self.counters.live.load(Ordering::Acquire)
    }
}

pub struct BlobHandle {
    id: u64,
    bytes: Vec<u8>,
    counters: Arc<Counters>,
}

impl BlobHandle {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Reference string in the style of an object URL, used in logs.
    pub fn url(&self) -> String {
        format!("blob:{}", self.id)
    }
}

impl fmt::Debug for BlobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlobHandle").field("id", &self.id).field("len", &self.bytes.len()).finish()
    }
}

impl Drop for BlobHandle {
    fn drop(&mut self) {
        self.counters.live.fetch_sub(1, Ordering::AcqRel);
        tracing::trace!(id = self.id, "blob released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_releases_once() {
        let store = BlobStore::new();
        let a = store.acquire(vec![1, 2, 3]);
        let b = store.acquire(Vec::new());
        assert_eq!(store.live(), 2);
        assert_ne!(a.url(), b.url());
        assert_eq!(a.bytes(), &[1, 2, 3]);

        drop(a);
        assert_eq!(store.live(), 1);
        drop(b);
        assert_eq!(store.live(), 0);
    }

    #[test]
    fn clones_share_the_count() {
        let store = BlobStore::new();
        let other = store.clone();
        let handle = other.acquire(vec![0]);
        assert_eq!(store.live(), 1);
        drop(handle);
        assert_eq!(store.live(), 0);
    }
}
