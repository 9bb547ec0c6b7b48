use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use hashbrown::HashMap;
use tilegen_chunk::{Chunk, generate_chunk_at};
use tilegen_world::{ChunkCoord, Generator};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChunkCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entries: usize,
}

/// Bounded LRU of finished chunks keyed by packed chunk id.
pub struct ChunkCache {
    entries: RwLock<HashMap<u64, Arc<Chunk>>>,
    order: Mutex<VecDeque<u64>>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl ChunkCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            order: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<Arc<Chunk>> {
        let id = coord.id();
        if let Some(chunk) = self.lookup(id) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            self.touch(id);
            return Some(chunk);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Stores `chunk`, replacing any previous value for the same id.
    pub fn insert(&self, chunk: Arc<Chunk>) {
        let id = chunk.id();
        {
            // Lock order: `order` then `entries`.
            let mut order = self.order.lock().unwrap_or_else(PoisonError::into_inner);
            self.entries
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(id, chunk);
            if let Some(pos) = order.iter().position(|c| *c == id) {
                order.remove(pos);
            }
            order.push_back(id);
        }
        self.enforce_capacity();
    }

    /// Cached chunk for `coord`, generating and caching it on a miss.
    pub fn get_or_generate(&self, generator: &Generator, coord: ChunkCoord) -> Arc<Chunk> {
        if let Some(chunk) = self.get(coord) {
            return chunk;
        }
        let chunk = Arc::new(generate_chunk_at(generator, coord));
        self.insert(Arc::clone(&chunk));
        chunk
    }

    pub fn remove(&self, coord: ChunkCoord) -> Option<Arc<Chunk>> {
        let id = coord.id();
        let removed = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
        self.remove_from_order(id);
        removed
    }

    pub fn clear(&self) {
        let removed = {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            let len = entries.len() as u64;
            entries.clear();
            len
        };
        if removed > 0 {
            self.evictions.fetch_add(removed, Ordering::Relaxed);
        }
        self.order
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn stats(&self) -> ChunkCacheStats {
        ChunkCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            entries: self.entries.read().map(|m| m.len()).unwrap_or(0),
        }
    }

    fn lookup(&self, id: u64) -> Option<Arc<Chunk>> {
        self.entries
            .read()
            .ok()
            .and_then(|map| map.get(&id).cloned())
    }

    fn touch(&self, id: u64) {
        let mut order = self.order.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pos) = order.iter().position(|c| *c == id) {
            if let Some(entry) = order.remove(pos) {
                order.push_back(entry);
            }
        }
    }

    fn remove_from_order(&self, id: u64) {
        let mut order = self.order.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pos) = order.iter().position(|c| *c == id) {
            order.remove(pos);
        }
    }

    fn enforce_capacity(&self) {
        let mut victims: Vec<u64> = Vec::new();
        {
            let mut order = self.order.lock().unwrap_or_else(PoisonError::into_inner);
            while order.len() > self.capacity {
                if let Some(old) = order.pop_front() {
                    victims.push(old);
                }
            }
        }
        if victims.is_empty() {
            return;
        }
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        for id in victims {
            if entries.remove(&id).is_some() {
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}
