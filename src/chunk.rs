// model = "claude-opus-4-5"
// created = "2026-08-01"
// modified = "2026-08-02"
// driver = "Isaac Clayton"

//! Append-only chunked backing storage.
//!
//! Elements are only ever appended, never overwritten or removed, so a
//! `(chunk, offset)` coordinate handed out once stays valid for the life of
//! the store. Exactly one chunk - the last one - accepts appends; filling it
//! seals it forever and opens a fresh one.

use std::mem;

use libc::_SC_PAGESIZE;
use libc::sysconf;

/// Query the system page size.
fn page_size() -> Option<usize> {
    let size = unsafe { sysconf(_SC_PAGESIZE) };
    if size > 0 {
        return Some(size as usize);
    }
    return None;
}

/// How many elements fit in one memory page, at minimum one.
///
/// Sizing chunks to a page keeps individual allocations cheap and
/// locality-friendly no matter how large the buffer grows.
fn default_capacity<T>() -> usize {
    let bytes = page_size().unwrap_or(4096);
    return (bytes / mem::size_of::<T>().max(1)).max(1);
}

/// A single append-only chunk with the capacity it was created with.
#[derive(Clone, Debug)]
struct Chunk<T> {
    content: Vec<T>,
    capacity: usize,
}

impl<T> Chunk<T> {
    fn new(capacity: usize) -> Chunk<T> {
        return Chunk {
            content: Vec::with_capacity(capacity),
            capacity,
        };
    }

    fn len(&self) -> usize {
        return self.content.len();
    }

    /// Fullness is judged against the capacity this chunk was created with,
    /// which for the first chunk of a preloaded store may differ from the
    /// page-derived default.
    fn full(&self) -> bool {
        return self.content.len() == self.capacity;
    }
}

/// Ordered append-only chunks. The last chunk is the active one.
#[derive(Clone, Debug)]
pub struct ChunkStore<T> {
    chunks: Vec<Chunk<T>>,
    chunk_capacity: usize,
}

impl<T> ChunkStore<T> {
    /// An empty store with a single active chunk of the default capacity.
    pub fn new() -> ChunkStore<T> {
        let chunk_capacity = default_capacity::<T>();
        return ChunkStore {
            chunks: vec![Chunk::new(chunk_capacity)],
            chunk_capacity,
        };
    }

    /// A store prepared for seeding: the first chunk is sized exactly to the
    /// initial content, the second is the empty active chunk. Seed elements
    /// with [`ChunkStore::seed`] before performing any appends.
    pub fn preloaded(content_len: usize) -> ChunkStore<T> {
        let chunk_capacity = default_capacity::<T>();
        return ChunkStore {
            chunks: vec![Chunk::new(content_len), Chunk::new(chunk_capacity)],
            chunk_capacity,
        };
    }

    /// Push one element of initial content into the first chunk.
    pub fn seed(&mut self, item: T) {
        self.chunks[0].content.push(item);
    }

    /// Append to the active chunk. If the append fills it, a fresh empty
    /// chunk of the default capacity becomes active.
    pub fn append(&mut self, item: T) {
        let active = self.chunks.last_mut().expect("store always has an active chunk");
        active.content.push(item);
        if active.full() {
            self.chunks.push(Chunk::new(self.chunk_capacity));
        }
    }

    /// Index of the chunk currently accepting appends.
    pub fn active_id(&self) -> usize {
        return self.chunks.len() - 1;
    }

    /// Element count of the active chunk.
    pub fn active_len(&self) -> usize {
        return self.chunks[self.active_id()].len();
    }

    /// Element count of the given chunk.
    pub fn chunk_len(&self, chunk: usize) -> usize {
        return self.chunks[chunk].len();
    }

    /// The element at a coordinate previously obtained via piece resolution.
    pub fn get(&self, chunk: usize, offset: usize) -> &T {
        return &self.chunks[chunk].content[offset];
    }

    /// Total number of elements ever appended, across all chunks.
    pub fn appended_len(&self) -> usize {
        return self.chunks.iter().map(|c| c.len()).sum();
    }
}

impl<T> Default for ChunkStore<T> {
    fn default() -> Self {
        return Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_has_one_empty_active_chunk() {
        let store: ChunkStore<u8> = ChunkStore::new();
        assert_eq!(store.active_id(), 0);
        assert_eq!(store.active_len(), 0);
    }

    #[test]
    fn append_grows_active_chunk() {
        let mut store = ChunkStore::new();
        store.append(1u64);
        store.append(2u64);
        assert_eq!(store.active_len(), 2);
        assert_eq!(*store.get(0, 0), 1);
        assert_eq!(*store.get(0, 1), 2);
    }

    #[test]
    fn filling_active_chunk_opens_a_new_one() {
        let mut store: ChunkStore<u8> = ChunkStore::new();
        let capacity = store.chunk_capacity;
        for i in 0..capacity {
            store.append(i as u8);
        }
        // The filled chunk is sealed; a fresh empty chunk is now active.
        assert_eq!(store.active_id(), 1);
        assert_eq!(store.active_len(), 0);
        assert_eq!(store.chunk_len(0), capacity);
    }

    #[test]
    fn sealed_chunks_remain_readable() {
        let mut store: ChunkStore<u8> = ChunkStore::new();
        let capacity = store.chunk_capacity;
        for i in 0..capacity + 3 {
            store.append(i as u8);
        }
        assert_eq!(*store.get(0, 0), 0);
        assert_eq!(*store.get(1, 2), (capacity + 2) as u8);
        assert_eq!(store.appended_len(), capacity + 3);
    }

    #[test]
    fn preloaded_store_seeds_into_first_chunk() {
        let mut store = ChunkStore::preloaded(3);
        store.seed('a');
        store.seed('b');
        store.seed('c');
        // Appends go to the second chunk, not the seeded one.
        store.append('d');
        assert_eq!(store.chunk_len(0), 3);
        assert_eq!(store.active_id(), 1);
        assert_eq!(*store.get(1, 0), 'd');
    }

    #[test]
    fn first_chunk_capacity_is_per_chunk() {
        // A preloaded first chunk smaller than the default never rolls the
        // store over by itself; only the active chunk's own capacity counts.
        let mut store = ChunkStore::preloaded(1);
        store.seed(7u64);
        assert_eq!(store.active_id(), 1);
        store.append(8u64);
        assert_eq!(store.active_id(), 1);
        assert_eq!(*store.get(1, 0), 8);
    }

    #[test]
    fn default_capacity_is_at_least_one() {
        // Oversized elements still get usable chunks.
        assert!(default_capacity::<[u8; 1 << 20]>() >= 1);
    }
}
