// model = "claude-opus-4-5"
// created = "2026-08-01"
// modified = "2026-08-02"
// driver = "Isaac Clayton"

//! The string adapter: a [`Buffer`] of Unicode scalars as document text.

use crate::buffer::Buffer;
use crate::buffer::Piece;
use crate::chunk::ChunkStore;
use crate::history::EditLog;

impl Buffer<char> {
    /// Decode `content` into a buffer of scalars.
    ///
    /// The first chunk is sized to the UTF-8 byte length, a safe
    /// over-approximation of the scalar count, so construction does a single
    /// allocation for the initial content.
    pub fn from_str(content: &str) -> Buffer<char> {
        let mut store = ChunkStore::preloaded(content.len());
        let mut size = 0;
        for c in content.chars() {
            store.seed(c);
            size += 1;
        }
        let mut pieces = Vec::new();
        if size > 0 {
            pieces.push(Piece { chunk: 0, start: 0, length: size });
        }
        return Buffer { store, pieces, log: EditLog::new(), size };
    }

    /// Encode the whole content back into a `String`.
    pub fn to_string(&self) -> String {
        // Pre-size for the worst case of four bytes per scalar.
        let mut out = String::with_capacity(self.store.appended_len() * 4);
        let mut scratch = Vec::new();
        for piece in &self.pieces {
            scratch.clear();
            self.collect_piece(*piece, &mut scratch);
            for c in &scratch {
                out.push(*c);
            }
        }
        return out;
    }
}
