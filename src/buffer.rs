// model = "claude-opus-4-5"
// created = "2026-08-01"
// modified = "2026-08-02"
// driver = "Isaac Clayton"

//! A generic piece-table buffer with unbounded undo/redo.
//!
//! The buffer presents an ordered sequence of elements supporting indexed
//! reads, single-element insertion and deletion at arbitrary positions, and
//! full history traversal. Key design decisions:
//!
//! 1. **Append-only storage.** Elements live in page-sized chunks that are
//!    only ever appended to (see [`crate::chunk`]). Editing never moves an
//!    element; it only rearranges the descriptors below.
//!
//! 2. **Pieces.** The logical content is the in-order concatenation of
//!    pieces, each a `(chunk, start, length)` window into the store. An
//!    insertion splits at most one piece; a deletion trims or splits at most
//!    one piece. Position lookups are linear scans over the piece list.
//!
//! 3. **Integer coordinates everywhere.** Pieces name chunks by index and
//!    the journal names positions by logical index, so nothing holds a
//!    reference into anything else and the whole structure is trivially
//!    movable and cloneable.
//!
//! 4. **History replays by logical position.** Journaled edits locate their
//!    span by logical index at undo/redo time and split the covering piece
//!    when a span edge falls inside one. Live pieces are never merged, so a
//!    span's content is always a contiguous run of the sequence no matter
//!    how the pieces around it have fragmented since the edit was recorded.

use std::fmt;

use crate::chunk::ChunkStore;
use crate::history::Edit;
use crate::history::EditLog;

/// A window into the chunk store: `length` elements beginning at
/// `start` within `chunk`, continuing into following chunks when the
/// window extends past the end of `chunk`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Piece {
    pub chunk: usize,
    pub start: usize,
    pub length: usize,
}

/// Errors returned by buffer operations.
///
/// No operation mutates any state before returning an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferError {
    /// The index lies outside the logical content.
    OutOfBounds,
    /// Undo was called with nothing left to undo.
    BottomOfHistory,
    /// Redo was called with nothing left to redo.
    TopOfHistory,
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::OutOfBounds => return write!(f, "index out of bounds"),
            BufferError::BottomOfHistory => return write!(f, "reached bottom of undo history"),
            BufferError::TopOfHistory => return write!(f, "reached top of undo history"),
        }
    }
}

impl std::error::Error for BufferError {}

/// A piece-table buffer over elements of type `T`.
#[derive(Clone, Debug)]
pub struct Buffer<T> {
    pub(crate) store: ChunkStore<T>,
    pub(crate) pieces: Vec<Piece>,
    pub(crate) log: EditLog,
    pub(crate) size: usize,
}

impl<T> Buffer<T> {
    /// An empty buffer.
    pub fn new() -> Buffer<T> {
        return Buffer {
            store: ChunkStore::new(),
            pieces: Vec::new(),
            log: EditLog::new(),
            size: 0,
        };
    }

    /// A buffer holding `content`, stored as a single piece over a first
    /// chunk sized exactly to it.
    pub fn from_slice(content: &[T]) -> Buffer<T>
    where
        T: Clone,
    {
        let mut store = ChunkStore::preloaded(content.len());
        for item in content {
            store.seed(item.clone());
        }
        let mut pieces = Vec::new();
        if !content.is_empty() {
            pieces.push(Piece { chunk: 0, start: 0, length: content.len() });
        }
        return Buffer {
            store,
            pieces,
            log: EditLog::new(),
            size: content.len(),
        };
    }

    /// The logical length.
    pub fn size(&self) -> usize {
        return self.size;
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        return self.size == 0;
    }

    /// The element at logical index `idx`.
    pub fn get(&self, idx: usize) -> Result<&T, BufferError> {
        let (pidx, disp) = self.find_piece(idx)?;
        let (chunk, offset) = self.resolve(self.pieces[pidx], disp);
        return Ok(self.store.get(chunk, offset));
    }

    /// Snapshot of the logical range `[start, end)`.
    pub fn slice(&self, start: usize, end: usize) -> Result<Vec<T>, BufferError>
    where
        T: Clone,
    {
        if start > end || end > self.size {
            return Err(BufferError::OutOfBounds);
        }
        let mut out = Vec::with_capacity(end - start);
        for idx in start..end {
            out.push(self.get(idx)?.clone());
        }
        return Ok(out);
    }

    /// Snapshot of the whole logical content.
    pub fn content(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.size);
        for piece in &self.pieces {
            self.collect_piece(*piece, &mut out);
        }
        return out;
    }

    /// Insert `item` so that it becomes the element at logical index `idx`.
    ///
    /// `idx` may equal the current size (append). Inserting into an empty
    /// buffer succeeds regardless of `idx`.
    pub fn insert(&mut self, idx: usize, item: T) -> Result<(), BufferError> {
        if self.pieces.is_empty() {
            self.insert_first(item);
            return Ok(());
        }

        let (pidx, disp) = self.find_piece_for_insert(idx)?;
        self.log.truncate_redo();
        self.size += 1;

        let target = self.pieces[pidx];
        let active = self.store.active_id();
        // The coordinate must be captured before the append: if the append
        // fills the active chunk, the element still landed in it.
        let new_piece = Piece { chunk: active, start: self.store.active_len(), length: 1 };
        self.store.append(item);

        // Appending directly after a piece.
        if disp == target.length {
            let (chunk, offset) = self.resolve(target, target.length - 1);
            // The piece ends at the element written just before ours, and
            // the newest record is an insertion: this append extends that
            // typing run, so grow the piece instead of recording anew. A
            // deletion in between must start a fresh record.
            if self.log.last_is_insertion()
                && chunk == active
                && offset + 2 == self.store.chunk_len(chunk)
            {
                self.log.extend_last_insertion();
                self.pieces[pidx].length += 1;
                return Ok(());
            }

            self.pieces.insert(pidx + 1, new_piece);
            self.log.push(Edit::Insertion { idx, piece: new_piece });
            return Ok(());
        }

        // Inserting in front of a piece.
        if disp == 0 {
            self.pieces.insert(pidx, new_piece);
            self.log.push(Edit::Insertion { idx, piece: new_piece });
            return Ok(());
        }

        // Inserting in the middle: split the piece around the new element.
        let right = Piece {
            chunk: target.chunk,
            start: target.start + disp,
            length: target.length - disp,
        };
        let left = Piece { chunk: target.chunk, start: target.start, length: disp };
        self.pieces[pidx] = right;
        self.pieces.insert(pidx, new_piece);
        self.pieces.insert(pidx, left);

        self.log.push(Edit::Insertion { idx, piece: new_piece });
        return Ok(());
    }

    /// First insertion into a buffer with no pieces.
    fn insert_first(&mut self, item: T) {
        self.log.truncate_redo();
        self.size += 1;
        let new_piece = Piece {
            chunk: self.store.active_id(),
            start: self.store.active_len(),
            length: 1,
        };
        self.store.append(item);
        self.pieces.push(new_piece);
        self.log.push(Edit::Insertion { idx: 0, piece: new_piece });
    }

    /// Remove the element at logical index `idx`.
    pub fn delete(&mut self, idx: usize) -> Result<(), BufferError> {
        let (pidx, disp) = self.find_piece(idx)?;
        self.log.truncate_redo();
        self.size -= 1;

        let piece = self.pieces[pidx];
        let (chunk, offset) = self.resolve(piece, disp);
        let removed = Piece { chunk, start: offset, length: 1 };

        if disp == piece.length - 1 {
            // Last element of the piece: trim the end.
            self.pieces[pidx].length -= 1;
            self.record_deletion(idx, removed);
        } else if disp == 0 {
            // First element of the piece: trim the start.
            self.pieces[pidx].start += 1;
            self.pieces[pidx].length -= 1;
            self.record_deletion(idx, removed);

            // A non-empty piece's start must stay inside its first chunk.
            if self.pieces[pidx].start == self.store.chunk_len(self.pieces[pidx].chunk) {
                self.pieces[pidx].chunk += 1;
                self.pieces[pidx].start = 0;
            }
        } else {
            // Interior element: split, keeping everything after it to the
            // right of the gap.
            let (rchunk, roffset) = self.resolve(piece, disp + 1);
            let right = Piece {
                chunk: rchunk,
                start: roffset,
                length: piece.length - (disp + 1),
            };
            self.pieces[pidx].length = disp;
            self.pieces.insert(pidx + 1, right);
            self.record_deletion(idx, removed);
        }

        // Zero-length pieces are dropped, never kept. Adjacent pieces that
        // now describe contiguous chunk regions are deliberately not merged;
        // journaled spans rely on piece boundaries staying put.
        if self.pieces[pidx].length == 0 {
            self.pieces.remove(pidx);
        }

        return Ok(());
    }

    /// Undo the newest applied edit. Returns the logical index where an
    /// editor cursor should settle.
    pub fn undo(&mut self) -> Result<usize, BufferError> {
        let edit = match self.log.step_back() {
            Some(edit) => edit,
            None => return Err(BufferError::BottomOfHistory),
        };
        match &edit {
            Edit::Insertion { idx, piece } => self.remove_span(*idx, piece.length),
            Edit::Deletion { idx, length, removed } => self.insert_span(*idx, removed, *length),
        }
        return Ok(edit.undo_index());
    }

    /// Reapply the newest undone edit. Returns the logical index where an
    /// editor cursor should settle.
    pub fn redo(&mut self) -> Result<usize, BufferError> {
        let edit = match self.log.step_forward() {
            Some(edit) => edit,
            None => return Err(BufferError::TopOfHistory),
        };
        match &edit {
            Edit::Insertion { idx, piece } => {
                self.insert_span(*idx, std::slice::from_ref(piece), piece.length);
            }
            Edit::Deletion { idx, length, .. } => self.remove_span(*idx, *length),
        }
        return Ok(edit.redo_index());
    }

    /// Record a single-element deletion, folding it into the previous record
    /// when it continues a leftward deletion run.
    fn record_deletion(&mut self, idx: usize, removed: Piece) {
        if self.log.last_deletion_index() == Some(idx + 1) {
            let merged = match self.log.first_removed_piece() {
                Some(first) => self.try_merge(removed, first),
                None => None,
            };
            self.log.coalesce_deletion(idx, removed, merged);
            return;
        }
        self.log.push(Edit::Deletion { idx, length: 1, removed: vec![removed] });
    }

    /// A single piece covering both windows, when `right` begins at the
    /// element immediately after `left`'s last one.
    fn try_merge(&self, left: Piece, right: Piece) -> Option<Piece> {
        let (chunk, offset) = self.resolve(left, left.length - 1);
        let flush = if offset + 1 == self.store.chunk_len(chunk) {
            // Left ends a chunk; right must open the next one.
            right.chunk == chunk + 1 && right.start == 0
        } else {
            right.chunk == chunk && right.start == offset + 1
        };
        if !flush {
            return None;
        }
        return Some(Piece { length: left.length + right.length, ..left });
    }

    /// Split the piece at `pidx` so that a piece boundary falls `disp`
    /// elements into it, and return the index just after the split point.
    /// A `disp` already on a boundary is a no-op.
    fn split_at(&mut self, pidx: usize, disp: usize) -> usize {
        if disp == 0 {
            return pidx;
        }
        let piece = self.pieces[pidx];
        if disp == piece.length {
            return pidx + 1;
        }
        let (chunk, start) = self.resolve(piece, disp);
        let tail = Piece { chunk, start, length: piece.length - disp };
        self.pieces[pidx].length = disp;
        self.pieces.insert(pidx + 1, tail);
        return pidx + 1;
    }

    /// Remove the logical span `[idx, idx + length)` from the piece
    /// sequence.
    ///
    /// Journaled spans usually begin on a piece boundary, but redoing an
    /// insertion restores a fragmented run as one piece, so a span edge can
    /// land mid-piece; the edges are split first to make the removal exact.
    fn remove_span(&mut self, idx: usize, length: usize) {
        let (pidx, disp) = self.find_piece(idx).expect("journaled span must resolve");
        let pidx = self.split_at(pidx, disp);
        let mut remaining = length;
        while remaining > 0 {
            let piece = self.pieces[pidx];
            if piece.length <= remaining {
                self.pieces.remove(pidx);
                remaining -= piece.length;
            } else {
                // The span ends inside this piece: trim its front.
                let (chunk, start) = self.resolve(piece, remaining);
                self.pieces[pidx] = Piece { chunk, start, length: piece.length - remaining };
                remaining = 0;
            }
        }
        self.size -= length;
    }

    /// Insert `pieces` in order so their first element lands at logical
    /// index `idx`, splitting the covering piece when the seam falls inside
    /// one. `length` is the combined element count.
    fn insert_span(&mut self, idx: usize, pieces: &[Piece], length: usize) {
        let at = if self.pieces.is_empty() {
            0
        } else {
            let (pidx, disp) = self.find_piece_for_insert(idx).expect("journaled span must resolve");
            self.split_at(pidx, disp)
        };
        for (i, piece) in pieces.iter().enumerate() {
            self.pieces.insert(at + i, *piece);
        }
        self.size += length;
    }

    /// The piece holding logical index `idx`, as `(piece_index, displacement)`.
    fn find_piece(&self, idx: usize) -> Result<(usize, usize), BufferError> {
        let mut covered = 0;
        for (pidx, piece) in self.pieces.iter().enumerate() {
            let next = covered + piece.length;
            if next > idx {
                return Ok((pidx, idx - covered));
            }
            covered = next;
        }
        return Err(BufferError::OutOfBounds);
    }

    /// Like [`Buffer::find_piece`], but `idx` equal to the running total
    /// resolves to the end of the piece, so `idx == size` names the append
    /// position after the last piece.
    fn find_piece_for_insert(&self, idx: usize) -> Result<(usize, usize), BufferError> {
        let mut covered = 0;
        for (pidx, piece) in self.pieces.iter().enumerate() {
            let next = covered + piece.length;
            if next >= idx {
                return Ok((pidx, idx - covered));
            }
            covered = next;
        }
        return Err(BufferError::OutOfBounds);
    }

    /// The chunk coordinate of the element `disp` positions into `piece`,
    /// walking across chunk boundaries as needed.
    fn resolve(&self, piece: Piece, disp: usize) -> (usize, usize) {
        if piece.start + disp < self.store.chunk_len(piece.chunk) {
            return (piece.chunk, piece.start + disp);
        }

        let mut covered = self.store.chunk_len(piece.chunk) - piece.start;
        let mut chunk = piece.chunk + 1;
        loop {
            let next = covered + self.store.chunk_len(chunk);
            if next > disp {
                return (chunk, disp - covered);
            }
            chunk += 1;
            covered = next;
        }
    }

    /// Append the elements of `piece` onto `out`.
    pub(crate) fn collect_piece(&self, piece: Piece, out: &mut Vec<T>)
    where
        T: Clone,
    {
        let mut chunk = piece.chunk;
        let mut offset = piece.start;
        for _ in 0..piece.length {
            if offset >= self.store.chunk_len(chunk) {
                offset = 0;
                chunk += 1;
            }
            out.push(self.store.get(chunk, offset).clone());
            offset += 1;
        }
    }
}

impl<T> Default for Buffer<T> {
    fn default() -> Self {
        return Self::new();
    }
}
