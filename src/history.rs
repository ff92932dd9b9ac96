// model = "claude-opus-4-5"
// created = "2026-08-01"
// modified = "2026-08-02"
// driver = "Isaac Clayton"

//! The edit journal: an append-only list of edits with a movable undo cursor.
//!
//! Design decisions:
//!
//! 1. **Logical coordinates only.** Records locate their edit by logical
//!    index, not by position in the piece sequence. Undoing a deletion
//!    restores content as the journaled removed pieces, which can fragment
//!    what was a single piece; any structural position recorded earlier would
//!    go stale at that moment. Logical indices survive fragmentation.
//!
//! 2. **Coalescing.** A run of appended single-element insertions is one
//!    record whose piece grows in place, and a run of leftward single-element
//!    deletions is one record whose removed list grows leftward. A typing
//!    burst or a backspace burst therefore undoes in one step.
//!
//! 3. **Truncation.** Any mutation that is not an undo or redo first drops
//!    the redoable tail above the cursor. History below the cursor is never
//!    rewritten, only extended or coalesced at the top.

use crate::buffer::Piece;

/// One journaled edit.
///
/// An insertion's elements are the logical span `[idx, idx + piece.length)`;
/// a deletion removed `length` elements starting at `idx`, and `removed`
/// holds their chunk windows in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Edit {
    Insertion { idx: usize, piece: Piece },
    Deletion { idx: usize, length: usize, removed: Vec<Piece> },
}

impl Edit {
    /// Where the cursor settles after this edit is undone: the start of a
    /// reversed insertion, the right end of a restored deletion.
    pub fn undo_index(&self) -> usize {
        match self {
            Edit::Insertion { idx, .. } => return *idx,
            Edit::Deletion { idx, length, .. } => return idx + length,
        }
    }

    /// Where the cursor settles after this edit is reapplied: the end of a
    /// reinserted span, the start of a reapplied deletion.
    pub fn redo_index(&self) -> usize {
        match self {
            Edit::Insertion { idx, piece } => return idx + piece.length,
            Edit::Deletion { idx, .. } => return *idx,
        }
    }
}

/// Journal of edits plus the undo cursor.
///
/// Records below `top` are applied; records at and above `top` are redoable
/// future history.
#[derive(Clone, Debug, Default)]
pub struct EditLog {
    edits: Vec<Edit>,
    top: usize,
}

impl EditLog {
    pub fn new() -> EditLog {
        return EditLog { edits: Vec::new(), top: 0 };
    }

    /// Drop the redoable tail. Every non-undo/redo mutation calls this
    /// before recording anything.
    pub fn truncate_redo(&mut self) {
        self.edits.truncate(self.top);
    }

    /// Append a record and move the cursor above it.
    pub fn push(&mut self, edit: Edit) {
        self.edits.push(edit);
        self.top = self.edits.len();
    }

    /// Step the cursor down one record, returning a copy of the edit to
    /// reverse. `None` at the bottom of history.
    pub fn step_back(&mut self) -> Option<Edit> {
        if self.top == 0 {
            return None;
        }
        self.top -= 1;
        return Some(self.edits[self.top].clone());
    }

    /// Step the cursor up one record, returning a copy of the edit to
    /// reapply. `None` at the top of history.
    pub fn step_forward(&mut self) -> Option<Edit> {
        if self.top == self.edits.len() {
            return None;
        }
        self.top += 1;
        return Some(self.edits[self.top - 1].clone());
    }

    fn last_applied(&self) -> Option<&Edit> {
        if self.top == 0 {
            return None;
        }
        return Some(&self.edits[self.top - 1]);
    }

    /// Whether the newest applied record is an insertion. A deletion between
    /// two typing runs must break the run into separate records.
    pub fn last_is_insertion(&self) -> bool {
        return matches!(self.last_applied(), Some(Edit::Insertion { .. }));
    }

    /// The logical index of the newest applied record, if it is a deletion.
    pub fn last_deletion_index(&self) -> Option<usize> {
        if let Some(Edit::Deletion { idx, .. }) = self.last_applied() {
            return Some(*idx);
        }
        return None;
    }

    /// The first removed piece of the newest applied deletion record.
    pub fn first_removed_piece(&self) -> Option<Piece> {
        if let Some(Edit::Deletion { removed, .. }) = self.last_applied() {
            return removed.first().copied();
        }
        return None;
    }

    /// Grow the newest insertion record by one element. The caller has
    /// already verified the new element extends the journaled run.
    pub fn extend_last_insertion(&mut self) {
        if self.top == 0 {
            return;
        }
        if let Some(Edit::Insertion { piece, .. }) = self.edits.get_mut(self.top - 1) {
            piece.length += 1;
        }
    }

    /// Fold a leftward single-element deletion into the newest deletion
    /// record. When `merged` is given it replaces the head of the removed
    /// list (the new piece was physically flush with it); otherwise the new
    /// piece is prepended.
    pub fn coalesce_deletion(&mut self, idx: usize, removed_piece: Piece, merged: Option<Piece>) {
        if self.top == 0 {
            return;
        }
        if let Some(Edit::Deletion { idx: i, length, removed }) = self.edits.get_mut(self.top - 1) {
            match merged {
                Some(piece) => removed[0] = piece,
                None => removed.insert(0, removed_piece),
            }
            *i = idx;
            *length += 1;
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        return self.edits.len();
    }
}
