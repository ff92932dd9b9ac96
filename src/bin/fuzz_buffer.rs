// model = "claude-opus-4-5"
// created = "2026-08-01"
// modified = "2026-08-02"
// driver = "Isaac Clayton"

//! AFL fuzz harness for the piece-table buffer.
//!
//! This harness tests the critical buffer properties:
//! 1. Equivalence: after any insert/delete, the buffer matches a plain
//!    vector reference model element for element
//! 2. Self-consistency: the cached size always equals the content length
//! 3. History round-trip: undoing k edits and redoing k edits restores
//!    the content exactly
//!
//! Model: a single editor applies an arbitrary stream of inserts, deletes,
//! undos, and redos decoded from the fuzzer's byte input.

use afl::fuzz;
use piecewise::buffer::Buffer;

/// Operation types the fuzzer can generate
#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    /// Insert one byte at a position
    Insert { pos_frac: u8, byte: u8 },
    /// Delete the byte at a position
    Delete { pos_frac: u8 },
    /// Step history back
    Undo,
    /// Step history forward
    Redo,
    /// Undo everything, then redo everything, checking the round trip
    RoundTrip,
}

impl FuzzOp {
    fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        if bytes.is_empty() {
            return None;
        }

        let op_type = bytes[0] % 8;
        let rest = &bytes[1..];

        match op_type {
            // Weight edits more heavily than history traversal.
            0 | 1 | 2 if rest.len() >= 2 => {
                let op = FuzzOp::Insert { pos_frac: rest[0], byte: rest[1] };
                Some((op, &rest[2..]))
            }
            3 | 4 if !rest.is_empty() => {
                let op = FuzzOp::Delete { pos_frac: rest[0] };
                Some((op, &rest[1..]))
            }
            5 => Some((FuzzOp::Undo, rest)),
            6 => Some((FuzzOp::Redo, rest)),
            7 => Some((FuzzOp::RoundTrip, rest)),
            _ => None,
        }
    }
}

/// Every element the buffer reports, checked against the cached size.
fn checked_content(buffer: &Buffer<u8>) -> Vec<u8> {
    let content = buffer.content();
    assert_eq!(
        content.len(),
        buffer.size(),
        "cached size diverged from content length",
    );
    for (i, byte) in content.iter().enumerate() {
        assert_eq!(buffer.get(i).unwrap(), byte, "indexed read diverged at {}", i);
    }
    return content;
}

fn main() {
    fuzz!(|data: &[u8]| {
        let mut buffer: Buffer<u8> = Buffer::new();
        let mut model: Vec<u8> = Vec::new();
        let mut remaining = data;

        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            remaining = rest;

            match op {
                FuzzOp::Insert { pos_frac, byte } => {
                    let len = model.len();
                    let pos = ((pos_frac as usize) * (len + 1) / 256).min(len);
                    buffer.insert(pos, byte).expect("in-bounds insert failed");
                    model.insert(pos, byte);
                }

                FuzzOp::Delete { pos_frac } => {
                    let len = model.len();
                    if len > 0 {
                        let pos = ((pos_frac as usize) * len / 256).min(len - 1);
                        buffer.delete(pos).expect("in-bounds delete failed");
                        model.remove(pos);
                    }
                }

                FuzzOp::Undo => {
                    // History may be exhausted; either way the model follows.
                    let _ = buffer.undo();
                    model = buffer.content();
                }

                FuzzOp::Redo => {
                    let _ = buffer.redo();
                    model = buffer.content();
                }

                FuzzOp::RoundTrip => {
                    let snapshot = checked_content(&buffer);
                    let mut undone = 0;
                    while buffer.undo().is_ok() {
                        undone += 1;
                        checked_content(&buffer);
                    }
                    for _ in 0..undone {
                        buffer.redo().expect("redo must mirror every undo");
                    }
                    assert_eq!(
                        checked_content(&buffer),
                        snapshot,
                        "undo/redo round trip changed the content",
                    );
                    model = snapshot;
                }
            }

            assert_eq!(checked_content(&buffer), model, "buffer diverged from model");
        }
    });
}
