// model = "claude-opus-4-5"
// created = "2026-08-01"
// modified = "2026-08-02"
// driver = "Isaac Clayton"

//! Piecewise - a piece-table buffer with unbounded undo/redo.
//!
//! The buffer is generic over its element type; the canonical instantiation
//! is `Buffer<char>`, the document model of a text editor. Edits never move
//! stored elements: new elements are appended to page-sized chunks, and the
//! logical content is described by an ordered list of windows into them.
//! Runs of typed characters and runs of backspaces each undo in one step.
//!
//! # Quick Start
//!
//! ```
//! use piecewise::buffer::Buffer;
//!
//! // Create a document
//! let mut doc = Buffer::from_str("Hello World");
//!
//! // Edit it
//! doc.insert(5, ',').unwrap();
//! doc.insert(doc.size(), '!').unwrap();
//! assert_eq!(doc.to_string(), "Hello, World!");
//!
//! // Take it back
//! doc.undo().unwrap();
//! assert_eq!(doc.to_string(), "Hello, World");
//! ```

pub mod buffer;
mod chunk;
mod history;
mod text;
