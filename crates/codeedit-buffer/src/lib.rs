//! # codeedit Buffer
//!
//! Text storage and block geometry for the code editor component.
//!
//! ## Key Concepts
//!
//! ### Blocks
//! A *block* is one line of the document. The editor never owns blocks; it
//! walks them through [`Block`] handles borrowed from a [`BlockLayout`]:
//!
//! ```text
//!   block 0  ┌───────────────┐ y = 0
//!            │ package main  │ height = line height
//!   block 1  ├───────────────┤
//!            │ (hidden)      │ height = 0
//!   block 2  ├───────────────┤
//!            │ func main() { │
//!            └───────────────┘
//! ```
//!
//! ### Ownership & Borrowing
//! - `TextBuffer` owns the rope data structure
//! - `Block<'a>` borrows the layout, so a handle can never outlive the
//!   geometry it describes

mod buffer;
mod cursor;
mod geometry;
mod layout;

pub use buffer::{BlockEdit, TextBuffer};
pub use cursor::{Cursor, Motion, Position};
pub use geometry::{Point, Rect};
pub use layout::{Block, BlockLayout};

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("Position {line}:{column} is out of bounds")]
    PositionOutOfBounds { line: usize, column: usize },

    #[error("Invalid character index: {0}")]
    InvalidCharIndex(usize),

    #[error("Block {block} is out of range (document has {count} blocks)")]
    BlockOutOfRange { block: usize, count: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
