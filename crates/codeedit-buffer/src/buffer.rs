//! Core text buffer implementation using rope data structure.
//!
//! ## Why Rope?
//!
//! Traditional text editors use gap buffers or arrays, but ropes excel at:
//! - **Large files**: O(log n) insertions/deletions vs O(n) for arrays
//! - **Line lookups**: char ↔ line conversion is O(log n), which is what
//!   block-by-block highlighting and painting lean on
//!
//! ## Learning: Ownership in Action
//!
//! ```rust,ignore
//! let buffer = TextBuffer::new();     // buffer OWNS the rope
//! let text = buffer.block_text(0)?;   // text BORROWS from buffer
//! // buffer.insert(0, "x");           // ERROR! Can't mutate while borrowed
//! drop(text);                         // Release borrow
//! buffer.insert(0, "x");              // Now OK!
//! ```

use ropey::Rope;
use std::borrow::Cow;
use std::ops::Range;
use std::path::Path;

use crate::{BufferError, BufferResult, Position};

/// Which blocks an edit replaced.
///
/// Blocks `first..first + removed` of the old text became blocks
/// `first..first + added` of the new text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockEdit {
    pub first: usize,
    pub removed: usize,
    pub added: usize,
}

impl BlockEdit {
    /// True when the edit changed the number of blocks.
    pub fn changes_count(&self) -> bool {
        self.removed != self.added
    }
}

/// A text buffer backed by a rope data structure.
///
/// # Thread Safety
///
/// `TextBuffer` is `Send` but not `Sync` - it can be moved between threads
/// but shouldn't be accessed from multiple threads simultaneously.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    /// The rope holding our text content
    rope: Rope,

    /// Whether the buffer changed since it was loaded
    modified: bool,

    /// Associated file path (if any)
    file_path: Option<std::path::PathBuf>,
}

impl TextBuffer {
    /// Creates a new empty buffer.
    ///
    /// # Example
    /// ```
    /// use codeedit_buffer::TextBuffer;
    ///
    /// let buffer = TextBuffer::new();
    /// assert!(buffer.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a buffer from a file.
    ///
    /// # Learning: Error Handling with `?`
    ///
    /// The `?` operator propagates errors up the call stack, converting
    /// `std::io::Error` into `BufferError::Io` through the `#[from]` impl.
    pub fn from_file(path: impl AsRef<Path>) -> BufferResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        Ok(Self {
            rope: Rope::from_str(&content),
            modified: false,
            file_path: Some(path.to_path_buf()),
        })
    }

    // ==================== Text Access ====================

    /// Returns the entire text content.
    #[inline]
    pub fn text(&self) -> Cow<'_, str> {
        self.rope.slice(..).into()
    }

    /// Returns the text of a block without its line terminator.
    pub fn block_text(&self, block: usize) -> BufferResult<Cow<'_, str>> {
        if block >= self.block_count() {
            return Err(BufferError::BlockOutOfRange {
                block,
                count: self.block_count(),
            });
        }
        let line: Cow<'_, str> = self.rope.line(block).into();
        Ok(match line {
            Cow::Borrowed(s) => Cow::Borrowed(s.trim_end_matches(['\n', '\r'])),
            Cow::Owned(mut s) => {
                let len = s.trim_end_matches(['\n', '\r']).len();
                s.truncate(len);
                Cow::Owned(s)
            }
        })
    }

    /// Returns a slice of text by character range.
    pub fn slice(&self, range: Range<usize>) -> BufferResult<Cow<'_, str>> {
        if range.start > range.end || range.end > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(range.end));
        }
        Ok(self.rope.slice(range).into())
    }

    // ==================== Measurements ====================

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Returns the number of characters in the buffer.
    #[inline]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns the number of blocks (lines) in the buffer.
    ///
    /// An empty buffer has 1 block. A buffer ending with `\n` counts
    /// the empty block after it.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Returns the length of a block in characters, excluding the terminator.
    pub fn block_len(&self, block: usize) -> BufferResult<usize> {
        Ok(self.block_text(block)?.chars().count())
    }

    // ==================== Mutations ====================

    /// Inserts text at a character index.
    ///
    /// # Learning: `&mut self`
    ///
    /// This method requires exclusive (mutable) access to the buffer.
    /// Rust's borrow checker ensures no other code can read or write
    /// the buffer while this method executes.
    pub fn insert(&mut self, char_idx: usize, text: &str) -> BufferResult<BlockEdit> {
        if char_idx > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(char_idx));
        }

        let first = self.rope.char_to_line(char_idx);
        let before = self.block_count();
        self.rope.insert(char_idx, text);
        self.modified = true;

        Ok(BlockEdit {
            first,
            removed: 1,
            added: 1 + self.block_count() - before,
        })
    }

    /// Inserts text at a line:column position.
    pub fn insert_at(&mut self, pos: Position, text: &str) -> BufferResult<BlockEdit> {
        let char_idx = self.position_to_char_idx(pos)?;
        self.insert(char_idx, text)
    }

    /// Deletes text in a character range.
    pub fn delete(&mut self, range: Range<usize>) -> BufferResult<BlockEdit> {
        if range.start > range.end || range.end > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(range.end));
        }

        let first = self.rope.char_to_line(range.start);
        let last = self.rope.char_to_line(range.end);
        let before = self.block_count();
        self.rope.remove(range);
        self.modified = true;

        let removed = last - first + 1;
        Ok(BlockEdit {
            first,
            removed,
            added: removed + self.block_count() - before,
        })
    }

    /// Replaces the whole content.
    pub fn set_text(&mut self, text: &str) -> BlockEdit {
        let removed = self.block_count();
        self.rope = Rope::from_str(text);
        self.modified = true;
        BlockEdit {
            first: 0,
            removed,
            added: self.block_count(),
        }
    }

    // ==================== Position Conversion ====================

    /// Converts a Position (line, column) to a character index.
    ///
    /// # Learning: Bounds Checking
    ///
    /// We validate input before operations to maintain invariants.
    /// This prevents panics and provides meaningful error messages.
    pub fn position_to_char_idx(&self, pos: Position) -> BufferResult<usize> {
        if pos.line >= self.block_count() {
            return Err(BufferError::PositionOutOfBounds {
                line: pos.line,
                column: pos.column,
            });
        }

        let line_start = self.rope.line_to_char(pos.line);
        let line_len = self.block_len(pos.line)?;

        // Column may sit at the end of the line (for insertion)
        if pos.column > line_len {
            return Err(BufferError::PositionOutOfBounds {
                line: pos.line,
                column: pos.column,
            });
        }

        Ok(line_start + pos.column)
    }

    /// Converts a character index to a Position (line, column).
    pub fn char_idx_to_position(&self, char_idx: usize) -> BufferResult<Position> {
        if char_idx > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(char_idx));
        }

        let line = self.rope.char_to_line(char_idx);
        let line_start = self.rope.line_to_char(line);

        Ok(Position {
            line,
            column: char_idx - line_start,
        })
    }

    // ==================== State Queries ====================

    /// Returns true if the buffer changed since it was loaded.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Returns the associated file path, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }
}

impl From<&str> for TextBuffer {
    fn from(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
            modified: false,
            file_path: None,
        }
    }
}

impl From<String> for TextBuffer {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}
