//! Cursor and position types for text navigation.
//!
//! ## Learning: Newtype Pattern
//!
//! `Position` is a struct that wraps line/column coordinates.
//! This is better than using `(usize, usize)` because:
//! - Type safety: Can't accidentally swap line and column
//! - Named fields: Self-documenting code

use serde::{Deserialize, Serialize};

use crate::TextBuffer;

/// A position in the text buffer (line and column).
///
/// Both line and column are 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number (0-indexed, in characters not bytes)
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Position at the start of the document.
    pub const ZERO: Position = Position { line: 0, column: 0 };
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.line
            .cmp(&other.line)
            .then(self.column.cmp(&other.column))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Display as 1-indexed for user-facing output
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// A cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
}

/// The insertion point of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Current cursor position
    pub position: Position,

    /// Preferred column for vertical movement
    /// When moving up/down, cursor tries to maintain this column.
    pub preferred_column: Option<usize>,
}

impl Cursor {
    /// Creates a new cursor at a position.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            preferred_column: None,
        }
    }

    /// Moves to `position`, forgetting the preferred column.
    pub fn move_to(&mut self, position: Position) {
        self.position = position;
        self.preferred_column = None;
    }

    /// Applies a motion, keeping the cursor inside `buffer`.
    pub fn apply(&mut self, motion: Motion, buffer: &TextBuffer) {
        let last_line = buffer.block_count().saturating_sub(1);
        let line_len = |line: usize| buffer.block_len(line).unwrap_or(0);
        let Position { line, column } = self.clamped(buffer).position;

        match motion {
            Motion::Left => {
                if column > 0 {
                    self.move_to(Position::new(line, column - 1));
                } else if line > 0 {
                    self.move_to(Position::new(line - 1, line_len(line - 1)));
                }
            }
            Motion::Right => {
                if column < line_len(line) {
                    self.move_to(Position::new(line, column + 1));
                } else if line < last_line {
                    self.move_to(Position::new(line + 1, 0));
                }
            }
            Motion::Up | Motion::Down => {
                let target = match motion {
                    Motion::Up if line > 0 => line - 1,
                    Motion::Down if line < last_line => line + 1,
                    _ => return,
                };
                let preferred = self.preferred_column.unwrap_or(column);
                self.position = Position::new(target, preferred.min(line_len(target)));
                self.preferred_column = Some(preferred);
            }
            Motion::LineStart => self.move_to(Position::new(line, 0)),
            Motion::LineEnd => self.move_to(Position::new(line, line_len(line))),
            Motion::DocumentStart => self.move_to(Position::ZERO),
            Motion::DocumentEnd => {
                self.move_to(Position::new(last_line, line_len(last_line)));
            }
        }
    }

    /// Returns this cursor pulled back inside `buffer`.
    ///
    /// Edits elsewhere can leave a cursor past the end of its line.
    pub fn clamped(&self, buffer: &TextBuffer) -> Cursor {
        let line = self
            .position
            .line
            .min(buffer.block_count().saturating_sub(1));
        let column = self
            .position
            .column
            .min(buffer.block_len(line).unwrap_or(0));
        Cursor {
            position: Position::new(line, column),
            preferred_column: self.preferred_column,
        }
    }
}
