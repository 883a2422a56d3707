//! The document model behind an editor.
//!
//! ## Learning: Composition over Inheritance
//!
//! Rust doesn't have inheritance. `Document` composes a `TextBuffer` (the
//! text), a `BlockLayout` (where each line sits on screen), a `Cursor` and the
//! per-block format store, and keeps them consistent: every edit goes through
//! [`Document::apply`], which updates all four and queues the notifications
//! the editor reacts to.

use std::borrow::Cow;
use std::path::Path;

use codeedit_buffer::{
    Block, BlockEdit, BlockLayout, BufferError, Cursor, Motion, Position, Rect, TextBuffer,
};
use codeedit_syntax::{Highlighter, Span};

use crate::event::{DocumentEvent, EventQueue};
use crate::CoreResult;

/// An edit or view change applied to a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    /// Types a character at the cursor
    Insert(char),
    /// Pastes text at the cursor
    InsertText(String),
    Newline,
    /// Deletes the character before the cursor
    Backspace,
    /// Deletes the character after the cursor
    Delete,
    Move(Motion),
    /// Scrolls by a pixel delta (positive scrolls down)
    ScrollBy(i32),
    /// Replaces the whole text
    SetText(String),
    /// Shows or hides one block
    SetBlockVisible(usize, bool),
    /// Resizes the viewport
    Resize(i32, i32),
}

/// A single text document with its layout and highlight state.
#[derive(Debug)]
pub struct Document {
    buffer: TextBuffer,
    layout: BlockLayout,
    cursor: Cursor,

    /// Spans per block, indexed by block number
    formats: Vec<Vec<Span>>,

    /// Language the highlighter was built for
    language: String,

    events: EventQueue,
}

impl Document {
    /// Creates a document holding `text`.
    pub fn new(text: &str, language: impl Into<String>, line_height: i32) -> Self {
        Self::from_buffer(TextBuffer::from(text), language.into(), line_height)
    }

    /// Opens a document from a file, detecting its language from the name.
    ///
    /// Unknown extensions use `fallback_language`.
    pub fn open(path: impl AsRef<Path>, fallback_language: &str, line_height: i32) -> CoreResult<Self> {
        let path = path.as_ref();
        let buffer = TextBuffer::from_file(path)?;
        let detected = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(codeedit_syntax::detect_language)
            .unwrap_or("text");
        let language = if detected == "text" {
            fallback_language
        } else {
            detected
        };
        tracing::info!(path = %path.display(), language, blocks = buffer.block_count(), "opened document");
        Ok(Self::from_buffer(buffer, language.to_string(), line_height))
    }

    /// Replaces the language, e.g. when the user overrides detection.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    fn from_buffer(buffer: TextBuffer, language: String, line_height: i32) -> Self {
        let count = buffer.block_count();
        Self {
            layout: BlockLayout::new(count, line_height),
            formats: vec![Vec::new(); count],
            cursor: Cursor::default(),
            buffer,
            language,
            events: EventQueue::new(),
        }
    }

    // ==================== Getters ====================

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn layout(&self) -> &BlockLayout {
        &self.layout
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn text(&self) -> Cow<'_, str> {
        self.buffer.text()
    }

    pub fn block_count(&self) -> usize {
        self.buffer.block_count()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.buffer.file_path()
    }

    /// Text of one block, without its line terminator.
    pub fn block_text(&self, block: usize) -> CoreResult<Cow<'_, str>> {
        Ok(self.buffer.block_text(block)?)
    }

    /// Highlight spans of one block (empty for unknown blocks).
    pub fn block_formats(&self, block: usize) -> &[Span] {
        self.formats.get(block).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first_visible_block(&self) -> Block<'_> {
        self.layout.first_visible_block()
    }

    /// Offset mapping document coordinates to viewport coordinates.
    pub fn content_offset_y(&self) -> i32 {
        self.layout.content_offset_y()
    }

    /// The viewport in its own coordinates.
    pub fn viewport_rect(&self) -> Rect {
        Rect::new(0, 0, self.layout.width(), self.layout.viewport_height())
    }

    /// Takes every notification queued since the last call.
    pub fn take_events(&mut self) -> Vec<DocumentEvent> {
        self.events.drain().collect()
    }

    // ==================== Highlighting ====================

    /// Recomputes the spans of `block` from scratch.
    pub fn rehighlight(&mut self, block: usize, highlighter: &Highlighter) -> CoreResult<()> {
        let text = self.buffer.block_text(block)?;
        let count = self.formats.len();
        let formats = self
            .formats
            .get_mut(block)
            .ok_or(BufferError::BlockOutOfRange { block, count })?;
        formats.clear();
        highlighter.highlight_block(&text, formats);
        Ok(())
    }

    // ==================== Editing ====================

    /// Applies an action and queues the resulting notifications.
    pub fn apply(&mut self, action: EditAction) -> CoreResult<()> {
        match action {
            EditAction::Insert(c) => {
                let mut buf = [0; 4];
                self.insert_text(c.encode_utf8(&mut buf))
            }
            EditAction::InsertText(text) => self.insert_text(&text),
            EditAction::Newline => self.insert_text("\n"),
            EditAction::Backspace => self.delete_backward(),
            EditAction::Delete => self.delete_forward(),
            EditAction::Move(motion) => {
                self.move_cursor(motion);
                Ok(())
            }
            EditAction::ScrollBy(dy) => {
                self.scroll_to(self.layout.scroll_y() + dy);
                Ok(())
            }
            EditAction::SetText(text) => {
                let edit = self.buffer.set_text(&text);
                self.cursor.move_to(Position::ZERO);
                self.after_edit(edit)
            }
            EditAction::SetBlockVisible(block, visible) => {
                self.layout.set_visible(block, visible)?;
                self.request_viewport_update();
                Ok(())
            }
            EditAction::Resize(width, height) => {
                self.layout.set_viewport(width, height);
                self.request_viewport_update();
                Ok(())
            }
        }
    }

    fn cursor_char_idx(&self) -> CoreResult<usize> {
        let position = self.cursor.clamped(&self.buffer).position;
        Ok(self.buffer.position_to_char_idx(position)?)
    }

    fn insert_text(&mut self, text: &str) -> CoreResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let idx = self.cursor_char_idx()?;
        let edit = self.buffer.insert(idx, text)?;

        let new_pos = self
            .buffer
            .char_idx_to_position(idx + text.chars().count())?;
        self.cursor.move_to(new_pos);
        self.after_edit(edit)
    }

    fn delete_backward(&mut self) -> CoreResult<()> {
        let idx = self.cursor_char_idx()?;
        if idx == 0 {
            return Ok(());
        }
        let edit = self.buffer.delete(idx - 1..idx)?;
        let new_pos = self.buffer.char_idx_to_position(idx - 1)?;
        self.cursor.move_to(new_pos);
        self.after_edit(edit)
    }

    fn delete_forward(&mut self) -> CoreResult<()> {
        let idx = self.cursor_char_idx()?;
        if idx >= self.buffer.len_chars() {
            return Ok(());
        }
        let edit = self.buffer.delete(idx..idx + 1)?;
        self.after_edit(edit)
    }

    fn move_cursor(&mut self, motion: Motion) {
        let old_line = self.cursor.position.line;
        self.cursor.apply(motion, &self.buffer);
        let new_line = self.cursor.position.line;

        // Repaint the caret's old and new lines.
        let rect = self
            .block_viewport_rect(old_line)
            .united(&self.block_viewport_rect(new_line));
        self.events
            .emit(DocumentEvent::UpdateRequest { rect, dy: 0 });
        self.ensure_cursor_visible();
    }

    /// Brings the layout and format store in line with a buffer edit.
    fn after_edit(&mut self, edit: BlockEdit) -> CoreResult<()> {
        let BlockEdit {
            first,
            removed,
            added,
        } = edit;
        self.layout.splice(first, removed, added)?;
        self.formats
            .splice(first..first + removed, std::iter::repeat_n(Vec::new(), added));

        self.events.emit(DocumentEvent::ContentsChanged {
            first,
            removed,
            added,
        });

        let rect = if edit.changes_count() {
            self.events
                .emit(DocumentEvent::BlockCountChanged(self.block_count()));
            // Everything below the edit moved.
            let top = self.block_viewport_rect(first).top();
            let viewport = self.viewport_rect();
            Rect::new(0, top, viewport.width, (viewport.bottom() - top).max(0))
        } else {
            self.block_viewport_rect(first)
        };
        self.events
            .emit(DocumentEvent::UpdateRequest { rect, dy: 0 });

        self.ensure_cursor_visible();
        Ok(())
    }

    /// A block's rect in viewport coordinates.
    fn block_viewport_rect(&self, block: usize) -> Rect {
        self.layout
            .block(block)
            .bounding_geometry()
            .translated(0, self.layout.content_offset_y())
    }

    fn request_viewport_update(&mut self) {
        let rect = self.viewport_rect();
        self.events
            .emit(DocumentEvent::UpdateRequest { rect, dy: 0 });
    }

    fn scroll_to(&mut self, y: i32) {
        let dy = self.layout.set_scroll_y(y);
        if dy != 0 {
            let rect = self.viewport_rect();
            self.events.emit(DocumentEvent::UpdateRequest { rect, dy });
        }
    }

    /// Scrolls just enough to show the cursor's block.
    fn ensure_cursor_visible(&mut self) {
        let viewport_height = self.layout.viewport_height();
        if viewport_height == 0 {
            return;
        }
        let geometry = self
            .layout
            .block(self.cursor.position.line)
            .bounding_geometry();
        let scroll_y = self.layout.scroll_y();
        if geometry.top() < scroll_y {
            self.scroll_to(geometry.top());
        } else if geometry.bottom() > scroll_y + viewport_height {
            self.scroll_to(geometry.bottom() - viewport_height);
        }
    }
}
