//! Document notifications.
//!
//! ## Learning: Events as Values
//!
//! The document never calls back into the editor. It pushes plain enum values
//! into a queue, and whoever owns the document drains the queue after each
//! edit. There is exactly one consumer and it lives on the same thread, so a
//! `VecDeque` is all the machinery needed: no channels, no shared ownership,
//! no lifetimes tying the document to its observer.

use std::collections::VecDeque;

use codeedit_buffer::Rect;

/// Notifications emitted by a [`Document`](crate::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEvent {
    /// Blocks `first..first + removed` were replaced by `added` new blocks.
    ContentsChanged {
        first: usize,
        removed: usize,
        added: usize,
    },

    /// The number of blocks changed; carries the new count.
    BlockCountChanged(usize),

    /// Part of the viewport needs repainting. `dy` is non-zero when the
    /// content scrolled by that many pixels.
    UpdateRequest { rect: Rect, dy: i32 },
}

/// FIFO of pending notifications.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<DocumentEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an event.
    pub fn emit(&mut self, event: DocumentEvent) {
        tracing::trace!(?event, "document event");
        self.events.push_back(event);
    }

    /// Removes and yields every queued event, oldest first.
    pub fn drain(&mut self) -> std::collections::vec_deque::Drain<'_, DocumentEvent> {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
