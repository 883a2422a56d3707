//! The editor composite.
//!
//! ## Learning: The Facade Pattern
//!
//! `CodeEditor` is the only thing a host talks to. It owns the document, the
//! highlighter and both painters; the host forwards input as [`EditAction`]s
//! and paint requests as a [`PaintTarget`] plus a region.
//!
//! ```text
//!  x = 0          gutter_width                          width
//!  ┌──────────────┬─────────────────────────────────────┐
//!  │    gutter    │              viewport               │
//!  └──────────────┴─────────────────────────────────────┘
//! ```

use codeedit_buffer::Rect;
use codeedit_syntax::Highlighter;

use crate::config::Config;
use crate::document::{Document, EditAction};
use crate::event::DocumentEvent;
use crate::gutter::{GutterPainter, GutterStyle, width_for};
use crate::paint::{PaintTarget, Surface};
use crate::viewport::{ViewportPainter, ViewportStyle};
use crate::CoreResult;

/// A text viewport with a synchronized line-number gutter.
///
/// ## Thread Safety
///
/// `CodeEditor` is owned by the UI thread. Every method runs to completion
/// before returning; nothing is deferred.
#[derive(Debug)]
pub struct CodeEditor {
    document: Document,

    /// Rules are fixed once built
    highlighter: Highlighter,

    gutter: GutterPainter,
    viewport: ViewportPainter,

    digit_width: i32,
    line_height: i32,

    /// Size of the whole component
    width: i32,
    height: i32,

    /// Recomputed whenever the block count changes
    gutter_width: i32,

    /// Accumulated gutter repaint request, in gutter coordinates
    gutter_update: Option<Rect>,
}

impl CodeEditor {
    /// Builds the editor around `document`.
    ///
    /// The rule table is compiled here, so a malformed configured pattern
    /// fails construction. Every block is highlighted and the gutter width
    /// computed before this returns.
    pub fn new(document: Document, config: &Config) -> CoreResult<Self> {
        let highlighter = Highlighter::new(config.syntax.rule_table(document.language())?);
        tracing::info!(
            language = document.language(),
            rules = highlighter.rules().len(),
            blocks = document.block_count(),
            "creating editor"
        );

        let viewport_style = ViewportStyle {
            text: config.syntax.text,
            ..ViewportStyle::default()
        };
        let gutter_width = width_for(document.block_count(), config.font.digit_width);

        let mut editor = Self {
            document,
            highlighter,
            gutter: GutterPainter::new(GutterStyle::from(&config.gutter)),
            viewport: ViewportPainter::new(viewport_style, config.font.digit_width),
            digit_width: config.font.digit_width,
            line_height: config.font.line_height,
            width: config.editor.width,
            height: config.editor.height,
            gutter_width,
            gutter_update: None,
        };
        editor.relayout();
        editor.highlight_all();
        editor.process_events();
        Ok(editor)
    }

    // ==================== Getters ====================

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    pub fn gutter_width(&self) -> i32 {
        self.gutter_width
    }

    pub fn line_height(&self) -> i32 {
        self.line_height
    }

    pub fn digit_width(&self) -> i32 {
        self.digit_width
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// The gutter strip, in component coordinates.
    pub fn gutter_rect(&self) -> Rect {
        Rect::new(0, 0, self.gutter_width, self.height)
    }

    /// The text viewport, in component coordinates. Starts where the gutter
    /// ends.
    pub fn viewport_rect(&self) -> Rect {
        Rect::new(
            self.gutter_width,
            0,
            (self.width - self.gutter_width).max(0),
            self.height,
        )
    }

    // ==================== Input ====================

    /// Applies an action to the document and reacts to what it reports.
    ///
    /// A failing action is logged and skipped; whatever the document queued
    /// before failing is still processed.
    pub fn apply(&mut self, action: EditAction) {
        if let Err(err) = self.document.apply(action) {
            tracing::warn!(%err, "edit failed, skipping cycle");
        }
        self.process_events();
    }

    /// Scrolls by whole lines (positive scrolls down).
    pub fn scroll_lines(&mut self, lines: i32) {
        self.apply(EditAction::ScrollBy(lines * self.line_height));
    }

    /// Resizes the whole component.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width.max(0);
        self.height = height.max(0);
        self.relayout();
        self.process_events();
    }

    /// Takes the gutter region that needs repainting, if any.
    pub fn take_gutter_update(&mut self) -> Option<Rect> {
        self.gutter_update.take()
    }

    // ==================== Painting ====================

    /// Paints one half of the editor. `region` is in that half's own
    /// coordinates. Returns the number of blocks painted.
    pub fn paint<S: Surface + ?Sized>(
        &self,
        target: PaintTarget,
        region: Rect,
        surface: &mut S,
    ) -> usize {
        match target {
            PaintTarget::Gutter => self.gutter.paint(
                surface,
                Rect::new(0, 0, self.gutter_width, self.height),
                region,
                self.document.first_visible_block(),
                self.document.content_offset_y(),
                self.line_height,
            ),
            PaintTarget::Viewport => self.viewport.paint(
                surface,
                self.document.viewport_rect(),
                region,
                &self.document,
                self.line_height,
            ),
        }
    }

    // ==================== Notifications ====================

    fn process_events(&mut self) {
        loop {
            let events = self.document.take_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                self.handle_event(event);
            }
        }
    }

    fn handle_event(&mut self, event: DocumentEvent) {
        match event {
            DocumentEvent::BlockCountChanged(count) => {
                self.gutter_width = width_for(count, self.digit_width);
                tracing::debug!(count, width = self.gutter_width, "gutter width recomputed");
                self.relayout();
                self.request_gutter_update(self.gutter_rect());
            }
            DocumentEvent::UpdateRequest { rect, dy } => {
                let band = if dy != 0 {
                    self.gutter_rect()
                } else {
                    Rect::new(0, rect.top(), self.gutter_width, rect.height)
                };
                self.request_gutter_update(band);
            }
            DocumentEvent::ContentsChanged { first, added, .. } => {
                for block in first..first + added {
                    self.rehighlight(block);
                }
            }
        }
    }

    fn request_gutter_update(&mut self, rect: Rect) {
        self.gutter_update = Some(match self.gutter_update {
            Some(pending) => pending.united(&rect),
            None => rect,
        });
    }

    /// Pushes the viewport size implied by the current gutter width.
    fn relayout(&mut self) {
        let viewport = self.viewport_rect();
        if let Err(err) = self
            .document
            .apply(EditAction::Resize(viewport.width, viewport.height))
        {
            tracing::warn!(%err, "relayout failed");
        }
    }

    fn highlight_all(&mut self) {
        for block in 0..self.document.block_count() {
            self.rehighlight(block);
        }
    }

    fn rehighlight(&mut self, block: usize) {
        if let Err(err) = self.document.rehighlight(block, &self.highlighter) {
            tracing::warn!(block, %err, "highlight skipped");
        }
    }
}
