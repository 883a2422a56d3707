//! Painting highlighted text into the viewport.
//!
//! ## Learning: Flattening Overlaps
//!
//! The highlighter hands out spans per rule, and spans of different rules may
//! cover the same bytes. [`resolve_runs`] paints them onto a per-byte format
//! map in order, so a later span overwrites an earlier one, then cuts the
//! block into maximal runs of one format on char boundaries.

use std::ops::Range;

use codeedit_buffer::{Point, Rect};
use codeedit_syntax::{Color, Span, TextFormat};
use unicode_width::UnicodeWidthChar;

use crate::document::Document;
use crate::paint::Surface;

const CARET_WIDTH: i32 = 2;

/// A maximal stretch of block text drawn with one format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Byte range into the block text
    pub range: Range<usize>,
    pub format: TextFormat,
}

/// Splits `text` into runs, later spans winning where spans overlap.
///
/// Span bounds past the end of `text` are clamped.
pub fn resolve_runs(text: &str, spans: &[Span], default: TextFormat) -> Vec<Run> {
    let mut formats = vec![default; text.len()];
    for span in spans {
        let end = span.end().min(text.len());
        if span.start < end {
            formats[span.start..end].fill(span.format);
        }
    }

    let mut runs: Vec<Run> = Vec::new();
    for (i, ch) in text.char_indices() {
        let format = formats[i];
        let end = i + ch.len_utf8();
        match runs.last_mut() {
            Some(run) if run.format == format => run.range.end = end,
            _ => runs.push(Run {
                range: i..end,
                format,
            }),
        }
    }
    runs
}

/// Display column reached after the first `char_col` chars of `text`.
///
/// Tabs advance to the next multiple of `tab_width`, wide chars take two
/// columns.
pub fn display_column(text: &str, char_col: usize, tab_width: usize) -> usize {
    text.chars()
        .take(char_col)
        .fold(0, |col, ch| advance_column(col, ch, tab_width))
}

/// Display column right after `ch` when it starts at `col`.
pub fn advance_column(col: usize, ch: char, tab_width: usize) -> usize {
    match ch {
        '\t' => {
            let tab_width = tab_width.max(1);
            (col / tab_width + 1) * tab_width
        }
        _ => col + ch.width().unwrap_or(0),
    }
}

/// Expands tabs in `text` starting at display column `col`.
fn expand_tabs(text: &str, col: &mut usize, tab_width: usize) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let next = advance_column(*col, ch, tab_width);
        if ch == '\t' {
            out.extend(std::iter::repeat_n(' ', next - *col));
        } else {
            out.push(ch);
        }
        *col = next;
    }
    out
}

/// Colors of the text area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportStyle {
    pub background: Color,
    /// Format of text no rule matched
    pub text: TextFormat,
    pub caret: Color,
}

impl Default for ViewportStyle {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            text: TextFormat::default(),
            caret: Color::BLACK,
        }
    }
}

/// Paints block text and the caret.
#[derive(Debug, Clone)]
pub struct ViewportPainter {
    style: ViewportStyle,
    digit_width: i32,
    tab_width: usize,
}

impl ViewportPainter {
    pub fn new(style: ViewportStyle, digit_width: i32) -> Self {
        Self {
            style,
            digit_width,
            tab_width: 4,
        }
    }

    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    pub fn style(&self) -> &ViewportStyle {
        &self.style
    }

    /// Paints every visible block of `document` intersecting `region`.
    ///
    /// Uses the same walk and clipping as the gutter, so both halves always
    /// agree on which blocks are on screen. Returns the number of blocks
    /// painted.
    pub fn paint<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        viewport: Rect,
        region: Rect,
        document: &Document,
        line_height: i32,
    ) -> usize {
        surface.fill_rect(viewport, self.style.background);

        let cursor = document.cursor().clamped(document.buffer()).position;
        let offset = document.content_offset_y();
        let mut block = document.first_visible_block();
        let mut top = block.bounding_geometry().translated(0, offset).top();
        let mut bottom = top + block.bounding_rect().height;
        let mut drawn = 0;

        while block.is_valid() && top < region.bottom() {
            if block.is_visible() && bottom > top && bottom > region.top() {
                let number = block.number();
                let text = match document.block_text(number) {
                    Ok(text) => text,
                    Err(err) => {
                        tracing::warn!(block = number, %err, "skipping viewport paint");
                        break;
                    }
                };

                let mut col = 0;
                for run in resolve_runs(&text, document.block_formats(number), self.style.text) {
                    let x = viewport.left() + col as i32 * self.digit_width;
                    let piece = expand_tabs(&text[run.range], &mut col, self.tab_width);
                    surface.draw_run(Point::new(x, top), &piece, &run.format, line_height);
                }

                if cursor.line == number {
                    let col = display_column(&text, cursor.column, self.tab_width);
                    let x = viewport.left() + col as i32 * self.digit_width;
                    let height = line_height.min(bottom - top);
                    surface.fill_rect(Rect::new(x, top, CARET_WIDTH, height), self.style.caret);
                }
                drawn += 1;
            }

            block = block.next();
            top = bottom;
            bottom = top + block.bounding_rect().height;
        }

        tracing::debug!(drawn, "painted viewport");
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::EditAction;
    use crate::paint::{DisplayList, DrawCommand};
    use codeedit_buffer::Motion;
    use codeedit_syntax::{FontWeight, Highlighter, RuleTable};

    fn span(start: usize, len: usize, format: TextFormat) -> Span {
        Span {
            start,
            len,
            format,
            rule: 0,
        }
    }

    #[test]
    fn test_no_spans_is_one_default_run() {
        let runs = resolve_runs("x := 1", &[], TextFormat::default());
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].range, 0..6);
    }

    #[test]
    fn test_later_span_wins() {
        let red = TextFormat::new(Color::DARK_RED, FontWeight::Normal);
        let spans = [span(0, 6, TextFormat::keyword()), span(2, 2, red)];
        let runs = resolve_runs("abcdef", &spans, TextFormat::default());

        let shape: Vec<_> = runs.iter().map(|r| (r.range.clone(), r.format)).collect();
        assert_eq!(
            shape,
            vec![
                (0..2, TextFormat::keyword()),
                (2..4, red),
                (4..6, TextFormat::keyword()),
            ]
        );
    }

    #[test]
    fn test_runs_split_on_char_boundaries() {
        let runs = resolve_runs("éa", &[span(2, 1, TextFormat::keyword())], TextFormat::default());
        assert_eq!(runs[0].range, 0..2);
        assert_eq!(runs[1].range, 2..3);
    }

    #[test]
    fn test_out_of_range_spans_are_clamped() {
        let runs = resolve_runs("ab", &[span(1, 10, TextFormat::keyword())], TextFormat::default());
        assert_eq!(runs.last().unwrap().range, 1..2);
        assert!(resolve_runs("", &[span(0, 3, TextFormat::keyword())], TextFormat::default()).is_empty());
    }

    #[test]
    fn test_display_column_handles_tabs_and_wide_chars() {
        assert_eq!(display_column("\tx", 1, 4), 4);
        assert_eq!(display_column("ab\tx", 3, 4), 4);
        assert_eq!(display_column("日本", 2, 4), 4);
        assert_eq!(display_column("abc", 10, 4), 3);
    }

    #[test]
    fn test_advance_column_matches_display_column() {
        let text = "\ta日\tb";
        let mut col = 0;
        for (i, ch) in text.chars().enumerate() {
            assert_eq!(col, display_column(text, i, 4));
            col = advance_column(col, ch, 4);
        }
        assert_eq!(col, display_column(text, usize::MAX, 4));
        assert_eq!(advance_column(3, '\t', 0), 4);
    }

    #[test]
    fn test_paint_draws_highlighted_runs_and_caret() {
        let mut doc = Document::new("func f()\n\tvar x", "go", 10);
        doc.apply(EditAction::Resize(200, 50)).unwrap();
        doc.apply(EditAction::Move(Motion::Down)).unwrap();
        let highlighter =
            Highlighter::new(RuleTable::for_language("go", TextFormat::keyword()).unwrap());
        doc.rehighlight(0, &highlighter).unwrap();
        doc.rehighlight(1, &highlighter).unwrap();

        let painter = ViewportPainter::new(ViewportStyle::default(), 8);
        let mut list = DisplayList::new();
        let drawn = painter.paint(&mut list, doc.viewport_rect(), doc.viewport_rect(), &doc, 10);
        assert_eq!(drawn, 2);

        let runs = list.runs();
        assert_eq!(runs[0], ("func", &TextFormat::keyword()));
        assert_eq!(runs[1].0, " f()");
        assert_eq!(runs[2].0, "    ");
        assert_eq!(runs[3], ("var", &TextFormat::keyword()));

        let var_origin = list.commands().iter().find_map(|c| match c {
            DrawCommand::Run { origin, text, .. } if text == "var" => Some(*origin),
            _ => None,
        });
        assert_eq!(var_origin, Some(Point::new(32, 10)));

        // Caret at line 1, column 0.
        assert!(list.commands().contains(&DrawCommand::Fill {
            rect: Rect::new(0, 10, CARET_WIDTH, 10),
            color: Color::BLACK,
        }));
    }

    #[test]
    fn test_paint_respects_region() {
        let mut doc = Document::new("a\nb\nc\nd", "go", 10);
        doc.apply(EditAction::Resize(200, 40)).unwrap();
        let painter = ViewportPainter::new(ViewportStyle::default(), 8);
        let mut list = DisplayList::new();
        let drawn = painter.paint(&mut list, doc.viewport_rect(), Rect::new(0, 15, 200, 10), &doc, 10);
        assert_eq!(drawn, 2);
        let texts: Vec<_> = list.runs().into_iter().map(|(t, _)| t).collect();
        assert_eq!(texts, vec!["b", "c"]);
    }
}
