//! The line-number gutter.
//!
//! ## Learning: Two-sided Clipping
//!
//! A repaint request names a region. Blocks entirely above it are walked
//! past without drawing, and the walk stops at the first block starting
//! below it, so a scroll by one line repaints a handful of labels instead of
//! the whole document.

use codeedit_buffer::{Block, Rect};
use codeedit_syntax::Color;

use crate::config::GutterConfig;
use crate::paint::{Align, Surface};

/// Fixed horizontal padding included in every gutter width, in pixels.
pub const GUTTER_MARGIN: i32 = 10;

/// Number of decimal digits in the largest label for `block_count` blocks.
///
/// An empty document still shows label 1, so 0 and 1 both give one digit.
pub fn digits(block_count: usize) -> i32 {
    block_count.max(1).ilog10() as i32 + 1
}

/// Pixel width of a gutter able to label `block_count` blocks.
pub fn width_for(block_count: usize, digit_width: i32) -> i32 {
    GUTTER_MARGIN + digits(block_count) * digit_width
}

/// Colors used by the gutter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GutterStyle {
    pub background: Color,
    pub foreground: Color,
}

impl Default for GutterStyle {
    fn default() -> Self {
        Self {
            background: Color::LIGHT_GRAY,
            foreground: Color::BLACK,
        }
    }
}

impl From<&GutterConfig> for GutterStyle {
    fn from(config: &GutterConfig) -> Self {
        Self {
            background: config.background,
            foreground: config.foreground,
        }
    }
}

/// Paints line numbers next to the viewport.
#[derive(Debug, Clone, Default)]
pub struct GutterPainter {
    style: GutterStyle,
}

impl GutterPainter {
    pub fn new(style: GutterStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &GutterStyle {
        &self.style
    }

    /// Paints the labels of every visible block intersecting `region`.
    ///
    /// `gutter` is the full gutter rect and is always filled with the
    /// background. `region` and `gutter` share the viewport's vertical
    /// coordinates, which are document coordinates shifted by
    /// `content_offset_y`. Returns the number of labels drawn.
    pub fn paint<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        gutter: Rect,
        region: Rect,
        first: Block<'_>,
        content_offset_y: i32,
        line_height: i32,
    ) -> usize {
        surface.fill_rect(gutter, self.style.background);

        let mut block = first;
        let mut top = block
            .bounding_geometry()
            .translated(0, content_offset_y)
            .top();
        let mut bottom = top + block.bounding_rect().height;
        let mut drawn = 0;

        while block.is_valid() && top < region.bottom() {
            if block.is_visible() && bottom > top && bottom > region.top() {
                let label = (block.number() + 1).to_string();
                surface.set_pen(self.style.foreground);
                surface.draw_text(
                    Rect::new(gutter.left(), top, gutter.width, bottom - top),
                    Align::Right,
                    &label,
                    line_height,
                );
                drawn += 1;
            }

            block = block.next();
            top = bottom;
            bottom = top + block.bounding_rect().height;
        }

        tracing::debug!(
            first = first.number(),
            region_top = region.top(),
            region_bottom = region.bottom(),
            drawn,
            "painted gutter"
        );
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{DisplayList, DrawCommand};
    use codeedit_buffer::BlockLayout;

    const LINE: i32 = 10;

    fn layout(count: usize) -> BlockLayout {
        let mut layout = BlockLayout::new(count, LINE);
        layout.set_viewport(200, 50);
        layout
    }

    fn paint(layout: &BlockLayout, region: Rect) -> (usize, DisplayList) {
        let mut list = DisplayList::new();
        let gutter = Rect::new(0, 0, width_for(layout.block_count(), 8), 50);
        let drawn = GutterPainter::default().paint(
            &mut list,
            gutter,
            region,
            layout.first_visible_block(),
            layout.content_offset_y(),
            LINE,
        );
        (drawn, list)
    }

    #[test]
    fn test_width_for_digit_boundaries() {
        assert_eq!(width_for(0, 8), width_for(1, 8));
        assert_eq!(width_for(1, 8), 18);
        assert_eq!(width_for(9, 8), 18);
        assert_eq!(width_for(10, 8), 26);
        assert!(width_for(99, 8) < width_for(100, 8));
        assert_eq!(width_for(12_345, 7), GUTTER_MARGIN + 5 * 7);
    }

    #[test]
    fn test_region_selects_blocks() {
        let layout = layout(20);
        let (drawn, list) = paint(&layout, Rect::new(0, 40, 26, 40));
        assert_eq!(drawn, 4);
        assert_eq!(list.labels(), vec!["5", "6", "7", "8"]);
    }

    #[test]
    fn test_partially_covered_blocks_are_drawn() {
        let layout = layout(20);
        let (_, list) = paint(&layout, Rect::new(0, 45, 26, 10));
        assert_eq!(list.labels(), vec!["5", "6"]);
    }

    #[test]
    fn test_scrolled_layout_uses_offset() {
        let mut layout = layout(20);
        layout.set_scroll_y(25);
        let (_, list) = paint(&layout, Rect::new(0, 0, 26, 50));
        assert_eq!(list.labels(), vec!["3", "4", "5", "6", "7", "8"]);

        let first = list
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::Text { rect, .. } => Some(*rect),
                _ => None,
            })
            .unwrap();
        assert_eq!(first, Rect::new(0, -5, 26, LINE));
    }

    #[test]
    fn test_hidden_and_empty_blocks_are_skipped() {
        let mut layout = layout(5);
        layout.set_visible(1, false).unwrap();
        layout.set_block_height(3, 0).unwrap();
        let (drawn, list) = paint(&layout, Rect::new(0, 0, 18, 50));
        assert_eq!(drawn, 3);
        assert_eq!(list.labels(), vec!["1", "3", "5"]);
    }

    #[test]
    fn test_background_always_covers_full_gutter() {
        let layout = layout(3);
        let (drawn, list) = paint(&layout, Rect::new(0, 20, 18, 0));
        assert_eq!(drawn, 0);
        assert_eq!(
            list.commands()[0],
            DrawCommand::Fill {
                rect: Rect::new(0, 0, 18, 50),
                color: Color::LIGHT_GRAY
            }
        );
    }

    #[test]
    fn test_labels_use_foreground_and_right_alignment() {
        let layout = layout(1);
        let (_, list) = paint(&layout, Rect::new(0, 0, 18, 50));
        assert!(list.commands().iter().any(|c| matches!(
            c,
            DrawCommand::Text {
                align: Align::Right,
                color: Color::BLACK,
                ..
            }
        )));
    }

    #[test]
    fn test_empty_document_labels_line_one() {
        let layout = layout(1);
        let (_, list) = paint(&layout, Rect::new(0, 0, 18, 50));
        assert_eq!(list.labels(), vec!["1"]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn width_is_monotonic(count in 0usize..1_000_000, digit in 1i32..32) {
                prop_assert!(width_for(count, digit) <= width_for(count + 1, digit));
            }

            #[test]
            fn one_label_per_intersecting_visible_block(
                count in 1usize..60,
                hidden in proptest::collection::vec(any::<bool>(), 60),
                scroll in 0i32..600,
                region_top in -20i32..70,
                region_height in 0i32..80,
            ) {
                let mut layout = layout(count);
                for (block, hide) in hidden.iter().take(count).enumerate() {
                    if *hide {
                        layout.set_visible(block, false).unwrap();
                    }
                }
                layout.set_scroll_y(scroll);
                let region = Rect::new(0, region_top, 30, region_height);
                let (_, list) = paint(&layout, region);

                // Blocks before the first visible one end above the viewport.
                let offset = layout.content_offset_y();
                let first = layout.first_visible_block().number();
                let expected: Vec<String> = (first..count)
                    .filter(|&n| layout.block(n).is_visible())
                    .filter(|&n| {
                        let rect = layout.block(n).bounding_geometry().translated(0, offset);
                        rect.height > 0 && region.intersects_rows(rect.top(), rect.bottom())
                    })
                    .map(|n| (n + 1).to_string())
                    .collect();
                prop_assert_eq!(list.labels(), expected);
            }
        }
    }
}
