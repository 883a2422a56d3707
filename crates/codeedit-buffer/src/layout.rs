//! Block geometry: heights, visibility and the vertical scroll position.
//!
//! ## Learning: Prefix Sums
//!
//! The layout keeps `tops[i]`, the y coordinate where block `i` starts, with
//! one extra trailing entry holding the document height. Block `i` then spans
//! `tops[i]..tops[i + 1]`, and finding the block under a scroll position is a
//! binary search instead of a linear walk.

use crate::geometry::Rect;
use crate::{BufferError, BufferResult};

/// Geometry of every block in a document.
#[derive(Debug, Clone)]
pub struct BlockLayout {
    /// Default height of a block, in pixels
    line_height: i32,

    /// Per-block height when visible
    heights: Vec<i32>,

    /// Per-block visibility (hidden blocks take no vertical space)
    visible: Vec<bool>,

    /// Start y of each block, plus the document height at the end
    tops: Vec<i32>,

    /// Width reported by block bounding rects
    width: i32,

    /// Height of the viewport showing the document
    viewport_height: i32,

    /// Vertical scroll position in document coordinates
    scroll_y: i32,
}

impl BlockLayout {
    /// Creates a layout for `block_count` visible blocks of `line_height` pixels.
    pub fn new(block_count: usize, line_height: i32) -> Self {
        let line_height = line_height.max(0);
        let mut layout = Self {
            line_height,
            heights: vec![line_height; block_count],
            visible: vec![true; block_count],
            tops: Vec::new(),
            width: 0,
            viewport_height: 0,
            scroll_y: 0,
        };
        layout.relayout();
        layout
    }

    fn relayout(&mut self) {
        self.tops.clear();
        self.tops.reserve(self.heights.len() + 1);
        let mut y = 0;
        self.tops.push(y);
        for (height, visible) in self.heights.iter().zip(&self.visible) {
            if *visible {
                y += *height;
            }
            self.tops.push(y);
        }
        self.scroll_y = self.scroll_y.clamp(0, self.max_scroll());
    }

    fn check(&self, block: usize) -> BufferResult<()> {
        if block >= self.block_count() {
            return Err(BufferError::BlockOutOfRange {
                block,
                count: self.block_count(),
            });
        }
        Ok(())
    }

    // ==================== Measurements ====================

    #[inline]
    pub fn block_count(&self) -> usize {
        self.heights.len()
    }

    #[inline]
    pub fn line_height(&self) -> i32 {
        self.line_height
    }

    /// Total height of all visible blocks.
    #[inline]
    pub fn document_height(&self) -> i32 {
        self.tops.last().copied().unwrap_or(0)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn viewport_height(&self) -> i32 {
        self.viewport_height
    }

    // ==================== Structure ====================

    /// Replaces `removed` blocks starting at `first` with `added` fresh blocks.
    ///
    /// This is how text edits reach the layout: an edit touching lines
    /// `first..first + removed` that leaves `added` lines behind.
    pub fn splice(&mut self, first: usize, removed: usize, added: usize) -> BufferResult<()> {
        if first + removed > self.block_count() {
            return Err(BufferError::BlockOutOfRange {
                block: first + removed,
                count: self.block_count(),
            });
        }
        let range = first..first + removed;
        self.heights
            .splice(range.clone(), std::iter::repeat_n(self.line_height, added));
        self.visible.splice(range, std::iter::repeat_n(true, added));
        self.relayout();
        Ok(())
    }

    /// Resets the layout to `block_count` default blocks.
    pub fn reset(&mut self, block_count: usize) {
        self.heights = vec![self.line_height; block_count];
        self.visible = vec![true; block_count];
        self.relayout();
    }

    /// Changes the default block height and applies it to every block.
    pub fn set_line_height(&mut self, line_height: i32) {
        self.line_height = line_height.max(0);
        self.heights.fill(self.line_height);
        self.relayout();
    }

    /// Overrides the height of one block.
    pub fn set_block_height(&mut self, block: usize, height: i32) -> BufferResult<()> {
        self.check(block)?;
        self.heights[block] = height.max(0);
        self.relayout();
        Ok(())
    }

    /// Shows or hides a block. Hidden blocks keep their number.
    pub fn set_visible(&mut self, block: usize, visible: bool) -> BufferResult<()> {
        self.check(block)?;
        self.visible[block] = visible;
        self.relayout();
        Ok(())
    }

    /// Sets the viewport size the layout is shown in.
    pub fn set_viewport(&mut self, width: i32, height: i32) {
        self.width = width.max(0);
        self.viewport_height = height.max(0);
        self.scroll_y = self.scroll_y.clamp(0, self.max_scroll());
    }

    // ==================== Scrolling ====================

    #[inline]
    pub fn scroll_y(&self) -> i32 {
        self.scroll_y
    }

    /// Largest allowed scroll position.
    pub fn max_scroll(&self) -> i32 {
        (self.document_height() - self.viewport_height).max(0)
    }

    /// Scrolls to `y` (clamped) and returns the applied delta.
    pub fn set_scroll_y(&mut self, y: i32) -> i32 {
        let old = self.scroll_y;
        self.scroll_y = y.clamp(0, self.max_scroll());
        self.scroll_y - old
    }

    /// Offset that maps document coordinates to viewport coordinates.
    #[inline]
    pub fn content_offset_y(&self) -> i32 {
        -self.scroll_y
    }

    // ==================== Blocks ====================

    /// Handle for block `number`. Numbers past the end give an invalid block.
    pub fn block(&self, number: usize) -> Block<'_> {
        Block {
            layout: self,
            number: number.min(self.block_count()),
        }
    }

    /// First block whose extent reaches below the scroll position.
    pub fn first_visible_block(&self) -> Block<'_> {
        let scroll_y = self.scroll_y;
        let number = self.tops[1..].partition_point(|&bottom| bottom <= scroll_y);
        self.block(number)
    }

    /// Block containing document y coordinate `y`, if any.
    pub fn block_at(&self, y: i32) -> Option<Block<'_>> {
        if y < 0 {
            return None;
        }
        let number = self.tops[1..].partition_point(|&bottom| bottom <= y);
        let block = self.block(number);
        block.is_valid().then_some(block)
    }

    fn height_of(&self, number: usize) -> i32 {
        self.tops[number + 1] - self.tops[number]
    }
}

/// A read-only handle to one block of a [`BlockLayout`].
///
/// Blocks form a forward chain through [`Block::next`]; walking past the last
/// block yields an invalid handle that stays invalid.
#[derive(Debug, Clone, Copy)]
pub struct Block<'a> {
    layout: &'a BlockLayout,
    number: usize,
}

impl<'a> Block<'a> {
    /// True while the handle points inside the document.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.number < self.layout.block_count()
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.is_valid() && self.layout.visible[self.number]
    }

    /// 0-based block number.
    #[inline]
    pub fn number(&self) -> usize {
        self.number
    }

    /// The following block (invalid after the last one).
    pub fn next(&self) -> Block<'a> {
        self.layout.block(self.number + 1)
    }

    /// Block-local rect: origin at zero, laid-out height.
    ///
    /// Invalid blocks report an empty rect.
    pub fn bounding_rect(&self) -> Rect {
        if !self.is_valid() {
            return Rect::default();
        }
        Rect::new(0, 0, self.layout.width, self.layout.height_of(self.number))
    }

    /// The block's rect in document coordinates.
    pub fn bounding_geometry(&self) -> Rect {
        if !self.is_valid() {
            return Rect::new(0, self.layout.document_height(), 0, 0);
        }
        self.bounding_rect()
            .translated(0, self.layout.tops[self.number])
    }
}

impl PartialEq for Block<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.layout, other.layout) && self.number == other.number
    }
}
