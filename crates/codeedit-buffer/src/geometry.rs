//! Integer pixel geometry shared by the layout and the painters.

/// A point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in pixel coordinates.
///
/// `bottom()` and `right()` are exclusive: a rect at `y = 10` with
/// `height = 5` covers rows `10..15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub const fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub const fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// True when the rect covers no pixels.
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Returns a copy moved by `(dx, dy)`.
    pub const fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// True when the vertical band `top..bottom` overlaps this rect's band.
    pub const fn intersects_rows(&self, top: i32, bottom: i32) -> bool {
        top < self.bottom() && bottom > self.top()
    }

    /// Smallest rect containing both. An empty rect contributes nothing.
    pub fn united(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Overlap of both rects, or an empty rect when they are disjoint.
    pub fn intersected(&self, other: &Rect) -> Rect {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return Rect::default();
        }
        Rect::new(left, top, right - left, bottom - top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_exclusive() {
        let r = Rect::new(2, 10, 4, 5);
        assert_eq!(r.right(), 6);
        assert_eq!(r.bottom(), 15);
        assert!(r.intersects_rows(14, 20));
        assert!(!r.intersects_rows(15, 20));
        assert!(!r.intersects_rows(0, 10));
    }

    #[test]
    fn test_united_ignores_empty() {
        let a = Rect::new(0, 0, 10, 10);
        assert_eq!(a.united(&Rect::default()), a);
        assert_eq!(Rect::default().united(&a), a);
        assert_eq!(
            a.united(&Rect::new(5, 20, 10, 5)),
            Rect::new(0, 0, 15, 25)
        );
    }

    #[test]
    fn test_intersected() {
        let a = Rect::new(0, 0, 10, 10);
        assert_eq!(a.intersected(&Rect::new(5, 5, 10, 10)), Rect::new(5, 5, 5, 5));
        assert!(a.intersected(&Rect::new(20, 20, 1, 1)).is_empty());
    }
}
