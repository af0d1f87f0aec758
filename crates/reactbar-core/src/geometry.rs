#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All values are floating-point UI points with the origin at the top-left
//! corner of the owning node.

/// A point in UI coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Zero size.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A rectangle for button frames, bounds, and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f64,
    /// Top edge (inclusive).
    pub y: f64,
    /// Width in points.
    pub width: f64,
    /// Height in points.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Left edge (alias for x).
    #[inline]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Translate the rectangle.
    #[inline]
    pub fn offset_by(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Shrink the rectangle by `dx` on both horizontal sides and `dy` on both
    /// vertical sides. Negative values grow it.
    pub fn inset_by(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(
            self.x + dx,
            self.y + dy,
            (self.width - 2.0 * dx).max(0.0),
            (self.height - 2.0 * dy).max(0.0),
        )
    }

    /// Create a new rectangle inside the current one with the given margin.
    pub fn inner(&self, margin: Sides) -> Rect {
        Rect::new(
            self.x + margin.left,
            self.y + margin.top,
            (self.width - margin.horizontal_sum()).max(0.0),
            (self.height - margin.vertical_sum()).max(0.0),
        )
    }

    /// Mirror the rectangle horizontally inside a container of `width`.
    #[inline]
    pub fn mirrored_horizontally(&self, width: f64) -> Rect {
        Rect::new(width - self.right(), self.y, self.width, self.height)
    }

    /// The smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }
}

/// Sides for insets and margins.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sides {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Sides {
    /// Create new sides with equal values.
    pub const fn all(val: f64) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Create new sides with specific values.
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Sum of left and right.
    #[inline]
    pub fn horizontal_sum(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub fn vertical_sum(&self) -> f64 {
        self.top + self.bottom
    }
}

impl From<f64> for Sides {
    fn from(val: f64) -> Self {
        Self::all(val)
    }
}

impl From<(f64, f64)> for Sides {
    fn from((vertical, horizontal): (f64, f64)) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }
}
