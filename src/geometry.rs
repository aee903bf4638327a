//! Core geometry types: Offset, Size, Region, Spacing, Rect, Axis.
//!
//! `Region` is a concrete, placed rectangle in screen cells. `Rect` is what a
//! caller *requests* for a window: either [`Rect::Auto`] (let the layout engine
//! decide) or a concrete rectangle whose non-positive extents and negative
//! coordinates are measured from the far edge of the containing area.

use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A 2D position or displacement in terminal cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    /// Create a new offset.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Offset {
    type Output = Offset;
    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size in terminal cells (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0, height: 0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero or negative.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the point (x, y) is inside `0..width` and `0..height`.
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Both dimensions clamped to be non-negative.
    #[inline]
    pub const fn clamp_positive(self) -> Size {
        Size {
            width: if self.width > 0 { self.width } else { 0 },
            height: if self.height > 0 { self.height } else { 0 },
        }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Size) -> Size {
        Size {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Size) -> Size {
        Size {
            width: self.width.min(other.width),
            height: self.height.min(other.height),
        }
    }

    /// Extent along `axis`.
    #[inline]
    pub const fn main(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Extent across `axis`.
    #[inline]
    pub const fn cross(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.height,
            Axis::Vertical => self.width,
        }
    }

    /// Build a size from main and cross extents along `axis`.
    #[inline]
    pub const fn from_axis(axis: Axis, main: i32, cross: i32) -> Size {
        match axis {
            Axis::Horizontal => Size { width: main, height: cross },
            Axis::Vertical => Size { width: cross, height: main },
        }
    }

    /// Convert to a [`Region`] positioned at the origin.
    #[inline]
    pub const fn to_region(self) -> Region {
        Region { x: 0, y: 0, width: self.width, height: self.height }
    }
}

impl Add for Size {
    type Output = Size;
    #[inline]
    fn add(self, rhs: Size) -> Size {
        Size { width: self.width + rhs.width, height: self.height + rhs.height }
    }
}

impl Sub for Size {
    type Output = Size;
    #[inline]
    fn sub(self, rhs: Size) -> Size {
        Size { width: self.width - rhs.width, height: self.height - rhs.height }
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A placed rectangle in terminal cells, in absolute screen coordinates once
/// the rect pass has run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// An empty region at the origin.
    pub const EMPTY: Region = Region { x: 0, y: 0, width: 0, height: 0 };

    /// Create a new region.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// The right edge (exclusive).
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// The bottom edge (exclusive).
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// The top-left corner.
    #[inline]
    pub const fn offset(self) -> Offset {
        Offset { x: self.x, y: self.y }
    }

    /// The dimensions as a [`Size`].
    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width, height: self.height }
    }

    /// Whether the region covers no cells.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the point (x, y) lies inside this region.
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Overlap of two regions, [`Region::EMPTY`] if they do not meet.
    #[inline]
    pub fn intersection(self, other: Region) -> Region {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        if x2 <= x1 || y2 <= y1 {
            Region::EMPTY
        } else {
            Region { x: x1, y: y1, width: x2 - x1, height: y2 - y1 }
        }
    }

    /// Translate the region by an [`Offset`].
    #[inline]
    pub const fn translate(self, offset: Offset) -> Region {
        Region { x: self.x + offset.x, y: self.y + offset.y, width: self.width, height: self.height }
    }

    /// Contract the region inward. Width and height never go below zero.
    #[inline]
    pub const fn shrink(self, insets: Spacing) -> Region {
        let w = self.width - insets.left - insets.right;
        let h = self.height - insets.top - insets.bottom;
        Region {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width: if w > 0 { w } else { 0 },
            height: if h > 0 { h } else { 0 },
        }
    }
}

// ---------------------------------------------------------------------------
// Spacing
// ---------------------------------------------------------------------------

/// Insets on the four sides of a rectangle (border, padding, shadow).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Spacing {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Spacing {
    /// Zero spacing on all sides.
    pub const ZERO: Spacing = Spacing { top: 0, right: 0, bottom: 0, left: 0 };

    /// Create spacing with explicit values for each side.
    #[inline]
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self { top, right, bottom, left }
    }

    /// Symmetric spacing: `vertical` for top/bottom, `horizontal` for left/right.
    #[inline]
    pub const fn symmetric(vertical: i32, horizontal: i32) -> Self {
        Self { top: vertical, right: horizontal, bottom: vertical, left: horizontal }
    }

    /// Total horizontal extent: `left + right`.
    #[inline]
    pub const fn width(self) -> i32 {
        self.left + self.right
    }

    /// Total vertical extent: `top + bottom`.
    #[inline]
    pub const fn height(self) -> i32 {
        self.top + self.bottom
    }

    /// Total extents as a [`Size`].
    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width(), height: self.height() }
    }
}

impl Add for Spacing {
    type Output = Spacing;
    #[inline]
    fn add(self, rhs: Spacing) -> Spacing {
        Spacing {
            top: self.top + rhs.top,
            right: self.right + rhs.right,
            bottom: self.bottom + rhs.bottom,
            left: self.left + rhs.left,
        }
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// A requested window rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rect {
    /// Size and position are decided by the layout engine.
    #[default]
    Auto,
    /// Explicit placement relative to the containing area.
    ///
    /// A width or height `<= 0` means "the container's extent plus this value";
    /// a negative x or y is measured back from the container's far edge.
    Fixed(Region),
}

impl Rect {
    /// Shorthand for a fixed rect.
    #[inline]
    pub const fn at(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect::Fixed(Region::new(x, y, width, height))
    }

    /// Whether this is [`Rect::Auto`].
    #[inline]
    pub const fn is_auto(self) -> bool {
        matches!(self, Rect::Auto)
    }

    /// The raw fixed region, if any.
    #[inline]
    pub const fn fixed(self) -> Option<Region> {
        match self {
            Rect::Auto => None,
            Rect::Fixed(region) => Some(region),
        }
    }

    /// Resolve a fixed rect against the size of its containing area.
    ///
    /// Returns `None` for [`Rect::Auto`]. Resolved values never go below zero.
    pub fn resolve(self, within: Size) -> Option<Region> {
        let mut r = self.fixed()?;
        if r.height <= 0 {
            r.height = (within.height + r.height).max(0);
        }
        if r.width <= 0 {
            r.width = (within.width + r.width).max(0);
        }
        if r.x < 0 {
            r.x = (within.width + r.x).max(0);
        }
        if r.y < 0 {
            r.y = (within.height + r.y).max(0);
        }
        Some(r)
    }
}

// ---------------------------------------------------------------------------
// Axis
// ---------------------------------------------------------------------------

/// The direction a container lays its children out along.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

impl Axis {
    /// The perpendicular axis.
    #[inline]
    pub const fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Cells left between two aligned children when gaps are enabled.
    #[inline]
    pub const fn gap_unit(self) -> i32 {
        match self {
            Axis::Horizontal => 2,
            Axis::Vertical => 1,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
