//! Geometric primitives for tower layout and rendering.
//!
//! Layout happens in a normalized percent space; rendering happens in
//! pixel space. This module provides both and the mapping between them.
//!
//! # Overview
//!
//! - [`PercentRect`] - A placement in the 0–100% tower space, anchored at the floor
//! - [`Point`] - A 2D coordinate in pixel space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`Insets`] - Padding/margin values for four sides
//!
//! # Coordinate Systems
//!
//! Tower space measures `left` from the left edge and `bottom` from the
//! floor, both in percent. Pixel space is consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! [`PercentRect::to_bounds`] flips the vertical axis when mapping a
//! placement into a pixel plot area.

/// A rectangle in tower space, in percent of the plot area.
///
/// Horizontal values are percent of the total width, vertical values are
/// percent of the total policy limit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PercentRect {
    left: f64,
    bottom: f64,
    width: f64,
    height: f64,
}

impl PercentRect {
    /// Creates a new placement from its left offset, bottom offset, width
    /// and height, all in percent.
    pub fn new(left: f64, bottom: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            bottom,
            width,
            height,
        }
    }

    /// Left offset, in percent of the plot width.
    pub fn left(self) -> f64 {
        self.left
    }

    /// Bottom offset from the floor, in percent of the plot height.
    pub fn bottom(self) -> f64 {
        self.bottom
    }

    /// Width, in percent of the plot width.
    pub fn width(self) -> f64 {
        self.width
    }

    /// Height, in percent of the plot height.
    pub fn height(self) -> f64 {
        self.height
    }

    /// Right edge, in percent of the plot width.
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    /// Top edge, in percent of the plot height.
    pub fn top(self) -> f64 {
        self.bottom + self.height
    }

    /// Maps this placement into pixel space inside `plot`.
    ///
    /// The floor of tower space is the bottom edge of `plot`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mudmap_core::geometry::{Bounds, PercentRect, Point, Size};
    /// let plot = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(200.0, 100.0));
    /// let rect = PercentRect::new(50.0, 0.0, 50.0, 25.0);
    ///
    /// let bounds = rect.to_bounds(plot);
    /// assert_eq!(bounds.min_x(), 100.0);
    /// assert_eq!(bounds.min_y(), 75.0);
    /// assert_eq!(bounds.width(), 100.0);
    /// assert_eq!(bounds.height(), 25.0);
    /// ```
    pub fn to_bounds(self, plot: Bounds) -> Bounds {
        let scale_x = f64::from(plot.width()) / 100.0;
        let scale_y = f64::from(plot.height()) / 100.0;

        let min_x = f64::from(plot.min_x()) + self.left * scale_x;
        let max_y = f64::from(plot.max_y()) - self.bottom * scale_y;

        Bounds::new_from_top_left(
            Point::new(min_x as f32, (max_y - self.height * scale_y) as f32),
            Size::new((self.width * scale_x) as f32, (self.height * scale_y) as f32),
        )
    }
}

/// A 2D point representing a position in pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the given coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate
    pub fn y(self) -> f32 {
        self.y
    }
}

/// Width and height dimensions
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Grows the size by the given insets on every side.
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Returns the point at the given fractions of width and height,
    /// measured from the top-left corner.
    pub fn point_at(self, fraction_x: f32, fraction_y: f32) -> Point {
        Point::new(
            self.min_x + self.width() * fraction_x,
            self.min_y + self.height() * fraction_y,
        )
    }
}

/// Represents spacing around an element (padding, margin, etc.)
/// with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with the given values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }

    /// Sum of the left and right insets
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Sum of the top and bottom insets
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}
