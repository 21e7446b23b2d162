//! Geometric primitives and the page coordinate system.
//!
//! The whole engine works in points with a **top-left origin and Y growing
//! downward**, so layout code reads as natural top-to-bottom flow. PDF's
//! native space is bottom-up; [`PageMetrics::flip_y`] is the single place
//! where the two meet.

/// Points per millimeter (1 inch = 72 points = 25.4 mm).
pub const MM_TO_PT: f32 = 72.0 / 25.4;

/// Convert millimeters to points.
///
/// # Examples
///
/// ```
/// use docpress::geometry::mm;
///
/// assert!((mm(25.4) - 72.0).abs() < 1e-4);
/// ```
pub fn mm(value: f32) -> f32 {
    value * MM_TO_PT
}

/// A 2D point in top-origin document space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate (distance from the top edge)
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in top-origin document space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// X coordinate of the top-left corner
    pub x: f32,
    /// Y coordinate of the top-left corner
    pub y: f32,
    /// Width of rectangle
    pub width: f32,
    /// Height of rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Get the center point of the rectangle.
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Shrink the rectangle by `amount` on every side.
    pub fn inset(&self, amount: f32) -> Rect {
        Rect {
            x: self.x + amount,
            y: self.y + amount,
            width: (self.width - 2.0 * amount).max(0.0),
            height: (self.height - 2.0 * amount).max(0.0),
        }
    }
}

/// Fixed page geometry: size, margins, and the adapter into PDF space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMetrics {
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Uniform page margin in points
    pub margin: f32,
}

impl PageMetrics {
    /// A4 portrait (210 x 297 mm) with the given margin in millimeters.
    pub fn a4(margin_mm: f32) -> Self {
        Self {
            width: mm(210.0),
            height: mm(297.0),
            margin: mm(margin_mm),
        }
    }

    /// Left edge of the content area.
    pub fn content_left(&self) -> f32 {
        self.margin
    }

    /// Right edge of the content area.
    pub fn content_right(&self) -> f32 {
        self.width - self.margin
    }

    /// Width of the content area.
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Horizontal center of the page.
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    /// Convert a top-origin Y coordinate into PDF's bottom-up space.
    pub fn flip_y(&self, y_top: f32) -> f32 {
        self.height - y_top
    }

    /// Full-page rectangle in top-origin space.
    pub fn page_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

impl Default for PageMetrics {
    fn default() -> Self {
        Self::a4(10.0)
    }
}
