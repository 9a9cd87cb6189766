//! Axis-aligned bounding boxes in drawing space.
//!
//! Boxes are stored as top-left corner plus extent, matching the SVG
//! `viewBox` convention, rather than as two corners.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimal axis-aligned rectangle enclosing a set of points.
///
/// Invariant: `width >= 0` and `height >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Creates a box from its top-left corner and extent.
    ///
    /// Negative extents are clamped to zero.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Creates the degenerate box around a single point.
    pub fn from_point(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0, 0.0)
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the box.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Extends the box so it also covers `(x, y)`.
    ///
    /// The far edges are captured before the anchor moves, so width and
    /// height always stay relative to the current anchor.
    pub fn add_point(&mut self, x: f64, y: f64) {
        let right = self.right().max(x);
        let bottom = self.bottom().max(y);
        self.x = self.x.min(x);
        self.y = self.y.min(y);
        self.width = right - self.x;
        self.height = bottom - self.y;
    }

    /// Returns the smallest box covering both `self` and `other`.
    pub fn merge(&self, other: &BoundingBox) -> BoundingBox {
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(left, top, right - left, bottom - top)
    }

    /// Merges any number of boxes. Returns `None` for an empty input.
    pub fn merge_all<'a, I>(boxes: I) -> Option<BoundingBox>
    where
        I: IntoIterator<Item = &'a BoundingBox>,
    {
        boxes
            .into_iter()
            .fold(None, |acc: Option<BoundingBox>, b| match acc {
                Some(a) => Some(a.merge(b)),
                None => Some(*b),
            })
    }

    /// Whether the point lies inside or on the edge of the box.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Expands the box to a square using the larger of width and height,
    /// keeping the top-left corner fixed.
    pub fn expand_to_square(&self) -> BoundingBox {
        let side = self.width.max(self.height);
        BoundingBox::new(self.x, self.y, side, side)
    }

    /// Whether the box has zero area.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// Returns the components as an `(x, y, width, height)` tuple.
    pub fn to_tuple(&self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.width, self.height)
    }
}

/// Folds an optional box with another box, treating `None` as empty.
pub fn merge_optional(acc: Option<BoundingBox>, next: Option<BoundingBox>) -> Option<BoundingBox> {
    match (acc, next) {
        (Some(a), Some(b)) => Some(a.merge(&b)),
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}
