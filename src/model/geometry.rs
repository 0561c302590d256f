//! Container-local rectangles and placed items.

use super::item::Item;
use serde::Serialize;

/// Axis-aligned rectangle in container-local coordinates.
///
/// # Invariants
/// - `x, y >= 0`
/// - `width, height >= 0`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rect {
    /// Rectangle with top-left corner `(x, y)`.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// `width * height`.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Exclusive right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Half-open containment: `[x, x+w) × [y, y+h)`.
    ///
    /// Zero-area rectangles contain nothing.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Area of the intersection with `other` (0 when disjoint or touching).
    pub fn overlap_area(&self, other: &Rect) -> f64 {
        let w = self.right().min(other.right()) - self.x.max(other.x);
        let h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        if w <= 0.0 || h <= 0.0 {
            0.0
        } else {
            w * h
        }
    }
}

/// Output unit of the layout: an item and where it goes.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem {
    /// The item as it was passed in.
    pub item: Item,
    /// Where it was placed.
    pub rect: Rect,
}

/// Find the placed item under a point.
///
/// Returns the first rectangle containing `(x, y)`. Placed rectangles tile
/// without overlap, so "first" only matters on shared edges, which the
/// half-open containment already resolves.
pub fn hit_test(placed: &[PlacedItem], x: f64, y: f64) -> Option<&PlacedItem> {
    placed.iter().find(|p| p.rect.contains(x, y))
}
