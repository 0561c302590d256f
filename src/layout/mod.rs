//! Slice-and-dice treemap layout (pure).
//!
//! [`layout`] maps a container size and a list of weighted items to one
//! rectangle per item. Items are placed largest-first; each one takes a slice
//! of the remaining rectangle, cut across whichever side is currently longer.
//! Width and height tie goes to the height-major cut.
//!
//! [`LayoutState`] holds the current inputs and the last result, and is
//! recomputed wholesale on every change. There is no incremental layout.

use crate::model::{InvalidInput, Item, PlacedItem, Rect};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Compute the placement of every item inside a `container_width` ×
/// `container_height` container.
///
/// Output order is the placement order: descending weight, ties in input
/// order. Exactly one [`PlacedItem`] is produced per input item.
///
/// # Degenerate input
///
/// - No items, or a container dimension `<= 0`: empty output, not an error.
/// - Total weight of zero: every item gets a zero-size rect at `(0, 0)`.
///
/// # Errors
///
/// [`InvalidInput`] for a non-finite container size, for any item whose
/// weight is negative or non-finite, for two items sharing an id, or when the
/// total weight or container area overflows `f64`. Nothing is placed in that
/// case.
pub fn layout(
    container_width: f64,
    container_height: f64,
    items: &[Item],
) -> Result<Vec<PlacedItem>, InvalidInput> {
    if !container_width.is_finite() || !container_height.is_finite() {
        return Err(InvalidInput::NonFiniteSize {
            width: container_width,
            height: container_height,
        });
    }
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        item.validate()?;
        if !seen.insert(item.id()) {
            return Err(InvalidInput::DuplicateId {
                id: item.id().clone(),
            });
        }
    }

    if items.is_empty() || container_width <= 0.0 || container_height <= 0.0 {
        return Ok(Vec::new());
    }

    // Stable: equal weights keep their input order.
    let mut sorted: Vec<&Item> = items.iter().collect();
    sorted.sort_by(|a, b| {
        b.weight()
            .partial_cmp(&a.weight())
            .unwrap_or(Ordering::Equal)
    });

    let total_weight: f64 = sorted.iter().map(|item| item.weight()).sum();
    let total_area = container_width * container_height;
    if !total_weight.is_finite() || !total_area.is_finite() {
        return Err(InvalidInput::Overflow {
            total_weight,
            total_area,
        });
    }
    if total_weight == 0.0 {
        return Ok(sorted
            .into_iter()
            .map(|item| PlacedItem {
                item: item.clone(),
                rect: Rect::default(),
            })
            .collect());
    }

    let mut cursor = Cursor::new(container_width, container_height);

    Ok(sorted
        .into_iter()
        .map(|item| {
            let area = total_area * (item.weight() / total_weight);
            PlacedItem {
                item: item.clone(),
                rect: cursor.place(area),
            }
        })
        .collect())
}

/// Running position and unfilled extent while slicing.
///
/// # Invariants
/// - The unfilled region is always `(x, y, remaining_width, remaining_height)`.
/// - `remaining_width, remaining_height >= 0`
#[derive(Debug, Clone, Copy)]
struct Cursor {
    x: f64,
    y: f64,
    remaining_width: f64,
    remaining_height: f64,
}

impl Cursor {
    fn new(width: f64, height: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            remaining_width: width,
            remaining_height: height,
        }
    }

    /// Cut a slice of `area` off the unfilled region and advance past it.
    fn place(&mut self, area: f64) -> Rect {
        // Orientation and advance axis must come from the same comparison.
        let width_major = self.remaining_width > self.remaining_height;
        let (width, height) = slice(
            area,
            self.remaining_width,
            self.remaining_height,
            width_major,
        );
        let rect = Rect::new(self.x, self.y, width, height);

        if width_major {
            self.x += width;
            self.remaining_width = (self.remaining_width - width).max(0.0);
        } else {
            self.y += height;
            self.remaining_height = (self.remaining_height - height).max(0.0);
        }
        rect
    }
}

/// Size of one slice of `area` cut from a `remaining_width` ×
/// `remaining_height` region.
///
/// Width-major slices span the full remaining height, height-major slices the
/// full remaining width. A slice longer than the region on its cut axis is
/// clamped to it and its other side stretched to keep the area.
fn slice(area: f64, remaining_width: f64, remaining_height: f64, width_major: bool) -> (f64, f64) {
    if width_major {
        let mut width = divide_or_zero(area, remaining_height);
        let mut height = remaining_height;
        if width > remaining_width {
            width = remaining_width;
            height = divide_or_zero(area, remaining_width);
        }
        (width, height)
    } else {
        let mut height = divide_or_zero(area, remaining_width);
        let mut width = remaining_width;
        if height > remaining_height {
            height = remaining_height;
            width = divide_or_zero(area, remaining_height);
        }
        (width, height)
    }
}

/// `area / side`, or 0 once the region has collapsed on that side.
fn divide_or_zero(area: f64, side: f64) -> f64 {
    if side > 0.0 {
        area / side
    } else {
        0.0
    }
}

/// Current layout inputs and the placement computed from them.
///
/// Every successful mutation recomputes the full layout. A rejected mutation
/// leaves inputs and placement exactly as they were.
#[derive(Debug, Clone, Default)]
pub struct LayoutState {
    container_width: f64,
    container_height: f64,
    items: Vec<Item>,
    placed: Vec<PlacedItem>,
}

impl LayoutState {
    /// Empty item set in a 0×0 container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the item set and recompute.
    pub fn set_items(&mut self, items: Vec<Item>) -> Result<&[PlacedItem], InvalidInput> {
        let placed = layout(self.container_width, self.container_height, &items)
            .inspect_err(|err| warn!(error = %err, "Rejected item set"))?;
        self.items = items;
        self.commit(placed);
        Ok(&self.placed)
    }

    /// Resize the container and recompute.
    pub fn set_container_size(
        &mut self,
        width: f64,
        height: f64,
    ) -> Result<&[PlacedItem], InvalidInput> {
        let placed = layout(width, height, &self.items)
            .inspect_err(|err| warn!(error = %err, "Rejected container size"))?;
        self.container_width = width;
        self.container_height = height;
        self.commit(placed);
        Ok(&self.placed)
    }

    fn commit(&mut self, placed: Vec<PlacedItem>) {
        debug!(
            items = self.items.len(),
            placed = placed.len(),
            width = self.container_width,
            height = self.container_height,
            "Layout recomputed"
        );
        self.placed = placed;
    }

    /// Items in the order the host supplied them.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Last computed placement, in placement order.
    pub fn placed(&self) -> &[PlacedItem] {
        &self.placed
    }

    /// `(width, height)` of the container.
    pub fn container_size(&self) -> (f64, f64) {
        (self.container_width, self.container_height)
    }

    /// Look up a current item by id.
    pub fn find(&self, id: &crate::model::ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
