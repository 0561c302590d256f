//! Error types for tmv.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error
//!   - [`TreemapError`] - Core failures reported to the host
//!     - [`InvalidInput`] - Rejected weights, ids, or container sizes
//!   - [`SourceError`](crate::source::SourceError) - Item file loading failures
//!   - `std::io::Error` - Terminal failures
//!
//! # Recovery Strategy
//!
//! Core errors are **non-fatal**: the offending update is rejected and the
//! previous valid state stays in place. Empty input (no items, zero-size
//! container) is not an error at all and yields an empty layout.

use super::identifiers::ItemId;
use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Core rejected an update.
    #[error("Treemap error: {0}")]
    Treemap(#[from] TreemapError),

    /// Items could not be loaded.
    #[error("Failed to load items: {0}")]
    Source(#[from] crate::source::SourceError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors surfaced by the treemap core to its host.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreemapError {
    /// An item or size update was rejected; prior state is unchanged.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// A pointer callback named an item that is not in the current set.
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),
}

/// Input values the layout cannot accept.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    /// Weights must be `>= 0`.
    #[error("item {id} has negative weight {weight}")]
    NegativeWeight {
        /// Offending item.
        id: ItemId,
        /// The rejected weight.
        weight: f64,
    },

    /// Weights must be finite.
    #[error("item {id} has non-finite weight {weight}")]
    NonFiniteWeight {
        /// Offending item.
        id: ItemId,
        /// The rejected weight.
        weight: f64,
    },

    /// Container dimensions must be finite.
    #[error("container size {width}x{height} is not finite")]
    NonFiniteSize {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },

    /// Finite inputs whose total weight or container area exceeds `f64`.
    #[error("total weight {total_weight} or container area {total_area} overflows")]
    Overflow {
        /// Sum of all weights.
        total_weight: f64,
        /// Container width times height.
        total_area: f64,
    },

    /// Two items in one set share an id.
    #[error("duplicate item id {id}")]
    DuplicateId {
        /// The repeated id.
        id: ItemId,
    },
}
