//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod geometry;
pub mod identifiers;
pub mod item;

// Re-export for convenience
pub use error::{AppError, InvalidInput, TreemapError};
pub use geometry::{hit_test, PlacedItem, Rect};
pub use identifiers::{InvalidItemId, ItemId};
pub use item::{ColorHint, Item};
