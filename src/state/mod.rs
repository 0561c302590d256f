//! Selection/hover state machine and the host-facing treemap surface.
//!
//! All transitions are synchronous and testable without a terminal; the
//! hover delay runs on an injected [`HoverTimer`].

pub mod observable;
pub mod selection;
pub mod timer;
pub mod treemap;

// Re-export for convenience
pub use observable::{Listeners, SubscriptionId};
pub use selection::{
    HoverPhase, SelectionController, SelectionEvent, SelectionState, DEFAULT_POPUP_DELAY_MS,
};
pub use timer::{HoverTimer, InstantTimer, ManualTimer};
pub use treemap::{Treemap, TreemapEvent};
