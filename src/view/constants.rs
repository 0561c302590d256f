//! Layout dimension constants for TUI rendering.

use std::time::Duration;

/// Height of the status bar in lines.
///
/// Single line at the bottom for the selection and keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Gap between the pointer and the detail popup, in cells.
pub const CELL_POPUP_OFFSET: f64 = 1.0;

/// Horizontal padding inside the detail popup, per side.
pub const POPUP_PADDING: u16 = 1;

/// Longest the event loop blocks waiting for input when no hover timer is
/// armed.
pub const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(250);
