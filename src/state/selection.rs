//! Selection and hover-detail state machine (pure).
//!
//! Hover phases:
//!
//! ```text
//!            hover_start(x)             tick (delay elapsed)
//!   Idle ───────────────────▶ Pending ─────────────────────▶ PopupShown
//!    ▲                          │  ▲                              │
//!    │        hover_cancel      │  │  hover_start(y), y != x      │
//!    └──────────────────────────┘  └──────────────────────────────┘
//!    ▲                                                            │
//!    └──────────────────────── hover_cancel ──────────────────────┘
//! ```
//!
//! Selection is orthogonal: `click` toggles it in any phase and never touches
//! hover state. Every transition returns the event the rendering layer must
//! act on, if any.

use super::timer::HoverTimer;
use crate::model::{Item, ItemId};
use std::time::Duration;
use tracing::debug;

/// Popup delay used unless the host configures another one.
pub const DEFAULT_POPUP_DELAY_MS: u64 = 500;

/// Where the hover popup currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverPhase {
    /// No hover pending, no popup shown.
    Idle,
    /// Timer running after a hover-start.
    Pending,
    /// Detail popup visible for the hovered item.
    PopupShown,
}

/// Output of a transition, consumed by the rendering layer and host.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    /// Emitted on every click with the new selection.
    SelectionChanged(Option<Item>),
    /// The hover delay elapsed; show the detail popup for this item.
    ShowDetail(Item),
    /// The detail popup must be hidden.
    HideDetail,
}

/// Selection and hover fields.
///
/// # Invariants
/// - `hovered` is `Some` only after the popup delay elapsed since a
///   hover-start with no intervening cancel.
/// - `pending_hover` and `hovered` are never both `Some`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    /// Item toggled on by the last click, if any.
    pub selected: Option<Item>,
    /// Item whose detail popup is shown.
    pub hovered: Option<Item>,
    /// Item waiting for the popup delay to elapse.
    pub pending_hover: Option<Item>,
    /// Delay applied to the next hover-start.
    pub popup_delay_ms: u64,
}

/// Selection/hover state machine driving a single [`HoverTimer`].
#[derive(Debug, Clone)]
pub struct SelectionController<T> {
    state: SelectionState,
    timer: T,
}

impl<T: HoverTimer + Default> Default for SelectionController<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: HoverTimer> SelectionController<T> {
    /// Idle controller with nothing selected and the default popup delay.
    pub fn new(timer: T) -> Self {
        Self {
            state: SelectionState {
                popup_delay_ms: DEFAULT_POPUP_DELAY_MS,
                ..SelectionState::default()
            },
            timer,
        }
    }

    /// Snapshot of the whole state.
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Currently selected item.
    pub fn selected(&self) -> Option<&Item> {
        self.state.selected.as_ref()
    }

    /// Item whose popup is shown.
    pub fn hovered(&self) -> Option<&Item> {
        self.state.hovered.as_ref()
    }

    /// Item waiting on the timer.
    pub fn pending_hover(&self) -> Option<&Item> {
        self.state.pending_hover.as_ref()
    }

    /// Delay the next hover-start will arm.
    pub fn popup_delay(&self) -> Duration {
        Duration::from_millis(self.state.popup_delay_ms)
    }

    /// The injected timer.
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Mutable timer access for fake clocks.
    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Current hover phase, derived from the fields.
    pub fn phase(&self) -> HoverPhase {
        if self.state.hovered.is_some() {
            HoverPhase::PopupShown
        } else if self.state.pending_hover.is_some() {
            HoverPhase::Pending
        } else {
            HoverPhase::Idle
        }
    }

    /// Set the delay for subsequent hover-starts. Negative values clamp to 0.
    ///
    /// A timer already running keeps the interval it was started with.
    pub fn set_popup_delay(&mut self, ms: i64) {
        self.state.popup_delay_ms = u64::try_from(ms).unwrap_or(0);
        debug!(delay_ms = self.state.popup_delay_ms, "Popup delay set");
    }

    /// Pointer entered `item`: (re)start the popup delay for it.
    ///
    /// Returns [`SelectionEvent::HideDetail`] when this replaces a popup
    /// shown for a different item. Hovering the item whose popup is already
    /// shown is a no-op.
    pub fn on_hover_start(&mut self, item: Item) -> Option<SelectionEvent> {
        if self
            .state
            .hovered
            .as_ref()
            .is_some_and(|shown| shown.same_item(&item))
        {
            return None;
        }

        self.timer.stop();
        let hidden = self.state.hovered.take().map(|_| SelectionEvent::HideDetail);
        debug!(item = %item.id(), delay_ms = self.state.popup_delay_ms, "Hover started");
        self.state.pending_hover = Some(item);
        self.timer.start(self.popup_delay());
        hidden
    }

    /// Pointer left: drop any pending hover and hide the popup if shown.
    pub fn on_hover_cancel(&mut self) -> Option<SelectionEvent> {
        self.timer.stop();
        self.state.pending_hover = None;
        let hidden = self.state.hovered.take().map(|_| SelectionEvent::HideDetail);
        if hidden.is_some() {
            debug!("Hover cancelled, hiding detail");
        }
        hidden
    }

    /// Poll the timer; promotes the pending item to hovered once the delay
    /// has elapsed.
    pub fn on_tick(&mut self) -> Option<SelectionEvent> {
        if !self.timer.poll_elapsed() {
            return None;
        }
        let item = self.state.pending_hover.take()?;
        debug!(item = %item.id(), "Showing detail");
        self.state.hovered = Some(item.clone());
        Some(SelectionEvent::ShowDetail(item))
    }

    /// Toggle selection of `item`. Always reports the resulting selection.
    pub fn on_click(&mut self, item: Item) -> SelectionEvent {
        let already_selected = self
            .state
            .selected
            .as_ref()
            .is_some_and(|selected| selected.same_item(&item));

        self.state.selected = if already_selected { None } else { Some(item) };
        debug!(
            selected = ?self.state.selected.as_ref().map(|i| i.id().to_string()),
            "Selection toggled"
        );
        SelectionEvent::SelectionChanged(self.state.selected.clone())
    }

    /// Bring references in line with a replaced item set.
    ///
    /// `lookup` resolves an id in the new set. Items that survive are
    /// refreshed to their new values; a vanished selection is cleared
    /// (reported as `SelectionChanged(None)`), and a vanished pending or
    /// hovered item cancels the hover.
    pub fn reconcile<'a, F>(&mut self, lookup: F) -> Vec<SelectionEvent>
    where
        F: Fn(&ItemId) -> Option<&'a Item>,
    {
        let mut events = Vec::new();

        if let Some(selected) = self.state.selected.take() {
            match lookup(selected.id()) {
                Some(fresh) => self.state.selected = Some(fresh.clone()),
                None => {
                    debug!(item = %selected.id(), "Selected item removed");
                    events.push(SelectionEvent::SelectionChanged(None));
                }
            }
        }

        let hover_target = self
            .state
            .hovered
            .as_ref()
            .or(self.state.pending_hover.as_ref())
            .map(|item| item.id().clone());
        if let Some(id) = hover_target {
            match lookup(&id) {
                Some(fresh) => {
                    if self.state.hovered.is_some() {
                        self.state.hovered = Some(fresh.clone());
                    } else {
                        self.state.pending_hover = Some(fresh.clone());
                    }
                }
                None => events.extend(self.on_hover_cancel()),
            }
        }

        events
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;
