//! Host-facing treemap state.
//!
//! [`Treemap`] ties the layout to the selection controller and publishes
//! every output through one listener list. Hosts drive it with input
//! callbacks and call [`Treemap::tick`] from their event loop so the hover
//! timer can fire.

use super::observable::{Listeners, SubscriptionId};
use super::selection::{HoverPhase, SelectionController, SelectionEvent};
use super::timer::HoverTimer;
use crate::layout::LayoutState;
use crate::model::{Item, ItemId, PlacedItem, TreemapError};
use tracing::debug;

/// Everything the rendering layer and host can observe.
#[derive(Debug, Clone, PartialEq)]
pub enum TreemapEvent {
    /// Emitted after every successful layout recompute.
    LayoutChanged(Vec<PlacedItem>),
    /// New selection after a click, or `None` when the selected item left
    /// the item set.
    SelectionChanged(Option<Item>),
    /// Show the detail popup for an item.
    ShowDetail(Item),
    /// Hide the detail popup.
    HideDetail,
}

impl From<SelectionEvent> for TreemapEvent {
    fn from(event: SelectionEvent) -> Self {
        match event {
            SelectionEvent::SelectionChanged(selected) => Self::SelectionChanged(selected),
            SelectionEvent::ShowDetail(item) => Self::ShowDetail(item),
            SelectionEvent::HideDetail => Self::HideDetail,
        }
    }
}

/// Layout plus selection/hover state behind one observable surface.
#[derive(Debug)]
pub struct Treemap<T> {
    layout: LayoutState,
    selection: SelectionController<T>,
    listeners: Listeners<TreemapEvent>,
}

impl<T: HoverTimer + Default> Default for Treemap<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: HoverTimer> Treemap<T> {
    /// Empty treemap with a 0x0 container, driven by `timer`.
    pub fn new(timer: T) -> Self {
        Self {
            layout: LayoutState::new(),
            selection: SelectionController::new(timer),
            listeners: Listeners::new(),
        }
    }

    /// Register an event callback.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&TreemapEvent) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// Remove a callback. Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // ===== Inputs =====

    /// Replace the item set.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if any item has a negative or non-finite weight, if two
    /// items share an id, or if the total weight overflows; the previous item
    /// set, layout and selection are kept.
    pub fn set_items(&mut self, items: Vec<Item>) -> Result<(), TreemapError> {
        self.layout.set_items(items)?;
        self.publish_layout();

        let layout = &self.layout;
        let events = self.selection.reconcile(|id| layout.find(id));
        for event in events {
            self.publish(event.into());
        }
        Ok(())
    }

    /// Resize the container.
    ///
    /// Zero or negative sizes are accepted and produce an empty layout.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a non-finite dimension; the previous size is kept.
    pub fn set_container_size(&mut self, width: f64, height: f64) -> Result<(), TreemapError> {
        self.layout.set_container_size(width, height)?;
        self.publish_layout();
        Ok(())
    }

    /// Delay for hover-starts after this call. Negative values clamp to 0.
    pub fn set_popup_delay(&mut self, ms: i64) {
        self.selection.set_popup_delay(ms);
    }

    /// Pointer entered the rectangle of `id`.
    pub fn pointer_enter(&mut self, id: &ItemId) -> Result<(), TreemapError> {
        let item = self.lookup(id)?;
        if let Some(event) = self.selection.on_hover_start(item) {
            self.publish(event.into());
        }
        Ok(())
    }

    /// Pointer left the rectangle of `id`.
    ///
    /// Ignored unless `id` is the item currently pending or shown, so a late
    /// leave for a previous item cannot cancel the hover of the next one.
    pub fn pointer_leave(&mut self, id: &ItemId) {
        let is_current = self
            .selection
            .hovered()
            .or(self.selection.pending_hover())
            .is_some_and(|item| item.id() == id);
        if !is_current {
            debug!(item = %id, "Ignoring leave for item not under hover");
            return;
        }
        self.cancel_hover();
    }

    /// Drop any hover unconditionally (e.g. pointer left the container).
    pub fn cancel_hover(&mut self) {
        if let Some(event) = self.selection.on_hover_cancel() {
            self.publish(event.into());
        }
    }

    /// Item `id` was clicked: toggle its selection.
    pub fn click(&mut self, id: &ItemId) -> Result<(), TreemapError> {
        let item = self.lookup(id)?;
        let event = self.selection.on_click(item);
        self.publish(event.into());
        Ok(())
    }

    /// Poll the hover timer. Call once per event-loop turn.
    pub fn tick(&mut self) {
        if let Some(event) = self.selection.on_tick() {
            self.publish(event.into());
        }
    }

    // ===== Accessors =====

    /// Items in host order.
    pub fn items(&self) -> &[Item] {
        self.layout.items()
    }

    /// Current layout, heaviest item first.
    pub fn placed(&self) -> &[PlacedItem] {
        self.layout.placed()
    }

    /// `(width, height)` of the last accepted container size.
    pub fn container_size(&self) -> (f64, f64) {
        self.layout.container_size()
    }

    /// Currently selected item.
    pub fn selected(&self) -> Option<&Item> {
        self.selection.selected()
    }

    /// Item whose popup is shown.
    pub fn hovered(&self) -> Option<&Item> {
        self.selection.hovered()
    }

    /// Where the hover state machine is.
    pub fn phase(&self) -> HoverPhase {
        self.selection.phase()
    }

    /// Read-only view of the selection state machine.
    pub fn selection(&self) -> &SelectionController<T> {
        &self.selection
    }

    /// Timer access, e.g. to advance a [`ManualTimer`](super::ManualTimer).
    pub fn timer_mut(&mut self) -> &mut T {
        self.selection.timer_mut()
    }

    // ===== Internals =====

    fn lookup(&self, id: &ItemId) -> Result<Item, TreemapError> {
        self.layout
            .find(id)
            .cloned()
            .ok_or_else(|| TreemapError::UnknownItem(id.clone()))
    }

    fn publish_layout(&mut self) {
        let event = TreemapEvent::LayoutChanged(self.layout.placed().to_vec());
        self.listeners.emit(&event);
    }

    fn publish(&mut self, event: TreemapEvent) {
        self.listeners.emit(&event);
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "treemap_tests.rs"]
mod tests;
