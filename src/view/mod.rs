//! TUI rendering and terminal management (impure shell)

pub mod colors;
pub mod constants;
pub mod popup;
pub mod render;

pub use colors::{apply_opacity, highlight_opacity, label_color, parse_color, resolve_color};
pub use popup::{DEFAULT_POPUP_OFFSET, detail_text, place_popup, tile_label};
pub use render::RenderOptions;

use crate::config::ResolvedConfig;
use crate::model::{AppError, Item, ItemId, TreemapError, hit_test};
use crate::state::{InstantTimer, Treemap, TreemapEvent};
use constants::{IDLE_POLL_INTERVAL, STATUS_BAR_HEIGHT};
use crossterm::{
    ExecutableCommand,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::layout::{Position, Rect as CellRect};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Treemap rejected an update
    #[error("Treemap error: {0}")]
    Treemap(#[from] TreemapError),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    treemap: Treemap<InstantTimer>,
    /// Events published by the treemap since the last drain
    inbox: Rc<RefCell<VecDeque<TreemapEvent>>>,
    options: RenderOptions,
    /// Item whose detail popup is visible
    detail: Option<Item>,
    /// Last pointer position, for popup placement
    pointer: Option<Position>,
    /// Item under the pointer as of the last mouse event
    under_pointer: Option<ItemId>,
    /// Region the treemap is drawn into (screen minus status bar)
    map_area: CellRect,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(items: Vec<Item>, config: &ResolvedConfig) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Self::with_terminal(terminal, items, config)
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits (q, Esc or Ctrl+C). Blocks on input until
    /// the hover timer is due, so an idle screen costs nothing.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let timeout = self
                .treemap
                .selection()
                .timer()
                .remaining()
                .map_or(IDLE_POLL_INTERVAL, |r| r.min(IDLE_POLL_INTERVAL));

            let mut dirty = false;
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            info!("Quit requested");
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(width, height) => self.handle_resize(width, height)?,
                    _ => {}
                }
                dirty = true;
            }

            if self.tick() || dirty {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Build the app on an already-initialised terminal.
    pub(crate) fn with_terminal(
        terminal: Terminal<B>,
        items: Vec<Item>,
        config: &ResolvedConfig,
    ) -> Result<Self, TuiError> {
        let mut treemap = Treemap::new(InstantTimer::new());
        treemap.set_popup_delay(i64::try_from(config.popup_delay_ms).unwrap_or(i64::MAX));

        let inbox = Rc::new(RefCell::new(VecDeque::new()));
        let sink = Rc::clone(&inbox);
        treemap.subscribe(move |event: &TreemapEvent| sink.borrow_mut().push_back(event.clone()));

        treemap.set_items(items)?;

        let mut app = Self {
            terminal,
            treemap,
            inbox,
            options: RenderOptions {
                show_labels: config.show_labels,
                dim_opacity: config.dim_opacity,
                color: std::env::var_os("NO_COLOR").is_none(),
            },
            detail: None,
            pointer: None,
            under_pointer: None,
            map_area: CellRect::default(),
        };

        let size = app.terminal.size()?;
        app.handle_resize(size.width, size.height)?;
        app.drain_inbox();
        Ok(app)
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }
        matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
    }

    /// Route pointer motion to hover and left-button release to click.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);

        if !self.map_area.contains(position) {
            self.pointer = None;
            if self.under_pointer.take().is_some() {
                self.treemap.cancel_hover();
            }
            return;
        }

        // Sample the centre of the cell.
        let x = f64::from(position.x - self.map_area.x) + 0.5;
        let y = f64::from(position.y - self.map_area.y) + 0.5;
        let hit = hit_test(self.treemap.placed(), x, y).map(|p| p.item.id().clone());

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.pointer = Some(position);
                if hit == self.under_pointer {
                    return;
                }
                if let Some(previous) = self.under_pointer.take() {
                    self.treemap.pointer_leave(&previous);
                }
                if let Some(id) = &hit {
                    if let Err(e) = self.treemap.pointer_enter(id) {
                        warn!(error = %e, "Hover on unknown item");
                    }
                }
                self.under_pointer = hit;
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(id) = hit {
                    if let Err(e) = self.treemap.click(&id) {
                        warn!(error = %e, "Click on unknown item");
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_resize(&mut self, width: u16, height: u16) -> Result<(), TuiError> {
        debug!("Handling resize to {}x{}", width, height);
        self.map_area = CellRect::new(0, 0, width, height.saturating_sub(STATUS_BAR_HEIGHT));
        self.treemap.set_container_size(
            f64::from(self.map_area.width),
            f64::from(self.map_area.height),
        )?;
        Ok(())
    }

    /// Poll the hover timer and apply published events.
    ///
    /// Returns true if anything changed that needs a redraw.
    fn tick(&mut self) -> bool {
        self.treemap.tick();
        self.drain_inbox()
    }

    fn drain_inbox(&mut self) -> bool {
        let events: Vec<TreemapEvent> = self.inbox.borrow_mut().drain(..).collect();
        let changed = !events.is_empty();

        for event in events {
            match event {
                TreemapEvent::LayoutChanged(placed) => {
                    debug!(tiles = placed.len(), "Layout changed");
                }
                TreemapEvent::SelectionChanged(selected) => {
                    info!(
                        selected = selected.as_ref().map_or("none", |item| item.label()),
                        "Selection changed"
                    );
                }
                TreemapEvent::ShowDetail(item) => self.detail = Some(item),
                TreemapEvent::HideDetail => self.detail = None,
            }
        }
        changed
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let treemap = &self.treemap;
        let options = &self.options;
        let map_area = self.map_area;
        let detail = self.detail.as_ref().zip(self.pointer);

        self.terminal.draw(|frame| {
            let screen = frame.area();
            render::render_treemap(frame, map_area, treemap.placed(), treemap.selected(), options);

            let status_area = CellRect::new(
                screen.x,
                screen.bottom().saturating_sub(STATUS_BAR_HEIGHT),
                screen.width,
                STATUS_BAR_HEIGHT.min(screen.height),
            );
            render::render_status(frame, status_area, treemap.items().len(), treemap.selected());

            if let Some((item, pointer)) = detail {
                render::render_detail(frame, map_area, item, pointer, options);
            }
        })?;

        Ok(())
    }
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(items: Vec<Item>, config: &ResolvedConfig) -> Result<(), TuiError> {
    let mut app = TuiApp::new(items, config)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InvalidInput;
    use crate::source::demo_items;
    use crate::state::HoverPhase;
    use ratatui::backend::TestBackend;

    #[test]
    fn tui_error_from_io_error() {
        let io_err = io::Error::other("test error");
        let tui_err: TuiError = io_err.into();
        assert!(matches!(tui_err, TuiError::Io(_)));
    }

    fn config_with_delay(popup_delay_ms: u64) -> ResolvedConfig {
        ResolvedConfig {
            popup_delay_ms,
            ..ResolvedConfig::default()
        }
    }

    // Helper to create test TuiApp
    fn create_test_app(popup_delay_ms: u64) -> TuiApp<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        TuiApp::with_terminal(terminal, demo_items(), &config_with_delay(popup_delay_ms)).unwrap()
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen_text(app: &TuiApp<TestBackend>) -> String {
        app.terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn map_area_leaves_room_for_status_bar() {
        let app = create_test_app(500);
        assert_eq!(app.map_area, CellRect::new(0, 0, 60, 15));
        assert_eq!(app.treemap.container_size(), (60.0, 15.0));
        assert_eq!(app.treemap.placed().len(), 5);
    }

    #[test]
    fn invalid_items_fail_construction() {
        let terminal = Terminal::new(TestBackend::new(20, 5)).unwrap();
        let result = TuiApp::with_terminal(
            terminal,
            vec![Item::new("bad", -1.0)],
            &ResolvedConfig::default(),
        );
        assert!(matches!(
            result,
            Err(TuiError::Treemap(TreemapError::InvalidInput(
                InvalidInput::NegativeWeight { .. }
            )))
        ));
    }

    #[test]
    fn draw_shows_largest_label() {
        let mut app = create_test_app(500);
        app.draw().unwrap();
        let text = screen_text(&app);
        assert!(text.contains("BTC"), "screen: {text}");
        assert!(text.contains("5 items"), "screen: {text}");
    }

    mod keys {
        use super::*;

        #[test]
        fn q_quits() {
            let mut app = create_test_app(500);
            assert!(app.handle_key(key(KeyCode::Char('q'))));
        }

        #[test]
        fn esc_quits() {
            let mut app = create_test_app(500);
            assert!(app.handle_key(key(KeyCode::Esc)));
        }

        #[test]
        fn ctrl_c_quits() {
            let mut app = create_test_app(500);
            assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        }

        #[test]
        fn other_keys_do_not_quit() {
            let mut app = create_test_app(500);
            assert!(!app.handle_key(key(KeyCode::Char('x'))));
        }
    }

    mod mouse_input {
        use super::*;

        #[test]
        fn click_selects_and_second_click_clears() {
            let mut app = create_test_app(500);

            app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 2, 2));
            assert_eq!(app.treemap.selected().map(Item::label), Some("BTC"));

            app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 2, 2));
            assert!(app.treemap.selected().is_none());
        }

        #[test]
        fn moving_onto_tile_starts_hover() {
            let mut app = create_test_app(500);

            app.handle_mouse(mouse(MouseEventKind::Moved, 2, 2));

            assert_eq!(app.treemap.phase(), HoverPhase::Pending);
            assert_eq!(app.under_pointer.as_ref().map(ToString::to_string), Some("BTC".into()));
        }

        #[test]
        fn moving_onto_status_bar_cancels_hover() {
            let mut app = create_test_app(500);
            app.handle_mouse(mouse(MouseEventKind::Moved, 2, 2));

            app.handle_mouse(mouse(MouseEventKind::Moved, 2, 15));

            assert_eq!(app.treemap.phase(), HoverPhase::Idle);
            assert!(app.under_pointer.is_none());
        }

        #[test]
        fn zero_delay_popup_shows_after_tick() {
            let mut app = create_test_app(0);
            app.handle_mouse(mouse(MouseEventKind::Moved, 2, 2));

            assert!(app.tick());
            assert_eq!(app.detail.as_ref().map(Item::label), Some("BTC"));

            app.draw().unwrap();
            assert!(screen_text(&app).contains("Percentage: 40.5"));
        }

        #[test]
        fn moving_to_another_tile_hides_popup() {
            let mut app = create_test_app(0);
            app.handle_mouse(mouse(MouseEventKind::Moved, 2, 2));
            app.tick();
            assert!(app.detail.is_some());

            // Bottom-right corner belongs to the smallest tile.
            app.handle_mouse(mouse(MouseEventKind::Moved, 59, 14));
            app.drain_inbox();

            assert!(app.detail.is_none());
            assert_eq!(app.treemap.phase(), HoverPhase::Pending);
        }
    }

    #[test]
    fn resize_relayouts_into_new_area() {
        let mut app = create_test_app(500);
        app.handle_resize(30, 10).unwrap();
        assert_eq!(app.treemap.container_size(), (30.0, 9.0));
        assert!(app.tick());
    }
}
