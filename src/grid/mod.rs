//! The grid session: data store, selection state, and bus wiring.
//!
//! `GridSession` is the in-process library boundary. It owns the cell
//! matrix and selection state behind a single shared handle, subscribes
//! its own transitions to the keyboard dispatcher's semantic topics, and
//! republishes change notifications for the host. One session, one grid,
//! one bus; everything is single-threaded and synchronous.

pub mod navigate;
pub mod state;
pub mod store;

use std::cell::RefCell;
use std::rc::Rc;

use crate::bus::{EventBus, GridEvent, Subscription, Topic};
use crate::config::GridConfig;
use crate::coord::{Coord, Direction};
use crate::error::Result;
use crate::heading;

pub use state::SelectionState;
pub use store::GridStore;

/// State shared between the session handle and its bus subscriptions.
pub(crate) struct SharedState {
    pub(crate) config: GridConfig,
    pub(crate) store: GridStore,
    pub(crate) selection: SelectionState,
}

/// One interactive grid: configuration, data, selection, and events.
pub struct GridSession {
    shared: Rc<RefCell<SharedState>>,
    bus: EventBus,
    // Input-topic wiring; lives exactly as long as the session.
    #[allow(dead_code)]
    wiring: Vec<Subscription>,
}

impl GridSession {
    /// Create a session with an empty `config.rows x config.columns` grid.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GridError::InvalidConfig`] for an unusable
    /// configuration.
    pub fn new(config: GridConfig) -> Result<Self> {
        Self::with_data(config, Vec::new())
    }

    /// Create a session seeded with initial rows.
    ///
    /// Supplied rows are normalized to the rectangular invariant and
    /// padded to the configured minimum dimensions; an empty supply falls
    /// back to an empty configured grid.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GridError::InvalidConfig`] for an unusable
    /// configuration.
    pub fn with_data(config: GridConfig, initial: Vec<Vec<String>>) -> Result<Self> {
        config.validate()?;
        let store = if initial.is_empty() {
            GridStore::new(config.rows, config.columns)
        } else {
            GridStore::from_rows(initial, config.rows, config.columns)
        };
        let shared = Rc::new(RefCell::new(SharedState {
            config,
            store,
            selection: SelectionState::default(),
        }));
        let bus = EventBus::new();
        let wiring = Self::wire_input_topics(&shared, &bus);
        Ok(GridSession { shared, bus, wiring })
    }

    /// Subscribe the session's transitions to the semantic input topics
    /// the keyboard dispatcher publishes.
    fn wire_input_topics(shared: &Rc<RefCell<SharedState>>, bus: &EventBus) -> Vec<Subscription> {
        let mut wiring = Vec::new();

        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let shared = Rc::clone(shared);
            let publish_bus = bus.clone();
            wiring.push(bus.subscribe(Topic::Navigate(direction), move |event| {
                if let GridEvent::Navigate { direction, force } = event {
                    Self::internal_navigate(&shared, &publish_bus, *direction, *force);
                }
                Ok(())
            }));
        }

        {
            let shared = Rc::clone(shared);
            wiring.push(bus.subscribe(Topic::EditTrigger, move |_| {
                Self::internal_begin_edit(&shared);
                Ok(())
            }));
        }

        {
            let shared = Rc::clone(shared);
            let publish_bus = bus.clone();
            wiring.push(bus.subscribe(Topic::RemoveTrigger, move |_| {
                Self::internal_delete_selected(&shared, &publish_bus);
                Ok(())
            }));
        }

        wiring
    }

    // ---- Internal handlers ----
    //
    // Each mutates under one borrow, releases it, then publishes, so a
    // subscriber's synchronous reaction can re-enter session queries.

    fn internal_navigate(
        shared: &Rc<RefCell<SharedState>>,
        bus: &EventBus,
        direction: Direction,
        force: bool,
    ) {
        let events = {
            let mut s = shared.borrow_mut();
            let SharedState {
                config,
                store,
                selection,
            } = &mut *s;
            navigate::navigate(config, store, selection, direction, force)
        };
        Self::publish_all(bus, events);
    }

    fn internal_begin_edit(shared: &Rc<RefCell<SharedState>>) {
        let mut s = shared.borrow_mut();
        let SharedState {
            store, selection, ..
        } = &mut *s;
        state::begin_edit(selection, store);
    }

    fn internal_delete_selected(shared: &Rc<RefCell<SharedState>>, bus: &EventBus) {
        let events = {
            let mut s = shared.borrow_mut();
            let SharedState {
                store, selection, ..
            } = &mut *s;
            state::delete_selected(selection, store)
        };
        Self::publish_all(bus, events);
    }

    fn publish_all(bus: &EventBus, events: Vec<GridEvent>) {
        for event in events {
            bus.publish(&event);
        }
    }

    // ---- Commands ----

    /// Select `cell`. Out-of-bounds coordinates are ignored.
    pub fn select_cell(&self, cell: Coord) {
        let events = {
            let mut s = self.shared.borrow_mut();
            let SharedState {
                store, selection, ..
            } = &mut *s;
            state::select_cell(selection, store, cell)
        };
        Self::publish_all(&self.bus, events);
    }

    /// Enter edit mode on the selected cell. Idempotent.
    pub fn begin_edit(&self) {
        Self::internal_begin_edit(&self.shared);
    }

    /// Replace the pending edit buffer. A no-op unless editing.
    pub fn update_pending(&self, value: &str) {
        let mut s = self.shared.borrow_mut();
        state::update_pending(&mut s.selection, value);
    }

    /// Commit the pending edit (if changed) and record the blur.
    pub fn commit_and_blur(&self) {
        let events = {
            let mut s = self.shared.borrow_mut();
            let SharedState {
                store, selection, ..
            } = &mut *s;
            state::commit_and_blur(selection, store)
        };
        Self::publish_all(&self.bus, events);
    }

    /// Clear the selected cell's value, honoring the just-blurred guard.
    pub fn delete_selected(&self) {
        Self::internal_delete_selected(&self.shared, &self.bus);
    }

    /// Drop the selection entirely.
    pub fn clear_selection(&self) {
        let mut s = self.shared.borrow_mut();
        state::clear_selection(&mut s.selection);
    }

    /// Move the selection one step in `direction`; `force` overrides the
    /// while-editing suppression (tab-to-advance).
    pub fn navigate(&self, direction: Direction, force: bool) {
        Self::internal_navigate(&self.shared, &self.bus, direction, force);
    }

    /// Announce a click on a header cell.
    pub fn click_head_cell(&self, cell: Coord) {
        let events = {
            let s = self.shared.borrow();
            state::click_head_cell(&s.config, cell)
        };
        Self::publish_all(&self.bus, events);
    }

    /// Replace the grid contents with host-supplied rows and reset the
    /// selection. The configuration keeps governing minimum dimensions.
    pub fn load(&self, rows: Vec<Vec<String>>) {
        let mut s = self.shared.borrow_mut();
        let (min_rows, min_columns) = (s.config.rows, s.config.columns);
        s.store = if rows.is_empty() {
            GridStore::new(min_rows, min_columns)
        } else {
            GridStore::from_rows(rows, min_rows, min_columns)
        };
        s.selection = SelectionState::default();
    }

    // ---- Queries ----

    /// The session's bus, for external subscriptions and input dispatch.
    #[must_use]
    pub fn bus(&self) -> EventBus {
        self.bus.clone()
    }

    /// A copy of the session configuration.
    #[must_use]
    pub fn config(&self) -> GridConfig {
        self.shared.borrow().config.clone()
    }

    /// The currently selected cell, if any.
    #[must_use]
    pub fn selected(&self) -> Option<Coord> {
        self.shared.borrow().selection.selected()
    }

    /// Whether an edit buffer is active.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.shared.borrow().selection.editing()
    }

    /// The uncommitted edit buffer, while editing.
    #[must_use]
    pub fn pending_value(&self) -> Option<String> {
        self.shared
            .borrow()
            .selection
            .pending()
            .map(str::to_string)
    }

    /// The cell whose edit most recently ended.
    #[must_use]
    pub fn last_blurred(&self) -> Option<Coord> {
        self.shared.borrow().selection.last_blurred()
    }

    /// The stored value at `cell`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GridError::OutOfBounds`] beyond current extents.
    pub fn value(&self, cell: Coord) -> Result<String> {
        self.shared
            .borrow()
            .store
            .get(cell)
            .map(str::to_string)
    }

    /// The value `cell` displays: header labels for header cells, the
    /// configured placeholder for empty cells, the stored value otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GridError::OutOfBounds`] beyond current extents.
    pub fn display_value(&self, cell: Coord) -> Result<String> {
        let s = self.shared.borrow();
        let stored = s.store.get(cell)?;
        Ok(heading::display_value(&s.config, cell, stored))
    }

    /// Current number of rows.
    #[must_use]
    pub fn row_count(&self) -> u32 {
        self.shared.borrow().store.row_count()
    }

    /// Current number of columns.
    #[must_use]
    pub fn column_count(&self) -> u32 {
        self.shared.borrow().store.column_count()
    }

    /// Clone of the full matrix.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Vec<String>> {
        self.shared.borrow().store.snapshot()
    }

    /// Store mutation counter; changes whenever cell data or extents do.
    #[must_use]
    pub fn data_version(&self) -> u64 {
        self.shared.borrow().store.version()
    }
}
