//! Selection and editing state machine.
//!
//! Three logical states: idle (no selection), selected, and editing.
//! Every transition is a total function over (state, event): attempted
//! from an incompatible state it is a defined no-op, never an error, so
//! out-of-order input delivery cannot crash a session.
//!
//! Transitions mutate state and return the ordered list of events to
//! publish. The session publishes them after releasing its state borrow,
//! so subscribers always observe fully committed state.

use crate::bus::GridEvent;
use crate::config::GridConfig;
use crate::coord::Coord;
use crate::grid::store::GridStore;
use crate::heading;

/// Current selection and edit-buffer state.
///
/// Invariants: `editing` implies `selected` is set; `pending` is only
/// populated while editing.
#[derive(Debug, Default)]
pub struct SelectionState {
    selected: Option<Coord>,
    editing: bool,
    pending: Option<String>,
    last_blurred: Option<Coord>,
}

impl SelectionState {
    /// The currently selected cell, if any.
    #[must_use]
    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    /// Whether an edit buffer is active.
    #[must_use]
    pub fn editing(&self) -> bool {
        self.editing
    }

    /// The uncommitted edit buffer, while editing.
    #[must_use]
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// The cell whose edit most recently ended.
    #[must_use]
    pub fn last_blurred(&self) -> Option<Coord> {
        self.last_blurred
    }
}

/// Select `cell`: any state becomes selected, editing off.
///
/// A coordinate outside the current extents is ignored, since mouse input can
/// race grid growth. An active edit buffer is abandoned; hosts that want
/// click-away commits call [`commit_and_blur`] first, the way a blur
/// handler fires before the click lands.
pub(crate) fn select_cell(
    state: &mut SelectionState,
    store: &GridStore,
    cell: Coord,
) -> Vec<GridEvent> {
    if !store.contains(cell) {
        return Vec::new();
    }
    state.selected = Some(cell);
    state.editing = false;
    state.pending = None;
    vec![GridEvent::CellSelected { cell }]
}

/// Enter edit mode on the selected cell, seeding the buffer from the
/// stored value. Idempotent: a no-op while already editing or with no
/// selection.
pub(crate) fn begin_edit(state: &mut SelectionState, store: &GridStore) {
    if state.editing {
        return;
    }
    let Some(cell) = state.selected else {
        return;
    };
    let Ok(stored) = store.get(cell) else {
        return;
    };
    state.pending = Some(stored.to_string());
    state.editing = true;
}

/// Replace the edit buffer. A no-op unless editing.
pub(crate) fn update_pending(state: &mut SelectionState, value: &str) {
    if state.editing {
        state.pending = Some(value.to_string());
    }
}

/// End the edit on the selected cell.
///
/// Writes the buffer through the store when it differs from the stored
/// value, then leaves the cell selected and records it as last blurred.
/// Without a pending edit this still records the blur. A no-op with no
/// selection.
pub(crate) fn commit_and_blur(state: &mut SelectionState, store: &mut GridStore) -> Vec<GridEvent> {
    let Some(cell) = state.selected else {
        return Vec::new();
    };

    let mut events = Vec::new();
    if let Some(value) = state.pending.take() {
        let changed = matches!(store.get(cell), Ok(stored) if stored != value);
        if changed && store.set(cell, value.clone()).is_ok() {
            events.push(GridEvent::CellValueChanged { cell, value });
            events.push(GridEvent::DataChanged {
                rows: store.snapshot(),
            });
        }
    }
    state.editing = false;
    state.last_blurred = Some(cell);
    events.push(GridEvent::CellBlurred { cell });
    events
}

/// Clear the selected cell's value.
///
/// Only valid while selected (not editing), and only when the selection is
/// not the cell that just blurred: that guard keeps a trailing delete
/// keystroke from wiping a value the user just committed.
pub(crate) fn delete_selected(state: &mut SelectionState, store: &mut GridStore) -> Vec<GridEvent> {
    if state.editing {
        return Vec::new();
    }
    let Some(cell) = state.selected else {
        return Vec::new();
    };
    if state.last_blurred == Some(cell) {
        return Vec::new();
    }

    let changed = matches!(store.get(cell), Ok(stored) if !stored.is_empty());
    if changed && store.set(cell, String::new()).is_ok() {
        return vec![
            GridEvent::CellValueChanged {
                cell,
                value: String::new(),
            },
            GridEvent::DataChanged {
                rows: store.snapshot(),
            },
        ];
    }
    Vec::new()
}

/// Drop the selection entirely: any state becomes idle.
pub(crate) fn clear_selection(state: &mut SelectionState) {
    state.selected = None;
    state.editing = false;
    state.pending = None;
}

/// Announce a click on a header cell. No state changes.
pub(crate) fn click_head_cell(config: &GridConfig, cell: Coord) -> Vec<GridEvent> {
    if heading::is_head_cell(config, cell) {
        vec![GridEvent::HeadCellClicked { cell }]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn store_2x2() -> GridStore {
        GridStore::new(2, 2)
    }

    #[test]
    fn select_then_edit_then_commit() {
        let mut store = store_2x2();
        let mut state = SelectionState::default();
        let cell = Coord::new(0, 0);

        let events = select_cell(&mut state, &store, cell);
        assert!(matches!(events[0], GridEvent::CellSelected { .. }));
        assert_eq!(state.selected(), Some(cell));
        assert!(!state.editing());

        begin_edit(&mut state, &store);
        assert!(state.editing());
        assert_eq!(state.pending(), Some(""));

        update_pending(&mut state, "42");
        let events = commit_and_blur(&mut state, &mut store);
        assert_eq!(store.get(cell).unwrap(), "42");
        assert_eq!(state.last_blurred(), Some(cell));
        assert!(!state.editing());
        assert!(state.pending().is_none());

        let topics: Vec<_> = events.iter().map(GridEvent::topic).collect();
        assert_eq!(
            topics,
            vec![
                crate::bus::Topic::CellValueChanged,
                crate::bus::Topic::DataChanged,
                crate::bus::Topic::CellBlurred,
            ]
        );
    }

    #[test]
    fn begin_edit_is_idempotent() {
        let mut store = store_2x2();
        store.set(Coord::new(0, 0), "seed").unwrap();
        let mut state = SelectionState::default();
        select_cell(&mut state, &store, Coord::new(0, 0));

        begin_edit(&mut state, &store);
        update_pending(&mut state, "typed");
        // A second begin_edit must not reseed the buffer.
        begin_edit(&mut state, &store);
        assert_eq!(state.pending(), Some("typed"));
    }

    #[test]
    fn begin_edit_without_selection_is_a_noop() {
        let store = store_2x2();
        let mut state = SelectionState::default();
        begin_edit(&mut state, &store);
        assert!(!state.editing());
        assert!(state.pending().is_none());
    }

    #[test]
    fn update_pending_while_idle_is_a_noop() {
        let mut state = SelectionState::default();
        update_pending(&mut state, "ghost");
        assert!(state.pending().is_none());
    }

    #[test]
    fn commit_without_edit_still_records_blur() {
        let mut store = store_2x2();
        let mut state = SelectionState::default();
        let cell = Coord::new(1, 1);
        select_cell(&mut state, &store, cell);

        let events = commit_and_blur(&mut state, &mut store);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], GridEvent::CellBlurred { .. }));
        assert_eq!(state.last_blurred(), Some(cell));
    }

    #[test]
    fn commit_with_unchanged_value_skips_data_events() {
        let mut store = store_2x2();
        store.set(Coord::new(0, 1), "same").unwrap();
        let mut state = SelectionState::default();
        select_cell(&mut state, &store, Coord::new(0, 1));
        begin_edit(&mut state, &store);

        let version = store.version();
        let events = commit_and_blur(&mut state, &mut store);
        assert_eq!(store.version(), version);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], GridEvent::CellBlurred { .. }));
    }

    #[test]
    fn delete_clears_an_unblurred_cell() {
        let mut store = store_2x2();
        store.set(Coord::new(1, 1), "doomed").unwrap();
        let mut state = SelectionState::default();
        select_cell(&mut state, &store, Coord::new(1, 1));

        let events = delete_selected(&mut state, &mut store);
        assert_eq!(store.get(Coord::new(1, 1)).unwrap(), "");
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn delete_respects_the_blur_guard() {
        let mut store = store_2x2();
        let mut state = SelectionState::default();
        let cell = Coord::new(1, 0);
        select_cell(&mut state, &store, cell);
        begin_edit(&mut state, &store);
        update_pending(&mut state, "kept");
        commit_and_blur(&mut state, &mut store);

        // Still selected and just blurred: delete must not wipe it.
        let events = delete_selected(&mut state, &mut store);
        assert!(events.is_empty());
        assert_eq!(store.get(cell).unwrap(), "kept");

        // A different cell is not covered by the guard.
        store.set(Coord::new(0, 0), "other").unwrap();
        select_cell(&mut state, &store, Coord::new(0, 0));
        let events = delete_selected(&mut state, &mut store);
        assert_eq!(events.len(), 2);
        assert_eq!(store.get(Coord::new(0, 0)).unwrap(), "");
    }

    #[test]
    fn delete_while_editing_is_a_noop() {
        let mut store = store_2x2();
        store.set(Coord::new(0, 0), "text").unwrap();
        let mut state = SelectionState::default();
        select_cell(&mut state, &store, Coord::new(0, 0));
        begin_edit(&mut state, &store);

        assert!(delete_selected(&mut state, &mut store).is_empty());
        assert_eq!(store.get(Coord::new(0, 0)).unwrap(), "text");
    }

    #[test]
    fn select_out_of_bounds_is_ignored() {
        let store = store_2x2();
        let mut state = SelectionState::default();
        let events = select_cell(&mut state, &store, Coord::new(9, 9));
        assert!(events.is_empty());
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn clear_selection_returns_to_idle() {
        let store = store_2x2();
        let mut state = SelectionState::default();
        select_cell(&mut state, &store, Coord::new(0, 0));
        begin_edit(&mut state, &store);

        clear_selection(&mut state);
        assert_eq!(state.selected(), None);
        assert!(!state.editing());
        assert!(state.pending().is_none());
    }

    #[test]
    fn head_click_only_fires_on_head_cells() {
        let config = GridConfig {
            has_head_row: true,
            ..GridConfig::default()
        };
        assert_eq!(click_head_cell(&config, Coord::new(0, 3)).len(), 1);
        assert!(click_head_cell(&config, Coord::new(1, 3)).is_empty());
    }
}
