//! Directional navigation with boundary-triggered growth.
//!
//! Maps a direction to the neighboring cell and moves the selection
//! there. Walking past the bottom or right edge extends the grid by one
//! row/column when the configuration allows it, so the grid behaves as
//! effectively unbounded in reading order; the top and left edges are
//! hard stops.

use crate::bus::GridEvent;
use crate::config::GridConfig;
use crate::coord::Direction;
use crate::grid::state::{self, SelectionState};
use crate::grid::store::GridStore;

/// Move the selection one step in `direction`.
///
/// No-op while editing unless `force` is set (tab-to-advance), with no
/// selection, or when the move would leave the grid and growth in that
/// direction is disabled. A forced move out of an active edit commits the
/// edit first, the way losing the input commits in a browser host.
pub(crate) fn navigate(
    config: &GridConfig,
    store: &mut GridStore,
    selection: &mut SelectionState,
    direction: Direction,
    force: bool,
) -> Vec<GridEvent> {
    if selection.editing() && !force {
        return Vec::new();
    }
    let Some(origin) = selection.selected() else {
        return Vec::new();
    };
    let Some(target) = origin.shifted(direction) else {
        return Vec::new();
    };

    if !store.contains(target) {
        let grown = match direction {
            Direction::Down if config.can_add_row => {
                store.append_row();
                true
            }
            Direction::Right if config.can_add_column => {
                store.append_column();
                true
            }
            _ => false,
        };
        if !grown {
            return Vec::new();
        }
    }

    let mut events = Vec::new();
    if selection.editing() {
        events.extend(state::commit_and_blur(selection, store));
    }
    events.extend(state::select_cell(selection, store, target));
    events
}
