//! Browser-facing editor surface around `GridSession`.
//!
//! `GridEdit` is the struct JavaScript hosts hold: it installs the DOM
//! keyboard listeners, bridges bus notifications to JS callbacks, and
//! exposes the session's commands and queries over wasm-bindgen. Rendering
//! stays with the host: after any state change the registered render
//! callback fires and the host re-reads the queries it cares about.

#[cfg(target_arch = "wasm32")]
mod keys;

use wasm_bindgen::prelude::*;

use crate::config::GridConfig;
use crate::grid::GridSession;
use crate::keyboard::KeyboardDispatcher;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use web_sys::{HtmlElement, KeyboardEvent};

#[cfg(target_arch = "wasm32")]
use crate::bus::{GridEvent, Topic};
#[cfg(target_arch = "wasm32")]
use crate::coord::{Coord, Direction};

/// The grid editor exported to JavaScript.
#[wasm_bindgen]
pub struct GridEdit {
    session: GridSession,
    dispatcher: KeyboardDispatcher,

    #[cfg(target_arch = "wasm32")]
    render_callback: Rc<RefCell<Option<Function>>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)] // Kept to maintain the DOM listener references
    key_closures: Vec<Closure<dyn FnMut(KeyboardEvent)>>,
}

// ============================================================================
// WASM32 Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl GridEdit {
    /// Create an editor from the host's configuration object.
    ///
    /// `config` is the camelCase object grid hosts already use
    /// (`{rows, columns, hasHeadRow, ..., emptyValueSymbol}`); passing
    /// `null`/`undefined` selects the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<GridEdit, JsValue> {
        console_error_panic_hook::set_once();

        let config: GridConfig = if config.is_undefined() || config.is_null() {
            GridConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("invalid config: {e}")))?
        };
        let session = GridSession::new(config)?;
        let dispatcher = KeyboardDispatcher::new(session.bus());

        Ok(GridEdit {
            session,
            dispatcher,
            render_callback: Rc::new(RefCell::new(None)),
            key_closures: Vec::new(),
        })
    }

    /// Install `keydown`/`keyup` listeners on `target`.
    ///
    /// The listeners classify keys, dispatch grid actions on release, and
    /// suppress the platform defaults for grid-reserved keys (Tab focus
    /// shift inside the edit field, Backspace back-navigation outside it).
    pub fn attach(&mut self, target: &HtmlElement) {
        self.key_closures = keys::install(
            target,
            self.dispatcher.clone(),
            Rc::clone(&self.render_callback),
        );
    }

    /// Replace the grid contents with host-supplied rows (an array of
    /// string arrays) and reset the selection.
    pub fn load(&self, rows: JsValue) -> Result<(), JsValue> {
        let rows: Vec<Vec<String>> = serde_wasm_bindgen::from_value(rows)
            .map_err(|e| JsValue::from_str(&format!("invalid rows: {e}")))?;
        self.session.load(rows);
        self.request_render();
        Ok(())
    }

    /// Subscribe a JS callback to a topic by wire name
    /// (`"cellSelected"`, `"cellValueChanged"`, `"dataChanged"`,
    /// `"cellBlurred"`, `"headCellClicked"`, ...).
    ///
    /// Returns an unsubscribe function. A throwing callback is reported
    /// on the console and never interrupts delivery.
    pub fn subscribe(&self, topic: &str, callback: Function) -> Result<JsValue, JsValue> {
        let Some(topic) = Topic::from_name(topic) else {
            return Err(JsValue::from_str(&format!("unknown topic: {topic}")));
        };
        let subscription = self
            .session
            .bus()
            .subscribe(topic, move |event| forward_to_js(&callback, event));
        Ok(Closure::once_into_js(move || subscription.cancel()))
    }

    /// Register a callback invoked after any state change, the host's
    /// signal to re-render from the queries.
    pub fn set_render_callback(&mut self, callback: Option<Function>) {
        *self.render_callback.borrow_mut() = callback;
    }

    // ---- Commands ----

    /// Select the cell at `(row, col)`.
    pub fn select_cell(&self, row: u32, col: u32) {
        self.session.select_cell(Coord::new(row, col));
        self.request_render();
    }

    /// Enter edit mode on the selected cell.
    pub fn begin_edit(&self) {
        self.session.begin_edit();
        self.request_render();
    }

    /// Replace the pending edit buffer with the input field's value.
    pub fn update_pending(&self, value: &str) {
        self.session.update_pending(value);
    }

    /// Commit the pending edit and record the blur.
    pub fn commit_and_blur(&self) {
        self.session.commit_and_blur();
        self.request_render();
    }

    /// Clear the selected cell's value.
    pub fn delete_selected(&self) {
        self.session.delete_selected();
        self.request_render();
    }

    /// Drop the selection.
    pub fn clear_selection(&self) {
        self.session.clear_selection();
        self.request_render();
    }

    /// Move the selection (`direction` is `"up"`, `"down"`, `"left"` or
    /// `"right"`); `force` overrides the while-editing suppression.
    pub fn navigate(&self, direction: &str, force: bool) -> Result<(), JsValue> {
        let Some(direction) = Direction::from_name(direction) else {
            return Err(JsValue::from_str(&format!(
                "unknown direction: {direction}"
            )));
        };
        self.session.navigate(direction, force);
        self.request_render();
        Ok(())
    }

    /// Announce a click on the header cell at `(row, col)`.
    pub fn click_head_cell(&self, row: u32, col: u32) {
        self.session.click_head_cell(Coord::new(row, col));
    }

    // ---- Queries ----

    /// The selected cell as `[row, col]`.
    pub fn selection(&self) -> Option<Vec<u32>> {
        self.session.selected().map(|c| vec![c.row(), c.col()])
    }

    /// Whether a cell edit is in progress.
    pub fn is_editing(&self) -> bool {
        self.session.is_editing()
    }

    /// The uncommitted edit buffer, while editing.
    pub fn pending_value(&self) -> Option<String> {
        self.session.pending_value()
    }

    /// The cell whose edit most recently ended, as `[row, col]`.
    pub fn last_blurred(&self) -> Option<Vec<u32>> {
        self.session.last_blurred().map(|c| vec![c.row(), c.col()])
    }

    /// The stored value at `(row, col)`.
    pub fn value(&self, row: u32, col: u32) -> Result<String, JsValue> {
        Ok(self.session.value(Coord::new(row, col))?)
    }

    /// The display value at `(row, col)`: header labels for header cells,
    /// the configured placeholder for empty cells.
    pub fn display_value(&self, row: u32, col: u32) -> Result<String, JsValue> {
        Ok(self.session.display_value(Coord::new(row, col))?)
    }

    /// The full grid as an array of string arrays.
    pub fn data(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.snapshot())
            .map_err(|e| JsValue::from_str(&format!("serialization error: {e}")))
    }

    /// Current number of rows.
    pub fn row_count(&self) -> u32 {
        self.session.row_count()
    }

    /// Current number of columns.
    pub fn column_count(&self) -> u32 {
        self.session.column_count()
    }

    fn request_render(&self) {
        keys::invoke_render_callback(&self.render_callback);
    }
}

/// Deliver one bus event to a JS callback with the payload shape hosts
/// expect: `cellSelected(cell)`, `cellValueChanged(cell, value)`,
/// `dataChanged(rows)`, `cellBlurred(cell)`, `headCellClicked(cell)`.
#[cfg(target_arch = "wasm32")]
fn forward_to_js(callback: &Function, event: &GridEvent) -> Result<(), String> {
    let this = JsValue::NULL;
    let result = match event {
        GridEvent::CellSelected { cell }
        | GridEvent::CellBlurred { cell }
        | GridEvent::HeadCellClicked { cell } => {
            let cell = serde_wasm_bindgen::to_value(cell).map_err(|e| e.to_string())?;
            callback.call1(&this, &cell)
        }
        GridEvent::CellValueChanged { cell, value } => {
            let cell = serde_wasm_bindgen::to_value(cell).map_err(|e| e.to_string())?;
            callback.call2(&this, &cell, &JsValue::from_str(value))
        }
        GridEvent::DataChanged { rows } => {
            let rows = serde_wasm_bindgen::to_value(rows).map_err(|e| e.to_string())?;
            callback.call1(&this, &rows)
        }
        // Input topics carry no host-facing payload.
        GridEvent::Navigate { .. } | GridEvent::EditTrigger | GridEvent::RemoveTrigger => {
            callback.call0(&this)
        }
    };
    result.map(|_| ()).map_err(|e| format!("{e:?}"))
}

// ============================================================================
// Non-WASM32 Implementation (for tests)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
impl GridEdit {
    /// Create an editor (non-WASM, for testing native hosts).
    ///
    /// # Errors
    ///
    /// Returns [`crate::GridError::InvalidConfig`] for an unusable
    /// configuration.
    pub fn new_test(config: GridConfig) -> crate::error::Result<Self> {
        Self::new_test_with_data(config, Vec::new())
    }

    /// Create an editor seeded with initial rows (non-WASM).
    ///
    /// # Errors
    ///
    /// Returns [`crate::GridError::InvalidConfig`] for an unusable
    /// configuration.
    pub fn new_test_with_data(
        config: GridConfig,
        rows: Vec<Vec<String>>,
    ) -> crate::error::Result<Self> {
        let session = GridSession::with_data(config, rows)?;
        let dispatcher = KeyboardDispatcher::new(session.bus());
        Ok(GridEdit {
            session,
            dispatcher,
        })
    }

    /// The wrapped session, for queries and direct commands.
    #[must_use]
    pub fn session(&self) -> &GridSession {
        &self.session
    }

    /// Feed one named key event through the dispatcher, standing in for
    /// the DOM listeners. Returns the suppress-default verdict.
    pub fn dispatch_key(
        &self,
        key: &str,
        phase: crate::keyboard::KeyPhase,
        in_editable_input: bool,
    ) -> bool {
        match crate::keyboard::classify(key) {
            Some(named) => self.dispatcher.dispatch(named, phase, in_editable_input),
            None => false,
        }
    }
}
