//! gridedit - spreadsheet grid state engine for the web
//!
//! Owns the state an interactive grid editor needs and nothing it
//! doesn't:
//! - Rectangular cell matrix with append-only growth
//! - Selection and single-cell editing lifecycle
//! - Keyboard navigation with boundary-triggered grid extension
//! - Session-scoped event bus decoupling input from state
//! - Header labels (numeric or Excel-style letters)
//!
//! Rendering, focus management, and styling stay with the host: it reacts
//! to change notifications by re-reading the queries.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridEdit } from 'gridedit';
//! await init();
//! const grid = new GridEdit({ rows: 8, columns: 4, canAddRow: true });
//! grid.attach(container);
//! grid.subscribe('dataChanged', rows => save(rows));
//! grid.select_cell(0, 0);
//! ```

// State engine modules
pub mod bus;
pub mod config;
pub mod coord;
pub mod error;
pub mod grid;
pub mod heading;
pub mod keyboard;

// Host-facing surface
pub mod editor;

use wasm_bindgen::prelude::*;

// Re-export the main editor struct
pub use editor::GridEdit;

pub use bus::{EventBus, GridEvent, Subscription, Topic};
pub use config::GridConfig;
pub use coord::{Coord, Direction};
pub use error::{GridError, Result};
pub use grid::{GridSession, GridStore, SelectionState};
pub use keyboard::{KeyPhase, KeyboardDispatcher, NamedKey};

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
