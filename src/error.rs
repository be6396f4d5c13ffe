//! Structured error types for gridedit.
//!
//! The grid surface is deliberately hard to misuse: state-machine
//! transitions attempted from an incompatible state are defined no-ops, and
//! navigation validates bounds before touching the store. What remains are
//! the two caller-facing failures below.

/// All errors that can occur in the grid engine.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// A coordinate outside the grid's current extents was passed to a
    /// direct store access (`get`/`set`).
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        /// Requested row.
        row: u32,
        /// Requested column.
        col: u32,
        /// Row count at the time of the access.
        rows: u32,
        /// Column count at the time of the access.
        cols: u32,
    },

    /// The host-supplied configuration cannot describe a usable grid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
