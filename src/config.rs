//! Host-supplied grid configuration.
//!
//! The configuration object is read-only for the lifetime of a grid
//! session. It deserializes from the same camelCase object shape grid
//! hosts pass from JavaScript.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Grid configuration, fixed at session creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    /// Minimum number of rows at creation.
    pub rows: u32,
    /// Minimum number of columns at creation.
    pub columns: u32,
    /// Row 0 acts as a header row.
    pub has_head_row: bool,
    /// Column 0 acts as a header column.
    pub has_head_column: bool,
    /// Header cells display computed labels (letters for columns, numbers
    /// for rows) instead of their stored values.
    pub has_letter_number_heads: bool,
    /// Head row cells render as interactive text (presentation hint only;
    /// the engine never branches on it).
    pub is_head_row_string: bool,
    /// Head column cells render as interactive text (presentation hint
    /// only).
    pub is_head_column_string: bool,
    /// Navigating down past the last row appends a new row.
    pub can_add_row: bool,
    /// Navigating right past the last column appends a new column.
    pub can_add_column: bool,
    /// Placeholder shown for empty cells.
    pub empty_value_symbol: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            rows: 10,
            columns: 10,
            has_head_row: false,
            has_head_column: false,
            has_letter_number_heads: false,
            is_head_row_string: false,
            is_head_column_string: false,
            can_add_row: false,
            can_add_column: false,
            empty_value_symbol: String::new(),
        }
    }
}

impl GridConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidConfig`] when `rows` or `columns` is
    /// zero, or when both head flags are set on a grid too small to keep
    /// any data cell (headers would consume the only row or column).
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(GridError::InvalidConfig(format!(
                "rows and columns must be positive, got {}x{}",
                self.rows, self.columns
            )));
        }
        if self.has_head_row && self.has_head_column && (self.rows < 2 || self.columns < 2) {
            return Err(GridError::InvalidConfig(format!(
                "head row and head column leave no data cells in a {}x{} grid",
                self.rows, self.columns
            )));
        }
        Ok(())
    }
}
