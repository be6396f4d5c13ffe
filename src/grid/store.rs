//! Owned, versioned cell matrix.
//!
//! All grid data lives here as a rectangular `Vec<Vec<String>>` behind a
//! single owning handle; growth is append-only and the matrix never
//! shrinks or reorders. Every mutation bumps a version counter so hosts
//! can cheaply detect change without diffing snapshots.

use crate::coord::Coord;
use crate::error::{GridError, Result};

/// The rectangular matrix of cell values.
#[derive(Debug, Clone)]
pub struct GridStore {
    rows: Vec<Vec<String>>,
    version: u64,
}

impl GridStore {
    /// Create an empty `rows x columns` matrix of `""` values.
    #[must_use]
    pub fn new(rows: u32, columns: u32) -> Self {
        let rows = (0..rows)
            .map(|_| vec![String::new(); columns as usize])
            .collect();
        GridStore { rows, version: 0 }
    }

    /// Build a store from caller-supplied rows.
    ///
    /// Input is normalized to the rectangular invariant: every row is
    /// padded with `""` to the widest row, and the matrix is padded to at
    /// least `min_rows x min_columns`.
    #[must_use]
    pub fn from_rows(initial: Vec<Vec<String>>, min_rows: u32, min_columns: u32) -> Self {
        let mut rows = initial;
        let width = rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(min_columns as usize);
        for row in &mut rows {
            row.resize(width, String::new());
        }
        while rows.len() < min_rows as usize {
            rows.push(vec![String::new(); width]);
        }
        GridStore { rows, version: 0 }
    }

    /// Current number of rows.
    #[must_use]
    pub fn row_count(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Current number of columns.
    #[must_use]
    pub fn column_count(&self) -> u32 {
        self.rows.first().map_or(0, |row| row.len() as u32)
    }

    /// Whether `cell` lies within the current extents.
    #[must_use]
    pub fn contains(&self, cell: Coord) -> bool {
        cell.row() < self.row_count() && cell.col() < self.column_count()
    }

    /// Read the value stored at `cell`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] when `cell` exceeds the current
    /// extents.
    pub fn get(&self, cell: Coord) -> Result<&str> {
        self.rows
            .get(cell.row() as usize)
            .and_then(|row| row.get(cell.col() as usize))
            .map(String::as_str)
            .ok_or_else(|| self.out_of_bounds(cell))
    }

    /// Replace the value stored at `cell`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] when `cell` exceeds the current
    /// extents.
    pub fn set(&mut self, cell: Coord, value: impl Into<String>) -> Result<()> {
        let oob = self.out_of_bounds(cell);
        let slot = self
            .rows
            .get_mut(cell.row() as usize)
            .and_then(|row| row.get_mut(cell.col() as usize))
            .ok_or(oob)?;
        *slot = value.into();
        self.version += 1;
        Ok(())
    }

    /// Append one row of `""` values, width equal to the current width.
    pub fn append_row(&mut self) {
        let width = self.column_count() as usize;
        self.rows.push(vec![String::new(); width]);
        self.version += 1;
    }

    /// Append one `""` value to every row.
    pub fn append_column(&mut self) {
        for row in &mut self.rows {
            row.push(String::new());
        }
        self.version += 1;
    }

    /// Mutation counter, bumped on every `set`/append.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Clone of the full matrix, for `dataChanged` payloads and host reads.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Vec<String>> {
        self.rows.clone()
    }

    fn out_of_bounds(&self, cell: Coord) -> GridError {
        GridError::OutOfBounds {
            row: cell.row(),
            col: cell.col(),
            rows: self.row_count(),
            cols: self.column_count(),
        }
    }
}
