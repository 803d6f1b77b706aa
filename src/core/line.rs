//! Terminal line representation
//!
//! A line is one row of cells. The in-row editing operations (insert,
//! delete, erase) live here; the grid composes them into screen-level
//! commands.

use serde::{Deserialize, Serialize};

use crate::core::cell::{Cell, Pen};

/// A single row of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    cells: Vec<Cell>,
}

impl Line {
    /// Create a blank line of `cols` cells.
    pub fn new(cols: usize) -> Self {
        Self {
            cells: vec![Cell::default(); cols],
        }
    }

    /// Create a blank line whose cells carry `attrs`.
    pub fn with_attrs(cols: usize, attrs: Pen) -> Self {
        Self {
            cells: vec![Cell::blank(attrs); cols],
        }
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cells.len()
    }

    /// Cell at column. Panics when out of bounds.
    pub fn cell(&self, col: usize) -> &Cell {
        &self.cells[col]
    }

    /// Mutable cell at column. Panics when out of bounds.
    pub fn cell_mut(&mut self, col: usize) -> &mut Cell {
        &mut self.cells[col]
    }

    /// Cell at column, `None` when out of bounds.
    pub fn get(&self, col: usize) -> Option<&Cell> {
        self.cells.get(col)
    }

    /// Blank the entire line.
    pub fn clear(&mut self, attrs: Pen) {
        for cell in &mut self.cells {
            cell.clear(attrs);
        }
    }

    /// Blank from `col` to the end of the line.
    pub fn clear_from(&mut self, col: usize, attrs: Pen) {
        for cell in self.cells.iter_mut().skip(col) {
            cell.clear(attrs);
        }
    }

    /// Blank from the start of the line through `col`.
    pub fn clear_to(&mut self, col: usize, attrs: Pen) {
        for cell in self.cells.iter_mut().take(col + 1) {
            cell.clear(attrs);
        }
    }

    /// Insert `n` blank cells at `col`, shifting the rest right; cells
    /// pushed past the end are lost.
    pub fn insert_cells(&mut self, col: usize, n: usize, attrs: Pen) {
        if col >= self.cells.len() {
            return;
        }
        let n = n.min(self.cells.len() - col);
        for _ in 0..n {
            self.cells.pop();
            self.cells.insert(col, Cell::blank(attrs));
        }
    }

    /// Delete `n` cells at `col`, shifting the rest left; blanks fill the
    /// end of the line.
    pub fn delete_cells(&mut self, col: usize, n: usize, attrs: Pen) {
        if col >= self.cells.len() {
            return;
        }
        let n = n.min(self.cells.len() - col);
        for _ in 0..n {
            self.cells.remove(col);
            self.cells.push(Cell::blank(attrs));
        }
    }

    /// Overwrite `n` cells starting at `col` with blanks; no shifting.
    pub fn erase_cells(&mut self, col: usize, n: usize, attrs: Pen) {
        let end = col.saturating_add(n).min(self.cells.len());
        for cell in &mut self.cells[col.min(end)..end] {
            cell.clear(attrs);
        }
    }

    /// Grow or shrink the line to `cols` columns.
    pub fn resize(&mut self, cols: usize) {
        self.cells.resize(cols, Cell::default());
    }

    /// Text content with trailing blanks trimmed.
    pub fn text(&self) -> String {
        let mut result: String = self.cells.iter().map(Cell::ch).collect();
        let trimmed = result.trim_end_matches(' ').len();
        result.truncate(trimmed);
        result
    }

    /// True when every cell is blank.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    /// Iterator over cells.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}
