//! Cursor state
//!
//! Position plus the pending-wrap flag that defers auto-wrap until the
//! next printable character, and the single DECSC/DECRC save slot.

use serde::{Deserialize, Serialize};

use crate::core::cell::Pen;

/// Cursor position in cell coordinates, row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cursor {
    /// Column (x), 0-indexed.
    pub col: usize,
    /// Row (y), 0-indexed.
    pub row: usize,
    /// Set after printing in the last column with auto-wrap on; the next
    /// printable character wraps first.
    pub pending_wrap: bool,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to home with no pending wrap.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// The save/restore slot: cursor position and pen. Overwritten by each
/// save; restore reads it without consuming it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedCursor {
    pub col: usize,
    pub row: usize,
    pub pen: Pen,
}

impl SavedCursor {
    /// Capture the current cursor position and pen.
    pub fn save(cursor: &Cursor, pen: &Pen) -> Self {
        Self {
            col: cursor.col,
            row: cursor.row,
            pen: *pen,
        }
    }

    /// Write the slot back into the cursor and pen. The caller clamps the
    /// position to the grid.
    pub fn restore(&self, cursor: &mut Cursor, pen: &mut Pen) {
        cursor.col = self.col;
        cursor.row = self.row;
        cursor.pending_wrap = false;
        *pen = self.pen;
    }
}
