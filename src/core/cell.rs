//! Terminal cell representation
//!
//! Each cell in the grid holds one codepoint plus the graphic attributes it
//! was written with. The attributes double as the pen: the live rendition
//! state applied to newly written cells.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::core::color::Color;

bitflags! {
    /// SGR attribute bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct CellFlags: u16 {
        const BOLD          = 1 << 0;
        const DIM           = 1 << 1;
        const ITALIC        = 1 << 2;
        const UNDERLINE     = 1 << 3;
        const BLINK         = 1 << 4;
        const REVERSE       = 1 << 5;
        const HIDDEN        = 1 << 6;
        const STRIKETHROUGH = 1 << 7;
    }
}

/// The current graphic rendition: colors and attribute flags applied to
/// newly written cells, mutated by SGR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pen {
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Attribute flags.
    pub flags: CellFlags,
}

impl Pen {
    /// Create a default pen (default colors, no attributes).
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to the default rendition (SGR 0).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Foreground as seen by the renderer, honoring reverse video.
    pub fn effective_fg(&self) -> Color {
        if self.flags.contains(CellFlags::REVERSE) {
            self.bg
        } else {
            self.fg
        }
    }

    /// Background as seen by the renderer, honoring reverse video.
    pub fn effective_bg(&self) -> Color {
        if self.flags.contains(CellFlags::REVERSE) {
            self.fg
        } else {
            self.bg
        }
    }
}

/// A single cell in the terminal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// The codepoint stored in this cell.
    ch: char,
    /// Rendition the cell was written with.
    pub attrs: Pen,
}

impl Cell {
    /// Create a cell with a codepoint and rendition.
    pub fn new(ch: char, attrs: Pen) -> Self {
        Self { ch, attrs }
    }

    /// Create a blank cell carrying `attrs`.
    pub fn blank(attrs: Pen) -> Self {
        Self { ch: ' ', attrs }
    }

    /// The stored codepoint.
    pub fn ch(&self) -> char {
        self.ch
    }

    /// Overwrite the codepoint.
    pub fn set_ch(&mut self, ch: char) {
        self.ch = ch;
    }

    /// True when the cell shows nothing (a space).
    pub fn is_empty(&self) -> bool {
        self.ch == ' '
    }

    /// Blank the cell, keeping `attrs` as its rendition.
    pub fn clear(&mut self, attrs: Pen) {
        self.ch = ' ';
        self.attrs = attrs;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            attrs: Pen::default(),
        }
    }
}
