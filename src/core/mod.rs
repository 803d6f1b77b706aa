//! Screen model
//!
//! Platform-independent terminal state: the cell grid and everything the
//! escape-sequence stream mutates. Deterministic by construction — the
//! same operations always produce the same screen.

mod cell;
mod charset;
mod color;
mod cursor;
mod grid;
mod line;
mod modes;
mod screen;

pub use cell::{Cell, CellFlags, Pen};
pub use charset::{parse_charset_designation, translate_char, Charset, CharsetState};
pub use color::{index_to_rgb, rgb_to_ansi, Color};
pub use cursor::{Cursor, SavedCursor};
pub use grid::Grid;
pub use line::Line;
pub use modes::Modes;
pub use screen::Screen;
