//! Tatami Terminal Engine
//!
//! The terminal emulator core of the tatami terminal multiplexer: a VT/xterm
//! escape sequence parser coupled to a cell-grid screen model. The
//! multiplexer host owns one [`Parser`] and one [`Screen`] per panel, feeds
//! the bytes it reads from the panel's pseudo-terminal into the parser, and
//! paints the resulting grid with its text UI.
//!
//! # Architecture
//!
//! - `parser`: escape sequence parser (CSI, OSC, DCS, UTF-8) built on the
//!   VT500-series state machine, dispatching through the [`Perform`] trait
//! - `core`: platform-independent screen model (cells, lines, grid, cursor,
//!   modes, character sets)
//! - `performer`: applies parser events to the screen model
//! - `terminal`: glue owning one parser + one screen per panel
//!
//! The engine performs no I/O, never blocks, and never panics on malformed
//! input: every byte makes progress.
//!
//! # Example
//!
//! ```
//! use tatami_terminal::{Parser, Screen};
//!
//! let mut parser = Parser::new();
//! let mut screen = Screen::new(80, 24);
//!
//! parser.advance(&mut screen, b"Hello, \x1b[31mworld\x1b[0m!");
//!
//! assert_eq!(screen.line(0).text(), "Hello, world!");
//! ```

pub mod core;
pub mod parser;
mod performer;
pub mod terminal;

pub use crate::core::{
    Cell, CellFlags, Charset, CharsetState, Color, Cursor, Grid, Line, Modes, Pen, SavedCursor,
    Screen,
};
pub use crate::parser::{Params, Parser, Perform};
pub use crate::terminal::Terminal;
