//! Terminal screen
//!
//! The complete display state of one panel: cell grid, cursor, pen, save
//! slot, scrolling region, tab stops, character sets, modes, and title.
//! Methods here implement the semantics; decoding escape sequences into
//! these calls happens in the performer.

use crate::core::cell::{Cell, Pen};
use crate::core::charset::{parse_charset_designation, CharsetState};
use crate::core::cursor::{Cursor, SavedCursor};
use crate::core::grid::Grid;
use crate::core::line::Line;
use crate::core::modes::Modes;

/// Default tab stop interval.
const TAB_INTERVAL: usize = 8;

/// Title length cap.
const MAX_TITLE: usize = 4096;

/// The screen state of one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    grid: Grid,
    cursor: Cursor,
    pen: Pen,
    saved: SavedCursor,
    modes: Modes,
    /// 0-indexed inclusive scrolling margins; `None` is the full screen.
    scroll_region: Option<(usize, usize)>,
    tab_stops: Vec<bool>,
    charsets: CharsetState,
    title: String,
    icon_name: String,
}

impl Screen {
    /// Create a blank screen. Dimensions are clamped to at least 1x1.
    pub fn new(cols: usize, rows: usize) -> Self {
        let grid = Grid::new(cols, rows);
        let tab_stops = default_tab_stops(grid.cols());
        Self {
            grid,
            cursor: Cursor::new(),
            pen: Pen::new(),
            saved: SavedCursor::default(),
            modes: Modes::new(),
            scroll_region: None,
            tab_stops,
            charsets: CharsetState::new(),
            title: String::new(),
            icon_name: String::new(),
        }
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn line(&self, row: usize) -> &Line {
        self.grid.line(row)
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.grid.line(row).cell(col)
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    pub fn pen_mut(&mut self) -> &mut Pen {
        &mut self.pen
    }

    pub fn modes(&self) -> &Modes {
        &self.modes
    }

    pub fn modes_mut(&mut self) -> &mut Modes {
        &mut self.modes
    }

    pub fn charsets(&self) -> &CharsetState {
        &self.charsets
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.chars().take(MAX_TITLE).collect();
    }

    pub fn icon_name(&self) -> &str {
        &self.icon_name
    }

    pub fn set_icon_name(&mut self, name: &str) {
        self.icon_name = name.chars().take(MAX_TITLE).collect();
    }

    /// Top margin of the scrolling region (0-indexed).
    pub fn scroll_top(&self) -> usize {
        self.scroll_region.map_or(0, |(top, _)| top)
    }

    /// Bottom margin of the scrolling region (0-indexed, inclusive).
    pub fn scroll_bottom(&self) -> usize {
        self.scroll_region.map_or(self.rows() - 1, |(_, bottom)| bottom)
    }

    /// DECSTBM. Margins outside the grid or with `top >= bottom` make the
    /// whole command a no-op; a valid region homes the cursor.
    pub fn set_scroll_region(&mut self, top: usize, bottom: usize) {
        if top >= bottom || bottom >= self.rows() {
            return;
        }
        self.scroll_region = Some((top, bottom));
        self.cursor.row = if self.modes.origin { top } else { 0 };
        self.cursor.col = 0;
        self.cursor.pending_wrap = false;
    }

    /// Write a codepoint at the cursor and advance it.
    pub fn print(&mut self, c: char) {
        let c = self.charsets.translate(c);
        let cols = self.cols();

        // Deferred auto-wrap: the previous print filled the last column.
        if self.cursor.pending_wrap && self.modes.auto_wrap {
            self.cursor.pending_wrap = false;
            self.cursor.col = 0;
            self.index();
        }
        self.cursor.pending_wrap = false;

        if self.modes.insert {
            let (row, col) = (self.cursor.row, self.cursor.col);
            self.grid.line_mut(row).insert_cells(col, 1, Pen::default());
        }

        let (row, col) = (self.cursor.row, self.cursor.col);
        *self.grid.line_mut(row).cell_mut(col) = Cell::new(c, self.pen);

        if self.cursor.col + 1 == cols {
            if self.modes.auto_wrap {
                self.cursor.pending_wrap = true;
            }
        } else {
            self.cursor.col += 1;
        }
    }

    /// BS: one column left, stopping at the margin.
    pub fn backspace(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
        }
        self.cursor.pending_wrap = false;
    }

    /// CR: column 0.
    pub fn carriage_return(&mut self) {
        self.cursor.col = 0;
        self.cursor.pending_wrap = false;
    }

    /// IND: one row down, scrolling when at the bottom margin.
    pub fn index(&mut self) {
        if self.cursor.row == self.scroll_bottom() {
            self.scroll_up(1);
        } else {
            self.cursor.row = (self.cursor.row + 1).min(self.rows() - 1);
        }
        self.cursor.pending_wrap = false;
    }

    /// LF/VT/FF: carriage return plus index.
    pub fn linefeed(&mut self) {
        self.carriage_return();
        self.index();
    }

    /// NEL: same motion as a linefeed.
    pub fn next_line(&mut self) {
        self.linefeed();
    }

    /// RI: one row up, scrolling down when at the top margin.
    pub fn reverse_index(&mut self) {
        if self.cursor.row == self.scroll_top() {
            self.scroll_down(1);
        } else {
            self.cursor.row = self.cursor.row.saturating_sub(1);
        }
        self.cursor.pending_wrap = false;
    }

    /// HT: next tab stop, or the last column.
    pub fn tab(&mut self) {
        let cols = self.cols();
        let mut col = self.cursor.col + 1;
        while col < cols && !self.tab_stops[col] {
            col += 1;
        }
        self.cursor.col = col.min(cols - 1);
        self.cursor.pending_wrap = false;
    }

    /// CHT: forward `n` tab stops.
    pub fn tab_forward(&mut self, n: usize) {
        for _ in 0..n {
            self.tab();
        }
    }

    /// CBT: back `n` tab stops, stopping at column 0.
    pub fn tab_backward(&mut self, n: usize) {
        for _ in 0..n {
            let mut col = self.cursor.col;
            while col > 0 {
                col -= 1;
                if self.tab_stops[col] {
                    break;
                }
            }
            self.cursor.col = col;
        }
        self.cursor.pending_wrap = false;
    }

    /// HTS: set a tab stop at the cursor column.
    pub fn set_tab_stop(&mut self) {
        let col = self.cursor.col;
        if col < self.tab_stops.len() {
            self.tab_stops[col] = true;
        }
    }

    /// TBC 0: clear the tab stop at the cursor column.
    pub fn clear_tab_stop(&mut self) {
        let col = self.cursor.col;
        if col < self.tab_stops.len() {
            self.tab_stops[col] = false;
        }
    }

    /// TBC 3: clear every tab stop.
    pub fn clear_all_tab_stops(&mut self) {
        for stop in &mut self.tab_stops {
            *stop = false;
        }
    }

    /// CUU.
    pub fn move_cursor_up(&mut self, n: usize) {
        let min_row = if self.modes.origin { self.scroll_top() } else { 0 };
        self.cursor.row = self.cursor.row.saturating_sub(n).max(min_row);
        self.cursor.pending_wrap = false;
    }

    /// CUD.
    pub fn move_cursor_down(&mut self, n: usize) {
        let max_row = if self.modes.origin {
            self.scroll_bottom()
        } else {
            self.rows() - 1
        };
        self.cursor.row = (self.cursor.row + n).min(max_row);
        self.cursor.pending_wrap = false;
    }

    /// CUB.
    pub fn move_cursor_left(&mut self, n: usize) {
        self.cursor.col = self.cursor.col.saturating_sub(n);
        self.cursor.pending_wrap = false;
    }

    /// CUF.
    pub fn move_cursor_right(&mut self, n: usize) {
        self.cursor.col = (self.cursor.col + n).min(self.cols() - 1);
        self.cursor.pending_wrap = false;
    }

    /// CUP/HVP with 0-indexed coordinates; origin mode offsets the row
    /// into the scrolling region.
    pub fn move_cursor_to(&mut self, row: usize, col: usize) {
        self.set_cursor_row(row);
        self.set_cursor_col(col);
    }

    /// CHA with a 0-indexed column.
    pub fn set_cursor_col(&mut self, col: usize) {
        self.cursor.col = col.min(self.cols() - 1);
        self.cursor.pending_wrap = false;
    }

    /// VPA with a 0-indexed row.
    pub fn set_cursor_row(&mut self, row: usize) {
        self.cursor.row = if self.modes.origin {
            (self.scroll_top() + row).min(self.scroll_bottom())
        } else {
            row.min(self.rows() - 1)
        };
        self.cursor.pending_wrap = false;
    }

    /// ED: 0 = cursor to end, 1 = start to cursor, 2/3 = everything.
    /// Erased cells revert to the unstyled blank.
    pub fn erase_in_display(&mut self, mode: u16) {
        let (row, col) = (self.cursor.row, self.cursor.col);
        match mode {
            0 => self.grid.clear_below(row, col, Pen::default()),
            1 => self.grid.clear_above(row, col, Pen::default()),
            2 | 3 => self.grid.clear(Pen::default()),
            _ => {}
        }
    }

    /// EL: 0 = cursor to end, 1 = start through cursor, 2 = whole row.
    pub fn erase_in_line(&mut self, mode: u16) {
        let (row, col) = (self.cursor.row, self.cursor.col);
        let line = self.grid.line_mut(row);
        match mode {
            0 => line.clear_from(col, Pen::default()),
            1 => line.clear_to(col, Pen::default()),
            2 => line.clear(Pen::default()),
            _ => {}
        }
    }

    /// ECH: blank `n` cells at the cursor, carrying the current pen.
    pub fn erase_chars(&mut self, n: usize) {
        let (row, col) = (self.cursor.row, self.cursor.col);
        let pen = self.pen;
        self.grid.line_mut(row).erase_cells(col, n, pen);
    }

    /// ICH.
    pub fn insert_chars(&mut self, n: usize) {
        let (row, col) = (self.cursor.row, self.cursor.col);
        self.grid.line_mut(row).insert_cells(col, n, Pen::default());
    }

    /// DCH.
    pub fn delete_chars(&mut self, n: usize) {
        let (row, col) = (self.cursor.row, self.cursor.col);
        self.grid.line_mut(row).delete_cells(col, n, Pen::default());
    }

    /// IL: only acts with the cursor inside the scrolling region.
    pub fn insert_lines(&mut self, n: usize) {
        let row = self.cursor.row;
        let (top, bottom) = (self.scroll_top(), self.scroll_bottom());
        if row >= top && row <= bottom {
            self.grid.insert_lines(row, n, bottom, Pen::default());
        }
    }

    /// DL: only acts with the cursor inside the scrolling region.
    pub fn delete_lines(&mut self, n: usize) {
        let row = self.cursor.row;
        let (top, bottom) = (self.scroll_top(), self.scroll_bottom());
        if row >= top && row <= bottom {
            self.grid.delete_lines(row, n, bottom, Pen::default());
        }
    }

    /// SU: scroll the region up `n` lines.
    pub fn scroll_up(&mut self, n: usize) {
        let (top, bottom) = (self.scroll_top(), self.scroll_bottom());
        self.grid.scroll_up(top, bottom, n, Pen::default());
    }

    /// SD: scroll the region down `n` lines.
    pub fn scroll_down(&mut self, n: usize) {
        let (top, bottom) = (self.scroll_top(), self.scroll_bottom());
        self.grid.scroll_down(top, bottom, n, Pen::default());
    }

    /// DECSC / CSI s.
    pub fn save_cursor(&mut self) {
        self.saved = SavedCursor::save(&self.cursor, &self.pen);
    }

    /// DECRC / CSI u. The slot persists; restoring twice yields the same
    /// state.
    pub fn restore_cursor(&mut self) {
        let saved = self.saved;
        saved.restore(&mut self.cursor, &mut self.pen);
        self.cursor.col = self.cursor.col.min(self.cols() - 1);
        self.cursor.row = self.cursor.row.min(self.rows() - 1);
    }

    /// SI.
    pub fn shift_in(&mut self) {
        self.charsets.shift_in();
    }

    /// SO.
    pub fn shift_out(&mut self) {
        self.charsets.shift_out();
    }

    /// `ESC ( x` and friends: designate a charset into slot 0-3.
    pub fn designate_charset(&mut self, slot: u8, byte: u8) {
        self.charsets.set_slot(slot, parse_charset_designation(byte));
    }

    /// RIS: indistinguishable from a freshly constructed screen.
    pub fn reset(&mut self) {
        *self = Self::new(self.cols(), self.rows());
    }

    /// Adopt new dimensions from the host. The cursor is clamped, tab
    /// stops re-derived, and the scrolling region dropped.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.grid.resize(cols, rows);
        self.tab_stops = default_tab_stops(self.grid.cols());
        self.cursor.col = self.cursor.col.min(self.grid.cols() - 1);
        self.cursor.row = self.cursor.row.min(self.grid.rows() - 1);
        self.cursor.pending_wrap = false;
        self.scroll_region = None;
    }
}

fn default_tab_stops(cols: usize) -> Vec<bool> {
    let mut stops = vec![false; cols];
    for i in (0..cols).step_by(TAB_INTERVAL) {
        stops[i] = true;
    }
    stops
}
