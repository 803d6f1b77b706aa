//! Event application
//!
//! Translates parser events into screen operations: the CSI final-byte
//! table, ANSI and DEC private modes, SGR, ESC dispatch, and OSC title
//! handling. Anything unrecognized is logged at debug level and dropped —
//! no event can fail.

use log::{debug, trace};

use crate::core::{rgb_to_ansi, CellFlags, Color, Screen};
use crate::parser::{c0, Params, Perform};

impl Perform for Screen {
    fn print(&mut self, c: char) {
        Screen::print(self, c);
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            c0::BS => self.backspace(),
            c0::HT => self.tab(),
            c0::LF | c0::VT | c0::FF => self.linefeed(),
            c0::CR => self.carriage_return(),
            c0::SO => self.shift_out(),
            c0::SI => self.shift_in(),
            // The host surfaces the bell; the grid is unaffected.
            c0::BEL => {}
            _ => trace!("unhandled control 0x{byte:02x}"),
        }
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], ignore: bool, final_byte: u8) {
        if ignore {
            return;
        }
        if intermediates.first() == Some(&b'?') {
            return dec_private_modes(self, params, final_byte);
        }
        if !intermediates.is_empty() {
            debug!(
                "unhandled CSI intermediates {:?} final {}",
                intermediates, final_byte as char
            );
            return;
        }

        match final_byte {
            b'A' => self.move_cursor_up(params.get_single(0, 1) as usize),
            b'B' | b'e' => self.move_cursor_down(params.get_single(0, 1) as usize),
            b'C' | b'a' => self.move_cursor_right(params.get_single(0, 1) as usize),
            b'D' => self.move_cursor_left(params.get_single(0, 1) as usize),
            b'E' => {
                self.move_cursor_down(params.get_single(0, 1) as usize);
                self.carriage_return();
            }
            b'F' => {
                self.move_cursor_up(params.get_single(0, 1) as usize);
                self.carriage_return();
            }
            b'G' | b'`' => self.set_cursor_col(params.get_single(0, 1) as usize - 1),
            b'd' => self.set_cursor_row(params.get_single(0, 1) as usize - 1),
            b'H' | b'f' => {
                let row = params.get_single(0, 1) as usize - 1;
                let col = params.get_single(1, 1) as usize - 1;
                self.move_cursor_to(row, col);
            }
            b'I' => self.tab_forward(params.get_single(0, 1) as usize),
            b'Z' => self.tab_backward(params.get_single(0, 1) as usize),
            b'J' => self.erase_in_display(params.get_single(0, 0)),
            b'K' => self.erase_in_line(params.get_single(0, 0)),
            b'L' => self.insert_lines(params.get_single(0, 1) as usize),
            b'M' => self.delete_lines(params.get_single(0, 1) as usize),
            b'@' => self.insert_chars(params.get_single(0, 1) as usize),
            b'P' => self.delete_chars(params.get_single(0, 1) as usize),
            b'X' => self.erase_chars(params.get_single(0, 1) as usize),
            b'S' => self.scroll_up(params.get_single(0, 1) as usize),
            b'T' => self.scroll_down(params.get_single(0, 1) as usize),
            b'g' => match params.get_single(0, 0) {
                0 => self.clear_tab_stop(),
                3 => self.clear_all_tab_stops(),
                _ => {}
            },
            b'h' => ansi_modes(self, params, true),
            b'l' => ansi_modes(self, params, false),
            b'm' => sgr(self, params),
            b'r' => {
                let top = params.get_single(0, 1) as usize;
                let bottom = params.get_single(1, self.rows() as u16) as usize;
                self.set_scroll_region(top - 1, bottom - 1);
            }
            b's' => self.save_cursor(),
            b'u' => self.restore_cursor(),
            _ => debug!(
                "unhandled CSI final {} ({} params)",
                final_byte as char,
                params.len()
            ),
        }
    }

    fn esc_dispatch(&mut self, intermediates: &[u8], ignore: bool, final_byte: u8) {
        if ignore {
            return;
        }
        match (intermediates, final_byte) {
            ([], b'7') => self.save_cursor(),
            ([], b'8') => self.restore_cursor(),
            ([], b'D') => self.index(),
            ([], b'E') => self.next_line(),
            ([], b'H') => self.set_tab_stop(),
            ([], b'M') => self.reverse_index(),
            ([], b'c') => self.reset(),
            ([], b'=') => self.modes_mut().application_keypad = true,
            ([], b'>') => self.modes_mut().application_keypad = false,
            ([b'('], byte) => self.designate_charset(0, byte),
            ([b')'], byte) => self.designate_charset(1, byte),
            ([b'*'], byte) => self.designate_charset(2, byte),
            ([b'+'], byte) => self.designate_charset(3, byte),
            _ => debug!(
                "unhandled ESC intermediates {:?} final {}",
                intermediates, final_byte as char
            ),
        }
    }

    fn osc_dispatch(&mut self, params: &[&[u8]], _bell_terminated: bool) {
        let code = match params.first().and_then(|p| osc_code(p)) {
            Some(code) => code,
            None => return,
        };
        // Anything after the code is the text, with interior `;` restored.
        let text = params
            .get(1..)
            .unwrap_or(&[])
            .iter()
            .map(|p| String::from_utf8_lossy(p))
            .collect::<Vec<_>>()
            .join(";");
        match code {
            0 => {
                self.set_icon_name(&text);
                self.set_title(&text);
            }
            1 => self.set_icon_name(&text),
            2 => self.set_title(&text),
            _ => debug!("unhandled OSC {code}"),
        }
    }

    fn hook(&mut self, _params: &Params, _intermediates: &[u8], _ignore: bool, final_byte: u8) {
        trace!("DCS hook {} (ignored)", final_byte as char);
    }

    fn put(&mut self, _byte: u8) {}

    fn unhook(&mut self) {
        trace!("DCS unhook");
    }
}

/// Leading decimal digits of an OSC parameter; `None` without any digit.
fn osc_code(bytes: &[u8]) -> Option<u16> {
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let mut code: u16 = 0;
    for &b in &bytes[..digits] {
        code = code.saturating_mul(10).saturating_add((b - b'0') as u16);
    }
    Some(code)
}

/// SM/RM.
fn ansi_modes(screen: &mut Screen, params: &Params, set: bool) {
    for group in params.iter() {
        match group[0] {
            4 => screen.modes_mut().insert = set,
            // Reversed polarity: setting mode 12 turns local echo off.
            12 => screen.modes_mut().local_echo = !set,
            20 => screen.modes_mut().auto_wrap = set,
            mode => debug!("unhandled ANSI mode {mode} (set={set})"),
        }
    }
}

/// DECSET/DECRST.
fn dec_private_modes(screen: &mut Screen, params: &Params, final_byte: u8) {
    let set = match final_byte {
        b'h' => true,
        b'l' => false,
        _ => {
            debug!("unhandled private CSI final {}", final_byte as char);
            return;
        }
    };
    for group in params.iter() {
        match group[0] {
            1 => screen.modes_mut().application_cursor_keys = set,
            5 => screen.modes_mut().reverse_video = set,
            6 => {
                screen.modes_mut().origin = set;
                screen.move_cursor_to(0, 0);
            }
            7 => screen.modes_mut().auto_wrap = set,
            25 => screen.modes_mut().cursor_visible = set,
            2004 => screen.modes_mut().bracketed_paste = set,
            mode => debug!("unhandled DEC private mode {mode} (set={set})"),
        }
    }
}

/// Select Graphic Rendition.
fn sgr(screen: &mut Screen, params: &Params) {
    if params.is_empty() {
        screen.pen_mut().reset();
        return;
    }

    let count = params.len();
    let mut i = 0;
    while i < count {
        let group = match params.get(i) {
            Some(group) => group,
            None => break,
        };
        let pen = screen.pen_mut();
        match group[0] {
            0 => pen.reset(),
            1 => pen.flags |= CellFlags::BOLD,
            2 => pen.flags |= CellFlags::DIM,
            3 => pen.flags |= CellFlags::ITALIC,
            4 => pen.flags |= CellFlags::UNDERLINE,
            5 => pen.flags |= CellFlags::BLINK,
            7 => pen.flags |= CellFlags::REVERSE,
            8 => pen.flags |= CellFlags::HIDDEN,
            9 => pen.flags |= CellFlags::STRIKETHROUGH,
            22 => pen.flags &= !(CellFlags::BOLD | CellFlags::DIM),
            23 => pen.flags &= !CellFlags::ITALIC,
            24 => pen.flags &= !CellFlags::UNDERLINE,
            25 => pen.flags &= !CellFlags::BLINK,
            27 => pen.flags &= !CellFlags::REVERSE,
            28 => pen.flags &= !CellFlags::HIDDEN,
            29 => pen.flags &= !CellFlags::STRIKETHROUGH,
            p @ 30..=37 => pen.fg = Color::Indexed((p - 30) as u8),
            39 => pen.fg = Color::Default,
            p @ 40..=47 => pen.bg = Color::Indexed((p - 40) as u8),
            49 => pen.bg = Color::Default,
            // Bright foreground folds into the base color plus bold.
            p @ 90..=97 => {
                pen.fg = Color::Indexed((p - 90) as u8);
                pen.flags |= CellFlags::BOLD;
            }
            p @ 100..=107 => pen.bg = Color::Indexed((p - 100) as u8),
            p @ (38 | 48) => {
                let (color, consumed) = if group.len() > 1 {
                    // Subparameter form: 38:5:n or 38:2:r:g:b.
                    (extended_color(&group[1..]), 0)
                } else {
                    // Primary form: the color spec arrives as the
                    // following parameters.
                    extended_color_primaries(params, i + 1)
                };
                if let Some(color) = color {
                    if p == 38 {
                        pen.fg = color;
                    } else {
                        pen.bg = color;
                    }
                }
                i += consumed;
            }
            p => trace!("unhandled SGR {p}"),
        }
        i += 1;
    }
}

/// Decode `5;index` or `2;r;g;b` given as one slice of values.
fn extended_color(values: &[u16]) -> Option<Color> {
    match values.first() {
        Some(5) => values.get(1).map(|&n| Color::Indexed(n.min(255) as u8)),
        Some(2) if values.len() >= 4 => {
            Some(Color::Indexed(rgb_to_ansi(values[1], values[2], values[3])))
        }
        _ => None,
    }
}

/// Decode an extended color whose spec arrived as separate primary
/// parameters starting at `start`. Returns the color and how many
/// parameters the spec consumed.
fn extended_color_primaries(params: &Params, start: usize) -> (Option<Color>, usize) {
    match params.get(start).map(|g| g[0]) {
        Some(5) => match params.get(start + 1).map(|g| g[0]) {
            Some(n) => (Some(Color::Indexed(n.min(255) as u8)), 2),
            None => (None, 1),
        },
        Some(2) => {
            let r = params.get(start + 1).map(|g| g[0]);
            let g = params.get(start + 2).map(|g| g[0]);
            let b = params.get(start + 3).map(|g| g[0]);
            match (r, g, b) {
                (Some(r), Some(g), Some(b)) => {
                    (Some(Color::Indexed(rgb_to_ansi(r, g, b))), 4)
                }
                _ => (None, params.len().saturating_sub(start)),
            }
        }
        Some(_) => (None, 1),
        None => (None, 0),
    }
}
