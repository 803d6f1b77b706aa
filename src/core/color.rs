//! Color representation and palette mapping
//!
//! The engine stores colors as the terminal default or a palette index
//! (0-255). True-color SGR input is collapsed to the nearest entry of the
//! 8-color display palette at parse time, so the renderer only ever deals
//! in small indices and curses-style color pairs.

use serde::{Deserialize, Serialize};

/// A cell color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Color {
    /// Terminal default foreground/background.
    #[default]
    Default,
    /// Palette index.
    /// 0-7: standard colors, 8-15: bright, 16-231: 6x6x6 cube,
    /// 232-255: grayscale ramp.
    Indexed(u8),
}

impl Color {
    pub const BLACK: u8 = 0;
    pub const RED: u8 = 1;
    pub const GREEN: u8 = 2;
    pub const YELLOW: u8 = 3;
    pub const BLUE: u8 = 4;
    pub const MAGENTA: u8 = 5;
    pub const CYAN: u8 = 6;
    pub const WHITE: u8 = 7;

    /// Map to the host's 8-color display palette: -1 for the terminal
    /// default, otherwise an index in 0..8. Palette entries beyond the
    /// basic sixteen go through their xterm RGB values.
    pub fn display_index(&self) -> i16 {
        match *self {
            Color::Default => -1,
            Color::Indexed(n @ 0..=7) => n as i16,
            Color::Indexed(n @ 8..=15) => (n - 8) as i16,
            Color::Indexed(n) => {
                let (r, g, b) = index_to_rgb(n);
                rgb_to_ansi(r, g, b) as i16
            }
        }
    }
}

/// Nearest 8-color palette index for an RGB value: one bit per channel
/// above half intensity.
pub fn rgb_to_ansi(r: u16, g: u16, b: u16) -> u8 {
    ((r > 127) as u8) | (((g > 127) as u8) << 1) | (((b > 127) as u8) << 2)
}

/// xterm 256-color palette entry as RGB.
pub fn index_to_rgb(index: u8) -> (u16, u16, u16) {
    match index {
        0 => (0, 0, 0),
        1 => (205, 0, 0),
        2 => (0, 205, 0),
        3 => (205, 205, 0),
        4 => (0, 0, 238),
        5 => (205, 0, 205),
        6 => (0, 205, 205),
        7 => (229, 229, 229),
        8 => (127, 127, 127),
        9 => (255, 0, 0),
        10 => (0, 255, 0),
        11 => (255, 255, 0),
        12 => (92, 92, 255),
        13 => (255, 0, 255),
        14 => (0, 255, 255),
        15 => (255, 255, 255),
        16..=231 => {
            let idx = index - 16;
            let r = idx / 36;
            let g = (idx % 36) / 6;
            let b = idx % 6;
            let to_val = |v: u8| if v == 0 { 0 } else { 55 + v as u16 * 40 };
            (to_val(r), to_val(g), to_val(b))
        }
        232..=255 => {
            let gray = 8 + (index - 232) as u16 * 10;
            (gray, gray, gray)
        }
    }
}
