//! Terminal mode flags
//!
//! Boolean modes toggled by SM/RM and their DEC private variants. The
//! engine stores them; the host consults the input-affecting ones
//! (application keys, bracketed paste, local echo) when encoding
//! keystrokes.

use serde::{Deserialize, Serialize};

/// Terminal mode flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modes {
    /// IRM: printed characters shift the rest of the row right.
    pub insert: bool,
    /// Keystrokes are echoed locally by the host. Mode 12 set turns this
    /// off.
    pub local_echo: bool,
    /// DECCKM: cursor keys send application sequences.
    pub application_cursor_keys: bool,
    /// DECKPAM/DECKPNM (ESC = / ESC >): keypad application mode.
    pub application_keypad: bool,
    /// DECAWM: wrap at the right margin instead of clamping.
    pub auto_wrap: bool,
    /// DECOM: cursor addressing is relative to the scrolling region.
    pub origin: bool,
    /// DECTCEM: the renderer draws the cursor.
    pub cursor_visible: bool,
    /// DECSCNM: the renderer swaps default foreground/background.
    pub reverse_video: bool,
    /// Paste is bracketed with ESC [200~ / ESC [201~ by the host.
    pub bracketed_paste: bool,
}

impl Modes {
    pub fn new() -> Self {
        Self {
            insert: false,
            local_echo: true,
            application_cursor_keys: false,
            application_keypad: false,
            auto_wrap: true,
            origin: false,
            cursor_visible: true,
            reverse_video: false,
            bracketed_paste: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Modes {
    fn default() -> Self {
        Self::new()
    }
}
