//! VT/xterm escape sequence parser
//!
//! Implements the VT500-series parser state machine described by Paul
//! Williams (<https://vt100.net/emu/dec_ansi_parser>), with UTF-8 decoding
//! layered over the ground state. The parser is:
//!
//! - streaming: arbitrary chunk boundaries, including mid-sequence and
//!   mid-codepoint, produce the same events as one contiguous feed
//! - allocation-free after construction: parameters, intermediates, and the
//!   OSC payload live in fixed buffers; overflow raises an `ignoring` flag
//!   and the eventual dispatch still fires with `ignore = true`
//! - tolerant: no byte sequence can make it panic or stall
//!
//! Events are delivered through the [`Perform`] trait, at most one per
//! input byte.

pub mod params;
pub mod perform;
pub mod utf8;

pub use params::{Params, MAX_PARAMS};
pub use perform::Perform;

use utf8::{Utf8Decoder, Utf8Result, REPLACEMENT};

/// C0 control characters the engine cares about.
pub mod c0 {
    pub const BEL: u8 = 0x07;
    pub const BS: u8 = 0x08;
    pub const HT: u8 = 0x09;
    pub const LF: u8 = 0x0A;
    pub const VT: u8 = 0x0B;
    pub const FF: u8 = 0x0C;
    pub const CR: u8 = 0x0D;
    pub const SO: u8 = 0x0E;
    pub const SI: u8 = 0x0F;
    pub const CAN: u8 = 0x18;
    pub const SUB: u8 = 0x1A;
    pub const ESC: u8 = 0x1B;
    pub const DEL: u8 = 0x7F;
}

/// The only C1 byte honored outside ground: the 8-bit string terminator.
pub mod c1 {
    pub const ST: u8 = 0x9C;
}

/// Intermediate bytes kept per sequence.
const MAX_INTERMEDIATES: usize = 2;
/// Raw OSC payload cap.
const MAX_OSC_RAW: usize = 1024;
/// OSC `;`-separated parameter boundaries tracked.
const MAX_OSC_PARAMS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    Escape,
    EscapeIntermediate,
    CsiEntry,
    CsiParam,
    CsiIntermediate,
    CsiIgnore,
    DcsEntry,
    DcsParam,
    DcsIntermediate,
    DcsPassthrough,
    DcsIgnore,
    OscString,
    SosPmApcString,
}

/// The escape sequence parser.
#[derive(Debug)]
pub struct Parser {
    state: State,
    params: Params,
    /// Value being accumulated from digit bytes.
    param: u16,
    intermediates: [u8; MAX_INTERMEDIATES],
    intermediate_len: usize,
    /// Set when a buffer overflowed; carried to the dispatch as `ignore`.
    ignoring: bool,
    osc_raw: [u8; MAX_OSC_RAW],
    osc_len: usize,
    /// (start, end) offsets of `;`-separated parameters in `osc_raw`.
    osc_params: [(usize, usize); MAX_OSC_PARAMS],
    osc_num_params: usize,
    osc_param_start: usize,
    utf8: Utf8Decoder,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Create a parser in the ground state.
    pub fn new() -> Self {
        Parser {
            state: State::Ground,
            params: Params::new(),
            param: 0,
            intermediates: [0; MAX_INTERMEDIATES],
            intermediate_len: 0,
            ignoring: false,
            osc_raw: [0; MAX_OSC_RAW],
            osc_len: 0,
            osc_params: [(0, 0); MAX_OSC_PARAMS],
            osc_num_params: 0,
            osc_param_start: 0,
            utf8: Utf8Decoder::new(),
        }
    }

    /// Return to the ground state and drop all buffered input.
    pub fn reset(&mut self) {
        self.state = State::Ground;
        self.clear();
        self.osc_start();
        self.utf8.reset();
    }

    /// Feed a chunk of bytes, dispatching events to `performer`.
    pub fn advance<P: Perform>(&mut self, performer: &mut P, bytes: &[u8]) {
        for &byte in bytes {
            self.advance_byte(performer, byte);
        }
    }

    fn advance_byte<P: Perform>(&mut self, performer: &mut P, byte: u8) {
        if self.state == State::Ground {
            return self.ground(performer, byte);
        }

        // Anywhere rules: CAN/SUB and ESC preempt every non-ground state,
        // first terminating an open OSC or DCS string.
        match byte {
            c0::CAN | c0::SUB => {
                self.terminate_string(performer);
                performer.execute(byte);
                self.state = State::Ground;
            }
            c0::ESC => {
                self.terminate_string(performer);
                self.clear();
                self.state = State::Escape;
            }
            _ => match self.state {
                State::Ground => unreachable!("handled above"),
                State::Escape => self.escape(performer, byte),
                State::EscapeIntermediate => self.escape_intermediate(performer, byte),
                State::CsiEntry => self.csi_entry(performer, byte),
                State::CsiParam => self.csi_param(performer, byte),
                State::CsiIntermediate => self.csi_intermediate(performer, byte),
                State::CsiIgnore => self.csi_ignore(performer, byte),
                State::DcsEntry => self.dcs_entry(performer, byte),
                State::DcsParam => self.dcs_param(performer, byte),
                State::DcsIntermediate => self.dcs_intermediate(performer, byte),
                State::DcsPassthrough => self.dcs_passthrough(performer, byte),
                State::DcsIgnore => self.dcs_ignore(byte),
                State::OscString => self.osc_string(performer, byte),
                State::SosPmApcString => self.sos_pm_apc_string(byte),
            },
        }
    }

    /// Close an open OSC/DCS string before an anywhere transition.
    fn terminate_string<P: Perform>(&mut self, performer: &mut P) {
        match self.state {
            State::OscString => self.osc_end(performer, false),
            State::DcsPassthrough => performer.unhook(),
            _ => {}
        }
    }

    fn ground<P: Perform>(&mut self, performer: &mut P, byte: u8) {
        if self.utf8.is_pending() {
            match self.utf8.feed(byte) {
                Utf8Result::Pending => {}
                Utf8Result::Char(c) => performer.print(c),
                Utf8Result::Invalid => {
                    // Replace the broken sequence, then give the offending
                    // byte its normal treatment (it may be ESC or a fresh
                    // lead byte).
                    performer.print(REPLACEMENT);
                    self.advance_byte(performer, byte);
                }
            }
            return;
        }

        match byte {
            0x00..=0x17 | 0x19 | 0x1C..=0x1F => performer.execute(byte),
            c0::CAN | c0::SUB => performer.execute(byte),
            c0::ESC => {
                self.clear();
                self.state = State::Escape;
            }
            0x20..=0x7E => performer.print(byte as char),
            c0::DEL => {}
            0x80..=0xFF => match self.utf8.feed(byte) {
                Utf8Result::Pending => {}
                Utf8Result::Char(c) => performer.print(c),
                Utf8Result::Invalid => performer.print(REPLACEMENT),
            },
        }
    }

    fn escape<P: Perform>(&mut self, performer: &mut P, byte: u8) {
        match byte {
            0x00..=0x17 | 0x19 | 0x1C..=0x1F => performer.execute(byte),
            0x20..=0x2F => {
                self.collect(byte);
                self.state = State::EscapeIntermediate;
            }
            b'[' => self.state = State::CsiEntry,
            b']' => {
                self.osc_start();
                self.state = State::OscString;
            }
            b'P' => self.state = State::DcsEntry,
            b'X' | b'^' | b'_' => self.state = State::SosPmApcString,
            0x30..=0x7E => {
                performer.esc_dispatch(self.intermediates(), self.ignoring, byte);
                self.state = State::Ground;
            }
            c0::DEL => {}
            _ => self.state = State::Ground,
        }
    }

    fn escape_intermediate<P: Perform>(&mut self, performer: &mut P, byte: u8) {
        match byte {
            0x00..=0x17 | 0x19 | 0x1C..=0x1F => performer.execute(byte),
            0x20..=0x2F => self.collect(byte),
            0x30..=0x7E => {
                performer.esc_dispatch(self.intermediates(), self.ignoring, byte);
                self.state = State::Ground;
            }
            c0::DEL => {}
            _ => self.state = State::Ground,
        }
    }

    fn csi_entry<P: Perform>(&mut self, performer: &mut P, byte: u8) {
        match byte {
            0x00..=0x17 | 0x19 | 0x1C..=0x1F => performer.execute(byte),
            0x20..=0x2F => {
                self.collect(byte);
                self.state = State::CsiIntermediate;
            }
            0x30..=0x39 => {
                self.param = (byte - b'0') as u16;
                self.state = State::CsiParam;
            }
            b';' => {
                self.push_param();
                self.state = State::CsiParam;
            }
            b':' => {
                self.extend_param();
                self.state = State::CsiParam;
            }
            // Private markers collect like intermediates; a leading `?`
            // marks DEC private sequences for the consumer.
            b'<' | b'=' | b'>' | b'?' => {
                self.collect(byte);
                self.state = State::CsiParam;
            }
            0x40..=0x7E => {
                self.csi_dispatch_to(performer, byte);
                self.state = State::Ground;
            }
            c0::DEL => {}
            _ => self.state = State::CsiIgnore,
        }
    }

    fn csi_param<P: Perform>(&mut self, performer: &mut P, byte: u8) {
        match byte {
            0x00..=0x17 | 0x19 | 0x1C..=0x1F => performer.execute(byte),
            0x30..=0x39 => {
                let digit = (byte - b'0') as u16;
                self.param = self.param.saturating_mul(10).saturating_add(digit);
            }
            b';' => self.push_param(),
            b':' => self.extend_param(),
            b'<' | b'=' | b'>' | b'?' => self.state = State::CsiIgnore,
            0x20..=0x2F => {
                self.push_param();
                self.collect(byte);
                self.state = State::CsiIntermediate;
            }
            0x40..=0x7E => {
                self.push_param();
                self.csi_dispatch_to(performer, byte);
                self.state = State::Ground;
            }
            c0::DEL => {}
            _ => self.state = State::CsiIgnore,
        }
    }

    fn csi_intermediate<P: Perform>(&mut self, performer: &mut P, byte: u8) {
        match byte {
            0x00..=0x17 | 0x19 | 0x1C..=0x1F => performer.execute(byte),
            0x20..=0x2F => self.collect(byte),
            0x30..=0x3F => self.state = State::CsiIgnore,
            0x40..=0x7E => {
                self.csi_dispatch_to(performer, byte);
                self.state = State::Ground;
            }
            c0::DEL => {}
            _ => self.state = State::CsiIgnore,
        }
    }

    fn csi_ignore<P: Perform>(&mut self, performer: &mut P, byte: u8) {
        match byte {
            0x00..=0x17 | 0x19 | 0x1C..=0x1F => performer.execute(byte),
            0x40..=0x7E => self.state = State::Ground,
            _ => {}
        }
    }

    fn dcs_entry<P: Perform>(&mut self, performer: &mut P, byte: u8) {
        match byte {
            0x00..=0x17 | 0x19 | 0x1C..=0x1F => {}
            0x20..=0x2F => {
                self.collect(byte);
                self.state = State::DcsIntermediate;
            }
            0x30..=0x39 => {
                self.param = (byte - b'0') as u16;
                self.state = State::DcsParam;
            }
            b';' => {
                self.push_param();
                self.state = State::DcsParam;
            }
            b':' => self.state = State::DcsIgnore,
            b'<' | b'=' | b'>' | b'?' => {
                self.collect(byte);
                self.state = State::DcsParam;
            }
            0x40..=0x7E => self.hook_to(performer, byte),
            c0::DEL => {}
            _ => self.state = State::DcsIgnore,
        }
    }

    fn dcs_param<P: Perform>(&mut self, performer: &mut P, byte: u8) {
        match byte {
            0x00..=0x17 | 0x19 | 0x1C..=0x1F => {}
            0x30..=0x39 => {
                let digit = (byte - b'0') as u16;
                self.param = self.param.saturating_mul(10).saturating_add(digit);
            }
            b';' => self.push_param(),
            b':' | b'<' | b'=' | b'>' | b'?' => self.state = State::DcsIgnore,
            0x20..=0x2F => {
                self.push_param();
                self.collect(byte);
                self.state = State::DcsIntermediate;
            }
            0x40..=0x7E => {
                self.push_param();
                self.hook_to(performer, byte);
            }
            c0::DEL => {}
            _ => self.state = State::DcsIgnore,
        }
    }

    fn dcs_intermediate<P: Perform>(&mut self, performer: &mut P, byte: u8) {
        match byte {
            0x00..=0x17 | 0x19 | 0x1C..=0x1F => {}
            0x20..=0x2F => self.collect(byte),
            0x30..=0x3F => self.state = State::DcsIgnore,
            0x40..=0x7E => self.hook_to(performer, byte),
            c0::DEL => {}
            _ => self.state = State::DcsIgnore,
        }
    }

    fn dcs_passthrough<P: Perform>(&mut self, performer: &mut P, byte: u8) {
        match byte {
            c1::ST => {
                performer.unhook();
                self.state = State::Ground;
            }
            c0::DEL => {}
            _ => performer.put(byte),
        }
    }

    fn dcs_ignore(&mut self, byte: u8) {
        if byte == c1::ST {
            self.state = State::Ground;
        }
    }

    fn osc_string<P: Perform>(&mut self, performer: &mut P, byte: u8) {
        match byte {
            c0::BEL => {
                self.osc_end(performer, true);
                self.state = State::Ground;
            }
            c1::ST => {
                self.osc_end(performer, false);
                self.state = State::Ground;
            }
            b';' => {
                if self.osc_num_params == MAX_OSC_PARAMS {
                    // Parameter table exhausted; later separators accrue to
                    // the final parameter.
                    self.osc_put(byte);
                } else {
                    self.osc_params[self.osc_num_params] = (self.osc_param_start, self.osc_len);
                    self.osc_num_params += 1;
                    self.osc_param_start = self.osc_len;
                }
            }
            0x20..=0x9B | 0x9D..=0xFF => self.osc_put(byte),
            _ => {}
        }
    }

    fn sos_pm_apc_string(&mut self, byte: u8) {
        if byte == c1::ST {
            self.state = State::Ground;
        }
    }

    fn clear(&mut self) {
        self.params.clear();
        self.param = 0;
        self.intermediate_len = 0;
        self.ignoring = false;
    }

    fn intermediates(&self) -> &[u8] {
        &self.intermediates[..self.intermediate_len]
    }

    fn collect(&mut self, byte: u8) {
        if self.intermediate_len == MAX_INTERMEDIATES {
            self.ignoring = true;
        } else {
            self.intermediates[self.intermediate_len] = byte;
            self.intermediate_len += 1;
        }
    }

    /// Finish the accumulated value as a new parameter.
    fn push_param(&mut self) {
        if self.params.is_full() {
            self.ignoring = true;
        } else {
            self.params.push(self.param);
        }
        self.param = 0;
    }

    /// Finish the accumulated value as a subparameter.
    fn extend_param(&mut self) {
        if self.params.is_full() {
            self.ignoring = true;
        } else {
            self.params.extend(self.param);
        }
        self.param = 0;
    }

    fn csi_dispatch_to<P: Perform>(&self, performer: &mut P, final_byte: u8) {
        performer.csi_dispatch(&self.params, self.intermediates(), self.ignoring, final_byte);
    }

    fn hook_to<P: Perform>(&mut self, performer: &mut P, final_byte: u8) {
        performer.hook(&self.params, self.intermediates(), self.ignoring, final_byte);
        self.state = State::DcsPassthrough;
    }

    fn osc_start(&mut self) {
        self.osc_len = 0;
        self.osc_num_params = 0;
        self.osc_param_start = 0;
    }

    fn osc_put(&mut self, byte: u8) {
        if self.osc_len == MAX_OSC_RAW {
            self.ignoring = true;
        } else {
            self.osc_raw[self.osc_len] = byte;
            self.osc_len += 1;
        }
    }

    fn osc_end<P: Perform>(&mut self, performer: &mut P, bell_terminated: bool) {
        if self.osc_num_params < MAX_OSC_PARAMS {
            self.osc_params[self.osc_num_params] = (self.osc_param_start, self.osc_len);
            self.osc_num_params += 1;
        }
        let mut slices: [&[u8]; MAX_OSC_PARAMS] = [&[]; MAX_OSC_PARAMS];
        for (slice, &(start, end)) in slices.iter_mut().zip(&self.osc_params[..self.osc_num_params])
        {
            *slice = &self.osc_raw[start..end];
        }
        performer.osc_dispatch(&slices[..self.osc_num_params], bell_terminated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every event for assertions.
    #[derive(Default)]
    struct Recorder {
        prints: String,
        executes: Vec<u8>,
        csis: Vec<(Vec<Vec<u16>>, Vec<u8>, bool, u8)>,
        escs: Vec<(Vec<u8>, bool, u8)>,
        oscs: Vec<(Vec<Vec<u8>>, bool)>,
        hooks: Vec<(Vec<Vec<u16>>, Vec<u8>, bool, u8)>,
        puts: Vec<u8>,
        unhooks: usize,
    }

    impl Perform for Recorder {
        fn print(&mut self, c: char) {
            self.prints.push(c);
        }

        fn execute(&mut self, byte: u8) {
            self.executes.push(byte);
        }

        fn csi_dispatch(
            &mut self,
            params: &Params,
            intermediates: &[u8],
            ignore: bool,
            final_byte: u8,
        ) {
            let groups = params.iter().map(|g| g.to_vec()).collect();
            self.csis.push((groups, intermediates.to_vec(), ignore, final_byte));
        }

        fn esc_dispatch(&mut self, intermediates: &[u8], ignore: bool, final_byte: u8) {
            self.escs.push((intermediates.to_vec(), ignore, final_byte));
        }

        fn osc_dispatch(&mut self, params: &[&[u8]], bell_terminated: bool) {
            let params = params.iter().map(|p| p.to_vec()).collect();
            self.oscs.push((params, bell_terminated));
        }

        fn hook(&mut self, params: &Params, intermediates: &[u8], ignore: bool, final_byte: u8) {
            let groups = params.iter().map(|g| g.to_vec()).collect();
            self.hooks.push((groups, intermediates.to_vec(), ignore, final_byte));
        }

        fn put(&mut self, byte: u8) {
            self.puts.push(byte);
        }

        fn unhook(&mut self) {
            self.unhooks += 1;
        }
    }

    fn parse(input: &[u8]) -> Recorder {
        let mut parser = Parser::new();
        let mut recorder = Recorder::default();
        parser.advance(&mut recorder, input);
        recorder
    }

    #[test]
    fn test_print_ascii() {
        let r = parse(b"Hello");
        assert_eq!(r.prints, "Hello");
        assert!(r.executes.is_empty());
    }

    #[test]
    fn test_execute_controls() {
        let r = parse(b"A\nB\rC\x07");
        assert_eq!(r.prints, "ABC");
        assert_eq!(r.executes, vec![c0::LF, c0::CR, c0::BEL]);
    }

    #[test]
    fn test_csi_cursor_up() {
        let r = parse(b"\x1b[5A");
        assert_eq!(r.csis.len(), 1);
        let (params, intermediates, ignore, final_byte) = &r.csis[0];
        assert_eq!(params, &vec![vec![5]]);
        assert!(intermediates.is_empty());
        assert!(!*ignore);
        assert_eq!(*final_byte, b'A');
    }

    #[test]
    fn test_csi_cup() {
        let r = parse(b"\x1b[10;20H");
        assert_eq!(r.csis.len(), 1);
        assert_eq!(r.csis[0].0, vec![vec![10], vec![20]]);
        assert_eq!(r.csis[0].3, b'H');
    }

    #[test]
    fn test_csi_empty_params() {
        let r = parse(b"\x1b[H");
        assert_eq!(r.csis.len(), 1);
        assert!(r.csis[0].0.is_empty());
    }

    #[test]
    fn test_csi_leading_semicolon() {
        let r = parse(b"\x1b[;5H");
        assert_eq!(r.csis[0].0, vec![vec![0], vec![5]]);
    }

    #[test]
    fn test_csi_private_marker() {
        let r = parse(b"\x1b[?25h");
        assert_eq!(r.csis.len(), 1);
        let (params, intermediates, _, final_byte) = &r.csis[0];
        assert_eq!(params, &vec![vec![25]]);
        assert_eq!(intermediates, &vec![b'?']);
        assert_eq!(*final_byte, b'h');
    }

    #[test]
    fn test_csi_sgr_primaries() {
        let r = parse(b"\x1b[1;31;42m");
        assert_eq!(r.csis[0].0, vec![vec![1], vec![31], vec![42]]);
    }

    #[test]
    fn test_csi_sgr_subparams() {
        let r = parse(b"\x1b[38:2:255:128:64m");
        assert_eq!(r.csis[0].0, vec![vec![38, 2, 255, 128, 64]]);
    }

    #[test]
    fn test_csi_param_saturation() {
        let r = parse(b"\x1b[99999A");
        assert_eq!(r.csis[0].0, vec![vec![65535]]);
    }

    #[test]
    fn test_csi_param_overflow_sets_ignore() {
        let mut input = b"\x1b[".to_vec();
        input.extend(b"1;".repeat(40));
        input.push(b'm');
        let r = parse(&input);
        assert_eq!(r.csis.len(), 1);
        assert!(r.csis[0].2, "dispatch should carry ignore=true");
        assert_eq!(r.csis[0].0.len(), MAX_PARAMS);
    }

    #[test]
    fn test_csi_intermediate_overflow_sets_ignore() {
        let r = parse(b"\x1b[ !\"q");
        assert_eq!(r.csis.len(), 1);
        assert!(r.csis[0].2);
    }

    #[test]
    fn test_csi_private_marker_in_param_position_ignored() {
        let r = parse(b"\x1b[1?2hX");
        assert!(r.csis.is_empty(), "sequence lands in CSI_IGNORE");
        // The final byte drops the parser back to ground.
        assert_eq!(r.prints, "X");
    }

    #[test]
    fn test_esc_dispatch() {
        let r = parse(b"\x1b7\x1b8");
        assert_eq!(r.escs.len(), 2);
        assert_eq!(r.escs[0], (vec![], false, b'7'));
        assert_eq!(r.escs[1], (vec![], false, b'8'));
    }

    #[test]
    fn test_esc_charset_designation() {
        let r = parse(b"\x1b(0\x1b)B");
        assert_eq!(r.escs.len(), 2);
        assert_eq!(r.escs[0], (vec![b'('], false, b'0'));
        assert_eq!(r.escs[1], (vec![b')'], false, b'B'));
    }

    #[test]
    fn test_osc_bel_terminated() {
        let r = parse(b"\x1b]0;My Title\x07");
        assert_eq!(r.oscs.len(), 1);
        let (params, bell) = &r.oscs[0];
        assert!(*bell);
        assert_eq!(params, &vec![b"0".to_vec(), b"My Title".to_vec()]);
    }

    #[test]
    fn test_osc_st_terminated() {
        let r = parse(b"\x1b]2;Window Title\x1b\\");
        assert_eq!(r.oscs.len(), 1);
        let (params, bell) = &r.oscs[0];
        assert!(!*bell);
        assert_eq!(params[0], b"2");
        assert_eq!(params[1], b"Window Title");
    }

    #[test]
    fn test_esc_terminates_osc_before_escape() {
        // The ESC must end the OSC string, then start a CSI sequence.
        let r = parse(b"\x1b]0;title\x1b[31m");
        assert_eq!(r.oscs.len(), 1);
        assert!(!r.oscs[0].1);
        assert_eq!(r.csis.len(), 1);
        assert_eq!(r.csis[0].0, vec![vec![31]]);
    }

    #[test]
    fn test_osc_empty() {
        let r = parse(b"\x1b]\x07");
        assert_eq!(r.oscs.len(), 1);
        assert_eq!(r.oscs[0].0, vec![Vec::<u8>::new()]);
    }

    #[test]
    fn test_osc_raw_overflow_still_terminates() {
        let mut input = b"\x1b]0;".to_vec();
        input.extend(std::iter::repeat(b'x').take(3000));
        input.push(0x07);
        input.extend(b"ok");
        let r = parse(&input);
        assert_eq!(r.oscs.len(), 1);
        assert_eq!(r.prints, "ok");
        // Payload capped at the raw buffer size (minus the command bytes).
        assert!(r.oscs[0].0[1].len() <= 1024);
    }

    #[test]
    fn test_osc_st_8bit() {
        let r = parse(b"\x1b]0;abc\x9c");
        assert_eq!(r.oscs.len(), 1);
        assert!(!r.oscs[0].1);
        assert_eq!(r.oscs[0].0[1], b"abc");
    }

    #[test]
    fn test_dcs_hook_put_unhook() {
        let r = parse(b"\x1bP1;2qdata\x1b\\");
        assert_eq!(r.hooks.len(), 1);
        let (params, _, _, final_byte) = &r.hooks[0];
        assert_eq!(params, &vec![vec![1], vec![2]]);
        assert_eq!(*final_byte, b'q');
        assert_eq!(r.puts, b"data");
        assert_eq!(r.unhooks, 1);
    }

    #[test]
    fn test_dcs_cancel_calls_unhook() {
        let r = parse(b"\x1bPqab\x18X");
        assert_eq!(r.unhooks, 1);
        assert_eq!(r.executes, vec![c0::CAN]);
        assert_eq!(r.prints, "X");
    }

    #[test]
    fn test_can_aborts_csi_and_executes() {
        let r = parse(b"\x1b[5\x18A");
        assert!(r.csis.is_empty());
        assert_eq!(r.executes, vec![c0::CAN]);
        assert_eq!(r.prints, "A");
    }

    #[test]
    fn test_esc_restarts_sequence() {
        let r = parse(b"\x1b[12\x1b[3m");
        assert_eq!(r.csis.len(), 1);
        assert_eq!(r.csis[0].0, vec![vec![3]]);
    }

    #[test]
    fn test_sos_pm_apc_swallowed() {
        let r = parse(b"\x1b_hidden\x1b\\done");
        assert_eq!(r.prints, "done");
        assert!(r.csis.is_empty());
        // The ST after the string arrives as a bare ESC dispatch.
        assert_eq!(r.escs.len(), 1);
        assert_eq!(r.escs[0].2, b'\\');
    }

    #[test]
    fn test_utf8_basic() {
        let r = parse("Hello 世界".as_bytes());
        assert_eq!(r.prints, "Hello 世界");
    }

    #[test]
    fn test_utf8_chunk_boundary() {
        let mut parser = Parser::new();
        let mut recorder = Recorder::default();
        // '世' = 0xE4 0xB8 0x96 split across three feeds.
        parser.advance(&mut recorder, &[0xE4]);
        parser.advance(&mut recorder, &[0xB8]);
        assert!(recorder.prints.is_empty());
        parser.advance(&mut recorder, &[0x96]);
        assert_eq!(recorder.prints, "世");
    }

    #[test]
    fn test_utf8_invalid_lead_replaced() {
        let r = parse(&[0xFF, b'A']);
        assert_eq!(r.prints, "\u{FFFD}A");
    }

    #[test]
    fn test_utf8_interrupted_by_escape() {
        // A lead byte followed by ESC: the partial sequence is replaced and
        // the escape sequence still parses.
        let r = parse(b"\xe4\x1b[1m");
        assert_eq!(r.prints, "\u{FFFD}");
        assert_eq!(r.csis.len(), 1);
    }

    #[test]
    fn test_csi_chunk_boundary() {
        let mut parser = Parser::new();
        let mut recorder = Recorder::default();
        parser.advance(&mut recorder, b"\x1b[");
        parser.advance(&mut recorder, b"5");
        assert!(recorder.csis.is_empty());
        parser.advance(&mut recorder, b"A");
        assert_eq!(recorder.csis.len(), 1);
        assert_eq!(recorder.csis[0].0, vec![vec![5]]);
    }

    #[test]
    fn test_reset_returns_to_ground() {
        let mut parser = Parser::new();
        let mut recorder = Recorder::default();
        parser.advance(&mut recorder, b"\x1b[12;3");
        parser.reset();
        parser.advance(&mut recorder, b"A");
        assert_eq!(recorder.prints, "A");
        assert!(recorder.csis.is_empty());
    }

    #[test]
    fn test_del_ignored() {
        let r = parse(b"A\x7fB");
        assert_eq!(r.prints, "AB");
    }
}
