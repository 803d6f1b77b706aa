//! Conformance laws and invariants
//!
//! Properties the engine must hold for every byte stream: bounded cursor
//! and margins, slice invariance, reset idempotence, and the save/restore
//! and SGR identities.

use tatami_terminal::{Color, Pen, Screen, Terminal};

/// A byte stream exercising text, controls, CSI (valid, private, and
/// malformed), OSC, DCS, charset switches, and broken UTF-8.
fn stress_stream() -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"plain text\r\nmore\ttabbed\x08\x07");
    bytes.extend_from_slice(b"\x1b[2;5H\x1b[1;31;42mstyled\x1b[0m");
    bytes.extend_from_slice(b"\x1b[38;5;200m\x1b[48:2:1:2:3m");
    bytes.extend_from_slice(b"\x1b[?25l\x1b[?7l\x1b[?7h\x1b[4h\x1b[4l");
    bytes.extend_from_slice(b"\x1b[3;8r\x1b[S\x1b[T\x1b[2L\x1b[1M");
    bytes.extend_from_slice(b"\x1b]0;a;title\x07\x1b]999;zzz\x1b\\");
    bytes.extend_from_slice(b"\x1bP0;1|pass\x1b\\");
    bytes.extend_from_slice(b"\x1b(0lqk\x1b(B");
    bytes.extend_from_slice("unicode: 世界 é\u{1F600}".as_bytes());
    bytes.extend_from_slice(&[0xFF, 0xC3, 0x28, 0xE4, 0x1B, b'[', b'1', b'm']);
    bytes.extend_from_slice(b"\x1b[99;99H\x1b[999A\x1b[999B\x1b[999C\x1b[999D");
    bytes.extend_from_slice(b"\x1b[\x18\x1b[12\x1a\x1b[;;;m\x1b[>0c");
    bytes.extend_from_slice(b"\x1b7moved\x1b8\x1b[s\x1b[u");
    bytes
}

fn assert_invariants(screen: &Screen) {
    assert!(screen.cursor().col < screen.cols());
    assert!(screen.cursor().row < screen.rows());
    assert!(screen.scroll_top() < screen.rows());
    assert!(screen.scroll_top() <= screen.scroll_bottom());
    assert!(screen.scroll_bottom() < screen.rows());
    for row in 0..screen.rows() {
        assert_eq!(screen.line(row).cols(), screen.cols());
    }
}

#[test]
fn invariants_hold_after_stress_stream() {
    let mut term = Terminal::new(40, 10);
    term.process(&stress_stream());
    assert_invariants(term.screen());
}

#[test]
fn invariants_hold_on_tiny_grid() {
    for (cols, rows) in [(1, 1), (2, 1), (1, 3), (3, 2)] {
        let mut term = Terminal::new(cols, rows);
        term.process(&stress_stream());
        assert_invariants(term.screen());
    }
}

#[test]
fn invariants_hold_on_pseudorandom_soup() {
    // Deterministic LCG so failures reproduce.
    let mut state: u64 = 0x2545F4914F6CDD1D;
    let mut soup = Vec::with_capacity(8192);
    for _ in 0..8192 {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        soup.push((state >> 33) as u8);
    }
    let mut term = Terminal::new(13, 7);
    term.process(&soup);
    assert_invariants(term.screen());
}

#[test]
fn slice_invariance() {
    let input = stress_stream();
    let mut whole = Terminal::new(40, 10);
    whole.process(&input);

    for chunk_size in [1, 2, 3, 5, 8, 13, 100] {
        let mut split = Terminal::new(40, 10);
        for chunk in input.chunks(chunk_size) {
            split.process(chunk);
        }
        assert_eq!(
            whole.screen(),
            split.screen(),
            "chunk size {chunk_size} produced a different screen"
        );
    }
}

#[test]
fn reset_is_idempotent() {
    // RIS followed by an operation is indistinguishable from the
    // operation on a fresh screen.
    let ops: &[&[u8]] = &[
        b"hello",
        b"\x1b[5;5H\x1b[31mx",
        b"\x1b[2J\x1b[1;1Hy",
        b"\ttabbed",
    ];
    for op in ops {
        let mut dirty = Terminal::new(40, 10);
        dirty.process(&stress_stream());
        dirty.process(b"\x1bc");
        dirty.process(op);

        let mut fresh = Terminal::new(40, 10);
        fresh.process(op);

        assert_eq!(dirty.screen(), fresh.screen());
    }
}

#[test]
fn sgr_reset_identity() {
    let mut term = Terminal::new(40, 10);
    term.process(b"\x1b[1;3;4;5;7;9;38;5;123;48;2;9;9;9m");
    assert_ne!(*term.screen().pen(), Pen::default());
    term.process(b"\x1b[0m");
    assert_eq!(*term.screen().pen(), Pen::default());
    assert_eq!(term.screen().pen().fg, Color::Default);
    assert_eq!(term.screen().pen().bg, Color::Default);
}

#[test]
fn save_restore_round_trip() {
    let mut term = Terminal::new(40, 10);
    term.process(b"\x1b[6;13H\x1b[1;35m\x1b[s");
    let cursor = *term.screen().cursor();
    let pen = *term.screen().pen();

    term.process(b"\x1b[1;1H\x1b[0m\x1b[2Jjunk\x1b[7m\x1b[3;3H");
    term.process(b"\x1b[u");

    assert_eq!(term.screen().cursor().col, cursor.col);
    assert_eq!(term.screen().cursor().row, cursor.row);
    assert_eq!(*term.screen().pen(), pen);
}

#[test]
fn every_byte_makes_progress() {
    // Feed each possible byte alone into a fresh engine; none may panic.
    for byte in 0..=255u8 {
        let mut term = Terminal::new(4, 3);
        term.process(&[byte]);
        assert_invariants(term.screen());
    }
    // And each possible byte after an ESC and inside a CSI.
    for byte in 0..=255u8 {
        let mut term = Terminal::new(4, 3);
        term.process(&[0x1B, byte]);
        term.process(&[0x1B, b'[', byte, byte]);
        assert_invariants(term.screen());
    }
}

#[test]
fn resize_keeps_invariants() {
    let mut term = Terminal::new(40, 10);
    term.process(&stress_stream());
    for (cols, rows) in [(1, 1), (100, 2), (3, 50), (40, 10)] {
        term.resize(cols, rows);
        assert_invariants(term.screen());
        term.process(b"after\r\nresize\x1b[5;5H");
        assert_invariants(term.screen());
    }
}
