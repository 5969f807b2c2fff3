//! Progress reporting for the streaming transform
//!
//! The engine emits one update per chunk through the [`Progress`] trait.
//! The terminal sink rewrites a single status line in place: a fixed-width
//! 20-segment bar plus an integer percentage, with the line terminator only
//! emitted once the transform is complete.

use std::io::{self, Write};

/// Number of segments in the rendered bar
pub const BAR_SEGMENTS: u64 = 20;

/// Per-chunk progress sink
///
/// `done` never decreases between calls for a given run; implementations
/// must tolerate `done > total` (rendering clamps it).
pub trait Progress {
    fn update(&mut self, done: u64, total: u64);
}

/// Renders the status line for `done` of `total` bytes
///
/// `done` is clamped to `total`; the percentage and segment count use
/// integer division, so both are non-decreasing for non-decreasing input
/// and never exceed 100% / 20 segments. A zero total renders as complete.
pub fn render(done: u64, total: u64) -> String {
    let done = done.min(total);
    let (percent, filled) = if total == 0 {
        (100, BAR_SEGMENTS)
    } else {
        (100 * done / total, BAR_SEGMENTS * done / total)
    };

    let mut line = String::with_capacity(BAR_SEGMENTS as usize + 8);
    line.push('[');
    for i in 0..BAR_SEGMENTS {
        line.push(if i < filled { '*' } else { '-' });
    }
    line.push(']');
    line.push_str(&format!(" {}%", percent));
    line
}

/// Terminal progress bar, rewritten in place via carriage return
///
/// Write failures on the status line are ignored: progress is display only
/// and must not fail an otherwise successful transform.
pub struct TermProgress<W: Write> {
    out: W,
}

impl TermProgress<io::Stdout> {
    pub fn stdout() -> Self {
        TermProgress { out: io::stdout() }
    }
}

impl<W: Write> TermProgress<W> {
    pub fn new(out: W) -> Self {
        TermProgress { out }
    }
}

impl<W: Write> Progress for TermProgress<W> {
    fn update(&mut self, done: u64, total: u64) {
        let _ = write!(self.out, "\r{}", render(done, total));
        if done >= total {
            let _ = writeln!(self.out);
        }
        let _ = self.out.flush();
    }
}

/// Discards all updates; used when no terminal is attached
pub struct NullProgress;

impl Progress for NullProgress {
    fn update(&mut self, _done: u64, _total: u64) {}
}
