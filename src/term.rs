//! Terminal context: size and multiplexer detection
//!
//! The context is a point-in-time read. Callers that want the current
//! terminal size build a fresh context per draw call via [`TermContext::detect`];
//! nothing here is cached.

use std::env;

/// Terminal state a draw call depends on
///
/// Carrying this explicitly (instead of reading the environment inside the
/// drawers) keeps every draw call pure and testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermContext {
    /// Terminal columns
    pub cols: u16,
    /// Terminal rows
    pub rows: u16,
    /// Whether output passes through a terminal multiplexer (tmux/screen)
    pub multiplexer: bool,
}

impl Default for TermContext {
    fn default() -> Self {
        Self {
            cols: 80,
            rows: 24,
            multiplexer: false,
        }
    }
}

impl TermContext {
    /// Detect the current terminal size and multiplexer signal
    pub fn detect() -> Self {
        let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
        Self {
            cols,
            rows,
            multiplexer: is_multiplexer(env::var("TERM").ok().as_deref()),
        }
    }

    /// Terminal size in pixel-equivalents for a drawer's cell granularity
    ///
    /// One character cell covers `cell.0` pixel rows and `cell.1` pixel
    /// columns, so an 80x24 terminal is 96x160 braille dots.
    pub fn pixel_equivalent(&self, cell: (u32, u32)) -> (usize, usize) {
        (
            self.rows as usize * cell.0 as usize,
            self.cols as usize * cell.1 as usize,
        )
    }
}

/// A `TERM` starting with `screen-` or `tmux-` means escape sequences need
/// multiplexer passthrough wrapping.
fn is_multiplexer(term: Option<&str>) -> bool {
    term.is_some_and(|t| t.starts_with("screen-") || t.starts_with("tmux-"))
}
