//! Truecolor half-block backend
//!
//! Each terminal cell shows two vertical pixels through the upper-half
//! block glyph: the upper pixel as the SGR foreground color, the lower as
//! the background. Works on any truecolor Unicode terminal.

use std::fmt::Write as _;

use tracing::debug;

use super::{DrawOptions, Drawer};
use crate::buffer::{Dtype, PixelBuffer};
use crate::errors::Result;
use crate::shape::{resolve_dims, Shape};

const CELL: (u32, u32) = (2, 1);

const SUPPORTED: [(Dtype, usize); 2] = [(Dtype::U8, 1), (Dtype::U8, 3)];

const UPPER_HALF_BLOCK: char = '\u{2580}';
/// Reset-then-newline separator between output lines
const SGR_RESET_EOL: &str = "\x1b[0m\n";

/// Half-block drawer
#[derive(Debug, Default, Clone, Copy)]
pub struct HalfBlockDrawer;

impl HalfBlockDrawer {
    fn pack(buffer: &PixelBuffer) -> String {
        let (height, width) = buffer.dims();
        let mut lines = Vec::with_capacity(height.div_ceil(2));

        for upper_row in (0..height).step_by(2) {
            let lower_row = upper_row + 1;
            let mut line = String::with_capacity(width * 24);
            for col in 0..width {
                if lower_row < height {
                    let [r, g, b] = buffer.rgb_at(lower_row, col);
                    let _ = write!(line, "\x1b[48;2;{r};{g};{b}m");
                }
                let [r, g, b] = buffer.rgb_at(upper_row, col);
                let _ = write!(line, "\x1b[38;2;{r};{g};{b}m{UPPER_HALF_BLOCK}");
            }
            lines.push(line);
        }

        lines.join(SGR_RESET_EOL)
    }
}

impl Drawer for HalfBlockDrawer {
    fn draw(
        &self,
        buffer: &PixelBuffer,
        shape: Option<&Shape>,
        opts: &DrawOptions,
    ) -> Result<String> {
        buffer.ensure_supported(self.name(), &SUPPORTED)?;

        let (height, width) = resolve_dims(
            buffer.dims(),
            shape,
            CELL,
            &opts.term,
            opts.preserve_aspect_ratio,
            opts.shrink_to_terminal,
        );
        debug!(height, width, "resolved half-block target");

        // No padding: an odd final row renders as an upper-only cell row.
        Ok(Self::pack(&buffer.resize(height, width)))
    }

    fn cell_granularity(&self) -> Option<(u32, u32)> {
        Some(CELL)
    }

    fn name(&self) -> &'static str {
        "half_block"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pixel_has_no_background_escape() {
        let buf = PixelBuffer::from_gray(vec![0], 1, 1).expect("valid");
        assert_eq!(HalfBlockDrawer::pack(&buf), "\x1b[38;2;0;0;0m\u{2580}");
    }

    #[test]
    fn test_row_pair_packs_upper_fg_lower_bg() {
        let buf = PixelBuffer::from_rgb(vec![255, 0, 0, 0, 0, 255], 2, 1).expect("valid");
        assert_eq!(
            HalfBlockDrawer::pack(&buf),
            "\x1b[48;2;0;0;255m\x1b[38;2;255;0;0m\u{2580}"
        );
    }

    #[test]
    fn test_lines_separated_by_reset_and_newline() {
        // 3 rows, 1 col: one full pair plus an upper-only leftover row
        let buf = PixelBuffer::from_gray(vec![1, 2, 3], 3, 1).expect("valid");
        assert_eq!(
            HalfBlockDrawer::pack(&buf),
            "\x1b[48;2;2;2;2m\x1b[38;2;1;1;1m\u{2580}\x1b[0m\n\x1b[38;2;3;3;3m\u{2580}"
        );
    }

    #[test]
    fn test_gray_replicates_to_rgb() {
        let buf = PixelBuffer::from_gray(vec![7, 9], 2, 1).expect("valid");
        assert_eq!(
            HalfBlockDrawer::pack(&buf),
            "\x1b[48;2;9;9;9m\x1b[38;2;7;7;7m\u{2580}"
        );
    }

    #[test]
    fn test_rejects_float_buffer() {
        let buf = PixelBuffer::from_f32(vec![0.0], 1, 1).expect("valid");
        assert!(HalfBlockDrawer
            .draw(&buf, None, &DrawOptions::default())
            .is_err());
    }
}
