//! Braille dot-matrix backend
//!
//! Each output character is one Braille Pattern code point (U+2800..U+28FF)
//! encoding a 4x2 block of 1-bit pixels. Highest resolution of the text
//! backends, but monochrome.

use tracing::debug;

use super::{DrawOptions, Drawer};
use crate::buffer::{Dtype, PixelBuffer};
use crate::errors::Result;
use crate::shape::{resolve_dims, Shape};

/// Pixel rows/cols covered by one braille cell
const CELL: (u32, u32) = (4, 2);

/// Bit weight of each position in a 4x2 block, enumerated row-major:
/// (0,0) (0,1) (1,0) (1,1) (2,0) (2,1) (3,0) (3,1). The layout follows the
/// braille dot numbering, where dots 7 and 8 form the bottom row.
const WEIGHTS: [u16; 8] = [0x01, 0x08, 0x02, 0x10, 0x04, 0x20, 0x40, 0x80];

const SUPPORTED: [(Dtype, usize); 4] = [
    (Dtype::Bool, 1),
    (Dtype::U8, 1),
    (Dtype::I32, 1),
    (Dtype::F32, 1),
];

/// Braille pattern drawer
#[derive(Debug, Default, Clone, Copy)]
pub struct BrailleDrawer;

impl BrailleDrawer {
    fn pack(bits: &PixelBuffer) -> String {
        let block_rows = bits.height() / CELL.0 as usize;
        let block_cols = bits.width() / CELL.1 as usize;
        let mut lines = Vec::with_capacity(block_rows);

        for block_row in 0..block_rows {
            let mut line = String::with_capacity(block_cols * 3);
            for block_col in 0..block_cols {
                let top = block_row * CELL.0 as usize;
                let left = block_col * CELL.1 as usize;
                let mut mask: u16 = 0;
                for (i, weight) in WEIGHTS.iter().enumerate() {
                    if bits.bit_at(top + i / 2, left + i % 2) {
                        mask |= weight;
                    }
                }
                let code = 0x2800 + u32::from(mask);
                line.push(char::from_u32(code).expect("braille block code point"));
            }
            lines.push(line);
        }

        lines.join("\n")
    }
}

impl Drawer for BrailleDrawer {
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
        debug!(height, width, "resolved braille target");

        let bits = buffer
            .resize(height, width)
            .binarize()
            .pad_to_multiple(CELL);
        Ok(Self::pack(&bits))
    }

    fn cell_granularity(&self) -> Option<(u32, u32)> {
        Some(CELL)
    }

    fn name(&self) -> &'static str {
        "braille"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(bits: [bool; 8]) -> PixelBuffer {
        // bits given row-major for a single 4x2 block
        PixelBuffer::from_bool(bits.to_vec(), 4, 2).expect("valid")
    }

    #[test]
    fn test_all_false_block_is_blank_pattern() {
        assert_eq!(BrailleDrawer::pack(&block([false; 8])), "\u{2800}");
    }

    #[test]
    fn test_all_true_block_is_full_pattern() {
        assert_eq!(BrailleDrawer::pack(&block([true; 8])), "\u{28FF}");
    }

    #[test]
    fn test_each_position_contributes_its_weight() {
        for (i, weight) in WEIGHTS.iter().enumerate() {
            let mut bits = [false; 8];
            bits[i] = true;
            let out = BrailleDrawer::pack(&block(bits));
            let code = out.chars().next().expect("one char") as u32;
            assert_eq!(code, 0x2800 + u32::from(*weight), "position {i}");
        }
    }

    #[test]
    fn test_lines_join_without_trailing_newline() {
        // 8x2 -> two blocks stacked vertically -> two lines
        let buf = PixelBuffer::from_bool(vec![true; 16], 8, 2).expect("valid");
        let out = BrailleDrawer::pack(&buf);
        assert_eq!(out, "\u{28FF}\n\u{28FF}");
    }

    #[test]
    fn test_rejects_rgb_buffer() {
        let buf = PixelBuffer::from_rgb(vec![0; 12], 2, 2).expect("valid");
        let err = BrailleDrawer
            .draw(&buf, None, &DrawOptions::default())
            .expect_err("rgb unsupported");
        assert!(err.to_string().contains("braille"));
    }
}
