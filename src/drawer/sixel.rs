//! Sixel backend
//!
//! Pure format adaptation: the buffer is marshaled to contiguous row-major
//! bytes and handed to the sixel codec, which owns palette quantization,
//! dithering and bitstream generation. RGB input gets an adaptive palette;
//! grayscale uses the codec's built-in G8 palette.

use icy_sixel::{
    sixel_string, DiffusionMethod, MethodForLargest, MethodForRep, PixelFormat, Quality,
};
use tracing::debug;

use super::{DrawOptions, Drawer};
use crate::buffer::{Dtype, PixelBuffer};
use crate::errors::{DrawError, Result};
use crate::shape::Shape;

const SUPPORTED: [(Dtype, usize); 2] = [(Dtype::U8, 1), (Dtype::U8, 3)];

/// Sixel drawer
#[derive(Debug, Default, Clone, Copy)]
pub struct SixelDrawer;

impl Drawer for SixelDrawer {
    fn draw(
        &self,
        buffer: &PixelBuffer,
        _shape: Option<&Shape>,
        _opts: &DrawOptions,
    ) -> Result<String> {
        buffer.ensure_supported(self.name(), &SUPPORTED)?;

        let (pixelformat, format_name) = if buffer.channels() == 3 {
            (PixelFormat::RGB888, "RGB888")
        } else {
            (PixelFormat::G8, "G8")
        };
        debug!(
            height = buffer.height(),
            width = buffer.width(),
            pixelformat = format_name,
            "encoding sixel"
        );

        let bytes = buffer.as_u8_bytes().ok_or(DrawError::UnsupportedBuffer {
            drawer: self.name(),
            dtype: buffer.dtype(),
            channels: buffer.channels(),
        })?;

        sixel_string(
            bytes,
            buffer.width() as i32,
            buffer.height() as i32,
            pixelformat,
            DiffusionMethod::Auto,
            MethodForLargest::Auto,
            MethodForRep::Auto,
            Quality::AUTO,
        )
        .map_err(|e| DrawError::Encoding(e.to_string()))
    }

    fn cell_granularity(&self) -> Option<(u32, u32)> {
        None
    }

    fn name(&self) -> &'static str {
        "sixel"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_u8_before_codec() {
        for buf in [
            PixelBuffer::from_bool(vec![true], 1, 1).expect("valid"),
            PixelBuffer::from_i32(vec![0], 1, 1).expect("valid"),
            PixelBuffer::from_f32(vec![0.0], 1, 1).expect("valid"),
        ] {
            let err = SixelDrawer
                .draw(&buf, None, &DrawOptions::default())
                .expect_err("only u8 supported");
            assert!(matches!(err, DrawError::UnsupportedBuffer { drawer: "sixel", .. }));
        }
    }

    #[test]
    fn test_rgb_output_starts_with_dcs_introducer() {
        let buf = PixelBuffer::from_rgb(vec![200, 10, 10, 10, 200, 10], 1, 2).expect("valid");
        let out = SixelDrawer
            .draw(&buf, None, &DrawOptions::default())
            .expect("codec output");
        assert!(out.starts_with("\x1bP"));
    }

    #[test]
    fn test_grayscale_uses_builtin_palette() {
        let buf = PixelBuffer::from_gray(vec![0, 128, 255, 64], 2, 2).expect("valid");
        let out = SixelDrawer
            .draw(&buf, None, &DrawOptions::default())
            .expect("codec output");
        assert!(out.starts_with("\x1bP"));
    }
}
