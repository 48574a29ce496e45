//! iTerm2 inline-image protocol backend
//!
//! Compresses the buffer to PNG or JPEG, base64-encodes it and wraps it in
//! the `1337;File=` OSC sequence. Inside tmux or screen the sequence needs
//! an extra DCS passthrough envelope or the multiplexer swallows it.
//!
//! Protocol: <https://iterm2.com/documentation-images.html>

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use tracing::debug;

use super::{DrawOptions, Drawer};
use crate::buffer::PixelBuffer;
use crate::errors::{DrawError, Result};
use crate::shape::Shape;

/// Inline-image drawer
#[derive(Debug, Default, Clone, Copy)]
pub struct Iterm2InlineImageDrawer;

impl Iterm2InlineImageDrawer {
    fn compress(buffer: &PixelBuffer, opts: &DrawOptions) -> Result<String> {
        let img = buffer.to_dynamic_image();
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, opts.compression.to_image_format())
            .map_err(|e| DrawError::Encoding(e.to_string()))?;
        Ok(BASE64.encode(bytes.into_inner()))
    }

    /// Display value for one shape axis: `auto` when absent, otherwise the
    /// number suffixed by the tag's unit (cells bare, pixels `px`, ratio `%`).
    fn axis_property(shape: Option<&Shape>, value: Option<f64>) -> String {
        let unit = match shape {
            None | Some(Shape::Cells { .. }) => "",
            Some(Shape::Pixels { .. }) => "px",
            Some(Shape::Ratio { .. }) => "%",
        };
        match value {
            Some(v) => format!("{v}{unit}"),
            None => "auto".to_string(),
        }
    }

    fn frame(body: &str, multiplexer: bool) -> String {
        let (osc, st) = if multiplexer {
            ("\x1bPtmux;\x1b\x1b]", "\x07\x1b\\")
        } else {
            ("\x1b]", "\x07")
        };
        format!("{osc}{body}{st}")
    }
}

impl Drawer for Iterm2InlineImageDrawer {
    fn draw(
        &self,
        buffer: &PixelBuffer,
        shape: Option<&Shape>,
        opts: &DrawOptions,
    ) -> Result<String> {
        let data = Self::compress(buffer, opts)?;
        debug!(payload_len = data.len(), "compressed inline-image payload");

        let properties = [
            ("width", Self::axis_property(shape, shape.and_then(Shape::width))),
            ("height", Self::axis_property(shape, shape.and_then(Shape::height))),
            ("size", data.len().to_string()),
            (
                "preserveAspectRatio",
                if opts.preserve_aspect_ratio { "1" } else { "0" }.to_string(),
            ),
            ("inline", "1".to_string()),
        ];

        let mut body = String::from("1337;File=");
        for (key, value) in &properties {
            body.push(';');
            body.push_str(key);
            body.push('=');
            body.push_str(value);
        }
        body.push(':');
        body.push_str(&data);

        Ok(Self::frame(&body, opts.term.multiplexer))
    }

    fn cell_granularity(&self) -> Option<(u32, u32)> {
        None
    }

    fn name(&self) -> &'static str {
        "iterm2_inline_image"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_property_units() {
        let cells = Shape::cells(30.0, 50.0);
        assert_eq!(Iterm2InlineImageDrawer::axis_property(Some(&cells), Some(50.0)), "50");
        let pixels = Shape::pixels(300.0, 500.0);
        assert_eq!(Iterm2InlineImageDrawer::axis_property(Some(&pixels), Some(500.0)), "500px");
        let ratio = Shape::ratio(0.8, 0.9);
        assert_eq!(Iterm2InlineImageDrawer::axis_property(Some(&ratio), Some(0.9)), "0.9%");
        assert_eq!(Iterm2InlineImageDrawer::axis_property(None, None), "auto");
    }

    #[test]
    fn test_partial_shape_keeps_other_axis_auto() {
        let shape = Shape::Pixels {
            height: Some(100.0),
            width: None,
        };
        assert_eq!(
            Iterm2InlineImageDrawer::axis_property(Some(&shape), shape.width()),
            "auto"
        );
        assert_eq!(
            Iterm2InlineImageDrawer::axis_property(Some(&shape), shape.height()),
            "100px"
        );
    }

    #[test]
    fn test_direct_framing() {
        assert_eq!(Iterm2InlineImageDrawer::frame("x", false), "\x1b]x\x07");
    }

    #[test]
    fn test_passthrough_framing() {
        assert_eq!(
            Iterm2InlineImageDrawer::frame("x", true),
            "\x1bPtmux;\x1b\x1b]x\x07\x1b\\"
        );
    }
}
