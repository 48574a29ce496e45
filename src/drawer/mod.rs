//! Drawer contract and mode registry
//!
//! Every backend implements the single-method [`Drawer`] trait. A backend
//! is selected by a closed [`Mode`] enumeration; [`get_drawer`] is an
//! exhaustive match, so adding a backend means one enum variant and one
//! match arm.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::errors::{DrawError, Result};
use crate::shape::Shape;
use crate::term::TermContext;

mod braille;
mod half_block;
mod iterm2;
mod sixel;

pub use braille::BrailleDrawer;
pub use half_block::HalfBlockDrawer;
pub use iterm2::Iterm2InlineImageDrawer;
pub use sixel::SixelDrawer;

/// Output compression format for the inline-image backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    #[default]
    Png,
    Jpeg,
}

impl Compression {
    pub(crate) fn to_image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

/// Per-call drawing options
///
/// The terminal context rides along here so a draw call never reads the
/// process environment itself. Build with [`DrawOptions::detect`] to pick
/// up the live terminal size and multiplexer signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawOptions {
    /// Treat the resolved shape as a bounding box and keep the buffer's
    /// own aspect ratio inside it
    pub preserve_aspect_ratio: bool,
    /// Clamp each target axis to the terminal's pixel-equivalent size
    pub shrink_to_terminal: bool,
    /// Compression format for the inline-image backend
    pub compression: Compression,
    /// Terminal size and multiplexer signal for this call
    pub term: TermContext,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            preserve_aspect_ratio: true,
            shrink_to_terminal: true,
            compression: Compression::Png,
            term: TermContext::default(),
        }
    }
}

impl DrawOptions {
    /// Options with a freshly detected terminal context
    pub fn detect() -> Self {
        Self {
            term: TermContext::detect(),
            ..Self::default()
        }
    }
}

/// A backend that renders a buffer to printable text
///
/// Drawers are stateless; concurrent calls on independent buffers are safe.
pub trait Drawer: Send + Sync {
    /// Render `buffer` to a finished string for direct terminal printing
    fn draw(&self, buffer: &PixelBuffer, shape: Option<&Shape>, opts: &DrawOptions)
        -> Result<String>;

    /// How many pixel `(rows, cols)` one character cell covers, if this
    /// backend renders on a character grid
    fn cell_granularity(&self) -> Option<(u32, u32)>;

    /// Name of this drawer
    fn name(&self) -> &'static str;
}

/// Drawing mode identifiers (stable strings)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Braille,
    Iterm2InlineImage,
    HalfBlock,
    Sixel,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Braille => "braille",
            Self::Iterm2InlineImage => "iterm2_inline_image",
            Self::HalfBlock => "half_block",
            Self::Sixel => "sixel",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "braille" => Ok(Self::Braille),
            "iterm2_inline_image" => Ok(Self::Iterm2InlineImage),
            "half_block" => Ok(Self::HalfBlock),
            "sixel" => Ok(Self::Sixel),
            other => Err(DrawError::UnknownMode(other.to_string())),
        }
    }
}

/// Construct the drawer for a mode
pub fn get_drawer(mode: Mode) -> Box<dyn Drawer> {
    match mode {
        Mode::Braille => Box::new(BrailleDrawer),
        Mode::Iterm2InlineImage => Box::new(Iterm2InlineImageDrawer),
        Mode::HalfBlock => Box::new(HalfBlockDrawer),
        Mode::Sixel => Box::new(SixelDrawer),
    }
}
