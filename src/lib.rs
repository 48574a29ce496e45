//! # rasterm
//!
//! Renders an in-memory raster image as text or escape sequences for
//! direct terminal printing. Four backends are available behind a single
//! [`Drawer`] contract:
//!
//! - **braille** — 4x2 dot-matrix packing into U+2800..U+28FF, monochrome
//! - **half_block** — truecolor ▀ cells, two pixels per character
//! - **iterm2_inline_image** — the `1337;File=` inline-image protocol,
//!   with tmux/screen passthrough wrapping
//! - **sixel** — DEC sixel via the `icy_sixel` codec
//!
//! ```no_run
//! use rasterm::{get_drawer, DrawOptions, Mode, PixelBuffer};
//!
//! # fn main() -> rasterm::Result<()> {
//! let buffer = PixelBuffer::from_gray(vec![0, 255, 255, 0], 2, 2)?;
//! let drawer = get_drawer(Mode::Braille);
//! let text = drawer.draw(&buffer, None, &DrawOptions::detect())?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```
//!
//! Drawers are stateless and every call is a pure function of the buffer,
//! the shape and the options (including the terminal context carried in
//! [`DrawOptions`]), so concurrent use needs no locking.

pub mod buffer;
pub mod drawer;
pub mod errors;
pub mod shape;
pub mod term;

pub use buffer::{Dtype, PixelBuffer};
pub use drawer::{
    get_drawer, BrailleDrawer, Compression, DrawOptions, Drawer, HalfBlockDrawer,
    Iterm2InlineImageDrawer, Mode, SixelDrawer,
};
pub use errors::{DrawError, Result};
pub use shape::Shape;
pub use term::TermContext;
