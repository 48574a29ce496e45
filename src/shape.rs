//! Target-shape specification and resolution
//!
//! A [`Shape`] says how big the rendered image should be: in character
//! cells, in pixels, or as a fraction of the terminal's pixel-equivalent
//! size. [`resolve_dims`] turns a shape plus the buffer and terminal
//! dimensions into concrete target pixel dimensions.

use serde::{Deserialize, Serialize};

use crate::errors::{DrawError, Result};
use crate::term::TermContext;

/// Requested output size
///
/// Either field may be `None` ("auto"): the inline-image backend forwards
/// that to the terminal, grid backends fall back to the buffer's own
/// dimension for that axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum Shape {
    /// Multiples of the drawer's cell granularity (character cells)
    Cells {
        height: Option<f64>,
        width: Option<f64>,
    },
    /// Absolute pixel dimensions
    Pixels {
        height: Option<f64>,
        width: Option<f64>,
    },
    /// Fraction of the terminal's pixel-equivalent size
    ///
    /// Not clamped: a ratio above 1.0 requests a size past the terminal,
    /// which `shrink_to_terminal` may still clamp afterwards.
    Ratio {
        height: Option<f64>,
        width: Option<f64>,
    },
}

impl Shape {
    /// Shape in character cells, both axes given
    pub fn cells(height: f64, width: f64) -> Self {
        Self::Cells {
            height: Some(height),
            width: Some(width),
        }
    }

    /// Shape in pixels, both axes given
    pub fn pixels(height: f64, width: f64) -> Self {
        Self::Pixels {
            height: Some(height),
            width: Some(width),
        }
    }

    /// Shape as a terminal-size fraction, both axes given
    pub fn ratio(height: f64, width: f64) -> Self {
        Self::Ratio {
            height: Some(height),
            width: Some(width),
        }
    }

    /// Build a shape from a string tag (`"cells"`, `"pixels"`, `"ratio"`)
    pub fn from_tag(tag: &str, height: Option<f64>, width: Option<f64>) -> Result<Self> {
        match tag {
            "cells" => Ok(Self::Cells { height, width }),
            "pixels" => Ok(Self::Pixels { height, width }),
            "ratio" => Ok(Self::Ratio { height, width }),
            other => Err(DrawError::UnknownShape(other.to_string())),
        }
    }

    pub(crate) fn height(&self) -> Option<f64> {
        match self {
            Self::Cells { height, .. } | Self::Pixels { height, .. } | Self::Ratio { height, .. } => {
                *height
            }
        }
    }

    pub(crate) fn width(&self) -> Option<f64> {
        match self {
            Self::Cells { width, .. } | Self::Pixels { width, .. } | Self::Ratio { width, .. } => {
                *width
            }
        }
    }
}

/// Resolve the concrete target pixel dimensions for a draw call.
///
/// `buffer_dims` is the source buffer's `(height, width)`, `cell` the
/// drawer's cell granularity. With `shrink_to_terminal` each axis is
/// clamped to the terminal's pixel-equivalent independently; with
/// `preserve_aspect_ratio` the (clamped) request becomes a bounding box
/// and the buffer's own aspect ratio is scaled uniformly to fit it.
///
/// Every rounding step rounds half away from zero.
pub(crate) fn resolve_dims(
    buffer_dims: (usize, usize),
    shape: Option<&Shape>,
    cell: (u32, u32),
    term: &TermContext,
    preserve_aspect_ratio: bool,
    shrink_to_terminal: bool,
) -> (usize, usize) {
    let term_pixels = term.pixel_equivalent(cell);

    let requested = match shape {
        None => buffer_dims,
        Some(Shape::Cells { height, width }) => (
            axis(*height, buffer_dims.0, |h| h * f64::from(cell.0)),
            axis(*width, buffer_dims.1, |w| w * f64::from(cell.1)),
        ),
        Some(Shape::Ratio { height, width }) => (
            axis(*height, buffer_dims.0, |h| h * term_pixels.0 as f64),
            axis(*width, buffer_dims.1, |w| w * term_pixels.1 as f64),
        ),
        Some(Shape::Pixels { height, width }) => (
            axis(*height, buffer_dims.0, |h| h),
            axis(*width, buffer_dims.1, |w| w),
        ),
    };

    let bounded = if shrink_to_terminal {
        (
            requested.0.min(term_pixels.0),
            requested.1.min(term_pixels.1),
        )
    } else {
        requested
    };

    if preserve_aspect_ratio {
        let ver_scale = bounded.0 as f64 / buffer_dims.0 as f64;
        let hor_scale = bounded.1 as f64 / buffer_dims.1 as f64;
        let scale = ver_scale.min(hor_scale);
        (
            (scale * buffer_dims.0 as f64).round() as usize,
            (scale * buffer_dims.1 as f64).round() as usize,
        )
    } else {
        bounded
    }
}

fn axis(value: Option<f64>, fallback: usize, to_pixels: impl Fn(f64) -> f64) -> usize {
    match value {
        Some(v) => to_pixels(v).round() as usize,
        None => fallback,
    }
}
