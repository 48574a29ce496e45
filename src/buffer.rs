//! Pixel buffer model and adaptation helpers
//!
//! A [`PixelBuffer`] is a row-major 2-D (or 3-D with a trailing RGB axis)
//! sample array. The helpers here cover what every backend needs before
//! packing: support-set validation, zero-padding to a cell multiple, and
//! resize/binarize delegated to the `image` crate.

use std::fmt;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, RgbImage};

use crate::errors::{DrawError, Result};

/// Element type of a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dtype {
    Bool,
    U8,
    I32,
    F32,
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::U8 => "u8",
            Self::I32 => "i32",
            Self::F32 => "f32",
        };
        f.write_str(name)
    }
}

/// Sample storage, one variant per supported element type
#[derive(Debug, Clone, PartialEq)]
enum Samples {
    Bool(Vec<bool>),
    U8(Vec<u8>),
    I32(Vec<i32>),
    F32(Vec<f32>),
}

/// Row-major raster buffer
///
/// `channels` is 1 for every dtype; 3 (RGB) is permitted for `u8` only.
/// A trailing channel axis of size 1 is the same thing as no channel axis,
/// so single-channel buffers are always stored squeezed.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    samples: Samples,
    height: usize,
    width: usize,
    channels: usize,
}

impl PixelBuffer {
    /// Single-channel boolean buffer
    pub fn from_bool(data: Vec<bool>, height: usize, width: usize) -> Result<Self> {
        Self::checked(Samples::Bool(data), height, width, 1)
    }

    /// Single-channel 8-bit buffer (grayscale)
    pub fn from_gray(data: Vec<u8>, height: usize, width: usize) -> Result<Self> {
        Self::checked(Samples::U8(data), height, width, 1)
    }

    /// Three-channel 8-bit buffer (RGB, interleaved row-major)
    pub fn from_rgb(data: Vec<u8>, height: usize, width: usize) -> Result<Self> {
        Self::checked(Samples::U8(data), height, width, 3)
    }

    /// Single-channel 32-bit signed buffer
    pub fn from_i32(data: Vec<i32>, height: usize, width: usize) -> Result<Self> {
        Self::checked(Samples::I32(data), height, width, 1)
    }

    /// Single-channel 32-bit float buffer
    pub fn from_f32(data: Vec<f32>, height: usize, width: usize) -> Result<Self> {
        Self::checked(Samples::F32(data), height, width, 1)
    }

    fn checked(samples: Samples, height: usize, width: usize, channels: usize) -> Result<Self> {
        let expected = height * width * channels;
        let actual = match &samples {
            Samples::Bool(v) => v.len(),
            Samples::U8(v) => v.len(),
            Samples::I32(v) => v.len(),
            Samples::F32(v) => v.len(),
        };
        if actual != expected {
            return Err(DrawError::BufferSize { expected, actual });
        }
        Ok(Self {
            samples,
            height,
            width,
            channels,
        })
    }

    pub fn dtype(&self) -> Dtype {
        match &self.samples {
            Samples::Bool(_) => Dtype::Bool,
            Samples::U8(_) => Dtype::U8,
            Samples::I32(_) => Dtype::I32,
            Samples::F32(_) => Dtype::F32,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// `(height, width)` in pixels
    pub fn dims(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Fail unless this buffer's (dtype, channels) pair is in `supported`
    pub(crate) fn ensure_supported(
        &self,
        drawer: &'static str,
        supported: &[(Dtype, usize)],
    ) -> Result<()> {
        if supported.contains(&(self.dtype(), self.channels)) {
            Ok(())
        } else {
            Err(DrawError::UnsupportedBuffer {
                drawer,
                dtype: self.dtype(),
                channels: self.channels,
            })
        }
    }

    /// Pad on the bottom/right with the dtype's zero value so both
    /// dimensions become multiples of `cell`.
    pub(crate) fn pad_to_multiple(&self, cell: (u32, u32)) -> Self {
        let new_height = next_multiple(self.height, cell.0 as usize);
        let new_width = next_multiple(self.width, cell.1 as usize);
        if (new_height, new_width) == (self.height, self.width) {
            return self.clone();
        }
        let samples = match &self.samples {
            Samples::Bool(v) => Samples::Bool(self.padded(v, new_height, new_width, false)),
            Samples::U8(v) => Samples::U8(self.padded(v, new_height, new_width, 0)),
            Samples::I32(v) => Samples::I32(self.padded(v, new_height, new_width, 0)),
            Samples::F32(v) => Samples::F32(self.padded(v, new_height, new_width, 0.0)),
        };
        Self {
            samples,
            height: new_height,
            width: new_width,
            channels: self.channels,
        }
    }

    fn padded<T: Copy>(&self, data: &[T], new_height: usize, new_width: usize, zero: T) -> Vec<T> {
        let row_len = self.width * self.channels;
        let new_row_len = new_width * self.channels;
        let mut out = vec![zero; new_height * new_row_len];
        for row in 0..self.height {
            let src = &data[row * row_len..(row + 1) * row_len];
            out[row * new_row_len..row * new_row_len + row_len].copy_from_slice(src);
        }
        out
    }

    /// Resample to `(height, width)` via the image collaborator
    /// (nearest-neighbor filter).
    pub(crate) fn resize(&self, height: usize, width: usize) -> Self {
        if (height, width) == (self.height, self.width) {
            return self.clone();
        }
        let (w0, h0) = (self.width as u32, self.height as u32);
        let (w1, h1) = (width as u32, height as u32);
        let samples = match &self.samples {
            Samples::U8(v) if self.channels == 3 => {
                let img = RgbImage::from_raw(w0, h0, v.clone())
                    .expect("sample count matches dimensions");
                Samples::U8(imageops::resize(&img, w1, h1, FilterType::Nearest).into_raw())
            }
            Samples::U8(v) => {
                let img = GrayImage::from_raw(w0, h0, v.clone())
                    .expect("sample count matches dimensions");
                Samples::U8(imageops::resize(&img, w1, h1, FilterType::Nearest).into_raw())
            }
            Samples::Bool(v) => {
                let gray: Vec<u8> = v.iter().map(|&b| if b { 255 } else { 0 }).collect();
                let img = GrayImage::from_raw(w0, h0, gray)
                    .expect("sample count matches dimensions");
                let resized = imageops::resize(&img, w1, h1, FilterType::Nearest);
                Samples::Bool(resized.into_raw().into_iter().map(|p| p >= 128).collect())
            }
            Samples::F32(v) => {
                let img: ImageBuffer<Luma<f32>, Vec<f32>> =
                    ImageBuffer::from_raw(w0, h0, v.clone())
                        .expect("sample count matches dimensions");
                Samples::F32(imageops::resize(&img, w1, h1, FilterType::Nearest).into_raw())
            }
            Samples::I32(v) => {
                // Resample through f32; exact under a nearest filter.
                let float: Vec<f32> = v.iter().map(|&p| p as f32).collect();
                let img: ImageBuffer<Luma<f32>, Vec<f32>> =
                    ImageBuffer::from_raw(w0, h0, float)
                        .expect("sample count matches dimensions");
                let resized = imageops::resize(&img, w1, h1, FilterType::Nearest);
                Samples::I32(resized.into_raw().into_iter().map(|p| p as i32).collect())
            }
        };
        Self {
            samples,
            height,
            width,
            channels: self.channels,
        }
    }

    /// 1-bit threshold conversion: u8 >= 128, i32 > 0, f32 >= 0.5.
    /// Boolean buffers pass through unchanged.
    pub(crate) fn binarize(&self) -> Self {
        let bits = match &self.samples {
            Samples::Bool(v) => v.clone(),
            Samples::U8(v) => v.iter().map(|&p| p >= 128).collect(),
            Samples::I32(v) => v.iter().map(|&p| p > 0).collect(),
            Samples::F32(v) => v.iter().map(|&p| p >= 0.5).collect(),
        };
        Self {
            samples: Samples::Bool(bits),
            height: self.height,
            width: self.width,
            channels: 1,
        }
    }

    /// Boolean sample at `(row, col)`; single-channel boolean buffers only
    pub(crate) fn bit_at(&self, row: usize, col: usize) -> bool {
        match &self.samples {
            Samples::Bool(v) => v[row * self.width + col],
            _ => false,
        }
    }

    /// RGB triple at `(row, col)`; u8 buffers only, grayscale replicated
    pub(crate) fn rgb_at(&self, row: usize, col: usize) -> [u8; 3] {
        match &self.samples {
            Samples::U8(v) if self.channels == 3 => {
                let i = (row * self.width + col) * 3;
                [v[i], v[i + 1], v[i + 2]]
            }
            Samples::U8(v) => {
                let p = v[row * self.width + col];
                [p, p, p]
            }
            _ => [0, 0, 0],
        }
    }

    /// Raw row-major bytes; u8 buffers only
    pub(crate) fn as_u8_bytes(&self) -> Option<&[u8]> {
        match &self.samples {
            Samples::U8(v) => Some(v),
            _ => None,
        }
    }

    /// Lossy conversion to a `DynamicImage` for the compression
    /// collaborator. Non-u8 samples are cast to u8 the way the numpy
    /// original did (bool -> 0/1, integers truncated).
    pub(crate) fn to_dynamic_image(&self) -> DynamicImage {
        let (w, h) = (self.width as u32, self.height as u32);
        match &self.samples {
            Samples::U8(v) if self.channels == 3 => DynamicImage::ImageRgb8(
                RgbImage::from_raw(w, h, v.clone()).expect("sample count matches dimensions"),
            ),
            Samples::U8(v) => DynamicImage::ImageLuma8(
                GrayImage::from_raw(w, h, v.clone()).expect("sample count matches dimensions"),
            ),
            Samples::Bool(v) => {
                let gray: Vec<u8> = v.iter().map(|&b| u8::from(b)).collect();
                DynamicImage::ImageLuma8(
                    GrayImage::from_raw(w, h, gray).expect("sample count matches dimensions"),
                )
            }
            Samples::I32(v) => {
                let gray: Vec<u8> = v.iter().map(|&p| p as u8).collect();
                DynamicImage::ImageLuma8(
                    GrayImage::from_raw(w, h, gray).expect("sample count matches dimensions"),
                )
            }
            Samples::F32(v) => {
                let gray: Vec<u8> = v.iter().map(|&p| p as u8).collect();
                DynamicImage::ImageLuma8(
                    GrayImage::from_raw(w, h, gray).expect("sample count matches dimensions"),
                )
            }
        }
    }
}

fn next_multiple(value: usize, n: usize) -> usize {
    match value % n {
        0 => value,
        rem => value + n - rem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_validates_length() {
        assert!(PixelBuffer::from_gray(vec![0; 6], 2, 3).is_ok());
        assert!(matches!(
            PixelBuffer::from_gray(vec![0; 5], 2, 3),
            Err(DrawError::BufferSize {
                expected: 6,
                actual: 5
            })
        ));
        assert!(PixelBuffer::from_rgb(vec![0; 18], 2, 3).is_ok());
        assert!(PixelBuffer::from_rgb(vec![0; 6], 2, 3).is_err());
    }

    #[test]
    fn test_pad_to_multiple_shape() {
        let buf = PixelBuffer::from_bool(vec![true; 81], 9, 9).expect("valid");
        let padded = buf.pad_to_multiple((4, 2));
        assert_eq!(padded.dims(), (12, 10));
        // original region unchanged, added region zero-valued
        assert!(padded.bit_at(8, 8));
        assert!(!padded.bit_at(8, 9));
        assert!(!padded.bit_at(9, 0));
        assert!(!padded.bit_at(11, 9));
    }

    #[test]
    fn test_pad_already_aligned_is_identity() {
        let buf = PixelBuffer::from_gray(vec![7; 8], 4, 2).expect("valid");
        assert_eq!(buf.pad_to_multiple((4, 2)), buf);
    }

    #[test]
    fn test_pad_preserves_rgb_rows() {
        let buf = PixelBuffer::from_rgb(vec![9; 3], 1, 1).expect("valid");
        let padded = buf.pad_to_multiple((2, 1));
        assert_eq!(padded.dims(), (2, 1));
        assert_eq!(padded.rgb_at(0, 0), [9, 9, 9]);
        assert_eq!(padded.rgb_at(1, 0), [0, 0, 0]);
    }

    #[test]
    fn test_resize_nearest_upscale() {
        let buf = PixelBuffer::from_gray(vec![10, 200], 1, 2).expect("valid");
        let resized = buf.resize(2, 4);
        assert_eq!(resized.dims(), (2, 4));
        assert_eq!(resized.rgb_at(0, 0)[0], 10);
        assert_eq!(resized.rgb_at(1, 3)[0], 200);
    }

    #[test]
    fn test_resize_i32_roundtrips_values() {
        let buf = PixelBuffer::from_i32(vec![-5, 1000], 1, 2).expect("valid");
        let resized = buf.resize(1, 4).binarize();
        assert!(!resized.bit_at(0, 0));
        assert!(resized.bit_at(0, 3));
    }

    #[test]
    fn test_binarize_thresholds() {
        let buf = PixelBuffer::from_gray(vec![0, 127, 128, 255], 1, 4).expect("valid");
        let bits = buf.binarize();
        assert!(!bits.bit_at(0, 0));
        assert!(!bits.bit_at(0, 1));
        assert!(bits.bit_at(0, 2));
        assert!(bits.bit_at(0, 3));

        let buf = PixelBuffer::from_f32(vec![0.0, 0.49, 0.5], 1, 3).expect("valid");
        let bits = buf.binarize();
        assert!(!bits.bit_at(0, 0));
        assert!(!bits.bit_at(0, 1));
        assert!(bits.bit_at(0, 2));
    }

    #[test]
    fn test_ensure_supported() {
        let buf = PixelBuffer::from_i32(vec![0], 1, 1).expect("valid");
        assert!(buf.ensure_supported("x", &[(Dtype::I32, 1)]).is_ok());
        let err = buf
            .ensure_supported("half_block", &[(Dtype::U8, 1), (Dtype::U8, 3)])
            .expect_err("i32 not supported");
        assert!(err.to_string().contains("half_block"));
        assert!(err.to_string().contains("i32"));
    }
}
