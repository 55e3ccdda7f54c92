// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Lossless pixel grid and PNG/BMP/GIF codec.
//!
//! A [`PixelGrid`] holds the raw channel samples of a decoded cover image in
//! row-major order, interleaved per pixel exactly as the image crate stores
//! them. Embedding only ever touches the least-significant bit of colour
//! samples, so `encode(decode(x))` reproduces every other bit unchanged.
//!
//! Supports:
//! - PNG, BMP and GIF (first frame) input, detected from magic bytes
//! - Gray, Gray+Alpha, RGB and RGBA layouts at 8 or 16 bits per channel
//! - PNG output with the same layout and bit depth as the input
//!
//! Does NOT support:
//! - JPEG, WebP or any other lossy input
//! - Floating-point samples

pub mod codec;
pub mod error;

use error::{PixelError, Result};

pub use codec::{decode, encode};

/// Maximum pixel dimension (width or height) accepted by the codec.
pub const MAX_DIMENSION: u32 = 8192;

/// Maximum total pixel count (width × height) accepted by the codec.
pub const MAX_PIXELS: u32 = 16_000_000;

/// Channel arrangement of each pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    Gray,
    GrayAlpha,
    Rgb,
    Rgba,
}

impl ChannelLayout {
    /// Total samples per pixel, alpha included.
    pub fn channels(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::GrayAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Samples per pixel that carry colour (and therefore hidden bits).
    /// Alpha is always the trailing channel and is never modified.
    pub fn color_channels(self) -> usize {
        match self {
            Self::Gray | Self::GrayAlpha => 1,
            Self::Rgb | Self::Rgba => 3,
        }
    }
}

/// Bits per channel sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDepth {
    Eight,
    Sixteen,
}

impl BitDepth {
    pub fn bits(self) -> u8 {
        match self {
            Self::Eight => 8,
            Self::Sixteen => 16,
        }
    }
}

/// Channel sample storage, uniform in depth across the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Samples {
    Eight(Vec<u8>),
    Sixteen(Vec<u16>),
}

impl Samples {
    pub fn len(&self) -> usize {
        match self {
            Self::Eight(s) => s.len(),
            Self::Sixteen(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A decoded image: dimensions, layout and interleaved channel samples.
///
/// Created by [`decode`] and turned back into PNG bytes by [`encode`]. The
/// grid is exclusively owned by the pipeline that decoded it; embedding
/// mutates it in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    layout: ChannelLayout,
    samples: Samples,
}

impl PixelGrid {
    /// Build a grid from raw interleaved samples.
    ///
    /// Fails with [`PixelError::InvalidDimensions`] if either dimension is zero
    /// or the sample count is not `width * height * channels`.
    pub fn new(width: u32, height: u32, layout: ChannelLayout, samples: Samples) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PixelError::InvalidDimensions);
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|p| p.checked_mul(layout.channels()))
            .ok_or(PixelError::InvalidDimensions)?;
        if samples.len() != expected {
            return Err(PixelError::InvalidDimensions);
        }
        Ok(Self { width, height, layout, samples })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    pub fn bit_depth(&self) -> BitDepth {
        match self.samples {
            Samples::Eight(_) => BitDepth::Eight,
            Samples::Sixteen(_) => BitDepth::Sixteen,
        }
    }

    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    pub(crate) fn into_parts(self) -> (u32, u32, ChannelLayout, Samples) {
        (self.width, self.height, self.layout, self.samples)
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of samples that may carry hidden bits (colour samples only).
    pub fn embeddable_samples(&self) -> usize {
        self.pixel_count() * self.layout.color_channels()
    }

    /// Sample index of the `slot`-th embeddable sample.
    ///
    /// Slots run row-major over pixels and in channel order within a pixel,
    /// skipping alpha.
    pub fn slot_index(&self, slot: usize) -> usize {
        let color = self.layout.color_channels();
        (slot / color) * self.layout.channels() + slot % color
    }

    /// Least-significant bit of the sample at `index`.
    pub fn lsb(&self, index: usize) -> u8 {
        match &self.samples {
            Samples::Eight(s) => s[index] & 1,
            Samples::Sixteen(s) => (s[index] & 1) as u8,
        }
    }

    /// Overwrite the least-significant bit of the sample at `index`.
    pub fn set_lsb(&mut self, index: usize, bit: u8) {
        match &mut self.samples {
            Samples::Eight(s) => s[index] = (s[index] & !1) | (bit & 1),
            Samples::Sixteen(s) => s[index] = (s[index] & !1) | u16::from(bit & 1),
        }
    }
}

/// Validate image dimensions against [`MAX_DIMENSION`] and [`MAX_PIXELS`].
pub fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(PixelError::InvalidDimensions);
    }
    if width > MAX_DIMENSION
        || height > MAX_DIMENSION
        || width.checked_mul(height).map_or(true, |p| p > MAX_PIXELS)
    {
        return Err(PixelError::ImageTooLarge);
    }
    Ok(())
}
