// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Error types for decoding and encoding cover images.

use std::fmt;

/// Errors that can occur while turning image bytes into a [`PixelGrid`]
/// or back.
///
/// [`PixelGrid`]: crate::pixels::PixelGrid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelError {
    /// The input does not start with the signature of any known image format.
    UnrecognizedFormat,
    /// The format is recognized but lossy or otherwise unsuitable (JPEG, GIF, ...).
    UnsupportedFormat(&'static str),
    /// The decoded sample layout cannot be carried losslessly (e.g. float samples).
    UnsupportedLayout(&'static str),
    /// Width or height is zero, or the sample buffer does not match them.
    InvalidDimensions,
    /// The image exceeds the maximum dimension or pixel count.
    ImageTooLarge,
    /// The image container is damaged or truncated.
    Decode(String),
    /// Writing the output PNG failed.
    Encode(String),
}

impl fmt::Display for PixelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedFormat => write!(f, "unrecognized image format"),
            Self::UnsupportedFormat(name) => {
                write!(f, "unsupported image format: {name} (use PNG, BMP or GIF)")
            }
            Self::UnsupportedLayout(name) => write!(f, "unsupported pixel layout: {name}"),
            Self::InvalidDimensions => write!(f, "invalid image dimensions"),
            Self::ImageTooLarge => write!(f, "image too large (max 8192px / 16MP)"),
            Self::Decode(msg) => write!(f, "image decode failed: {msg}"),
            Self::Encode(msg) => write!(f, "image encode failed: {msg}"),
        }
    }
}

impl std::error::Error for PixelError {}

pub type Result<T> = std::result::Result<T, PixelError>;
