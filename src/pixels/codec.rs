// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Conversion between image bytes and [`PixelGrid`].

use std::io::Cursor;

use image::io::Reader;
use image::{DynamicImage, ImageBuffer, ImageFormat};

use super::error::{PixelError, Result};
use super::{validate_dimensions, ChannelLayout, PixelGrid, Samples};

/// Decode PNG, BMP or GIF bytes into a pixel grid.
///
/// The format is detected from the leading magic bytes, not from any file
/// name. Lossy formats are rejected with [`PixelError::UnsupportedFormat`]
/// because re-encoding them would not round-trip the sample values. A GIF
/// contributes its first frame as RGBA.
///
/// Dimensions are read from the image header and checked against
/// [`MAX_DIMENSION`](super::MAX_DIMENSION) and [`MAX_PIXELS`](super::MAX_PIXELS)
/// before any pixel data is decoded.
pub fn decode(bytes: &[u8]) -> Result<PixelGrid> {
    let format = image::guess_format(bytes).map_err(|_| PixelError::UnrecognizedFormat)?;
    match format {
        ImageFormat::Png | ImageFormat::Bmp | ImageFormat::Gif => {}
        other => return Err(PixelError::UnsupportedFormat(format_name(other))),
    }

    let (width, height) = Reader::with_format(Cursor::new(bytes), format)
        .into_dimensions()
        .map_err(|e| PixelError::Decode(e.to_string()))?;
    validate_dimensions(width, height)?;

    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| PixelError::Decode(e.to_string()))?;

    let (width, height) = (img.width(), img.height());
    let (layout, samples) = match img {
        DynamicImage::ImageLuma8(buf) => (ChannelLayout::Gray, Samples::Eight(buf.into_raw())),
        DynamicImage::ImageLumaA8(buf) => (ChannelLayout::GrayAlpha, Samples::Eight(buf.into_raw())),
        DynamicImage::ImageRgb8(buf) => (ChannelLayout::Rgb, Samples::Eight(buf.into_raw())),
        DynamicImage::ImageRgba8(buf) => (ChannelLayout::Rgba, Samples::Eight(buf.into_raw())),
        DynamicImage::ImageLuma16(buf) => (ChannelLayout::Gray, Samples::Sixteen(buf.into_raw())),
        DynamicImage::ImageLumaA16(buf) => (ChannelLayout::GrayAlpha, Samples::Sixteen(buf.into_raw())),
        DynamicImage::ImageRgb16(buf) => (ChannelLayout::Rgb, Samples::Sixteen(buf.into_raw())),
        DynamicImage::ImageRgba16(buf) => (ChannelLayout::Rgba, Samples::Sixteen(buf.into_raw())),
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
            return Err(PixelError::UnsupportedLayout("32-bit float"))
        }
        _ => return Err(PixelError::UnsupportedLayout("unknown")),
    };

    PixelGrid::new(width, height, layout, samples)
}

/// Encode a pixel grid as PNG, preserving dimensions, layout and bit depth.
pub fn encode(grid: PixelGrid) -> Result<Vec<u8>> {
    let (width, height, layout, samples) = grid.into_parts();

    let img = match (layout, samples) {
        (ChannelLayout::Gray, Samples::Eight(s)) => ImageBuffer::from_raw(width, height, s).map(DynamicImage::ImageLuma8),
        (ChannelLayout::GrayAlpha, Samples::Eight(s)) => ImageBuffer::from_raw(width, height, s).map(DynamicImage::ImageLumaA8),
        (ChannelLayout::Rgb, Samples::Eight(s)) => ImageBuffer::from_raw(width, height, s).map(DynamicImage::ImageRgb8),
        (ChannelLayout::Rgba, Samples::Eight(s)) => ImageBuffer::from_raw(width, height, s).map(DynamicImage::ImageRgba8),
        (ChannelLayout::Gray, Samples::Sixteen(s)) => ImageBuffer::from_raw(width, height, s).map(DynamicImage::ImageLuma16),
        (ChannelLayout::GrayAlpha, Samples::Sixteen(s)) => ImageBuffer::from_raw(width, height, s).map(DynamicImage::ImageLumaA16),
        (ChannelLayout::Rgb, Samples::Sixteen(s)) => ImageBuffer::from_raw(width, height, s).map(DynamicImage::ImageRgb16),
        (ChannelLayout::Rgba, Samples::Sixteen(s)) => ImageBuffer::from_raw(width, height, s).map(DynamicImage::ImageRgba16),
    }
    .ok_or(PixelError::InvalidDimensions)?;

    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .map_err(|e| PixelError::Encode(e.to_string()))?;
    Ok(out)
}

fn format_name(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "JPEG",
        ImageFormat::WebP => "WebP",
        ImageFormat::Tiff => "TIFF",
        ImageFormat::Ico => "ICO",
        ImageFormat::Avif => "AVIF",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixels::BitDepth;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

    fn to_bytes(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), format).unwrap();
        out
    }

    fn gradient_rgb(w: u32, h: u32) -> RgbImage {
        RgbImage::from_fn(w, h, |x, y| Rgb([(x * 7) as u8, (y * 13) as u8, ((x + y) * 3) as u8]))
    }

    #[test]
    fn png_rgb_roundtrip_is_lossless() {
        let original = gradient_rgb(37, 21);
        let png = to_bytes(DynamicImage::ImageRgb8(original.clone()), ImageFormat::Png);

        let grid = decode(&png).unwrap();
        assert_eq!(grid.width(), 37);
        assert_eq!(grid.height(), 21);
        assert_eq!(grid.layout(), ChannelLayout::Rgb);
        assert_eq!(grid.bit_depth(), BitDepth::Eight);

        let reencoded = encode(grid).unwrap();
        let back = image::load_from_memory(&reencoded).unwrap().to_rgb8();
        assert_eq!(back.into_raw(), original.into_raw());
    }

    #[test]
    fn rgba_layout_preserved() {
        let original = RgbaImage::from_fn(8, 8, |x, y| Rgba([x as u8, y as u8, 200, (x * y) as u8]));
        let png = to_bytes(DynamicImage::ImageRgba8(original.clone()), ImageFormat::Png);
        let grid = decode(&png).unwrap();
        assert_eq!(grid.layout(), ChannelLayout::Rgba);
        let back = image::load_from_memory(&encode(grid).unwrap()).unwrap();
        assert!(matches!(back, DynamicImage::ImageRgba8(_)));
        assert_eq!(back.to_rgba8().into_raw(), original.into_raw());
    }

    #[test]
    fn gray16_depth_preserved() {
        let original: ImageBuffer<Luma<u16>, Vec<u16>> =
            ImageBuffer::from_fn(5, 4, |x, y| Luma([(x * 1000 + y * 17) as u16]));
        let png = to_bytes(DynamicImage::ImageLuma16(original.clone()), ImageFormat::Png);
        let grid = decode(&png).unwrap();
        assert_eq!(grid.layout(), ChannelLayout::Gray);
        assert_eq!(grid.bit_depth(), BitDepth::Sixteen);
        let back = image::load_from_memory(&encode(grid).unwrap()).unwrap();
        assert!(matches!(back, DynamicImage::ImageLuma16(_)));
        assert_eq!(back.to_luma16().into_raw(), original.into_raw());
    }

    #[test]
    fn bmp_input_decodes() {
        let original = gradient_rgb(10, 6);
        let bmp = to_bytes(DynamicImage::ImageRgb8(original.clone()), ImageFormat::Bmp);
        let grid = decode(&bmp).unwrap();
        assert_eq!((grid.width(), grid.height()), (10, 6));
        assert_eq!(grid.samples(), &Samples::Eight(original.into_raw()));
    }

    #[test]
    fn gif_first_frame_decodes_as_rgba() {
        let palette = [[0, 0, 0, 255], [255, 0, 0, 255], [0, 128, 255, 255], [250, 250, 10, 255]];
        let original = RgbaImage::from_fn(12, 9, |x, y| Rgba(palette[((x + 2 * y) % 4) as usize]));
        let gif = to_bytes(DynamicImage::ImageRgba8(original), ImageFormat::Gif);
        let expected = image::load_from_memory(&gif).unwrap().to_rgba8();

        let grid = decode(&gif).unwrap();
        assert_eq!((grid.width(), grid.height()), (12, 9));
        assert_eq!(grid.layout(), ChannelLayout::Rgba);
        assert_eq!(grid.samples(), &Samples::Eight(expected.clone().into_raw()));

        let back = image::load_from_memory(&encode(grid).unwrap()).unwrap();
        assert_eq!(back.to_rgba8().into_raw(), expected.into_raw());
    }

    /// A 1×1 PNG whose IHDR is rewritten to declare `width` × `height`.
    /// The IDAT still holds a single pixel, so only a header-first check can
    /// answer without decoding.
    fn png_declaring(width: u32, height: u32) -> Vec<u8> {
        let mut png = to_bytes(DynamicImage::ImageLuma8(GrayImage::new(1, 1)), ImageFormat::Png);
        // signature (8) | length (4) | "IHDR" (4) | data (13) | crc (4)
        assert_eq!(&png[12..16], b"IHDR");
        png[16..20].copy_from_slice(&width.to_be_bytes());
        png[20..24].copy_from_slice(&height.to_be_bytes());
        let crc = crc32fast::hash(&png[12..29]);
        png[29..33].copy_from_slice(&crc.to_be_bytes());
        png
    }

    #[test]
    fn oversized_header_rejected_before_decoding() {
        use crate::pixels::{MAX_DIMENSION, MAX_PIXELS};

        // 16000 × 16000 would need 256 MB of samples.
        assert_eq!(decode(&png_declaring(16_000, 16_000)), Err(PixelError::ImageTooLarge));
        assert_eq!(decode(&png_declaring(MAX_DIMENSION + 1, 1)), Err(PixelError::ImageTooLarge));
        assert_eq!(decode(&png_declaring(1, MAX_DIMENSION + 1)), Err(PixelError::ImageTooLarge));
        // Both sides legal, product over the pixel budget.
        let side = MAX_PIXELS / MAX_DIMENSION + 1;
        assert_eq!(decode(&png_declaring(MAX_DIMENSION, side)), Err(PixelError::ImageTooLarge));
    }

    #[test]
    fn header_within_limits_still_needs_pixel_data() {
        // Passes the header check, then fails on the 1-pixel IDAT.
        let result = decode(&png_declaring(64, 64));
        assert!(matches!(result, Err(PixelError::Decode(_))), "got {result:?}");
    }

    #[test]
    fn garbage_rejected() {
        assert_eq!(decode(b"definitely not an image"), Err(PixelError::UnrecognizedFormat));
        assert_eq!(decode(&[]), Err(PixelError::UnrecognizedFormat));
    }

    #[test]
    fn jpeg_signature_rejected() {
        let fake_jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];
        assert_eq!(decode(&fake_jpeg), Err(PixelError::UnsupportedFormat("JPEG")));
    }

    #[test]
    fn truncated_png_rejected() {
        let png = to_bytes(DynamicImage::ImageLuma8(GrayImage::new(16, 16)), ImageFormat::Png);
        let result = decode(&png[..png.len() / 2]);
        assert!(matches!(result, Err(PixelError::Decode(_))), "got {result:?}");
    }
}
