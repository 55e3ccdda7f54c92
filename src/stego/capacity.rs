// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Embedding capacity.
//!
//! Capacity is a pure function of the grid geometry: every colour sample
//! carries [`LSB_BITS_PER_CHANNEL`] bits, alpha carries none. The container
//! overhead is subtracted to obtain the largest message that fits.

use crate::pixels::PixelGrid;
use crate::stego::config::LSB_BITS_PER_CHANNEL;
use crate::stego::container::OVERHEAD;
use crate::stego::error::StegoError;

/// Embeddable bits in the grid.
pub fn capacity_bits(grid: &PixelGrid) -> usize {
    grid.embeddable_samples() * LSB_BITS_PER_CHANNEL
}

/// Whole container bytes the grid can carry.
pub fn capacity_bytes(grid: &PixelGrid) -> usize {
    capacity_bits(grid) / 8
}

/// Largest message (in bytes) that fits, after container overhead.
///
/// Returns 0 if the image cannot even hold an empty container. Capped at
/// `u32::MAX` because of the container's length field.
pub fn message_capacity(grid: &PixelGrid) -> usize {
    capacity_bytes(grid).saturating_sub(OVERHEAD).min(u32::MAX as usize)
}

/// Fail fast if a container of `container_len` bytes does not fit.
///
/// # Errors
/// [`StegoError::MessageTooLarge`] with the needed and available byte counts.
pub fn check_fits(grid: &PixelGrid, container_len: usize) -> Result<(), StegoError> {
    let available = capacity_bytes(grid);
    if container_len > available {
        return Err(StegoError::MessageTooLarge { needed: container_len, available });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixels::{ChannelLayout, Samples};

    fn grid(w: u32, h: u32, layout: ChannelLayout) -> PixelGrid {
        let n = (w * h) as usize * layout.channels();
        PixelGrid::new(w, h, layout, Samples::Eight(vec![0; n])).unwrap()
    }

    #[test]
    fn rgb_100x100() {
        // 100×100×3 = 30,000 bits = 3,750 bytes.
        let g = grid(100, 100, ChannelLayout::Rgb);
        assert_eq!(capacity_bits(&g), 30_000);
        assert_eq!(capacity_bytes(&g), 3_750);
        assert_eq!(message_capacity(&g), 3_750 - OVERHEAD);
    }

    #[test]
    fn alpha_carries_nothing() {
        let rgb = grid(20, 20, ChannelLayout::Rgb);
        let rgba = grid(20, 20, ChannelLayout::Rgba);
        assert_eq!(capacity_bits(&rgb), capacity_bits(&rgba));

        let gray = grid(20, 20, ChannelLayout::Gray);
        let gray_alpha = grid(20, 20, ChannelLayout::GrayAlpha);
        assert_eq!(capacity_bits(&gray), 400);
        assert_eq!(capacity_bits(&gray_alpha), 400);
    }

    #[test]
    fn partial_bytes_round_down() {
        // 3×3 RGB = 27 bits → 3 whole bytes.
        assert_eq!(capacity_bytes(&grid(3, 3, ChannelLayout::Rgb)), 3);
    }

    #[test]
    fn tiny_image_has_zero_message_capacity() {
        assert_eq!(message_capacity(&grid(4, 4, ChannelLayout::Rgb)), 0);
    }

    #[test]
    fn check_fits_boundary() {
        let g = grid(100, 100, ChannelLayout::Rgb);
        assert!(check_fits(&g, 3_750).is_ok());
        assert_eq!(
            check_fits(&g, 3_751),
            Err(StegoError::MessageTooLarge { needed: 3_751, available: 3_750 })
        );
    }
}
