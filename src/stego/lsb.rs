// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Least-significant-bit embedding and extraction.
//!
//! Bytes are written MSB first, one bit per colour sample, in the fixed slot
//! order defined by [`PixelGrid::slot_index`] (row-major pixels, channel
//! order within a pixel, alpha skipped). The traversal depends only on the
//! grid geometry and the container length, never on the bytes themselves,
//! and each write is a branch-free mask-and-or.
//!
//! Because the order is fixed, a reader that knows nothing about the message
//! can read the fixed-size container header first and learn from it how many
//! more bytes to read.

use crate::pixels::PixelGrid;
use crate::stego::capacity::{capacity_bytes, check_fits};
use crate::stego::error::StegoError;

/// Write `data` into the grid's low-order bits, starting at slot 0.
///
/// Capacity is checked before any sample is touched, so a failed call leaves
/// the grid unmodified.
///
/// # Errors
/// [`StegoError::MessageTooLarge`] if `data` does not fit.
pub fn embed(grid: &mut PixelGrid, data: &[u8]) -> Result<(), StegoError> {
    check_fits(grid, data.len())?;

    let mut slot = 0usize;
    for &byte in data {
        for bit_pos in (0..8).rev() {
            let index = grid.slot_index(slot);
            grid.set_lsb(index, (byte >> bit_pos) & 1);
            slot += 1;
        }
    }
    Ok(())
}

/// Read `len` bytes back from the grid's low-order bits, starting at slot 0.
///
/// # Errors
/// [`StegoError::ContainerCorrupted`] if the grid holds fewer than `len`
/// bytes; a length that cannot fit means the image does not carry a valid
/// container.
pub fn extract(grid: &PixelGrid, len: usize) -> Result<Vec<u8>, StegoError> {
    if len > capacity_bytes(grid) {
        return Err(StegoError::ContainerCorrupted);
    }

    let mut out = Vec::with_capacity(len);
    let mut slot = 0usize;
    for _ in 0..len {
        let mut byte = 0u8;
        for _ in 0..8 {
            byte = (byte << 1) | grid.lsb(grid.slot_index(slot));
            slot += 1;
        }
        out.push(byte);
    }
    Ok(out)
}
