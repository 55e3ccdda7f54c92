// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Engine configuration.

use crate::stego::kdf::KdfParams;

/// Low-order bits used per colour sample. Fixed by container version 1.
pub const LSB_BITS_PER_CHANNEL: usize = 1;

/// Settings that affect how [`Engine::hide`](crate::stego::Engine::hide)
/// produces new stego-images.
///
/// Reveal reads everything it needs from the container itself, so a stego
/// image produced under one `Config` reveals under any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// Argon2id cost parameters for new containers.
    pub kdf: KdfParams,
}

impl Config {
    pub fn with_kdf(kdf: KdfParams) -> Self {
        Self { kdf }
    }
}
