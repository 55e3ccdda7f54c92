// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Password-protected message hiding in lossless images.
//!
//! Hide encrypts the message with AES-256-GCM-SIV under an Argon2id key
//! derived from the password and a fresh salt, wraps the result in a
//! self-describing container, and writes the container into the
//! least-significant bit of every colour sample. Reveal runs the same steps
//! backwards and fails cleanly on a wrong password or modified image.

pub mod capacity;
pub mod config;
pub mod container;
pub mod crypto;
pub mod error;
pub mod kdf;
pub mod lsb;
mod pipeline;

pub use config::{Config, LSB_BITS_PER_CHANNEL};
pub use error::{ErrorKind, Field, StegoError};
pub use kdf::KdfParams;
pub use pipeline::Engine;

/// Hide `message` in a PNG, BMP or GIF cover image using the default [`Config`].
///
/// Returns the stego-image as PNG bytes. See [`Engine::hide`].
pub fn hide(image_bytes: &[u8], message: &str, password: &str) -> Result<Vec<u8>, StegoError> {
    Engine::default().hide(image_bytes, message, password)
}

/// Recover a message hidden by [`hide`]. See [`Engine::reveal`].
pub fn reveal(image_bytes: &[u8], password: &str) -> Result<String, StegoError> {
    Engine::default().reveal(image_bytes, password)
}
