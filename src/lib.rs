// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! # ciphercanvas-core
//!
//! Steganography engine for hiding password-encrypted text messages in
//! lossless images (PNG, BMP, GIF). The output image is visually identical to the
//! cover: only the least-significant bit of colour samples changes.
//!
//! - Key derivation: Argon2id with a random per-image salt.
//! - Encryption: AES-256-GCM-SIV; the tag is checked before any plaintext is
//!   returned, so a wrong password and a tampered image fail the same way.
//! - Embedding: one bit per colour sample, fixed row-major order, alpha left
//!   untouched.
//!
//! The engine is synchronous and holds no global state; concurrent calls
//! share nothing.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use ciphercanvas_core::{hide, reveal};
//!
//! let cover_png = std::fs::read("cover.png").unwrap();
//! let stego = hide(&cover_png, "secret message", "passphrase").unwrap();
//! let message = reveal(&stego, "passphrase").unwrap();
//! assert_eq!(message, "secret message");
//! ```

pub mod boundary;
pub mod pixels;
pub mod stego;

pub use pixels::error::PixelError;
pub use pixels::{BitDepth, ChannelLayout, PixelGrid, Samples, MAX_DIMENSION, MAX_PIXELS};
pub use stego::capacity::{capacity_bytes, message_capacity};
pub use stego::{hide, reveal, Config, Engine, ErrorKind, Field, KdfParams, StegoError};
