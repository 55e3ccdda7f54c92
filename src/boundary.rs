// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Translation of engine results for an HTTP front end.
//!
//! The engine itself knows nothing about requests. A web layer wrapping
//! `POST /api/hide` and `POST /api/reveal` uses these helpers to pick a
//! status code, a message that is safe to show the user, and a download
//! name for the stego-image.

use rand::Rng;

use crate::stego::{ErrorKind, Field, StegoError};

/// MIME type of every stego-image the engine produces.
pub const STEGO_CONTENT_TYPE: &str = "image/png";

/// Largest upload a front end should pass to the engine (16 MiB).
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Shown for every reveal failure that could hint at whether the image
/// carries hidden data at all.
pub const REVEAL_FAILED_MESSAGE: &str = "Decryption failed. Wrong password or not a CipherCanvas image.";

impl ErrorKind {
    /// HTTP status for this kind of failure.
    pub fn http_status(self) -> u16 {
        match self {
            Self::Input | Self::Format | Self::CapacityExceeded | Self::AuthenticationFailure => 400,
            Self::Internal => 500,
        }
    }
}

/// User-facing text for an engine error.
///
/// Container-format and authentication failures collapse to the same
/// message, so a caller cannot tell "wrong password" from "no hidden data".
pub fn public_message(err: &StegoError) -> String {
    match err {
        StegoError::EmptyInput(Field::Image) => "No image file provided".to_owned(),
        StegoError::EmptyInput(Field::Message) => "Message cannot be empty".to_owned(),
        StegoError::EmptyInput(Field::Password) => "Password is required".to_owned(),
        StegoError::InvalidImage(e) if err.kind() == ErrorKind::Format => {
            format!("Invalid image: {e}")
        }
        StegoError::MessageTooLarge { needed, available } => format!(
            "Message too large for this image: {needed} bytes needed, image has {available} bytes capacity"
        ),
        StegoError::ContainerCorrupted | StegoError::DecryptionFailed | StegoError::InvalidUtf8 => {
            REVEAL_FAILED_MESSAGE.to_owned()
        }
        StegoError::InvalidImage(_) | StegoError::Internal(_) => "Internal error".to_owned(),
    }
}

/// `(status, message)` pair for an engine error.
pub fn error_response(err: &StegoError) -> (u16, String) {
    (err.kind().http_status(), public_message(err))
}

/// Reject uploads larger than [`MAX_UPLOAD_BYTES`] before decoding.
pub fn check_upload_size(len: usize) -> Result<(), StegoError> {
    if len > MAX_UPLOAD_BYTES {
        return Err(StegoError::InvalidImage(crate::pixels::error::PixelError::ImageTooLarge));
    }
    Ok(())
}

/// Suggested download name: `ciphercanvas_stego_<8 hex digits>.png`.
pub fn stego_filename() -> String {
    let suffix: u32 = rand::thread_rng().gen();
    format!("ciphercanvas_stego_{suffix:08x}.png")
}
