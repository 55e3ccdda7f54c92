// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the hide/reveal pipelines.
//!
//! [`StegoError`] covers all failure modes from image decoding through
//! encryption and container parsing. [`ErrorKind`] groups them into the
//! coarse categories callers translate into user-facing responses.

use core::fmt;

use crate::pixels::error::PixelError;

/// A required input that was missing or empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Image,
    Message,
    Password,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Message => write!(f, "message"),
            Self::Password => write!(f, "password"),
        }
    }
}

/// Errors that can occur during hiding or revealing.
///
/// No variant ever carries password, key or plaintext material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// A required input was empty.
    EmptyInput(Field),
    /// The image could not be decoded or re-encoded.
    InvalidImage(PixelError),
    /// The message does not fit into the cover image.
    MessageTooLarge {
        /// Container bytes the message would need.
        needed: usize,
        /// Container bytes the image can carry.
        available: usize,
    },
    /// No well-formed container was found in the image.
    ContainerCorrupted,
    /// Authentication failed (wrong password or tampered data).
    DecryptionFailed,
    /// The authenticated plaintext is not valid UTF-8.
    InvalidUtf8,
    /// A primitive failed in a way valid inputs cannot cause.
    Internal(&'static str),
}

/// Coarse failure categories exposed at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or empty input.
    Input,
    /// Undecodable image or malformed container.
    Format,
    /// Message too large for the image.
    CapacityExceeded,
    /// Tag verification failed.
    AuthenticationFailure,
    /// Unexpected codec or cipher failure.
    Internal,
}

impl StegoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput(_) => ErrorKind::Input,
            Self::InvalidImage(PixelError::Encode(_)) => ErrorKind::Internal,
            Self::InvalidImage(_) | Self::ContainerCorrupted | Self::InvalidUtf8 => ErrorKind::Format,
            Self::MessageTooLarge { .. } => ErrorKind::CapacityExceeded,
            Self::DecryptionFailed => ErrorKind::AuthenticationFailure,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput(field) => write!(f, "{field} is required"),
            Self::InvalidImage(e) => write!(f, "invalid image: {e}"),
            Self::MessageTooLarge { needed, available } => write!(
                f,
                "message too large for this image: {needed} bytes needed, {available} bytes available"
            ),
            Self::ContainerCorrupted => write!(f, "no valid hidden data found"),
            Self::DecryptionFailed => write!(f, "decryption failed (wrong password?)"),
            Self::InvalidUtf8 => write!(f, "hidden message is not valid UTF-8"),
            Self::Internal(what) => write!(f, "internal error: {what}"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidImage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PixelError> for StegoError {
    fn from(e: PixelError) -> Self {
        Self::InvalidImage(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(StegoError::EmptyInput(Field::Password).kind(), ErrorKind::Input);
        assert_eq!(StegoError::InvalidImage(PixelError::UnrecognizedFormat).kind(), ErrorKind::Format);
        assert_eq!(StegoError::InvalidImage(PixelError::Encode("io".into())).kind(), ErrorKind::Internal);
        assert_eq!(StegoError::ContainerCorrupted.kind(), ErrorKind::Format);
        assert_eq!(StegoError::InvalidUtf8.kind(), ErrorKind::Format);
        assert_eq!(
            StegoError::MessageTooLarge { needed: 10, available: 5 }.kind(),
            ErrorKind::CapacityExceeded
        );
        assert_eq!(StegoError::DecryptionFailed.kind(), ErrorKind::AuthenticationFailure);
        assert_eq!(StegoError::Internal("kdf").kind(), ErrorKind::Internal);
    }

    #[test]
    fn display_names_missing_field() {
        assert_eq!(StegoError::EmptyInput(Field::Message).to_string(), "message is required");
    }
}
