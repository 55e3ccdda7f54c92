// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Hide/reveal pipelines.
//!
//! Hide: decode → check capacity → derive key → encrypt → build container →
//! embed → encode. Reveal: decode → extract header → parse header → extract
//! container → parse container → derive key → decrypt.
//!
//! Every step returns early on failure. The grid is only mutated by the
//! embed step, after every check has passed, and only the final encode
//! produces output bytes, so a failed hide never yields a partial image and a
//! failed reveal never yields partial plaintext.
//!
//! The pipelines own all of their state; an [`Engine`] can be shared freely
//! across threads.

use log::{debug, warn};

use crate::pixels::{self, PixelGrid};
use crate::stego::capacity::{self, message_capacity};
use crate::stego::config::Config;
use crate::stego::container::{self, Header, HEADER_LEN};
use crate::stego::crypto;
use crate::stego::error::{Field, StegoError};
use crate::stego::kdf;
use crate::stego::lsb;

/// The hide/reveal engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    config: Config,
}

impl Engine {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Hide `message` in a cover image, protected by `password`.
    ///
    /// # Arguments
    /// - `image_bytes`: PNG, BMP or GIF cover image.
    /// - `message`: The plaintext to hide. Must not be empty.
    /// - `password`: Used with a fresh random salt to derive the key.
    ///
    /// # Returns
    /// PNG bytes of the stego-image, same dimensions and layout as the cover.
    ///
    /// # Errors
    /// - [`StegoError::EmptyInput`] if any input is empty.
    /// - [`StegoError::InvalidImage`] if the cover is not a supported lossless image.
    /// - [`StegoError::MessageTooLarge`] if the message exceeds the image's capacity.
    /// - [`StegoError::Internal`] if a primitive fails unexpectedly.
    pub fn hide(&self, image_bytes: &[u8], message: &str, password: &str) -> Result<Vec<u8>, StegoError> {
        let result = self.hide_impl(image_bytes, message, password);
        if let Err(e) = &result {
            warn!("hide failed: {:?}: {e}", e.kind());
        }
        result
    }

    /// Recover the message hidden by [`Engine::hide`].
    ///
    /// # Errors
    /// - [`StegoError::EmptyInput`] if the image or password is empty.
    /// - [`StegoError::InvalidImage`] if the image cannot be decoded.
    /// - [`StegoError::ContainerCorrupted`] if no well-formed container is present.
    /// - [`StegoError::DecryptionFailed`] if the password is wrong or the data was modified.
    /// - [`StegoError::InvalidUtf8`] if the authenticated plaintext is not UTF-8.
    pub fn reveal(&self, image_bytes: &[u8], password: &str) -> Result<String, StegoError> {
        let result = reveal_impl(image_bytes, password);
        if let Err(e) = &result {
            warn!("reveal failed: {:?}", e.kind());
        }
        result
    }

    /// Largest message (in bytes) the given cover image can carry.
    pub fn capacity(&self, image_bytes: &[u8]) -> Result<usize, StegoError> {
        if image_bytes.is_empty() {
            return Err(StegoError::EmptyInput(Field::Image));
        }
        let grid = pixels::decode(image_bytes)?;
        Ok(message_capacity(&grid))
    }

    fn hide_impl(&self, image_bytes: &[u8], message: &str, password: &str) -> Result<Vec<u8>, StegoError> {
        require(image_bytes, Field::Image)?;
        require(message.as_bytes(), Field::Message)?;
        require(password.as_bytes(), Field::Password)?;

        // 1. Decode the cover.
        let mut grid = pixels::decode(image_bytes)?;
        debug!(
            "hide: decoded {}x{} {:?} {}-bit",
            grid.width(),
            grid.height(),
            grid.layout(),
            grid.bit_depth().bits()
        );

        // 2. Check capacity before any key material exists or any bit is written.
        let container_len = container::container_len(message.len());
        capacity::check_fits(&grid, container_len)?;
        let ciphertext_len = u32::try_from(message.len()).map_err(|_| StegoError::MessageTooLarge {
            needed: container_len,
            available: capacity::capacity_bytes(&grid),
        })?;
        debug!("hide: container {container_len} of {} bytes", capacity::capacity_bytes(&grid));

        // 3-5. Derive key, encrypt and build the container. The key is
        //      dropped (and zeroed) at the end of this block.
        let container_bytes = {
            let header = Header {
                kdf: self.config.kdf,
                salt: crypto::fresh_salt(),
                nonce: crypto::fresh_nonce(),
                ciphertext_len,
            };
            let key = kdf::derive_key(password, &header.salt, &header.kdf)?;
            let (ciphertext, tag) = crypto::encrypt(&key, &header.nonce, &header.to_bytes(), message.as_bytes())?;
            container::serialize(&header, &tag, &ciphertext)
        };

        // 6. Embed.
        lsb::embed(&mut grid, &container_bytes)?;

        // 7. Encode as PNG.
        let stego = pixels::encode(grid)?;
        debug!("hide: wrote {} byte PNG", stego.len());
        Ok(stego)
    }
}

fn reveal_impl(image_bytes: &[u8], password: &str) -> Result<String, StegoError> {
    require(image_bytes, Field::Image)?;
    require(password.as_bytes(), Field::Password)?;

    // 1. Decode.
    let grid = pixels::decode(image_bytes)?;
    debug!("reveal: decoded {}x{} {:?}", grid.width(), grid.height(), grid.layout());

    // 2-5. Extract and parse the container.
    let parsed = read_container(&grid)?;
    debug!("reveal: container with {} byte ciphertext", parsed.ciphertext.len());

    // 6-7. Derive key and decrypt. The key is dropped right after decryption.
    let plaintext = {
        let key = kdf::derive_key(password, &parsed.header.salt, &parsed.header.kdf)?;
        crypto::decrypt(
            &key,
            &parsed.header.nonce,
            &parsed.header_bytes,
            &parsed.ciphertext,
            &parsed.tag,
        )?
    };

    let text = std::str::from_utf8(&plaintext).map_err(|_| StegoError::InvalidUtf8)?;
    Ok(text.to_owned())
}

/// Read the fixed header, then exactly as many bytes as it announces.
fn read_container(grid: &PixelGrid) -> Result<container::Container, StegoError> {
    let prefix = lsb::extract(grid, HEADER_LEN)?;
    let header = container::parse_header(&prefix)?;
    let full = lsb::extract(grid, header.container_len())?;
    container::parse(&full)
}

fn require(value: &[u8], field: Field) -> Result<(), StegoError> {
    if value.is_empty() {
        return Err(StegoError::EmptyInput(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stego::kdf::KdfParams;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn engine() -> Engine {
        Engine::new(Config::with_kdf(KdfParams { m_cost_kib: 64, t_cost: 1, p_cost: 1 }))
    }

    fn cover_png(w: u32, h: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(w, h, |x, y| Rgb([(x * 3) as u8, (y * 5) as u8, (x ^ y) as u8]));
        let mut out = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn roundtrip_basic() {
        let cover = cover_png(64, 64);
        let stego = engine().hide(&cover, "Hello, steganography!", "pass").unwrap();
        assert_eq!(engine().reveal(&stego, "pass").unwrap(), "Hello, steganography!");
    }

    #[test]
    fn empty_inputs_rejected() {
        let cover = cover_png(32, 32);
        assert_eq!(engine().hide(&[], "m", "p"), Err(StegoError::EmptyInput(Field::Image)));
        assert_eq!(engine().hide(&cover, "", "p"), Err(StegoError::EmptyInput(Field::Message)));
        assert_eq!(engine().hide(&cover, "m", ""), Err(StegoError::EmptyInput(Field::Password)));
        assert_eq!(engine().reveal(&cover, ""), Err(StegoError::EmptyInput(Field::Password)));
        assert_eq!(engine().reveal(&[], "p"), Err(StegoError::EmptyInput(Field::Image)));
    }

    #[test]
    fn clean_cover_has_no_container() {
        let cover = cover_png(64, 64);
        assert_eq!(engine().reveal(&cover, "pass"), Err(StegoError::ContainerCorrupted));
    }

    #[test]
    fn image_smaller_than_header() {
        // 4×4 RGB holds 6 bytes, less than the 50-byte header.
        let cover = cover_png(4, 4);
        assert_eq!(engine().reveal(&cover, "pass"), Err(StegoError::ContainerCorrupted));
        assert!(matches!(engine().hide(&cover, "x", "pass"), Err(StegoError::MessageTooLarge { .. })));
    }

    #[test]
    fn capacity_matches_hide_limit() {
        let cover = cover_png(20, 20); // 150 bytes → 84 byte message capacity
        let cap = engine().capacity(&cover).unwrap();
        assert_eq!(cap, 150 - container::OVERHEAD);
        assert!(engine().hide(&cover, &"a".repeat(cap), "p").is_ok());
        assert!(engine().hide(&cover, &"a".repeat(cap + 1), "p").is_err());
    }
}
