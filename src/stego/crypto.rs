// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Authenticated encryption of the hidden message.
//!
//! Uses AES-256-GCM-SIV with a detached 16-byte tag. GCM-SIV is chosen over
//! plain GCM for its nonce-misuse resistance: the nonce is random and stored
//! next to the ciphertext, so a repeated nonce must not be catastrophic.
//!
//! The container header is passed as associated data, which binds the salt,
//! KDF parameters and length field to the tag.

use aes_gcm_siv::aead::AeadInPlace;
use aes_gcm_siv::{Aes256GcmSiv, KeyInit, Nonce, Tag};
use rand::RngCore;
use zeroize::Zeroizing;

use crate::stego::error::StegoError;
use crate::stego::kdf::{DerivedKey, SALT_LEN};

/// AES-GCM-SIV nonce length in bytes.
pub const NONCE_LEN: usize = 12;
/// Authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Fresh random salt for one hide call.
pub fn fresh_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

/// Fresh random nonce for one hide call.
pub fn fresh_nonce() -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce);
    nonce
}

fn cipher_for(key: &DerivedKey) -> Result<Aes256GcmSiv, StegoError> {
    Aes256GcmSiv::new_from_slice(key.as_bytes()).map_err(|_| StegoError::Internal("invalid key length"))
}

/// Encrypt `plaintext`, returning `(ciphertext, tag)`.
///
/// The ciphertext has the same length as the plaintext.
pub fn encrypt(
    key: &DerivedKey,
    nonce: &[u8; NONCE_LEN],
    associated_data: &[u8],
    plaintext: &[u8],
) -> Result<(Vec<u8>, [u8; TAG_LEN]), StegoError> {
    let cipher = cipher_for(key)?;
    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(nonce), associated_data, &mut buffer)
        .map_err(|_| StegoError::Internal("AES-GCM-SIV encrypt failed"))?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(&tag);
    Ok((buffer, tag_bytes))
}

/// Verify the tag and decrypt.
///
/// Returns [`StegoError::DecryptionFailed`] on any mismatch, whether caused by
/// a wrong key or by modified ciphertext, tag, nonce or associated data. The
/// working buffer is zeroed on both paths, so no unauthenticated plaintext
/// escapes.
pub fn decrypt(
    key: &DerivedKey,
    nonce: &[u8; NONCE_LEN],
    associated_data: &[u8],
    ciphertext: &[u8],
    tag: &[u8; TAG_LEN],
) -> Result<Zeroizing<Vec<u8>>, StegoError> {
    let cipher = cipher_for(key)?;
    let mut buffer = Zeroizing::new(ciphertext.to_vec());
    cipher
        .decrypt_in_place_detached(Nonce::from_slice(nonce), associated_data, &mut buffer, Tag::from_slice(tag))
        .map_err(|_| StegoError::DecryptionFailed)?;
    Ok(buffer)
}
