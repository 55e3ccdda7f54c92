// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Container construction and parsing.
//!
//! The container is the self-describing envelope embedded into the image:
//!
//! ```text
//! [4 bytes ] magic "CCNV"
//! [1 byte  ] version (1 = Argon2id + AES-256-GCM-SIV + 1 LSB per colour sample)
//! [4 bytes ] Argon2 m_cost in KiB (BE u32)
//! [4 bytes ] Argon2 t_cost (BE u32)
//! [1 byte  ] Argon2 p_cost
//! [16 bytes] Argon2 salt
//! [12 bytes] AES-GCM-SIV nonce
//! [4 bytes ] ciphertext length (BE u32)
//! [4 bytes ] CRC-32 of everything above
//! [16 bytes] authentication tag
//! [N bytes ] ciphertext
//! ```
//!
//! The first [`HEADER_LEN`] bytes (magic through CRC) are fixed-width and are
//! the AEAD associated data. Total container size = [`OVERHEAD`] + N, fully
//! determined by the length field; there is no delimiter scanning.

use crate::stego::crypto::{NONCE_LEN, TAG_LEN};
use crate::stego::error::StegoError;
use crate::stego::kdf::{KdfParams, SALT_LEN};

/// Container magic marker.
pub const MAGIC: &[u8; 4] = b"CCNV";
/// Current container version.
pub const VERSION: u8 = 1;

const OFF_VERSION: usize = 4;
const OFF_M_COST: usize = 5;
const OFF_T_COST: usize = 9;
const OFF_P_COST: usize = 13;
const OFF_SALT: usize = 14;
const OFF_NONCE: usize = OFF_SALT + SALT_LEN; // 30
const OFF_LEN: usize = OFF_NONCE + NONCE_LEN; // 42
const OFF_CRC: usize = OFF_LEN + 4; // 46

/// Fixed header size: everything a reader needs before it knows the length.
pub const HEADER_LEN: usize = OFF_CRC + 4; // 50

/// Fixed overhead: header(50) + tag(16) = 66 bytes.
pub const OVERHEAD: usize = HEADER_LEN + TAG_LEN;

/// Total container size for a ciphertext of `ciphertext_len` bytes.
pub fn container_len(ciphertext_len: usize) -> usize {
    OVERHEAD + ciphertext_len
}

/// Fixed-width header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub kdf: KdfParams,
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    pub ciphertext_len: u32,
}

impl Header {
    /// Serialize to the fixed header bytes (including the CRC).
    ///
    /// These bytes are both the container prefix and the AEAD associated data.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[..OFF_VERSION].copy_from_slice(MAGIC);
        out[OFF_VERSION] = VERSION;
        out[OFF_M_COST..OFF_T_COST].copy_from_slice(&self.kdf.m_cost_kib.to_be_bytes());
        out[OFF_T_COST..OFF_P_COST].copy_from_slice(&self.kdf.t_cost.to_be_bytes());
        out[OFF_P_COST] = self.kdf.p_cost;
        out[OFF_SALT..OFF_NONCE].copy_from_slice(&self.salt);
        out[OFF_NONCE..OFF_LEN].copy_from_slice(&self.nonce);
        out[OFF_LEN..OFF_CRC].copy_from_slice(&self.ciphertext_len.to_be_bytes());
        let crc = crc32fast::hash(&out[..OFF_CRC]);
        out[OFF_CRC..].copy_from_slice(&crc.to_be_bytes());
        out
    }

    /// Total container size this header announces.
    pub fn container_len(&self) -> usize {
        container_len(self.ciphertext_len as usize)
    }
}

/// Parse and validate the fixed header.
///
/// `data` may be longer than the header; only the first [`HEADER_LEN`] bytes
/// are read. Rejects bad magic, unknown version, CRC mismatch and KDF
/// parameters outside the accepted bounds.
pub fn parse_header(data: &[u8]) -> Result<Header, StegoError> {
    if data.len() < HEADER_LEN {
        return Err(StegoError::ContainerCorrupted);
    }
    let header = &data[..HEADER_LEN];

    if &header[..OFF_VERSION] != MAGIC || header[OFF_VERSION] != VERSION {
        return Err(StegoError::ContainerCorrupted);
    }

    let stored_crc = be_u32(&header[OFF_CRC..]);
    if stored_crc != crc32fast::hash(&header[..OFF_CRC]) {
        return Err(StegoError::ContainerCorrupted);
    }

    let kdf = KdfParams {
        m_cost_kib: be_u32(&header[OFF_M_COST..]),
        t_cost: be_u32(&header[OFF_T_COST..]),
        p_cost: header[OFF_P_COST],
    };
    if !kdf.is_within_bounds() {
        return Err(StegoError::ContainerCorrupted);
    }

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&header[OFF_SALT..OFF_NONCE]);
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&header[OFF_NONCE..OFF_LEN]);

    Ok(Header {
        kdf,
        salt,
        nonce,
        ciphertext_len: be_u32(&header[OFF_LEN..]),
    })
}

/// Parsed container.
pub struct Container {
    pub header: Header,
    /// Raw header bytes, used as associated data on decryption.
    pub header_bytes: [u8; HEADER_LEN],
    pub tag: [u8; TAG_LEN],
    pub ciphertext: Vec<u8>,
}

/// Build a container from its parts.
///
/// `header.ciphertext_len` must equal `ciphertext.len()`; the pipeline builds
/// both from the same value.
pub fn serialize(header: &Header, tag: &[u8; TAG_LEN], ciphertext: &[u8]) -> Vec<u8> {
    debug_assert_eq!(header.ciphertext_len as usize, ciphertext.len(), "ciphertext length mismatch");

    let mut out = Vec::with_capacity(container_len(ciphertext.len()));
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(tag);
    out.extend_from_slice(ciphertext);
    out
}

/// Parse a complete container.
///
/// Strict: `data` must be exactly as long as the header announces. Any
/// truncation or trailing bytes is [`StegoError::ContainerCorrupted`].
pub fn parse(data: &[u8]) -> Result<Container, StegoError> {
    let header = parse_header(data)?;
    if data.len() != header.container_len() {
        return Err(StegoError::ContainerCorrupted);
    }

    let mut header_bytes = [0u8; HEADER_LEN];
    header_bytes.copy_from_slice(&data[..HEADER_LEN]);
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&data[HEADER_LEN..OVERHEAD]);

    Ok(Container {
        header,
        header_bytes,
        tag,
        ciphertext: data[OVERHEAD..].to_vec(),
    })
}

fn be_u32(b: &[u8]) -> u32 {
    u32::from_be_bytes([b[0], b[1], b[2], b[3]])
}
