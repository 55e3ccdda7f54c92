// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Password-based key derivation (Argon2id).
//!
//! The encryption key is derived from the password and a random per-image
//! salt. The Argon2 cost parameters travel inside the container next to the
//! salt, so the decoder always recomputes the identical key regardless of
//! the configuration it runs with.

use core::fmt;

use argon2::{Algorithm, Argon2, Params, Version};
use zeroize::Zeroizing;

use crate::stego::error::StegoError;

/// Argon2 salt length in bytes.
pub const SALT_LEN: usize = 16;
/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// Smallest memory cost accepted from a container (Argon2 minimum).
pub const MIN_M_COST_KIB: u32 = 8;
/// Largest memory cost accepted from a container (256 MiB).
pub const MAX_M_COST_KIB: u32 = 256 * 1024;
/// Largest pass count accepted from a container.
pub const MAX_T_COST: u32 = 16;
/// Largest lane count accepted from a container.
pub const MAX_P_COST: u8 = 8;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB.
    pub m_cost_kib: u32,
    /// Number of passes.
    pub t_cost: u32,
    /// Degree of parallelism (lanes).
    pub p_cost: u8,
}

impl Default for KdfParams {
    /// Argon2's recommended defaults: 19 MiB, 2 passes, 1 lane.
    fn default() -> Self {
        Self {
            m_cost_kib: Params::DEFAULT_M_COST,
            t_cost: Params::DEFAULT_T_COST,
            p_cost: Params::DEFAULT_P_COST as u8,
        }
    }
}

impl KdfParams {
    /// Whether these parameters are within the bounds a decoder will honor.
    ///
    /// Parameters read from an image are attacker-controlled; the upper
    /// bounds cap the memory and time a single reveal can be made to spend.
    pub fn is_within_bounds(&self) -> bool {
        (1..=MAX_P_COST).contains(&self.p_cost)
            && (1..=MAX_T_COST).contains(&self.t_cost)
            && (MIN_M_COST_KIB..=MAX_M_COST_KIB).contains(&self.m_cost_kib)
            && self.m_cost_kib >= 8 * u32::from(self.p_cost)
    }

    fn to_argon2(self) -> Result<Argon2<'static>, StegoError> {
        let params = Params::new(self.m_cost_kib, self.t_cost, u32::from(self.p_cost), Some(KEY_LEN))
            .map_err(|_| StegoError::Internal("invalid Argon2 parameters"))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// A 256-bit symmetric key. Zeroed on drop and never printed.
pub struct DerivedKey(Zeroizing<[u8; KEY_LEN]>);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey(<redacted>)")
    }
}

/// Derive the encryption key from password + salt.
///
/// Deterministic for identical inputs. Out-of-bounds parameters are rejected
/// before any memory is allocated.
pub fn derive_key(password: &str, salt: &[u8; SALT_LEN], params: &KdfParams) -> Result<DerivedKey, StegoError> {
    if !params.is_within_bounds() {
        return Err(StegoError::Internal("Argon2 parameters out of bounds"));
    }
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    params
        .to_argon2()?
        .hash_password_into(password.as_bytes(), salt, &mut *key)
        .map_err(|_| StegoError::Internal("Argon2 key derivation failed"))?;
    Ok(DerivedKey(key))
}
