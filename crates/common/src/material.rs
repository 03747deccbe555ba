//! Key material buffers and length validation for AES-256-CBC.
//!
//! # Security invariants
//!
//! - Key and IV bytes are copied on ingestion, so later mutation of the
//!   caller's buffer cannot affect an in-flight or future operation.
//! - Both buffers are zeroed on drop and never printed, not even via `Debug`.

use crate::error::{CipherError, KeyField};

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// AES block size in bytes (16 bytes = 128 bits).
pub const BLOCK_SIZE: usize = 16;

/// Byte length of a CBC initialisation vector. Always one block.
pub const IV_LEN: usize = BLOCK_SIZE;

/// Fixed-size buffer holding exactly [`KEY_LEN`] bytes of key material.
#[derive(Clone)]
pub struct KeyBytes([u8; KEY_LEN]);

/// Fixed-size buffer holding exactly [`IV_LEN`] bytes of IV material.
#[derive(Clone)]
pub struct IvBytes([u8; IV_LEN]);

impl KeyBytes {
    /// Copy `key` into a new buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Validation`] if `key` is not [`KEY_LEN`] bytes.
    pub fn from_slice(key: &[u8]) -> Result<Self, CipherError> {
        check_len(KeyField::Key, KEY_LEN, key.len())?;
        let mut buf = [0u8; KEY_LEN];
        buf.copy_from_slice(key);
        Ok(Self(buf))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl IvBytes {
    /// Copy `iv` into a new buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Validation`] if `iv` is not [`IV_LEN`] bytes.
    pub fn from_slice(iv: &[u8]) -> Result<Self, CipherError> {
        check_len(KeyField::Iv, IV_LEN, iv.len())?;
        let mut buf = [0u8; IV_LEN];
        buf.copy_from_slice(iv);
        Ok(Self(buf))
    }

    pub fn as_bytes(&self) -> &[u8; IV_LEN] {
        &self.0
    }
}

impl Drop for KeyBytes {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl Drop for IvBytes {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for KeyBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyBytes([REDACTED])")
    }
}

impl std::fmt::Debug for IvBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("IvBytes([REDACTED])")
    }
}

/// Validate a key/IV pair and copy both into owned buffers.
///
/// The key is checked before the IV, so a pair where both are wrong reports
/// the key.
///
/// # Errors
///
/// Returns [`CipherError::Validation`] naming the first field whose length is
/// wrong, with the expected and actual lengths.
pub fn validate_key_iv(key: &[u8], iv: &[u8]) -> Result<(KeyBytes, IvBytes), CipherError> {
    let key = KeyBytes::from_slice(key)?;
    let iv = IvBytes::from_slice(iv)?;
    Ok((key, iv))
}

fn check_len(field: KeyField, expected: usize, actual: usize) -> Result<(), CipherError> {
    if actual != expected {
        return Err(CipherError::Validation {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}
