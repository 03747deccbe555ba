//! Error taxonomy shared by the padding codec, the transform pipeline, and the
//! reusable handle.

use std::fmt;

use thiserror::Error;

use crate::material::BLOCK_SIZE;

/// Which piece of key material failed length validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyField {
    /// The AES-256 key.
    Key,
    /// The CBC initialisation vector.
    Iv,
}

impl fmt::Display for KeyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyField::Key => f.write_str("key"),
            KeyField::Iv => f.write_str("iv"),
        }
    }
}

/// Errors produced while encrypting or decrypting a payload.
///
/// Every failure is deterministic given its input, so none of these are worth
/// retrying without changing that input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    /// The key or IV has the wrong length.
    #[error("invalid {field} length: expected {expected} bytes, got {actual}")]
    Validation {
        field: KeyField,
        expected: usize,
        actual: usize,
    },

    /// The underlying block cipher rejected the key.
    #[error("failed to initialise AES-256 cipher")]
    CipherInit,

    /// The ciphertext text is not valid standard base64.
    #[error("invalid encoding: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// A ciphertext or padded buffer is empty or not block-aligned.
    #[error("invalid data length: {0} bytes is not a non-zero multiple of {BLOCK_SIZE}")]
    Length(usize),

    /// Padding removal failed after decryption.
    #[error("unpad failed: {0}")]
    Padding(#[from] PaddingError),

    /// The decrypted plaintext was requested as text but is not UTF-8.
    #[error("decrypted plaintext is not valid UTF-8")]
    InvalidUtf8,
}

/// Reasons a decrypted buffer carries invalid PKCS#7 padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaddingError {
    /// The trailing padding value is zero or larger than one block.
    #[error("invalid padding value {0}")]
    InvalidValue(u8),

    /// The padding value claims more bytes than the buffer holds.
    #[error("padding value {pad} exceeds data length {len}")]
    ExceedsLength { pad: usize, len: usize },

    /// A byte inside the padding run does not equal the padding value.
    #[error("inconsistent padding byte at offset {offset}: expected {expected}, found {found}")]
    InconsistentByte {
        offset: usize,
        expected: u8,
        found: u8,
    },
}
