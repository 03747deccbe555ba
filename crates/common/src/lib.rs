//! Common types, size constants, and errors shared across `aescbc` crates.

pub mod error;
pub mod material;

pub use error::{CipherError, KeyField, PaddingError};
pub use material::{validate_key_iv, IvBytes, KeyBytes, BLOCK_SIZE, IV_LEN, KEY_LEN};
