//! AES-256-CBC transform pipeline and the one-shot encrypt/decrypt functions.
//!
//! ```text
//! encrypt: plaintext ─ pad ─ CBC encrypt(iv) ─ base64 ─▶ text
//! decrypt: text ─ base64 ─ length check ─ CBC decrypt(iv) ─ unpad ─▶ plaintext
//! ```
//!
//! [`seal`] and [`open_decoded`] are shared with [`crate::CbcHandle`]; the
//! one-shot functions only add validation and key setup in front of them.
//!
//! **IV reuse:** the IV is caller-supplied and used as-is. Encrypting two
//! plaintexts that share a prefix under the same key/IV yields ciphertexts that
//! share leading blocks. There is no integrity protection beyond padding
//! validity; use an AEAD where tampering matters.

use aes::Aes256;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use cbc::cipher::{block_padding::NoPadding, BlockDecryptMut, BlockEncryptMut, InnerIvInit, KeyInit};
use common::{validate_key_iv, CipherError, IvBytes, KeyBytes, BLOCK_SIZE};
use tracing::debug;

use crate::padding;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Encrypt `plaintext` with AES-256-CBC and return standard base64 text.
///
/// The output is deterministic in `(plaintext, key, iv)`. Empty plaintext
/// produces one block of ciphertext (24 base64 characters).
///
/// # Errors
///
/// Returns [`CipherError::Validation`] if `key` is not 32 bytes or `iv` is not
/// 16 bytes, and [`CipherError::CipherInit`] if AES rejects the key.
pub fn encrypt(plaintext: &[u8], key: &[u8], iv: &[u8]) -> Result<String, CipherError> {
    let (key, iv) = validate_key_iv(key, iv)?;
    let cipher = build_cipher(&key)?;
    seal(&cipher, &iv, plaintext)
}

/// Decrypt base64 `text` produced by [`encrypt`] with the same key and IV.
///
/// # Errors
///
/// - [`CipherError::Validation`] for a bad key or IV length.
/// - [`CipherError::Encoding`] if `text` is not valid standard base64.
/// - [`CipherError::Length`] if the decoded bytes are empty or not
///   block-aligned.
/// - [`CipherError::Padding`] if the decrypted padding is invalid, which is
///   also what a wrong key or IV usually produces.
pub fn decrypt(text: &str, key: &[u8], iv: &[u8]) -> Result<Vec<u8>, CipherError> {
    let (key, iv) = validate_key_iv(key, iv)?;
    let buf = decode_ciphertext(text)?;
    let cipher = build_cipher(&key)?;
    open_decoded(&cipher, &iv, buf)
}

/// Like [`decrypt`], but returns the plaintext as a `String`.
///
/// # Errors
///
/// Everything [`decrypt`] returns, plus [`CipherError::InvalidUtf8`] if the
/// plaintext is not UTF-8.
pub fn decrypt_string(text: &str, key: &[u8], iv: &[u8]) -> Result<String, CipherError> {
    decrypt(text, key, iv).and_then(into_utf8)
}

pub(crate) fn build_cipher(key: &KeyBytes) -> Result<Aes256, CipherError> {
    Aes256::new_from_slice(key.as_bytes()).map_err(|_| CipherError::CipherInit)
}

/// Pad, encrypt, and encode `plaintext` under an already-built cipher.
///
/// The cipher is cloned into a fresh CBC encryptor seeded from `iv`, so the
/// caller's cipher and IV are never mutated and concurrent calls share nothing
/// writable.
pub(crate) fn seal(cipher: &Aes256, iv: &IvBytes, plaintext: &[u8]) -> Result<String, CipherError> {
    let mut buf = padding::pad(plaintext);
    let len = buf.len();
    Aes256CbcEnc::inner_iv_init(cipher.clone(), iv.as_bytes().into())
        .encrypt_padded_mut::<NoPadding>(&mut buf, len)
        .map_err(|_| CipherError::Length(len))?;

    let text = STANDARD.encode(&buf);
    debug!(plaintext_len = plaintext.len(), ciphertext_len = len, "payload encrypted");
    Ok(text)
}

/// Decode transport text and check it is a non-empty whole number of blocks.
pub(crate) fn decode_ciphertext(text: &str) -> Result<Vec<u8>, CipherError> {
    let buf = STANDARD.decode(text).map_err(|e| {
        debug!(error = %e, "ciphertext rejected");
        CipherError::from(e)
    })?;
    if buf.is_empty() || buf.len() % BLOCK_SIZE != 0 {
        debug!(ciphertext_len = buf.len(), "ciphertext rejected: bad length");
        return Err(CipherError::Length(buf.len()));
    }
    Ok(buf)
}

/// Decrypt a block-aligned buffer in place and strip its padding.
pub(crate) fn open_decoded(
    cipher: &Aes256,
    iv: &IvBytes,
    mut buf: Vec<u8>,
) -> Result<Vec<u8>, CipherError> {
    let len = buf.len();
    Aes256CbcDec::inner_iv_init(cipher.clone(), iv.as_bytes().into())
        .decrypt_padded_mut::<NoPadding>(&mut buf)
        .map_err(|_| CipherError::Length(len))?;

    let plaintext_len = match padding::unpad(&buf) {
        Ok(plaintext) => plaintext.len(),
        Err(e) => {
            debug!(error = %e, ciphertext_len = len, "ciphertext rejected");
            return Err(e);
        }
    };
    buf.truncate(plaintext_len);
    debug!(plaintext_len, ciphertext_len = len, "payload decrypted");
    Ok(buf)
}

pub(crate) fn into_utf8(bytes: Vec<u8>) -> Result<String, CipherError> {
    String::from_utf8(bytes).map_err(|_| CipherError::InvalidUtf8)
}
