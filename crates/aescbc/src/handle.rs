//! [`CbcHandle`]: a validated key/IV pair with a pre-expanded AES-256 key
//! schedule, shareable across threads.

use aes::Aes256;
use cbc::cipher::KeyInit;
use common::{validate_key_iv, CipherError, IvBytes, KeyBytes, IV_LEN};

use crate::cipher::{build_cipher, decode_ciphertext, into_utf8, open_decoded, seal};

/// Reusable AES-256-CBC encryptor/decryptor for one key/IV pair.
///
/// Construction validates and copies the key and IV, and expands the AES key
/// schedule once. Every later call reuses that schedule without re-validating.
///
/// The handle is read-only after construction. Each call clones the cipher into
/// its own CBC state seeded from the stored IV and allocates its own buffers, so
/// one handle can be shared (e.g. behind an `Arc`) by any number of threads
/// without a lock. Calls are independent: there is no per-call counter and the
/// IV never advances.
///
/// The same IV is used for every call. See the module docs of
/// [`crate::cipher`] for what that implies.
pub struct CbcHandle {
    key: KeyBytes,
    iv: IvBytes,
    cipher: Aes256,
}

impl CbcHandle {
    /// Validate `key` and `iv`, copy them, and build the cipher context.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Validation`] if `key` is not 32 bytes or `iv` is
    /// not 16 bytes, and [`CipherError::CipherInit`] if AES rejects the key.
    pub fn new(key: &[u8], iv: &[u8]) -> Result<Self, CipherError> {
        let (key, iv) = validate_key_iv(key, iv)?;
        let cipher = build_cipher(&key)?;
        Ok(Self { key, iv, cipher })
    }

    /// Encrypt `plaintext` and return standard base64 text.
    ///
    /// Produces exactly what [`crate::encrypt`] does for the same key and IV.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String, CipherError> {
        seal(&self.cipher, &self.iv, plaintext)
    }

    /// Decrypt base64 `text` produced under this handle's key and IV.
    ///
    /// # Errors
    ///
    /// [`CipherError::Encoding`], [`CipherError::Length`], or
    /// [`CipherError::Padding`], exactly as [`crate::decrypt`].
    pub fn decrypt(&self, text: &str) -> Result<Vec<u8>, CipherError> {
        let buf = decode_ciphertext(text)?;
        open_decoded(&self.cipher, &self.iv, buf)
    }

    /// Like [`decrypt`](Self::decrypt), but returns the plaintext as a `String`.
    pub fn decrypt_string(&self, text: &str) -> Result<String, CipherError> {
        self.decrypt(text).and_then(into_utf8)
    }

    /// The IV this handle seeds every call with.
    pub fn iv(&self) -> &[u8; IV_LEN] {
        self.iv.as_bytes()
    }
}

impl Clone for CbcHandle {
    /// Copies the key material and re-expands the key schedule from the stored
    /// key copy.
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            iv: self.iv.clone(),
            cipher: Aes256::new(self.key.as_bytes().into()),
        }
    }
}

impl std::fmt::Debug for CbcHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CbcHandle")
            .field("key", &self.key)
            .field("iv", &self.iv)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{KeyField, KEY_LEN};
    use std::sync::Arc;

    const KEY: &[u8; KEY_LEN] = b"imwl8sot7u8zvdcr6wvbwcmhrwpfb3rs";
    const IV: &[u8; IV_LEN] = b"lgd73e8vc7ah52u9";

    fn handle() -> CbcHandle {
        CbcHandle::new(KEY, IV).unwrap()
    }

    #[test]
    fn handle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CbcHandle>();
    }

    #[test]
    fn round_trip() {
        let h = handle();
        let plaintext = "Instance Test Data. 测试实例模式。".as_bytes();
        let text = h.encrypt(plaintext).unwrap();
        assert_eq!(h.decrypt(&text).unwrap(), plaintext);
        assert_eq!(h.decrypt_string(&text).unwrap(), "Instance Test Data. 测试实例模式。");
    }

    #[test]
    fn empty_round_trip() {
        let h = handle();
        let text = h.encrypt(b"").unwrap();
        assert_eq!(text.len(), 24);
        assert_eq!(h.decrypt(&text).unwrap(), b"");
    }

    #[test]
    fn matches_one_shot_functions() {
        let h = handle();
        let plaintext = b"the handle and the free functions share one pipeline";
        let from_handle = h.encrypt(plaintext).unwrap();
        let one_shot = crate::encrypt(plaintext, KEY, IV).unwrap();
        assert_eq!(from_handle, one_shot);
        assert_eq!(crate::decrypt(&from_handle, KEY, IV).unwrap(), plaintext);
        assert_eq!(h.decrypt(&one_shot).unwrap(), plaintext);
    }

    #[test]
    fn calls_are_order_independent() {
        let h = handle();
        let first = h.encrypt(b"payload").unwrap();
        for _ in 0..5 {
            h.encrypt(b"something else entirely").unwrap();
            let _ = h.decrypt("AA==");
        }
        assert_eq!(h.encrypt(b"payload").unwrap(), first);
        assert_eq!(h.iv(), IV);
    }

    #[test]
    fn new_rejects_bad_lengths() {
        for len in [5usize, 31, 33, 35] {
            let err = CbcHandle::new(&vec![0u8; len], IV).unwrap_err();
            assert!(matches!(
                err,
                CipherError::Validation { field: KeyField::Key, expected: 32, actual } if actual == len
            ));
        }
        assert!(matches!(
            CbcHandle::new(KEY, b"short"),
            Err(CipherError::Validation {
                field: KeyField::Iv,
                expected: 16,
                actual: 5,
            })
        ));
    }

    #[test]
    fn caller_buffers_are_copied() {
        let mut key = KEY.to_vec();
        let mut iv = IV.to_vec();
        let h = CbcHandle::new(&key, &iv).unwrap();
        let before = h.encrypt(b"copy on ingestion").unwrap();

        key.iter_mut().for_each(|b| *b = 0);
        iv.iter_mut().for_each(|b| *b = 0);

        assert_eq!(h.encrypt(b"copy on ingestion").unwrap(), before);
        assert_eq!(h.iv(), IV);
    }

    #[test]
    fn malformed_ciphertext_rejected() {
        let h = handle();
        assert!(matches!(h.decrypt("!!!not-base64!!!"), Err(CipherError::Encoding(_))));
        assert_eq!(h.decrypt("AA=="), Err(CipherError::Length(1)));
        assert!(matches!(
            h.decrypt("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA="),
            Err(CipherError::Padding(_))
        ));
    }

    #[test]
    fn clone_behaves_identically() {
        let h = handle();
        let c = h.clone();
        let text = h.encrypt(b"cloned").unwrap();
        assert_eq!(c.encrypt(b"cloned").unwrap(), text);
        assert_eq!(c.decrypt(&text).unwrap(), b"cloned");
    }

    #[test]
    fn debug_redacts_material() {
        let dbg = format!("{:?}", handle());
        assert!(dbg.contains("[REDACTED]"));
        assert!(!dbg.contains("imwl8sot"));
        assert!(!dbg.contains("lgd73e8v"));
    }

    #[test]
    fn shared_across_threads() {
        let h = Arc::new(handle());
        let workers: Vec<_> = (0..8)
            .map(|i| {
                let h = Arc::clone(&h);
                std::thread::spawn(move || {
                    let plaintext = format!("worker {i}");
                    for _ in 0..50 {
                        let text = h.encrypt(plaintext.as_bytes()).unwrap();
                        assert_eq!(h.decrypt_string(&text).unwrap(), plaintext);
                    }
                })
            })
            .collect();
        for w in workers {
            w.join().unwrap();
        }
    }
}
