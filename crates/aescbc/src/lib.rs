//! AES-256-CBC encryption with PKCS#7 padding and standard base64 transport
//! text.
//!
//! Two entry points share one pad → encrypt → encode pipeline:
//!
//! - [`encrypt`] / [`decrypt`]: stateless, validate the key and IV on every
//!   call.
//! - [`CbcHandle`]: validates once, keeps the expanded key schedule, and can be
//!   shared across threads without locking.
//!
//! ```
//! use aescbc::CbcHandle;
//!
//! let key = b"imwl8sot7u8zvdcr6wvbwcmhrwpfb3rs";
//! let iv = b"lgd73e8vc7ah52u9";
//!
//! let handle = CbcHandle::new(key, iv).unwrap();
//! let text = handle.encrypt(b"hello").unwrap();
//! assert_eq!(handle.decrypt(&text).unwrap(), b"hello");
//! assert_eq!(aescbc::decrypt(&text, key, iv).unwrap(), b"hello");
//! ```
//!
//! # Telemetry invariants
//!
//! - No key, IV, plaintext, or ciphertext content is ever logged; events carry
//!   lengths and error kinds only.
//! - The crate never installs a `tracing` subscriber.

pub mod cipher;
pub mod config;
pub mod handle;
pub mod padding;

pub use cipher::{decrypt, decrypt_string, encrypt};
pub use common::{CipherError, KeyField, PaddingError, BLOCK_SIZE, IV_LEN, KEY_LEN};
pub use handle::CbcHandle;
