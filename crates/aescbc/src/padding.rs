//! PKCS#7 block padding over [`BLOCK_SIZE`]-byte blocks.
//!
//! Padding always adds between 1 and [`BLOCK_SIZE`] bytes, each equal to the
//! number of bytes added. Block-aligned input therefore gains a full block, and
//! empty input becomes exactly one block.

use common::{CipherError, PaddingError, BLOCK_SIZE};

/// Return a copy of `data` padded to a positive multiple of [`BLOCK_SIZE`].
pub fn pad(data: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_SIZE - (data.len() % BLOCK_SIZE);
    let mut out = Vec::with_capacity(data.len() + pad_len);
    out.extend_from_slice(data);
    // pad_len is in 1..=BLOCK_SIZE, which always fits in a byte.
    out.resize(data.len() + pad_len, pad_len as u8);
    out
}

/// Strip and verify the padding on `data`, returning the unpadded prefix.
///
/// Every byte of the padding run is checked, not just the last one.
///
/// # Errors
///
/// - [`CipherError::Length`] if `data` is empty or not block-aligned.
/// - [`CipherError::Padding`] if the padding value is zero, larger than a
///   block, larger than `data`, or any padding byte disagrees with it.
pub fn unpad(data: &[u8]) -> Result<&[u8], CipherError> {
    let len = data.len();
    if len == 0 || len % BLOCK_SIZE != 0 {
        return Err(CipherError::Length(len));
    }

    let last = data[len - 1];
    let pad = usize::from(last);
    if pad == 0 || pad > BLOCK_SIZE {
        return Err(PaddingError::InvalidValue(last).into());
    }
    if pad > len {
        return Err(PaddingError::ExceedsLength { pad, len }.into());
    }

    let start = len - pad;
    if let Some(offset) = data[start..].iter().position(|&b| b != last) {
        return Err(PaddingError::InconsistentByte {
            offset: start + offset,
            expected: last,
            found: data[start + offset],
        }
        .into());
    }

    Ok(&data[..start])
}
