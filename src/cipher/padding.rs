// PKCS#7 Padding
// Extends plaintext to a whole number of blocks and strips it again on decrypt

use crate::error::{CryptoError, CryptoResult};

/// Append `block_size - len % block_size` bytes, each holding that count.
/// A full block of padding is added when the input is already aligned.
pub fn pad(data: &[u8], block_size: usize) -> Vec<u8> {
    debug_assert!((1..=255).contains(&block_size));
    let pad_len = block_size - data.len() % block_size;

    let mut padded = Vec::with_capacity(data.len() + pad_len);
    padded.extend_from_slice(data);
    padded.resize(data.len() + pad_len, pad_len as u8);
    padded
}

/// Validate and remove PKCS#7 padding.
///
/// Fails with `InvalidPadding` when the data is empty, the trailing byte is
/// outside `[1, block_size]`, the data is shorter than the pad length, or any
/// of the trailing pad bytes differs from the pad length.
pub fn unpad(data: &[u8], block_size: usize) -> CryptoResult<&[u8]> {
    let &last = data.last().ok_or(CryptoError::InvalidPadding)?;
    let pad_len = last as usize;

    if pad_len == 0 || pad_len > block_size || pad_len > data.len() {
        return Err(CryptoError::InvalidPadding);
    }

    let (body, padding) = data.split_at(data.len() - pad_len);
    if padding.iter().any(|&b| b != last) {
        return Err(CryptoError::InvalidPadding);
    }

    Ok(body)
}
