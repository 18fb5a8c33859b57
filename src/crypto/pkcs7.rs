//! PKCS#7 padding.
//!
//! Padding is always between 1 and `block_size` bytes, so input that is
//! already block aligned grows by a whole block. Each padding byte holds the
//! padding length, which caps the block size at 255.

use crate::error::CryptoError;

const MAX_BLOCK_SIZE: usize = u8::MAX as usize;

fn check_block_size(block_size: usize) -> Result<(), CryptoError> {
    if block_size == 0 || block_size > MAX_BLOCK_SIZE {
        return Err(CryptoError::InvalidBlockSize(block_size));
    }
    Ok(())
}

/// Pads `data` to a multiple of `block_size`.
pub fn pad(data: &[u8], block_size: usize) -> Result<Vec<u8>, CryptoError> {
    check_block_size(block_size)?;

    let pad_len = block_size - data.len() % block_size;

    let mut padded = Vec::with_capacity(data.len() + pad_len);
    padded.extend_from_slice(data);
    padded.resize(data.len() + pad_len, pad_len as u8);
    Ok(padded)
}

/// Strips and checks the padding added by [`pad`].
pub fn unpad(data: &[u8], block_size: usize) -> Result<&[u8], CryptoError> {
    check_block_size(block_size)?;

    if data.is_empty() || data.len() % block_size != 0 {
        return Err(CryptoError::InvalidDataLength(data.len()));
    }

    let pad_len = data[data.len() - 1] as usize;
    if pad_len == 0 || pad_len > block_size {
        return Err(CryptoError::InvalidPadding);
    }

    let (plain, padding) = data.split_at(data.len() - pad_len);
    if padding.iter().any(|&b| b as usize != pad_len) {
        return Err(CryptoError::InvalidPadding);
    }

    Ok(plain)
}
