use aes::{Aes128, Aes192, Aes256};
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::NoPadding};
use zeroize::Zeroizing;

use super::{BLOCK_LEN, pkcs7, rng::random_bytes};
use crate::error::CryptoError;

fn check_key(key: &[u8]) -> Result<(), CryptoError> {
    match key.len() {
        16 | 24 | 32 => Ok(()),
        n => Err(CryptoError::InvalidKeyLength(n)),
    }
}

/// Encrypt plaintext
///
/// Output is a fresh random IV followed by the AES-CBC encryption of the
/// PKCS#7 padded plaintext.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    check_key(key)?;
    let iv = random_bytes(BLOCK_LEN)?;
    encrypt_with_iv(key, &iv, plaintext)
}

pub(crate) fn encrypt_with_iv(
    key: &[u8],
    iv: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let padded = Zeroizing::new(pkcs7::pad(plaintext, BLOCK_LEN)?);

    let ciphertext = match key.len() {
        16 => cbc::Encryptor::<Aes128>::new_from_slices(key, iv)
            .map_err(|_| CryptoError::InvalidKeyLength(key.len()))?
            .encrypt_padded_vec_mut::<NoPadding>(&padded),
        24 => cbc::Encryptor::<Aes192>::new_from_slices(key, iv)
            .map_err(|_| CryptoError::InvalidKeyLength(key.len()))?
            .encrypt_padded_vec_mut::<NoPadding>(&padded),
        32 => cbc::Encryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(|_| CryptoError::InvalidKeyLength(key.len()))?
            .encrypt_padded_vec_mut::<NoPadding>(&padded),
        n => return Err(CryptoError::InvalidKeyLength(n)),
    };

    let mut out = Vec::with_capacity(iv.len() + ciphertext.len());
    out.extend_from_slice(iv);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypt ciphertext
///
/// Expects the layout produced by [`encrypt`]: IV, then at least one
/// ciphertext block.
pub fn decrypt(key: &[u8], data: &[u8]) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    check_key(key)?;

    if data.len() < 2 * BLOCK_LEN || data.len() % BLOCK_LEN != 0 {
        return Err(CryptoError::InvalidDataLength(data.len()));
    }
    let (iv, ciphertext) = data.split_at(BLOCK_LEN);

    let padded = match key.len() {
        16 => cbc::Decryptor::<Aes128>::new_from_slices(key, iv)
            .map_err(|_| CryptoError::InvalidKeyLength(key.len()))?
            .decrypt_padded_vec_mut::<NoPadding>(ciphertext),
        24 => cbc::Decryptor::<Aes192>::new_from_slices(key, iv)
            .map_err(|_| CryptoError::InvalidKeyLength(key.len()))?
            .decrypt_padded_vec_mut::<NoPadding>(ciphertext),
        32 => cbc::Decryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(|_| CryptoError::InvalidKeyLength(key.len()))?
            .decrypt_padded_vec_mut::<NoPadding>(ciphertext),
        n => return Err(CryptoError::InvalidKeyLength(n)),
    }
    .map_err(|_| CryptoError::InvalidDataLength(ciphertext.len()))?;
    let padded = Zeroizing::new(padded);

    let plaintext = pkcs7::unpad(&padded, BLOCK_LEN)?;
    Ok(Zeroizing::new(plaintext.to_vec()))
}
