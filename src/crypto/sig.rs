use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::{SIGNATURE_LEN, compare::constant_time_eq};
use crate::error::CryptoError;

type HmacSha256 = Hmac<Sha256>;

/// Computes the HMAC-SHA256 signature of `msg` under `key`.
pub fn compute_sha256(key: &[u8], msg: &[u8]) -> Result<[u8; SIGNATURE_LEN], CryptoError> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
        .map_err(|_| CryptoError::InvalidKeyLength(key.len()))?;
    mac.update(msg);
    Ok(mac.finalize().into_bytes().into())
}

/// Recomputes the signature of `msg` and compares it with `signature` in
/// constant time.
pub fn validate_sha256(key: &[u8], msg: &[u8], signature: &[u8]) -> bool {
    match compute_sha256(key, msg) {
        Ok(expected) => constant_time_eq(&expected, signature),
        Err(_) => false,
    }
}
