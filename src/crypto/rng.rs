use getrandom::fill;

use crate::error::CryptoError;

/// Source of cryptographically secure random bytes.
pub trait RandomSource {
    fn fill(&self, buf: &mut [u8]) -> Result<(), CryptoError>;
}

/// The operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<(), CryptoError> {
        fill(buf).map_err(|_| CryptoError::Entropy)
    }
}

/// Generate `len` random bytes from the OS generator.
pub fn random_bytes(len: usize) -> Result<Vec<u8>, CryptoError> {
    let mut buf = vec![0u8; len];
    OsRandom.fill(&mut buf)?;
    Ok(buf)
}
