//! Signed, encrypted, expiring tokens.
//!
//! A token binds an opaque payload to a kind (its purpose) and an expiry.
//! The record is encrypted with AES-CBC and the ciphertext signed with
//! HMAC-SHA256; validation checks the signature before decrypting anything.
//!
//! Kinds are meant to be a fixed set of purposes chosen by the application
//! (`"session"`, `"password-reset"`), never user input.

use std::fmt;

use zeroize::Zeroizing;

pub mod generator;
pub mod validator;

pub use generator::TokenGenerator;
pub use validator::TokenValidator;

/// The two keys a token is protected with.
///
/// The encryption key must be 16, 24 or 32 bytes; the signing key may be
/// any length.
#[derive(Clone)]
pub struct TokenKeys {
    encryption: Zeroizing<Vec<u8>>,
    signing: Zeroizing<Vec<u8>>,
}

impl TokenKeys {
    pub fn new(encryption: impl Into<Vec<u8>>, signing: impl Into<Vec<u8>>) -> Self {
        Self {
            encryption: Zeroizing::new(encryption.into()),
            signing: Zeroizing::new(signing.into()),
        }
    }

    pub(crate) fn encryption(&self) -> &[u8] {
        &self.encryption
    }

    pub(crate) fn signing(&self) -> &[u8] {
        &self.signing
    }
}

impl fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKeys")
            .field("encryption", &format_args!("<{} bytes>", self.encryption.len()))
            .field("signing", &format_args!("<{} bytes>", self.signing.len()))
            .finish()
    }
}
