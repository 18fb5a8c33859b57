use std::fmt;

use thiserror::Error;

/// Failures of the primitive layer (padding, AES-CBC, HMAC, randomness).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("encryption key must be either 16, 24 or 32 bytes long, got {0}")]
    InvalidKeyLength(usize),
    #[error("pkcs7: invalid block size {0}")]
    InvalidBlockSize(usize),
    #[error("pkcs7: invalid data length {0}")]
    InvalidDataLength(usize),
    #[error("pkcs7: invalid padding")]
    InvalidPadding,
    #[error("OS random generator unavailable")]
    Entropy,
}

/// Why a token was turned down.
///
/// Only visible inside the crate: callers always get the same
/// [`InvalidToken`] so the rejection path cannot be used as an oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rejection {
    Empty,
    Malformed,
    Encoding,
    Signature,
    Decryption,
    Record,
    Kind,
    Timestamp,
    Expired,
    Payload,
}

impl Rejection {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Rejection::Empty => "empty",
            Rejection::Malformed => "malformed",
            Rejection::Encoding => "encoding",
            Rejection::Signature => "signature",
            Rejection::Decryption => "decryption",
            Rejection::Record => "record",
            Rejection::Kind => "kind",
            Rejection::Timestamp => "timestamp",
            Rejection::Expired => "expired",
            Rejection::Payload => "payload",
        }
    }
}

/// Opaque token rejection.
#[derive(Clone)]
pub struct InvalidToken {
    reason: Rejection,
}

impl InvalidToken {
    pub(crate) fn new(reason: Rejection) -> Self {
        Self { reason }
    }

    pub(crate) fn reason(&self) -> Rejection {
        self.reason
    }
}

// Every rejection compares equal to every other one.
impl PartialEq for InvalidToken {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for InvalidToken {}

// Debug stays opaque so the cause never leaks via `{:?}` either.
impl fmt::Debug for InvalidToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("InvalidToken")
    }
}

impl fmt::Display for InvalidToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("token is missing, invalid or has expired")
    }
}

impl std::error::Error for InvalidToken {}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("could not generate token: {0}")]
    Encryption(#[from] CryptoError),
    #[error("token kind must not contain '.': {0:?}")]
    InvalidKind(String),
    #[error("token lifetime is out of range")]
    TtlOutOfRange,
    #[error(transparent)]
    InvalidToken(#[from] InvalidToken),
}

impl TokenError {
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, TokenError::InvalidToken(_))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("unsupported password hashing strategy: {0}")]
    UnsupportedStrategy(String),
    #[error("salt of {len} bytes is too short, need at least {min}")]
    SaltTooShort { len: usize, min: usize },
    #[error("salt of {len} bytes is too long, at most {max} allowed")]
    SaltTooLong { len: usize, max: usize },
    #[error("malformed password hash")]
    Malformed,
    #[error("failed to generate salt: {0}")]
    Entropy(#[from] CryptoError),
    #[error("key derivation failed: {0}")]
    Derivation(String),
}

/// Rules a password violated, one message per rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyError {
    violations: Vec<String>,
}

impl PolicyError {
    pub(crate) fn new(violations: Vec<String>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[String] {
        &self.violations
    }
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.violations.join("; "))
    }
}

impl std::error::Error for PolicyError {}
