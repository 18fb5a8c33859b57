//! Signed, encrypted, expiring tokens and versioned password hashes.
//!
//! ```no_run
//! use std::time::Duration;
//! use sealpass::{PasswordHasher, PasswordValidator, TokenGenerator, TokenKeys, TokenValidator};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let keys = TokenKeys::new([1u8; 32], b"signing key".to_vec());
//! let token = TokenGenerator::new(keys.clone()).generate("session", b"user-42", Duration::from_secs(3600))?;
//! let payload = TokenValidator::new(keys).validate("session", &token)?;
//! assert_eq!(payload, b"user-42");
//!
//! let hasher = PasswordHasher::new(sealpass::DEFAULT_STRATEGY)?;
//! let stored = hasher.compute_hash("correct horse")?;
//! let check = PasswordValidator::new(sealpass::DEFAULT_STRATEGY)?.validate_password("correct horse", &stored);
//! assert!(check.matches && !check.needs_upgrade);
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod crypto;
pub mod error;
pub mod format;
pub mod pwd;
pub mod token;

pub use crate::clock::{Clock, FixedClock, SystemClock};
pub use crate::config::{HashingConfig, StrategyLimits};
pub use crate::error::{CryptoError, HashError, InvalidToken, PolicyError, TokenError};
pub use crate::format::PasswordHash;
pub use crate::pwd::{
    DEFAULT_STRATEGY, PasswordHasher, PasswordValidator, Policy, Strategy, Verification,
};
pub use crate::token::{TokenGenerator, TokenKeys, TokenValidator};
