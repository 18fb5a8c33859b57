//! Versioned password hashing.
//!
//! Stored hashes carry their strategy identifier, so the validator can
//! recompute old hashes after the default changes and flag them for
//! rehashing.

pub mod hasher;
pub mod policy;
pub mod strategy;
pub mod validator;

pub use hasher::PasswordHasher;
pub use policy::{Policy, Rule};
pub use strategy::{DEFAULT_STRATEGY, Family, Kdf, Strategy, StrategyInfo};
pub use validator::{PasswordValidator, Verification};
