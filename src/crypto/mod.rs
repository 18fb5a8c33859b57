//! Cryptographic primitives.
//!
//! Padding, AES-CBC, HMAC-SHA256, constant-time comparison, randomness and
//! the key derivation functions behind password hashing strategies. These
//! have fixed contracts; the token and password modules build on them.

pub mod aes_cbc;
pub mod compare;
pub mod kdf;
pub mod pkcs7;
pub mod rng;
pub mod sig;

pub use aes_cbc::{decrypt, encrypt};
pub use compare::constant_time_eq;
pub use rng::{OsRandom, RandomSource, random_bytes};
pub use sig::{compute_sha256, validate_sha256};

/// AES block size, also the IV length (16 bytes).
pub const BLOCK_LEN: usize = 16;
/// Accepted AES key lengths (AES-128, AES-192, AES-256).
pub const KEY_LENS: [usize; 3] = [16, 24, 32];
/// Length of an HMAC-SHA256 signature (32 bytes).
pub const SIGNATURE_LEN: usize = 32;
/// Default password salt length (32 bytes).
pub const SALT_LEN: usize = 32;
/// Shortest salt any strategy accepts (8 bytes, the Argon2 minimum).
pub const MIN_SALT_LEN: usize = 8;
/// Longest salt a hasher will generate (1 KiB).
pub const MAX_SALT_LEN: usize = 1024;
