//! Text formats.
//!
//! Base-62 integers for strategy identifiers, the token record and wire
//! layouts, and the stored password hash layout.

pub mod base62;
pub mod password;
pub mod token;

pub use password::PasswordHash;
