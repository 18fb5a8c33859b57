//! Token text layouts.
//!
//! ```text
//! record: KIND "." BASE64URL(payload) "." RFC3339(expiry)
//! wire:   BASE64URL(hmac) "." BASE64URL(iv || ciphertext)
//! ```
//!
//! Base64 here is the URL-safe alphabet without padding, which never
//! contains `.`; only the kind has to keep the separator out.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, SecondsFormat, Utc};

pub const SEPARATOR: char = '.';

pub fn encode_record(kind: &str, payload: &[u8], expiry: DateTime<Utc>) -> String {
    format!(
        "{kind}{SEPARATOR}{}{SEPARATOR}{}",
        URL_SAFE_NO_PAD.encode(payload),
        expiry.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

/// Splits a plaintext record into its kind, encoded payload and expiry.
pub fn split_record(record: &str) -> Option<(&str, &str, &str)> {
    let mut parts = record.splitn(3, SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(kind), Some(payload), Some(expiry)) => Some((kind, payload, expiry)),
        _ => None,
    }
}

pub fn parse_expiry(expiry: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(expiry)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

pub fn encode_wire(signature: &[u8], ciphertext: &[u8]) -> String {
    format!(
        "{}{SEPARATOR}{}",
        URL_SAFE_NO_PAD.encode(signature),
        URL_SAFE_NO_PAD.encode(ciphertext)
    )
}

/// Splits a wire token on its first separator.
pub fn split_wire(token: &str) -> Option<(&str, &str)> {
    token.split_once(SEPARATOR)
}

pub fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    URL_SAFE_NO_PAD.decode(segment).ok()
}
