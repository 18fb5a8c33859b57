use std::time::Duration;

use chrono::{Datelike, TimeDelta};
use zeroize::Zeroizing;

use crate::{
    clock::{Clock, SystemClock},
    crypto::{aes_cbc, sig},
    error::TokenError,
    format::token::{SEPARATOR, encode_record, encode_wire},
    token::TokenKeys,
};

/// Issues tokens.
#[derive(Debug, Clone)]
pub struct TokenGenerator<C = SystemClock> {
    clock: C,
    keys: TokenKeys,
}

impl TokenGenerator {
    pub fn new(keys: TokenKeys) -> Self {
        Self::with_clock(SystemClock, keys)
    }
}

impl<C: Clock> TokenGenerator<C> {
    pub fn with_clock(clock: C, keys: TokenKeys) -> Self {
        Self { clock, keys }
    }

    /// Creates a token of `kind` carrying `payload`, valid for `ttl`.
    ///
    /// The expiry is stored with second precision.
    pub fn generate(&self, kind: &str, payload: &[u8], ttl: Duration) -> Result<String, TokenError> {
        if kind.contains(SEPARATOR) {
            return Err(TokenError::InvalidKind(kind.to_string()));
        }

        let ttl = TimeDelta::from_std(ttl).map_err(|_| TokenError::TtlOutOfRange)?;
        let expiry = self
            .clock
            .now()
            .checked_add_signed(ttl)
            .filter(|t| t.year() <= 9999)
            .ok_or(TokenError::TtlOutOfRange)?;

        let record = Zeroizing::new(encode_record(kind, payload, expiry));

        let ciphertext = aes_cbc::encrypt(self.keys.encryption(), record.as_bytes())?;
        let signature = sig::compute_sha256(self.keys.signing(), &ciphertext)?;

        Ok(encode_wire(&signature, &ciphertext))
    }
}
