use tracing::debug;

use crate::{
    clock::{Clock, SystemClock},
    crypto::{aes_cbc, sig},
    error::{InvalidToken, Rejection, TokenError},
    format::token::{decode_segment, parse_expiry, split_record, split_wire},
    token::TokenKeys,
};

/// Checks tokens issued by a [`TokenGenerator`](super::TokenGenerator)
/// holding the same keys.
#[derive(Debug, Clone)]
pub struct TokenValidator<C = SystemClock> {
    clock: C,
    keys: TokenKeys,
}

impl TokenValidator {
    pub fn new(keys: TokenKeys) -> Self {
        Self::with_clock(SystemClock, keys)
    }
}

impl<C: Clock> TokenValidator<C> {
    pub fn with_clock(clock: C, keys: TokenKeys) -> Self {
        Self { clock, keys }
    }

    /// Returns the payload of `token` if it is authentic, of `expected_kind`
    /// and not yet expired.
    ///
    /// Every rejection is the same [`TokenError::InvalidToken`].
    pub fn validate(&self, expected_kind: &str, token: &str) -> Result<Vec<u8>, TokenError> {
        self.check(expected_kind, token).map_err(|reason| {
            let err = InvalidToken::new(reason);
            debug!(reason = err.reason().as_str(), "token rejected");
            TokenError::InvalidToken(err)
        })
    }

    fn check(&self, expected_kind: &str, token: &str) -> Result<Vec<u8>, Rejection> {
        if token.is_empty() {
            return Err(Rejection::Empty);
        }

        let (signature, ciphertext) = split_wire(token).ok_or(Rejection::Malformed)?;
        let signature = decode_segment(signature).ok_or(Rejection::Encoding)?;
        let ciphertext = decode_segment(ciphertext).ok_or(Rejection::Encoding)?;

        // Nothing gets decrypted before the signature checks out.
        if !sig::validate_sha256(self.keys.signing(), &ciphertext, &signature) {
            return Err(Rejection::Signature);
        }

        let plaintext = aes_cbc::decrypt(self.keys.encryption(), &ciphertext)
            .map_err(|_| Rejection::Decryption)?;
        let record = std::str::from_utf8(&plaintext).map_err(|_| Rejection::Record)?;

        let (kind, payload, expiry) = split_record(record).ok_or(Rejection::Record)?;

        if kind != expected_kind {
            return Err(Rejection::Kind);
        }

        let expiry = parse_expiry(expiry).ok_or(Rejection::Timestamp)?;
        if self.clock.now() > expiry {
            return Err(Rejection::Expired);
        }

        decode_segment(payload).ok_or(Rejection::Payload)
    }
}
