use std::{fmt, str::FromStr};

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::error::HashError;

/// A stored password hash: `STRATEGY "." BASE64(salt) "." BASE64(hash)`.
///
/// Uses the standard, padded base64 alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash {
    strategy: String,
    salt: Vec<u8>,
    hash: Vec<u8>,
}

impl PasswordHash {
    pub fn new(strategy: impl Into<String>, salt: Vec<u8>, hash: Vec<u8>) -> Self {
        Self {
            strategy: strategy.into(),
            salt,
            hash,
        }
    }

    /// The strategy identifier exactly as stored.
    pub fn strategy(&self) -> &str {
        &self.strategy
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn hash(&self) -> &[u8] {
        &self.hash
    }
}

impl fmt::Display for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            self.strategy,
            STANDARD.encode(&self.salt),
            STANDARD.encode(&self.hash)
        )
    }
}

impl FromStr for PasswordHash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || HashError::Malformed;

        let parts: Vec<&str> = s.split('.').collect();
        let [strategy, salt, hash] = parts.as_slice() else {
            return Err(invalid());
        };
        if strategy.is_empty() {
            return Err(invalid());
        }

        let salt = STANDARD.decode(salt).map_err(|_| invalid())?;
        let hash = STANDARD.decode(hash).map_err(|_| invalid())?;

        Ok(Self::new(*strategy, salt, hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_correctly() {
        let parsed: PasswordHash = "blah.AQMF.CQUA".parse().unwrap();

        assert_eq!(parsed.strategy(), "blah");
        assert_eq!(parsed.salt(), &[1, 3, 5]);
        assert_eq!(parsed.hash(), &[9, 5, 0]);
    }

    #[test]
    fn display_roundtrips() {
        let stored = "pbkdf2/hmacsha256/9/A.dg5ahoV589/FfUTOh1BmO6CJRWl5yY/HkPpjLC7KRyM=.4xR4SWrsQI+InQ==";
        let parsed: PasswordHash = stored.parse().unwrap();

        assert_eq!(parsed.strategy(), "pbkdf2/hmacsha256/9/A");
        assert_eq!(parsed.salt().len(), 32);
        assert_eq!(parsed.hash().len(), 10);
        assert_eq!(parsed.to_string(), stored);
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in [
            "",
            "strategy",
            "strategy.AQMF",
            "strategy.AQMF.CQUA.extra",
            ".AQMF.CQUA",
            "strategy.not base64!.CQUA",
            "strategy.AQMF.CQ",
            "strategy.AQ-_.CQUA",
        ] {
            assert_eq!(
                bad.parse::<PasswordHash>(),
                Err(HashError::Malformed),
                "{bad:?} should not parse"
            );
        }
    }
}
