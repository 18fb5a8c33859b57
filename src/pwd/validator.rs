use tracing::{debug, warn};

use crate::{
    config::{HashingConfig, StrategyLimits},
    crypto::constant_time_eq,
    error::HashError,
    format::PasswordHash,
    pwd::strategy::Strategy,
};

/// Outcome of checking a password against a stored hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Verification {
    pub matches: bool,
    /// The password matched, but the stored hash was made with a strategy
    /// other than the current default. Rehash and store again.
    pub needs_upgrade: bool,
}

impl From<Verification> for (bool, bool) {
    fn from(v: Verification) -> Self {
        (v.matches, v.needs_upgrade)
    }
}

/// Checks passwords against stored hashes.
///
/// Each stored hash is recomputed with the strategy embedded in it, so
/// hashes made under an older default keep working. Anything wrong with
/// the stored string is a plain non-match, never an error.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    default_strategy: Strategy,
    limits: StrategyLimits,
}

impl PasswordValidator {
    pub fn new(default_strategy: &str) -> Result<Self, HashError> {
        Self::from_config(&HashingConfig::with_strategy(default_strategy))
    }

    pub fn from_config(config: &HashingConfig) -> Result<Self, HashError> {
        Ok(Self {
            default_strategy: config.strategy()?,
            limits: config.limits,
        })
    }

    pub fn default_strategy(&self) -> &Strategy {
        &self.default_strategy
    }

    pub fn validate_password(&self, password: &str, stored: &str) -> Verification {
        if password.is_empty() || stored.is_empty() {
            return Verification::default();
        }

        let record: PasswordHash = match stored.parse() {
            Ok(record) => record,
            Err(_) => {
                debug!(reason = "malformed", "stored password hash rejected");
                return Verification::default();
            }
        };

        let strategy = match Strategy::parse(record.strategy()) {
            Ok(strategy) => strategy,
            Err(e) => {
                debug!(reason = "strategy", error = %e, "stored password hash rejected");
                return Verification::default();
            }
        };

        if let Err(e) = strategy.check_limits(&self.limits) {
            warn!(strategy = strategy.id(), error = %e, "stored password hash exceeds strategy limits");
            return Verification::default();
        }

        let computed = match strategy.derive(password.as_bytes(), record.salt()) {
            Ok(computed) => computed,
            Err(e) => {
                debug!(reason = "derivation", error = %e, "stored password hash rejected");
                return Verification::default();
            }
        };

        let matches = constant_time_eq(&computed, record.hash());

        Verification {
            matches,
            needs_upgrade: matches && record.strategy() != self.default_strategy.id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pwd::{PasswordHasher, strategy::DEFAULT_STRATEGY};

    const PASSWORD: &str = "Just4Now!2019";
    const CURRENT: &str = "pbkdf2/hmacsha256/G8/12.dg5ahoV589/FfUTOh1BmO6CJRWl5yY/HkPpjLC7KRyM=.jLyCcDQoSCRAZGQ6epILRXydRYeg6kT+6GsGTuJQe9+iqkxl9cnLrMPtBig4ZuwmEhjP/uye0s0YIw6sS/xcJg==";
    const OUTDATED: &str =
        "pbkdf2/hmacsha256/9/A.dg5ahoV589/FfUTOh1BmO6CJRWl5yY/HkPpjLC7KRyM=.4xR4SWrsQI+InQ==";

    fn validator() -> PasswordValidator {
        PasswordValidator::new(DEFAULT_STRATEGY).unwrap()
    }

    #[test]
    fn correct_password_matches() {
        let result = validator().validate_password(PASSWORD, CURRENT);
        assert_eq!(<(bool, bool)>::from(result), (true, false));
    }

    #[test]
    fn wrong_password_does_not_match() {
        let result = validator().validate_password("wrong-PassWord", CURRENT);
        assert_eq!(<(bool, bool)>::from(result), (false, false));
    }

    #[test]
    fn outdated_strategy_needs_upgrade() {
        let result = validator().validate_password(PASSWORD, OUTDATED);
        assert_eq!(<(bool, bool)>::from(result), (true, true));

        let result = validator().validate_password("wrong-PassWord", OUTDATED);
        assert_eq!(<(bool, bool)>::from(result), (false, false));
    }

    #[test]
    fn stored_strategy_wins_over_default() {
        let argon = PasswordValidator::new("argon2id/12/1/1/W").unwrap();
        let result = argon.validate_password(PASSWORD, CURRENT);
        assert!(result.matches);
        assert!(result.needs_upgrade);
    }

    #[test]
    fn roundtrip_with_hasher() {
        let strategy = "pbkdf2/hmacsha256/2/W";
        let hasher = PasswordHasher::new(strategy).unwrap();
        let validator = PasswordValidator::new(strategy).unwrap();

        let stored = hasher.compute_hash("correct horse").unwrap();
        assert_eq!(
            validator.validate_password("correct horse", &stored),
            Verification {
                matches: true,
                needs_upgrade: false
            }
        );
        assert!(!validator.validate_password("correct horse!", &stored).matches);
    }

    #[test]
    fn empty_inputs_short_circuit() {
        assert_eq!(validator().validate_password("", CURRENT), Verification::default());
        assert_eq!(validator().validate_password(PASSWORD, ""), Verification::default());
    }

    #[test]
    fn malformed_hashes_do_not_match() {
        for stored in [
            "garbage",
            "a.b",
            "pbkdf2/hmacsha256/G8/12.dg5ahoV589.jLyCcDQo.extra",
            "pbkdf2/hmacsha256/G8/12.!!!.jLyC",
            "unknown/1/2.AQMF.CQUA",
            "pbkdf2/hmacsha512/G8/12.AQMF.CQUA",
            "pbkdf2/hmacsha256/G8.AQMF.CQUA",
        ] {
            assert_eq!(
                validator().validate_password(PASSWORD, stored),
                Verification::default(),
                "{stored:?}"
            );
        }
    }

    #[test]
    fn excessive_cost_is_refused_without_computing() {
        // 62^4 - 1 iterations, far over the default limit
        let stored = "pbkdf2/hmacsha256/zzzz/12.AQMF.CQUA";
        assert_eq!(
            validator().validate_password(PASSWORD, stored),
            Verification::default()
        );
    }

    #[test]
    fn truncated_hash_does_not_match() {
        let record: PasswordHash = CURRENT.parse().unwrap();
        let truncated = PasswordHash::new(
            record.strategy(),
            record.salt().to_vec(),
            record.hash()[..32].to_vec(),
        );
        assert!(
            !validator()
                .validate_password(PASSWORD, &truncated.to_string())
                .matches
        );
    }
}
