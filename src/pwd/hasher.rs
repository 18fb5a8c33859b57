use crate::{
    config::HashingConfig,
    crypto::{MAX_SALT_LEN, MIN_SALT_LEN, OsRandom, RandomSource},
    error::HashError,
    format::PasswordHash,
    pwd::strategy::Strategy,
};

/// Produces new password hashes under one fixed strategy.
///
/// The strategy is resolved when the hasher is built, so a bad identifier
/// fails at startup instead of on the first password.
#[derive(Debug, Clone)]
pub struct PasswordHasher<R = OsRandom> {
    strategy: Strategy,
    salt_len: usize,
    rng: R,
}

impl PasswordHasher {
    pub fn new(strategy: &str) -> Result<Self, HashError> {
        Self::from_config(&HashingConfig::with_strategy(strategy))
    }

    pub fn from_config(config: &HashingConfig) -> Result<Self, HashError> {
        Self::with_random(config.strategy()?, config.salt_len, OsRandom)
    }
}

impl<R: RandomSource> PasswordHasher<R> {
    pub fn with_random(strategy: Strategy, salt_len: usize, rng: R) -> Result<Self, HashError> {
        if salt_len < MIN_SALT_LEN {
            return Err(HashError::SaltTooShort {
                len: salt_len,
                min: MIN_SALT_LEN,
            });
        }
        if salt_len > MAX_SALT_LEN {
            return Err(HashError::SaltTooLong {
                len: salt_len,
                max: MAX_SALT_LEN,
            });
        }

        Ok(Self {
            strategy,
            salt_len,
            rng,
        })
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn salt_len(&self) -> usize {
        self.salt_len
    }

    /// Hashes `password` with a fresh salt and returns the storable string.
    pub fn compute_hash(&self, password: &str) -> Result<String, HashError> {
        let mut salt = vec![0u8; self.salt_len];
        self.rng.fill(&mut salt)?;

        let hash = self.strategy.derive(password.as_bytes(), &salt)?;

        Ok(PasswordHash::new(self.strategy.id(), salt, hash.to_vec()).to_string())
    }
}
