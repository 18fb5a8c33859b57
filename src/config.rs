//! Configuration.
//!
//! [`HashingConfig`] replaces any process-wide default strategy: hashers and
//! validators get their default injected at construction. [`StrategyLimits`]
//! bounds the cost a stored strategy identifier may ask for.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use base64::{Engine, engine::general_purpose::STANDARD};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::{
    crypto::{KEY_LENS, SALT_LEN},
    error::HashError,
    pwd::{
        PasswordHasher, PasswordValidator,
        strategy::{DEFAULT_STRATEGY, Kdf, Strategy},
    },
};

/// Name of the optional env file in the platform config directory.
pub const ENV_FILE_NAME: &str = "sealpass.env";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyLimits {
    pub max_pbkdf2_iterations: u32,
    pub max_key_len: usize,
    pub max_argon2_mem_kib: u32,
    pub max_argon2_time_cost: u32,
    pub max_argon2_parallelism: u32,
}

impl Default for StrategyLimits {
    fn default() -> Self {
        Self {
            max_pbkdf2_iterations: 10_000_000,
            max_key_len: 1024,
            // 1 GiB
            max_argon2_mem_kib: 1024 * 1024,
            max_argon2_time_cost: 64,
            max_argon2_parallelism: 64,
        }
    }
}

impl StrategyLimits {
    pub fn check(&self, kdf: &Kdf) -> Result<(), HashError> {
        if kdf.key_len() > self.max_key_len {
            return Err(over_limit("key length", kdf.key_len() as u64, self.max_key_len as u64));
        }

        match kdf {
            Kdf::Pbkdf2(p) => {
                if p.iterations() > self.max_pbkdf2_iterations {
                    return Err(over_limit(
                        "pbkdf2 iterations",
                        p.iterations().into(),
                        self.max_pbkdf2_iterations.into(),
                    ));
                }
            }
            Kdf::Argon2id(p) => {
                if p.mem_cost_kib() > self.max_argon2_mem_kib {
                    return Err(over_limit(
                        "argon2 memory cost",
                        p.mem_cost_kib().into(),
                        self.max_argon2_mem_kib.into(),
                    ));
                }
                if p.time_cost() > self.max_argon2_time_cost {
                    return Err(over_limit(
                        "argon2 time cost",
                        p.time_cost().into(),
                        self.max_argon2_time_cost.into(),
                    ));
                }
                if p.parallelism() > self.max_argon2_parallelism {
                    return Err(over_limit(
                        "argon2 parallelism",
                        p.parallelism().into(),
                        self.max_argon2_parallelism.into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

fn over_limit(what: &str, value: u64, max: u64) -> HashError {
    HashError::UnsupportedStrategy(format!("{what} {value} exceeds limit {max}"))
}

/// Password hashing settings shared by hashers and validators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashingConfig {
    pub default_strategy: String,
    pub salt_len: usize,
    pub limits: StrategyLimits,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            default_strategy: DEFAULT_STRATEGY.to_string(),
            salt_len: SALT_LEN,
            limits: StrategyLimits::default(),
        }
    }
}

impl HashingConfig {
    pub fn with_strategy(strategy: impl Into<String>) -> Self {
        Self {
            default_strategy: strategy.into(),
            ..Self::default()
        }
    }

    pub fn strategy(&self) -> Result<Strategy, HashError> {
        let strategy = Strategy::parse(&self.default_strategy)?;
        strategy.check_limits(&self.limits)?;
        Ok(strategy)
    }

    pub fn hasher(&self) -> Result<PasswordHasher, HashError> {
        PasswordHasher::from_config(self)
    }

    pub fn validator(&self) -> Result<PasswordValidator, HashError> {
        PasswordValidator::from_config(self)
    }
}

/// Loads `.env` from the working directory, then `sealpass.env` from the
/// platform config directory. Variables already set win over both.
///
/// Returns the files that were actually read.
pub fn load_env_files() -> Vec<PathBuf> {
    let mut loaded = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded.push(path);
    }

    if let Some(path) = user_env_file() {
        if path.is_file() && dotenvy::from_path(&path).is_ok() {
            loaded.push(path);
        }
    }

    loaded
}

pub fn user_env_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sealpass").map(|dirs| dirs.config_dir().join(ENV_FILE_NAME))
}

/// Decodes a base64 (standard alphabet) key.
pub fn decode_key(name: &str, encoded: &str) -> Result<Zeroizing<Vec<u8>>> {
    let key = STANDARD
        .decode(encoded.trim())
        .with_context(|| format!("{name} is not valid base64"))?;
    if key.is_empty() {
        bail!("{name} must not be empty");
    }
    Ok(Zeroizing::new(key))
}

/// Decodes an AES key and checks its length up front.
pub fn decode_encryption_key(name: &str, encoded: &str) -> Result<Zeroizing<Vec<u8>>> {
    let key = decode_key(name, encoded)?;
    if !KEY_LENS.contains(&key.len()) {
        bail!(
            "{name} must decode to 16, 24 or 32 bytes, got {}",
            key.len()
        );
    }
    Ok(key)
}
