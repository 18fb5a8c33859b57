//! Password hashing strategies.
//!
//! A strategy identifier names a KDF family followed by its `/`-separated
//! parameters, numbers in base-62:
//!
//! ```text
//! pbkdf2/hmacsha256/<iterations>/<key length>
//! argon2id/<memory KiB>/<time cost>/<parallelism>/<key length>
//! ```
//!
//! Supporting another family means adding a [`Family`] variant, its prefix
//! and its parameter parser; hashers and validators stay untouched.

use std::{fmt, str::FromStr};

use serde::Serialize;
use zeroize::Zeroizing;

use crate::{
    config::StrategyLimits,
    crypto::kdf::{Argon2Params, PBKDF2_PRF, Pbkdf2Params},
    error::HashError,
    format::base62,
};

/// 1000 iterations of PBKDF2-HMAC-SHA256 producing a 64 byte key.
pub const DEFAULT_STRATEGY: &str = "pbkdf2/hmacsha256/G8/12";

const PARAM_SEPARATOR: char = '/';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Pbkdf2,
    Argon2id,
}

impl Family {
    pub const ALL: [Family; 2] = [Family::Pbkdf2, Family::Argon2id];

    pub fn prefix(self) -> &'static str {
        match self {
            Family::Pbkdf2 => "pbkdf2",
            Family::Argon2id => "argon2id",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.prefix() == prefix)
    }

    fn parse_params(self, params: &[&str]) -> Result<Kdf, HashError> {
        match (self, params) {
            (Family::Pbkdf2, [prf, iterations, key_len]) => {
                if *prf != PBKDF2_PRF {
                    return Err(unsupported(format!("unsupported pbkdf2 function {prf:?}")));
                }
                let params = Pbkdf2Params::new(number(iterations)?, number(key_len)?)?;
                Ok(Kdf::Pbkdf2(params))
            }
            (Family::Argon2id, [mem_cost_kib, time_cost, parallelism, key_len]) => {
                let params = Argon2Params::new(
                    number(mem_cost_kib)?,
                    number(time_cost)?,
                    number(parallelism)?,
                    number(key_len)?,
                )?;
                Ok(Kdf::Argon2id(params))
            }
            (family, params) => Err(unsupported(format!(
                "wrong number of {} parameters: {}",
                family.prefix(),
                params.len()
            ))),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A key derivation function bound to its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum Kdf {
    Pbkdf2(Pbkdf2Params),
    Argon2id(Argon2Params),
}

impl Kdf {
    pub fn family(&self) -> Family {
        match self {
            Kdf::Pbkdf2(_) => Family::Pbkdf2,
            Kdf::Argon2id(_) => Family::Argon2id,
        }
    }

    pub fn key_len(&self) -> usize {
        match self {
            Kdf::Pbkdf2(p) => p.key_len(),
            Kdf::Argon2id(p) => p.key_len(),
        }
    }

    pub fn derive(&self, password: &[u8], salt: &[u8]) -> Result<Zeroizing<Vec<u8>>, HashError> {
        match self {
            Kdf::Pbkdf2(p) => Ok(p.derive(password, salt)),
            Kdf::Argon2id(p) => p.derive(password, salt),
        }
    }

    /// Canonical identifier for these parameters.
    pub fn encode(&self) -> String {
        let parts = match self {
            Kdf::Pbkdf2(p) => vec![
                PBKDF2_PRF.to_string(),
                base62::encode(p.iterations().into()),
                base62::encode(p.key_len() as u64),
            ],
            Kdf::Argon2id(p) => vec![
                base62::encode(p.mem_cost_kib().into()),
                base62::encode(p.time_cost().into()),
                base62::encode(p.parallelism().into()),
                base62::encode(p.key_len() as u64),
            ],
        };
        format!("{}/{}", self.family().prefix(), parts.join("/"))
    }
}

/// A parsed strategy identifier.
///
/// The identifier text is kept verbatim: upgrade detection compares it
/// byte for byte with the configured default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strategy {
    id: String,
    kdf: Kdf,
}

impl Strategy {
    pub fn parse(id: &str) -> Result<Self, HashError> {
        let mut segments = id.split(PARAM_SEPARATOR);
        let prefix = segments.next().unwrap_or_default();

        let family = Family::from_prefix(prefix)
            .ok_or_else(|| unsupported(format!("unknown strategy family {prefix:?}")))?;

        let params: Vec<&str> = segments.collect();
        let kdf = family.parse_params(&params)?;

        Ok(Self {
            id: id.to_string(),
            kdf,
        })
    }

    pub fn pbkdf2(iterations: u32, key_len: usize) -> Result<Self, HashError> {
        Ok(Self::from_kdf(Kdf::Pbkdf2(Pbkdf2Params::new(
            iterations, key_len,
        )?)))
    }

    pub fn argon2id(
        mem_cost_kib: u32,
        time_cost: u32,
        parallelism: u32,
        key_len: usize,
    ) -> Result<Self, HashError> {
        Ok(Self::from_kdf(Kdf::Argon2id(Argon2Params::new(
            mem_cost_kib,
            time_cost,
            parallelism,
            key_len,
        )?)))
    }

    pub fn from_kdf(kdf: Kdf) -> Self {
        Self {
            id: kdf.encode(),
            kdf,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kdf(&self) -> &Kdf {
        &self.kdf
    }

    pub fn family(&self) -> Family {
        self.kdf.family()
    }

    pub fn derive(&self, password: &[u8], salt: &[u8]) -> Result<Zeroizing<Vec<u8>>, HashError> {
        self.kdf.derive(password, salt)
    }

    pub fn check_limits(&self, limits: &StrategyLimits) -> Result<(), HashError> {
        limits.check(&self.kdf)
    }

    pub fn info(&self) -> StrategyInfo {
        StrategyInfo {
            strategy: self.id.clone(),
            kdf: self.kdf,
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::from_kdf(Kdf::Pbkdf2(Pbkdf2Params::default()))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl FromStr for Strategy {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Summary of a strategy, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyInfo {
    pub strategy: String,
    #[serde(flatten)]
    pub kdf: Kdf,
}

fn number<T: TryFrom<u64>>(encoded: &str) -> Result<T, HashError> {
    base62::decode(encoded)
        .and_then(|n| T::try_from(n).ok())
        .ok_or_else(|| unsupported(format!("invalid strategy parameter {encoded:?}")))
}

fn unsupported(reason: String) -> HashError {
    HashError::UnsupportedStrategy(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_family_fails() {
        for id in ["unknown", "", "scrypt/1/2/3", "pbkdf", "pbkdf2x/hmacsha256/1/1"] {
            assert!(
                matches!(Strategy::parse(id), Err(HashError::UnsupportedStrategy(_))),
                "{id:?} should not resolve"
            );
        }
    }

    #[test]
    fn known_family_resolves() {
        let strategy = Strategy::parse("pbkdf2/hmacsha256/1/1").unwrap();
        assert_eq!(strategy.family(), Family::Pbkdf2);
        assert_eq!(strategy.kdf().key_len(), 1);
    }

    #[test]
    fn default_strategy_decodes() {
        let strategy = Strategy::parse(DEFAULT_STRATEGY).unwrap();
        match strategy.kdf() {
            Kdf::Pbkdf2(p) => {
                assert_eq!(p.iterations(), 1000);
                assert_eq!(p.key_len(), 64);
            }
            other => panic!("unexpected kdf {other:?}"),
        }
        assert_eq!(Strategy::default().id(), DEFAULT_STRATEGY);
    }

    #[test]
    fn malformed_parameters_fail() {
        for id in [
            "pbkdf2",
            "pbkdf2/hmacsha256",
            "pbkdf2/hmacsha256/G8",
            "pbkdf2/hmacsha256/G8/12/3",
            "pbkdf2/hmacsha512/G8/12",
            "pbkdf2/hmacsha256/G-8/12",
            "pbkdf2/hmacsha256//12",
            "pbkdf2/hmacsha256/0/12",
            "pbkdf2/hmacsha256/zzzzzz/12",
            "argon2id/100/1/1",
            "argon2id/0/0/0/W",
        ] {
            assert!(Strategy::parse(id).is_err(), "{id:?} should not resolve");
        }
    }

    #[test]
    fn constructors_build_canonical_ids() {
        assert_eq!(Strategy::pbkdf2(1000, 64).unwrap().id(), DEFAULT_STRATEGY);
        assert_eq!(Strategy::pbkdf2(9, 10).unwrap().id(), "pbkdf2/hmacsha256/9/A");

        let argon = Strategy::argon2id(65536, 3, 1, 32).unwrap();
        assert_eq!(argon.id(), "argon2id/H32/3/1/W");
        assert_eq!(Strategy::parse(argon.id()).unwrap(), argon);
    }

    #[test]
    fn id_is_kept_verbatim() {
        let padded = Strategy::parse("pbkdf2/hmacsha256/0G8/12").unwrap();
        assert_eq!(padded.id(), "pbkdf2/hmacsha256/0G8/12");
        assert_eq!(padded.kdf(), Strategy::default().kdf());
        assert_ne!(padded, Strategy::default());
    }

    #[test]
    fn info_serializes_parameters() {
        let info = Strategy::parse(DEFAULT_STRATEGY).unwrap().info();
        let json = serde_json::to_value(&info).unwrap();

        assert_eq!(json["strategy"], DEFAULT_STRATEGY);
        assert_eq!(json["family"], "pbkdf2");
        assert_eq!(json["iterations"], 1000);
        assert_eq!(json["key_len"], 64);
    }
}
