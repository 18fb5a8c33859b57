use argon2::{Algorithm, Argon2, Params, Version};
use serde::Serialize;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::HashError;

/// The only PRF accepted for PBKDF2.
pub const PBKDF2_PRF: &str = "hmacsha256";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pbkdf2Params {
    iterations: u32,
    key_len: usize,
}

impl Default for Pbkdf2Params {
    fn default() -> Self {
        Self {
            iterations: 1000,
            // 64 byte derived key
            key_len: 64,
        }
    }
}

impl Pbkdf2Params {
    pub fn new(iterations: u32, key_len: usize) -> Result<Self, HashError> {
        let params = Self {
            iterations,
            key_len,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn key_len(&self) -> usize {
        self.key_len
    }

    pub fn validate(&self) -> Result<(), HashError> {
        if self.iterations < 1 {
            return Err(unsupported("pbkdf2 iterations must be >= 1"));
        }
        if self.key_len < 1 {
            return Err(unsupported("pbkdf2 key length must be >= 1"));
        }
        Ok(())
    }

    pub fn derive(&self, password: &[u8], salt: &[u8]) -> Zeroizing<Vec<u8>> {
        let mut key = Zeroizing::new(vec![0u8; self.key_len]);
        pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, self.iterations, &mut key);
        key
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Argon2Params {
    mem_cost_kib: u32,
    time_cost: u32,
    parallelism: u32,
    key_len: usize,
}

impl Argon2Params {
    pub fn new(
        mem_cost_kib: u32,
        time_cost: u32,
        parallelism: u32,
        key_len: usize,
    ) -> Result<Self, HashError> {
        let params = Self {
            mem_cost_kib,
            time_cost,
            parallelism,
            key_len,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn mem_cost_kib(&self) -> u32 {
        self.mem_cost_kib
    }

    pub fn time_cost(&self) -> u32 {
        self.time_cost
    }

    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    pub fn key_len(&self) -> usize {
        self.key_len
    }

    pub fn validate(&self) -> Result<(), HashError> {
        if self.mem_cost_kib < 8 {
            return Err(unsupported("argon2 memory cost too low"));
        }
        if self.time_cost < 1 {
            return Err(unsupported("argon2 time cost must be >= 1"));
        }
        if self.parallelism < 1 {
            return Err(unsupported("argon2 parallelism must be >= 1"));
        }
        if self.mem_cost_kib < 8 * self.parallelism {
            return Err(unsupported(
                "argon2 memory cost must be at least 8 * parallelism",
            ));
        }
        if self.key_len < 4 {
            return Err(unsupported("argon2 key length must be >= 4"));
        }
        Ok(())
    }

    pub fn derive(&self, password: &[u8], salt: &[u8]) -> Result<Zeroizing<Vec<u8>>, HashError> {
        let params = Params::new(
            self.mem_cost_kib,
            self.time_cost,
            self.parallelism,
            Some(self.key_len),
        )
        .map_err(|e| HashError::Derivation(format!("failed to construct Argon2 params: {e}")))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut key = Zeroizing::new(vec![0u8; self.key_len]);
        argon2
            .hash_password_into(password, salt, &mut key)
            .map_err(|e| HashError::Derivation(format!("argon2 key derivation failed {e}")))?;

        Ok(key)
    }
}

fn unsupported(reason: &str) -> HashError {
    HashError::UnsupportedStrategy(reason.to_string())
}
