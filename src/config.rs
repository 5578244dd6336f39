// Runtime configuration
// Defaults, builder overrides and a BYTECRYPT_* environment overlay

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{CryptoError, CryptoResult};
use crate::rsa::keygen::{
    validate_key_size, KeyGenConfig, DEFAULT_KEY_SIZE, DEFAULT_MAX_PRIME_CANDIDATES,
    DEFAULT_MILLER_RABIN_ROUNDS,
};

pub const ENV_KEYS_DIR: &str = "BYTECRYPT_KEYS_DIR";
pub const ENV_KEY_SIZE: &str = "BYTECRYPT_KEY_SIZE";
pub const ENV_MR_ROUNDS: &str = "BYTECRYPT_MR_ROUNDS";

pub const DEFAULT_KEYS_DIR: &str = "keys";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub keys_dir: PathBuf,
    pub key_size: u32,
    pub miller_rabin_rounds: u32,
    pub max_prime_candidates: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keys_dir: PathBuf::from(DEFAULT_KEYS_DIR),
            key_size: DEFAULT_KEY_SIZE,
            miller_rabin_rounds: DEFAULT_MILLER_RABIN_ROUNDS,
            max_prime_candidates: DEFAULT_MAX_PRIME_CANDIDATES,
        }
    }
}

impl Config {
    /// Defaults overlaid with whichever BYTECRYPT_* variables are set
    pub fn from_env() -> CryptoResult<Self> {
        Self::default().overlay(|name| env::var(name).ok())
    }

    fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> CryptoResult<Self> {
        if let Some(dir) = lookup(ENV_KEYS_DIR) {
            self.keys_dir = PathBuf::from(dir);
        }
        if let Some(value) = lookup(ENV_KEY_SIZE) {
            self.key_size = parse_var(ENV_KEY_SIZE, &value)?;
        }
        if let Some(value) = lookup(ENV_MR_ROUNDS) {
            self.miller_rabin_rounds = parse_var(ENV_MR_ROUNDS, &value)?;
        }
        Ok(self)
    }

    pub fn with_keys_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.keys_dir = dir.into();
        self
    }

    pub fn with_key_size(mut self, key_size: u32) -> Self {
        self.key_size = key_size;
        self
    }

    pub fn with_miller_rabin_rounds(mut self, rounds: u32) -> Self {
        self.miller_rabin_rounds = rounds;
        self
    }

    pub fn with_max_prime_candidates(mut self, max: u64) -> Self {
        self.max_prime_candidates = max;
        self
    }

    /// Key generation parameters, rejecting sizes the generator would refuse
    pub fn keygen(&self) -> CryptoResult<KeyGenConfig> {
        validate_key_size(self.key_size)?;
        if self.miller_rabin_rounds == 0 {
            return Err(CryptoError::InvalidConfig(
                "Miller-Rabin rounds must be at least 1".to_string(),
            ));
        }

        Ok(KeyGenConfig::default()
            .with_key_size(self.key_size)
            .with_miller_rabin_rounds(self.miller_rabin_rounds)
            .with_max_prime_candidates(self.max_prime_candidates))
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> CryptoResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CryptoError::InvalidConfig(format!("{name}={value:?} is not a valid number")))
}
