// RSA Key Generation
// Implements RSA key pair generation (public and private keys)

use std::fmt;

use log::{debug, info};
use num_traits::One;
use serde::{Deserialize, Serialize};

use super::bigint::{self, decimal, from_u64, gcd, mod_inverse, random_prime, RsaBigInt};
use crate::error::{CryptoError, CryptoResult};

pub const DEFAULT_KEY_SIZE: u32 = 2048;
/// Smallest modulus that leaves room for OAEP-SHA256 and a useful chunk
pub const MIN_KEY_SIZE: u32 = 1024;
pub const DEFAULT_PUBLIC_EXPONENT: u64 = 65537;
pub const DEFAULT_MILLER_RABIN_ROUNDS: u32 = 5;
pub const DEFAULT_MAX_PRIME_CANDIDATES: u64 = 1_000_000;

/// RSA Public Key, persisted as `{ "e", "n", "key_size" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaPublicKey {
    #[serde(with = "decimal")]
    pub e: RsaBigInt, // Public exponent
    #[serde(with = "decimal")]
    pub n: RsaBigInt, // Modulus
    pub key_size: u32,
}

/// RSA Private Key, persisted as `{ "d", "n", "key_size" }`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaPrivateKey {
    #[serde(with = "decimal")]
    pub d: RsaBigInt, // Private exponent
    #[serde(with = "decimal")]
    pub n: RsaBigInt, // Modulus (same as public)
    pub key_size: u32,
}

/// The primes behind a freshly generated modulus; never persisted
#[derive(Clone, PartialEq, Eq)]
pub struct PrimeFactors {
    pub p: RsaBigInt,
    pub q: RsaBigInt,
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
    pub factors: Option<PrimeFactors>,
}

/// Parameters for [`generate_keypair`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyGenConfig {
    pub key_size: u32,
    pub public_exponent: u64,
    pub miller_rabin_rounds: u32,
    pub max_prime_candidates: u64,
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        Self {
            key_size: DEFAULT_KEY_SIZE,
            public_exponent: DEFAULT_PUBLIC_EXPONENT,
            miller_rabin_rounds: DEFAULT_MILLER_RABIN_ROUNDS,
            max_prime_candidates: DEFAULT_MAX_PRIME_CANDIDATES,
        }
    }
}

impl KeyGenConfig {
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
}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("n", &self.n)
            .field("key_size", &self.key_size)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for PrimeFactors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrimeFactors { .. }")
    }
}

impl RsaPublicKey {
    /// Build a public key, recording the modulus bit length as the key size
    pub fn new(e: RsaBigInt, n: RsaBigInt) -> Self {
        let key_size = n.bits() as u32;
        Self { e, n, key_size }
    }

    /// Byte length k of the modulus
    pub fn modulus_len(&self) -> usize {
        bigint::byte_length(&self.n)
    }

    /// Encrypt a message of any length using this public key
    pub fn encrypt(&self, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        super::encrypt::encrypt_bytes(plaintext, self)
    }
}

impl RsaPrivateKey {
    /// Build a private key, recording the modulus bit length as the key size
    pub fn new(d: RsaBigInt, n: RsaBigInt) -> Self {
        let key_size = n.bits() as u32;
        Self { d, n, key_size }
    }

    /// Byte length k of the modulus
    pub fn modulus_len(&self) -> usize {
        bigint::byte_length(&self.n)
    }

    /// Decrypt ciphertext produced by [`RsaPublicKey::encrypt`]
    pub fn decrypt(&self, ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
        super::decrypt::decrypt_bytes(ciphertext, self)
    }
}

impl RsaKeyPair {
    pub fn key_size(&self) -> u32 {
        self.public_key.key_size
    }
}

/// Key sizes must be even (p and q share the bit length) and at least [`MIN_KEY_SIZE`]
pub fn validate_key_size(key_size: u32) -> CryptoResult<()> {
    if key_size < MIN_KEY_SIZE || key_size % 2 != 0 {
        return Err(CryptoError::InvalidKeySize(key_size));
    }
    Ok(())
}

/// Use `preferred` if it is coprime to φ(n), otherwise the smallest odd e ≥ 3 that is
pub fn choose_public_exponent(preferred: &RsaBigInt, phi: &RsaBigInt) -> RsaBigInt {
    if gcd(preferred, phi).is_one() {
        return preferred.clone();
    }

    let mut e = from_u64(3);
    while !gcd(&e, phi).is_one() {
        e += 2u8;
    }
    debug!("public exponent {preferred} shares a factor with phi(n), using {e}");
    e
}

/// Generate RSA key pair with the given parameters
pub fn generate_keypair(config: &KeyGenConfig) -> CryptoResult<RsaKeyPair> {
    validate_key_size(config.key_size)?;
    info!("generating {}-bit RSA key pair", config.key_size);

    let prime_bits = config.key_size / 2;
    let rounds = config.miller_rabin_rounds;
    let limit = config.max_prime_candidates;

    // Step 1: Generate two distinct random primes p and q
    let p = random_prime(prime_bits, rounds, limit)?;
    let mut q = random_prime(prime_bits, rounds, limit)?;
    while q == p {
        q = random_prime(prime_bits, rounds, limit)?;
    }

    // Step 2: n = p * q and φ(n) = (p-1)(q-1)
    let n = &p * &q;
    let phi = (&p - 1u8) * (&q - 1u8);

    // Step 3: e coprime to φ(n), d = e^(-1) mod φ(n)
    let e = choose_public_exponent(&from_u64(config.public_exponent), &phi);
    let d = mod_inverse(&e, &phi)?;

    info!("RSA key pair ready ({} bit modulus)", n.bits());

    Ok(RsaKeyPair {
        public_key: RsaPublicKey {
            e,
            n: n.clone(),
            key_size: config.key_size,
        },
        private_key: RsaPrivateKey {
            d,
            n,
            key_size: config.key_size,
        },
        factors: Some(PrimeFactors { p, q }),
    })
}
