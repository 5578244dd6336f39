// RSA Big Integer Operations
// Wrapper around num-bigint for RSA-specific operations

use log::debug;
use num_bigint::{BigInt, BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::thread_rng;

use crate::error::{CryptoError, CryptoResult};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Odd primes below 200, used to discard most candidates before Miller-Rabin
const SMALL_PRIMES: [u32; 45] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181,
    191, 193, 197, 199,
];

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Interpret bytes as a big-endian unsigned integer (OS2IP)
pub fn from_bytes(bytes: &[u8]) -> RsaBigInt {
    RsaBigInt::from_bytes_be(bytes)
}

/// Serialize as exactly `len` big-endian bytes (I2OSP).
/// Returns None if the value does not fit.
pub fn to_bytes_padded(n: &RsaBigInt, len: usize) -> Option<Vec<u8>> {
    if n.is_zero() {
        return Some(vec![0u8; len]);
    }

    let bytes = n.to_bytes_be();
    if bytes.len() > len {
        return None;
    }

    let mut result = vec![0u8; len];
    result[len - bytes.len()..].copy_from_slice(&bytes);
    Some(result)
}

/// Number of bytes needed to hold `n`
pub fn byte_length(n: &RsaBigInt) -> usize {
    ((n.bits() + 7) / 8) as usize
}

/// Modular exponentiation: base^exp mod modulus
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    if modulus.is_one() {
        return RsaBigInt::zero();
    }
    base.modpow(exp, modulus)
}

/// Extended Euclidean Algorithm, iterative.
/// Returns (gcd, x, y) such that a*x + b*y = gcd(a, b)
pub fn extended_gcd(a: &RsaBigInt, b: &RsaBigInt) -> (RsaBigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (BigInt::from(a.clone()), BigInt::from(b.clone()));
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
    let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = &old_r / &r;

        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_x = &old_x - &q * &x;
        old_x = std::mem::replace(&mut x, next_x);

        let next_y = &old_y - &q * &y;
        old_y = std::mem::replace(&mut y, next_y);
    }

    (old_r.magnitude().clone(), old_x, old_y)
}

/// Compute modular inverse: a^(-1) mod m
pub fn mod_inverse(a: &RsaBigInt, m: &RsaBigInt) -> CryptoResult<RsaBigInt> {
    if m.is_zero() {
        return Err(CryptoError::NoModularInverse);
    }

    let (gcd, x, _) = extended_gcd(a, m);
    if !gcd.is_one() {
        return Err(CryptoError::NoModularInverse);
    }

    // mod_floor by a positive modulus lands in [0, m)
    let modulus = BigInt::from(m.clone());
    Ok(x.mod_floor(&modulus).magnitude().clone())
}

/// Greatest common divisor
pub fn gcd(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    a.gcd(b)
}

/// Miller-Rabin primality test
/// Returns true if n is probably prime
pub fn is_probable_prime(n: &RsaBigInt, iterations: u32) -> bool {
    let two = RsaBigInt::from(2u8);
    if n < &two {
        return false;
    }
    if n == &two || n == &RsaBigInt::from(3u8) {
        return true;
    }
    if n.is_even() {
        return false;
    }

    for &p in SMALL_PRIMES.iter() {
        let p = RsaBigInt::from(p);
        if n == &p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    // Write n-1 as d * 2^s with d odd
    let n_minus_one = n - 1u8;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    let mut rng = thread_rng();

    'witness: for _ in 0..iterations {
        // Pick random witness a in [2, n-2]
        let a = rng.gen_biguint_range(&two, &n_minus_one);

        let mut x = mod_pow(&a, &d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = mod_pow(&x, &two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }

        // Composite
        return false;
    }

    // Probably prime
    true
}

/// Generate a random probable prime of exactly `bit_length` bits.
///
/// Each candidate has its top bit set (so it has the requested length) and its
/// low bit set (so it is odd). Gives up with `PrimeGenerationExhausted` after
/// `max_candidates` rejected draws.
pub fn random_prime(
    bit_length: u32,
    iterations: u32,
    max_candidates: u64,
) -> CryptoResult<RsaBigInt> {
    debug_assert!(bit_length >= 2);
    let mut rng = thread_rng();
    let top_and_low = (RsaBigInt::one() << (bit_length - 1)) | RsaBigInt::one();

    for attempt in 1..=max_candidates {
        let candidate = rng.gen_biguint(u64::from(bit_length)) | &top_and_low;

        if is_probable_prime(&candidate, iterations) {
            debug!("found {bit_length}-bit probable prime after {attempt} candidates");
            return Ok(candidate);
        }
    }

    Err(CryptoError::PrimeGenerationExhausted(max_candidates))
}

/// Serde adapter writing big integers as bare JSON integers of any length
pub mod decimal {
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::value::RawValue;

    use super::RsaBigInt;

    pub fn serialize<S: Serializer>(value: &RsaBigInt, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = RawValue::from_string(value.to_str_radix(10)).map_err(S::Error::custom)?;
        raw.serialize(serializer)
    }

    /// Accepts a JSON integer or a quoted decimal string
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RsaBigInt, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        let text = raw.get().trim();
        let digits = text
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .unwrap_or(text);

        let invalid = || D::Error::custom(format!("expected a non-negative integer, got {text}"));
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        RsaBigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)
    }
}
