// Error types
// One error enum shared by the block ciphers, RSA-OAEP and the key store

use std::fmt;
use std::io;

use thiserror::Error;

/// Which half of an RSA key pair an operation needed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Public,
    Private,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Public => write!(f, "public"),
            KeyKind::Private => write!(f, "private"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid {algorithm} key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        algorithm: &'static str,
        expected: &'static str,
        actual: usize,
    },

    #[error("invalid padding")]
    InvalidPadding,

    #[error("ciphertext length {len} is not a multiple of the {block_size}-byte block size")]
    InvalidCiphertextLength { len: usize, block_size: usize },

    #[error("OAEP decoding error: {0}")]
    DecodingError(&'static str),

    #[error("message too long: {len} bytes, OAEP capacity is {max} bytes")]
    MessageTooLong { len: usize, max: usize },

    #[error("no modular inverse exists")]
    NoModularInverse,

    #[error("no {0} key loaded")]
    MissingKey(KeyKind),

    #[error("no probable prime found after {0} candidates")]
    PrimeGenerationExhausted(u64),

    #[error("unsupported RSA key size: {0} bits")]
    InvalidKeySize(u32),

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("malformed key record: {0}")]
    KeyFormat(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type used throughout the crate
pub type CryptoResult<T> = Result<T, CryptoError>;
