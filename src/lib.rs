//! # bytecrypt
//!
//! AES-128, DES and 3DES-EDE in ECB mode with PKCS#7 padding, and chunked
//! RSA-OAEP-SHA256 over self-generated keys.

/// Byte-level encrypt/decrypt entry points.
pub mod api;
/// Block ciphers and algorithm selection.
pub mod cipher;
/// Runtime configuration.
pub mod config;
/// Crate-wide error type.
pub mod error;
/// RSA key generation, OAEP and key persistence.
pub mod rsa;
/// File helpers.
pub mod util;

pub use cipher::{Algorithm, SymmetricCipher};
pub use config::Config;
pub use error::{CryptoError, CryptoResult, KeyKind};
pub use rsa::{KeyStore, RsaOaep};
