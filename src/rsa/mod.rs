// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod decrypt;
pub mod encrypt;
pub mod engine;
pub mod keygen;
pub mod keystore;
pub mod padding;

pub use decrypt::decrypt_bytes;
pub use encrypt::{encrypt_bytes, max_chunk_len};
pub use engine::RsaOaep;
pub use keygen::{generate_keypair, KeyGenConfig, RsaKeyPair, RsaPrivateKey, RsaPublicKey};
pub use keystore::KeyStore;
pub use padding::{mgf1, oaep_decode, oaep_encode};
