// Byte-level entry points for collaborators (file uploads, the CLI)

use log::debug;

use crate::cipher::{Aes128, Algorithm, Des, SymmetricCipher, TripleDes};
use crate::error::{CryptoError, CryptoResult};
use crate::rsa::RsaOaep;

pub fn aes_encrypt(plaintext: &[u8], key: &[u8]) -> CryptoResult<Vec<u8>> {
    Ok(Aes128::new(key)?.encrypt(plaintext))
}

pub fn aes_decrypt(ciphertext: &[u8], key: &[u8]) -> CryptoResult<Vec<u8>> {
    Aes128::new(key)?.decrypt(ciphertext)
}

pub fn des_encrypt(plaintext: &[u8], key: &[u8]) -> CryptoResult<Vec<u8>> {
    Ok(Des::new(key)?.encrypt(plaintext))
}

pub fn des_decrypt(ciphertext: &[u8], key: &[u8]) -> CryptoResult<Vec<u8>> {
    Des::new(key)?.decrypt(ciphertext)
}

/// 3DES-EDE with a 16-byte (K1,K2,K1) or 24-byte (K1,K2,K3) key
pub fn tripledes_encrypt(plaintext: &[u8], key: &[u8]) -> CryptoResult<Vec<u8>> {
    Ok(TripleDes::new(key)?.encrypt(plaintext))
}

pub fn tripledes_decrypt(ciphertext: &[u8], key: &[u8]) -> CryptoResult<Vec<u8>> {
    TripleDes::new(key)?.decrypt(ciphertext)
}

/// Encrypt against the engine's public key, loading it from the store if needed
pub fn rsa_oaep_encrypt(rsa: &mut RsaOaep, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    rsa.encrypt(plaintext)
}

/// Decrypt against the engine's private key, loading it from the store if needed
pub fn rsa_oaep_decrypt(rsa: &mut RsaOaep, ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
    rsa.decrypt(ciphertext)
}

/// Key material for [`encrypt`] and [`decrypt`]
#[derive(Debug)]
pub enum CipherKey<'a> {
    /// Raw key bytes for a block cipher
    Secret(&'a [u8]),
    /// A key-pair holder for RSA-OAEP
    Rsa(&'a mut RsaOaep),
}

pub fn encrypt(
    algorithm: Algorithm,
    key: CipherKey<'_>,
    plaintext: &[u8],
) -> CryptoResult<Vec<u8>> {
    debug!("{algorithm}: encrypting {} bytes", plaintext.len());
    match (algorithm, key) {
        (Algorithm::RsaOaep, CipherKey::Rsa(rsa)) => rsa.encrypt(plaintext),
        (Algorithm::RsaOaep, CipherKey::Secret(_)) => Err(rsa_needs_key_pair()),
        (_, CipherKey::Secret(secret)) => {
            Ok(SymmetricCipher::new(algorithm, secret)?.encrypt(plaintext))
        }
        (_, CipherKey::Rsa(_)) => Err(symmetric_needs_secret(algorithm)),
    }
}

pub fn decrypt(
    algorithm: Algorithm,
    key: CipherKey<'_>,
    ciphertext: &[u8],
) -> CryptoResult<Vec<u8>> {
    debug!("{algorithm}: decrypting {} bytes", ciphertext.len());
    match (algorithm, key) {
        (Algorithm::RsaOaep, CipherKey::Rsa(rsa)) => rsa.decrypt(ciphertext),
        (Algorithm::RsaOaep, CipherKey::Secret(_)) => Err(rsa_needs_key_pair()),
        (_, CipherKey::Secret(secret)) => {
            SymmetricCipher::new(algorithm, secret)?.decrypt(ciphertext)
        }
        (_, CipherKey::Rsa(_)) => Err(symmetric_needs_secret(algorithm)),
    }
}

fn rsa_needs_key_pair() -> CryptoError {
    CryptoError::InvalidConfig("rsa takes a key pair, not a secret key".to_string())
}

fn symmetric_needs_secret(algorithm: Algorithm) -> CryptoError {
    CryptoError::InvalidConfig(format!("{algorithm} takes a secret key, not a key pair"))
}
