// Symmetric Cipher Module
// Block ciphers, ECB chaining and the closed set of selectable algorithms

pub mod aes;
pub mod des;
pub mod des_tables;
pub mod galois;
pub mod padding;
pub mod tdes;

use std::fmt;
use std::str::FromStr;

pub use aes::Aes128;
pub use des::Des;
pub use tdes::{Keying, TripleDes};

use crate::error::{CryptoError, CryptoResult};

/// A fixed-width block permutation keyed at construction time
pub trait BlockCipher {
    const BLOCK_SIZE: usize;
    type Block: AsRef<[u8]> + AsMut<[u8]> + Default;

    fn encrypt_in_place(&self, block: &mut Self::Block);
    fn decrypt_in_place(&self, block: &mut Self::Block);
}

/// ECB mode: pad with PKCS#7 and encipher every block independently
pub fn encrypt_ecb<C: BlockCipher>(cipher: &C, plaintext: &[u8]) -> Vec<u8> {
    let padded = padding::pad(plaintext, C::BLOCK_SIZE);
    let mut output = Vec::with_capacity(padded.len());

    for chunk in padded.chunks_exact(C::BLOCK_SIZE) {
        let mut block = C::Block::default();
        block.as_mut().copy_from_slice(chunk);
        cipher.encrypt_in_place(&mut block);
        output.extend_from_slice(block.as_ref());
    }

    output
}

/// ECB mode decryption followed by strict PKCS#7 removal
pub fn decrypt_ecb<C: BlockCipher>(cipher: &C, ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
    if ciphertext.len() % C::BLOCK_SIZE != 0 {
        return Err(CryptoError::InvalidCiphertextLength {
            len: ciphertext.len(),
            block_size: C::BLOCK_SIZE,
        });
    }

    let mut output = Vec::with_capacity(ciphertext.len());
    for chunk in ciphertext.chunks_exact(C::BLOCK_SIZE) {
        let mut block = C::Block::default();
        block.as_mut().copy_from_slice(chunk);
        cipher.decrypt_in_place(&mut block);
        output.extend_from_slice(block.as_ref());
    }

    let plaintext_len = padding::unpad(&output, C::BLOCK_SIZE)?.len();
    output.truncate(plaintext_len);
    Ok(output)
}

/// Algorithms selectable by name at the collaborator boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Aes,
    Des,
    TripleDes,
    RsaOaep,
}

impl Algorithm {
    pub fn is_symmetric(self) -> bool {
        !matches!(self, Algorithm::RsaOaep)
    }
}

impl FromStr for Algorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aes" | "aes128" | "aes-128" => Ok(Algorithm::Aes),
            "des" => Ok(Algorithm::Des),
            "tripledes" | "3des" | "des-ede" => Ok(Algorithm::TripleDes),
            "rsa" | "rsa-oaep" => Ok(Algorithm::RsaOaep),
            _ => Err(CryptoError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Aes => "aes",
            Algorithm::Des => "des",
            Algorithm::TripleDes => "tripledes",
            Algorithm::RsaOaep => "rsa",
        };
        f.write_str(name)
    }
}

/// One keyed symmetric engine, chosen once at the boundary
#[derive(Debug, Clone)]
pub enum SymmetricCipher {
    Aes(Aes128),
    Des(Des),
    TripleDes(TripleDes),
}

impl SymmetricCipher {
    pub fn new(algorithm: Algorithm, key: &[u8]) -> CryptoResult<Self> {
        match algorithm {
            Algorithm::Aes => Ok(SymmetricCipher::Aes(Aes128::new(key)?)),
            Algorithm::Des => Ok(SymmetricCipher::Des(Des::new(key)?)),
            Algorithm::TripleDes => Ok(SymmetricCipher::TripleDes(TripleDes::new(key)?)),
            Algorithm::RsaOaep => Err(CryptoError::UnknownAlgorithm(format!(
                "{algorithm} is not a symmetric cipher"
            ))),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            SymmetricCipher::Aes(_) => Algorithm::Aes,
            SymmetricCipher::Des(_) => Algorithm::Des,
            SymmetricCipher::TripleDes(_) => Algorithm::TripleDes,
        }
    }

    pub fn block_size(&self) -> usize {
        match self {
            SymmetricCipher::Aes(_) => aes::BLOCK_SIZE,
            SymmetricCipher::Des(_) => des::BLOCK_SIZE,
            SymmetricCipher::TripleDes(_) => tdes::BLOCK_SIZE,
        }
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        match self {
            SymmetricCipher::Aes(c) => c.encrypt(plaintext),
            SymmetricCipher::Des(c) => c.encrypt(plaintext),
            SymmetricCipher::TripleDes(c) => c.encrypt(plaintext),
        }
    }

    pub fn decrypt(&self, ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
        match self {
            SymmetricCipher::Aes(c) => c.decrypt(ciphertext),
            SymmetricCipher::Des(c) => c.decrypt(ciphertext),
            SymmetricCipher::TripleDes(c) => c.decrypt(ciphertext),
        }
    }
}
