// Triple DES (EDE)
// C = E(K3, D(K2, E(K1, P))), P = D(K1, E(K2, D(K3, C)))

use super::des::{self, Des};
use super::BlockCipher;
use crate::error::{CryptoError, CryptoResult};

pub const BLOCK_SIZE: usize = des::BLOCK_SIZE;

/// Keying option, determined by the key length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keying {
    /// 16-byte key: K1, K2, K1
    TwoKey,
    /// 24-byte key: K1, K2, K3
    ThreeKey,
}

#[derive(Debug, Clone)]
pub struct TripleDes {
    k1: Des,
    k2: Des,
    k3: Des,
    keying: Keying,
}

impl TripleDes {
    pub fn new(key: &[u8]) -> CryptoResult<Self> {
        let keying = match key.len() {
            16 => Keying::TwoKey,
            24 => Keying::ThreeKey,
            actual => {
                return Err(CryptoError::InvalidKeyLength {
                    algorithm: "3DES",
                    expected: "16 or 24",
                    actual,
                })
            }
        };

        let k1 = Des::new(&key[..8])?;
        let k2 = Des::new(&key[8..16])?;
        let k3 = match keying {
            Keying::TwoKey => k1.clone(),
            Keying::ThreeKey => Des::new(&key[16..24])?,
        };

        Ok(Self { k1, k2, k3, keying })
    }

    pub fn keying(&self) -> Keying {
        self.keying
    }

    pub fn encrypt_block(&self, block: u64) -> u64 {
        let block = self.k1.encrypt_block(block);
        let block = self.k2.decrypt_block(block);
        self.k3.encrypt_block(block)
    }

    pub fn decrypt_block(&self, block: u64) -> u64 {
        let block = self.k3.decrypt_block(block);
        let block = self.k2.encrypt_block(block);
        self.k1.decrypt_block(block)
    }

    /// ECB encryption with PKCS#7 padding
    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        super::encrypt_ecb(self, plaintext)
    }

    /// ECB decryption, validating and removing PKCS#7 padding
    pub fn decrypt(&self, ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
        super::decrypt_ecb(self, ciphertext)
    }
}

impl BlockCipher for TripleDes {
    const BLOCK_SIZE: usize = BLOCK_SIZE;
    type Block = [u8; BLOCK_SIZE];

    fn encrypt_in_place(&self, block: &mut Self::Block) {
        *block = self.encrypt_block(u64::from_be_bytes(*block)).to_be_bytes();
    }

    fn decrypt_in_place(&self, block: &mut Self::Block) {
        *block = self.decrypt_block(u64::from_be_bytes(*block)).to_be_bytes();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_tripledes() {
        let tdes = TripleDes::new(b"0123456789abcdef01234567").unwrap();
        assert_eq!(tdes.keying(), Keying::ThreeKey);

        let ciphertext = tdes.encrypt(b"Hello TripleDES!");
        assert_eq!(
            hex::encode(&ciphertext),
            "e099b0190f71a48e63b1ea650770b91cfa5916059a76b93b"
        );
        assert_eq!(tdes.decrypt(&ciphertext).unwrap(), b"Hello TripleDES!");
    }

    #[test]
    fn test_two_key_matches_expanded_three_key() {
        let two = TripleDes::new(b"0123456789abcdef").unwrap();
        let three = TripleDes::new(b"0123456789abcdef01234567").unwrap();
        assert_eq!(two.keying(), Keying::TwoKey);
        assert_eq!(two.encrypt(b"same output"), three.encrypt(b"same output"));
    }

    #[test]
    fn test_repeated_key_degenerates_to_des() {
        let des = Des::new(b"k1k1k1k1").unwrap();
        let tdes = TripleDes::new(b"k1k1k1k1k1k1k1k1k1k1k1k1").unwrap();
        let block = 0x0123_4567_89AB_CDEF;
        assert_eq!(tdes.encrypt_block(block), des.encrypt_block(block));
        assert_eq!(tdes.encrypt(b"abc"), des.encrypt(b"abc"));
    }

    #[test]
    fn test_invalid_key_lengths() {
        for len in [0usize, 8, 15, 17, 23, 25, 32] {
            assert!(matches!(
                TripleDes::new(&vec![1u8; len]),
                Err(CryptoError::InvalidKeyLength { actual, .. }) if actual == len
            ));
        }
    }

    #[test]
    fn test_tampered_padding_is_rejected() {
        let tdes = TripleDes::new(b"0123456789abcdef01234567").unwrap();
        let mut ciphertext = tdes.encrypt(b"Hello TripleDES!");
        // the last block is pure padding; forge one whose plaintext ends in 0x00
        let forged = tdes.encrypt_block(0x0808_0808_0808_0800);
        let n = ciphertext.len();
        ciphertext[n - 8..].copy_from_slice(&forged.to_be_bytes());
        assert!(matches!(tdes.decrypt(&ciphertext), Err(CryptoError::InvalidPadding)));
    }
}
