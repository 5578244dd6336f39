// DES Block Cipher
// 16-round Feistel network over 64-bit blocks; ECB chaining with PKCS#7

use super::des_tables::{E, FP, IP, P, PC1, PC2, ROTATIONS, SBOXES};
use super::BlockCipher;
use crate::error::{CryptoError, CryptoResult};

pub const BLOCK_SIZE: usize = 8;
pub const KEY_SIZE: usize = 8;
const ROUNDS: usize = 16;
const HALF_KEY_MASK: u64 = (1 << 28) - 1;

/// DES engine holding the 16 round subkeys (48 bits each, right-aligned)
#[derive(Clone)]
pub struct Des {
    subkeys: [u64; ROUNDS],
}

impl std::fmt::Debug for Des {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Des").finish_non_exhaustive()
    }
}

impl Des {
    /// Build the subkey schedule from an 8-byte key (parity bits are ignored)
    pub fn new(key: &[u8]) -> CryptoResult<Self> {
        let key: [u8; KEY_SIZE] = key.try_into().map_err(|_| CryptoError::InvalidKeyLength {
            algorithm: "DES",
            expected: "8",
            actual: key.len(),
        })?;

        Ok(Self {
            subkeys: key_schedule(u64::from_be_bytes(key)),
        })
    }

    pub fn encrypt_block(&self, block: u64) -> u64 {
        feistel(block, self.subkeys.iter())
    }

    pub fn decrypt_block(&self, block: u64) -> u64 {
        feistel(block, self.subkeys.iter().rev())
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

impl BlockCipher for Des {
    const BLOCK_SIZE: usize = BLOCK_SIZE;
    type Block = [u8; BLOCK_SIZE];

    fn encrypt_in_place(&self, block: &mut Self::Block) {
        *block = self.encrypt_block(u64::from_be_bytes(*block)).to_be_bytes();
    }

    fn decrypt_in_place(&self, block: &mut Self::Block) {
        *block = self.decrypt_block(u64::from_be_bytes(*block)).to_be_bytes();
    }
}

/// Gather bits of a `width`-bit input in table order; output is right-aligned
pub(crate) fn permute(input: u64, width: u32, table: &[u8]) -> u64 {
    table
        .iter()
        .fold(0u64, |out, &pos| (out << 1) | ((input >> (width - pos as u32)) & 1))
}

fn rotate_half(half: u64, by: u32) -> u64 {
    ((half << by) | (half >> (28 - by))) & HALF_KEY_MASK
}

fn key_schedule(key: u64) -> [u64; ROUNDS] {
    let permuted = permute(key, 64, &PC1);
    let mut c = permuted >> 28;
    let mut d = permuted & HALF_KEY_MASK;

    let mut subkeys = [0u64; ROUNDS];
    for (subkey, &shift) in subkeys.iter_mut().zip(ROTATIONS.iter()) {
        c = rotate_half(c, shift);
        d = rotate_half(d, shift);
        *subkey = permute((c << 28) | d, 56, &PC2);
    }
    subkeys
}

/// Round function f(R, K): expand, mix in the subkey, substitute, permute
fn round_function(right: u32, subkey: u64) -> u32 {
    let mixed = permute(right as u64, 32, &E) ^ subkey;

    let mut substituted = 0u32;
    for (i, sbox) in SBOXES.iter().enumerate() {
        let six = ((mixed >> (42 - 6 * i)) & 0x3f) as usize;
        let row = ((six & 0x20) >> 4) | (six & 1);
        let col = (six >> 1) & 0x0f;
        substituted = (substituted << 4) | sbox[row * 16 + col] as u32;
    }

    permute(substituted as u64, 32, &P) as u32
}

fn feistel<'a>(block: u64, subkeys: impl Iterator<Item = &'a u64>) -> u64 {
    let permuted = permute(block, 64, &IP);
    let mut left = (permuted >> 32) as u32;
    let mut right = permuted as u32;

    for &subkey in subkeys {
        let next = left ^ round_function(right, subkey);
        left = right;
        right = next;
    }

    // the halves are swapped once more before the final permutation
    permute(((right as u64) << 32) | left as u64, 64, &FP)
}
