// AES-128 Block Cipher
// Rijndael with a 128-bit block, 128-bit key and 10 rounds; ECB chaining with PKCS#7

use super::galois::{bytes_to_state, gf_mul, state_to_bytes, xtime, State};
use super::BlockCipher;
use crate::error::{CryptoError, CryptoResult};

pub const BLOCK_SIZE: usize = 16;
pub const KEY_SIZE: usize = 16;
const ROUNDS: usize = 10;

/// Forward S-box
pub const SBOX: [u8; 256] = [
    0x63, 0x7c, 0x77, 0x7b, 0xf2, 0x6b, 0x6f, 0xc5, 0x30, 0x01, 0x67, 0x2b, 0xfe, 0xd7, 0xab, 0x76,
    0xca, 0x82, 0xc9, 0x7d, 0xfa, 0x59, 0x47, 0xf0, 0xad, 0xd4, 0xa2, 0xaf, 0x9c, 0xa4, 0x72, 0xc0,
    0xb7, 0xfd, 0x93, 0x26, 0x36, 0x3f, 0xf7, 0xcc, 0x34, 0xa5, 0xe5, 0xf1, 0x71, 0xd8, 0x31, 0x15,
    0x04, 0xc7, 0x23, 0xc3, 0x18, 0x96, 0x05, 0x9a, 0x07, 0x12, 0x80, 0xe2, 0xeb, 0x27, 0xb2, 0x75,
    0x09, 0x83, 0x2c, 0x1a, 0x1b, 0x6e, 0x5a, 0xa0, 0x52, 0x3b, 0xd6, 0xb3, 0x29, 0xe3, 0x2f, 0x84,
    0x53, 0xd1, 0x00, 0xed, 0x20, 0xfc, 0xb1, 0x5b, 0x6a, 0xcb, 0xbe, 0x39, 0x4a, 0x4c, 0x58, 0xcf,
    0xd0, 0xef, 0xaa, 0xfb, 0x43, 0x4d, 0x33, 0x85, 0x45, 0xf9, 0x02, 0x7f, 0x50, 0x3c, 0x9f, 0xa8,
    0x51, 0xa3, 0x40, 0x8f, 0x92, 0x9d, 0x38, 0xf5, 0xbc, 0xb6, 0xda, 0x21, 0x10, 0xff, 0xf3, 0xd2,
    0xcd, 0x0c, 0x13, 0xec, 0x5f, 0x97, 0x44, 0x17, 0xc4, 0xa7, 0x7e, 0x3d, 0x64, 0x5d, 0x19, 0x73,
    0x60, 0x81, 0x4f, 0xdc, 0x22, 0x2a, 0x90, 0x88, 0x46, 0xee, 0xb8, 0x14, 0xde, 0x5e, 0x0b, 0xdb,
    0xe0, 0x32, 0x3a, 0x0a, 0x49, 0x06, 0x24, 0x5c, 0xc2, 0xd3, 0xac, 0x62, 0x91, 0x95, 0xe4, 0x79,
    0xe7, 0xc8, 0x37, 0x6d, 0x8d, 0xd5, 0x4e, 0xa9, 0x6c, 0x56, 0xf4, 0xea, 0x65, 0x7a, 0xae, 0x08,
    0xba, 0x78, 0x25, 0x2e, 0x1c, 0xa6, 0xb4, 0xc6, 0xe8, 0xdd, 0x74, 0x1f, 0x4b, 0xbd, 0x8b, 0x8a,
    0x70, 0x3e, 0xb5, 0x66, 0x48, 0x03, 0xf6, 0x0e, 0x61, 0x35, 0x57, 0xb9, 0x86, 0xc1, 0x1d, 0x9e,
    0xe1, 0xf8, 0x98, 0x11, 0x69, 0xd9, 0x8e, 0x94, 0x9b, 0x1e, 0x87, 0xe9, 0xce, 0x55, 0x28, 0xdf,
    0x8c, 0xa1, 0x89, 0x0d, 0xbf, 0xe6, 0x42, 0x68, 0x41, 0x99, 0x2d, 0x0f, 0xb0, 0x54, 0xbb, 0x16,
];

/// Inverse S-box, derived from [`SBOX`] at compile time
pub const INV_SBOX: [u8; 256] = invert(&SBOX);

/// Round constants for key expansion (x^(i-1) in GF(2^8))
const RCON: [u8; ROUNDS] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36];

const fn invert(sbox: &[u8; 256]) -> [u8; 256] {
    let mut inverse = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        inverse[sbox[i] as usize] = i as u8;
        i += 1;
    }
    inverse
}

/// AES-128 engine holding the expanded key schedule
#[derive(Clone)]
pub struct Aes128 {
    round_keys: [State; ROUNDS + 1],
}

impl std::fmt::Debug for Aes128 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aes128").finish_non_exhaustive()
    }
}

impl Aes128 {
    /// Expand a 16-byte key; any other length fails with `InvalidKeyLength`
    pub fn new(key: &[u8]) -> CryptoResult<Self> {
        let key: &[u8; KEY_SIZE] = key.try_into().map_err(|_| CryptoError::InvalidKeyLength {
            algorithm: "AES-128",
            expected: "16",
            actual: key.len(),
        })?;

        Ok(Self {
            round_keys: expand_key(key),
        })
    }

    pub fn encrypt_block(&self, block: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let mut state = bytes_to_state(block);
        add_round_key(&mut state, &self.round_keys[0]);

        for round_key in &self.round_keys[1..ROUNDS] {
            sub_bytes(&mut state, &SBOX);
            shift_rows(&mut state);
            mix_columns(&mut state);
            add_round_key(&mut state, round_key);
        }

        sub_bytes(&mut state, &SBOX);
        shift_rows(&mut state);
        add_round_key(&mut state, &self.round_keys[ROUNDS]);

        state_to_bytes(&state)
    }

    pub fn decrypt_block(&self, block: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let mut state = bytes_to_state(block);
        add_round_key(&mut state, &self.round_keys[ROUNDS]);
        inv_shift_rows(&mut state);
        sub_bytes(&mut state, &INV_SBOX);

        for round_key in self.round_keys[1..ROUNDS].iter().rev() {
            add_round_key(&mut state, round_key);
            inv_mix_columns(&mut state);
            inv_shift_rows(&mut state);
            sub_bytes(&mut state, &INV_SBOX);
        }

        add_round_key(&mut state, &self.round_keys[0]);
        state_to_bytes(&state)
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

impl BlockCipher for Aes128 {
    const BLOCK_SIZE: usize = BLOCK_SIZE;
    type Block = [u8; BLOCK_SIZE];

    fn encrypt_in_place(&self, block: &mut Self::Block) {
        *block = Aes128::encrypt_block(self, block);
    }

    fn decrypt_in_place(&self, block: &mut Self::Block) {
        *block = Aes128::decrypt_block(self, block);
    }
}

/// Derive the 11 round keys (44 words); each round key is laid out like the state
fn expand_key(key: &[u8; KEY_SIZE]) -> [State; ROUNDS + 1] {
    let mut words = [[0u8; 4]; 4 * (ROUNDS + 1)];
    for (i, word) in words.iter_mut().take(4).enumerate() {
        word.copy_from_slice(&key[i * 4..i * 4 + 4]);
    }

    for i in 4..words.len() {
        let mut temp = words[i - 1];
        if i % 4 == 0 {
            temp.rotate_left(1);
            for b in temp.iter_mut() {
                *b = SBOX[*b as usize];
            }
            temp[0] ^= RCON[i / 4 - 1];
        }
        for j in 0..4 {
            words[i][j] = words[i - 4][j] ^ temp[j];
        }
    }

    let mut round_keys = [[[0u8; 4]; 4]; ROUNDS + 1];
    for (round, round_key) in round_keys.iter_mut().enumerate() {
        round_key.copy_from_slice(&words[round * 4..round * 4 + 4]);
    }
    round_keys
}

fn add_round_key(state: &mut State, round_key: &State) {
    for (column, key_column) in state.iter_mut().zip(round_key) {
        for (b, k) in column.iter_mut().zip(key_column) {
            *b ^= k;
        }
    }
}

fn sub_bytes(state: &mut State, table: &[u8; 256]) {
    for b in state.iter_mut().flatten() {
        *b = table[*b as usize];
    }
}

/// Row r moves r columns to the left
fn shift_rows(state: &mut State) {
    let old = *state;
    for col in 0..4 {
        for row in 1..4 {
            state[col][row] = old[(col + row) % 4][row];
        }
    }
}

fn inv_shift_rows(state: &mut State) {
    let old = *state;
    for col in 0..4 {
        for row in 1..4 {
            state[(col + row) % 4][row] = old[col][row];
        }
    }
}

fn mix_column(a: &mut [u8; 4]) {
    let t = a[0] ^ a[1] ^ a[2] ^ a[3];
    let first = a[0];
    a[0] ^= t ^ xtime(a[0] ^ a[1]);
    a[1] ^= t ^ xtime(a[1] ^ a[2]);
    a[2] ^= t ^ xtime(a[2] ^ a[3]);
    a[3] ^= t ^ xtime(a[3] ^ first);
}

fn mix_columns(state: &mut State) {
    for column in state.iter_mut() {
        mix_column(column);
    }
}

/// Multiply each column by {0e, 0b, 0d, 09}
fn inv_mix_columns(state: &mut State) {
    for column in state.iter_mut() {
        let [a0, a1, a2, a3] = *column;
        column[0] = gf_mul(a0, 0x0e) ^ gf_mul(a1, 0x0b) ^ gf_mul(a2, 0x0d) ^ gf_mul(a3, 0x09);
        column[1] = gf_mul(a0, 0x09) ^ gf_mul(a1, 0x0e) ^ gf_mul(a2, 0x0b) ^ gf_mul(a3, 0x0d);
        column[2] = gf_mul(a0, 0x0d) ^ gf_mul(a1, 0x09) ^ gf_mul(a2, 0x0e) ^ gf_mul(a3, 0x0b);
        column[3] = gf_mul(a0, 0x0b) ^ gf_mul(a1, 0x0d) ^ gf_mul(a2, 0x09) ^ gf_mul(a3, 0x0e);
    }
}
