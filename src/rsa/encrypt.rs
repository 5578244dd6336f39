// RSA Encryption Implementation
// Chunked RSA-OAEP-SHA256: every chunk becomes one k-byte ciphertext block

use log::debug;

use super::bigint::{from_bytes, mod_pow, to_bytes_padded};
use super::keygen::RsaPublicKey;
use super::padding::{max_message_len, oaep_encode};
use crate::error::{CryptoError, CryptoResult};

/// Maximum plaintext bytes carried by one ciphertext block of this key
pub fn max_chunk_len(public_key: &RsaPublicKey) -> usize {
    max_message_len(public_key.modulus_len())
}

/// Encrypt one OAEP-sized chunk into exactly k bytes
pub fn encrypt_chunk(chunk: &[u8], public_key: &RsaPublicKey) -> CryptoResult<Vec<u8>> {
    let k = public_key.modulus_len();
    let em = oaep_encode(chunk, k)?;

    // c = m^e mod n
    let m = from_bytes(&em);
    let c = mod_pow(&m, &public_key.e, &public_key.n);

    // c < n always fits in k bytes
    to_bytes_padded(&c, k).ok_or(CryptoError::DecodingError("ciphertext wider than modulus"))
}

/// Encrypt bytes of any length using RSA public key
/// Returns the concatenation of fixed k-byte blocks (empty input gives empty output)
pub fn encrypt_bytes(plaintext: &[u8], public_key: &RsaPublicKey) -> CryptoResult<Vec<u8>> {
    let k = public_key.modulus_len();
    let chunk_len = max_chunk_len(public_key);
    if chunk_len == 0 {
        return Err(CryptoError::MessageTooLong {
            len: plaintext.len(),
            max: 0,
        });
    }

    let mut ciphertext = Vec::with_capacity(plaintext.len().div_ceil(chunk_len) * k);
    for chunk in plaintext.chunks(chunk_len) {
        ciphertext.extend_from_slice(&encrypt_chunk(chunk, public_key)?);
    }

    debug!(
        "RSA-OAEP encrypted {} bytes into {} blocks of {k} bytes",
        plaintext.len(),
        ciphertext.len() / k
    );
    Ok(ciphertext)
}
