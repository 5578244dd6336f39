// RSA Decryption Implementation
// Splits ciphertext into k-byte blocks, inverts RSA and strips OAEP

use log::debug;

use super::bigint::{from_bytes, mod_pow, to_bytes_padded};
use super::keygen::RsaPrivateKey;
use super::padding::oaep_decode;
use crate::error::{CryptoError, CryptoResult};

/// Decrypt one k-byte ciphertext block
pub fn decrypt_chunk(chunk: &[u8], private_key: &RsaPrivateKey) -> CryptoResult<Vec<u8>> {
    let k = private_key.modulus_len();
    if chunk.len() != k {
        return Err(CryptoError::DecodingError("invalid block length"));
    }

    let c = from_bytes(chunk);
    if c >= private_key.n {
        return Err(CryptoError::DecodingError("ciphertext block out of range"));
    }

    // m = c^d mod n
    let m = mod_pow(&c, &private_key.d, &private_key.n);
    let em = to_bytes_padded(&m, k).ok_or(CryptoError::DecodingError("invalid block length"))?;

    oaep_decode(&em, k)
}

/// Decrypt ciphertext bytes using RSA private key
/// The ciphertext must be a whole number of k-byte blocks
pub fn decrypt_bytes(ciphertext: &[u8], private_key: &RsaPrivateKey) -> CryptoResult<Vec<u8>> {
    let k = private_key.modulus_len();
    if k == 0 || ciphertext.len() % k != 0 {
        return Err(CryptoError::DecodingError(
            "ciphertext is not a whole number of blocks",
        ));
    }

    let mut plaintext = Vec::with_capacity(ciphertext.len());
    for chunk in ciphertext.chunks_exact(k) {
        plaintext.extend_from_slice(&decrypt_chunk(chunk, private_key)?);
    }

    debug!(
        "RSA-OAEP decrypted {} blocks into {} bytes",
        ciphertext.len() / k,
        plaintext.len()
    );
    Ok(plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::keygen::{generate_keypair, KeyGenConfig, RsaKeyPair};

    fn keypair() -> RsaKeyPair {
        generate_keypair(&KeyGenConfig::default().with_key_size(1024)).unwrap()
    }

    #[test]
    fn test_roundtrip_various_sizes() {
        let keypair = keypair();
        let chunk = keypair.public_key.modulus_len() - 66;

        for len in [0, 1, chunk - 1, chunk, chunk + 1, 3 * chunk + 5] {
            let message: Vec<u8> = (0..len).map(|i| (i * 31 % 251) as u8).collect();
            let ciphertext = keypair.public_key.encrypt(&message).unwrap();
            assert_eq!(ciphertext.len() % keypair.public_key.modulus_len(), 0);
            assert_eq!(keypair.private_key.decrypt(&ciphertext).unwrap(), message);
        }
    }

    #[test]
    fn test_decrypt_invalid_size() {
        let keypair = keypair();
        let result = decrypt_bytes(&[0u8; 10], &keypair.private_key);
        assert!(matches!(result, Err(CryptoError::DecodingError(_))));
    }

    #[test]
    fn test_decrypt_out_of_range_block() {
        let keypair = keypair();
        let k = keypair.private_key.modulus_len();
        assert!(matches!(
            decrypt_bytes(&vec![0xFF; k], &keypair.private_key),
            Err(CryptoError::DecodingError("ciphertext block out of range"))
        ));
    }

    #[test]
    fn test_decrypt_wrong_key() {
        let keypair1 = keypair();
        let keypair2 = keypair();

        let ciphertext = keypair1.public_key.encrypt(b"Test").unwrap();
        let result = keypair2.private_key.decrypt(&ciphertext);
        assert!(result.is_err()); // Should fail - wrong key
    }

    #[test]
    fn test_decrypt_tampered_block() {
        let keypair = keypair();
        let mut ciphertext = keypair.public_key.encrypt(b"integrity").unwrap();
        let last = ciphertext.len() - 1;
        ciphertext[last] ^= 0x01;
        assert!(matches!(
            keypair.private_key.decrypt(&ciphertext),
            Err(CryptoError::DecodingError(_))
        ));
    }
}
