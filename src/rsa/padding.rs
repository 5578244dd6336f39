// OAEP Padding (SHA-256, empty label)
// EM = 0x00 || maskedSeed || maskedDB, DB = lHash || PS || 0x01 || M

use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};

use crate::error::{CryptoError, CryptoResult};

/// SHA-256 output length
pub const HASH_LEN: usize = 32;

/// Largest message that fits one OAEP block for a `k`-byte modulus
pub fn max_message_len(k: usize) -> usize {
    k.saturating_sub(2 * HASH_LEN + 2)
}

/// MGF1 with SHA-256: hash `seed || counter` for counter = 0, 1, … and truncate
pub fn mgf1(seed: &[u8], length: usize) -> Vec<u8> {
    let mut mask = Vec::with_capacity(length + HASH_LEN);
    let mut counter = 0u32;

    while mask.len() < length {
        let mut hasher = Sha256::new();
        hasher.update(seed);
        hasher.update(counter.to_be_bytes());
        mask.extend_from_slice(&hasher.finalize());
        counter += 1;
    }

    mask.truncate(length);
    mask
}

fn xor_in_place(target: &mut [u8], mask: &[u8]) {
    for (t, m) in target.iter_mut().zip(mask) {
        *t ^= m;
    }
}

fn label_hash() -> [u8; HASH_LEN] {
    Sha256::digest(b"").into()
}

/// OAEP-encode `message` into a `k`-byte block using a fresh random seed
pub fn oaep_encode(message: &[u8], k: usize) -> CryptoResult<Vec<u8>> {
    oaep_encode_with_rng(&mut rand::thread_rng(), message, k)
}

/// [`oaep_encode`] with the seed drawn from a caller-supplied RNG
pub fn oaep_encode_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
    message: &[u8],
    k: usize,
) -> CryptoResult<Vec<u8>> {
    let max = max_message_len(k);
    if k < 2 * HASH_LEN + 2 || message.len() > max {
        return Err(CryptoError::MessageTooLong {
            len: message.len(),
            max,
        });
    }

    // DB = lHash || PS || 0x01 || M, exactly k - hLen - 1 bytes
    let db_len = k - HASH_LEN - 1;
    let mut db = Vec::with_capacity(db_len);
    db.extend_from_slice(&label_hash());
    db.resize(db_len - message.len() - 1, 0x00);
    db.push(0x01);
    db.extend_from_slice(message);

    let mut seed = [0u8; HASH_LEN];
    rng.fill_bytes(&mut seed);

    xor_in_place(&mut db, &mgf1(&seed, db_len));
    xor_in_place(&mut seed, &mgf1(&db, HASH_LEN));

    let mut em = Vec::with_capacity(k);
    em.push(0x00);
    em.extend_from_slice(&seed);
    em.extend_from_slice(&db);
    Ok(em)
}

/// Reverse [`oaep_encode`], checking the block structure
pub fn oaep_decode(em: &[u8], k: usize) -> CryptoResult<Vec<u8>> {
    if em.len() != k || k < 2 * HASH_LEN + 2 {
        return Err(CryptoError::DecodingError("invalid block length"));
    }
    if em[0] != 0x00 {
        return Err(CryptoError::DecodingError("leading byte is not 0x00"));
    }

    let (masked_seed, masked_db) = em[1..].split_at(HASH_LEN);

    let mut seed = masked_seed.to_vec();
    xor_in_place(&mut seed, &mgf1(masked_db, HASH_LEN));

    let db_mask = mgf1(&seed, masked_db.len());
    let mut db = masked_db.to_vec();
    xor_in_place(&mut db, &db_mask);

    let (recovered_hash, rest) = db.split_at(HASH_LEN);
    if recovered_hash != label_hash() {
        return Err(CryptoError::DecodingError("label hash mismatch"));
    }

    let separator = rest
        .iter()
        .position(|&b| b != 0x00)
        .filter(|&i| rest[i] == 0x01)
        .ok_or(CryptoError::DecodingError("missing 0x01 separator"))?;

    Ok(rest[separator + 1..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const K: usize = 128;

    #[test]
    fn test_mgf1_lengths_and_prefix() {
        let long = mgf1(b"seed", 100);
        assert_eq!(long.len(), 100);
        assert_eq!(mgf1(b"seed", 10), long[..10]);

        // first block is SHA-256(seed || 00000000)
        let first: [u8; 32] = Sha256::digest(b"seed\0\0\0\0").into();
        assert_eq!(long[..32], first);
        assert!(mgf1(b"seed", 0).is_empty());
    }

    #[test]
    fn test_mgf1_known_value() {
        // MGF1-SHA256("bar", 50)
        assert_eq!(
            hex::encode(mgf1(b"bar", 50)),
            "382576a7841021cc28fc4c0948753fb8312090cea942ea4c\
             4e735d10dc724b155f9f6069f289d61daca0cb814502ef04eae1"
        );
    }

    #[test]
    fn test_encode_structure() {
        let mut rng = StdRng::seed_from_u64(7);
        let em = oaep_encode_with_rng(&mut rng, b"structure", K).unwrap();
        assert_eq!(em.len(), K);
        assert_eq!(em[0], 0x00);
        assert_eq!(oaep_decode(&em, K).unwrap(), b"structure");
    }

    #[test]
    fn test_encode_is_randomized() {
        let a = oaep_encode(b"same", K).unwrap();
        let b = oaep_encode(b"same", K).unwrap();
        assert_ne!(a, b);
        assert_eq!(oaep_decode(&a, K).unwrap(), oaep_decode(&b, K).unwrap());
    }

    #[test]
    fn test_capacity_limits() {
        assert_eq!(max_message_len(256), 190);
        assert_eq!(max_message_len(128), 62);

        let max = vec![0xAB; 62];
        let em = oaep_encode(&max, K).unwrap();
        assert_eq!(oaep_decode(&em, K).unwrap(), max);

        assert!(matches!(
            oaep_encode(&[0u8; 63], K),
            Err(CryptoError::MessageTooLong { len: 63, max: 62 })
        ));
        assert!(matches!(
            oaep_encode(b"", 60),
            Err(CryptoError::MessageTooLong { .. })
        ));
    }

    #[test]
    fn test_decode_unmasks_db_and_seed() {
        let mut rng = StdRng::seed_from_u64(42);
        let message = b"unmask both halves";
        let em = oaep_encode_with_rng(&mut rng, message, K).unwrap();

        // recompute the masks by hand and check the recovered DB layout
        let (masked_seed, masked_db) = em[1..].split_at(HASH_LEN);
        let mut seed = masked_seed.to_vec();
        xor_in_place(&mut seed, &mgf1(masked_db, HASH_LEN));
        let db_mask = mgf1(&seed, masked_db.len());
        let mut db = masked_db.to_vec();
        xor_in_place(&mut db, &db_mask);

        assert_eq!(db[..HASH_LEN], label_hash());
        assert_eq!(db[db.len() - message.len() - 1], 0x01);
        assert_eq!(oaep_decode(&em, K).unwrap(), message);
    }

    #[test]
    fn test_empty_message() {
        let em = oaep_encode(b"", K).unwrap();
        assert!(oaep_decode(&em, K).unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_leading_byte() {
        let mut em = oaep_encode(b"leading", K).unwrap();
        em[0] = 0x01;
        assert!(matches!(
            oaep_decode(&em, K),
            Err(CryptoError::DecodingError("leading byte is not 0x00"))
        ));
    }

    #[test]
    fn test_decode_rejects_corrupted_label_hash() {
        let mut em = oaep_encode(b"label", K).unwrap();
        // the byte right after the masked seed is the first byte of masked lHash
        em[1 + HASH_LEN] ^= 0x01;
        assert!(matches!(
            oaep_decode(&em, K),
            Err(CryptoError::DecodingError("label hash mismatch"))
        ));
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        let em = oaep_encode(b"length", K).unwrap();
        assert!(matches!(oaep_decode(&em[1..], K), Err(CryptoError::DecodingError(_))));
        assert!(matches!(oaep_decode(&em, K + 1), Err(CryptoError::DecodingError(_))));
    }

    #[test]
    fn test_decode_rejects_missing_separator() {
        // rebuild a block whose DB holds only lHash and zeros
        let seed = [0x5Au8; HASH_LEN];
        let mut db = label_hash().to_vec();
        db.resize(K - HASH_LEN - 1, 0x00);
        let db_mask = mgf1(&seed, db.len());
        xor_in_place(&mut db, &db_mask);
        let mut masked_seed = seed.to_vec();
        xor_in_place(&mut masked_seed, &mgf1(&db, HASH_LEN));

        let mut em = vec![0x00];
        em.extend_from_slice(&masked_seed);
        em.extend_from_slice(&db);

        assert!(matches!(
            oaep_decode(&em, K),
            Err(CryptoError::DecodingError("missing 0x01 separator"))
        ));
    }
}
