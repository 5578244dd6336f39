// RSA-OAEP Engine
// Caller-owned key slots with optional lazy loading from a key store

use log::{debug, info};

use super::keygen::{generate_keypair, KeyGenConfig, RsaKeyPair, RsaPrivateKey, RsaPublicKey};
use super::keystore::KeyStore;
use crate::error::{CryptoError, CryptoResult, KeyKind};

/// Holds at most one public and one private key.
///
/// Each slot is filled by [`RsaOaep::generate_keys`], by the setters, or on first use
/// from the attached [`KeyStore`]. A missing key after that single load attempt is an
/// error rather than a prompt to generate one.
#[derive(Debug, Clone)]
pub struct RsaOaep {
    public_key: Option<RsaPublicKey>,
    private_key: Option<RsaPrivateKey>,
    keygen: KeyGenConfig,
    store: Option<KeyStore>,
}

impl Default for RsaOaep {
    fn default() -> Self {
        Self::new(KeyGenConfig::default())
    }
}

impl RsaOaep {
    pub fn new(keygen: KeyGenConfig) -> Self {
        Self {
            public_key: None,
            private_key: None,
            keygen,
            store: None,
        }
    }

    /// Attach a key store used by [`RsaOaep::load_keys`] and [`RsaOaep::save_keys`]
    pub fn with_store(mut self, store: KeyStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn key_size(&self) -> u32 {
        self.keygen.key_size
    }

    pub fn store(&self) -> Option<&KeyStore> {
        self.store.as_ref()
    }

    pub fn public_key(&self) -> Option<&RsaPublicKey> {
        self.public_key.as_ref()
    }

    pub fn private_key(&self) -> Option<&RsaPrivateKey> {
        self.private_key.as_ref()
    }

    pub fn set_public_key(&mut self, key: RsaPublicKey) {
        self.keygen.key_size = key.key_size;
        self.public_key = Some(key);
    }

    pub fn set_private_key(&mut self, key: RsaPrivateKey) {
        self.keygen.key_size = key.key_size;
        self.private_key = Some(key);
    }

    /// Generate a fresh pair into both slots, replacing whatever was there
    pub fn generate_keys(&mut self) -> CryptoResult<RsaKeyPair> {
        let keypair = generate_keypair(&self.keygen)?;
        info!("installed new {}-bit key pair", keypair.key_size());

        self.public_key = Some(keypair.public_key.clone());
        self.private_key = Some(keypair.private_key.clone());
        Ok(keypair)
    }

    /// Persist whichever keys are loaded
    pub fn save_keys(&self) -> CryptoResult<()> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| CryptoError::InvalidConfig("no key store attached".to_string()))?;

        if self.public_key.is_none() && self.private_key.is_none() {
            return Err(CryptoError::MissingKey(KeyKind::Public));
        }
        if let Some(key) = &self.public_key {
            store.save_public(key)?;
        }
        if let Some(key) = &self.private_key {
            store.save_private(key)?;
        }
        Ok(())
    }

    /// Fill empty slots from the store. Returns true if either slot now holds a key.
    pub fn load_keys(&mut self) -> CryptoResult<bool> {
        if let Some(store) = &self.store {
            if self.public_key.is_none() {
                if let Some(key) = store.load_public()? {
                    debug!("loaded {}-bit public key", key.key_size);
                    self.keygen.key_size = key.key_size;
                    self.public_key = Some(key);
                }
            }
            if self.private_key.is_none() {
                if let Some(key) = store.load_private()? {
                    debug!("loaded {}-bit private key", key.key_size);
                    self.keygen.key_size = key.key_size;
                    self.private_key = Some(key);
                }
            }
        }
        Ok(self.public_key.is_some() || self.private_key.is_some())
    }

    pub fn encrypt(&mut self, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        if self.public_key.is_none() {
            self.load_keys()?;
        }
        self.public_key
            .as_ref()
            .ok_or(CryptoError::MissingKey(KeyKind::Public))?
            .encrypt(plaintext)
    }

    pub fn decrypt(&mut self, ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
        if self.private_key.is_none() {
            self.load_keys()?;
        }
        self.private_key
            .as_ref()
            .ok_or(CryptoError::MissingKey(KeyKind::Private))?
            .decrypt(ciphertext)
    }
}
