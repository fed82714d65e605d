//! AES-256-GCM authenticated encryption and the on-disk blob format.

use crate::config::{BLOB_MAGIC, BLOB_VERSION};
use crate::crypto::kdf::{KeyDerivation, Salt};
use crate::error::{Error, Result};
use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Nonce size for AES-GCM (96 bits).
const NONCE_SIZE: usize = 12;

/// Authentication tag size (128 bits).
const TAG_SIZE: usize = 16;

/// AES-256-GCM cipher wrapper.
pub struct Cipher {
    cipher: Aes256Gcm,
}

impl Cipher {
    /// Create a new cipher from a derived key.
    pub fn new(key: [u8; 32]) -> Result<Self> {
        let cipher = Aes256Gcm::new_from_slice(&key)
            .map_err(|e| Error::Encryption(e.to_string()))?;
        Ok(Self { cipher })
    }

    /// Encrypt data with a random nonce.
    ///
    /// Returns: nonce (12 bytes) || ciphertext || tag (16 bytes)
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| Error::Encryption(e.to_string()))?;

        let mut payload = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        payload.extend_from_slice(&nonce_bytes);
        payload.extend_from_slice(&ciphertext);

        Ok(payload)
    }

    /// Decrypt a payload produced by `encrypt`.
    ///
    /// Fails with `Error::Decryption` on any tag mismatch; no partial
    /// plaintext is ever returned.
    pub fn decrypt(&self, payload: &[u8]) -> Result<Vec<u8>> {
        if payload.len() < NONCE_SIZE + TAG_SIZE {
            return Err(Error::Decryption);
        }

        let (nonce_bytes, ciphertext) = payload.split_at(NONCE_SIZE);
        let nonce = Nonce::from_slice(nonce_bytes);

        self.cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| Error::Decryption)
    }
}

/// An encrypted env file with everything needed to decrypt it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedFile {
    /// Name the plaintext file had before encryption.
    pub filename: String,
    /// Salt for key derivation.
    pub salt: Salt,
    /// The encrypted payload (nonce || ciphertext || tag).
    pub payload: Vec<u8>,
}

impl EncryptedFile {
    /// Serialize to the on-disk blob: magic || version || bincode body.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let body = bincode::serialize(self)?;
        let mut bytes = Vec::with_capacity(BLOB_MAGIC.len() + 1 + body.len());
        bytes.extend_from_slice(&BLOB_MAGIC);
        bytes.push(BLOB_VERSION);
        bytes.extend_from_slice(&body);
        Ok(bytes)
    }

    /// Parse an on-disk blob, checking magic and version.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < BLOB_MAGIC.len() + 1 || bytes[..BLOB_MAGIC.len()] != BLOB_MAGIC {
            return Err(Error::InvalidMagic);
        }

        let version = bytes[BLOB_MAGIC.len()];
        if version != BLOB_VERSION {
            return Err(Error::VersionMismatch {
                expected: BLOB_VERSION,
                found: version,
            });
        }

        let file = bincode::deserialize(&bytes[BLOB_MAGIC.len() + 1..])?;
        Ok(file)
    }
}

/// Encrypt a file's bytes with a password.
///
/// Uses Argon2id for key derivation and AES-256-GCM for encryption. A fresh
/// salt and nonce are drawn per call, so encrypting the same bytes twice
/// yields different blobs.
pub fn encrypt_file_data(plaintext: &[u8], filename: &str, password: &str) -> Result<EncryptedFile> {
    let kdf = KeyDerivation::new();
    let key = kdf.derive_key(password)?;
    let cipher = Cipher::new(key)?;

    let payload = cipher.encrypt(plaintext)?;

    Ok(EncryptedFile {
        filename: filename.to_string(),
        salt: *kdf.salt(),
        payload,
    })
}

/// Decrypt an encrypted env file with a password.
pub fn decrypt_file_data(encrypted: &EncryptedFile, password: &str) -> Result<Vec<u8>> {
    let kdf = KeyDerivation::from_salt(encrypted.salt);
    let key = kdf.derive_key(password)?;
    let cipher = Cipher::new(key)?;

    cipher.decrypt(&encrypted.payload)
}

/// Check that a password and its confirmation match exactly.
///
/// Called before any encryption output is written; a mismatch aborts the
/// whole operation.
pub fn check_password_confirmation(password: &str, confirm: &str) -> Result<()> {
    if password != confirm {
        return Err(Error::PasswordMismatch);
    }
    Ok(())
}
