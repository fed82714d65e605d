//! Argon2id key derivation for password-based encryption.

use crate::config::argon2_params;
use crate::error::{Error, Result};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;

/// Salt carried alongside each encrypted env file.
pub type Salt = [u8; argon2_params::SALT_LENGTH];

/// Key derivation using Argon2id.
#[derive(Debug, Clone)]
pub struct KeyDerivation {
    salt: Salt,
}

impl KeyDerivation {
    /// Create a new KDF with a random salt (for encryption).
    pub fn new() -> Self {
        let mut salt = [0u8; argon2_params::SALT_LENGTH];
        rand::thread_rng().fill_bytes(&mut salt);
        Self { salt }
    }

    /// Create a KDF from the salt stored in a blob (for decryption).
    pub fn from_salt(salt: Salt) -> Self {
        Self { salt }
    }

    /// Get the salt for storage in the blob.
    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    /// Derive a 256-bit key from a password.
    ///
    /// The same password and salt always yield the same key; decryption
    /// depends on that.
    pub fn derive_key(&self, password: &str) -> Result<[u8; 32]> {
        let params = Params::new(
            argon2_params::MEMORY_COST,
            argon2_params::TIME_COST,
            argon2_params::PARALLELISM,
            Some(argon2_params::OUTPUT_LENGTH),
        )
        .map_err(|e| Error::KeyDerivation(e.to_string()))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut key = [0u8; 32];
        argon2
            .hash_password_into(password.as_bytes(), &self.salt, &mut key)
            .map_err(|e| Error::KeyDerivation(e.to_string()))?;

        Ok(key)
    }
}

impl Default for KeyDerivation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_salt_same_key() {
        let kdf = KeyDerivation::from_salt([7u8; 32]);

        let key1 = kdf.derive_key("hunter2").unwrap();
        let key2 = kdf.derive_key("hunter2").unwrap();

        assert_eq!(key1, key2);
    }

    #[test]
    fn test_different_passwords_different_keys() {
        let kdf = KeyDerivation::from_salt([7u8; 32]);

        let key1 = kdf.derive_key("hunter2").unwrap();
        let key2 = kdf.derive_key("hunter3").unwrap();

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_different_salts_different_keys() {
        let key1 = KeyDerivation::from_salt([1u8; 32])
            .derive_key("hunter2")
            .unwrap();
        let key2 = KeyDerivation::from_salt([2u8; 32])
            .derive_key("hunter2")
            .unwrap();

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_new_generates_random_salt() {
        let kdf1 = KeyDerivation::new();
        let kdf2 = KeyDerivation::new();

        assert_ne!(kdf1.salt(), kdf2.salt());
    }
}
