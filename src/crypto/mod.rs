//! Cryptographic operations for envstash.
//!
//! This module provides:
//! - AES-256-GCM authenticated encryption
//! - Argon2id password-based key derivation
//! - The `EncryptedFile` on-disk blob format

mod cipher;
mod kdf;

pub use cipher::{
    check_password_confirmation, decrypt_file_data, encrypt_file_data, Cipher, EncryptedFile,
};
pub use kdf::{KeyDerivation, Salt};
