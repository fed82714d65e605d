//! Error types for envstash.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for envstash operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in envstash operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source directory does not exist.
    #[error("Source directory not found: {0}")]
    SourceNotFound(PathBuf),

    /// Source directory exists but holds no recognized env files.
    #[error("No env files found in directory: {0}")]
    NoEnvFiles(PathBuf),

    /// Project name is already registered.
    #[error("Project already exists: {0}")]
    DuplicateProject(String),

    /// File to encrypt or decrypt does not exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File is not an envstash encrypted blob.
    #[error("Not an encrypted env file: {0}")]
    NotEncrypted(PathBuf),

    /// Encryption error.
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Decryption error (wrong password or corrupted data).
    #[error("Decryption failed: wrong password or corrupted data")]
    Decryption,

    /// Key derivation error.
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// Password and confirmation do not match.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Invalid blob magic number.
    #[error("Invalid file format: expected magic 'EVLT'")]
    InvalidMagic,

    /// Blob format version mismatch.
    #[error("File format version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u8, found: u8 },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
