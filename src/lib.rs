//! envstash - managed, password-encrypted copies of project env files.
//!
//! Copies a project's `.env` files into a managed projects directory and
//! optionally encrypts them with a password. Decryption with the wrong
//! password fails authentication; garbage plaintext is never produced.
//!
//! # Architecture
//!
//! ```text
//! .env files → Copy (projects/<name>/) → Encrypt (Argon2id + AES-256-GCM)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use envstash::config::VaultConfig;
//! use envstash::vault::EnvVault;
//! use std::path::Path;
//!
//! let mut vault = EnvVault::open(VaultConfig::default()).unwrap();
//!
//! // Copy and encrypt a project's env files
//! let report = vault
//!     .create_project("api", Path::new("/srv/api"), Some("password"), true)
//!     .unwrap();
//!
//! // Decrypt one later
//! let blob = report.project_dir.join(".env.encrypted");
//! vault.decrypt_file(&blob, "password").unwrap();
//! ```

pub mod config;
pub mod copier;
pub mod crypto;
pub mod error;
pub mod menu;
pub mod registry;
pub mod vault;
pub mod wipe;

pub use config::VaultConfig;
pub use error::{Error, Result};
pub use vault::EnvVault;
