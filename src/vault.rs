//! Vault operations - the main interface.

use crate::config::{VaultConfig, ENCRYPTED_SUFFIX};
use crate::copier::copy_env_files;
use crate::crypto::{decrypt_file_data, encrypt_file_data, EncryptedFile};
use crate::error::{Error, Result};
use crate::registry::{JsonFileStore, ProjectRegistry};
use crate::wipe::secure_delete;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// What happened while creating a project, for CLI rendering.
#[derive(Debug, Clone)]
pub struct ProjectReport {
    /// Project name.
    pub name: String,
    /// Managed directory the files were copied into.
    pub project_dir: PathBuf,
    /// Names of the copied env files.
    pub copied: Vec<String>,
    /// Names of the files that were encrypted (empty when encryption was
    /// skipped).
    pub encrypted: Vec<String>,
    /// Whether the plaintext copies were securely deleted afterwards.
    pub plaintext_deleted: bool,
}

/// The main envstash interface: copier, cipher, wipe, and registry glued
/// together over a [`VaultConfig`].
pub struct EnvVault {
    config: VaultConfig,
    registry: ProjectRegistry,
}

impl EnvVault {
    /// Open a vault with the JSON registry at the configured path.
    pub fn open(config: VaultConfig) -> Result<Self> {
        let store = JsonFileStore::new(&config.registry_path);
        let registry = ProjectRegistry::open(Box::new(store))?;
        Ok(Self { config, registry })
    }

    /// Open a vault over an explicit registry (used by tests to inject a
    /// memory store).
    pub fn with_registry(config: VaultConfig, registry: ProjectRegistry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    pub fn registry(&self) -> &ProjectRegistry {
        &self.registry
    }

    /// Create a project: copy its env files into the managed directory and
    /// optionally encrypt them.
    ///
    /// The name must be unused and the source directory must hold at least
    /// one recognized env file; both are checked before anything is written.
    /// When a password is given, every copied file is encrypted to
    /// `<name>.encrypted`, and with `delete_plaintext` the plaintext copies
    /// are overwritten and removed afterwards. The project is registered
    /// once the copy has succeeded.
    pub fn create_project(
        &mut self,
        name: &str,
        source_dir: &Path,
        password: Option<&str>,
        delete_plaintext: bool,
    ) -> Result<ProjectReport> {
        if self.registry.contains(name) {
            return Err(Error::DuplicateProject(name.to_string()));
        }

        let project_dir = self.config.project_dir(name);
        let copied = copy_env_files(source_dir, &project_dir)?;

        let mut encrypted = Vec::new();
        let mut plaintext_deleted = false;

        if let Some(password) = password {
            for filename in &copied {
                let plaintext_path = project_dir.join(filename);
                self.encrypt_file(&plaintext_path, password)?;
                encrypted.push(format!("{}{}", filename, ENCRYPTED_SUFFIX));
            }

            if delete_plaintext {
                for filename in &copied {
                    secure_delete(&project_dir.join(filename))?;
                }
                plaintext_deleted = true;
            }
        }

        self.registry.create_project(name, source_dir)?;

        Ok(ProjectReport {
            name: name.to_string(),
            project_dir,
            copied,
            encrypted,
            plaintext_deleted,
        })
    }

    /// Encrypt a single file, writing `<path>.encrypted` alongside it.
    ///
    /// The original file is left in place.
    pub fn encrypt_file(&self, path: &Path, password: &str) -> Result<PathBuf> {
        if !path.is_file() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let filename = file_name(path)?;
        let plaintext = std::fs::read(path)?;

        let encrypted = encrypt_file_data(&plaintext, &filename, password)?;
        let output_path = encrypted_path(path);
        std::fs::write(&output_path, encrypted.to_bytes()?)?;

        Ok(output_path)
    }

    /// Decrypt an encrypted env file, writing the original filename next to
    /// the blob.
    ///
    /// Nothing is written unless authentication succeeds.
    pub fn decrypt_file(&self, path: &Path, password: &str) -> Result<PathBuf> {
        if !path.is_file() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let data = std::fs::read(path)?;
        let encrypted = EncryptedFile::from_bytes(&data).map_err(|e| match e {
            Error::InvalidMagic => Error::NotEncrypted(path.to_path_buf()),
            other => other,
        })?;

        let plaintext = decrypt_file_data(&encrypted, password)?;

        let output_path = decrypted_path(path, &encrypted.filename);
        std::fs::write(&output_path, plaintext)?;

        Ok(output_path)
    }
}

/// `<path>.encrypted`, keeping the full original name.
fn encrypted_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.file_name().unwrap_or_default());
    name.push(ENCRYPTED_SUFFIX);
    path.with_file_name(name)
}

/// Output path for a decrypted blob: the stored filename next to the blob,
/// reduced to its final component so a crafted blob cannot escape the
/// directory. Falls back to stripping the `.encrypted` suffix.
fn decrypted_path(blob_path: &Path, stored_name: &str) -> PathBuf {
    let name = Path::new(stored_name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            let blob_name = blob_path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("decrypted");
            blob_name
                .strip_suffix(ENCRYPTED_SUFFIX)
                .unwrap_or(blob_name)
                .to_string()
        });

    blob_path.with_file_name(name)
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| Error::FileNotFound(path.to_path_buf()))
}
