//! Configuration constants and types for envstash.

use std::path::{Path, PathBuf};

/// File names recognized as environment files in a source directory.
pub const ENV_FILE_NAMES: [&str; 4] = [".env", ".env.local", ".env.development", ".env.production"];

/// Suffix appended to encrypted files.
pub const ENCRYPTED_SUFFIX: &str = ".encrypted";

/// Default directory holding managed project copies.
pub const DEFAULT_PROJECTS_DIR: &str = "projects";

/// Default registry file name.
pub const DEFAULT_REGISTRY_FILE: &str = "projects.json";

/// Blob magic number: "EVLT" in bytes.
pub const BLOB_MAGIC: [u8; 4] = [0x45, 0x56, 0x4c, 0x54];

/// Current blob format version.
pub const BLOB_VERSION: u8 = 1;

/// Argon2id parameters for key derivation.
pub mod argon2_params {
    /// Memory cost in KiB (64 MB).
    pub const MEMORY_COST: u32 = 65536;

    /// Time cost (iterations).
    pub const TIME_COST: u32 = 3;

    /// Parallelism factor.
    pub const PARALLELISM: u32 = 4;

    /// Output length in bytes (256 bits).
    pub const OUTPUT_LENGTH: usize = 32;

    /// Salt length in bytes.
    pub const SALT_LENGTH: usize = 32;
}

/// Secure wipe parameters.
pub mod wipe_params {
    /// Number of random overwrite passes.
    pub const RANDOM_PASSES: u8 = 3;

    /// Number of zero overwrite passes.
    pub const ZERO_PASSES: u8 = 1;
}

/// Paths the vault works with.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Directory receiving managed per-project copies.
    pub projects_dir: PathBuf,

    /// JSON file persisting the project registry.
    pub registry_path: PathBuf,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            projects_dir: PathBuf::from(DEFAULT_PROJECTS_DIR),
            registry_path: PathBuf::from(DEFAULT_REGISTRY_FILE),
        }
    }
}

impl VaultConfig {
    /// Create a configuration rooted at a data directory.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            projects_dir: data_dir.join(DEFAULT_PROJECTS_DIR),
            registry_path: data_dir.join(DEFAULT_REGISTRY_FILE),
        }
    }

    /// Directory for a named project's copies.
    pub fn project_dir(&self, name: &str) -> PathBuf {
        self.projects_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_dir_joins_defaults() {
        let config = VaultConfig::in_dir(Path::new("/tmp/data"));
        assert_eq!(config.projects_dir, Path::new("/tmp/data/projects"));
        assert_eq!(config.registry_path, Path::new("/tmp/data/projects.json"));
    }

    #[test]
    fn test_project_dir_nests_under_projects() {
        let config = VaultConfig::default();
        assert_eq!(config.project_dir("api"), Path::new("projects/api"));
    }
}
