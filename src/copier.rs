//! Env file discovery and copying.

use crate::config::ENV_FILE_NAMES;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Check whether a file name is one of the recognized env file names.
pub fn is_env_file(name: &str) -> bool {
    ENV_FILE_NAMES.contains(&name)
}

/// Scan the top level of a directory for recognized env files.
///
/// Returns the matching paths in name order. Fails with `SourceNotFound`
/// if the directory does not exist.
pub fn find_env_files(source_dir: &Path) -> Result<Vec<PathBuf>> {
    if !source_dir.is_dir() {
        return Err(Error::SourceNotFound(source_dir.to_path_buf()));
    }

    let mut found = Vec::new();

    for entry in WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if path.is_dir() {
            continue;
        }

        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if is_env_file(name) {
                found.push(path.to_path_buf());
            }
        }
    }

    found.sort();
    Ok(found)
}

/// Copy recognized env files from a source directory into a destination.
///
/// Creates the destination directory if needed and copies each file
/// byte-for-byte. Returns the copied file names. Fails with `NoEnvFiles`
/// when nothing in the source matches; in that case nothing is created.
pub fn copy_env_files(source_dir: &Path, dest_dir: &Path) -> Result<Vec<String>> {
    let sources = find_env_files(source_dir)?;
    if sources.is_empty() {
        return Err(Error::NoEnvFiles(source_dir.to_path_buf()));
    }

    std::fs::create_dir_all(dest_dir)?;

    let mut copied = Vec::with_capacity(sources.len());
    for source in sources {
        // find_env_files only yields paths with valid UTF-8 names
        let name = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::SourceNotFound(source.clone()))?
            .to_string();

        std::fs::copy(&source, dest_dir.join(&name))?;
        copied.push(name);
    }

    Ok(copied)
}
