//! Menu command dispatcher.
//!
//! The interactive loop in `main.rs` only gathers input; everything it can
//! do is expressed as a [`Request`] and handled here, so the whole menu is
//! testable without a terminal.

use crate::crypto::check_password_confirmation;
use crate::error::Result;
use crate::vault::{EnvVault, ProjectReport};
use std::path::PathBuf;

/// Top-level menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CreateProject,
    DecryptFile,
    Exit,
}

/// Map a menu answer (`1`/`2`/`3`) to a choice.
pub fn parse_choice(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "1" => Some(MenuChoice::CreateProject),
        "2" => Some(MenuChoice::DecryptFile),
        "3" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// Encryption answers collected for a new project.
#[derive(Debug, Clone)]
pub struct EncryptionChoice {
    /// Password for the copied files.
    pub password: String,
    /// Confirmation prompt answer; must match exactly.
    pub confirm: String,
    /// Whether to securely delete the plaintext copies afterwards.
    pub delete_plaintext: bool,
}

/// A fully-specified menu command.
#[derive(Debug, Clone)]
pub enum Request {
    CreateProject {
        name: String,
        source_dir: PathBuf,
        encryption: Option<EncryptionChoice>,
    },
    DecryptFile {
        path: PathBuf,
        password: String,
    },
    ListProjects,
    Exit,
}

/// What a dispatched command produced, for the CLI to render.
#[derive(Debug)]
pub enum Response {
    ProjectCreated(ProjectReport),
    FileDecrypted(PathBuf),
    Projects(Vec<String>),
    Exit,
}

/// Execute a request against the vault.
///
/// The password confirmation is checked before any file is touched, so a
/// mismatch aborts the whole create without writing anything.
pub fn dispatch(vault: &mut EnvVault, request: Request) -> Result<Response> {
    match request {
        Request::CreateProject {
            name,
            source_dir,
            encryption,
        } => {
            let (password, delete_plaintext) = match &encryption {
                Some(choice) => {
                    check_password_confirmation(&choice.password, &choice.confirm)?;
                    (Some(choice.password.as_str()), choice.delete_plaintext)
                }
                None => (None, false),
            };

            let report = vault.create_project(&name, &source_dir, password, delete_plaintext)?;
            Ok(Response::ProjectCreated(report))
        }

        Request::DecryptFile { path, password } => {
            let output = vault.decrypt_file(&path, &password)?;
            Ok(Response::FileDecrypted(output))
        }

        Request::ListProjects => {
            let names = vault
                .registry()
                .list_projects()
                .into_iter()
                .map(str::to_string)
                .collect();
            Ok(Response::Projects(names))
        }

        Request::Exit => Ok(Response::Exit),
    }
}
