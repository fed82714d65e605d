//! End-to-end tests for the envstash vault.

use envstash::config::VaultConfig;
use envstash::error::Error;
use envstash::menu::{self, EncryptionChoice, Request, Response};
use envstash::vault::EnvVault;
use std::fs;
use tempfile::TempDir;

/// Helper to create a source project directory with env files.
fn setup_source(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    for (name, content) in files {
        fs::write(temp_dir.path().join(name), content).expect("Failed to write env file");
    }
    temp_dir
}

fn open_vault(data_dir: &TempDir) -> EnvVault {
    EnvVault::open(VaultConfig::in_dir(data_dir.path())).expect("Failed to open vault")
}

#[test]
fn test_full_workflow_create_encrypt_decrypt() {
    let data_dir = TempDir::new().unwrap();
    let source = setup_source(&[
        (".env", "API_KEY=abc123\n"),
        (".env.production", "API_KEY=prod456\n"),
    ]);

    let mut vault = open_vault(&data_dir);
    let report = vault
        .create_project("api", source.path(), Some("test_password_123"), true)
        .expect("Failed to create project");

    assert_eq!(report.copied, vec![".env", ".env.production"]);
    assert_eq!(
        report.encrypted,
        vec![".env.encrypted", ".env.production.encrypted"]
    );

    // Plaintext copies were deleted, blobs remain
    assert!(!report.project_dir.join(".env").exists());
    assert!(report.project_dir.join(".env.encrypted").exists());

    // Decrypt and verify content
    let restored = vault
        .decrypt_file(
            &report.project_dir.join(".env.production.encrypted"),
            "test_password_123",
        )
        .expect("Failed to decrypt");
    assert_eq!(fs::read_to_string(restored).unwrap(), "API_KEY=prod456\n");
}

#[test]
fn test_wrong_password_fails_and_writes_nothing() {
    let data_dir = TempDir::new().unwrap();
    let source = setup_source(&[(".env", "SECRET=1\n")]);

    let mut vault = open_vault(&data_dir);
    let report = vault
        .create_project("api", source.path(), Some("right"), true)
        .unwrap();

    let blob = report.project_dir.join(".env.encrypted");
    let result = vault.decrypt_file(&blob, "wrong");

    assert!(matches!(result, Err(Error::Decryption)));
    assert!(!report.project_dir.join(".env").exists());
}

#[test]
fn test_registry_persists_across_reopen() {
    let data_dir = TempDir::new().unwrap();
    let source = setup_source(&[(".env", "A=1\n")]);

    {
        let mut vault = open_vault(&data_dir);
        vault
            .create_project("api", source.path(), None, false)
            .unwrap();
    }

    let mut vault = open_vault(&data_dir);
    assert_eq!(vault.registry().list_projects(), vec!["api"]);
    assert_eq!(
        vault.registry().get_project("api").unwrap().source_dir,
        source.path()
    );

    // The persisted name still blocks reuse
    let result = vault.create_project("api", source.path(), None, false);
    assert!(matches!(result, Err(Error::DuplicateProject(_))));
}

#[test]
fn test_source_without_env_files() {
    let data_dir = TempDir::new().unwrap();
    let source = setup_source(&[("config.yaml", "not: env\n")]);

    let mut vault = open_vault(&data_dir);
    let result = vault.create_project("api", source.path(), None, false);

    assert!(matches!(result, Err(Error::NoEnvFiles(_))));
}

#[test]
fn test_missing_source_dir() {
    let data_dir = TempDir::new().unwrap();
    let mut vault = open_vault(&data_dir);

    let result = vault.create_project(
        "api",
        std::path::Path::new("/definitely/not/here"),
        None,
        false,
    );

    assert!(matches!(result, Err(Error::SourceNotFound(_))));
}

#[test]
fn test_dispatcher_mismatched_confirmation_leaves_no_trace() {
    let data_dir = TempDir::new().unwrap();
    let source = setup_source(&[(".env", "SECRET=1\n")]);

    let mut vault = open_vault(&data_dir);
    let result = menu::dispatch(
        &mut vault,
        Request::CreateProject {
            name: "api".into(),
            source_dir: source.path().to_path_buf(),
            encryption: Some(EncryptionChoice {
                password: "pw".into(),
                confirm: "pw2".into(),
                delete_plaintext: true,
            }),
        },
    );

    assert!(matches!(result, Err(Error::PasswordMismatch)));
    assert!(!vault.config().project_dir("api").exists());
    assert!(!vault.registry().contains("api"));
    // Source plaintext untouched
    assert_eq!(
        fs::read_to_string(source.path().join(".env")).unwrap(),
        "SECRET=1\n"
    );
}

#[test]
fn test_dispatcher_full_flow() {
    let data_dir = TempDir::new().unwrap();
    let source = setup_source(&[(".env.local", "LOCAL=1\n")]);

    let mut vault = open_vault(&data_dir);

    let response = menu::dispatch(
        &mut vault,
        Request::CreateProject {
            name: "web".into(),
            source_dir: source.path().to_path_buf(),
            encryption: Some(EncryptionChoice {
                password: "pw".into(),
                confirm: "pw".into(),
                delete_plaintext: false,
            }),
        },
    )
    .unwrap();

    let report = match response {
        Response::ProjectCreated(report) => report,
        other => panic!("unexpected response: {:?}", other),
    };

    // Plaintext kept alongside the blob when deletion is declined
    assert!(report.project_dir.join(".env.local").exists());
    assert!(report.project_dir.join(".env.local.encrypted").exists());

    let response = menu::dispatch(
        &mut vault,
        Request::DecryptFile {
            path: report.project_dir.join(".env.local.encrypted"),
            password: "pw".into(),
        },
    )
    .unwrap();

    match response {
        Response::FileDecrypted(path) => {
            assert_eq!(fs::read_to_string(path).unwrap(), "LOCAL=1\n");
        }
        other => panic!("unexpected response: {:?}", other),
    }
}

#[test]
fn test_encrypted_blob_is_not_plaintext() {
    let data_dir = TempDir::new().unwrap();
    let source = setup_source(&[(".env", "VERY_SECRET_VALUE=12345\n")]);

    let mut vault = open_vault(&data_dir);
    let report = vault
        .create_project("api", source.path(), Some("pw"), true)
        .unwrap();

    let blob = fs::read(report.project_dir.join(".env.encrypted")).unwrap();
    let needle = b"VERY_SECRET_VALUE";
    assert!(!blob
        .windows(needle.len())
        .any(|window| window == needle));
}
