//! envstash - copy and encrypt project env files.
//!
//! Interactive menu over the vault: create a project (copy + optional
//! encryption), decrypt an encrypted env file, exit.

use clap::Parser;
use envstash::menu::{self, EncryptionChoice, MenuChoice, Request, Response};
use envstash::{EnvVault, VaultConfig};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "envstash")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Copies a project's .env files into a managed vault and encrypts them",
    long_about = "Copies recognized .env files into a managed projects directory, optionally \
                  encrypting them with a password (Argon2id + AES-256-GCM)."
)]
struct Cli {
    /// Directory holding the projects/ tree and projects.json registry
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = VaultConfig::in_dir(&cli.data_dir);
    std::fs::create_dir_all(&config.projects_dir)?;
    let mut vault = EnvVault::open(config)?;

    loop {
        print_menu();

        let choice = match read_line("Choose an option (1-3): ")? {
            Some(line) => line,
            None => break,
        };

        let request = match menu::parse_choice(&choice) {
            Some(MenuChoice::CreateProject) => match prompt_create()? {
                Some(request) => request,
                None => break,
            },
            Some(MenuChoice::DecryptFile) => match prompt_decrypt()? {
                Some(request) => request,
                None => break,
            },
            Some(MenuChoice::Exit) => Request::Exit,
            None => {
                eprintln!("Invalid choice. Please try again.");
                continue;
            }
        };

        match menu::dispatch(&mut vault, request) {
            Ok(Response::Exit) => {
                println!("Exiting...");
                break;
            }
            Ok(response) => render(&response),
            // Per-command errors keep the menu running
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    Ok(())
}

fn print_menu() {
    println!();
    println!("--- envstash ---");
    println!("1. Create a new project and copy .env files");
    println!("2. Decrypt an encrypted .env file");
    println!("3. Exit");
}

fn render(response: &Response) {
    match response {
        Response::ProjectCreated(report) => {
            for name in &report.copied {
                println!("Copied '{}' to project '{}'.", name, report.name);
            }
            for name in &report.encrypted {
                println!("Encrypted '{}'.", name);
            }
            if report.plaintext_deleted {
                println!("Plaintext copies securely deleted.");
            }
            println!(
                "Project '{}' created in {}.",
                report.name,
                report.project_dir.display()
            );
        }
        Response::FileDecrypted(path) => {
            println!("Decrypted to '{}'.", path.display());
        }
        Response::Projects(names) => {
            if names.is_empty() {
                println!("(no projects)");
            } else {
                for name in names {
                    println!("{}", name);
                }
            }
        }
        Response::Exit => {}
    }
}

/// Gather answers for the create-project flow.
///
/// Returns `None` when stdin is exhausted.
fn prompt_create() -> anyhow::Result<Option<Request>> {
    let name = loop {
        match read_line("Enter new project name: ")? {
            Some(line) if !line.is_empty() => break line,
            Some(_) => eprintln!("Project name cannot be empty."),
            None => return Ok(None),
        }
    };

    let source_dir = match read_line("Enter the project path (where the .env files are): ")? {
        Some(line) => PathBuf::from(line),
        None => return Ok(None),
    };

    let encryption = match read_line("Encrypt the copied files? (Y/n) [Y]: ")? {
        Some(answer) if yes(&answer) => {
            let password = prompt_password("Enter a password to encrypt the copied files: ");
            let confirm = prompt_password("Confirm the password: ");

            let delete_plaintext = match read_line("Delete the unencrypted copies? (Y/n) [Y]: ")? {
                Some(answer) => yes(&answer),
                None => return Ok(None),
            };

            Some(EncryptionChoice {
                password,
                confirm,
                delete_plaintext,
            })
        }
        Some(_) => None,
        None => return Ok(None),
    };

    Ok(Some(Request::CreateProject {
        name,
        source_dir,
        encryption,
    }))
}

fn prompt_decrypt() -> anyhow::Result<Option<Request>> {
    let path = match read_line("Enter the path of the encrypted .env file: ")? {
        Some(line) => PathBuf::from(line),
        None => return Ok(None),
    };

    let password = prompt_password("Enter the password to decrypt the file: ");

    Ok(Some(Request::DecryptFile { path, password }))
}

/// Y/n answer defaulting to yes.
fn yes(answer: &str) -> bool {
    let answer = answer.trim();
    answer.is_empty() || answer.eq_ignore_ascii_case("y")
}

/// Print a prompt and read one trimmed line; `None` on EOF.
fn read_line(prompt: &str) -> anyhow::Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    let bytes = io::stdin().read_line(&mut line)?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt_password(prompt: &str) -> String {
    rpassword::prompt_password(prompt).unwrap_or_else(|_| {
        eprint!("{}", prompt);
        let _ = io::stderr().flush();
        let mut password = String::new();
        let _ = io::stdin().read_line(&mut password);
        password.trim().to_string()
    })
}
