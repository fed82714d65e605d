//! Project registry: name -> source directory, with pluggable persistence.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A registered project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project name.
    pub name: String,
    /// Directory the env files were copied from.
    pub source_dir: PathBuf,
}

/// Storage backend for the registry.
pub trait RegistryStore {
    /// Load all projects, keyed by name.
    fn load(&self) -> Result<BTreeMap<String, Project>>;

    /// Persist all projects.
    fn save(&self, projects: &BTreeMap<String, Project>) -> Result<()>;
}

/// JSON file backend.
///
/// Persists the registry as a pretty-printed name -> source_dir mapping.
/// A missing file is an empty registry.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl RegistryStore for JsonFileStore {
    fn load(&self) -> Result<BTreeMap<String, Project>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let data = std::fs::read_to_string(&self.path)?;
        let mapping: BTreeMap<String, PathBuf> = serde_json::from_str(&data)?;

        Ok(mapping
            .into_iter()
            .map(|(name, source_dir)| {
                let project = Project {
                    name: name.clone(),
                    source_dir,
                };
                (name, project)
            })
            .collect())
    }

    fn save(&self, projects: &BTreeMap<String, Project>) -> Result<()> {
        let mapping: BTreeMap<&str, &Path> = projects
            .iter()
            .map(|(name, project)| (name.as_str(), project.source_dir.as_path()))
            .collect();

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let data = serde_json::to_string_pretty(&mapping)?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }
}

/// In-memory backend for tests and non-persistent use.
#[derive(Default)]
pub struct MemoryStore {
    projects: RefCell<BTreeMap<String, Project>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RegistryStore for MemoryStore {
    fn load(&self) -> Result<BTreeMap<String, Project>> {
        Ok(self.projects.borrow().clone())
    }

    fn save(&self, projects: &BTreeMap<String, Project>) -> Result<()> {
        *self.projects.borrow_mut() = projects.clone();
        Ok(())
    }
}

/// The project registry, loaded once and persisted on every mutation.
pub struct ProjectRegistry {
    projects: BTreeMap<String, Project>,
    store: Box<dyn RegistryStore>,
}

impl ProjectRegistry {
    /// Open a registry over the given store.
    pub fn open(store: Box<dyn RegistryStore>) -> Result<Self> {
        let projects = store.load()?;
        Ok(Self { projects, store })
    }

    /// Register a new project.
    ///
    /// Fails with `DuplicateProject` if the name is taken; the store is
    /// untouched in that case.
    pub fn create_project(&mut self, name: &str, source_dir: &Path) -> Result<&Project> {
        if self.projects.contains_key(name) {
            return Err(Error::DuplicateProject(name.to_string()));
        }

        let project = Project {
            name: name.to_string(),
            source_dir: source_dir.to_path_buf(),
        };
        self.projects.insert(name.to_string(), project);
        self.store.save(&self.projects)?;

        Ok(&self.projects[name])
    }

    /// All project names, sorted.
    pub fn list_projects(&self) -> Vec<&str> {
        self.projects.keys().map(String::as_str).collect()
    }

    /// Look up a project by name.
    pub fn get_project(&self, name: &str) -> Option<&Project> {
        self.projects.get(name)
    }

    /// Whether a project name is taken.
    pub fn contains(&self, name: &str) -> bool {
        self.projects.contains_key(name)
    }
}
