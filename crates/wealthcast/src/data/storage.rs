//! Per-scenario file storage
//!
//! Directory structure:
//! ~/.wealthcast/
//!   wealthcast.log
//!   scenarios/
//!     household.yaml
//!     early-retirement.yaml

use std::fs;
use std::path::{Path, PathBuf};

use super::scenario::ScenarioFile;
use crate::util::io::atomic_write;

/// Error types for storage operations
#[derive(Debug)]
pub enum StorageError {
    Io(String),
    Parse(String),
    Serialize(String),
    NotFound(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "IO error: {msg}"),
            StorageError::Parse(msg) => write!(f, "Parse error: {msg}"),
            StorageError::Serialize(msg) => write!(f, "Serialization error: {msg}"),
            StorageError::NotFound(name) => write!(f, "Scenario not found: {name}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Manages the data directory holding scenario files
pub struct DataDirectory {
    root: PathBuf,
}

impl DataDirectory {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get the default data directory path (~/.wealthcast/)
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".wealthcast")
    }

    fn scenarios_dir(&self) -> PathBuf {
        self.root.join("scenarios")
    }

    fn scenario_path(&self, name: &str) -> PathBuf {
        self.scenarios_dir()
            .join(format!("{}.yaml", sanitize_filename(name)))
    }

    /// Check if the data directory exists and has been initialized
    pub fn exists(&self) -> bool {
        self.root.exists() && self.scenarios_dir().exists()
    }

    /// Initialize the data directory structure
    pub fn init(&self) -> Result<(), StorageError> {
        fs::create_dir_all(self.scenarios_dir()).map_err(|e| {
            StorageError::Io(format!("Failed to create scenarios directory: {e}"))
        })
    }

    /// Names of stored scenarios, sorted.
    pub fn list_scenarios(&self) -> Result<Vec<String>, StorageError> {
        let dir = self.scenarios_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&dir)
            .map_err(|e| StorageError::Io(format!("Failed to read scenarios directory: {e}")))?;

        let mut names: Vec<String> = entries
            .flatten()
            .filter_map(|entry| {
                let path = entry.path();
                if path
                    .extension()
                    .is_some_and(|ext| ext == "yaml" || ext == "yml")
                    && let Some(name) = path.file_stem().and_then(|s| s.to_str())
                {
                    Some(name.to_string())
                } else {
                    None
                }
            })
            .collect();
        names.sort();
        Ok(names)
    }

    pub fn has_scenario(&self, name: &str) -> bool {
        self.scenario_path(name).exists()
    }

    /// Load a stored scenario by name
    pub fn load_scenario(&self, name: &str) -> Result<ScenarioFile, StorageError> {
        let path = self.scenario_path(name);
        if !path.exists() {
            return Err(StorageError::NotFound(name.to_string()));
        }
        load_scenario_from_path(&path)
    }

    /// Resolve a command-line argument: a stored scenario name, or a path to
    /// a YAML file.
    pub fn resolve(&self, name_or_path: &str) -> Result<ScenarioFile, StorageError> {
        if self.has_scenario(name_or_path) {
            return self.load_scenario(name_or_path);
        }
        let path = Path::new(name_or_path);
        if path.is_file() {
            return load_scenario_from_path(path);
        }
        Err(StorageError::NotFound(name_or_path.to_string()))
    }

    /// Save a scenario under `name`, replacing any previous version
    pub fn save_scenario(&self, name: &str, scenario: &ScenarioFile) -> Result<(), StorageError> {
        if !self.exists() {
            self.init()?;
        }

        let yaml = scenario
            .to_yaml()
            .map_err(|e| StorageError::Serialize(format!("Failed to serialize scenario: {e}")))?;

        atomic_write(&self.scenario_path(name), &yaml)
            .map_err(|e| StorageError::Io(format!("Failed to write scenario: {e}")))
    }

    /// Delete a scenario file
    pub fn delete_scenario(&self, name: &str) -> Result<(), StorageError> {
        let path = self.scenario_path(name);
        if path.exists() {
            fs::remove_file(path)
                .map_err(|e| StorageError::Io(format!("Failed to delete scenario: {e}")))?;
        }
        Ok(())
    }

    /// Get the root path of the data directory
    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn load_scenario_from_path(path: &Path) -> Result<ScenarioFile, StorageError> {
    let content = fs::read_to_string(path)
        .map_err(|e| StorageError::Io(format!("Failed to read {}: {e}", path.display())))?;

    ScenarioFile::from_yaml(&content)
        .map_err(|e| StorageError::Parse(format!("Failed to parse {}: {e}", path.display())))
}

/// Sanitize a filename to be safe for the filesystem
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
