// Configuration loaded from YAML

use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, error};

use crate::backend::{Backend, FileBackend, NullBackend, SqliteBackend, validate_key};
use crate::store::{DEFAULT_STORAGE_KEY, TaskStore};

/// Which backend persists the collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// One JSON file per key
    #[default]
    File,
    /// Key/value table in SQLite
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory the backend stores its data in
    pub store_path: PathBuf,
    pub backend: BackendKind,
    /// Key the task collection is stored under
    pub storage_key: String,
    /// trace, debug, info, warn or error
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            backend: BackendKind::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load config from `path`, or from the default location if `path` is None.
    ///
    /// A missing file yields the defaults; an unreadable or invalid one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).wrap_err_with(|| format!("Failed to read config file {:?}", path))?;
        let config = Self::from_yaml(&content).wrap_err_with(|| format!("Invalid config file {:?}", path))?;
        debug!(path = ?path, "Loaded config");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file deserializes as null
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content).context("Failed to parse config YAML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_key(&self.storage_key)?;
        self.level()?;
        Ok(())
    }

    /// Parsed `log_level`
    pub fn level(&self) -> Result<Level> {
        self.log_level
            .parse::<Level>()
            .map_err(|_| eyre!("Invalid log level: {} (expected trace, debug, info, warn or error)", self.log_level))
    }

    /// Open the configured backend
    pub fn open_backend(&self) -> Result<Box<dyn Backend>> {
        let backend: Box<dyn Backend> = match self.backend {
            BackendKind::File => Box::new(FileBackend::open(&self.store_path)?),
            BackendKind::Sqlite => Box::new(SqliteBackend::open(&self.store_path)?),
        };
        Ok(backend)
    }

    /// Task store over the configured backend and key.
    ///
    /// If the backend cannot be opened the store runs without a persistence
    /// context: loads yield the seed tasks and saves are logged and dropped.
    pub fn open_store(&self) -> TaskStore<Box<dyn Backend>> {
        let backend = match self.open_backend() {
            Ok(backend) => backend,
            Err(e) => {
                error!(
                    path = ?self.store_path,
                    backend = ?self.backend,
                    error = ?e,
                    "Failed to open store, continuing without persistence"
                );
                Box::new(NullBackend)
            }
        };
        TaskStore::with_key(backend, self.storage_key.clone())
    }
}

/// `<config_dir>/taskboard/config.yml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("taskboard").join("config.yml"))
}

/// `<data_dir>/taskboard`, or `.taskboard` in the working directory
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("taskboard"))
        .unwrap_or_else(|| PathBuf::from(".taskboard"))
}
