// Task store: load and save the task collection through a backend

use eyre::{Context, Result};
use tracing::{debug, error, info, warn};

use crate::backend::Backend;
use crate::codec;
use crate::collection::TaskCollection;
use crate::seed::default_tasks;

/// Key the collection is stored under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "kanban-tasks";

/// Bridge between the in-memory task collection and a string store.
///
/// The whole collection lives under a single key and is rewritten on every
/// save. Neither `load` nor `save` ever fails: read problems fall back to the
/// seed tasks and write problems are logged, leaving the caller's in-memory
/// collection as the source of truth.
pub struct TaskStore<B: Backend> {
    backend: B,
    key: String,
}

impl<B: Backend> TaskStore<B> {
    /// Store using [`DEFAULT_STORAGE_KEY`]
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Load the persisted collection, or the seed tasks if there is none or it
    /// cannot be read
    pub fn load(&self) -> TaskCollection {
        match self.read() {
            Ok(Some(collection)) => {
                info!(key = %self.key, count = collection.len(), "Loaded tasks");
                collection
            }
            Ok(None) => {
                info!(key = %self.key, "No stored tasks, using defaults");
                default_tasks()
            }
            Err(e) => {
                error!(key = %self.key, error = ?e, "Error loading tasks, using defaults");
                default_tasks()
            }
        }
    }

    /// Persist the whole collection, overwriting the previous value.
    /// Failures are logged and otherwise ignored.
    pub fn save(&mut self, tasks: &TaskCollection) {
        match self.write(tasks) {
            Ok(()) => debug!(key = %self.key, count = tasks.len(), "Saved tasks"),
            Err(e) => error!(key = %self.key, error = ?e, "Error saving tasks"),
        }
    }

    fn read(&self) -> Result<Option<TaskCollection>> {
        let stored = self
            .backend
            .get(&self.key)
            .wrap_err_with(|| format!("Failed to read stored value for {}", self.key))?;

        let data = match stored {
            Some(data) if !data.trim().is_empty() => data,
            Some(_) => {
                warn!(key = %self.key, "Stored value is empty");
                return Ok(None);
            }
            None => return Ok(None),
        };

        let tasks = codec::decode(&data)?;
        Ok(Some(TaskCollection::from(tasks)))
    }

    fn write(&mut self, tasks: &TaskCollection) -> Result<()> {
        let data = codec::encode(tasks.as_slice())?;
        self.backend
            .set(&self.key, &data)
            .wrap_err_with(|| format!("Failed to write stored value for {}", self.key))
    }
}
