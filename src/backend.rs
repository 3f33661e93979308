// String key/value backends the task store persists through

use eyre::{Context, Result, eyre};
use fs2::FileExt;
use rusqlite::{Connection, OptionalExtension};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Durable string store holding one value per key
pub trait Backend {
    /// Read the value under `key`. `Ok(None)` if nothing was ever written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Validate a storage key. Keys become file names, so keep them plain.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(eyre!("Storage key cannot be empty"));
    }
    if key.len() > 64 {
        return Err(eyre!("Storage key too long: {} (max 64 chars)", key));
    }
    if !key.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
        return Err(eyre!("Invalid storage key: {} (must be alphanumeric with _/-)", key));
    }
    Ok(())
}

// ============================================================================
// File backend
// ============================================================================

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileBackend {
    base_path: PathBuf,
}

impl FileBackend {
    /// Open or create a file backend rooted at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).context("Failed to create store directory")?;
        info!(path = ?base_path, "Opened file backend");
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.base_path.join(format!("{}.json", key)))
    }
}

impl Backend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            debug!(file = ?path, "No stored value");
            return Ok(None);
        }

        // Writers replace the file by rename, so a plain read never sees a partial value
        let mut file = File::open(&path).context("Failed to open store file")?;
        let mut data = String::new();
        file.read_to_string(&mut data).context("Failed to read store file")?;

        Ok(Some(data))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        let tmp_path = self.base_path.join(format!("{}.json.tmp", key));
        let lock_path = self.base_path.join(format!("{}.lock", key));

        // Serialize writers on a separate lock file; the value file itself is replaced
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .context("Failed to open store lock file")?;
        lock.lock_exclusive().context("Failed to acquire file lock")?;

        let mut tmp = File::create(&tmp_path).context("Failed to create temporary store file")?;
        tmp.write_all(value.as_bytes()).context("Failed to write store file")?;
        tmp.sync_all()?;
        drop(tmp);

        fs::rename(&tmp_path, &path).context("Failed to replace store file")?;

        debug!(file = ?path, bytes = value.len(), "Wrote stored value");
        // Lock is released when lock file is dropped
        Ok(())
    }
}

// ============================================================================
// SQLite backend
// ============================================================================

/// Key/value table in a SQLite database
pub struct SqliteBackend {
    db: Connection,
}

impl SqliteBackend {
    /// Open or create `taskboard.db` inside `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref();
        fs::create_dir_all(base_path).context("Failed to create store directory")?;

        let db_path = base_path.join("taskboard.db");
        let db = Connection::open(&db_path).context("Failed to open SQLite database")?;
        info!(path = ?db_path, "Opened SQLite backend");

        let backend = Self { db };
        backend.create_schema()?;
        Ok(backend)
    }

    /// In-memory database, gone when dropped
    pub fn open_in_memory() -> Result<Self> {
        let db = Connection::open_in_memory().context("Failed to open in-memory SQLite database")?;
        let backend = Self { db };
        backend.create_schema()?;
        Ok(backend)
    }

    /// Get a reference to the SQLite database connection
    pub fn db(&self) -> &Connection {
        &self.db
    }

    fn create_schema(&self) -> Result<()> {
        debug!("Creating storage schema");

        self.db.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )?;

        Ok(())
    }
}

impl Backend for SqliteBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let value = self
            .db
            .query_row("SELECT value FROM storage WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.db.execute(
            "INSERT OR REPLACE INTO storage (key, value, updated_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![key, value, crate::models::now().timestamp_millis()],
        )?;
        debug!(key, bytes = value.len(), "Wrote stored value");
        Ok(())
    }
}

// ============================================================================
// In-process backends
// ============================================================================

/// In-memory map. Can be told to reject writes, like a full browser store.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    values: HashMap<String, String>,
    reject_writes: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with one value
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut backend = Self::default();
        backend.values.insert(key.to_string(), value.to_string());
        backend
    }

    /// Make every subsequent write fail
    pub fn reject_writes(&mut self, reject: bool) {
        self.reject_writes = reject;
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.reject_writes {
            return Err(eyre!("Store rejected write of {} bytes: quota exceeded", value.len()));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// No persistence context: nothing to read, nowhere to write
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBackend;

impl Backend for NullBackend {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(eyre!("No persistence context available"))
    }
}
