use crate::error::{TaskError, TaskResult};
use crate::model::Task;
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_DATA_FILE: &str = "taskdata.txt";

/// Snapshot file holding the whole task list as a JSON array.
///
/// Every save rewrites the complete collection; there is no incremental
/// format to replay.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Creates the parent directory and an empty snapshot if the file is missing.
    pub fn initialize_empty(&self) -> TaskResult<()> {
        if self.exists() {
            return Ok(());
        }
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        debug!(path = %self.path.display(), "creating empty task snapshot");
        Self::atomic_write(&self.path, "[]")?;
        Ok(())
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> io::Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Runs `f` while holding an exclusive advisory lock next to `path`.
    pub fn with_lock<T, F>(path: &Path, f: F) -> io::Result<T>
    where
        F: FnOnce() -> io::Result<T>,
    {
        let lock_path = path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)?;
        lock_file.lock_exclusive()?;
        let result = f();
        // Dropping the handle releases the lock as well.
        let _ = FileExt::unlock(&lock_file);
        result
    }

    pub fn save_all(&self, tasks: &[Task]) -> TaskResult<()> {
        let json = serde_json::to_string_pretty(tasks).map_err(io::Error::from)?;
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        Self::with_lock(&self.path, || Self::atomic_write(&self.path, &json))?;
        debug!(path = %self.path.display(), count = tasks.len(), "saved task snapshot");
        Ok(())
    }

    pub fn load_all(&self) -> TaskResult<Vec<Task>> {
        let json = fs::read_to_string(&self.path)
            .map_err(|e| TaskError::CorruptData(format!("{}: {e}", self.path.display())))?;
        if json.trim().is_empty() {
            return Ok(vec![]);
        }
        let tasks: Vec<Task> =
            serde_json::from_str(&json).map_err(|e| TaskError::CorruptData(e.to_string()))?;
        for (i, task) in tasks.iter().enumerate() {
            task.validate()
                .map_err(|e| TaskError::CorruptData(format!("record {}: {e}", i + 1)))?;
        }
        debug!(path = %self.path.display(), count = tasks.len(), "loaded task snapshot");
        Ok(tasks)
    }
}
