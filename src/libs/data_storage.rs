use std::env::consts::OS;
use std::env::var;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory under the platform data root.
pub const VENDOR_NAME: &str = "taskdash";
/// Application directory under [`VENDOR_NAME`].
pub const APP_NAME: &str = "taskdash";

/// Platform-specific directory holding the database and configuration.
#[derive(Debug, Clone)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    /// Resolves the platform data directory:
    ///
    /// - Windows: `%LOCALAPPDATA%\taskdash\taskdash`
    /// - macOS: `~/Library/Application Support/taskdash/taskdash`
    /// - other: `~/.local/share/taskdash/taskdash`
    pub fn new() -> Self {
        let base_path = match OS {
            "windows" => var("LOCALAPPDATA").unwrap_or_else(|_| ".".into()),
            "macos" => var("HOME").unwrap_or_else(|_| ".".into()) + "/Library/Application Support",
            _ => var("HOME").unwrap_or_else(|_| ".".into()) + "/.local/share",
        };
        let base_path = Path::new(&base_path).join(VENDOR_NAME).join(APP_NAME);

        Self { base_path }
    }

    /// Storage rooted at an explicit directory.
    pub fn at(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Path of `file_name` inside the storage directory, creating the
    /// directory on first use.
    pub fn get_path(&self, file_name: &str) -> io::Result<PathBuf> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path)?;
        }
        Ok(self.base_path.join(file_name))
    }
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_path_creates_the_base_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = DataStorage::at(temp_dir.path().join("nested").join("taskdash"));

        let path = storage.get_path("config.json").unwrap();

        assert!(path.parent().unwrap().is_dir());
        assert_eq!(path.file_name().unwrap(), "config.json");
    }
}
