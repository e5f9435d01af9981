//! Store location configuration.
//!
//! # Invariants
//! - `storage_root` is absolute.
//! - `file_name` is a single non-empty path component.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Component, Path, PathBuf};

/// File name of the shared text file.
pub const DEFAULT_FILE_NAME: &str = "exttest.txt";
/// Environment override for the storage root directory.
pub const STORAGE_DIR_ENV: &str = "EXTTEXT_STORAGE_DIR";

/// Where the text file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    storage_root: PathBuf,
    file_name: String,
}

impl StoreConfig {
    /// Builds a config rooted at `storage_root` with the default file name.
    pub fn new(storage_root: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let storage_root = storage_root.into();
        if !storage_root.is_absolute() {
            return Err(ConfigError::RelativeRoot(storage_root));
        }
        Ok(Self {
            storage_root,
            file_name: DEFAULT_FILE_NAME.to_string(),
        })
    }

    /// Reads `EXTTEXT_STORAGE_DIR`, falling back to the platform temp dir.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_value(std::env::var(STORAGE_DIR_ENV).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Result<Self, ConfigError> {
        match value.map(str::trim) {
            Some(raw) if !raw.is_empty() => Self::new(raw),
            _ => Self::new(std::env::temp_dir()),
        }
    }

    pub fn with_file_name(mut self, file_name: &str) -> Result<Self, ConfigError> {
        let trimmed = file_name.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyFileName);
        }
        let mut components = Path::new(trimmed).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => return Err(ConfigError::NestedFileName(trimmed.to_string())),
        }
        self.file_name = trimmed.to_string();
        Ok(self)
    }

    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file_path(&self) -> PathBuf {
        self.storage_root.join(&self.file_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    RelativeRoot(PathBuf),
    EmptyFileName,
    NestedFileName(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RelativeRoot(path) => write!(
                f,
                "storage root must be an absolute path, got `{}`",
                path.display()
            ),
            Self::EmptyFileName => write!(f, "file name must not be empty"),
            Self::NestedFileName(value) => {
                write!(f, "file name must be a single path component, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}
