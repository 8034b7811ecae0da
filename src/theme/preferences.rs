//! Local persistence for the dark mode flag

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::error::Error;

/// Somewhere to keep the user's dark mode choice between sessions
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// `None` when nothing has been saved yet
    async fn load_dark_mode(&self) -> Result<Option<bool>, Error>;

    async fn save_dark_mode(&self, value: bool) -> Result<(), Error>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreferenceFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dark_mode: Option<bool>,
}

/// JSON file backed preferences
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<PreferenceFile, Error> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PreferenceFile::default()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl PreferenceStore for FilePreferences {
    async fn load_dark_mode(&self) -> Result<Option<bool>, Error> {
        Ok(self.read().await?.dark_mode)
    }

    async fn save_dark_mode(&self, value: bool) -> Result<(), Error> {
        let mut file = self.read().await.unwrap_or_default();
        file.dark_mode = Some(value);

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, serde_json::to_vec_pretty(&file)?).await?;
        tracing::debug!(path = %self.path.display(), dark_mode = value, "saved preferences");
        Ok(())
    }
}

/// Preferences that live only as long as the process
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    dark_mode: Mutex<Option<bool>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dark_mode(value: bool) -> Self {
        Self {
            dark_mode: Mutex::new(Some(value)),
        }
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferences {
    async fn load_dark_mode(&self) -> Result<Option<bool>, Error> {
        Ok(*self.dark_mode.lock().await)
    }

    async fn save_dark_mode(&self, value: bool) -> Result<(), Error> {
        *self.dark_mode.lock().await = Some(value);
        Ok(())
    }
}
