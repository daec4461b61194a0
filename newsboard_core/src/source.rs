use async_trait::async_trait;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::dataset::Dataset;
use crate::error::LoadError;

/// Where the dataset comes from.
/// A load either yields the whole dataset or the reason it is absent, it never panics.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn load(&self) -> Result<Dataset, LoadError>;

    /// Short description for log messages.
    fn describe(&self) -> String;
}

/// JSON file written by the offline processing step.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DatasetSource for JsonFileSource {
    async fn load(&self) -> Result<Dataset, LoadError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Err(LoadError::Missing(self.path.clone())),
            Err(source) => {
                return Err(LoadError::Unreadable {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&raw).map_err(|source| LoadError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
