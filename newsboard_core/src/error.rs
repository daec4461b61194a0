use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Cannot load dataset: {0}")]
    LoadError(#[from] LoadError),
}

/// Reason why the dataset could not be loaded from its source.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Dataset file `{}` not found", .0.display())]
    Missing(PathBuf),
    #[error("Cannot read dataset file `{}`: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot parse dataset file `{}`: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
