// error_handling.rs - Error taxonomy for catalog loading and navigation

use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::Category;

#[derive(Error, Debug)]
pub enum NavigatorError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Duplicate point of interest {name:?} in category {category}")]
    DuplicatePoi { category: Category, name: String },

    #[error("Category {0} is listed more than once")]
    DuplicateCategory(Category),

    #[error("Non-finite coordinate in {context}")]
    NonFiniteCoordinate { context: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("A category must be selected before a path")]
    NoCategorySelected,

    #[error("Navigation session {0} has been shut down")]
    SessionClosed(uuid::Uuid),
}

pub type Result<T> = std::result::Result<T, NavigatorError>;

impl NavigatorError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NavigatorError::Io { path: path.into(), source }
    }

    pub fn invalid_config(reason: impl Into<String>) -> Self {
        NavigatorError::InvalidConfig { reason: reason.into() }
    }
}
