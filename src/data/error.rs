use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Fatal failures while loading the catalog or the target name list.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("column '{column}' is missing from {}", path.display())]
    Schema { path: PathBuf, column: String },
}

impl CatalogError {
    pub fn parse(path: &Path, message: impl Into<String>) -> Self {
        CatalogError::Parse {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub fn schema(path: &Path, column: impl Into<String>) -> Self {
        CatalogError::Schema {
            path: path.to_path_buf(),
            column: column.into(),
        }
    }

    /// Missing files are reported as [`CatalogError::NotFound`]; any other
    /// I/O failure means the file is unreadable and counts as a parse error.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            CatalogError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            CatalogError::parse(path, err.to_string())
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
