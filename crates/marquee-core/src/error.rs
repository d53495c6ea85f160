use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The data source does not exist.
    #[error("data source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// The source exists but could not be parsed into a dataset.
    #[error("failed to load {source_name}: {message}")]
    Load {
        source_name: String,
        message: String,
    },

    /// A requested text field is absent from a record.
    #[error("field '{field}' not found on record {index}")]
    FieldNotFound { field: String, index: usize },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    /// Short machine-readable name of the error category.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SourceNotFound { .. } => "source_not_found",
            Self::Load { .. } => "load",
            Self::FieldNotFound { .. } => "field_not_found",
            Self::InvalidData(_) => "invalid_data",
        }
    }

    pub(crate) fn load(source_name: &str, message: impl Into<String>) -> Self {
        Self::Load {
            source_name: source_name.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
