//! Error types for ibmcat

use thiserror::Error;

/// Core error type for ibmcat operations
#[derive(Error, Debug)]
pub enum IbmcatError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Driver error: {0}")]
    Driver(String),

    #[error("Schema error: {0}")]
    Schema(String),

    /// A column name could not be resolved to its catalog ordinal
    #[error("Column '{column}' not found for table '{table}'")]
    ColumnNotFound { column: String, table: String },

    /// No field kind is known for a driver type code
    #[error("Unsupported type code: {type_code}")]
    UnsupportedType { type_code: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Not supported: {0}")]
    NotSupported(String),
}

impl IbmcatError {
    /// Shorthand for [`IbmcatError::ColumnNotFound`]
    pub fn column_not_found(column: impl Into<String>, table: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
            table: table.into(),
        }
    }
}

/// Result type alias for ibmcat operations
pub type Result<T> = std::result::Result<T, IbmcatError>;
