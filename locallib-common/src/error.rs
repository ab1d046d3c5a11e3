//! Errors shared by the catalog service and its store layer

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Query, connection or pool failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Creating the database directory failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unreadable config file, bad database URL or unknown environment
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A stored column that cannot be decoded into its record field
    #[error("Stored {column} is not valid: {value:?}")]
    CorruptRecord { column: String, value: String },

    /// A write collided with a row that was gone by the time it was re-read
    #[error("Write conflict: {0}")]
    Conflict(String),
}

impl Error {
    pub fn corrupt(column: &str, value: &str) -> Self {
        Error::CorruptRecord {
            column: column.to_string(),
            value: value.to_string(),
        }
    }
}
