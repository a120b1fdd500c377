//! Application-wide error type using thiserror.

/// Common result type for the application.
pub type Result<T> = std::result::Result<T, MigboardError>;

/// Application-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum MigboardError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The CSV input could not be read as a table.
    #[error("CSV error: {0}")]
    Csv(String),

    /// A CSV row carried a value that could not be coerced.
    #[error("Invalid record on line {line}: {message}")]
    InvalidRecord {
        /// 1-based line number in the source file.
        line: u64,
        /// What was wrong with the row.
        message: String,
    },

    /// An operation that needs at least one row was given an empty table.
    #[error("Table is empty")]
    EmptyTable,

    /// Graph generation error.
    #[error("Graph generation error: {0}")]
    Graph(String),

    /// Video assembly error.
    #[error("Video encoding error: {0}")]
    Video(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl MigboardError {
    /// Builds a graph error from anything displayable.
    pub fn graph(message: impl std::fmt::Display) -> Self {
        Self::Graph(message.to_string())
    }

    /// Builds a video error from anything displayable.
    pub fn video(message: impl std::fmt::Display) -> Self {
        Self::Video(message.to_string())
    }
}
