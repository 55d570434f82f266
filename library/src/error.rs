use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Invariant violation: {0}")]
    Invariant(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl LibraryError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        LibraryError::Configuration(msg.into())
    }

    pub fn connection(msg: impl Into<String>) -> Self {
        LibraryError::Connection(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        LibraryError::Invariant(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        LibraryError::Network(msg.into())
    }
}
