use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Stored content could not be parsed as JSON.
    #[error("document content is not valid JSON: {0}")]
    InvalidContent(#[from] serde_json::Error),

    /// Content parsed but is not a JSON object.
    #[error("document content must be a JSON object, found {found}")]
    NotARecord { found: &'static str },

    #[error("layout failed: {0}")]
    Layout(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
