use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("History API error: {0}")]
    Remote(String),

    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No transaction history found for account")]
    EmptyHistory,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

// Add From<anyhow::Error> implementation
impl From<anyhow::Error> for AnalyzerError {
    fn from(err: anyhow::Error) -> Self {
        AnalyzerError::Internal(err.to_string())
    }
}
