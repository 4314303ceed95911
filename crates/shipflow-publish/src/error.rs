use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("API key environment variable not set: {var}")]
    MissingApiKey { var: String },

    #[error("package gathering failed: {0}")]
    Gather(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PublishResult<T> = std::result::Result<T, PublishError>;
