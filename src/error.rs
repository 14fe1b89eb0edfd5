use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required fields: season, skinHex")]
    MissingFields,
    #[error("Invalid JSON: {0}")]
    InvalidBody(String),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("OpenAI error: {0}")]
    Upstream(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
