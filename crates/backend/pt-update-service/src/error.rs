use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpdateServiceError {
    #[error("Configuration error: {0}")]
    Config(String),
}
