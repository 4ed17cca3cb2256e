use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response payload: {0}")]
    Decode(String),

    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("model unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
