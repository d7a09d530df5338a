use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure: connect error, timeout, or a non-2xx HTTP status.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body was not JSON, or not the shape we expected.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The exchange answered with `success: false`.
    #[error("Exchange API error: {0}")]
    Exchange(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
