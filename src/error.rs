use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Failure of a single forwarded call to an upstream API.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Upstream answered with a non-success status.
    #[error("{service} API error: {reason}")]
    Status {
        service: &'static str,
        status: StatusCode,
        reason: String,
        body: String,
    },

    /// The request never produced a response (connect, timeout, send).
    #[error("{0}")]
    Transport(reqwest::Error),

    /// Success status, but the body was not JSON.
    #[error("{0}")]
    Decode(reqwest::Error),

    #[error("Invalid header value for {0}")]
    InvalidHeader(String),
}

impl UpstreamError {
    /// HTTP status to hand back to the caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            UpstreamError::Status { status, .. } => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
