use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server answered with HTTP {0}")]
    HttpStatus(u16),

    #[error("Server reported an error: {0}")]
    ServerReported(String),

    #[error("Response decoding error: {0}")]
    Decode(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get a sanitized error message safe for logging and for showing to the user.
    /// Transport errors can carry internal URLs, so only their category is kept.
    pub fn log_safe(&self) -> String {
        match self {
            Error::Http(e) if e.is_timeout() => "Request to the recipe server timed out".to_string(),
            Error::Http(e) if e.is_connect() => "Could not connect to the recipe server".to_string(),
            Error::Http(_) => "Request to the recipe server failed".to_string(),
            Error::HttpStatus(code) => format!("Recipe server answered with HTTP {code}"),
            Error::ServerReported(msg) => format!("Server error: {msg}"),
            Error::Decode(_) => "Recipe server sent an unreadable response".to_string(),
            Error::Json(_) => "JSON serialization failed".to_string(),
            Error::InvalidUrl(_) => "Invalid URL provided".to_string(),
            Error::Io(_) => "Terminal I/O failed".to_string(),
            Error::Config(msg) => format!("Configuration error: {msg}"),
            Error::NotFound(msg) => format!("Not found: {msg}"),
            Error::Validation(msg) => format!("Validation error: {msg}"),
        }
    }

    /// Whether the failure happened before a usable payload arrived
    /// (connection, timeout, non-2xx status or undecodable body).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::HttpStatus(_) | Error::Decode(_)
        )
    }
}
