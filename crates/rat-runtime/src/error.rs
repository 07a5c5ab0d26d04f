use std::fmt;

/// Result type for rat-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur talking to the graph server
#[derive(Debug)]
pub enum Error {
    /// Request never produced a response (connect, timeout, TLS)
    Transport(reqwest::Error),

    /// Server answered with a non-success status
    Status { status: u16, message: String },

    /// Response body did not match the expected shape
    Decode(serde_json::Error),

    /// Configuration error
    Config(String),

    /// IO operation failed
    Io(std::io::Error),

    /// Invalid operation or state
    InvalidOperation(String),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Status { status: 404, .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(err) => write!(f, "Transport error: {}", err),
            Error::Status { status, message } => {
                write!(f, "Server returned {}: {}", status, message)
            }
            Error::Decode(err) => write!(f, "Unexpected response body: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Transport(err) => Some(err),
            Error::Decode(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Status { .. } | Error::Config(_) | Error::InvalidOperation(_) => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
