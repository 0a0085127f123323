//! Error types for the coin filter

use thiserror::Error;

/// Result type alias using our custom Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the coin filter
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Candidate source errors (abort the run)
    #[error("Candidate source unavailable: {0}")]
    UpstreamUnavailable(String),

    // Per-candidate query errors
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Upstream {service} returned status {status}")]
    UpstreamStatus { service: &'static str, status: u16 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // Report errors
    #[error("Failed to write report: {0}")]
    Output(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl Error {
    /// Check if this error must abort the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Config(_) | Error::UpstreamUnavailable(_) | Error::Output(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Error::Deserialization(e.to_string())
        } else {
            Error::Http(e.to_string())
        }
    }
}

// Conversion from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Deserialization(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Output(e.to_string())
    }
}

// Conversion from I/O errors
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(Error::UpstreamUnavailable("down".to_string()).is_fatal());
        assert!(!Error::Http("timeout".to_string()).is_fatal());
        assert!(!Error::UpstreamStatus {
            service: "rugcheck",
            status: 500
        }
        .is_fatal());
    }
}
