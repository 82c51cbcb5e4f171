//! Error type shared by every Trickle crate.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrickleError>;

#[derive(Debug, Error)]
pub enum TrickleError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Broken internal invariant (zero result limit, non-finite score).
    /// Fatal for the current request only.
    #[error("Invariant violated: {0}")]
    Invariant(String),
}

impl TrickleError {
    /// True for errors caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, TrickleError::InvalidQuery(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = TrickleError::Invariant("max_results must be >= 1".into());
        assert_eq!(e.to_string(), "Invariant violated: max_results must be >= 1");
        assert!(!e.is_client_error());
        assert!(TrickleError::InvalidQuery("empty".into()).is_client_error());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let e: TrickleError = io.into();
        assert!(matches!(e, TrickleError::Io(_)));
    }
}
