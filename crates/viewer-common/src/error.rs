//! Error types for lis-viewer crates.

use thiserror::Error;

/// Result type alias using ViewerError.
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Primary error type for viewer operations.
#[derive(Debug, Error)]
pub enum ViewerError {
    // === Local computation errors ===
    #[error("Domain error: {0}")]
    Domain(String),

    // === Backend errors ===
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    #[error("No data: {0}")]
    NoData(String),

    // === Infrastructure errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl ViewerError {
    /// The user-visible message for this error.
    ///
    /// Every failure is caught at the triggering call site and shown to the
    /// user as a single message; "no data" results get distinct wording from
    /// genuine failures.
    pub fn user_message(&self) -> String {
        match self {
            ViewerError::NoData(msg) => msg.clone(),
            ViewerError::Network(_) => "Error contacting the data server".to_string(),
            ViewerError::Http { status: 404, .. } => "No data available".to_string(),
            ViewerError::Http { .. } => "The data server returned an error".to_string(),
            ViewerError::InvalidResponse(_) => {
                "The data server returned an unexpected response".to_string()
            }
            ViewerError::Domain(msg) | ViewerError::Config(msg) | ViewerError::Io(msg) => {
                msg.clone()
            }
        }
    }

    /// True when this error means "the query succeeded but found nothing".
    pub fn is_no_data(&self) -> bool {
        matches!(
            self,
            ViewerError::NoData(_) | ViewerError::Http { status: 404, .. }
        )
    }
}

impl From<std::io::Error> for ViewerError {
    fn from(err: std::io::Error) -> Self {
        ViewerError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ViewerError {
    fn from(err: serde_json::Error) -> Self {
        ViewerError::InvalidResponse(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_classification() {
        assert!(ViewerError::NoData("empty".to_string()).is_no_data());
        assert!(ViewerError::Http {
            status: 404,
            message: "not found".to_string()
        }
        .is_no_data());
        assert!(!ViewerError::Network("refused".to_string()).is_no_data());
    }

    #[test]
    fn test_user_message_distinguishes_no_data() {
        let no_data = ViewerError::NoData("No valid data points found in this area".to_string());
        let generic = ViewerError::Http {
            status: 500,
            message: "boom".to_string(),
        };
        assert_ne!(no_data.user_message(), generic.user_message());
    }
}
