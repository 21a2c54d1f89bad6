use thiserror::Error;

#[derive(Debug, Error)]
pub enum VigilError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Rate limited: {0}")]
    RateLimit(String),

    #[error("Cannot resolve identifier: {0}")]
    Resolution(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl VigilError {
    /// Transient platform failures are logged and skipped; the enclosing
    /// loop or the next periodic interval retries naturally.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Platform(_) | Self::RateLimit(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(VigilError::Platform("flood wait".into()).is_transient());
        assert!(VigilError::RateLimit("slow down".into()).is_transient());
        assert!(!VigilError::Config("missing phone".into()).is_transient());
        assert!(!VigilError::Resolution("no such channel".into()).is_transient());
        assert!(!VigilError::Database("locked".into()).is_transient());
    }

    #[test]
    fn test_error_display() {
        let e = VigilError::Resolution("@ghost".into());
        assert_eq!(e.to_string(), "Cannot resolve identifier: @ghost");
    }
}
