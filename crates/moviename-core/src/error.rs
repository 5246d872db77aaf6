//! Error types module
//!
//! `AppError` is the taxonomy every failure of a submission attempt is folded
//! into before it reaches the user. Crates further down the stack keep their
//! own `thiserror` enums and convert into it at the session boundary.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for failures the user can retry
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    /// The staged file was rejected; the user should pick another one.
    #[error("{0}")]
    Validation(String),

    /// The video or image could not be loaded, seeked or rasterized.
    #[error("Failed to decode media: {0}")]
    Decode(String),

    /// Network or backend failure. The message is the backend's, verbatim.
    #[error("{0}")]
    Transmission(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::Transmission(_) => "TRANSMISSION_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Every failure ends only the current attempt; these can be resubmitted
    /// as-is. Validation errors need a different file instead.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AppError::Decode(_) | AppError::Transmission(_))
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::Validation(_) => LogLevel::Debug,
            AppError::Decode(_) | AppError::Transmission(_) => LogLevel::Warn,
            AppError::Config(_) | AppError::Internal(_) => LogLevel::Error,
        }
    }

    /// Text for the error dialog body.
    pub fn client_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            "An unknown error occurred.".to_string()
        } else {
            message
        }
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(err: crate::config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transmission_message_is_verbatim() {
        let err = AppError::Transmission("backend said no".to_string());
        assert_eq!(err.to_string(), "backend said no");
        assert!(err.is_recoverable());
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_empty_message_falls_back() {
        let err = AppError::Transmission(String::new());
        assert_eq!(err.client_message(), "An unknown error occurred.");
    }

    #[test]
    fn test_validation_not_recoverable() {
        let err = AppError::Validation("File too large".to_string());
        assert!(!err.is_recoverable());
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }
}
