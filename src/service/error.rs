//! Error types for tutor service integration

use thiserror::Error;

/// Errors that can occur when talking to the tutor service
#[derive(Debug, Error)]
pub enum ServiceError {
    /// HTTP request failed (network, timeout, DNS)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service could not produce the requested quiz
    #[error("Quiz generation failed: {0}")]
    Generation(String),

    /// The service could not grade a submission
    #[error("Quiz submission failed: {0}")]
    Submission(String),

    /// A progress update was not acknowledged
    #[error("Progress update failed: {0}")]
    ProgressUpdate(String),

    /// The service returned an unexpected error response
    #[error("Tutor service error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the service
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ServiceError {
    /// Check if this error is recoverable (user can retry the same request)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ServiceError::Request(_)
                | ServiceError::Generation(_)
                | ServiceError::Submission(_)
                | ServiceError::Api { status: 500..=599, .. }
        )
    }
}
