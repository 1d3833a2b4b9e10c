// src/error.rs
// Client error handling

use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, PredictError>;

/// Everything that can go wrong between the form and the prediction service
#[derive(Debug, Error)]
pub enum PredictError {
    // Transport
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed with status code {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    // Configuration
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid configuration value: {key} = {value}")]
    Config { key: String, value: String },

    // Form
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Cannot submit: {0}")]
    NotSubmittable(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PredictError {
    /// Status code for service-side failures, if the request got that far
    pub fn status_code(&self) -> Option<u16> {
        match self {
            PredictError::Status { status, .. } => Some(*status),
            PredictError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for failures caused by user input rather than the network or the service
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PredictError::UnknownField(_)
                | PredictError::InvalidValue { .. }
                | PredictError::NotSubmittable(_)
        )
    }
}
