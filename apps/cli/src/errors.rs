#![allow(dead_code)]

use thiserror::Error;

/// Fallback shown when the backend fails without a structured detail.
pub const GENERIC_PROCESSING_ERROR: &str = "An error occurred while processing your resume.";

/// Application-level error type covering every failure path of the client.
#[derive(Debug, Error)]
pub enum AppError {
    /// Local precondition failure; nothing was sent over the network.
    #[error("{0}")]
    Validation(String),

    /// The backend answered with a non-success status. `detail` carries the
    /// server's structured error message, when the body had one.
    #[error("API error (status {status})")]
    Api { status: u16, detail: Option<String> },

    /// Transport-level failure: connection refused, timeout, bad TLS.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A download/export call failed. Export failures never affect the
    /// displayed results or the processing state.
    #[error("Download failed: {0}")]
    Export(String),

    /// A submission is already in flight; only one may run at a time.
    #[error("a submission is already in progress")]
    InFlight,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// The message surfaced to the user. Server-supplied detail wins over
    /// generic wording; transport failures get the generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Api {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            AppError::Api { .. } | AppError::Http(_) => GENERIC_PROCESSING_ERROR.to_string(),
            other => other.to_string(),
        }
    }
}
