use thiserror::Error;

use domain::services::FormatError;
use persistence::repositories::PersistenceError;

/// Errors surfaced to presentation code.
///
/// Every variant aborts the operation and leaves the caller's snapshot as it
/// was; none of them is retried.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Stable machine-readable code for the notification layer.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Persistence(_) => "persistence_error",
            ApiError::Format(_) => "format_error",
            ApiError::Validation(_) => "validation_error",
            ApiError::Config(_) => "config_error",
        }
    }

    /// Message suitable for a user-visible failure notification.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Persistence(e) => {
                tracing::error!(error = %e, "Persistence failure");
                "Could not save templates. Local storage may be full.".to_string()
            }
            ApiError::Format(e) => format!("Import failed: {}", e),
            ApiError::Validation(msg) => msg.clone(),
            ApiError::Config(msg) => msg.clone(),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    let message = e
                        .message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{}: {}", field, message)
                })
            })
            .collect();
        details.sort();

        ApiError::Validation(details.join("; "))
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::Config(err.to_string())
    }
}
