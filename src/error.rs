// src/error.rs
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    /// Rejected locally before any request was made.
    #[error("{0}")]
    Validation(String),

    #[error("Network error. Please check your connection. ({0})")]
    Network(String),

    #[error("Server error ({status}): {message}")]
    Http { status: u16, message: String },

    /// The transport worked but the payload did not have the expected shape.
    #[error("{0}")]
    Parse(String),

    #[error("{0}")]
    EmptySelection(String),
}

impl WizardError {
    pub fn validation(message: impl Into<String>) -> Self {
        WizardError::Validation(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        WizardError::Parse(message.into())
    }

    pub fn empty_selection(message: impl Into<String>) -> Self {
        WizardError::EmptySelection(message.into())
    }

    // Recoverable errors only need a toast; the rest put the page into its error panel
    pub fn is_recoverable(&self) -> bool {
        matches!(self, WizardError::Validation(_) | WizardError::EmptySelection(_))
    }
}

impl From<reqwest::Error> for WizardError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            WizardError::Http {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("request failed").to_string(),
            }
        } else if err.is_decode() {
            WizardError::Parse(format!("Unexpected response format: {}", err))
        } else {
            WizardError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for WizardError {
    fn from(err: serde_json::Error) -> Self {
        WizardError::Parse(format!("Invalid JSON payload: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_errors_are_recoverable() {
        assert!(WizardError::validation("empty").is_recoverable());
        assert!(WizardError::empty_selection("pick one").is_recoverable());
        assert!(!WizardError::parse("bad").is_recoverable());
        assert!(!WizardError::Network("down".into()).is_recoverable());
    }

    #[test]
    fn http_error_message_includes_status() {
        let err = WizardError::Http { status: 502, message: "Bad Gateway".into() };
        assert_eq!(err.to_string(), "Server error (502): Bad Gateway");
    }
}
