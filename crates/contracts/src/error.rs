use thiserror::Error;

/// Failure kinds surfaced by the fetch layer.
///
/// An empty collection is *not* an error: screens render a neutral
/// empty state for it, so there is deliberately no `EmptyResult` variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Transport-level failure, no HTTP response was received.
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// The server responded with a 4xx/5xx status.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// A required configuration value (e.g. the API base URL) is missing.
    /// Fatal for the affected screen, shown as a blocking error state.
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// The request did not complete within the configured deadline.
    #[error("request timed out after {0} ms")]
    Timeout(u32),
}

impl ApiError {
    /// Message shown to the user: the server message where present,
    /// otherwise the per-operation fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::HttpError { message, .. } if !message.is_empty() => message.clone(),
            ApiError::NotConfigured(_) | ApiError::Timeout(_) => self.to_string(),
            _ => fallback.to_string(),
        }
    }

    /// Whether a user-triggered retry of the same request makes sense.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::NetworkFailure(_) | ApiError::Timeout(_) | ApiError::HttpError { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = ApiError::HttpError {
            status: 422,
            message: "Order number already exists".to_string(),
        };
        assert_eq!(err.user_message("Failed to save"), "Order number already exists");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ApiError::NetworkFailure("fetch aborted".to_string());
        assert_eq!(err.user_message("Failed to load orders"), "Failed to load orders");

        let err = ApiError::HttpError {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.user_message("Failed to load orders"), "Failed to load orders");
    }

    #[test]
    fn test_not_configured_is_not_retryable() {
        assert!(!ApiError::NotConfigured("api base url".to_string()).is_retryable());
        assert!(ApiError::Timeout(30_000).is_retryable());
    }
}
