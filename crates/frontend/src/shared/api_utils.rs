//! API utilities for frontend-backend communication.

use contracts::error::ApiError;

/// Get the base URL for API requests.
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
///
/// # Errors
/// `ApiError::NotConfigured` when no window is available — a blocking
/// error state for the affected screen, not a toast.
pub fn api_base() -> Result<String, ApiError> {
    let window = web_sys::window()
        .ok_or_else(|| ApiError::NotConfigured("API base URL (no window)".to_string()))?;
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    Ok(format!("{}//{}:3000", protocol, hostname))
}

/// Build a full API URL from a path.
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/employees")?;
/// ```
pub fn api_url(path: &str) -> Result<String, ApiError> {
    Ok(format!("{}{}", api_base()?, path))
}
