//! Error types for the remote store client

use thiserror::Error;

/// Errors produced by remote store operations
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport-level failure (connection, timeout, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the request
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Sign-in was rejected or the session is invalid
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The client could not be constructed from the given settings
    #[error("Invalid remote configuration: {0}")]
    Configuration(String),
}

/// Result type for remote store operations
pub type RemoteResult<T> = Result<T, RemoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_display_carries_backend_message() {
        let err = RemoteError::Server {
            status: 409,
            message: "duplicate key value".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("409"));
        assert!(msg.contains("duplicate key value"));
    }

    #[test]
    fn test_auth_error_display() {
        let err = RemoteError::Auth("Invalid login credentials".to_string());
        assert!(err.to_string().contains("Invalid login credentials"));
    }
}
