use thiserror::Error;

/// Failure taxonomy for a single API call.
///
/// Only `Transport` is ever the result of a retry loop; the other variants
/// terminate the call on first occurrence.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network-level failure (connection refused, DNS, timeout) after all
    /// attempts were exhausted.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The panel answered with a status other than 200. Never retried.
    #[error("unexpected HTTP status {code}")]
    HttpStatus { code: u16 },

    /// A 200 response whose body was not valid JSON. Never retried.
    #[error("invalid JSON response: {message}")]
    Parse { message: String },

    /// The connection parameters could not produce a valid request URL.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl ClientError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport { .. })
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
