use panelbridge_client::ClientError;
use thiserror::Error;

/// Failures of a lifecycle operation, one layer above the wire taxonomy.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// Transport, status or parse failure from the API client.
    #[error("panel API error: {0}")]
    Api(#[from] ClientError),

    /// The panel answered, but the operation's success flag was falsy.
    #[error("{operation} failed: {}", .message.as_deref().unwrap_or(UNKNOWN_ERROR))]
    Rejected { operation: &'static str, message: Option<String> },

    /// The response carried no recognizable success flag.
    #[error("invalid response from panel API during {operation}")]
    InvalidResponse { operation: &'static str },
}

pub type ProvisionResult<T> = Result<T, ProvisionError>;

/// Fallback message when the panel rejects an operation without explanation.
pub const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Literal token the billing platform treats as success for lifecycle hooks.
pub const SUCCESS_TOKEN: &str = "success";

/// Collapse an operation result into the string the billing platform
/// expects: the success token, or a human-readable error description.
pub fn lifecycle_result(result: &ProvisionResult<()>) -> String {
    match result {
        Ok(()) => SUCCESS_TOKEN.to_string(),
        Err(e) => e.to_string(),
    }
}
