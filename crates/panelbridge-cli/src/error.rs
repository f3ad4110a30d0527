//! Error types for the CLI

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API client error: {0}")]
    Client(#[from] panelbridge_client::ClientError),

    #[error("Provisioning error: {0}")]
    Provision(#[from] panelbridge_provision::ProvisionError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Connection test failed: {0}")]
    ConnectionFailed(String),
}

pub type CliResult<T> = Result<T, CliError>;
