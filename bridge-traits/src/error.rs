use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    /// The request deadline elapsed before a response arrived.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The request was dispatched but nothing came back (refused, reset, DNS).
    #[error("No response received: {0}")]
    NoResponse(String),

    /// The request could not be built or dispatched at all.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
