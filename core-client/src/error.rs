//! Normalized error taxonomy.
//!
//! Every failure an operation can surface is one [`ClientError`]. The
//! `Display` text of each variant is the message shown to the user.

use bridge_traits::error::BridgeError;
use thiserror::Error;

/// Failure classification, one per [`ClientError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NoConnectivity,
    Timeout,
    NoResponse,
    ServerError,
    ConfigError,
    EncodeError,
    PersistError,
    ShareError,
}

#[derive(Error, Debug)]
pub enum ClientError {
    /// The connectivity pre-flight reported no network
    #[error("No internet connection")]
    NoConnectivity,

    /// The request deadline elapsed
    #[error("Timeout - the server is taking too long to respond")]
    Timeout,

    /// The request went out and nothing came back. The hint differs between
    /// a browser (backend probably not running) and a device (network).
    #[error("{}", no_response_message(*.mobile))]
    NoResponse { mobile: bool },

    /// Non-2xx response; carries the server's own message
    #[error("{0}")]
    Server(String),

    /// The request could not be built or dispatched
    #[error("Request configuration error")]
    Config { detail: String },

    #[error("Export failed while encoding: {0}")]
    Encode(String),

    #[error("Export failed while persisting: {0}")]
    Persist(String),

    #[error("Export failed while sharing: {0}")]
    Share(String),

    /// Client assembly failed (missing capability, bad override URL)
    #[error("Client setup failed: {0}")]
    Setup(#[from] core_runtime::Error),
}

fn no_response_message(mobile: bool) -> &'static str {
    if mobile {
        "Unable to reach the server. Check your connection."
    } else {
        "Unable to reach the server. Check that the backend is running."
    }
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::NoConnectivity => ErrorKind::NoConnectivity,
            ClientError::Timeout => ErrorKind::Timeout,
            ClientError::NoResponse { .. } => ErrorKind::NoResponse,
            ClientError::Server(_) => ErrorKind::ServerError,
            ClientError::Config { .. } | ClientError::Setup(_) => ErrorKind::ConfigError,
            ClientError::Encode(_) => ErrorKind::EncodeError,
            ClientError::Persist(_) => ErrorKind::PersistError,
            ClientError::Share(_) => ErrorKind::ShareError,
        }
    }

    /// Whether the failure is about reaching the server at all, as opposed
    /// to the server refusing the request.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::NoConnectivity | ErrorKind::Timeout | ErrorKind::NoResponse
        )
    }

    /// Classify a dispatch failure reported by the HTTP capability.
    pub(crate) fn from_dispatch(err: BridgeError, mobile: bool) -> Self {
        match err {
            BridgeError::Timeout(_) => ClientError::Timeout,
            BridgeError::NoResponse(_) | BridgeError::Io(_) | BridgeError::OperationFailed(_) => {
                ClientError::NoResponse { mobile }
            }
            BridgeError::InvalidRequest(detail) | BridgeError::NotAvailable(detail) => {
                ClientError::Config { detail }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
