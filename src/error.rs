use crate::{codec, store};

use thiserror::Error;

/// Everything a handler can fail with, each kind mapping to one status code.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing path parameter or body, invalid JSON, or a body not matching the schema.
    #[error("{0}")]
    MalformedRequest(String),
    /// A well-formed request carrying an invalid ISBN or release date.
    #[error("{0}")]
    Validation(String),
    /// Create of an ISBN that is already stored.
    #[error("{0}")]
    Conflict(String),
    /// Read, update or delete of an ISBN that is not stored.
    #[error("{0}")]
    NotFound(String),
    /// The store failed for a reason other than a failed condition.
    #[error(transparent)]
    Upstream(#[from] store::StoreError),
    /// A stored item could not be decoded.
    #[error(transparent)]
    Decode(#[from] codec::DecodeError),
    /// A response payload could not be serialised.
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// HTTP status code reported for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MalformedRequest(_) | Self::Validation(_) => 400,
            Self::Conflict(_) => 403,
            Self::NotFound(_) => 404,
            Self::Upstream(_) | Self::Decode(_) | Self::Serialize(_) => 500,
        }
    }

    /// Whether the message is safe to show to the caller.
    ///
    /// Server-side failures are answered with a generic message instead.
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

/// Handler result.
pub type Result<T, E = Error> = std::result::Result<T, E>;
