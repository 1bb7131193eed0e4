//! Error types for the downtime resource adapter
//!
//! Two layers live here:
//!
//! - [`ApiError`]: the raw failure a [`crate::DowntimeApi`] client reports
//!   (transport failure or non-2xx response), carrying the host it talked to.
//! - [`Error`]: what the lifecycle operations hand back to the host framework.
//!   [`Error::translate`] turns the former into the latter.

use thiserror::Error;

use crate::resource::DowntimeState;

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Raw error reported by a downtime API client
///
/// `status` is `None` when the request never produced an HTTP response
/// (connection refused, timeout, TLS failure, ...).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    /// Host the failing request was sent to
    pub host: String,
    /// HTTP status code, if a response was received
    pub status: Option<u16>,
    /// Human readable failure description
    pub message: String,
}

impl ApiError {
    /// Create an error for a request that received an HTTP response
    pub fn status(host: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            status: Some(status),
            message: message.into(),
        }
    }

    /// Create an error for a request that never produced a response
    pub fn transport(host: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            status: None,
            message: message.into(),
        }
    }

    /// True when the server answered 404
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

/// Core error type for the adapter
#[derive(Error, Debug)]
pub enum Error {
    /// The local identifier is not a valid integer
    #[error("invalid downtime id {id:?}: {reason}")]
    InvalidId {
        /// The identifier as stored locally
        id: String,
        /// Parser message
        reason: String,
    },

    /// A request to the remote API failed
    #[error("{context} (host: {host}): {message}")]
    Api {
        /// Operation context, e.g. "error creating downtime"
        context: String,
        /// Host the failing request was sent to
        host: String,
        /// HTTP status code, if any
        status: Option<u16>,
        /// Underlying failure
        message: String,
    },

    /// A projected remote value could not be written into local state
    #[error("failed to set {attribute}: {message}")]
    StateWrite {
        /// Attribute path, e.g. "recurrence.type"
        attribute: String,
        /// Why the value was rejected
        message: String,
    },

    /// The resource configuration was rejected before any request was built
    #[error("invalid configuration: {0}")]
    Validation(String),

    /// Provider/client configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The remote API answered successfully but with an unusable body
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The downtime exists on the server but its response could not be
    /// recorded; `state` carries the new identifier so it can still be tracked
    #[error("downtime {} was created but could not be recorded: {source}", .state.id)]
    PartialCreate {
        /// Desired configuration with the server-assigned identifier
        state: Box<DowntimeState>,
        /// Why the response could not be written into state
        #[source]
        source: Box<Error>,
    },

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap a raw client error with the operation it interrupted
    ///
    /// The failing host and status are preserved so callers can surface them
    /// verbatim.
    pub fn translate(err: ApiError, context: impl Into<String>) -> Self {
        Self::Api {
            context: context.into(),
            host: err.host,
            status: err.status,
            message: err.message,
        }
    }

    /// Create an identifier parse error
    pub fn invalid_id(id: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::InvalidId {
            id: id.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a state write error
    pub fn state_write(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StateWrite {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// State of a downtime that was created despite the error, if any
    pub fn created_state(&self) -> Option<&DowntimeState> {
        match self {
            Self::PartialCreate { state, .. } => Some(state.as_ref()),
            _ => None,
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_keeps_host_and_context() {
        let raw = ApiError::status("api.datadoghq.com", 500, "internal error");
        let err = Error::translate(raw, "error creating downtime");

        let rendered = err.to_string();
        assert!(rendered.starts_with("error creating downtime"));
        assert!(rendered.contains("api.datadoghq.com"));
        assert!(rendered.contains("internal error"));

        match err {
            Error::Api { status, .. } => assert_eq!(status, Some(500)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn partial_create_exposes_the_new_identifier() {
        let err = Error::PartialCreate {
            state: Box::new(DowntimeState::with_id("1000")),
            source: Box::new(Error::state_write("recurrence.type", "unknown")),
        };

        assert_eq!(err.created_state().map(|s| s.id.as_str()), Some("1000"));
        assert!(err.to_string().contains("downtime 1000 was created"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(Error::validation("x").created_state().is_none());
    }

    #[test]
    fn not_found_requires_a_404() {
        assert!(ApiError::status("h", 404, "gone").is_not_found());
        assert!(!ApiError::status("h", 403, "forbidden").is_not_found());
        assert!(!ApiError::transport("h", "connection refused").is_not_found());
    }
}
