//! Fleet map errors

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the crate.
pub type Result<T> = anyhow::Result<T, Error>;

/// Domain level error type returned by the vessel source and map host.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Error {
    /// A non recoverable internal error occurred.
    #[error("code: 500, description: {0}")]
    Internal(String),

    /// The vessel source could not be reached or answered with a non-success
    /// status.
    #[error("code: 502, description: {0}")]
    BadGateway(String),

    /// The vessel source returned a payload that could not be parsed.
    #[error("code: 502, description: invalid_format {0}")]
    InvalidFormat(String),

    /// The vessel source did not answer in time.
    #[error("code: 504, description: timeout {0}")]
    Timeout(String),
}

impl Error {
    /// Returns the stable error code associated with the variant.
    #[must_use]
    pub const fn code(&self) -> StatusCode {
        match self {
            Self::BadGateway(_) | Self::InvalidFormat(_) => StatusCode::BAD_GATEWAY,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the failure came from talking to the vessel source, as opposed
    /// to a defect on this side.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::BadGateway(_) | Self::InvalidFormat(_) | Self::Timeout(_))
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        let chain = err.chain().map(ToString::to_string).collect::<Vec<_>>().join(" -> ");

        // if type is Error, return it with the newly added context
        if let Some(inner) = err.downcast_ref::<Self>() {
            tracing::debug!("Error: {err}, caused by: {inner}");

            return match inner {
                Self::BadGateway(_) => Self::BadGateway(chain),
                Self::Internal(_) => Self::Internal(chain),
                Self::InvalidFormat(e) => Self::InvalidFormat(format!("{err}: {e}")),
                Self::Timeout(e) => Self::Timeout(format!("{err}: {e}")),
            };
        }

        // a payload error anywhere in the chain means the source sent garbage
        if err.chain().any(|cause| cause.is::<serde_json::Error>()) {
            return Self::InvalidFormat(chain);
        }

        // otherwise, return an Internal error
        Self::Internal(chain)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidFormat(err.to_string())
    }
}

#[macro_export]
macro_rules! bad_gateway {
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::BadGateway(format!($fmt, $($arg)*))
    };
     ($err:expr $(,)?) => {
        $crate::Error::BadGateway(format!($err))
    };
}

#[macro_export]
macro_rules! timeout {
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::Timeout(format!($fmt, $($arg)*))
    };
     ($err:expr $(,)?) => {
        $crate::Error::Timeout(format!($err))
    };
}
