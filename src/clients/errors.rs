//! Transport and request-validation error types.
//!
//! - [`HttpResponseError`]: a non-2xx response that carried no ECS error
//!   document
//! - [`InvalidQueryError`]: a [`Query`](crate::Query) that fails validation
//!   before it is sent
//! - [`HttpError`]: unified error type for everything that can go wrong on
//!   the wire
//!
//! Error documents returned by the service are reported separately as
//! [`RemoteError`](crate::RemoteError).
//!
//! # Example
//!
//! ```rust,ignore
//! use ecs_api::{EcsError, HttpError};
//!
//! match router.send(&query).await {
//!     Ok(document) => println!("{}", document.tag()),
//!     Err(EcsError::Http(HttpError::Response(e))) => {
//!         println!("HTTP {}: {}", e.code, e.message);
//!     }
//!     Err(EcsError::Http(HttpError::Network(e))) => println!("Network error: {e}"),
//!     Err(EcsError::Remote(e)) => println!("{:?}: {}", e.kind, e.message),
//!     Err(e) => println!("{e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when the service answers with a non-successful status and
/// the body is not an ECS error document.
///
/// # Example
///
/// ```rust
/// use ecs_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 503,
///     message: "Service Unavailable".to_string(),
///     request_id: Some("abc-123".to_string()),
/// };
///
/// assert_eq!(error.to_string(), "HTTP 503: Service Unavailable");
/// ```
#[derive(Debug, Error)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The response body, or `status <code>` when the body is empty.
    pub message: String,
    /// Request identifier from the `x-amzn-RequestId` header, if present.
    pub request_id: Option<String>,
}

/// Error returned when a query fails validation.
///
/// # Example
///
/// ```rust
/// use ecs_api::clients::InvalidQueryError;
///
/// let error = InvalidQueryError::ReservedArgument {
///     name: "Operation".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Argument 'Operation' is set from the configuration and cannot be passed explicitly."
/// );
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidQueryError {
    /// The operation name is empty.
    #[error("Query operation cannot be empty.")]
    EmptyOperation,

    /// An argument name is empty.
    #[error("Query argument names cannot be empty.")]
    EmptyArgumentName,

    /// Operation parameters could not be turned into query arguments.
    #[error("Failed to serialize operation parameters: {message}")]
    Params {
        /// The serializer's message.
        message: String,
    },

    /// The argument is filled in from the configuration.
    #[error("Argument '{name}' is set from the configuration and cannot be passed explicitly.")]
    ReservedArgument {
        /// The reserved argument name.
        name: String,
    },
}

/// Unified error type for HTTP-related failures.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A non-2xx response without an error document.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
