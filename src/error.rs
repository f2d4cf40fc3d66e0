//! Error types for the ECS API client.
//!
//! This module contains the configuration error raised before any network
//! call is made, and [`EcsError`], the crate-wide error returned by every
//! operation that touches the network, the markup parser, or an
//! unmarshalled object graph.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Network, remote, and collection failures are
//! reported through [`EcsError`], which wraps the more specific error types
//! of each layer.
//!
//! # Example
//!
//! ```rust
//! use ecs_api::{ConfigError, Locale};
//!
//! let result = "zh".parse::<Locale>();
//! assert!(matches!(result, Err(ConfigError::BadLocale { .. })));
//! ```

use thiserror::Error;

use crate::clients::{HttpError, InvalidQueryError, RemoteError};
use crate::markup::MarkupError;

/// Errors that can occur during client configuration.
///
/// Each variant is raised eagerly, before any request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// License key cannot be empty.
    #[error("License key cannot be empty. Please provide a valid ECS license key.")]
    EmptyLicenseKey,

    /// No license key was provided and none was found in the environment.
    #[error("No license key configured. Set one on the builder or in the AWS_LICENSE_KEY environment variable. Keys are issued at http://www.amazon.com/webservices.")]
    NoLicenseKey,

    /// The locale is not one of the supported marketplaces.
    #[error("Unsupported locale '{locale}'. Locale must be one of: us, uk, de, jp, fr, ca.")]
    BadLocale {
        /// The locale that was provided.
        locale: String,
    },

    /// An option name is not recognised.
    #[error("Unknown option '{option}'.")]
    BadOption {
        /// The option name that was provided.
        option: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM-DD' (e.g., '2007-04-04').")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// Endpoint URL is invalid.
    #[error("Invalid endpoint URL '{url}'. Please provide a valid URL with scheme (e.g., 'http://webservices.amazon.com').")]
    InvalidEndpoint {
        /// The invalid URL that was provided.
        url: String,
    },
}

/// Unified error type for ECS operations.
///
/// Use pattern matching to handle specific failure kinds.
///
/// # Example
///
/// ```rust,ignore
/// use ecs_api::{EcsError, RemoteErrorKind};
///
/// match client.item_lookup("0596009259").await {
///     Ok(items) => println!("{} items", items.len()),
///     Err(EcsError::Remote(e)) if e.kind == RemoteErrorKind::InvalidParameterValue => {
///         println!("Bad parameter: {}", e.message);
///     }
///     Err(EcsError::Http(e)) => println!("Transport failure: {e}"),
///     Err(e) => println!("Other error: {e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum EcsError {
    /// Configuration was rejected before sending.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The query failed validation before sending.
    #[error(transparent)]
    InvalidQuery(#[from] InvalidQueryError),

    /// The service answered with an error document.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Network, timeout, or non-2xx transport failure.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The response body was not well-formed markup.
    #[error(transparent)]
    Markup(#[from] MarkupError),

    /// A collection was indexed beyond its length.
    #[error("Index {index} is out of range for a collection of {len} items")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The collection length at the time of the request.
        len: usize,
    },

    /// An object graph has no field with the requested name.
    #[error("Field '{field}' not found")]
    FieldNotFound {
        /// The missing field name.
        field: String,
    },

    /// A field exists but holds a different kind of value.
    #[error("Field '{field}' is {found}, not {expected}")]
    UnexpectedShape {
        /// The field name.
        field: String,
        /// The kind of value that was expected.
        expected: &'static str,
        /// The kind of value the field holds.
        found: &'static str,
    },

    /// A fetched page does not contain the element holding its items.
    #[error("Response document has no <{tag}> element")]
    MissingElement {
        /// The tag that was searched for.
        tag: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_license_key_error_message() {
        let error = ConfigError::EmptyLicenseKey;
        let message = error.to_string();
        assert!(message.contains("License key cannot be empty"));
    }

    #[test]
    fn test_bad_locale_error_message() {
        let error = ConfigError::BadLocale {
            locale: "zh".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("'zh'"));
        assert!(message.contains("us, uk, de, jp, fr, ca"));
    }

    #[test]
    fn test_no_license_key_mentions_environment_variable() {
        let message = ConfigError::NoLicenseKey.to_string();
        assert!(message.contains("AWS_LICENSE_KEY"));
    }

    #[test]
    fn test_index_out_of_range_message() {
        let error = EcsError::IndexOutOfRange { index: 25, len: 25 };
        assert_eq!(
            error.to_string(),
            "Index 25 is out of range for a collection of 25 items"
        );
    }

    #[test]
    fn test_config_error_converts_into_ecs_error() {
        let error: EcsError = ConfigError::BadOption {
            option: "foo".to_string(),
        }
        .into();
        assert!(matches!(error, EcsError::Config(ConfigError::BadOption { .. })));
        assert!(error.to_string().contains("foo"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyLicenseKey;
        let _: &dyn std::error::Error = &error;
        let error = EcsError::FieldNotFound {
            field: "ASIN".to_string(),
        };
        let _: &dyn std::error::Error = &error;
    }
}
