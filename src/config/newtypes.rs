//! Validated newtype wrappers for configuration values.
//!
//! Each wrapper validates its contents on construction, so a built
//! [`EcsConfig`](crate::EcsConfig) never holds an empty key or a malformed
//! endpoint.

use crate::error::ConfigError;
use std::fmt;

/// Environment variable consulted when no license key is configured.
pub const LICENSE_KEY_ENV: &str = "AWS_LICENSE_KEY";

/// A validated ECS license key (`AWSAccessKeyId`).
///
/// The key is non-empty and trimmed. Its `Debug` output is masked so the key
/// does not end up in logs.
///
/// # Example
///
/// ```rust
/// use ecs_api::LicenseKey;
///
/// let key = LicenseKey::new(" 1MGVS72Y8JF7EC7JDZG2 ").unwrap();
/// assert_eq!(key.as_ref(), "1MGVS72Y8JF7EC7JDZG2");
/// assert_eq!(format!("{key:?}"), "LicenseKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LicenseKey(String);

impl LicenseKey {
    /// Creates a new validated license key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyLicenseKey`] if the key is empty or
    /// whitespace.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::EmptyLicenseKey);
        }
        Ok(Self(key.to_string()))
    }

    /// Reads the key from the `AWS_LICENSE_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoLicenseKey`] if the variable is unset, empty,
    /// or not valid unicode.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_value(std::env::var(LICENSE_KEY_ENV).ok())
    }

    pub(crate) fn from_env_value(value: Option<String>) -> Result<Self, ConfigError> {
        value
            .and_then(|value| Self::new(value).ok())
            .ok_or(ConfigError::NoLicenseKey)
    }
}

impl AsRef<str> for LicenseKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LicenseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LicenseKey(*****)")
    }
}

/// A validated service endpoint overriding the locale host.
///
/// Useful for proxies and for pointing the client at a mock server. Any
/// trailing `/` is dropped so the request path can be appended directly.
///
/// # Example
///
/// ```rust
/// use ecs_api::Endpoint;
///
/// let endpoint = Endpoint::new("http://localhost:8080/").unwrap();
/// assert_eq!(endpoint.as_ref(), "http://localhost:8080");
/// assert_eq!(endpoint.scheme(), "http");
/// assert_eq!(endpoint.host_name(), "localhost");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl Endpoint {
    /// Creates a new validated endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the URL has no scheme, a
    /// non-alphabetic scheme, or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidEndpoint { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let host_end = url[host_start..]
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g. `http`).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        &self.url
    }
}
