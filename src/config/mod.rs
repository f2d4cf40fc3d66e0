//! Configuration types for the ECS client.
//!
//! The main types in this module are:
//!
//! - [`EcsConfig`]: every setting a request needs besides its own arguments
//! - [`EcsConfigBuilder`]: a builder for constructing [`EcsConfig`] instances
//! - [`LicenseKey`]: a validated license key with masked debug output
//! - [`Locale`]: the marketplace, which selects the service host
//! - [`ApiVersion`]: the ECS API version to request
//! - [`Endpoint`]: an optional URL replacing the locale host
//!
//! # Example
//!
//! ```rust
//! use ecs_api::{ApiVersion, EcsConfig, LicenseKey, Locale};
//!
//! let config = EcsConfig::builder()
//!     .license_key(LicenseKey::new("1MGVS72Y8JF7EC7JDZG2").unwrap())
//!     .locale(Locale::De)
//!     .api_version(ApiVersion::latest())
//!     .associate_tag("mytag-21")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url(), "http://webservices.amazon.de");
//! assert_eq!(config.associate_tag(), Some("mytag-21"));
//! ```

mod locale;
mod newtypes;
mod version;

pub use locale::Locale;
pub use newtypes::{Endpoint, LicenseKey, LICENSE_KEY_ENV};
pub use version::ApiVersion;

use std::collections::BTreeMap;

use crate::error::ConfigError;

/// Option names accepted by [`EcsConfigBuilder::option`].
pub const KNOWN_OPTIONS: [&str; 6] = [
    "AssociateTag",
    "MerchantId",
    "Validate",
    "XMLEscaping",
    "Style",
    "ContentType",
];

/// Configuration for the ECS client.
///
/// `EcsConfig` is `Clone`, `Send`, and `Sync`; one instance is typically
/// shared by a router and every collection it produces.
#[derive(Clone, Debug)]
pub struct EcsConfig {
    license_key: LicenseKey,
    locale: Locale,
    api_version: ApiVersion,
    endpoint: Option<Endpoint>,
    user_agent_prefix: Option<String>,
    options: BTreeMap<String, String>,
}

impl EcsConfig {
    /// Creates a new builder for constructing an `EcsConfig`.
    #[must_use]
    pub fn builder() -> EcsConfigBuilder {
        EcsConfigBuilder::new()
    }

    /// Returns the license key.
    #[must_use]
    pub const fn license_key(&self) -> &LicenseKey {
        &self.license_key
    }

    /// Returns the locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the endpoint override, if configured.
    #[must_use]
    pub const fn endpoint(&self) -> Option<&Endpoint> {
        self.endpoint.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the associate tag, if configured.
    #[must_use]
    pub fn associate_tag(&self) -> Option<&str> {
        self.options.get("AssociateTag").map(String::as_str)
    }

    /// Returns the options added to every request.
    #[must_use]
    pub const fn options(&self) -> &BTreeMap<String, String> {
        &self.options
    }

    /// Returns the scheme and host requests are sent to, without a trailing
    /// slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.endpoint.as_ref().map_or_else(
            || format!("http://{}", self.locale.host()),
            |endpoint| endpoint.as_ref().to_string(),
        )
    }
}

// Verify EcsConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EcsConfig>();
};

/// Builder for constructing [`EcsConfig`] instances.
///
/// # Defaults
///
/// - `license_key`: read from `AWS_LICENSE_KEY` when not set
/// - `locale`: [`Locale::Us`]
/// - `api_version`: [`ApiVersion::latest`]
/// - `endpoint`: `None` (the locale host is used)
/// - `user_agent_prefix`: `None`
/// - options: none
#[derive(Debug, Default)]
pub struct EcsConfigBuilder {
    license_key: Option<LicenseKey>,
    locale: Option<Locale>,
    api_version: Option<ApiVersion>,
    endpoint: Option<Endpoint>,
    user_agent_prefix: Option<String>,
    options: Vec<(String, String)>,
}

impl EcsConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the license key.
    #[must_use]
    pub fn license_key(mut self, key: LicenseKey) -> Self {
        self.license_key = Some(key);
        self
    }

    /// Sets the locale.
    #[must_use]
    pub const fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the associate tag. Shorthand for `option("AssociateTag", tag)`.
    #[must_use]
    pub fn associate_tag(self, tag: impl Into<String>) -> Self {
        self.option("AssociateTag", tag)
    }

    /// Sends requests to `endpoint` instead of the locale host.
    #[must_use]
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Adds an option sent with every request.
    ///
    /// The name must be one of [`KNOWN_OPTIONS`]; this is checked by
    /// [`build`](Self::build).
    #[must_use]
    pub fn option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push((name.into(), value.into()));
        self
    }

    /// Builds the [`EcsConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BadOption`] for an unknown option name, or
    /// [`ConfigError::NoLicenseKey`] if no key was set and `AWS_LICENSE_KEY`
    /// holds none.
    pub fn build(mut self) -> Result<EcsConfig, ConfigError> {
        let license_key = match self.license_key.take() {
            Some(key) => key,
            None => LicenseKey::from_env()?,
        };
        self.finish(license_key)
    }

    fn finish(self, license_key: LicenseKey) -> Result<EcsConfig, ConfigError> {
        let mut options = BTreeMap::new();
        for (name, value) in self.options {
            if !KNOWN_OPTIONS.contains(&name.as_str()) {
                return Err(ConfigError::BadOption { option: name });
            }
            options.insert(name, value);
        }

        Ok(EcsConfig {
            license_key,
            locale: self.locale.unwrap_or_default(),
            api_version: self.api_version.unwrap_or_default(),
            endpoint: self.endpoint,
            user_agent_prefix: self.user_agent_prefix,
            options,
        })
    }
}
