//! ECS REST queries and their URL encoding.
//!
//! This module provides the [`Query`] type and its builder. A query is an
//! operation name plus operation arguments; the service, credentials,
//! version and configured options are added from [`EcsConfig`] when the URL
//! is built.

use std::collections::BTreeMap;

use crate::clients::errors::InvalidQueryError;
use crate::config::EcsConfig;

/// Operation arguments, kept sorted so URLs are deterministic.
pub type QueryArgs = BTreeMap<String, String>;

/// The service name sent with every request.
pub const SERVICE: &str = "AWSECommerceService";

/// The request path below the locale host.
pub const REQUEST_PATH: &str = "/onca/xml";

/// Arguments filled in from the configuration.
const RESERVED_ARGUMENTS: [&str; 4] = ["Service", "AWSAccessKeyId", "Operation", "Version"];

/// A request for one ECS operation.
///
/// Use [`Query::builder`] to construct queries.
///
/// # Example
///
/// ```rust
/// use ecs_api::{EcsConfig, LicenseKey, Query};
///
/// let config = EcsConfig::builder()
///     .license_key(LicenseKey::new("KEY").unwrap())
///     .build()
///     .unwrap();
///
/// let query = Query::builder("ItemLookup")
///     .param("ItemId", "0596009259")
///     .param("ResponseGroup", "")
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     query.to_url(&config),
///     "http://webservices.amazon.com/onca/xml?Service=AWSECommerceService\
///      &AWSAccessKeyId=KEY&Operation=ItemLookup&Version=2007-04-04&ItemId=0596009259"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    operation: String,
    args: QueryArgs,
}

impl Query {
    /// Creates a new builder for the given operation.
    #[must_use]
    pub fn builder(operation: impl Into<String>) -> QueryBuilder {
        QueryBuilder::new(operation)
    }

    /// Returns the operation name.
    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Returns the operation arguments.
    #[must_use]
    pub const fn args(&self) -> &QueryArgs {
        &self.args
    }

    /// Returns a copy of this query with its arguments replaced.
    #[must_use]
    pub fn with_args(&self, args: QueryArgs) -> Self {
        Self {
            operation: self.operation.clone(),
            args,
        }
    }

    /// Validates the query.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidQueryError`] if the operation or an argument name is
    /// empty, or if an argument is one the configuration supplies.
    pub fn verify(&self) -> Result<(), InvalidQueryError> {
        if self.operation.trim().is_empty() {
            return Err(InvalidQueryError::EmptyOperation);
        }

        for name in self.args.keys() {
            if name.is_empty() {
                return Err(InvalidQueryError::EmptyArgumentName);
            }
            if RESERVED_ARGUMENTS.contains(&name.as_str()) {
                return Err(InvalidQueryError::ReservedArgument { name: name.clone() });
            }
        }

        Ok(())
    }

    /// Builds the request URL.
    ///
    /// Configured options (the associate tag among them) are overridden by
    /// query arguments of the same name. Arguments with empty
    /// values are left out. All values are percent-encoded.
    #[must_use]
    pub fn to_url(&self, config: &EcsConfig) -> String {
        self.build_url(config, &urlencoding::encode(config.license_key().as_ref()))
    }

    /// Builds the request URL with the license key masked, for logging.
    #[must_use]
    pub fn to_redacted_url(&self, config: &EcsConfig) -> String {
        self.build_url(config, "*****")
    }

    fn build_url(&self, config: &EcsConfig, access_key: &str) -> String {
        let mut url = format!(
            "{}{REQUEST_PATH}?Service={SERVICE}&AWSAccessKeyId={access_key}&Operation={}&Version={}",
            config.base_url(),
            urlencoding::encode(&self.operation),
            urlencoding::encode(config.api_version().as_str()),
        );

        let mut merged: BTreeMap<&str, &str> = config
            .options()
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        for (name, value) in &self.args {
            merged.insert(name, value);
        }

        for (name, value) in merged {
            if value.is_empty() {
                continue;
            }
            url.push('&');
            url.push_str(&urlencoding::encode(name));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }

        url
    }
}

/// Builder for constructing [`Query`] instances.
#[derive(Debug)]
pub struct QueryBuilder {
    operation: String,
    args: QueryArgs,
}

impl QueryBuilder {
    fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            args: QueryArgs::new(),
        }
    }

    /// Adds a single argument, replacing any previous value.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }

    /// Adds an argument only when a value is given.
    #[must_use]
    pub fn param_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }

    /// Adds several arguments at once.
    #[must_use]
    pub fn params<I, K, V>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.args
            .extend(args.into_iter().map(|(name, value)| (name.into(), value.into())));
        self
    }

    /// Builds the query, validating it first.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidQueryError`] if validation fails.
    pub fn build(self) -> Result<Query, InvalidQueryError> {
        let query = Query {
            operation: self.operation,
            args: self.args,
        };
        query.verify()?;
        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Endpoint, LicenseKey, Locale};

    fn config() -> EcsConfig {
        EcsConfig::builder()
            .license_key(LicenseKey::new("SECRETKEY").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_url_has_fixed_prefix() {
        let query = Query::builder("ItemSearch").build().unwrap();
        assert_eq!(
            query.to_url(&config()),
            "http://webservices.amazon.com/onca/xml?Service=AWSECommerceService&AWSAccessKeyId=SECRETKEY&Operation=ItemSearch&Version=2007-04-04"
        );
    }

    #[test]
    fn test_url_encodes_values_and_skips_empty_arguments() {
        let query = Query::builder("ItemSearch")
            .param("SearchIndex", "Books")
            .param("Keywords", "programming python & more")
            .param("Sort", "")
            .build()
            .unwrap();
        let url = query.to_url(&config());
        assert!(url.ends_with("&Keywords=programming%20python%20%26%20more&SearchIndex=Books"));
        assert!(!url.contains("Sort"));
    }

    #[test]
    fn test_arguments_override_configured_options() {
        let config = EcsConfig::builder()
            .license_key(LicenseKey::new("KEY").unwrap())
            .locale(Locale::Uk)
            .associate_tag("assoc-21")
            .option("MerchantId", "All")
            .build()
            .unwrap();

        let query = Query::builder("ItemLookup")
            .param("ItemId", "X")
            .param("MerchantId", "Amazon")
            .build()
            .unwrap();
        let url = query.to_url(&config);
        assert!(url.starts_with("http://webservices.amazon.co.uk/onca/xml?"));
        assert!(url.ends_with("&AssociateTag=assoc-21&ItemId=X&MerchantId=Amazon"));
    }

    #[test]
    fn test_endpoint_override_replaces_locale_host() {
        let config = EcsConfig::builder()
            .license_key(LicenseKey::new("KEY").unwrap())
            .endpoint(Endpoint::new("http://127.0.0.1:8080/").unwrap())
            .build()
            .unwrap();
        let url = Query::builder("CartGet").build().unwrap().to_url(&config);
        assert!(url.starts_with("http://127.0.0.1:8080/onca/xml?Service="));
    }

    #[test]
    fn test_redacted_url_hides_license_key() {
        let query = Query::builder("ItemLookup").build().unwrap();
        let url = query.to_redacted_url(&config());
        assert!(!url.contains("SECRETKEY"));
        assert!(url.contains("AWSAccessKeyId=*****"));
    }

    #[test]
    fn test_verify_rejects_empty_operation() {
        assert_eq!(
            Query::builder("  ").build().unwrap_err(),
            InvalidQueryError::EmptyOperation
        );
    }

    #[test]
    fn test_verify_rejects_reserved_arguments() {
        let error = Query::builder("ItemLookup")
            .param("Version", "2005-10-05")
            .build()
            .unwrap_err();
        assert_eq!(
            error,
            InvalidQueryError::ReservedArgument {
                name: "Version".to_string()
            }
        );
    }

    #[test]
    fn test_param_opt_and_params() {
        let query = Query::builder("ListSearch")
            .param_opt("Email", None::<String>)
            .param_opt("City", Some("Seattle"))
            .params([("ListType", "WishList"), ("Name", "Bob")])
            .build()
            .unwrap();
        assert_eq!(query.args().len(), 3);
        assert!(!query.args().contains_key("Email"));
    }

    #[test]
    fn test_with_args_keeps_operation() {
        let query = Query::builder("ItemSearch").build().unwrap();
        let mut args = QueryArgs::new();
        args.insert("ItemPage".to_string(), "2".to_string());
        let paged = query.with_args(args);
        assert_eq!(paged.operation(), "ItemSearch");
        assert_eq!(paged.args().get("ItemPage").unwrap(), "2");
    }
}
