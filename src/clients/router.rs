//! Sending queries and classifying their responses.

use std::sync::Arc;

use async_trait::async_trait;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_client::HttpClient;
use crate::clients::http_response::HttpResponse;
use crate::clients::query::{Query, QueryArgs};
use crate::clients::remote_error::RemoteError;
use crate::config::EcsConfig;
use crate::error::EcsError;
use crate::markup::{self, MarkupNode};
use crate::unmarshal::PageFetcher;

/// Executes queries and returns their parsed success documents.
///
/// Every call to [`send`](Self::send) performs exactly one GET request. The
/// body is parsed and checked for an ECS error document before the status
/// code is looked at, since the service reports most failures that way. Only
/// documents free of `<Error>` elements are returned, so the unmarshaller
/// never sees an error response.
///
/// # Example
///
/// ```rust,no_run
/// use ecs_api::{EcsConfig, LicenseKey, Query, ResponseRouter};
///
/// # async fn run() -> Result<(), ecs_api::EcsError> {
/// let config = EcsConfig::builder()
///     .license_key(LicenseKey::new("1MGVS72Y8JF7EC7JDZG2")?)
///     .build()?;
/// let router = ResponseRouter::new(config)?;
///
/// let query = Query::builder("ItemLookup").param("ItemId", "0596009259").build()?;
/// let document = router.send(&query).await?;
/// println!("{}", document.tag());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ResponseRouter {
    http_client: HttpClient,
    config: EcsConfig,
}

// Verify ResponseRouter is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResponseRouter>();
};

impl ResponseRouter {
    /// Creates a router for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Http`] if the HTTP client cannot be created.
    pub fn new(config: EcsConfig) -> Result<Self, EcsError> {
        let http_client = HttpClient::new(&config)?;
        Ok(Self {
            http_client,
            config,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &EcsConfig {
        &self.config
    }

    /// Sends a query and returns the root of the success document.
    ///
    /// # Errors
    ///
    /// - [`EcsError::InvalidQuery`] if the query fails validation
    /// - [`EcsError::Http`] for transport failures and for non-2xx responses
    ///   without an error document
    /// - [`EcsError::Remote`] if the document contains an `<Error>` element
    /// - [`EcsError::Markup`] if a 2xx body is not well-formed XML
    pub async fn send(&self, query: &Query) -> Result<MarkupNode, EcsError> {
        query.verify()?;

        tracing::debug!(
            operation = query.operation(),
            url = %query.to_redacted_url(&self.config),
            "Sending ECS request"
        );

        let response = self.http_client.get(&query.to_url(&self.config)).await?;

        let document = match markup::parse(&response.body) {
            Ok(document) => document,
            Err(_) if !response.is_ok() => return Err(status_error(&response).into()),
            Err(error) => return Err(error.into()),
        };

        if let Some(error) = RemoteError::from_document(&document) {
            tracing::warn!(
                operation = query.operation(),
                code = %error.code,
                message = %error.message,
                "ECS returned an error document"
            );
            return Err(error.into());
        }

        if !response.is_ok() {
            return Err(status_error(&response).into());
        }

        Ok(document)
    }
}

fn status_error(response: &HttpResponse) -> HttpError {
    HttpError::Response(HttpResponseError {
        code: response.code,
        message: if response.body.trim().is_empty() {
            format!("status {}", response.code)
        } else {
            response.body.clone()
        },
        request_id: response.request_id().map(String::from),
    })
}

/// A [`PageFetcher`] that re-sends one operation with new arguments.
///
/// Paged collections produced by an operation hold one of these, so fetching
/// another page is an ordinary routed request.
#[derive(Clone, Debug)]
pub struct BoundOperation {
    router: Arc<ResponseRouter>,
    operation: String,
}

impl BoundOperation {
    /// Binds `operation` to `router`.
    #[must_use]
    pub fn new(router: Arc<ResponseRouter>, operation: impl Into<String>) -> Self {
        Self {
            router,
            operation: operation.into(),
        }
    }

    /// Returns the operation name.
    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }
}

#[async_trait]
impl PageFetcher for BoundOperation {
    async fn fetch_page(&self, args: &QueryArgs) -> Result<MarkupNode, EcsError> {
        let query = Query::builder(self.operation.as_str())
            .params(args.clone())
            .build()?;
        self.router.send(&query).await
    }
}
