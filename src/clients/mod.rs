//! Request plumbing for the ECS REST interface.
//!
//! This module builds query URLs, sends them over HTTP, and turns the
//! responses into either a parsed success document or a typed error.
//!
//! # Overview
//!
//! - [`Query`]: an operation name plus its arguments
//! - [`ResponseRouter`]: sends a query and classifies the response
//! - [`BoundOperation`]: a [`PageFetcher`](crate::PageFetcher) re-sending one
//!   operation, used by paged collections
//! - [`RemoteError`] / [`RemoteErrorKind`]: errors reported by the service
//! - [`HttpClient`] / [`HttpResponse`]: the transport underneath
//!
//! # Example
//!
//! ```rust,no_run
//! use ecs_api::{EcsConfig, LicenseKey, Query, ResponseRouter};
//!
//! # async fn run() -> Result<(), ecs_api::EcsError> {
//! let router = ResponseRouter::new(
//!     EcsConfig::builder()
//!         .license_key(LicenseKey::new("1MGVS72Y8JF7EC7JDZG2")?)
//!         .build()?,
//! )?;
//!
//! let query = Query::builder("BrowseNodeLookup")
//!     .param("BrowseNodeId", "3839")
//!     .build()?;
//! let document = router.send(&query).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Failure Handling
//!
//! A response is checked in this order:
//!
//! - **Error document**: any `<Error>` element, at any depth, becomes a
//!   [`RemoteError`] whatever the status code
//! - **Non-2xx status**: becomes [`HttpResponseError`], also when the body
//!   is not XML
//! - **Malformed 2xx body**: becomes a markup error
//!
//! Nothing is retried.

mod errors;
mod http_client;
mod http_response;
mod query;
mod remote_error;
mod router;

pub use errors::{HttpError, HttpResponseError, InvalidQueryError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_response::HttpResponse;
pub use query::{Query, QueryArgs, QueryBuilder, REQUEST_PATH, SERVICE};
pub use remote_error::{RemoteError, RemoteErrorKind};
pub use router::{BoundOperation, ResponseRouter};
