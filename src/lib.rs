//! # ECS API Rust Client
//!
//! A Rust client for the Amazon E-Commerce Service (ECS) REST interface,
//! turning its deeply nested XML responses into navigable object graphs.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`EcsConfig`] and [`EcsConfigBuilder`]
//! - Validated newtypes for the license key, locale, API version and endpoint
//! - A generic, rule-driven XML unmarshaller ([`Unmarshaller`] and
//!   [`TransformRules`])
//! - Lazily fetched, server-paginated collections ([`PagedCollection`])
//! - A response router that maps ECS error documents to
//!   [`RemoteErrorKind`]s
//! - Typed adapters for the common operations on [`EcsClient`]
//!
//! ## Quick Start
//!
//! ```rust
//! use ecs_api::{ApiVersion, EcsConfig, LicenseKey, Locale};
//!
//! let config = EcsConfig::builder()
//!     .license_key(LicenseKey::new("0123456789ABCDEFGHIJ").unwrap())
//!     .locale("uk".parse::<Locale>().unwrap())
//!     .api_version(ApiVersion::latest())
//!     .associate_tag("mytag-21")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url(), "http://webservices.amazon.co.uk");
//! ```
//!
//! ## Searching
//!
//! ```rust,no_run
//! use ecs_api::{EcsClient, EcsConfig, LicenseKey};
//!
//! # async fn run() -> Result<(), ecs_api::EcsError> {
//! let client = EcsClient::new(
//!     EcsConfig::builder()
//!         .license_key(LicenseKey::new("0123456789ABCDEFGHIJ")?)
//!         .build()?,
//! )?;
//!
//! // Only the first page is fetched here
//! let mut books = client.item_search("Books", "python").await?;
//! println!("{} books", books.len());
//!
//! // Index 25 lives on page 3, fetched now
//! let book = books.get(25).await?;
//! println!("{}", book.as_object().map_or("", |b| b.text("Title").unwrap_or("")));
//! # Ok(())
//! # }
//! ```
//!
//! ## Unmarshalling Any Document
//!
//! ```rust
//! use ecs_api::{markup, TransformRules, Unmarshaller};
//! use std::sync::Arc;
//!
//! let rules = Arc::new(
//!     TransformRules::builder()
//!         .bypassed(["OperationRequest"])
//!         .collective(["Items"])
//!         .collected(["Item"])
//!         .build(),
//! );
//! let document = markup::parse(
//!     "<ItemLookupResponse><OperationRequest/>\
//!      <Items><Item><ASIN>X</ASIN></Item><Item><ASIN>Y</ASIN></Item></Items>\
//!      </ItemLookupResponse>",
//! )
//! .unwrap();
//!
//! let response = Unmarshaller::new(rules).unmarshal_object(&document);
//! assert_eq!(response.list("Items").unwrap().len(), 2);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Configuration is checked before any request
//! - **Thread-safe**: Configuration, rules, router and client are `Send + Sync`
//! - **Sequential paging**: Each uncached page costs one awaited request

pub mod clients;
pub mod config;
pub mod error;
pub mod markup;
pub mod operations;
pub mod unmarshal;

// Re-export public types at crate root for convenience
pub use config::{ApiVersion, EcsConfig, EcsConfigBuilder, Endpoint, LicenseKey, Locale};
pub use error::{ConfigError, EcsError};
pub use markup::{MarkupError, MarkupNode};

// Re-export request plumbing
pub use clients::{
    BoundOperation, HttpError, HttpResponseError, InvalidQueryError, Query, QueryArgs,
    QueryBuilder, RemoteError, RemoteErrorKind, ResponseRouter,
};

// Re-export unmarshalling types
pub use unmarshal::{
    Cursor, ItemList, ObjectGraph, PageFetcher, PageSource, PagedCollection, PagingSpec,
    TransformRules, TransformRulesBuilder, Unmarshaller, Value,
};

// Re-export operation adapters
pub use operations::{
    BrowseNodeLookupParams, CartHandle, CartItem, EcsClient, ItemLookupParams, ItemSearchParams,
    ListLookupParams, ListSearchParams, SimilarityLookupParams,
};
