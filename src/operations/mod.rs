//! Typed adapters for the ECS operations.
//!
//! [`EcsClient`] is the high-level entry point. Each operation builds a
//! [`Query`], sends it through the shared [`ResponseRouter`], and unmarshals
//! the success document with the rule set for that operation.
//!
//! # Operations
//!
//! | Operation | Method | Result |
//! |-----------|--------|--------|
//! | `ItemLookup` | [`EcsClient::item_lookup`] | [`ItemList`] |
//! | `ItemSearch` | [`EcsClient::item_search`] | [`PagedCollection`] |
//! | `SimilarityLookup` | [`EcsClient::similarity_lookup`] | [`ItemList`] |
//! | `ListLookup` | [`EcsClient::list_lookup`] | [`PagedCollection`] |
//! | `ListSearch` | [`EcsClient::list_search`] | [`PagedCollection`] |
//! | `BrowseNodeLookup` | [`EcsClient::browse_node_lookup`] | [`ItemList`] |
//! | `CartCreate` | [`EcsClient::cart_create`] | [`ObjectGraph`] |
//! | `CartAdd` | [`EcsClient::cart_add`] | [`ObjectGraph`] |
//! | `CartGet` | [`EcsClient::cart_get`] | [`ObjectGraph`] |
//! | `CartClear` | [`EcsClient::cart_clear`] | [`ObjectGraph`] |
//!
//! Operations without a dedicated method can be sent with
//! [`EcsClient::execute`] and a custom [`TransformRules`] set.
//!
//! # Example
//!
//! ```rust,no_run
//! use ecs_api::{EcsClient, EcsConfig, ItemSearchParams, LicenseKey, Locale};
//!
//! # async fn run() -> Result<(), ecs_api::EcsError> {
//! let config = EcsConfig::builder()
//!     .license_key(LicenseKey::new("0123456789ABCDEFGHIJ")?)
//!     .locale(Locale::Uk)
//!     .build()?;
//! let client = EcsClient::new(config)?;
//!
//! let mut books = client
//!     .item_search_with(ItemSearchParams {
//!         search_index: "Books".to_string(),
//!         author: Some("Lutz".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let first = books.get(0).await?;
//! println!("{}", first.as_object().map_or("", |item| item.text("Title").unwrap_or("")));
//! # Ok(())
//! # }
//! ```

mod browse_node;
mod cart;
mod item;
mod list;
mod params;

use std::sync::Arc;

use crate::clients::{BoundOperation, Query, ResponseRouter};
use crate::config::EcsConfig;
use crate::error::EcsError;
use crate::unmarshal::{ItemList, ObjectGraph, PagedCollection, TransformRules, Unmarshaller, Value};

pub use browse_node::BrowseNodeLookupParams;
pub use cart::{CartHandle, CartItem};
pub use item::{ItemLookupParams, ItemSearchParams, SimilarityLookupParams};
pub use list::{ListLookupParams, ListSearchParams};

/// High-level client for the ECS operations.
///
/// Cloning is cheap; clones share one [`ResponseRouter`] and its connection
/// pool.
///
/// # Thread Safety
///
/// `EcsClient` is `Send + Sync`. The [`PagedCollection`]s it returns are
/// owned by the caller and fetch further pages through the same router.
#[derive(Clone, Debug)]
pub struct EcsClient {
    router: Arc<ResponseRouter>,
}

// Verify EcsClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EcsClient>();
};

impl EcsClient {
    /// Creates a client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Http`] if the HTTP client cannot be created.
    pub fn new(config: EcsConfig) -> Result<Self, EcsError> {
        Ok(Self::from_router(Arc::new(ResponseRouter::new(config)?)))
    }

    /// Creates a client sharing an existing router.
    #[must_use]
    pub const fn from_router(router: Arc<ResponseRouter>) -> Self {
        Self { router }
    }

    /// Returns the router used for every request.
    #[must_use]
    pub const fn router(&self) -> &Arc<ResponseRouter> {
        &self.router
    }

    /// Sends `query` and unmarshals the response root with `rules`.
    ///
    /// Paged tags in `rules` become [`PagedCollection`]s that refetch by
    /// re-sending the same operation with the query's arguments and a new
    /// page number.
    ///
    /// # Errors
    ///
    /// Returns any error of [`ResponseRouter::send`].
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use ecs_api::{EcsClient, Query, TransformRules};
    /// use std::sync::Arc;
    ///
    /// # async fn run(client: EcsClient) -> Result<(), ecs_api::EcsError> {
    /// let rules = Arc::new(
    ///     TransformRules::builder()
    ///         .bypassed(["OperationRequest"])
    ///         .collective(["SellerListings"])
    ///         .collected(["SellerListing"])
    ///         .build(),
    /// );
    /// let query = Query::builder("SellerListingLookup")
    ///     .param("Id", "B000A0RFN8")
    ///     .param("IdType", "ASIN")
    ///     .build()?;
    /// let response = client.execute(&query, &rules).await?;
    /// println!("{}", response.list("SellerListings")?.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn execute(
        &self,
        query: &Query,
        rules: &Arc<TransformRules>,
    ) -> Result<ObjectGraph, EcsError> {
        let document = self.router.send(query).await?;
        let fetcher = Arc::new(BoundOperation::new(
            Arc::clone(&self.router),
            query.operation(),
        ));
        let unmarshaller =
            Unmarshaller::new(Arc::clone(rules)).with_page_source(fetcher, query.args().clone());
        Ok(unmarshaller.unmarshal_object(&document))
    }
}

/// Removes a list field from an operation response.
pub(crate) fn take_list(response: &mut ObjectGraph, tag: &str) -> Result<ItemList, EcsError> {
    match response.take(tag)? {
        Value::List(list) => Ok(list),
        other => Err(other.mismatch(tag, "a list")),
    }
}

/// Removes a paged collection field from an operation response.
pub(crate) fn take_paged(
    response: &mut ObjectGraph,
    tag: &str,
) -> Result<PagedCollection, EcsError> {
    match response.take(tag)? {
        Value::Paged(collection) => Ok(collection),
        other => Err(other.mismatch(tag, "a paged collection")),
    }
}

/// Removes a record field from an operation response.
pub(crate) fn take_object(response: &mut ObjectGraph, tag: &str) -> Result<ObjectGraph, EcsError> {
    match response.take(tag)? {
        Value::Object(object) => Ok(object),
        other => Err(other.mismatch(tag, "an object")),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::{Endpoint, LicenseKey};
    use wiremock::MockServer;

    pub(crate) fn client(server: &MockServer) -> EcsClient {
        let config = EcsConfig::builder()
            .license_key(LicenseKey::new("TESTKEY").unwrap())
            .endpoint(Endpoint::new(server.uri()).unwrap())
            .build()
            .unwrap();
        EcsClient::new(config).unwrap()
    }
}
