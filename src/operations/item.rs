//! `ItemLookup`, `ItemSearch` and `SimilarityLookup`.
//!
//! All three answer with an `<Items>` element of `<Item>` records. Lookups
//! return every item at once; searches are paginated ten items per page and
//! come back as a [`PagedCollection`] driven by `ItemPage`.
//!
//! Inside an item, `ItemAttributes` is flattened into the item itself, so
//! `Title` or `Author` are read directly from the item record. Offer, review,
//! browse node, similar product, accessory and editorial review containers
//! become lists.

use std::sync::{Arc, OnceLock};

use serde::Serialize;

use crate::clients::Query;
use crate::error::EcsError;
use crate::operations::params::to_query_args;
use crate::operations::{take_list, take_paged, EcsClient};
use crate::unmarshal::{ItemList, PagedCollection, PagingSpec, TransformRules, TransformRulesBuilder};

const ITEM_CONTAINERS: [&str; 9] = [
    "Offers",
    "CustomerReviews",
    "BrowseNodes",
    "Children",
    "Ancestors",
    "SimilarProducts",
    "Accessories",
    "EditorialReviews",
    "ListmaniaLists",
];

const ITEM_ENTRIES: [&str; 8] = [
    "Item",
    "Offer",
    "Review",
    "BrowseNode",
    "SimilarProduct",
    "Accessory",
    "EditorialReview",
    "ListmaniaList",
];

fn item_rules() -> TransformRulesBuilder {
    TransformRules::builder()
        .bypassed(["OperationRequest"])
        .pivoted(["ItemAttributes"])
        .collective(ITEM_CONTAINERS)
        .collected(ITEM_ENTRIES)
}

/// Rules for operations returning every item at once.
fn lookup_rules() -> &'static Arc<TransformRules> {
    static RULES: OnceLock<Arc<TransformRules>> = OnceLock::new();
    RULES.get_or_init(|| Arc::new(item_rules().collective(["Items"]).build()))
}

/// Rules for `ItemSearch`, where `Items` is paged.
fn search_rules() -> &'static Arc<TransformRules> {
    static RULES: OnceLock<Arc<TransformRules>> = OnceLock::new();
    RULES.get_or_init(|| {
        Arc::new(
            item_rules()
                .paged("Items", PagingSpec::ecs("ItemPage", "TotalResults"))
                .build(),
        )
    })
}

/// Parameters for `ItemLookup`.
///
/// Multi-valued parameters are sent comma-separated.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ItemLookupParams {
    /// Item identifiers, ASINs unless `id_type` says otherwise.
    pub item_id: Vec<String>,

    /// Identifier type: `ASIN`, `UPC`, `SKU` or `EAN`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_type: Option<String>,

    /// Search index, required for every identifier type except `ASIN`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_index: Option<String>,

    /// Restrict offers to one merchant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,

    /// Offer condition: `New`, `Used`, `Refurbished`, `Collectible` or `All`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    /// Page of offers to include.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_page: Option<u32>,

    /// Page of customer reviews to include.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_page: Option<u32>,

    /// Response groups such as `Small`, `Medium` or `Large`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub response_group: Vec<String>,
}

/// Parameters for `ItemSearch`.
///
/// `search_index` is required; at least one of the criteria fields must be
/// set for the service to accept the search.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ItemSearchParams {
    /// Product category, e.g. `Books` or `Music`.
    pub search_index: String,

    /// Free-text keywords.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,

    /// Words in the title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Author name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Artist name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    /// Manufacturer name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,

    /// Browse node to search within.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browse_node: Option<String>,

    /// Sort order; valid values depend on the search index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    /// Restrict offers to one merchant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,

    /// Offer condition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    /// First page to return; later pages are fetched on demand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_page: Option<u32>,

    /// Response groups such as `Small`, `Medium` or `Large`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub response_group: Vec<String>,
}

/// Parameters for `SimilarityLookup`.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct SimilarityLookupParams {
    /// ASINs of the items to find similar products for.
    pub item_id: Vec<String>,

    /// `Intersection` (default) or `Random`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_type: Option<String>,

    /// Restrict offers to one merchant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,

    /// Offer condition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    /// Response groups such as `Small`, `Medium` or `Large`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub response_group: Vec<String>,
}

impl EcsClient {
    /// Looks up one item by ASIN.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Remote`] with
    /// [`RemoteErrorKind::InvalidParameterValue`](crate::RemoteErrorKind::InvalidParameterValue)
    /// for an unknown ASIN, or any transport error.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # async fn run(client: ecs_api::EcsClient) -> Result<(), ecs_api::EcsError> {
    /// let items = client.item_lookup("0596009259").await?;
    /// let book = items[0].as_object().unwrap();
    /// println!("{}", book.text("Title")?);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn item_lookup(&self, item_id: &str) -> Result<ItemList, EcsError> {
        self.item_lookup_with(ItemLookupParams {
            item_id: vec![item_id.to_string()],
            ..Default::default()
        })
        .await
    }

    /// Sends `ItemLookup` with full parameters.
    ///
    /// # Errors
    ///
    /// See [`item_lookup`](Self::item_lookup).
    pub async fn item_lookup_with(&self, params: ItemLookupParams) -> Result<ItemList, EcsError> {
        let query = Query::builder("ItemLookup")
            .params(to_query_args(&params)?)
            .build()?;
        let mut response = self.execute(&query, lookup_rules()).await?;
        take_list(&mut response, "Items")
    }

    /// Searches one search index for `keywords`.
    ///
    /// The returned collection reports the total number of results and
    /// fetches further pages as they are read.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Remote`] with
    /// [`RemoteErrorKind::NoExactMatches`](crate::RemoteErrorKind::NoExactMatches)
    /// when nothing matches, or any transport error.
    pub async fn item_search(
        &self,
        search_index: &str,
        keywords: &str,
    ) -> Result<PagedCollection, EcsError> {
        self.item_search_with(ItemSearchParams {
            search_index: search_index.to_string(),
            keywords: Some(keywords.to_string()),
            ..Default::default()
        })
        .await
    }

    /// Sends `ItemSearch` with full parameters.
    ///
    /// # Errors
    ///
    /// See [`item_search`](Self::item_search).
    pub async fn item_search_with(
        &self,
        params: ItemSearchParams,
    ) -> Result<PagedCollection, EcsError> {
        let query = Query::builder("ItemSearch")
            .params(to_query_args(&params)?)
            .build()?;
        let mut response = self.execute(&query, search_rules()).await?;
        take_paged(&mut response, "Items")
    }

    /// Finds items similar to the given ASINs.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Remote`] when the service finds no similar items,
    /// or any transport error.
    pub async fn similarity_lookup(
        &self,
        params: SimilarityLookupParams,
    ) -> Result<ItemList, EcsError> {
        let query = Query::builder("SimilarityLookup")
            .params(to_query_args(&params)?)
            .build()?;
        let mut response = self.execute(&query, lookup_rules()).await?;
        take_list(&mut response, "Items")
    }
}
