//! `ListLookup` and `ListSearch`.
//!
//! A list search pages over `<List>` records with `ListPage`. A list lookup
//! returns one list whose entries are paged with `ProductPage`, so the
//! collection it yields holds `<ListItem>` records and keeps the list's own
//! fields (`ListName`, `TotalItems`, ...) on the cached page.

use std::sync::{Arc, OnceLock};

use serde::Serialize;

use crate::clients::Query;
use crate::error::EcsError;
use crate::operations::params::to_query_args;
use crate::operations::{take_paged, EcsClient};
use crate::unmarshal::{PagedCollection, PagingSpec, TransformRules};

fn search_rules() -> &'static Arc<TransformRules> {
    static RULES: OnceLock<Arc<TransformRules>> = OnceLock::new();
    RULES.get_or_init(|| {
        Arc::new(
            TransformRules::builder()
                .bypassed(["OperationRequest"])
                .paged("Lists", PagingSpec::ecs("ListPage", "TotalResults"))
                .collected(["List"])
                .build(),
        )
    })
}

fn lookup_rules() -> &'static Arc<TransformRules> {
    static RULES: OnceLock<Arc<TransformRules>> = OnceLock::new();
    RULES.get_or_init(|| {
        Arc::new(
            TransformRules::builder()
                .bypassed(["OperationRequest"])
                .pivoted(["Lists", "ItemAttributes"])
                .paged("List", PagingSpec::ecs("ProductPage", "TotalItems"))
                .collected(["ListItem"])
                .build(),
        )
    })
}

/// Parameters for `ListLookup`.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ListLookupParams {
    /// The list identifier.
    pub list_id: String,

    /// `WishList`, `Listmania` or `WeddingRegistry`.
    pub list_type: String,

    /// Sort order of the list entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    /// First page of entries to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_page: Option<u32>,

    /// Response groups such as `ListInfo` or `ListFull`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub response_group: Vec<String>,
}

/// Parameters for `ListSearch`.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ListSearchParams {
    /// `WishList` or `WeddingRegistry`.
    pub list_type: String,

    /// Owner's name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Owner's e-mail address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Owner's city.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// First page of lists to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_page: Option<u32>,

    /// Response groups.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub response_group: Vec<String>,
}

impl EcsClient {
    /// Fetches the entries of one list, paged on demand.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Remote`] for an unknown list, or any transport
    /// error.
    pub async fn list_lookup(&self, params: ListLookupParams) -> Result<PagedCollection, EcsError> {
        let query = Query::builder("ListLookup")
            .params(to_query_args(&params)?)
            .build()?;
        let mut response = self.execute(&query, lookup_rules()).await?;
        take_paged(&mut response, "List")
    }

    /// Searches for lists, paged on demand.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Remote`] when no list matches, or any transport
    /// error.
    pub async fn list_search(&self, params: ListSearchParams) -> Result<PagedCollection, EcsError> {
        let query = Query::builder("ListSearch")
            .params(to_query_args(&params)?)
            .build()?;
        let mut response = self.execute(&query, search_rules()).await?;
        take_paged(&mut response, "Lists")
    }
}
