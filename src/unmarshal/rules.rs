//! Shape-transformation rules consulted by the unmarshaller.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;

/// Paging parameters for a collection spread over several responses.
///
/// # Example
///
/// ```rust
/// use ecs_api::PagingSpec;
/// use std::num::NonZeroUsize;
///
/// let paging = PagingSpec::new("ItemPage", "TotalResults", NonZeroUsize::new(10).unwrap());
/// assert_eq!(paging.locate(9), (1, 9));
/// assert_eq!(paging.locate(10), (2, 0));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PagingSpec {
    page_argument: String,
    total_field: String,
    page_size: NonZeroUsize,
}

impl PagingSpec {
    /// Number of results ECS returns per page for every paginated operation.
    pub const ECS_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
        Some(size) => size,
        None => unreachable!(),
    };

    /// Creates a paging spec.
    ///
    /// * `page_argument` - the query argument selecting the page (e.g. `ItemPage`)
    /// * `total_field` - the field holding the total result count (e.g. `TotalResults`)
    /// * `page_size` - the number of items per page
    #[must_use]
    pub fn new(
        page_argument: impl Into<String>,
        total_field: impl Into<String>,
        page_size: NonZeroUsize,
    ) -> Self {
        Self {
            page_argument: page_argument.into(),
            total_field: total_field.into(),
            page_size,
        }
    }

    /// Creates a paging spec with the standard ECS page size.
    #[must_use]
    pub fn ecs(page_argument: impl Into<String>, total_field: impl Into<String>) -> Self {
        Self::new(page_argument, total_field, Self::ECS_PAGE_SIZE)
    }

    /// Returns the name of the page-selecting query argument.
    #[must_use]
    pub fn page_argument(&self) -> &str {
        &self.page_argument
    }

    /// Returns the name of the total-count field.
    #[must_use]
    pub fn total_field(&self) -> &str {
        &self.total_field
    }

    /// Returns the number of items per page.
    #[must_use]
    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Maps a logical index to its 1-based page number and offset within
    /// that page.
    #[must_use]
    pub const fn locate(&self, index: usize) -> (usize, usize) {
        let size = self.page_size.get();
        (index / size + 1, index % size)
    }
}

/// The set of tag-name rules applied during one unmarshal traversal.
///
/// Rules look at tag names only. Build them once per operation and share
/// them behind an `Arc`; they are never modified during a traversal.
///
/// # Example
///
/// ```rust
/// use ecs_api::{PagingSpec, TransformRules};
///
/// let rules = TransformRules::builder()
///     .bypassed(["OperationRequest"])
///     .pivoted(["ItemAttributes"])
///     .collective(["BrowseNodes"])
///     .collected(["Item", "BrowseNode"])
///     .paged("Items", PagingSpec::ecs("ItemPage", "TotalResults"))
///     .build();
///
/// assert!(rules.is_pivoted("ItemAttributes"));
/// assert!(rules.paging("Items").is_some());
/// assert!(!rules.is_collective("Items"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TransformRules {
    bypassed: HashSet<String>,
    pivoted: HashSet<String>,
    collective: HashSet<String>,
    collected: HashSet<String>,
    paged: HashMap<String, PagingSpec>,
}

impl TransformRules {
    /// Creates a builder with no rules.
    #[must_use]
    pub fn builder() -> TransformRulesBuilder {
        TransformRulesBuilder::default()
    }

    /// Returns `true` if nodes with this tag are skipped entirely.
    #[must_use]
    pub fn is_bypassed(&self, tag: &str) -> bool {
        self.bypassed.contains(tag)
    }

    /// Returns `true` if nodes with this tag splice their children into the
    /// enclosing object.
    #[must_use]
    pub fn is_pivoted(&self, tag: &str) -> bool {
        self.pivoted.contains(tag)
    }

    /// Returns `true` if nodes with this tag become a list field.
    #[must_use]
    pub fn is_collective(&self, tag: &str) -> bool {
        self.collective.contains(tag)
    }

    /// Returns `true` if nodes with this tag are appended to the nearest
    /// enclosing list.
    #[must_use]
    pub fn is_collected(&self, tag: &str) -> bool {
        self.collected.contains(tag)
    }

    /// Returns the paging parameters if nodes with this tag are the first
    /// page of a paged collection.
    #[must_use]
    pub fn paging(&self, tag: &str) -> Option<&PagingSpec> {
        self.paged.get(tag)
    }
}

/// Builder for [`TransformRules`].
#[derive(Debug, Default)]
pub struct TransformRulesBuilder {
    rules: TransformRules,
}

impl TransformRulesBuilder {
    /// Adds tags to skip.
    #[must_use]
    pub fn bypassed<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules.bypassed.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Adds tags whose children are spliced into their parent.
    #[must_use]
    pub fn pivoted<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules.pivoted.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Adds tags that become list fields.
    #[must_use]
    pub fn collective<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules.collective.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Adds tags appended to the nearest enclosing list.
    #[must_use]
    pub fn collected<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules.collected.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Marks a tag as the first page of a paged collection.
    #[must_use]
    pub fn paged(mut self, tag: impl Into<String>, paging: PagingSpec) -> Self {
        self.rules.paged.insert(tag.into(), paging);
        self
    }

    /// Builds the rule set.
    #[must_use]
    pub fn build(self) -> TransformRules {
        self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_match_nothing() {
        let rules = TransformRules::default();
        assert!(!rules.is_bypassed("Item"));
        assert!(!rules.is_pivoted("Item"));
        assert!(!rules.is_collective("Item"));
        assert!(!rules.is_collected("Item"));
        assert!(rules.paging("Item").is_none());
    }

    #[test]
    fn test_builder_accumulates_tags() {
        let rules = TransformRules::builder()
            .collected(["Item"])
            .collected(vec!["CartItem".to_string()])
            .build();
        assert!(rules.is_collected("Item"));
        assert!(rules.is_collected("CartItem"));
        assert!(!rules.is_collected("Items"));
    }

    #[test]
    fn test_locate_page_boundaries() {
        let paging = PagingSpec::ecs("ItemPage", "TotalResults");
        assert_eq!(paging.locate(0), (1, 0));
        assert_eq!(paging.locate(9), (1, 9));
        assert_eq!(paging.locate(10), (2, 0));
        assert_eq!(paging.locate(24), (3, 4));
    }

    #[test]
    fn test_locate_with_custom_page_size() {
        let paging = PagingSpec::new("ListPage", "TotalResults", NonZeroUsize::new(3).unwrap());
        assert_eq!(paging.locate(2), (1, 2));
        assert_eq!(paging.locate(3), (2, 0));
        assert_eq!(paging.page_size().get(), 3);
        assert_eq!(paging.page_argument(), "ListPage");
        assert_eq!(paging.total_field(), "TotalResults");
    }
}
