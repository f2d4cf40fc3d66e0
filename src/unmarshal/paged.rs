//! Lazily fetched, server-paginated collections.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::clients::QueryArgs;
use crate::error::EcsError;
use crate::markup::MarkupNode;
use crate::unmarshal::{ItemList, PagingSpec, TransformRules, Unmarshaller, Value};

/// Fetches one page of a paged collection.
///
/// Implementations receive the full argument set for the request, with the
/// page argument already set, and return the root of the success document.
/// Error documents must be turned into errors before they reach the caller;
/// [`BoundOperation`](crate::clients::BoundOperation) does this through the
/// response router.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the document for the given arguments.
    async fn fetch_page(&self, args: &QueryArgs) -> Result<MarkupNode, EcsError>;
}

/// A list whose items live on the server, one page at a time.
///
/// The collection caches exactly one page. Reading an index on another page
/// refetches through the [`PageFetcher`] it was built with, replacing the
/// cache. The total length is read once, from the first page.
///
/// Access is sequential: every method that may fetch takes `&mut self`, so
/// sharing one collection across tasks requires external locking.
///
/// # Example
///
/// ```rust,no_run
/// use ecs_api::{EcsClient, EcsConfig, LicenseKey};
///
/// # async fn run() -> Result<(), ecs_api::EcsError> {
/// let config = EcsConfig::builder()
///     .license_key(LicenseKey::new("0123456789ABCDEFGHIJ")?)
///     .build()?;
/// let client = EcsClient::new(config)?;
///
/// let mut books = client.item_search("Books", "python").await?;
/// println!("{} results", books.len());
///
/// let mut cursor = books.cursor();
/// while let Some(book) = cursor.next().await? {
///     println!("{}", book.as_object().and_then(|b| b.text("ASIN").ok()).unwrap_or("?"));
/// }
/// # Ok(())
/// # }
/// ```
pub struct PagedCollection {
    fetcher: Arc<dyn PageFetcher>,
    args: QueryArgs,
    items_tag: String,
    paging: PagingSpec,
    rules: Arc<TransformRules>,
    current_page: usize,
    items: ItemList,
    len: usize,
}

impl PagedCollection {
    /// Builds a collection around an already unmarshalled first page.
    ///
    /// The current page is taken from the page argument in `args` and
    /// defaults to 1. The length comes from the first page's total-count
    /// field. When that field is missing or not a number, the length is the
    /// number of items on the pages up to and including the current one,
    /// assuming every earlier page is full.
    #[must_use]
    pub fn from_first_page(
        fetcher: Arc<dyn PageFetcher>,
        args: QueryArgs,
        items_tag: impl Into<String>,
        paging: PagingSpec,
        rules: Arc<TransformRules>,
        first_page: ItemList,
    ) -> Self {
        let current_page = args
            .get(paging.page_argument())
            .and_then(|page| page.parse::<usize>().ok())
            .filter(|page| *page > 0)
            .unwrap_or(1);
        let len = first_page
            .fields()
            .get(paging.total_field())
            .and_then(Value::as_text)
            .and_then(|total| total.trim().parse::<usize>().ok())
            .unwrap_or_else(|| (current_page - 1) * paging.page_size().get() + first_page.len());

        Self {
            fetcher,
            args,
            items_tag: items_tag.into(),
            paging,
            rules,
            current_page,
            items: first_page,
            len,
        }
    }

    /// Fetches the first page and builds a collection from it.
    ///
    /// # Errors
    ///
    /// Returns whatever the fetcher returns, or [`EcsError::MissingElement`]
    /// if the document has no `items_tag` element.
    pub async fn fetch(
        fetcher: Arc<dyn PageFetcher>,
        args: QueryArgs,
        items_tag: impl Into<String>,
        paging: PagingSpec,
        rules: Arc<TransformRules>,
    ) -> Result<Self, EcsError> {
        let items_tag = items_tag.into();
        let document = fetcher.fetch_page(&args).await?;
        let first_page = collect_items(&document, &items_tag, &rules)?;
        Ok(Self::from_first_page(
            fetcher, args, items_tag, paging, rules, first_page,
        ))
    }

    /// Returns the total number of items across all pages.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the collection has no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the 1-based number of the cached page.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Returns the items of the cached page.
    #[must_use]
    pub const fn page_items(&self) -> &ItemList {
        &self.items
    }

    /// Returns the paging parameters.
    #[must_use]
    pub const fn paging(&self) -> &PagingSpec {
        &self.paging
    }

    /// Returns the arguments of the last successful fetch.
    #[must_use]
    pub const fn arguments(&self) -> &QueryArgs {
        &self.args
    }

    /// Returns the item at a logical index, fetching its page if it is not
    /// the cached one.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::IndexOutOfRange`] if `index >= len()` or the
    /// fetched page holds fewer items than expected, and propagates fetch
    /// errors. A failed fetch leaves the cached page untouched.
    pub async fn get(&mut self, index: usize) -> Result<&Value, EcsError> {
        let len = self.len;
        if index >= len {
            return Err(EcsError::IndexOutOfRange { index, len });
        }

        let (page, offset) = self.paging.locate(index);
        if page != self.current_page {
            self.load_page(page).await?;
        }

        self.items
            .get(offset)
            .ok_or(EcsError::IndexOutOfRange { index, len })
    }

    /// Returns a forward cursor starting at index 0.
    pub fn cursor(&mut self) -> Cursor<'_> {
        Cursor {
            collection: self,
            position: 0,
        }
    }

    async fn load_page(&mut self, page: usize) -> Result<(), EcsError> {
        let mut args = self.args.clone();
        args.insert(self.paging.page_argument().to_string(), page.to_string());

        tracing::debug!(
            items = %self.items_tag,
            page,
            previous = self.current_page,
            "Fetching page"
        );

        let document = self.fetcher.fetch_page(&args).await?;
        let items = collect_items(&document, &self.items_tag, &self.rules)?;

        self.args = args;
        self.items = items;
        self.current_page = page;
        Ok(())
    }
}

fn collect_items(
    document: &MarkupNode,
    items_tag: &str,
    rules: &Arc<TransformRules>,
) -> Result<ItemList, EcsError> {
    let node = document
        .find(items_tag)
        .ok_or_else(|| EcsError::MissingElement {
            tag: items_tag.to_string(),
        })?;
    Ok(collect_page(node, rules))
}

/// Unmarshals the items of one page.
///
/// Every page goes through here, so paged tags nested inside the items come
/// out as plain lists on the first page and on refetched ones alike.
pub(super) fn collect_page(node: &MarkupNode, rules: &Arc<TransformRules>) -> ItemList {
    Unmarshaller::new(Arc::clone(rules)).collect(node)
}

impl fmt::Debug for PagedCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedCollection")
            .field("items_tag", &self.items_tag)
            .field("paging", &self.paging)
            .field("args", &self.args)
            .field("current_page", &self.current_page)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

/// Forward iteration over a [`PagedCollection`].
///
/// Each step delegates to [`PagedCollection::get`], so pages are fetched as
/// the cursor crosses into them.
#[derive(Debug)]
pub struct Cursor<'a> {
    collection: &'a mut PagedCollection,
    position: usize,
}

impl Cursor<'_> {
    /// Returns the next item, or `None` once every index has been visited.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`PagedCollection::get`]. The cursor does not
    /// advance on error, so the same index is retried by the next call.
    pub async fn next(&mut self) -> Result<Option<&Value>, EcsError> {
        if self.position >= self.collection.len() {
            return Ok(None);
        }
        let index = self.position;
        let value = self.collection.get(index).await?;
        self.position = index + 1;
        Ok(Some(value))
    }

    /// Returns the index the next call to [`next`](Self::next) will read.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serves pages of `Item` elements carved out of `total` numbered items.
    struct CatalogFetcher {
        total: usize,
        report_total: bool,
        calls: Mutex<Vec<QueryArgs>>,
        fail_next: Mutex<bool>,
    }

    impl CatalogFetcher {
        fn new(total: usize) -> Self {
            Self {
                total,
                report_total: true,
                calls: Mutex::new(Vec::new()),
                fail_next: Mutex::new(false),
            }
        }

        fn pages_fetched(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|args| args.get("ItemPage").cloned().unwrap_or_default())
                .collect()
        }
    }

    #[async_trait]
    impl PageFetcher for CatalogFetcher {
        async fn fetch_page(&self, args: &QueryArgs) -> Result<MarkupNode, EcsError> {
            self.calls.lock().unwrap().push(args.clone());
            if std::mem::take(&mut *self.fail_next.lock().unwrap()) {
                return Err(EcsError::MissingElement {
                    tag: "simulated".to_string(),
                });
            }

            let page: usize = args
                .get("ItemPage")
                .map_or(1, |page| page.parse().unwrap());
            let mut items = MarkupNode::new("Items");
            if self.report_total {
                items = items.with_child(
                    MarkupNode::new("TotalResults").with_text(self.total.to_string()),
                );
            }
            let first = (page - 1) * 10;
            for index in first..self.total.min(first + 10) {
                items = items.with_child(
                    MarkupNode::new("Item")
                        .with_child(MarkupNode::new("ASIN").with_text(format!("A{index}"))),
                );
            }
            Ok(MarkupNode::new("ItemSearchResponse").with_child(items))
        }
    }

    fn rules() -> Arc<TransformRules> {
        Arc::new(TransformRules::builder().collected(["Item"]).build())
    }

    async fn collection(fetcher: &Arc<CatalogFetcher>) -> PagedCollection {
        let fetcher: Arc<dyn PageFetcher> = Arc::clone(fetcher) as Arc<dyn PageFetcher>;
        PagedCollection::fetch(
            fetcher,
            QueryArgs::new(),
            "Items",
            PagingSpec::ecs("ItemPage", "TotalResults"),
            rules(),
        )
        .await
        .unwrap()
    }

    fn asin(value: &Value) -> String {
        value.as_object().unwrap().text("ASIN").unwrap().to_string()
    }

    #[tokio::test]
    async fn test_len_comes_from_total_without_extra_fetch() {
        let fetcher = Arc::new(CatalogFetcher::new(25));
        let paged = collection(&fetcher).await;

        assert_eq!(paged.len(), 25);
        assert_eq!(paged.page_items().len(), 10);
        assert_eq!(paged.current_page(), 1);
        assert_eq!(fetcher.pages_fetched().len(), 1);
    }

    #[tokio::test]
    async fn test_len_falls_back_to_item_count() {
        let fetcher = Arc::new(CatalogFetcher {
            report_total: false,
            ..CatalogFetcher::new(25)
        });
        let paged = collection(&fetcher).await;
        assert_eq!(paged.len(), 10);
    }

    #[tokio::test]
    async fn test_len_fallback_counts_pages_before_the_starting_one() {
        let fetcher = Arc::new(CatalogFetcher {
            report_total: false,
            ..CatalogFetcher::new(25)
        });
        let mut args = QueryArgs::new();
        args.insert("ItemPage".to_string(), "3".to_string());
        let mut paged = PagedCollection::fetch(
            Arc::clone(&fetcher) as Arc<dyn PageFetcher>,
            args,
            "Items",
            PagingSpec::ecs("ItemPage", "TotalResults"),
            rules(),
        )
        .await
        .unwrap();

        assert_eq!(paged.len(), 25);
        assert_eq!(asin(paged.get(24).await.unwrap()), "A24");
        assert_eq!(fetcher.pages_fetched(), vec!["3"]);
    }

    #[tokio::test]
    async fn test_page_boundary_triggers_single_refetch() {
        let fetcher = Arc::new(CatalogFetcher::new(25));
        let mut paged = collection(&fetcher).await;

        assert_eq!(asin(paged.get(9).await.unwrap()), "A9");
        assert_eq!(fetcher.pages_fetched().len(), 1);

        assert_eq!(asin(paged.get(10).await.unwrap()), "A10");
        assert_eq!(fetcher.pages_fetched(), vec!["", "2"]);
        assert_eq!(paged.current_page(), 2);
        assert_eq!(paged.arguments().get("ItemPage").unwrap(), "2");
    }

    #[tokio::test]
    async fn test_repeated_get_on_cached_page_does_not_fetch() {
        let fetcher = Arc::new(CatalogFetcher::new(25));
        let mut paged = collection(&fetcher).await;

        let first = asin(paged.get(12).await.unwrap());
        let second = asin(paged.get(12).await.unwrap());
        assert_eq!(first, second);
        assert_eq!(fetcher.pages_fetched().len(), 2);
    }

    #[tokio::test]
    async fn test_out_of_range() {
        let fetcher = Arc::new(CatalogFetcher::new(25));
        let mut paged = collection(&fetcher).await;

        assert!(matches!(
            paged.get(25).await,
            Err(EcsError::IndexOutOfRange { index: 25, len: 25 })
        ));
        assert_eq!(fetcher.pages_fetched().len(), 1);
    }

    #[tokio::test]
    async fn test_cursor_visits_every_item_with_three_fetches() {
        let fetcher = Arc::new(CatalogFetcher::new(25));
        let mut paged = collection(&fetcher).await;

        let mut seen = Vec::new();
        let mut cursor = paged.cursor();
        while let Some(item) = cursor.next().await.unwrap() {
            seen.push(asin(item));
        }
        assert_eq!(cursor.position(), 25);
        assert!(cursor.next().await.unwrap().is_none());

        let expected: Vec<String> = (0..25).map(|index| format!("A{index}")).collect();
        assert_eq!(seen, expected);
        assert_eq!(fetcher.pages_fetched(), vec!["", "2", "3"]);
    }

    #[tokio::test]
    async fn test_failed_refetch_keeps_cached_page() {
        let fetcher = Arc::new(CatalogFetcher::new(25));
        let mut paged = collection(&fetcher).await;

        *fetcher.fail_next.lock().unwrap() = true;
        assert!(paged.get(15).await.is_err());
        assert_eq!(paged.current_page(), 1);
        assert!(paged.arguments().get("ItemPage").is_none());
        assert_eq!(asin(paged.get(3).await.unwrap()), "A3");

        assert_eq!(asin(paged.get(15).await.unwrap()), "A15");
        assert_eq!(fetcher.pages_fetched(), vec!["", "2", "2"]);
    }

    #[tokio::test]
    async fn test_starting_page_is_read_from_arguments() {
        let fetcher = Arc::new(CatalogFetcher::new(25));
        let mut args = QueryArgs::new();
        args.insert("ItemPage".to_string(), "3".to_string());
        let mut paged = PagedCollection::fetch(
            Arc::clone(&fetcher) as Arc<dyn PageFetcher>,
            args,
            "Items",
            PagingSpec::ecs("ItemPage", "TotalResults"),
            rules(),
        )
        .await
        .unwrap();

        assert_eq!(paged.current_page(), 3);
        assert_eq!(asin(paged.get(20).await.unwrap()), "A20");
        assert_eq!(fetcher.pages_fetched(), vec!["3"]);
    }

    #[tokio::test]
    async fn test_missing_items_element() {
        struct EmptyFetcher;

        #[async_trait]
        impl PageFetcher for EmptyFetcher {
            async fn fetch_page(&self, _args: &QueryArgs) -> Result<MarkupNode, EcsError> {
                Ok(MarkupNode::new("ItemSearchResponse"))
            }
        }

        let result = PagedCollection::fetch(
            Arc::new(EmptyFetcher),
            QueryArgs::new(),
            "Items",
            PagingSpec::ecs("ItemPage", "TotalResults"),
            rules(),
        )
        .await;
        assert!(matches!(result, Err(EcsError::MissingElement { tag }) if tag == "Items"));
    }
}
