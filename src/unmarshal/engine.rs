//! The markup-to-object traversal.

use std::fmt;
use std::sync::Arc;

use crate::clients::QueryArgs;
use crate::markup::MarkupNode;
use crate::unmarshal::paged::collect_page;
use crate::unmarshal::{ItemList, ObjectGraph, PageFetcher, PagedCollection, TransformRules, Value};

/// The fetch callback and argument template handed to every paged
/// collection built during a traversal.
#[derive(Clone)]
pub struct PageSource {
    fetcher: Arc<dyn PageFetcher>,
    args: QueryArgs,
}

impl PageSource {
    /// Creates a page source.
    #[must_use]
    pub fn new(fetcher: Arc<dyn PageFetcher>, args: QueryArgs) -> Self {
        Self { fetcher, args }
    }
}

impl fmt::Debug for PageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageSource")
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// Converts [`MarkupNode`] trees into [`Value`]s under a fixed rule set.
///
/// The traversal is depth first in document order. For each element child
/// of the node being filled:
///
/// 1. If the target object already has a field with the child's tag, that
///    field is promoted to a list and the child's value appended. This check
///    runs before any rule, so a repeated tag always yields a list.
/// 2. Otherwise the first matching rule applies, in this order: pivoted,
///    bypassed, collective, collected, paged. A child matching no rule
///    becomes an ordinary field.
///
/// Collected children go to the list opened by the nearest collective
/// ancestor, reached through pivots only. A collected child with no such
/// list is stored as an ordinary field. Paged children become a
/// [`PagedCollection`] when a [`PageSource`] is configured and a plain list
/// otherwise. The items of a paged collection are unmarshalled without the
/// page source, so paged tags nested inside them are plain lists.
///
/// # Example
///
/// ```rust
/// use ecs_api::{markup, TransformRules, Unmarshaller};
/// use std::sync::Arc;
///
/// let rules = Arc::new(
///     TransformRules::builder()
///         .collective(["Items"])
///         .collected(["Item"])
///         .build(),
/// );
/// let node = markup::parse(
///     "<Response><Items><Item><ASIN>X</ASIN></Item><Item><ASIN>Y</ASIN></Item></Items></Response>",
/// )
/// .unwrap();
///
/// let response = Unmarshaller::new(rules).unmarshal_object(&node);
/// let items = response.list("Items").unwrap();
/// assert_eq!(items.len(), 2);
/// assert_eq!(items[1].as_object().unwrap().text("ASIN").unwrap(), "Y");
/// ```
#[derive(Debug)]
pub struct Unmarshaller {
    rules: Arc<TransformRules>,
    page_source: Option<PageSource>,
}

impl Unmarshaller {
    /// Creates an unmarshaller without a page source.
    #[must_use]
    pub const fn new(rules: Arc<TransformRules>) -> Self {
        Self {
            rules,
            page_source: None,
        }
    }

    /// Sets the fetcher and argument template used by paged collections.
    #[must_use]
    pub fn with_page_source(mut self, fetcher: Arc<dyn PageFetcher>, args: QueryArgs) -> Self {
        self.page_source = Some(PageSource::new(fetcher, args));
        self
    }

    /// Returns the rules in use.
    #[must_use]
    pub const fn rules(&self) -> &Arc<TransformRules> {
        &self.rules
    }

    /// Unmarshals a node.
    ///
    /// A node without element children yields [`Value::Text`] holding the
    /// concatenation of its text (empty if it has none). Any other node
    /// yields [`Value::Object`].
    #[must_use]
    pub fn unmarshal(&self, node: &MarkupNode) -> Value {
        if node.has_elements() {
            Value::Object(self.unmarshal_object(node))
        } else {
            Value::Text(node.text())
        }
    }

    /// Fills a fresh record from the node's element children.
    ///
    /// Text children are ignored; a leaf node yields an empty record.
    #[must_use]
    pub fn unmarshal_object(&self, node: &MarkupNode) -> ObjectGraph {
        let mut object = ObjectGraph::new();
        self.fill(node, &mut object, None);
        object
    }

    /// Unmarshals a node into a list, as for a collective tag.
    ///
    /// Collected children become the list items; other children become the
    /// list's side fields.
    #[must_use]
    pub fn collect(&self, node: &MarkupNode) -> ItemList {
        let mut fields = ObjectGraph::new();
        let mut items = Vec::new();
        self.fill(node, &mut fields, Some(&mut items));
        ItemList::new(items, fields)
    }

    fn fill(&self, node: &MarkupNode, object: &mut ObjectGraph, mut list: Option<&mut Vec<Value>>) {
        for child in node.elements() {
            let tag = child.tag();

            if object.contains(tag) {
                object.append(tag, self.unmarshal(child));
                continue;
            }

            if self.rules.is_pivoted(tag) {
                self.fill(child, object, list.as_deref_mut());
            } else if self.rules.is_bypassed(tag) {
                continue;
            } else if self.rules.is_collective(tag) {
                object.insert(tag, self.collect(child));
            } else if self.rules.is_collected(tag) {
                let value = self.unmarshal(child);
                match list.as_deref_mut() {
                    Some(items) => items.push(value),
                    None => {
                        tracing::warn!(
                            tag,
                            "Collected element outside of any list; storing it as a field"
                        );
                        object.insert(tag, value);
                    }
                }
            } else if let Some(paging) = self.rules.paging(tag) {
                let first_page = collect_page(child, &self.rules);
                let value = match &self.page_source {
                    Some(source) => Value::Paged(PagedCollection::from_first_page(
                        Arc::clone(&source.fetcher),
                        source.args.clone(),
                        tag,
                        paging.clone(),
                        Arc::clone(&self.rules),
                        first_page,
                    )),
                    None => Value::List(first_page),
                };
                object.insert(tag, value);
            } else {
                object.insert(tag, self.unmarshal(child));
            }
        }
    }
}
