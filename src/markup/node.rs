//! The immutable element tree produced by the parser.

/// A child of a [`MarkupNode`]: either a nested element or a run of text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Markup {
    /// A nested element.
    Element(MarkupNode),
    /// Character data, kept verbatim (whitespace included).
    Text(String),
}

/// An element of a parsed response document.
///
/// Nodes are read-only once built. Tests and callers that need documents
/// without going through the parser can assemble them with
/// [`MarkupNode::with_child`] and [`MarkupNode::with_text`].
///
/// # Example
///
/// ```rust
/// use ecs_api::MarkupNode;
///
/// let item = MarkupNode::new("Item")
///     .with_child(MarkupNode::new("ASIN").with_text("X"))
///     .with_child(MarkupNode::new("Title").with_text("Programming Python"));
///
/// assert!(item.has_elements());
/// assert_eq!(item.elements().count(), 2);
/// assert_eq!(item.child("Title").unwrap().text(), "Programming Python");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkupNode {
    tag: String,
    children: Vec<Markup>,
}

impl MarkupNode {
    /// Creates an element with no children.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            children: Vec::new(),
        }
    }

    /// Appends a child element.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.push_element(child);
        self
    }

    /// Appends a text run.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text.into());
        self
    }

    pub(crate) fn push_element(&mut self, child: Self) {
        self.children.push(Markup::Element(child));
    }

    pub(crate) fn push_text(&mut self, text: String) {
        self.children.push(Markup::Text(text));
    }

    /// Returns the element name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns all children in document order.
    #[must_use]
    pub fn children(&self) -> &[Markup] {
        &self.children
    }

    /// Iterates over the element children in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|child| match child {
            Markup::Element(node) => Some(node),
            Markup::Text(_) => None,
        })
    }

    /// Returns `true` if at least one child is an element.
    #[must_use]
    pub fn has_elements(&self) -> bool {
        self.elements().next().is_some()
    }

    /// Concatenates the direct text children in order.
    ///
    /// Returns an empty string for a node without text.
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                Markup::Text(text) => Some(text.as_str()),
                Markup::Element(_) => None,
            })
            .collect()
    }

    /// Returns the first direct child element with the given tag.
    #[must_use]
    pub fn child(&self, tag: &str) -> Option<&Self> {
        self.elements().find(|node| node.tag == tag)
    }

    /// Returns the first element with the given tag, searching this node and
    /// then its descendants depth first in document order.
    #[must_use]
    pub fn find(&self, tag: &str) -> Option<&Self> {
        self.find_where(&|node: &Self| node.tag == tag)
    }

    /// Returns the first element accepted by `predicate`, in the same order
    /// as [`find`](Self::find).
    #[must_use]
    pub fn find_where<P>(&self, predicate: &P) -> Option<&Self>
    where
        P: Fn(&Self) -> bool,
    {
        if predicate(self) {
            return Some(self);
        }
        self.elements().find_map(|node| node.find_where(predicate))
    }
}
