//! Dynamically-shaped records produced by the unmarshaller.
//!
//! Response shapes vary with the operation and the requested response
//! groups, so fields are discovered from the tags that actually appeared.
//! Typed accessors fail with [`EcsError::FieldNotFound`] or
//! [`EcsError::UnexpectedShape`] instead of silently returning nothing.

use std::ops::Deref;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::error::EcsError;
use crate::unmarshal::PagedCollection;

/// A value held by an [`ObjectGraph`] field.
#[derive(Debug)]
pub enum Value {
    /// The text of a leaf element.
    Text(String),
    /// A nested record.
    Object(ObjectGraph),
    /// An ordered list, from a collective rule or a repeated tag.
    List(ItemList),
    /// A lazily fetched, server-paginated list.
    Paged(PagedCollection),
}

impl Value {
    /// Returns the text if this is a leaf value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the record if this is a nested object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&ObjectGraph> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the list if this is a list value.
    #[must_use]
    pub const fn as_list(&self) -> Option<&ItemList> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the paged collection if this is one.
    #[must_use]
    pub fn as_paged_mut(&mut self) -> Option<&mut PagedCollection> {
        match self {
            Self::Paged(paged) => Some(paged),
            _ => None,
        }
    }

    /// Returns a short description of the variant, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Object(_) => "an object",
            Self::List(_) => "a list",
            Self::Paged(_) => "a paged collection",
        }
    }

    /// Builds the error reported when field `name` holds this value but
    /// `expected` was asked for.
    pub(crate) fn mismatch(&self, name: &str, expected: &'static str) -> EcsError {
        EcsError::UnexpectedShape {
            field: name.to_string(),
            expected,
            found: self.kind(),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<ObjectGraph> for Value {
    fn from(object: ObjectGraph) -> Self {
        Self::Object(object)
    }
}

impl From<ItemList> for Value {
    fn from(list: ItemList) -> Self {
        Self::List(list)
    }
}

/// An ordered record of fields named after response tags.
///
/// Fields keep the order in which their tags first appeared.
///
/// # Example
///
/// ```rust
/// use ecs_api::{markup, TransformRules, Unmarshaller, EcsError};
/// use std::sync::Arc;
///
/// let node = markup::parse("<Item><ASIN>X</ASIN><Author>A</Author><Author>B</Author></Item>").unwrap();
/// let item = Unmarshaller::new(Arc::new(TransformRules::default())).unmarshal_object(&node);
///
/// assert_eq!(item.text("ASIN").unwrap(), "X");
/// assert_eq!(item.list("Author").unwrap().len(), 2);
/// assert!(matches!(item.text("Title"), Err(EcsError::FieldNotFound { .. })));
/// ```
#[derive(Debug, Default)]
pub struct ObjectGraph {
    fields: Vec<(String, Value)>,
}

impl ObjectGraph {
    /// Creates an empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns `true` if a field with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the field value, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find_map(|(field, value)| (field.as_str() == name).then_some(value))
    }

    /// Returns the field value mutably, if present.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields
            .iter_mut()
            .find_map(|(field, value)| (field.as_str() == name).then_some(value))
    }

    /// Returns the field value.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::FieldNotFound`] if there is no such field.
    pub fn field(&self, name: &str) -> Result<&Value, EcsError> {
        self.get(name).ok_or_else(|| not_found(name))
    }

    /// Returns the text of a leaf field.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::FieldNotFound`] if there is no such field, or
    /// [`EcsError::UnexpectedShape`] if it is not text.
    pub fn text(&self, name: &str) -> Result<&str, EcsError> {
        let value = self.field(name)?;
        value.as_text().ok_or_else(|| value.mismatch(name, "text"))
    }

    /// Returns a nested record.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::FieldNotFound`] if there is no such field, or
    /// [`EcsError::UnexpectedShape`] if it is not an object.
    pub fn object(&self, name: &str) -> Result<&Self, EcsError> {
        let value = self.field(name)?;
        value.as_object().ok_or_else(|| value.mismatch(name, "an object"))
    }

    /// Returns a list field.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::FieldNotFound`] if there is no such field, or
    /// [`EcsError::UnexpectedShape`] if it is not a list.
    pub fn list(&self, name: &str) -> Result<&ItemList, EcsError> {
        let value = self.field(name)?;
        value.as_list().ok_or_else(|| value.mismatch(name, "a list"))
    }

    /// Returns a paged collection field.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::FieldNotFound`] if there is no such field, or
    /// [`EcsError::UnexpectedShape`] if it is not a paged collection.
    pub fn paged(&mut self, name: &str) -> Result<&mut PagedCollection, EcsError> {
        let value = self.get_mut(name).ok_or_else(|| not_found(name))?;
        match value {
            Value::Paged(paged) => Ok(paged),
            other => Err(other.mismatch(name, "a paged collection")),
        }
    }

    /// Removes a field and returns its value.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::FieldNotFound`] if there is no such field.
    pub fn take(&mut self, name: &str) -> Result<Value, EcsError> {
        let position = self
            .fields
            .iter()
            .position(|(field, _)| field.as_str() == name)
            .ok_or_else(|| not_found(name))?;
        Ok(self.fields.remove(position).1)
    }

    /// Iterates over the field names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Iterates over the fields in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Sets a field, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.get_mut(&name) {
            Some(slot) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Adds a value under `name`, promoting an existing field to a list.
    ///
    /// The first occurrence is stored as is. A second occurrence turns the
    /// field into a list holding both values in order; later occurrences are
    /// appended to that list.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.get_mut(&name) {
            Some(Value::List(list)) => list.push(value),
            Some(slot) => {
                let first = std::mem::replace(slot, Value::List(ItemList::default()));
                if let Value::List(list) = slot {
                    list.push(first);
                    list.push(value);
                }
            }
            None => self.fields.push((name, value)),
        }
    }
}

fn not_found(name: &str) -> EcsError {
    EcsError::FieldNotFound {
        field: name.to_string(),
    }
}

/// An ordered list of values.
///
/// Lists built from a collective node also keep the node's non-collected
/// children as [`fields`](Self::fields), e.g. `TotalResults` beside the
/// `Item` elements of `<Items>`. Lists produced by a repeated tag have no
/// fields.
///
/// `ItemList` dereferences to `[Value]`, so slice methods such as `len`,
/// `iter`, `get` and indexing are available directly.
#[derive(Debug, Default)]
pub struct ItemList {
    items: Vec<Value>,
    fields: ObjectGraph,
}

impl ItemList {
    /// Creates a list from items and side fields.
    #[must_use]
    pub const fn new(items: Vec<Value>, fields: ObjectGraph) -> Self {
        Self { items, fields }
    }

    /// Returns the fields that were not collected into the list.
    #[must_use]
    pub const fn fields(&self) -> &ObjectGraph {
        &self.fields
    }

    /// Appends a value.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.items.push(value.into());
    }

    /// Consumes the list and returns its items.
    #[must_use]
    pub fn into_items(self) -> Vec<Value> {
        self.items
    }
}

impl Deref for ItemList {
    type Target = [Value];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<'a> IntoIterator for &'a ItemList {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Object(object) => object.serialize(serializer),
            Self::List(list) => list.serialize(serializer),
            Self::Paged(paged) => paged.page_items().serialize(serializer),
        }
    }
}

impl Serialize for ObjectGraph {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Serializes the items only; side fields are reachable through
/// [`ItemList::fields`].
impl Serialize for ItemList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.items.len()))?;
        for item in &self.items {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}
