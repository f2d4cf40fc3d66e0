//! Rule-driven conversion of response trees into object graphs.
//!
//! ECS responses are deep, wrapper-heavy documents. The [`Unmarshaller`]
//! walks a [`MarkupNode`](crate::MarkupNode) tree and reshapes it according
//! to a [`TransformRules`] set:
//!
//! - **bypassed** tags are dropped with their subtree
//! - **pivoted** tags disappear, their children lifted into the parent
//! - **collective** tags become list fields
//! - **collected** tags are appended to the nearest collective list
//! - **paged** tags become a [`PagedCollection`] that fetches further pages
//!   on demand
//!
//! Any tag repeated among siblings becomes a list, whatever the rules say.
//!
//! # Example
//!
//! ```rust
//! use ecs_api::{markup, TransformRules, Unmarshaller};
//! use std::sync::Arc;
//!
//! let rules = Arc::new(
//!     TransformRules::builder()
//!         .bypassed(["OperationRequest"])
//!         .pivoted(["ItemAttributes"])
//!         .build(),
//! );
//! let node = markup::parse(
//!     "<Item><OperationRequest/><ASIN>X</ASIN><ItemAttributes><Title>T</Title></ItemAttributes></Item>",
//! )
//! .unwrap();
//!
//! let item = Unmarshaller::new(rules).unmarshal_object(&node);
//! assert_eq!(item.names().collect::<Vec<_>>(), vec!["ASIN", "Title"]);
//! ```

mod engine;
mod paged;
mod rules;
mod value;

pub use engine::{PageSource, Unmarshaller};
pub use paged::{Cursor, PageFetcher, PagedCollection};
pub use rules::{PagingSpec, TransformRules, TransformRulesBuilder};
pub use value::{ItemList, ObjectGraph, Value};
