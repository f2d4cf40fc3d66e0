//! Parsed response documents.
//!
//! ECS answers every query with an XML document. This module turns the
//! response body into an immutable [`MarkupNode`] tree that the unmarshaller
//! walks. Only element names, nesting, and text survive parsing; attributes,
//! comments, and processing instructions are dropped because the service
//! never carries data in them.
//!
//! # Example
//!
//! ```rust
//! use ecs_api::markup;
//!
//! let root = markup::parse("<Item><ASIN>0596009259</ASIN></Item>").unwrap();
//! assert_eq!(root.tag(), "Item");
//! assert_eq!(root.child("ASIN").unwrap().text(), "0596009259");
//! ```

mod errors;
mod node;
mod parser;

pub use errors::MarkupError;
pub use node::{Markup, MarkupNode};
pub use parser::parse;
