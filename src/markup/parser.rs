//! Streaming construction of [`MarkupNode`] trees with `quick_xml`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{MarkupError, MarkupNode};

/// Parses a UTF-8 XML document into its root element.
///
/// Namespace prefixes are stripped from element names, entity references in
/// text are resolved, and CDATA sections become ordinary text runs. Text is
/// not trimmed.
///
/// # Errors
///
/// Returns [`MarkupError`] if the input is not well-formed, has no root
/// element, or has more than one.
///
/// # Example
///
/// ```rust
/// use ecs_api::markup::parse;
///
/// let root = parse(r#"<?xml version="1.0"?><Errors><Error><Code>AWS.MissingParameters</Code></Error></Errors>"#).unwrap();
/// assert_eq!(root.find("Code").unwrap().text(), "AWS.MissingParameters");
/// ```
pub fn parse(xml: &str) -> Result<MarkupNode, MarkupError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut stack: Vec<MarkupNode> = Vec::new();
    let mut root: Option<MarkupNode> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let node = MarkupNode::new(element_name(&start));
                if stack.is_empty() {
                    ensure_single_root(root.as_ref(), node.tag())?;
                }
                stack.push(node);
            }
            Event::Empty(start) => {
                let node = MarkupNode::new(element_name(&start));
                attach(&mut stack, &mut root, node)?;
            }
            Event::End(_) => {
                if let Some(node) = stack.pop() {
                    attach(&mut stack, &mut root, node)?;
                }
            }
            Event::Text(text) => {
                if let Some(parent) = stack.last_mut() {
                    parent.push_text(text.unescape()?.into_owned());
                }
            }
            Event::CData(data) => {
                if let Some(parent) = stack.last_mut() {
                    parent.push_text(String::from_utf8_lossy(&data.into_inner()).into_owned());
                }
            }
            Event::Eof => break,
            // Declarations, comments, doctypes and processing instructions
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(MarkupError::Unclosed {
            tag: open.tag().to_string(),
        });
    }
    root.ok_or(MarkupError::Empty)
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

fn ensure_single_root(root: Option<&MarkupNode>, tag: &str) -> Result<(), MarkupError> {
    if root.is_some() {
        return Err(MarkupError::MultipleRoots {
            tag: tag.to_string(),
        });
    }
    Ok(())
}

fn attach(
    stack: &mut [MarkupNode],
    root: &mut Option<MarkupNode>,
    node: MarkupNode,
) -> Result<(), MarkupError> {
    match stack.last_mut() {
        Some(parent) => parent.push_element(node),
        None => {
            ensure_single_root(root.as_ref(), node.tag())?;
            *root = Some(node);
        }
    }
    Ok(())
}
