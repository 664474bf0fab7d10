//! Markup parsing functions.

use super::MarkupNode;
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

struct OpenElement {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<MarkupNode>,
}

fn element_parts(start: &BytesStart<'_>) -> Result<(String, Vec<(String, String)>)> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).to_ascii_lowercase();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }
    Ok((tag, attributes))
}

fn push_node(stack: &mut [OpenElement], top: &mut Vec<MarkupNode>, node: MarkupNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => top.push(node),
    }
}

/// Parse markup from a string into top-level nodes.
pub fn parse_markup(source: &str) -> Result<Vec<MarkupNode>> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<OpenElement> = Vec::new();
    let mut top = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let (tag, attributes) = element_parts(&start)?;
                stack.push(OpenElement {
                    tag,
                    attributes,
                    children: Vec::new(),
                });
            }
            Event::Empty(start) => {
                let (tag, attributes) = element_parts(&start)?;
                let node = MarkupNode::Element {
                    tag,
                    attributes,
                    children: Vec::new(),
                };
                push_node(&mut stack, &mut top, node);
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).to_ascii_lowercase();
                let open = stack
                    .pop()
                    .ok_or_else(|| Error::Markup(format!("unexpected </{name}>")))?;
                if open.tag != name {
                    return Err(Error::Markup(format!(
                        "expected </{}>, found </{name}>",
                        open.tag
                    )));
                }
                let node = MarkupNode::Element {
                    tag: open.tag,
                    attributes: open.attributes,
                    children: open.children,
                };
                push_node(&mut stack, &mut top, node);
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                if !text.trim().is_empty() {
                    push_node(&mut stack, &mut top, MarkupNode::Text(text.into_owned()));
                }
            }
            Event::CData(data) => {
                let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                push_node(&mut stack, &mut top, MarkupNode::Text(text));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::Markup(format!("unclosed <{}>", open.tag)));
    }

    if let [MarkupNode::Element { tag, children, .. }] = top.as_mut_slice() {
        if tag == "body" {
            return Ok(std::mem::take(children));
        }
    }
    Ok(top)
}

/// Parse a markup file from disk.
pub fn parse_markup_file(path: &std::path::Path) -> Result<Vec<MarkupNode>> {
    let contents = std::fs::read_to_string(path)?;
    parse_markup(&contents)
}
