use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use crate::tree::{TopicNode, TopicTree};

/// Parse a topic tree document.
///
/// The root element's `element` children (recursively) form the tree. Any
/// other element is skipped together with everything nested inside it.
pub fn parse(xml: &str, element: &str) -> Result<TopicTree, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    // stack[0] collects the top-level nodes
    let mut stack: Vec<TopicNode> = vec![TopicNode::default()];
    let mut seen_root = false;
    let mut root_closed = false;
    // Nesting level inside an ignored element
    let mut skip = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if skip > 0 {
                    skip += 1;
                } else if !seen_root {
                    seen_root = true;
                } else if root_closed {
                    return Err("content after the root element".to_string());
                } else if e.local_name().as_ref() == element.as_bytes() {
                    stack.push(node_from(&e)?);
                } else {
                    skip = 1;
                }
            }
            Ok(Event::Empty(e)) => {
                if skip > 0 {
                    continue;
                }
                if !seen_root {
                    seen_root = true;
                    root_closed = true;
                } else if root_closed {
                    return Err("content after the root element".to_string());
                } else if e.local_name().as_ref() == element.as_bytes() {
                    let node = node_from(&e)?;
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(node);
                    }
                }
            }
            Ok(Event::End(_)) => {
                if skip > 0 {
                    skip -= 1;
                } else if stack.len() > 1 {
                    if let Some(node) = stack.pop()
                        && let Some(parent) = stack.last_mut()
                    {
                        parent.children.push(node);
                    }
                } else {
                    root_closed = true;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!("{} at byte {}", e, reader.error_position()));
            }
            _ => {}
        }
    }

    if !seen_root {
        return Err("no root element".to_string());
    }
    if !root_closed || skip > 0 || stack.len() != 1 {
        return Err("unexpected end of document".to_string());
    }

    let nodes = stack.pop().map(|root| root.children).unwrap_or_default();
    Ok(TopicTree::new(nodes))
}

fn node_from(e: &BytesStart) -> Result<TopicNode, String> {
    let mut node = TopicNode::default();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let target = match attr.key.as_ref() {
            b"topic" => &mut node.topic,
            b"title" => &mut node.title,
            _ => continue,
        };
        let raw = String::from_utf8(attr.value.to_vec()).map_err(|e| e.to_string())?;
        let value = unescape(&raw).map_err(|e| e.to_string())?;
        *target = Some(value.into_owned());
    }
    Ok(node)
}
