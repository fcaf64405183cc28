mod config;
mod error;
mod parser;
mod splice;
mod sync;
mod toc;
mod tree;

pub use config::{Config, DEFAULT_CONFIG_FILE, LinksConfig, TreeConfig};
pub use error::{Error, Result};
pub use splice::{Region, locate};
pub use sync::{Mode, Outcome, Report, render_toc, run};
pub use toc::{LinkStyle, TocEntry, title_from_filename};
pub use tree::{TopicNode, TopicTree};

/// Parse a topic tree document, treating `element` children as topics.
pub fn parse_tree(xml: &str, element: &str) -> std::result::Result<TopicTree, String> {
    parser::parse(xml, element)
}

/// Flatten a topic tree into pre-order TOC entries.
pub fn flatten(tree: &TopicTree, style: &LinkStyle) -> Vec<TocEntry> {
    toc::flatten(tree, style)
}

/// Render TOC entries as markdown list lines.
pub fn render(entries: &[TocEntry]) -> String {
    toc::render(entries)
}

/// Convert a topic tree document straight to TOC markdown.
pub fn tree_to_markdown(
    xml: &str,
    element: &str,
    style: &LinkStyle,
) -> std::result::Result<String, String> {
    let tree = parse_tree(xml, element)?;
    Ok(render(&flatten(&tree, style)))
}

/// Replace the region between the marker lines of `document`.
pub fn splice(
    document: &str,
    start_marker: &str,
    end_marker: &str,
    replacement: &str,
) -> Result<String> {
    splice::splice(document, start_marker, end_marker, replacement)
}
