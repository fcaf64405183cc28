use crate::tree::{TopicNode, TopicTree};

/// How topic paths become published links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStyle {
    /// Prefix for every link, used verbatim
    pub base_url: String,
    pub source_extension: String,
    pub published_extension: String,
    /// Lowercase the published path (never the base URL)
    pub lowercase: bool,
}

impl LinkStyle {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            source_extension: "md".to_string(),
            published_extension: "html".to_string(),
            lowercase: true,
        }
    }

    /// Build the link target for a topic path.
    pub fn url_for(&self, topic: &str) -> String {
        let suffix = format!(".{}", self.source_extension);
        let mut path = match topic.strip_suffix(&suffix) {
            Some(stem) if !self.source_extension.is_empty() => {
                format!("{}.{}", stem, self.published_extension)
            }
            _ => topic.to_string(),
        };
        if self.lowercase {
            path = path.to_lowercase();
        }
        format!("{}{}", self.base_url, path)
    }
}

/// One line of the generated table of contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub title: String,
    pub url: String,
    pub depth: usize,
}

impl TocEntry {
    /// Render as a markdown list item, indented two spaces per level.
    pub fn to_markdown(&self) -> String {
        format!(
            "{}* [{}]({})",
            "  ".repeat(self.depth),
            escape_link_text(&self.title),
            self.url
        )
    }
}

/// Flatten a topic tree into pre-order entries.
///
/// Nodes without a topic produce no entry, and their children stay at the
/// node's own depth.
pub fn flatten(tree: &TopicTree, style: &LinkStyle) -> Vec<TocEntry> {
    let mut entries = Vec::with_capacity(tree.topic_count());
    collect(&tree.nodes, 0, style, &mut entries);
    entries
}

fn collect(nodes: &[TopicNode], depth: usize, style: &LinkStyle, out: &mut Vec<TocEntry>) {
    for node in nodes {
        match &node.topic {
            Some(topic) => {
                let title = match node.title.as_deref() {
                    Some(title) if !title.trim().is_empty() => title.to_string(),
                    _ => title_from_filename(topic),
                };
                out.push(TocEntry {
                    title,
                    url: style.url_for(topic),
                    depth,
                });
                collect(&node.children, depth + 1, style, out);
            }
            None => collect(&node.children, depth, style, out),
        }
    }
}

/// Render entries as markdown list lines joined with `\n` (no trailing newline).
pub fn render(entries: &[TocEntry]) -> String {
    entries
        .iter()
        .map(TocEntry::to_markdown)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Derive a display title from a topic path: `guide/getting-started.md` -> `Guide/Getting Started`.
///
/// Hyphens become spaces. A letter is upper-cased when it follows a
/// non-letter and lower-cased otherwise, so `_`, `.`, `/` and digits all
/// start a new word.
pub fn title_from_filename(topic: &str) -> String {
    let mut title = String::with_capacity(topic.len());
    let mut prev_cased = false;
    for ch in strip_extension(topic).chars() {
        let ch = if ch == '-' { ' ' } else { ch };
        if prev_cased {
            title.extend(ch.to_lowercase());
        } else {
            title.extend(ch.to_uppercase());
        }
        prev_cased = ch.is_uppercase() || ch.is_lowercase();
    }
    title
}

/// Drop the final extension of the last path component; leading dots of
/// that component never start an extension.
fn strip_extension(topic: &str) -> &str {
    let name_start = topic.rfind('/').map_or(0, |i| i + 1);
    let name = &topic[name_start..];
    let leading_dots = name.len() - name.trim_start_matches('.').len();
    match name[leading_dots..].rfind('.') {
        Some(dot) => &topic[..name_start + leading_dots + dot],
        None => topic,
    }
}

fn escape_link_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '[' | ']') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
