/// A single entry of the topic tree, with its nested children
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicNode {
    /// Relative path of the topic source, e.g. `guide/intro.md`
    pub topic: Option<String>,
    pub title: Option<String>,
    pub children: Vec<TopicNode>,
}

impl TopicNode {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: Some(topic.into()),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_children(mut self, children: Vec<TopicNode>) -> Self {
        self.children = children;
        self
    }
}

/// Ordered top-level nodes of a topic tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicTree {
    pub nodes: Vec<TopicNode>,
}

impl TopicTree {
    pub fn new(nodes: Vec<TopicNode>) -> Self {
        Self { nodes }
    }

    /// Number of nodes carrying a topic, at any depth.
    pub fn topic_count(&self) -> usize {
        fn count(nodes: &[TopicNode]) -> usize {
            nodes
                .iter()
                .map(|node| usize::from(node.topic.is_some()) + count(&node.children))
                .sum()
        }
        count(&self.nodes)
    }
}
