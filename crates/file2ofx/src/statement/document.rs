//! Statement document tree.
//!
//! A document is a list of colon-separated header fields plus a tree of
//! tagged nodes. Nodes are either leaves carrying text or containers
//! carrying children; the writer decides how each is rendered.

/// A node of the statement body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// `<TAG>value`
    Leaf { tag: String, value: String },
    /// `<TAG>` followed by indented children.
    Container { tag: String, children: Vec<Node> },
}

impl Node {
    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Node::Leaf {
            tag: tag.into(),
            value: value.into(),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Node::Leaf { tag, .. } | Node::Container { tag, .. } => tag,
        }
    }

    /// Children of a container; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Container { children, .. } => children,
        }
    }

    /// Text of a leaf.
    pub fn value(&self) -> Option<&str> {
        match self {
            Node::Leaf { value, .. } => Some(value),
            Node::Container { .. } => None,
        }
    }

    /// First direct child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&Node> {
        self.children().iter().find(|n| n.tag() == tag)
    }

    /// Follow a path of tags from this node.
    pub fn find(&self, path: &[&str]) -> Option<&Node> {
        path.iter().try_fold(self, |node, tag| node.child(tag))
    }
}

/// Builds a container node.
#[derive(Debug)]
pub struct NodeBuilder {
    tag: String,
    children: Vec<Node>,
}

impl NodeBuilder {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            children: Vec::new(),
        }
    }

    /// Append a leaf.
    pub fn leaf(mut self, tag: impl Into<String>, value: impl Into<String>) -> Self {
        self.children.push(Node::leaf(tag, value));
        self
    }

    /// Append a leaf only when a value is present.
    pub fn leaf_opt(self, tag: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.leaf(tag, value),
            None => self,
        }
    }

    /// Append a finished node.
    pub fn node(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    /// Append a nested container built by `build`.
    pub fn container(
        self,
        tag: impl Into<String>,
        build: impl FnOnce(NodeBuilder) -> NodeBuilder,
    ) -> Self {
        let child = build(NodeBuilder::new(tag)).build();
        self.node(child)
    }

    pub fn build(self) -> Node {
        Node::Container {
            tag: self.tag,
            children: self.children,
        }
    }
}

/// A complete statement: header fields and the root container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// `NAME:value` lines written before the body.
    pub header: Vec<(String, String)>,
    pub root: Node,
}

impl Document {
    pub fn new(header: Vec<(String, String)>, root: Node) -> Self {
        Self { header, root }
    }

    /// Value of a header field.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.header
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_nesting() {
        let root = NodeBuilder::new("OFX")
            .container("STATUS", |s| s.leaf("CODE", "0").leaf("SEVERITY", "INFO"))
            .leaf_opt("ORG", None::<String>)
            .leaf_opt("FID", Some("1234"))
            .build();

        assert_eq!(root.children().len(), 2);
        assert_eq!(root.find(&["STATUS", "SEVERITY"]).and_then(Node::value), Some("INFO"));
        assert_eq!(root.child("FID").and_then(Node::value), Some("1234"));
        assert!(root.child("ORG").is_none());
    }

    #[test]
    fn test_leaf_has_no_children() {
        let leaf = Node::leaf("TRNAMT", "1.00");
        assert!(leaf.children().is_empty());
        assert!(leaf.find(&["X"]).is_none());
    }
}
