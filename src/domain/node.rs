//! Configuration tree nodes

use std::fmt;

use termtree::Tree;

/// A node in a parsed or built configuration tree.
///
/// Sections own an ordered list of children; leaves only carry a value.
/// The root is an anonymous section. Nodes are only created by
/// [`ConfigBuilder`](crate::domain::ConfigBuilder) and are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) value: String,
    pub(crate) section: bool,
    pub(crate) children: Vec<Node>,
}

impl Node {
    pub(crate) fn leaf(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            section: false,
            children: Vec::new(),
        }
    }

    pub(crate) fn section(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            section: true,
            children: Vec::with_capacity(16),
        }
    }

    pub(crate) fn root() -> Self {
        Self::section("", "")
    }

    /// Name of this node. Empty for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text value of this node. Empty for the root.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Children in document order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn is_section(&self) -> bool {
        self.section
    }

    pub fn is_leaf(&self) -> bool {
        !self.section
    }

    /// Number of nesting levels below this node, counting this node as one.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Node::depth)
            .max()
            .unwrap_or(0)
    }

    /// Render the subtree for terminal display.
    pub fn to_tree(&self) -> Tree<String> {
        let label = if self.name.is_empty() && self.value.is_empty() {
            ".".to_string()
        } else {
            self.to_string()
        };
        Tree::new(label).with_leaves(self.children.iter().map(Node::to_tree))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} = {}", self.name, self.value)
        }
    }
}
