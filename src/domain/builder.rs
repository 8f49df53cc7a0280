//! Tree builder with a cursor stack of open sections.

use tracing::{trace, warn};

use crate::domain::error::DomainError;
use crate::domain::lexical::{format_bool, format_float, format_int};
use crate::domain::node::Node;

/// Result type for tree construction.
pub type TreeResult<T> = Result<T, DomainError>;

/// Constructs a configuration tree programmatically.
///
/// The builder keeps a stack of open sections, starting with the anonymous
/// root. New nodes are appended to the section on top of the stack. An open
/// section is attached to its parent when it is closed, so a finished tree
/// never contains a partially built section.
///
/// ```ignore
/// let mut builder = ConfigBuilder::new();
/// builder
///     .int("Port", 8080)
///     .section("Server", "main")
///     .string("Host", "localhost")
///     .close_section();
/// let root = builder.finish();
/// ```
#[derive(Debug)]
pub struct ConfigBuilder {
    stack: Vec<Node>,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        let mut stack = Vec::with_capacity(16);
        stack.push(Node::root());
        Self { stack }
    }

    fn current(&mut self) -> &mut Node {
        let top = self.stack.len() - 1;
        &mut self.stack[top]
    }

    /// Append a leaf with a pre-formatted text value to the current section.
    ///
    /// Names are not validated here; that is the parser's job.
    pub fn leaf(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let node = Node::leaf(name, value);
        trace!(name = %node.name, value = %node.value, depth = self.depth(), "leaf");
        self.current().children.push(node);
        self
    }

    pub fn bool(&mut self, name: impl Into<String>, val: bool) -> &mut Self {
        self.leaf(name, format_bool(val))
    }

    pub fn int(&mut self, name: impl Into<String>, val: i64) -> &mut Self {
        self.leaf(name, format_int(val))
    }

    pub fn float(&mut self, name: impl Into<String>, val: f64) -> &mut Self {
        self.leaf(name, format_float(val))
    }

    pub fn string(&mut self, name: impl Into<String>, val: impl Into<String>) -> &mut Self {
        self.leaf(name, val)
    }

    /// Open a section and make it the insertion target.
    pub fn section(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let node = Node::section(name, value);
        trace!(name = %node.name, value = %node.value, depth = self.depth(), "open section");
        self.stack.push(node);
        self
    }

    /// Close the current section and return focus to its parent.
    ///
    /// Closing with only the root open is ignored.
    pub fn close_section(&mut self) -> &mut Self {
        if self.stack.len() == 1 {
            warn!("close_section called without an open section");
            return self;
        }
        if let Some(node) = self.stack.pop() {
            trace!(name = %node.name, children = node.children.len(), "close section");
            self.current().children.push(node);
        }
        self
    }

    /// Number of sections currently open above the root.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Return the root node, attaching any sections still left open.
    pub fn finish(mut self) -> Node {
        let open = self.depth();
        if open > 0 {
            warn!(open, "finishing tree with unclosed sections");
            while self.depth() > 0 {
                self.close_section();
            }
        }
        self.into_root()
    }

    /// Return the root node, or an error when sections are still open.
    pub fn try_finish(self) -> TreeResult<Node> {
        match self.depth() {
            0 => Ok(self.into_root()),
            open => Err(DomainError::UnclosedSections { open }),
        }
    }

    fn into_root(mut self) -> Node {
        self.stack.truncate(1);
        self.stack.pop().unwrap_or_else(Node::root)
    }
}
