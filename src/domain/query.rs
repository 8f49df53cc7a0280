//! Path queries over a finished configuration tree.
//!
//! A path is a `/`-separated list of segments. Each segment is either `name`
//! or `name:condition`, where the condition must equal the node's value
//! exactly. A missing condition or `*` matches any value.
//!
//! ```ignore
//! root.string("Section:Two/StringValue");
//! root.query_all("Section");
//! ```
//!
//! Typed accessors report `None` both when nothing matches and when the
//! value does not parse as the requested type.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::node::Node;

/// Value constraint of a path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Any,
    Equals(String),
}

impl Condition {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Condition::Any => true,
            Condition::Equals(expected) => expected == value,
        }
    }
}

/// One `name[:condition]` component of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub name: String,
    pub condition: Condition,
}

impl Segment {
    pub fn parse(part: &str) -> Self {
        match part.split_once(':') {
            Some((name, "*")) => Self {
                name: name.to_string(),
                condition: Condition::Any,
            },
            Some((name, cond)) => Self {
                name: name.to_string(),
                condition: Condition::Equals(cond.to_string()),
            },
            None => Self {
                name: part.to_string(),
                condition: Condition::Any,
            },
        }
    }

    pub fn matches(&self, node: &Node) -> bool {
        node.name == self.name && self.condition.matches(&node.value)
    }
}

/// Parsed query path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPath {
    segments: Vec<Segment>,
}

impl QueryPath {
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path.split('/').map(Segment::parse).collect(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// Accepted spellings for boolean values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BoolTokens {
    pub truthy: Vec<String>,
    pub falsy: Vec<String>,
}

impl Default for BoolTokens {
    fn default() -> Self {
        let tokens = |list: &[&str]| list.iter().map(|s| s.to_string()).collect();
        Self {
            truthy: tokens(&["1", "t", "T", "TRUE", "true", "True"]),
            falsy: tokens(&["0", "f", "F", "FALSE", "false", "False"]),
        }
    }
}

impl BoolTokens {
    pub fn parse(&self, text: &str) -> Option<bool> {
        if self.truthy.iter().any(|t| t == text) {
            Some(true)
        } else if self.falsy.iter().any(|t| t == text) {
            Some(false)
        } else {
            None
        }
    }
}

impl Node {
    /// First node matching `path`, searching depth-first in document order.
    pub fn query(&self, path: &str) -> Option<&Node> {
        let path = QueryPath::parse(path);
        let found = self.find_first(path.segments());
        trace!(path = ?path.segments, found = found.is_some(), "query");
        found
    }

    fn find_first(&self, segments: &[Segment]) -> Option<&Node> {
        let (segment, rest) = segments.split_first()?;
        self.children
            .iter()
            .filter(|child| segment.matches(child))
            .find_map(|child| {
                if rest.is_empty() {
                    Some(child)
                } else {
                    child.find_first(rest)
                }
            })
    }

    /// Every node matching `path`, in document order.
    pub fn query_all(&self, path: &str) -> Vec<&Node> {
        let path = QueryPath::parse(path);
        let mut found = Vec::new();
        self.collect_all(path.segments(), &mut found);
        trace!(path = ?path.segments, found = found.len(), "query_all");
        found
    }

    fn collect_all<'a>(&'a self, segments: &[Segment], found: &mut Vec<&'a Node>) {
        let Some((segment, rest)) = segments.split_first() else {
            return;
        };
        for child in self.children.iter().filter(|child| segment.matches(child)) {
            if rest.is_empty() {
                found.push(child);
            } else {
                child.collect_all(rest, found);
            }
        }
    }

    pub fn string(&self, path: &str) -> Option<&str> {
        self.query(path).map(Node::value)
    }

    pub fn string_or<'a>(&'a self, path: &str, default: &'a str) -> &'a str {
        self.string(path).unwrap_or(default)
    }

    pub fn boolean(&self, path: &str) -> Option<bool> {
        self.boolean_with(path, &BoolTokens::default())
    }

    pub fn boolean_with(&self, path: &str, tokens: &BoolTokens) -> Option<bool> {
        self.string(path).and_then(|text| tokens.parse(text))
    }

    pub fn boolean_or(&self, path: &str, default: bool) -> bool {
        self.boolean(path).unwrap_or(default)
    }

    pub fn integer(&self, path: &str) -> Option<i64> {
        self.string(path).and_then(|text| text.parse().ok())
    }

    pub fn integer_or(&self, path: &str, default: i64) -> i64 {
        self.integer(path).unwrap_or(default)
    }

    pub fn float(&self, path: &str) -> Option<f64> {
        self.string(path).and_then(|text| text.parse().ok())
    }

    pub fn float_or(&self, path: &str, default: f64) -> f64 {
        self.float(path).unwrap_or(default)
    }
}
