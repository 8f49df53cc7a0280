//! nestconf: a hierarchical, human-editable configuration format.
//!
//! Documents are parsed into an immutable tree of [`Node`]s, queried with
//! `/`-separated paths, and written back with [`ConfigWriter`].
//!
//! ```ignore
//! let root = nestconf::parse_str("Server main {\n    Port 8080\n}\n")?;
//! assert_eq!(root.integer("Server:main/Port"), Some(8080));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::{
    parse_bytes, parse_reader, parse_source, parse_str, render, ApplicationError,
    ApplicationResult, ConfigWriter, MAX_NESTING,
};
pub use domain::{BoolTokens, ConfigBuilder, DomainError, Node, QueryPath};
