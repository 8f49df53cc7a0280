//! Domain layer: configuration tree, construction and queries
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod error;
pub mod lexical;
pub mod node;
pub mod query;

pub use builder::ConfigBuilder;
pub use error::DomainError;
pub use node::Node;
pub use query::{BoolTokens, Condition, QueryPath, Segment};
