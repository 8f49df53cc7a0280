//! Application layer: parser, writer and services
//!
//! This layer drives the domain tree from byte streams and depends on I/O boundary traits.

pub mod error;
pub mod error_ext;
pub mod parser;
pub mod services;
pub mod writer;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use parser::{parse_bytes, parse_reader, parse_source, parse_str, Parser, MAX_NESTING};
pub use writer::{render, ConfigWriter, DEFAULT_INDENT};
