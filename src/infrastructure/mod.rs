//! Infrastructure layer: I/O boundary traits and their real implementations

pub mod error;
pub mod traits;

pub use error::{InfraError, InfraResult};
pub use traits::{ByteSource, FileSystem, RealFileSystem};
