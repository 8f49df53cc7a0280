//! Context helpers for turning `io::Result` into `ApplicationResult`.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Attach a human-readable action to I/O failures.
pub trait IoResultExt<T> {
    /// `fs.read(&path).with_path_context("read document", &path)?`
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;

    /// Same as [`with_path_context`](Self::with_path_context) for streams without a path.
    fn with_context(self, action: &str) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.with_context(&format!("{}: {}", action, path.display()))
    }

    fn with_context(self, action: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: action.to_string(),
            source: Box::new(e),
        })
    }
}
