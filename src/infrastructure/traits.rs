//! I/O boundary traits for testability
//!
//! The parser consumes a [`ByteSource`]; services reach the disk through
//! [`FileSystem`] so they can be exercised against temporary directories.

use std::io::{self, BufRead};
use std::path::Path;

/// One-byte-at-a-time input.
///
/// `Ok(None)` signals end of input, distinct from a read error.
pub trait ByteSource {
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

impl<R: BufRead + ?Sized> ByteSource for R {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            let next = match self.fill_buf() {
                Ok(buf) => buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if next.is_some() {
                self.consume(1);
            }
            return Ok(next);
        }
    }
}

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read the whole file.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Replace the file contents.
    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}
