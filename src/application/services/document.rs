//! Document service
//!
//! Loads configuration documents from files or streams and writes trees back.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::parser::{parse_bytes, parse_reader, Parser};
use crate::application::writer::render;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::Node;
use crate::infrastructure::traits::FileSystem;

/// Service for reading and writing nestconf documents.
pub struct DocumentService {
    fs: Arc<dyn FileSystem>,
    indent: usize,
}

impl DocumentService {
    pub fn new(fs: Arc<dyn FileSystem>, indent: usize) -> Self {
        Self { fs, indent }
    }

    /// Raw bytes of the document at `path`.
    pub fn read(&self, path: &Path) -> ApplicationResult<Vec<u8>> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::NotFound {
                path: path.to_path_buf(),
            });
        }
        self.fs.read(path).with_path_context("read document", path)
    }

    /// Parse the document stored at `path`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Node> {
        let data = self.read(path)?;
        debug!("load: {} bytes from {}", data.len(), path.display());
        parse_bytes(&data)
    }

    /// Parse a document from a stream such as stdin.
    pub fn load_reader<R: Read>(&self, reader: R) -> ApplicationResult<Node> {
        parse_reader(reader)
    }

    /// Serialize `root` with the configured indentation.
    pub fn render(&self, root: &Node) -> ApplicationResult<String> {
        render(root, self.indent).with_context("serialize document")
    }

    /// Serialize `root` and replace the file at `path`.
    #[instrument(level = "debug", skip(self, root))]
    pub fn save(&self, path: &Path, root: &Node) -> ApplicationResult<()> {
        let text = self.render(root)?;
        let replacing = self.fs.exists(path);
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent directory", path)?;
        self.fs
            .write(path, text.as_bytes())
            .with_path_context("write document", path)?;
        debug!(replacing, "save: {} bytes to {}", text.len(), path.display());
        Ok(())
    }

    /// Rewrite `path` in canonical form, returning the number of comments dropped.
    #[instrument(level = "debug", skip(self))]
    pub fn reformat(&self, path: &Path) -> ApplicationResult<usize> {
        let data = self.read(path)?;
        let (root, comments) = Parser::new(data.as_slice()).parse_with_comments()?;
        if comments > 0 {
            warn!(comments, "reformat drops comments from {}", path.display());
        }
        self.save(path, &root)?;
        Ok(comments)
    }

    /// Reparse `path` and return its canonical text.
    pub fn format(&self, path: &Path) -> ApplicationResult<String> {
        let root = self.load(path)?;
        self.render(&root)
    }
}
