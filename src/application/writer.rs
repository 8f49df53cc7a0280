//! Sequential emitter for the nestconf text format.
//!
//! [`ConfigWriter`] receives the same call sequence a
//! [`ConfigBuilder`](crate::domain::ConfigBuilder) would, but streams text
//! instead of keeping a tree. Only the nesting level is tracked.

use std::io::{self, BufWriter, Write};

use crate::domain::lexical::{format_bool, format_float, format_int, is_valid_name, is_value_safe};
use crate::domain::Node;

/// Spaces per nesting level when no width is configured.
pub const DEFAULT_INDENT: usize = 4;

const SPACES: [u8; 64] = [b' '; 64];

pub struct ConfigWriter<W: Write> {
    writer: BufWriter<W>,
    level: usize,
    indent: usize,
}

impl<W: Write> ConfigWriter<W> {
    pub fn new(inner: W) -> Self {
        Self::with_indent(inner, DEFAULT_INDENT)
    }

    pub fn with_indent(inner: W, indent: usize) -> Self {
        Self {
            writer: BufWriter::new(inner),
            level: 0,
            indent,
        }
    }

    /// Current nesting level.
    pub fn level(&self) -> usize {
        self.level
    }

    fn write_indent(&mut self) -> io::Result<()> {
        let mut width = self.level.saturating_mul(self.indent);
        while width > 0 {
            let chunk = width.min(SPACES.len());
            self.writer.write_all(&SPACES[..chunk])?;
            width -= chunk;
        }
        Ok(())
    }

    fn write_name(&mut self, name: &str) -> io::Result<()> {
        if !is_valid_name(name) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("name {name:?} cannot be written"),
            ));
        }
        self.writer.write_all(name.as_bytes())
    }

    fn write_value(&mut self, value: &str) -> io::Result<()> {
        if !value.is_empty() && is_value_safe(value) {
            return self.writer.write_all(value.as_bytes());
        }
        self.writer.write_all(b"\"")?;
        for b in value.bytes() {
            if b == b'"' || b == b'\\' {
                self.writer.write_all(b"\\")?;
            }
            self.writer.write_all(&[b])?;
        }
        self.writer.write_all(b"\"")
    }

    fn write_entry(&mut self, name: &str, value: &str) -> io::Result<&mut Self> {
        self.write_indent()?;
        self.write_name(name)?;
        self.writer.write_all(b" ")?;
        self.write_value(value)?;
        self.writer.write_all(b"\n")?;
        Ok(self)
    }

    pub fn bool(&mut self, name: &str, val: bool) -> io::Result<&mut Self> {
        self.write_entry(name, &format_bool(val))
    }

    pub fn int(&mut self, name: &str, val: i64) -> io::Result<&mut Self> {
        self.write_entry(name, &format_int(val))
    }

    pub fn float(&mut self, name: &str, val: f64) -> io::Result<&mut Self> {
        self.write_entry(name, &format_float(val))
    }

    pub fn string(&mut self, name: &str, val: &str) -> io::Result<&mut Self> {
        self.write_entry(name, val)
    }

    /// Open a section; following entries are indented one level deeper.
    pub fn section(&mut self, name: &str, value: &str) -> io::Result<&mut Self> {
        self.write_indent()?;
        self.write_name(name)?;
        if !value.is_empty() {
            self.writer.write_all(b" ")?;
            self.write_value(value)?;
        }
        self.writer.write_all(b" {\n")?;
        self.level += 1;
        Ok(self)
    }

    pub fn close_section(&mut self) -> io::Result<&mut Self> {
        self.level = self.level.saturating_sub(1);
        self.write_indent()?;
        self.writer.write_all(b"}\n")?;
        Ok(self)
    }

    /// Write a comment, one `#` line per line of `comment`.
    pub fn comment(&mut self, comment: &str) -> io::Result<&mut Self> {
        for line in comment.split('\n') {
            let line = line.trim_end_matches('\r');
            self.write_indent()?;
            if line.is_empty() {
                self.writer.write_all(b"#\n")?;
            } else {
                writeln!(self.writer, "# {line}")?;
            }
        }
        Ok(self)
    }

    /// Blank line.
    pub fn line(&mut self) -> io::Result<&mut Self> {
        self.writer.write_all(b"\n")?;
        Ok(self)
    }

    /// Write `node` itself: a leaf entry, or a section with its whole subtree.
    pub fn write_node(&mut self, node: &Node) -> io::Result<&mut Self> {
        if node.is_section() {
            self.section(node.name(), node.value())?;
            self.write_children(node)?;
            self.close_section()
        } else {
            self.string(node.name(), node.value())
        }
    }

    /// Write every child of `node`, e.g. a whole document from its root.
    pub fn write_children(&mut self, node: &Node) -> io::Result<&mut Self> {
        for child in node.children() {
            self.write_node(child)?;
        }
        Ok(self)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

/// Serialize a whole document into a `String`.
pub fn render(root: &Node, indent: usize) -> io::Result<String> {
    let mut writer = ConfigWriter::with_indent(Vec::new(), indent);
    writer.write_children(root)?;
    let bytes = writer.into_inner()?;
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
