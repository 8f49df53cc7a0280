//! Byte-level parser for the nestconf text format.
//!
//! The parser is a finite-state machine consuming one byte per transition and
//! driving a [`ConfigBuilder`]. Nested sections are tracked by the builder's
//! cursor stack instead of native recursion. Tree walks (drop, comparison,
//! writing) still recurse once per level, so nesting beyond [`MAX_NESTING`]
//! is rejected as a structural error.
//!
//! ```text
//! # comment
//! Name value
//! Quoted "two \"words\""
//! Flag ""
//! Section label {
//!     Nested 1
//! }
//! ```

use std::io::{BufReader, Read};
use std::str::FromStr;

use tracing::{debug, trace};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::lexical::{is_blank, is_line_end, is_name_char, is_name_start, is_value_char};
use crate::domain::{ConfigBuilder, Node};
use crate::infrastructure::traits::ByteSource;

/// Deepest section nesting a document may use.
pub const MAX_NESTING: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Begin,
    Comment,
    Name,
    ValueStart,
    Value,
    ValueEscaped,
    ValueEscapedNext,
    ValueEnd,
}

impl State {
    fn describe(self) -> &'static str {
        match self {
            State::Begin => "directive",
            State::Comment => "comment",
            State::Name => "name",
            State::ValueStart => "value",
            State::Value => "unquoted value",
            State::ValueEscaped | State::ValueEscapedNext => "quoted value",
            State::ValueEnd => "end of directive",
        }
    }
}

/// State machine turning a byte stream into a configuration tree.
pub struct Parser<S> {
    source: S,
    builder: ConfigBuilder,
    state: State,
    name: Vec<u8>,
    value: Vec<u8>,
    line: u32,
    column: u32,
    comments: usize,
}

impl<S: ByteSource> Parser<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            builder: ConfigBuilder::new(),
            state: State::Begin,
            name: Vec::with_capacity(128),
            value: Vec::with_capacity(128),
            line: 1,
            column: 1,
            comments: 0,
        }
    }

    /// Consume the whole source and return the root node.
    pub fn parse(self) -> ApplicationResult<Node> {
        self.parse_with_comments().map(|(root, _)| root)
    }

    /// Like [`parse`](Self::parse), also returning how many comments were dropped.
    pub fn parse_with_comments(mut self) -> ApplicationResult<(Node, usize)> {
        loop {
            let b = match self.source.read_byte() {
                Ok(Some(b)) => b,
                Ok(None) => {
                    let comments = self.comments;
                    return self.finish().map(|root| (root, comments));
                }
                Err(source) => {
                    return Err(ApplicationError::Read {
                        line: self.line,
                        column: self.column,
                        source,
                    })
                }
            };

            let before = self.state;
            self.step(b)?;
            if before != self.state {
                if self.state == State::Comment {
                    self.comments += 1;
                }
                trace!(from = ?before, to = ?self.state, line = self.line, column = self.column, "transition");
            }

            if b == b'\n' {
                self.line = self.line.saturating_add(1);
                self.column = 1;
            } else {
                self.column = self.column.saturating_add(1);
            }
        }
    }

    fn step(&mut self, b: u8) -> ApplicationResult<()> {
        match self.state {
            State::Begin => {
                if b == b'#' {
                    self.state = State::Comment;
                } else if b == b'}' {
                    self.close_section()?;
                } else if is_name_start(b) {
                    self.name.push(b);
                    self.state = State::Name;
                } else if !is_blank(b) && !is_line_end(b) {
                    return Err(self.unexpected(b));
                }
            }
            State::Comment => {
                if b == b'\n' {
                    self.state = State::Begin;
                }
            }
            State::Name => {
                if is_name_char(b) {
                    self.name.push(b);
                } else if is_blank(b) {
                    self.state = State::ValueStart;
                } else {
                    return Err(self.unexpected(b));
                }
            }
            State::ValueStart => {
                if is_value_char(b) {
                    self.value.push(b);
                    self.state = State::Value;
                } else if b == b'"' {
                    self.state = State::ValueEscaped;
                } else if is_line_end(b) {
                    self.commit_leaf(State::Begin)?;
                } else if b == b'#' {
                    self.commit_leaf(State::Comment)?;
                } else if b == b'{' {
                    self.open_section()?;
                } else if !is_blank(b) {
                    return Err(self.unexpected(b));
                }
            }
            State::Value => {
                if is_value_char(b) {
                    self.value.push(b);
                } else if is_blank(b) {
                    self.state = State::ValueEnd;
                } else if is_line_end(b) {
                    self.commit_leaf(State::Begin)?;
                } else {
                    return Err(self.unexpected(b));
                }
            }
            State::ValueEscaped => match b {
                b'"' => self.state = State::ValueEnd,
                b'\\' => self.state = State::ValueEscapedNext,
                _ => self.value.push(b),
            },
            State::ValueEscapedNext => {
                self.value.push(b);
                self.state = State::ValueEscaped;
            }
            State::ValueEnd => {
                if is_line_end(b) {
                    self.commit_leaf(State::Begin)?;
                } else if b == b'#' {
                    self.commit_leaf(State::Comment)?;
                } else if b == b'{' {
                    self.open_section()?;
                } else if !is_blank(b) {
                    return Err(self.unexpected(b));
                }
            }
        }
        Ok(())
    }

    fn unexpected(&self, found: u8) -> ApplicationError {
        ApplicationError::Syntax {
            line: self.line,
            column: self.column,
            found,
            context: self.state.describe(),
        }
    }

    fn decode(&self, bytes: Vec<u8>, token: &'static str) -> ApplicationResult<String> {
        String::from_utf8(bytes).map_err(|_| ApplicationError::InvalidUtf8 {
            line: self.line,
            column: self.column,
            token,
        })
    }

    fn take_entry(&mut self) -> ApplicationResult<(String, String)> {
        let name = std::mem::take(&mut self.name);
        let value = std::mem::take(&mut self.value);
        Ok((self.decode(name, "name")?, self.decode(value, "value")?))
    }

    fn commit_leaf(&mut self, next: State) -> ApplicationResult<()> {
        let (name, value) = self.take_entry()?;
        self.builder.leaf(name, value);
        self.state = next;
        Ok(())
    }

    fn open_section(&mut self) -> ApplicationResult<()> {
        if self.builder.depth() >= MAX_NESTING {
            return Err(ApplicationError::NestingTooDeep {
                line: self.line,
                column: self.column,
                limit: MAX_NESTING,
            });
        }
        let (name, value) = self.take_entry()?;
        self.builder.section(name, value);
        self.state = State::Begin;
        Ok(())
    }

    fn close_section(&mut self) -> ApplicationResult<()> {
        if self.builder.depth() == 0 {
            return Err(ApplicationError::UnmatchedClose {
                line: self.line,
                column: self.column,
            });
        }
        self.builder.close_section();
        Ok(())
    }

    fn finish(self) -> ApplicationResult<Node> {
        let open = self.builder.depth();
        match self.state {
            State::Begin if open == 0 => {
                let root = self.builder.try_finish()?;
                debug!(
                    lines = self.line,
                    children = root.children().len(),
                    comments = self.comments,
                    "parsed document"
                );
                Ok(root)
            }
            State::Begin => Err(ApplicationError::UnexpectedEof {
                line: self.line,
                column: self.column,
                reason: format!("{open} unclosed section(s)"),
            }),
            state => Err(ApplicationError::UnexpectedEof {
                line: self.line,
                column: self.column,
                reason: format!("inside {}", state.describe()),
            }),
        }
    }
}

/// Parse a document from any byte source.
pub fn parse_source<S: ByteSource>(source: S) -> ApplicationResult<Node> {
    Parser::new(source).parse()
}

pub fn parse_bytes(data: &[u8]) -> ApplicationResult<Node> {
    parse_source(data)
}

pub fn parse_str(text: &str) -> ApplicationResult<Node> {
    parse_bytes(text.as_bytes())
}

/// Parse from an unbuffered reader such as a file or stdin.
pub fn parse_reader<R: Read>(reader: R) -> ApplicationResult<Node> {
    parse_source(BufReader::new(reader))
}

impl FromStr for Node {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_str(s)
    }
}
