//! Application-level errors (wraps domain errors)

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add parse positions and I/O context.
///
/// Line and column are 1-based and point at the offending byte.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error(
        "unexpected character '{}' on line {line} at column {column} in {context}",
        .found.escape_ascii()
    )]
    Syntax {
        line: u32,
        column: u32,
        found: u8,
        context: &'static str,
    },

    #[error("unmatched '}}' on line {line} at column {column}")]
    UnmatchedClose { line: u32, column: u32 },

    #[error("sections nested deeper than {limit} on line {line} at column {column}")]
    NestingTooDeep {
        line: u32,
        column: u32,
        limit: usize,
    },

    #[error("unexpected end of input on line {line} at column {column}: {reason}")]
    UnexpectedEof {
        line: u32,
        column: u32,
        reason: String,
    },

    #[error("invalid UTF-8 in {token} ending on line {line} at column {column}")]
    InvalidUtf8 {
        line: u32,
        column: u32,
        token: &'static str,
    },

    #[error("read failed on line {line} at column {column}")]
    Read {
        line: u32,
        column: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("document not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    /// Line and column of a parse failure, if this error has one.
    pub fn position(&self) -> Option<(u32, u32)> {
        match self {
            Self::Syntax { line, column, .. }
            | Self::UnmatchedClose { line, column }
            | Self::NestingTooDeep { line, column, .. }
            | Self::UnexpectedEof { line, column, .. }
            | Self::InvalidUtf8 { line, column, .. }
            | Self::Read { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }

    /// True for errors caused by malformed document text.
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            Self::Domain(_)
                | Self::Syntax { .. }
                | Self::UnmatchedClose { .. }
                | Self::NestingTooDeep { .. }
                | Self::UnexpectedEof { .. }
                | Self::InvalidUtf8 { .. }
        )
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
