//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the tree construction contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{open} section(s) left open when finishing the tree")]
    UnclosedSections { open: usize },
}
