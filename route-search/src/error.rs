//! Error types for route search.

use thiserror::Error;

use crate::{bench::Algorithm, graph::Node};

/// Result type alias for route search operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A route uses a pair of consecutive nodes without an edge between them.
    #[error("Invalid path: no edge between {from} and {to}")]
    InvalidPath { from: Node, to: Node },

    /// A route must contain at least one node.
    #[error("Invalid path: empty")]
    EmptyPath,

    /// A search task panicked while running.
    #[error("{algorithm} panicked: {message}")]
    TaskPanicked { algorithm: Algorithm, message: String },

    /// The task evaluating a whole endpoint pair panicked.
    #[error("Pair {start} -> {end} panicked: {message}")]
    PairPanicked {
        start: Node,
        end: Node,
        message: String,
    },

    /// The bounded worker pool could not be created.
    #[error("Worker pool: {0}")]
    Pool(String),
}
