//! Error types for alignment

use thiserror::Error;

/// Alignment errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
    /// The base text has nothing to split
    #[error("base text forms {segments} segment(s); at least 2 are needed to split a reading")]
    NotSplittable {
        /// Number of segments the base text produced
        segments: usize,
    },
}

/// Result type for alignment operations
pub type Result<T> = std::result::Result<T, AlignError>;
