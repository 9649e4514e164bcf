//! Error types for dictionary loading and passphrase composition.
//!
//! Selection failures are ordinary values: `NoAssignment` when no
//! rhyme-consistent word set exists, `BelowThreshold` when one exists but
//! is too weak. Only `LoadError` indicates the crate cannot work at all.

use std::path::PathBuf;
use thiserror::Error;

/// No word assignment satisfies a rhyme group's role constraints.
///
/// Also covers roles with no vocabulary and words with no pronunciation;
/// those surface as empty candidate pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no rhyme-consistent word assignment exists for the requested roles")]
pub struct NoAssignment;

/// Why `compose_passphrase` produced no passphrase.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhraseError {
    /// Some rhyme group had no valid assignment.
    #[error("no rhyme-consistent word assignment exists for the requested parts")]
    NoAssignment,

    /// A passphrase was assembled but its entropy estimate did not exceed
    /// the minimum. The passphrase itself is withheld.
    #[error("passphrase entropy did not exceed the minimum of {minimum_bits} bits")]
    BelowThreshold { minimum_bits: f64 },

    /// The grouping array does not have one entry per part.
    #[error("grouping has {groups} entries but {parts} parts were requested")]
    GroupingMismatch { parts: usize, groups: usize },
}

impl From<NoAssignment> for PhraseError {
    fn from(_: NoAssignment) -> Self {
        PhraseError::NoAssignment
    }
}

/// Failure to load or parse dictionary data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {name}: {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A dictionary parsed cleanly but yielded no usable entries.
    #[error("{0} contains no usable entries")]
    Empty(String),
}
