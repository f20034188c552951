// ❌ Ingestion Errors - every way a build can fail
//
// All variants are fatal: a build either produces a complete KnowledgeBase
// or nothing at all.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning resolution and alias rows into a knowledge base.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// A numeric or date field could not be parsed.
    #[error("row {row}: invalid {field} '{value}': {reason}")]
    Parse {
        row: usize,
        field: &'static str,
        value: String,
        reason: String,
    },

    /// A repeal references a resolution numbered above itself.
    #[error("resolution {number} repeals {target}, a later-numbered resolution (input out of order?)")]
    DanglingRepeal { number: u32, target: u32 },

    /// A repeal references a resolution that does not exist in the dataset.
    #[error("resolution {number} repeals {target}, but no resolution {target} exists")]
    UnknownRepealTarget { number: u32, target: u32 },

    /// A resolution claims to repeal itself.
    #[error("resolution {number} cannot repeal itself")]
    SelfRepeal { number: u32 },

    /// Two rows share the same resolution number.
    #[error("resolution number {number} appears more than once")]
    DuplicateResolution { number: u32 },

    /// A second repeal targets a resolution that is already repealed.
    #[error("resolution {target} is repealed by both {first} and {second}")]
    AlreadyRepealed { target: u32, first: u32, second: u32 },

    /// An author name is claimed by the alias sets of two different players.
    #[error("author '{name}' is an alias of both '{first_player}' and '{second_player}'")]
    AmbiguousAlias {
        name: String,
        first_player: String,
        second_player: String,
    },

    /// The same player appears on two roster rows.
    #[error("player '{name}' appears more than once in the alias roster")]
    DuplicatePlayer { name: String },

    #[error("failed to read CSV {origin}: {source}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },

    #[error("invalid config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IngestionError {
    pub(crate) fn parse(row: usize, field: &'static str, value: &str, reason: impl ToString) -> Self {
        IngestionError::Parse {
            row,
            field,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Library result type.
pub type Result<T> = std::result::Result<T, IngestionError>;
