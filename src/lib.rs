// WA Authorboards - Core Library
// Builds the resolution/author knowledge base used by every report

pub mod aliases;
pub mod config;
pub mod entities;
pub mod error;
pub mod identity;
pub mod knowledge_base;
pub mod names;
pub mod parser;
pub mod reports;

// Re-export commonly used types
pub use aliases::{build_players, parse_alias_list, AliasEntry, AliasMap};
pub use config::{AliasConflictPolicy, BuildConfig, RepealLinking};
pub use entities::{
    Author, AuthorId, Authorship, Player, PlayerId, Resolution, ResolutionId, REPEAL_CATEGORY,
};
pub use error::{IngestionError, Result};
pub use identity::AuthorRegistry;
pub use knowledge_base::{KnowledgeBase, KnowledgeBaseBuilder, RepealLookup};
pub use names::{is_same_name, normalize, NameStyler};
pub use parser::{
    load_alias_rows, load_resolution_rows, read_alias_rows, read_resolution_rows, AliasRow,
    ParsedResolution, ResolutionRow,
};
pub use reports::{
    annual_review, author_index, author_table, leaderboard, AnnualRow, AuthorTotals, IndexEntry,
    IndexItem, LeaderboardRow, Role, TableOrder, TableRow,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
