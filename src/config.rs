// ⚙️ Build Configuration - input locations + ingestion policies

use crate::error::{IngestionError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How repeal links are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepealLinking {
    /// Single pass in file order. A repeal may only reference rows above it,
    /// which keeps the dangling/unknown target distinction meaningful.
    #[default]
    Ordered,

    /// Index every resolution first, then link. Accepts unsorted input; a
    /// missing target is always reported as unknown.
    TwoPass,
}

/// What to do when a nation appears in more than one player's alias list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasConflictPolicy {
    /// Fail the build with AmbiguousAlias
    #[default]
    Reject,

    /// Keep the earlier player as the resolution's player-author and log a warning
    FirstMatchWins,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Resolution dataset CSV
    pub resolutions_path: PathBuf,

    /// Player alias roster CSV
    pub aliases_path: PathBuf,

    /// Capitalisation exceptions, one name per line
    pub names_path: Option<PathBuf>,

    pub repeal_linking: RepealLinking,
    pub alias_conflicts: AliasConflictPolicy,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            resolutions_path: PathBuf::from("db/resolutions.csv"),
            aliases_path: PathBuf::from("db/aliases.csv"),
            names_path: None,
            repeal_linking: RepealLinking::Ordered,
            alias_conflicts: AliasConflictPolicy::Reject,
        }
    }
}

impl BuildConfig {
    /// Load from a JSON file; missing keys fall back to defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| IngestionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents).map_err(|e| IngestionError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
