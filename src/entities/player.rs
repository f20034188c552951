// 🎭 Player Entity - one real identity behind many puppet nations
//
// A Player is additive bookkeeping: it lists the same resolutions its
// puppets already list, it never moves them out of the Authors.

use super::{Authorship, ResolutionId};
use crate::names::normalize;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Index of a Player in the KnowledgeBase player arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub(crate) usize);

impl PlayerId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,

    /// Aliases in roster order, always including the display name
    pub aliases: Vec<String>,

    /// Normalized aliases, used for matching
    alias_keys: HashSet<String>,

    pub authored_resolutions: Vec<ResolutionId>,
    pub coauthored_resolutions: Vec<ResolutionId>,
}

impl Player {
    pub(crate) fn new(id: PlayerId, display_name: &str, aliases: Vec<String>) -> Self {
        let alias_keys = aliases.iter().map(|a| normalize(a)).collect();
        Player {
            id,
            display_name: display_name.trim().to_string(),
            aliases,
            alias_keys,
            authored_resolutions: Vec::new(),
            coauthored_resolutions: Vec::new(),
        }
    }

    /// Case/whitespace-insensitive alias membership
    pub fn has_alias(&self, name: &str) -> bool {
        self.alias_keys.contains(&normalize(name))
    }

    pub(crate) fn has_alias_key(&self, key: &str) -> bool {
        self.alias_keys.contains(key)
    }

    pub fn total(&self) -> usize {
        self.authored_resolutions.len() + self.coauthored_resolutions.len()
    }
}

impl Authorship for Player {
    fn name(&self) -> &str {
        &self.display_name
    }

    fn authored(&self) -> &[ResolutionId] {
        &self.authored_resolutions
    }

    fn coauthored(&self) -> &[ResolutionId] {
        &self.coauthored_resolutions
    }

    fn is_player_aggregate(&self) -> bool {
        true
    }
}
