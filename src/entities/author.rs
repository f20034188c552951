// ✍️ Author Entity - one per distinct normalized nation name

use super::{Authorship, ResolutionId};
use serde::{Deserialize, Serialize};

/// Index of an Author in the KnowledgeBase author arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AuthorId(pub(crate) usize);

impl AuthorId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A nation exactly as it appears in the resolution dataset.
///
/// Identity is the normalized name; `name` keeps the first spelling seen
/// (trimmed, not re-cased).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,

    /// Display name (first spelling seen)
    pub name: String,

    /// Normalized comparison key
    pub key: String,

    pub authored_resolutions: Vec<ResolutionId>,
    pub coauthored_resolutions: Vec<ResolutionId>,
}

impl Author {
    pub(crate) fn new(id: AuthorId, name: &str) -> Self {
        Author {
            id,
            name: name.trim().to_string(),
            key: crate::names::normalize(name),
            authored_resolutions: Vec::new(),
            coauthored_resolutions: Vec::new(),
        }
    }

    /// Authored + co-authored
    pub fn total(&self) -> usize {
        self.authored_resolutions.len() + self.coauthored_resolutions.len()
    }
}

impl Authorship for Author {
    fn name(&self) -> &str {
        &self.name
    }

    fn authored(&self) -> &[ResolutionId] {
        &self.authored_resolutions
    }

    fn coauthored(&self) -> &[ResolutionId] {
        &self.coauthored_resolutions
    }

    fn is_player_aggregate(&self) -> bool {
        false
    }
}
