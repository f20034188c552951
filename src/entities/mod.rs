// Entity Models - the nodes of the knowledge graph
//
// Entities live in arenas owned by the KnowledgeBase. Every cross-reference
// (author, co-authors, repeals, player links) is stored as an id and resolved
// through the KnowledgeBase, so there are no ownership cycles.

pub mod author;
pub mod player;
pub mod resolution;

pub use author::{Author, AuthorId};
pub use player::{Player, PlayerId};
pub use resolution::{Resolution, ResolutionId, REPEAL_CATEGORY};

/// Anything resolutions can be credited to: a nation (Author) or a player aggregate.
pub trait Authorship {
    /// Display name
    fn name(&self) -> &str;

    /// Resolutions submitted, in parse order
    fn authored(&self) -> &[ResolutionId];

    /// Resolutions co-authored, in parse order
    fn coauthored(&self) -> &[ResolutionId];

    /// True for alias aggregates built from the player roster
    fn is_player_aggregate(&self) -> bool;
}
