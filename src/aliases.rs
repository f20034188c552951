// 🎭 Alias Index - player roster → Player aggregates
//
// Each roster row names a player and the nations ("puppets") they control.
// Building a Player scans every resolution and credits it to the player when
// its author or any co-author is one of those nations. Authors keep their own
// lists untouched: the same resolution is counted for both.

use crate::config::AliasConflictPolicy;
use crate::entities::{Player, PlayerId};
use crate::error::{IngestionError, Result};
use crate::knowledge_base::KnowledgeBaseBuilder;
use crate::names::{is_same_name, normalize};
use crate::parser::{split_names, AliasRow};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// ============================================================================
// ALIAS MAP
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub player: String,
    /// Roster order, plus the player's own name unless already listed
    pub aliases: Vec<String>,
}

/// Player name → aliases, in roster order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasMap {
    entries: Vec<AliasEntry>,
}

impl AliasMap {
    pub(crate) fn insert(&mut self, player: &str, aliases: Vec<String>) {
        self.entries.push(AliasEntry {
            player: player.to_string(),
            aliases,
        });
    }

    fn entry(&self, player: &str) -> Option<&AliasEntry> {
        self.entries.iter().find(|e| is_same_name(&e.player, player))
    }

    pub fn aliases_of(&self, player: &str) -> Option<&[String]> {
        self.entry(player).map(|e| e.aliases.as_slice())
    }

    /// Does `name` belong to `player`? Both compared case-insensitively.
    pub fn is_alias(&self, name: &str, player: &str) -> bool {
        self.entry(player)
            .map_or(false, |e| e.aliases.iter().any(|a| is_same_name(a, name)))
    }

    /// Does `name` belong to any player?
    pub fn contains_alias(&self, name: &str) -> bool {
        let key = normalize(name);
        self.entries
            .iter()
            .any(|e| e.aliases.iter().any(|a| normalize(a) == key))
    }

    /// Players whose alias list contains `name`, in roster order
    pub fn players_for<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> + 'a {
        let key = normalize(name);
        self.entries
            .iter()
            .filter(move |e| e.aliases.iter().any(|a| normalize(a) == key))
            .map(|e| e.player.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &AliasEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Roster alias list plus the player's own name, deduplicated by normalized name
pub fn parse_alias_list(player: &str, aliases: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let player = player.trim().to_string();
    for alias in split_names(aliases).into_iter().chain(std::iter::once(player)) {
        if !out.iter().any(|a| is_same_name(a, &alias)) {
            out.push(alias);
        }
    }
    out
}

// ============================================================================
// PLAYER BUILDER
// ============================================================================

/// Build one Player per roster row. Must run after every resolution is parsed.
pub fn build_players(builder: &mut KnowledgeBaseBuilder, rows: &[AliasRow]) -> Result<()> {
    for row in rows {
        let player_name = row.player.trim();
        if builder.alias_map.aliases_of(player_name).is_some() {
            return Err(IngestionError::DuplicatePlayer {
                name: player_name.to_string(),
            });
        }

        let aliases = parse_alias_list(player_name, &row.aliases);
        check_conflicts(builder, player_name, &aliases)?;

        let id = PlayerId(builder.players.len());
        let mut player = Player::new(id, player_name, aliases.clone());

        let KnowledgeBaseBuilder {
            authors,
            resolutions,
            ..
        } = &mut *builder;

        for resolution in resolutions.iter_mut() {
            let authored = authors
                .get(resolution.author)
                .map_or(false, |a| player.has_alias_key(&a.key));
            if authored {
                player.authored_resolutions.push(resolution.id);
                // one author per resolution, so a second claim only comes from a tolerated conflict
                if resolution.player_author.is_none() {
                    resolution.player_author = Some(id);
                }
            }

            let coauthored = resolution.coauthors.iter().any(|c| {
                authors
                    .get(*c)
                    .map_or(false, |a| player.has_alias_key(&a.key))
            });
            if coauthored {
                player.coauthored_resolutions.push(resolution.id);
                resolution.player_coauthors.push(id);
            }
        }

        debug!(
            player = %player.display_name,
            aliases = aliases.len(),
            authored = player.authored_resolutions.len(),
            coauthored = player.coauthored_resolutions.len(),
            "built player"
        );

        builder.alias_map.insert(player_name, aliases);
        builder.players.push(player);
    }
    Ok(())
}

/// Reject (or log) nations already claimed by an earlier player
fn check_conflicts(builder: &KnowledgeBaseBuilder, player: &str, aliases: &[String]) -> Result<()> {
    for alias in aliases {
        let key = normalize(alias);
        let author = match builder.authors.find_key(&key).and_then(|id| builder.authors.get(id)) {
            Some(author) => author,
            None => {
                debug!(player, alias = %alias, "alias matches no author");
                continue;
            }
        };

        let Some(previous) = builder.players.iter().find(|p| p.has_alias_key(&key)) else {
            continue;
        };

        match builder.alias_conflicts {
            AliasConflictPolicy::Reject => {
                return Err(IngestionError::AmbiguousAlias {
                    name: author.name.clone(),
                    first_player: previous.display_name.clone(),
                    second_player: player.to_string(),
                });
            }
            AliasConflictPolicy::FirstMatchWins => {
                warn!(
                    author = %author.name,
                    first = %previous.display_name,
                    second = player,
                    "author claimed by two players, keeping the first as player-author"
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;
    use crate::knowledge_base::KnowledgeBase;
    use crate::parser::ResolutionRow;

    fn res(number: u32, author: &str, coauthors: &str) -> ResolutionRow {
        ResolutionRow {
            number: number.to_string(),
            title: format!("Resolution {}", number),
            category: "Health".to_string(),
            sub_category: "Healthcare".to_string(),
            author: author.to_string(),
            coauthors: coauthors.to_string(),
            votes_for: "10".to_string(),
            votes_against: "5".to_string(),
            date: "2012-06-01".to_string(),
        }
    }

    fn alias(player: &str, aliases: &str) -> AliasRow {
        AliasRow {
            player: player.to_string(),
            aliases: aliases.to_string(),
        }
    }

    #[test]
    fn test_parse_alias_list_appends_player() {
        assert_eq!(
            parse_alias_list("Alice", "Testlandia, Otherland"),
            vec!["Testlandia", "Otherland", "Alice"]
        );
        assert_eq!(parse_alias_list("Alice", "alice, Testlandia,"), vec!["alice", "Testlandia"]);
        assert_eq!(parse_alias_list("Alice", ""), vec!["Alice"]);
    }

    #[test]
    fn test_player_is_additive() {
        let rows = vec![res(1, "Testlandia", "")];
        let kb = KnowledgeBase::build(&rows, &[alias("Alice", "Testlandia, Otherland")]).unwrap();

        let resolution = kb.resolution_by_number(1).unwrap();
        let alice = kb.player_by_name("alice").unwrap();
        assert_eq!(alice.authored_resolutions, vec![resolution.id]);
        assert_eq!(
            kb.author_by_name("Testlandia").unwrap().authored_resolutions,
            vec![resolution.id]
        );
        assert_eq!(resolution.player_author, Some(alice.id));
    }

    #[test]
    fn test_player_coauthor_credit() {
        let rows = vec![
            res(1, "Otherland", "testlandia, Thirdland"),
            res(2, "Fourthland", "Fifthland"),
        ];
        let kb = KnowledgeBase::build(
            &rows,
            &[alias("Alice", "Testlandia"), alias("Bob", "Thirdland")],
        )
        .unwrap();

        let first = kb.resolution_by_number(1).unwrap();
        let alice = kb.player_by_name("Alice").unwrap();
        let bob = kb.player_by_name("Bob").unwrap();

        assert_eq!(alice.coauthored_resolutions, vec![first.id]);
        assert!(alice.authored_resolutions.is_empty());
        assert_eq!(first.player_coauthors, vec![alice.id, bob.id]);
        assert!(first.player_author.is_none());
    }

    #[test]
    fn test_two_puppets_on_one_resolution_counted_once() {
        let rows = vec![res(1, "Otherland", "Testlandia, Secondland")];
        let kb = KnowledgeBase::build(&rows, &[alias("Alice", "Testlandia, Secondland")]).unwrap();
        let alice = kb.player_by_name("Alice").unwrap();
        assert_eq!(alice.coauthored_resolutions.len(), 1);
        assert_eq!(kb.resolution_by_number(1).unwrap().player_coauthors.len(), 1);
    }

    #[test]
    fn test_ambiguous_alias_rejected() {
        let rows = vec![res(1, "Testlandia", "")];
        let err = KnowledgeBase::build(
            &rows,
            &[alias("Alice", "Testlandia"), alias("Bob", "TESTLANDIA")],
        )
        .unwrap_err();
        match err {
            IngestionError::AmbiguousAlias {
                name,
                first_player,
                second_player,
            } => {
                assert_eq!(name, "Testlandia");
                assert_eq!(first_player, "Alice");
                assert_eq!(second_player, "Bob");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_ambiguous_alias_on_coauthor_only_nation() {
        let rows = vec![res(1, "Testlandia", "Otherland")];
        let err = KnowledgeBase::build(
            &rows,
            &[alias("Alice", "Otherland"), alias("Bob", "otherland")],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            IngestionError::AmbiguousAlias { ref name, .. } if name == "Otherland"
        ));
    }

    #[test]
    fn test_coauthor_matching_two_aliases_counted_once() {
        let rows = vec![res(1, "Testlandia", "Other Land")];
        let kb = KnowledgeBase::build(
            &rows,
            &[AliasRow {
                player: "Alice".to_string(),
                aliases: "Other Land, other_land, OTHER LAND".to_string(),
            }],
        )
        .unwrap();

        let alice = kb.player_by_name("Alice").unwrap();
        let resolution = kb.resolution_by_number(1).unwrap();
        assert_eq!(alice.coauthored_resolutions, vec![resolution.id]);
        assert_eq!(resolution.player_coauthors, vec![alice.id]);
        assert!(alice.authored_resolutions.is_empty());
    }

    #[test]
    fn test_shared_alias_without_author_is_harmless() {
        let rows = vec![res(1, "Testlandia", "")];
        let kb = KnowledgeBase::build(
            &rows,
            &[alias("Alice", "Ghostland"), alias("Bob", "ghostland")],
        )
        .unwrap();
        assert_eq!(kb.players().len(), 2);
    }

    #[test]
    fn test_first_match_wins_policy() {
        let config = BuildConfig {
            alias_conflicts: AliasConflictPolicy::FirstMatchWins,
            ..BuildConfig::default()
        };
        let rows = vec![res(1, "Testlandia", "")];
        let kb = KnowledgeBase::build_with(
            &rows,
            &[alias("Alice", "Testlandia"), alias("Bob", "Testlandia")],
            &config,
        )
        .unwrap();

        let resolution = kb.resolution_by_number(1).unwrap();
        let alice = kb.player_by_name("Alice").unwrap();
        let bob = kb.player_by_name("Bob").unwrap();
        assert_eq!(resolution.player_author, Some(alice.id));
        assert_eq!(bob.authored_resolutions, vec![resolution.id]);
    }

    #[test]
    fn test_duplicate_player_rejected() {
        let err = KnowledgeBase::build(&[], &[alias("Alice", "A"), alias("alice", "B")]).unwrap_err();
        assert!(matches!(err, IngestionError::DuplicatePlayer { .. }));
    }

    #[test]
    fn test_alias_map_queries() {
        let kb = KnowledgeBase::build(&[], &[alias("Alice", "Testlandia, Otherland")]).unwrap();
        assert_eq!(
            kb.aliases_of("Alice").unwrap(),
            &["Testlandia".to_string(), "Otherland".to_string(), "Alice".to_string()]
        );
        assert!(kb.is_alias("OTHERLAND", "alice"));
        assert!(kb.is_alias("Alice", "Alice"));
        assert!(!kb.is_alias("Testlandia", "Bob"));
        assert!(kb.is_puppet("testlandia"));
        assert!(!kb.is_puppet("Nowhere"));
        assert_eq!(kb.alias_map().players_for("Otherland").collect::<Vec<_>>(), vec!["Alice"]);
        assert_eq!(kb.alias_map().len(), 1);
    }
}
