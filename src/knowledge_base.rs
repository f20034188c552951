// 🧠 Knowledge Base - resolutions, authors and players for one ingestion run
//
// KnowledgeBaseBuilder is the only mutation surface. finish() hands back an
// immutable KnowledgeBase that report generators share read-only.
//
// Row order is load-bearing: with RepealLinking::Ordered a repeal may only
// point at a resolution parsed before it.

use crate::aliases::{build_players, AliasMap};
use crate::config::{AliasConflictPolicy, BuildConfig, RepealLinking};
use crate::entities::{Author, AuthorId, Player, PlayerId, Resolution, ResolutionId};
use crate::error::{IngestionError, Result};
use crate::identity::AuthorRegistry;
use crate::names::normalize;
use crate::parser::{load_alias_rows, load_resolution_rows, AliasRow, ResolutionRow};
use std::collections::HashMap;
use tracing::{debug, info, warn};

// ============================================================================
// REPEAL LOOKUP
// ============================================================================

/// Outcome of searching the already-parsed resolutions for a repeal target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepealLookup {
    Found(ResolutionId),
    /// Target number is above the repeal's own: it has not been parsed yet
    NotYetParsed,
    /// Target number is below the repeal's own and still absent
    Missing,
}

// ============================================================================
// BUILDER
// ============================================================================

pub struct KnowledgeBaseBuilder {
    pub(crate) authors: AuthorRegistry,
    pub(crate) resolutions: Vec<Resolution>,
    pub(crate) players: Vec<Player>,
    pub(crate) alias_map: AliasMap,
    pub(crate) alias_conflicts: AliasConflictPolicy,
    repeal_linking: RepealLinking,
    /// Repeals waiting for the second pass: (repeal, target number)
    pending_repeals: Vec<(ResolutionId, u32)>,
}

impl KnowledgeBaseBuilder {
    pub fn new(config: &BuildConfig) -> Self {
        KnowledgeBaseBuilder {
            authors: AuthorRegistry::new(),
            resolutions: Vec::new(),
            players: Vec::new(),
            alias_map: AliasMap::default(),
            alias_conflicts: config.alias_conflicts,
            repeal_linking: config.repeal_linking,
            pending_repeals: Vec::new(),
        }
    }

    /// Get-or-create the Author for a raw name (see AuthorRegistry::resolve)
    pub fn resolve_author(&mut self, name: &str) -> AuthorId {
        self.authors.resolve(name)
    }

    /// First already-parsed resolution with this number, in parse order
    pub fn find_resolution(&self, number: u32) -> Option<ResolutionId> {
        self.resolutions
            .iter()
            .find(|r| r.number == number)
            .map(|r| r.id)
    }

    pub fn lookup_repeal_target(&self, number: u32, target: u32) -> RepealLookup {
        match self.find_resolution(target) {
            Some(id) => RepealLookup::Found(id),
            None if number < target => RepealLookup::NotYetParsed,
            None => RepealLookup::Missing,
        }
    }

    /// Parse one row and link it into the graph.
    ///
    /// `row` is the 1-based data row, used in error messages.
    pub fn add_resolution(&mut self, row: usize, raw: &ResolutionRow) -> Result<ResolutionId> {
        let parsed = raw.parse(row)?;
        let number = parsed.number;

        if self.find_resolution(number).is_some() {
            return Err(IngestionError::DuplicateResolution { number });
        }

        let id = ResolutionId(self.resolutions.len());

        let repeals = match parsed.repeal_target {
            Some(target) if target == number => {
                return Err(IngestionError::SelfRepeal { number });
            }
            Some(target) => match self.repeal_linking {
                RepealLinking::Ordered => match self.lookup_repeal_target(number, target) {
                    RepealLookup::Found(_) if target > number => {
                        return Err(IngestionError::DanglingRepeal { number, target });
                    }
                    RepealLookup::Found(found) => {
                        self.ensure_not_repealed(found, number)?;
                        Some(found)
                    }
                    RepealLookup::NotYetParsed => {
                        return Err(IngestionError::DanglingRepeal { number, target });
                    }
                    RepealLookup::Missing => {
                        return Err(IngestionError::UnknownRepealTarget { number, target });
                    }
                },
                RepealLinking::TwoPass => {
                    self.pending_repeals.push((id, target));
                    None
                }
            },
            None => None,
        };

        let author = self.authors.resolve(&parsed.author);

        let mut coauthors: Vec<AuthorId> = Vec::new();
        for name in &parsed.coauthors {
            let coauthor = self.authors.resolve(name);
            if coauthors.contains(&coauthor) {
                warn!(resolution = number, coauthor = %name, "co-author listed twice, ignoring repeat");
                continue;
            }
            coauthors.push(coauthor);
        }

        if let Some(a) = self.authors.get_mut(author) {
            a.authored_resolutions.push(id);
        }
        for coauthor in &coauthors {
            if let Some(a) = self.authors.get_mut(*coauthor) {
                a.coauthored_resolutions.push(id);
            }
        }
        if let Some(target) = repeals {
            self.resolutions[target.0].repealed_by = Some(id);
        }

        debug!(resolution = number, title = %raw.title, "parsed resolution");

        self.resolutions.push(Resolution {
            id,
            number,
            title: raw.title.clone(),
            category: raw.category.clone(),
            sub_category: raw.sub_category.clone(),
            votes_for: parsed.votes_for,
            votes_against: parsed.votes_against,
            date: parsed.date,
            author,
            coauthors,
            repeals,
            repealed_by: None,
            player_author: None,
            player_coauthors: Vec::new(),
        });

        Ok(id)
    }

    /// Parse every row in order; in two-pass mode, link repeals afterwards
    pub fn add_resolutions(&mut self, rows: &[ResolutionRow]) -> Result<()> {
        for (i, row) in rows.iter().enumerate() {
            self.add_resolution(i + 1, row)?;
        }
        self.link_pending_repeals()
    }

    /// Second pass of RepealLinking::TwoPass. No-op in ordered mode.
    pub fn link_pending_repeals(&mut self) -> Result<()> {
        for (id, target) in std::mem::take(&mut self.pending_repeals) {
            let number = self.resolutions[id.0].number;
            let found = self
                .find_resolution(target)
                .ok_or(IngestionError::UnknownRepealTarget { number, target })?;

            if target > number {
                return Err(IngestionError::DanglingRepeal { number, target });
            }
            self.ensure_not_repealed(found, number)?;

            self.resolutions[id.0].repeals = Some(found);
            self.resolutions[found.0].repealed_by = Some(id);
        }
        Ok(())
    }

    /// Build Player aggregates from the alias roster (after all resolutions)
    pub fn add_players(&mut self, rows: &[AliasRow]) -> Result<()> {
        build_players(self, rows)
    }

    pub fn finish(mut self) -> Result<KnowledgeBase> {
        self.link_pending_repeals()?;

        let by_number = self
            .resolutions
            .iter()
            .map(|r| (r.number, r.id))
            .collect::<HashMap<_, _>>();

        let kb = KnowledgeBase {
            authors: self.authors.into_vec(),
            resolutions: self.resolutions,
            players: self.players,
            alias_map: self.alias_map,
            by_number,
        };

        info!(
            resolutions = kb.resolutions.len(),
            authors = kb.authors.len(),
            players = kb.players.len(),
            "knowledge base built"
        );
        Ok(kb)
    }

    fn ensure_not_repealed(&self, target: ResolutionId, number: u32) -> Result<()> {
        let existing = &self.resolutions[target.0];
        match existing.repealed_by {
            Some(first) => Err(IngestionError::AlreadyRepealed {
                target: existing.number,
                first: self.resolutions[first.0].number,
                second: number,
            }),
            None => Ok(()),
        }
    }
}

// ============================================================================
// KNOWLEDGE BASE (read-only)
// ============================================================================

/// Immutable graph of one ingestion run
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    authors: Vec<Author>,
    resolutions: Vec<Resolution>,
    players: Vec<Player>,
    alias_map: AliasMap,
    by_number: HashMap<u32, ResolutionId>,
}

impl KnowledgeBase {
    /// Build with default policies (ordered repeal linking, reject ambiguous aliases)
    pub fn build(resolution_rows: &[ResolutionRow], alias_rows: &[AliasRow]) -> Result<Self> {
        Self::build_with(resolution_rows, alias_rows, &BuildConfig::default())
    }

    /// All-or-nothing build: the first error aborts and nothing is returned
    pub fn build_with(
        resolution_rows: &[ResolutionRow],
        alias_rows: &[AliasRow],
        config: &BuildConfig,
    ) -> Result<Self> {
        info!(
            resolutions = resolution_rows.len(),
            players = alias_rows.len(),
            linking = ?config.repeal_linking,
            "building knowledge base"
        );

        let mut builder = KnowledgeBaseBuilder::new(config);
        builder.add_resolutions(resolution_rows)?;
        builder.add_players(alias_rows)?;
        builder.finish()
    }

    /// Read both CSV files named by the config, then build
    pub fn load(config: &BuildConfig) -> Result<Self> {
        let resolution_rows = load_resolution_rows(&config.resolutions_path)?;
        let alias_rows = load_alias_rows(&config.aliases_path)?;
        Self::build_with(&resolution_rows, &alias_rows, config)
    }

    // ========================================================================
    // COLLECTIONS
    // ========================================================================

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Resolutions in parse order
    pub fn resolutions(&self) -> &[Resolution] {
        &self.resolutions
    }

    pub fn alias_map(&self) -> &AliasMap {
        &self.alias_map
    }

    // ========================================================================
    // LOOKUPS
    // ========================================================================

    pub fn resolution(&self, id: ResolutionId) -> Option<&Resolution> {
        self.resolutions.get(id.0)
    }

    pub fn author(&self, id: AuthorId) -> Option<&Author> {
        self.authors.get(id.0)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.0)
    }

    pub fn resolution_by_number(&self, number: u32) -> Option<&Resolution> {
        self.by_number.get(&number).and_then(|id| self.resolution(*id))
    }

    /// Case/whitespace-insensitive author lookup
    pub fn author_by_name(&self, name: &str) -> Option<&Author> {
        let key = normalize(name);
        self.authors.iter().find(|a| a.key == key)
    }

    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        let key = normalize(name);
        self.players
            .iter()
            .find(|p| normalize(&p.display_name) == key)
    }

    /// Submitting nation of a resolution from this knowledge base
    pub fn author_of(&self, resolution: &Resolution) -> Option<&Author> {
        self.author(resolution.author)
    }

    pub fn coauthors_of<'a>(&'a self, resolution: &'a Resolution) -> impl Iterator<Item = &'a Author> + 'a {
        resolution.coauthors.iter().filter_map(move |id| self.author(*id))
    }

    /// Resolutions for a list of ids, skipping ids from other knowledge bases
    pub fn resolutions_for<'a>(&'a self, ids: &'a [ResolutionId]) -> impl Iterator<Item = &'a Resolution> + 'a {
        ids.iter().filter_map(move |id| self.resolution(*id))
    }

    // ========================================================================
    // ALIASES
    // ========================================================================

    /// Every alias of a player in roster order, the player's own name included
    pub fn aliases_of(&self, player: &str) -> Option<&[String]> {
        self.alias_map.aliases_of(player)
    }

    /// True if `name` is one of `player`'s nations (or the player's own name)
    pub fn is_alias(&self, name: &str, player: &str) -> bool {
        self.alias_map.is_alias(name, player)
    }

    /// True if `name` belongs to any player in the roster
    pub fn is_puppet(&self, name: &str) -> bool {
        self.alias_map.contains_alias(name)
    }

    /// First player (in roster order) whose aliases include this author
    pub fn player_of(&self, author: AuthorId) -> Option<&Player> {
        let key = &self.author(author)?.key;
        self.players.iter().find(|p| p.has_alias_key(key))
    }
}
