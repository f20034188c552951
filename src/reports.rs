// 📊 Reports - pure reads over a built KnowledgeBase
//
// These return plain data for report generators (leaderboards, author
// tables, author index, annual review). Formatting is the caller's job.

use crate::entities::{Authorship, Resolution, ResolutionId};
use crate::knowledge_base::KnowledgeBase;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

// ============================================================================
// TOTALS
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorTotals {
    pub authored: usize,
    pub coauthored: usize,
    pub total: usize,
    /// Repeals among the authored resolutions
    pub repeals: usize,
    /// Authored + co-authored still in force
    pub active: usize,
    /// In force and not themselves repeals
    pub active_non_repeals: usize,
    /// Repeals still in force
    pub active_repeals: usize,
    /// Authored + co-authored that were repealed
    pub repealed: usize,
}

impl AuthorTotals {
    pub fn of<A: Authorship + ?Sized>(kb: &KnowledgeBase, who: &A) -> Self {
        let authored: Vec<&Resolution> = kb.resolutions_for(who.authored()).collect();
        let coauthored: Vec<&Resolution> = kb.resolutions_for(who.coauthored()).collect();
        let all = || authored.iter().chain(coauthored.iter());

        AuthorTotals {
            authored: authored.len(),
            coauthored: coauthored.len(),
            total: authored.len() + coauthored.len(),
            repeals: authored.iter().filter(|r| r.is_repeal()).count(),
            active: all().filter(|r| !r.is_repealed()).count(),
            active_non_repeals: all().filter(|r| r.is_active()).count(),
            active_repeals: all().filter(|r| !r.is_repealed() && r.is_repeal()).count(),
            repealed: all().filter(|r| r.is_repealed()).count(),
        }
    }
}

/// One Author or Player with its totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub name: String,
    pub is_player: bool,
    pub totals: AuthorTotals,
}

fn all_rows(kb: &KnowledgeBase, keep_puppets: bool) -> Vec<TableRow> {
    let authors = kb
        .authors()
        .iter()
        .filter(|a| keep_puppets || !kb.is_puppet(&a.name))
        .map(|a| row(kb, a));
    let players = kb.players().iter().map(|p| row(kb, p));
    authors.chain(players).collect()
}

fn row<A: Authorship + ?Sized>(kb: &KnowledgeBase, who: &A) -> TableRow {
    TableRow {
        name: who.name().to_string(),
        is_player: who.is_player_aggregate(),
        totals: AuthorTotals::of(kb, who),
    }
}

// ============================================================================
// LEADERBOARD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    /// Only assigned when puppets are folded into their players
    pub rank: Option<usize>,
    pub name: String,
    pub is_player: bool,
    pub authored: usize,
    pub coauthored: usize,
    pub repeals: usize,
    /// In force and not a repeal
    pub active: usize,
    pub total: usize,
}

/// Every Author then every Player, by total descending then name.
///
/// With `keep_puppets == false`, nations listed in the alias roster are left
/// out (their player row carries them) and tied totals share a rank.
pub fn leaderboard(kb: &KnowledgeBase, keep_puppets: bool) -> Vec<LeaderboardRow> {
    let mut rows = all_rows(kb, keep_puppets);
    rows.sort_by(|a, b| {
        (Reverse(a.totals.total), &a.name, a.is_player).cmp(&(Reverse(b.totals.total), &b.name, b.is_player))
    });

    let mut out: Vec<LeaderboardRow> = Vec::with_capacity(rows.len());
    for (i, r) in rows.into_iter().enumerate() {
        let rank = if keep_puppets {
            None
        } else {
            match out.last() {
                Some(prev) if prev.total == r.totals.total => prev.rank,
                _ => Some(i + 1),
            }
        };

        out.push(LeaderboardRow {
            rank,
            name: r.name,
            is_player: r.is_player,
            authored: r.totals.authored,
            coauthored: r.totals.coauthored,
            repeals: r.totals.repeals,
            active: r.totals.active_non_repeals,
            total: r.totals.total,
        });
    }
    out
}

// ============================================================================
// AUTHOR TABLES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableOrder {
    Author,
    Total,
    ActiveTotal,
    ActiveNonRepealsTotal,
    ActiveRepealsTotal,
    RepealedTotal,
}

impl TableOrder {
    pub fn all() -> [TableOrder; 6] {
        [
            TableOrder::Author,
            TableOrder::Total,
            TableOrder::ActiveTotal,
            TableOrder::ActiveNonRepealsTotal,
            TableOrder::ActiveRepealsTotal,
            TableOrder::RepealedTotal,
        ]
    }

    fn key(&self, totals: &AuthorTotals) -> usize {
        match self {
            TableOrder::Author => 0,
            TableOrder::Total => totals.total,
            TableOrder::ActiveTotal => totals.active,
            TableOrder::ActiveNonRepealsTotal => totals.active_non_repeals,
            TableOrder::ActiveRepealsTotal => totals.active_repeals,
            TableOrder::RepealedTotal => totals.repealed,
        }
    }
}

/// Authors and Players (puppets included), by the chosen count descending then name
pub fn author_table(kb: &KnowledgeBase, order: TableOrder) -> Vec<TableRow> {
    let mut rows = all_rows(kb, true);
    rows.sort_by(|a, b| {
        order
            .key(&b.totals)
            .cmp(&order.key(&a.totals))
            .then_with(|| a.name.cmp(&b.name))
    });
    rows
}

// ============================================================================
// AUTHOR INDEX
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Sole author
    Author,
    /// Submitted a resolution that lists co-authors
    SubmittingCoauthor,
    /// Listed as co-author
    NonSubmittingCoauthor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexItem {
    pub number: u32,
    pub title: String,
    pub date: NaiveDate,
    pub role: Role,
    pub repealed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,
    pub is_player: bool,
    /// Authored and co-authored resolutions by date
    pub items: Vec<IndexItem>,
}

/// Every Author and Player by name, each with its resolutions by date
pub fn author_index(kb: &KnowledgeBase) -> Vec<IndexEntry> {
    let mut entries: Vec<IndexEntry> = kb
        .authors()
        .iter()
        .map(|a| index_entry(kb, a))
        .chain(kb.players().iter().map(|p| index_entry(kb, p)))
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

fn index_entry<A: Authorship + ?Sized>(kb: &KnowledgeBase, who: &A) -> IndexEntry {
    let item = |id: &ResolutionId, coauthored: bool| {
        kb.resolution(*id).map(|r| IndexItem {
            number: r.number,
            title: r.title.clone(),
            date: r.date,
            role: match (coauthored, r.has_coauthors()) {
                (true, _) => Role::NonSubmittingCoauthor,
                (false, true) => Role::SubmittingCoauthor,
                (false, false) => Role::Author,
            },
            repealed: r.is_repealed(),
        })
    };

    let mut items: Vec<IndexItem> = who
        .authored()
        .iter()
        .filter_map(|id| item(id, false))
        .chain(who.coauthored().iter().filter_map(|id| item(id, true)))
        .collect();
    items.sort_by_key(|i| i.date);

    IndexEntry {
        name: who.name().to_string(),
        is_player: who.is_player_aggregate(),
        items,
    }
}

// ============================================================================
// ANNUAL REVIEW
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualRow {
    pub number: u32,
    pub title: String,
    pub category: String,
    /// Repeals show their target as "GA <n>"
    pub sub_category: String,
    pub author: String,
    pub coauthors: Vec<String>,
    pub votes_for: u32,
    pub votes_against: u32,
    /// Rounded to two decimals
    pub pct_for: Option<f64>,
    pub implemented: NaiveDate,
}

/// Resolutions implemented during `year`, in parse order
pub fn annual_review(kb: &KnowledgeBase, year: i32) -> Vec<AnnualRow> {
    kb.resolutions()
        .iter()
        .filter(|r| r.date.year() == year)
        .map(|r| AnnualRow {
            number: r.number,
            title: r.title.clone(),
            category: r.category.clone(),
            sub_category: if r.is_repeal() {
                format!("GA {}", r.sub_category.trim())
            } else {
                r.sub_category.clone()
            },
            author: kb.author_of(r).map(|a| a.name.clone()).unwrap_or_default(),
            coauthors: kb.coauthors_of(r).map(|a| a.name.clone()).collect(),
            votes_for: r.votes_for,
            votes_against: r.votes_against,
            pct_for: r.pct_for().map(|p| (p * 100.0).round() / 100.0),
            implemented: r.date,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{AliasRow, ResolutionRow};

    fn res(number: u32, category: &str, sub_category: &str, author: &str, coauthors: &str, date: &str) -> ResolutionRow {
        ResolutionRow {
            number: number.to_string(),
            title: format!("Resolution {}", number),
            category: category.to_string(),
            sub_category: sub_category.to_string(),
            author: author.to_string(),
            coauthors: coauthors.to_string(),
            votes_for: "300".to_string(),
            votes_against: "100".to_string(),
            date: date.to_string(),
        }
    }

    fn sample_kb() -> KnowledgeBase {
        let rows = vec![
            res(1, "Health", "Healthcare", "Testlandia", "", "2019-01-05"),
            res(2, "Moral Decency", "Mild", "Otherland", "Testlandia", "2019-03-10"),
            res(3, "Repeal", "1", "Otherland", "", "2020-02-01 09:00:00"),
            res(4, "Education", "Artistic", "Thirdland", "", "2020-06-01"),
        ];
        let aliases = vec![AliasRow {
            player: "Alice".to_string(),
            aliases: "Testlandia, Otherland".to_string(),
        }];
        KnowledgeBase::build(&rows, &aliases).unwrap()
    }

    #[test]
    fn test_author_totals() {
        let kb = sample_kb();
        let testlandia = AuthorTotals::of(&kb, kb.author_by_name("Testlandia").unwrap());
        assert_eq!(testlandia.authored, 1);
        assert_eq!(testlandia.coauthored, 1);
        assert_eq!(testlandia.total, 2);
        assert_eq!(testlandia.repealed, 1);
        assert_eq!(testlandia.active_non_repeals, 1);

        let otherland = AuthorTotals::of(&kb, kb.author_by_name("Otherland").unwrap());
        assert_eq!(otherland.repeals, 1);
        assert_eq!(otherland.active, 2);
        assert_eq!(otherland.active_repeals, 1);
        assert_eq!(otherland.active_non_repeals, 1);
    }

    #[test]
    fn test_player_totals_do_not_replace_author_totals() {
        let kb = sample_kb();
        let alice = AuthorTotals::of(&kb, kb.player_by_name("Alice").unwrap());
        assert_eq!(alice.authored, 3);
        assert_eq!(alice.coauthored, 1);

        let sum_of_puppets: usize = ["Testlandia", "Otherland"]
            .iter()
            .map(|n| kb.author_by_name(n).unwrap().authored_resolutions.len())
            .sum();
        assert_eq!(alice.authored, sum_of_puppets);
    }

    #[test]
    fn test_leaderboard_with_puppets() {
        let kb = sample_kb();
        let board = leaderboard(&kb, true);
        assert_eq!(board.len(), 4);
        assert_eq!(board[0].name, "Alice");
        assert!(board[0].is_player);
        assert_eq!(board[0].total, 4);
        assert!(board.iter().all(|r| r.rank.is_none()));
        assert_eq!(board[1].name, "Otherland");
        assert_eq!(board[2].name, "Testlandia");
    }

    #[test]
    fn test_leaderboard_without_puppets() {
        let kb = sample_kb();
        let board = leaderboard(&kb, false);
        let names: Vec<&str> = board.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Thirdland"]);
        assert_eq!(board[0].rank, Some(1));
        assert_eq!(board[1].rank, Some(2));
    }

    #[test]
    fn test_leaderboard_ties_share_rank() {
        let rows = vec![
            res(1, "Health", "Healthcare", "Bland", "", "2019-01-05"),
            res(2, "Health", "Healthcare", "Aland", "", "2019-01-06"),
            res(3, "Health", "Healthcare", "Cland", "", "2019-01-07"),
            res(4, "Health", "Healthcare", "Cland", "", "2019-01-08"),
        ];
        let kb = KnowledgeBase::build(&rows, &[]).unwrap();
        let board = leaderboard(&kb, false);
        let ranked: Vec<(&str, Option<usize>)> = board.iter().map(|r| (r.name.as_str(), r.rank)).collect();
        assert_eq!(ranked, vec![("Cland", Some(1)), ("Aland", Some(2)), ("Bland", Some(2))]);
    }

    #[test]
    fn test_author_table_orders() {
        let kb = sample_kb();

        let by_name = author_table(&kb, TableOrder::Author);
        let names: Vec<&str> = by_name.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Otherland", "Testlandia", "Thirdland"]);

        let by_repealed = author_table(&kb, TableOrder::RepealedTotal);
        assert_eq!(by_repealed[0].name, "Alice");
        assert_eq!(by_repealed[1].name, "Testlandia");

        assert_eq!(TableOrder::all().len(), 6);
    }

    #[test]
    fn test_author_index_roles() {
        let kb = sample_kb();
        let index = author_index(&kb);
        let testlandia = index.iter().find(|e| e.name == "Testlandia").unwrap();

        assert_eq!(testlandia.items.len(), 2);
        assert_eq!(testlandia.items[0].number, 1);
        assert_eq!(testlandia.items[0].role, Role::Author);
        assert!(testlandia.items[0].repealed);
        assert_eq!(testlandia.items[1].role, Role::NonSubmittingCoauthor);

        let otherland = index.iter().find(|e| e.name == "Otherland").unwrap();
        assert_eq!(otherland.items[0].role, Role::SubmittingCoauthor);
    }

    #[test]
    fn test_annual_review() {
        let kb = sample_kb();
        let rows = annual_review(&kb, 2020);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 3);
        assert_eq!(rows[0].sub_category, "GA 1");
        assert_eq!(rows[0].pct_for, Some(75.0));
        assert_eq!(rows[1].sub_category, "Artistic");

        let earlier = annual_review(&kb, 2019);
        assert_eq!(earlier[1].coauthors, vec!["Testlandia".to_string()]);
        assert!(annual_review(&kb, 2001).is_empty());
    }
}
