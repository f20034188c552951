// 📜 Resolution Entity - one per input row

use super::{AuthorId, PlayerId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category marking a resolution as a repeal; its sub-category holds the target number
pub const REPEAL_CATEGORY: &str = "Repeal";

/// Index of a Resolution in the KnowledgeBase resolution arena (= parse order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResolutionId(pub(crate) usize);

impl ResolutionId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    pub id: ResolutionId,

    // ========================================================================
    // ROW VALUES (immutable after parsing)
    // ========================================================================
    pub number: u32,
    pub title: String,
    pub category: String,
    pub sub_category: String,
    pub votes_for: u32,
    pub votes_against: u32,
    pub date: NaiveDate,

    // ========================================================================
    // GRAPH LINKS
    // ========================================================================
    /// Submitting nation
    pub author: AuthorId,

    /// Co-authors in row order, deduplicated by normalized name
    pub coauthors: Vec<AuthorId>,

    /// Earlier resolution this one repeals
    pub repeals: Option<ResolutionId>,

    /// Later resolution that repealed this one (set at most once, by that resolution)
    pub repealed_by: Option<ResolutionId>,

    /// Player owning the submitting nation
    pub player_author: Option<PlayerId>,

    /// Players owning any co-author nation
    pub player_coauthors: Vec<PlayerId>,
}

impl Resolution {
    pub fn is_repeal(&self) -> bool {
        self.category == REPEAL_CATEGORY
    }

    pub fn is_repealed(&self) -> bool {
        self.repealed_by.is_some()
    }

    /// Still in force and not itself a repeal
    pub fn is_active(&self) -> bool {
        !self.is_repealed() && !self.is_repeal()
    }

    pub fn has_coauthors(&self) -> bool {
        !self.coauthors.is_empty()
    }

    pub fn is_coauthor(&self, author: AuthorId) -> bool {
        self.coauthors.contains(&author)
    }

    /// Share of votes in favour, in percent; None when nobody voted
    pub fn pct_for(&self) -> Option<f64> {
        let cast = u64::from(self.votes_for) + u64::from(self.votes_against);
        if cast == 0 {
            return None;
        }
        Some(self.votes_for as f64 * 100.0 / cast as f64)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(category: &str) -> Resolution {
        Resolution {
            id: ResolutionId(0),
            number: 1,
            title: "Test Resolution".to_string(),
            category: category.to_string(),
            sub_category: "Mild".to_string(),
            votes_for: 100,
            votes_against: 250,
            date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            author: AuthorId(0),
            coauthors: vec![AuthorId(1)],
            repeals: None,
            repealed_by: None,
            player_author: None,
            player_coauthors: Vec::new(),
        }
    }

    #[test]
    fn test_resolution_status_flags() {
        let mut res = sample("Health");
        assert!(!res.is_repeal());
        assert!(res.is_active());

        res.repealed_by = Some(ResolutionId(5));
        assert!(res.is_repealed());
        assert!(!res.is_active());

        let repeal = sample(REPEAL_CATEGORY);
        assert!(repeal.is_repeal());
        assert!(!repeal.is_active());
    }

    #[test]
    fn test_resolution_coauthors_and_pct_for() {
        let res = sample("Health");
        assert!(res.has_coauthors());
        assert!(res.is_coauthor(AuthorId(1)));
        assert!(!res.is_coauthor(AuthorId(0)));
        assert_eq!(res.pct_for(), Some(100.0 * 100.0 / 350.0));

        let mut silent = sample("Health");
        silent.votes_for = 0;
        silent.votes_against = 0;
        assert_eq!(silent.pct_for(), None);
    }
}
