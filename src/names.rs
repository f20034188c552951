// 🔤 Name Normalizer - identity comparison + display capitalisation
//
// Two separate concerns that must never be mixed:
// - normalize() decides whether two raw names are the same nation
// - NameStyler decides how a name is shown to humans
//
// Identity matching only ever goes through normalize().

use crate::error::{IngestionError, Result};
use std::fs;
use std::path::Path;

/// Small words that stay lower case unless they open the name
const STOP_WORDS: [&str; 6] = ["for", "and", "nor", "but", "yet", "the"];

/// Roman numerals upper-cased when they end a name ("Testlandia ii" → "Testlandia II")
const TRAILING_NUMERALS: [&str; 9] = ["ii", "iii", "iv", "v", "vi", "vii", "viii", "ix", "x"];

// ============================================================================
// IDENTITY NORMALIZATION
// ============================================================================

/// Canonical comparison form of a name.
///
/// Trims, lowercases and collapses every internal whitespace run into a single
/// underscore, so `" The  Testlandia "` and `"the_testlandia"` compare equal.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Case- and whitespace-insensitive name equality
pub fn is_same_name(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

// ============================================================================
// DISPLAY CAPITALISATION
// ============================================================================

/// Display-only capitalisation rules, with manual exact-match overrides.
#[derive(Debug, Clone, Default)]
pub struct NameStyler {
    exceptions: Vec<String>,
}

impl NameStyler {
    /// Styler with no manual overrides
    pub fn new() -> Self {
        NameStyler::default()
    }

    /// Styler with the given manual overrides (blank entries are ignored)
    pub fn with_exceptions<I, S>(exceptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        NameStyler {
            exceptions: exceptions
                .into_iter()
                .map(|e| e.as_ref().trim().to_string())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    /// Load overrides from a text file, one name per line
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| IngestionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(NameStyler::with_exceptions(contents.lines()))
    }

    pub fn exception_count(&self) -> usize {
        self.exceptions.len()
    }

    /// Title-case a raw name for display.
    ///
    /// Example: "the_kingdom_of_testlandia_iii" → "The Kingdom of Testlandia III"
    pub fn canonicalize_for_display(&self, raw: &str) -> String {
        let spaced = raw.replace('_', " ");
        let spaced = spaced.trim();

        // Manual overrides win over every rule below
        if let Some(exception) = self
            .exceptions
            .iter()
            .find(|e| e.to_lowercase() == spaced.to_lowercase())
        {
            return exception.clone();
        }

        let words: Vec<&str> = spaced.split_whitespace().collect();
        let last = words.len().saturating_sub(1);

        words
            .iter()
            .enumerate()
            .map(|(i, word)| {
                let lower = word.to_lowercase();
                if i > 0 && i == last && TRAILING_NUMERALS.contains(&lower.as_str()) {
                    word.to_uppercase()
                } else if lower == "wa" && i < last {
                    // "WA Mission of ..." style names, standalone word only
                    "WA".to_string()
                } else if lower == "st" {
                    "St".to_string()
                } else if i == 0
                    || (word.chars().count() > 2 && !STOP_WORDS.contains(&lower.as_str()))
                {
                    capitalize(word)
                } else {
                    lower
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// First letter upper case, the rest lower case
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_case_and_whitespace() {
        assert_eq!(normalize("Testlandia"), "testlandia");
        assert_eq!(normalize("  TESTLANDIA "), "testlandia");
        assert_eq!(normalize("The   Free  Land"), "the_free_land");
        assert_eq!(normalize("the_free_land"), "the_free_land");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_is_same_name() {
        assert!(is_same_name("Testlandia", "TESTLANDIA "));
        assert!(is_same_name("New York", "new_york"));
        assert!(!is_same_name("Testlandia", "Otherland"));
    }

    #[test]
    fn test_display_small_words_and_stop_words() {
        let styler = NameStyler::new();
        assert_eq!(
            styler.canonicalize_for_display("the_republic_of_new_york"),
            "The Republic of New York"
        );
        assert_eq!(
            styler.canonicalize_for_display("union for the free states"),
            "Union for the Free States"
        );
        assert_eq!(styler.canonicalize_for_display("of mice"), "Of Mice");
    }

    #[test]
    fn test_display_lowercases_stop_words_from_caps_input() {
        let styler = NameStyler::new();
        assert_eq!(
            styler.canonicalize_for_display("UNION FOR THE FREE STATES"),
            "Union for the Free States"
        );
        assert_eq!(
            styler.canonicalize_for_display("REPUBLIC OF TESTLANDIA"),
            "Republic of Testlandia"
        );
    }

    #[test]
    fn test_display_lowercases_rest_of_word() {
        let styler = NameStyler::new();
        assert_eq!(styler.canonicalize_for_display("TESTLANDIA"), "Testlandia");
    }

    #[test]
    fn test_display_trailing_numerals() {
        let styler = NameStyler::new();
        assert_eq!(styler.canonicalize_for_display("testlandia ii"), "Testlandia II");
        assert_eq!(styler.canonicalize_for_display("testlandia_iii"), "Testlandia III");
        assert_eq!(styler.canonicalize_for_display("ix testlandia"), "Ix Testlandia");
    }

    #[test]
    fn test_display_wa_and_st() {
        let styler = NameStyler::new();
        assert_eq!(
            styler.canonicalize_for_display("wa mission of testlandia"),
            "WA Mission of Testlandia"
        );
        assert_eq!(
            styler.canonicalize_for_display("the wa people"),
            "The WA People"
        );
        assert_eq!(styler.canonicalize_for_display("st lucia"), "St Lucia");
    }

    #[test]
    fn test_display_exceptions_take_precedence() {
        let styler = NameStyler::with_exceptions(vec!["McTestlandia", "  ", "NERV-UN"]);
        assert_eq!(styler.exception_count(), 2);
        assert_eq!(styler.canonicalize_for_display("mctestlandia"), "McTestlandia");
        assert_eq!(styler.canonicalize_for_display("nerv-un"), "NERV-UN");
    }

    #[test]
    fn test_display_never_affects_identity() {
        let styler = NameStyler::new();
        let shown = styler.canonicalize_for_display("the wa people");
        assert_eq!(normalize(&shown), normalize("The WA People"));
        assert_ne!(shown, "the wa people");
    }
}
