// 🏗️ Record Parser - raw CSV rows → typed resolution fields
//
// Two inputs, both CSV with a header row:
// - resolutions: Number,Title,Category,Sub-category,Author,Co-authors,Votes For,Votes Against,Date
// - aliases:     Player,Aliases
//
// Reading is positional (header names are not trusted, only skipped).

use crate::entities::REPEAL_CATEGORY;
use crate::error::{IngestionError, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Fields per resolution row
pub const RESOLUTION_FIELDS: usize = 9;

/// Fields per alias roster row
pub const ALIAS_FIELDS: usize = 2;

// ============================================================================
// RAW ROWS
// ============================================================================

/// One resolution row exactly as read, before any validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionRow {
    pub number: String,
    pub title: String,
    pub category: String,
    pub sub_category: String,
    pub author: String,
    /// Comma-separated, may be empty
    pub coauthors: String,
    pub votes_for: String,
    pub votes_against: String,
    /// `YYYY-MM-DD`, optionally followed by a space and a time component
    pub date: String,
}

impl ResolutionRow {
    /// Build from a CSV record. `row` is the 1-based data row (header excluded).
    pub fn from_record(row: usize, record: &StringRecord) -> Result<Self> {
        if record.len() != RESOLUTION_FIELDS {
            return Err(IngestionError::parse(
                row,
                "row",
                &record.iter().collect::<Vec<_>>().join(","),
                format!("expected {} fields, found {}", RESOLUTION_FIELDS, record.len()),
            ));
        }

        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        Ok(ResolutionRow {
            number: field(0),
            title: field(1),
            category: field(2),
            sub_category: field(3),
            author: field(4),
            coauthors: field(5),
            votes_for: field(6),
            votes_against: field(7),
            date: field(8),
        })
    }

    /// Validate and convert every scalar field.
    pub fn parse(&self, row: usize) -> Result<ParsedResolution> {
        let number = parse_count(row, "number", &self.number)?;
        let votes_for = parse_count(row, "votes_for", &self.votes_for)?;
        let votes_against = parse_count(row, "votes_against", &self.votes_against)?;
        let date = parse_date(row, &self.date)?;

        let repeal_target = if self.category == REPEAL_CATEGORY {
            Some(parse_count(row, "sub_category", &self.sub_category)?)
        } else {
            None
        };

        let author = self.author.trim();
        if author.is_empty() {
            return Err(IngestionError::parse(row, "author", &self.author, "author is empty"));
        }

        Ok(ParsedResolution {
            number,
            votes_for,
            votes_against,
            date,
            repeal_target,
            author: author.to_string(),
            coauthors: split_names(&self.coauthors),
        })
    }
}

/// Scalar fields of a resolution row after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResolution {
    pub number: u32,
    pub votes_for: u32,
    pub votes_against: u32,
    pub date: NaiveDate,
    /// Set for repeals: the number held in the sub-category field
    pub repeal_target: Option<u32>,
    pub author: String,
    pub coauthors: Vec<String>,
}

/// One alias roster row: a player and the nations they control
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRow {
    pub player: String,
    /// Comma-separated nation names
    pub aliases: String,
}

impl AliasRow {
    pub fn from_record(row: usize, record: &StringRecord) -> Result<Self> {
        if record.len() != ALIAS_FIELDS {
            return Err(IngestionError::parse(
                row,
                "row",
                &record.iter().collect::<Vec<_>>().join(","),
                format!("expected {} fields, found {}", ALIAS_FIELDS, record.len()),
            ));
        }

        let player = record.get(0).unwrap_or("").trim().to_string();
        if player.is_empty() {
            return Err(IngestionError::parse(row, "player", "", "player is empty"));
        }

        Ok(AliasRow {
            player,
            aliases: record.get(1).unwrap_or("").to_string(),
        })
    }
}

// ============================================================================
// CSV READERS
// ============================================================================

/// Read resolution rows from any reader; `origin` names the source in errors.
pub fn read_resolution_rows<R: Read>(reader: R, origin: &str) -> Result<Vec<ResolutionRow>> {
    read_records(reader, origin)?
        .iter()
        .enumerate()
        .map(|(i, record)| ResolutionRow::from_record(i + 1, record))
        .collect()
}

/// Read alias roster rows from any reader; `origin` names the source in errors.
pub fn read_alias_rows<R: Read>(reader: R, origin: &str) -> Result<Vec<AliasRow>> {
    read_records(reader, origin)?
        .iter()
        .enumerate()
        .map(|(i, record)| AliasRow::from_record(i + 1, record))
        .collect()
}

pub fn load_resolution_rows(path: &Path) -> Result<Vec<ResolutionRow>> {
    read_resolution_rows(open(path)?, &path.display().to_string())
}

pub fn load_alias_rows(path: &Path) -> Result<Vec<AliasRow>> {
    read_alias_rows(open(path)?, &path.display().to_string())
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| IngestionError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_records<R: Read>(reader: R, origin: &str) -> Result<Vec<StringRecord>> {
    // flexible: field-count problems are reported per row by from_record
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    reader
        .records()
        .map(|record| {
            record.map_err(|source| IngestionError::Csv {
                origin: origin.to_string(),
                source,
            })
        })
        .collect()
}

// ============================================================================
// FIELD PARSERS
// ============================================================================

/// Non-negative integer field
pub fn parse_count(row: usize, field: &'static str, raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|e| IngestionError::parse(row, field, raw, e))
}

/// `YYYY-MM-DD`, anything after the first space (a time of day) is dropped
pub fn parse_date(row: usize, raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    let day = trimmed.split_once(' ').map_or(trimmed, |(day, _)| day);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|e| IngestionError::parse(row, "date", raw, e))
}

/// Split a comma-separated name list, trimming and dropping empty entries
pub fn split_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
