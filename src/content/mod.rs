//! # Content Pipeline — Raw Rows to Display Models
//!
//! The rules that turn rows from the store into the exact shapes the public
//! site renders. Every function here is pure and total: malformed input never
//! errors, it falls through an ordered chain of resolution strategies that
//! terminates in a fixed default. Fetching and persistence live in [`crate::db`];
//! nothing in this module performs I/O.
//!
//! ## Module Structure
//!
//! - [`team`] — staff bios, fixed-name priority ordering
//! - [`courses`] — course cards, legacy-description fallback chains,
//!   fixed-title ordering
//! - [`programs`] — study-abroad cards, delimited-description split,
//!   per-country asset bundles
//! - [`history`] — timeline passthrough with a static fallback dataset

pub mod courses;
pub mod history;
pub mod programs;
pub mod team;

use serde::Serialize;

/// A staff card as rendered by the public team section.
///
/// `ditem2`/`ditem3` are reserved for future multi-line bios and always empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamDisplay {
    pub name: String,
    pub image: String,
    pub position: String,
    pub ditem1: String,
    pub ditem2: String,
    pub ditem3: String,
}

/// A course card. All four resolved fields are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseDisplay {
    pub name: String,
    pub duration: String,
    pub image: String,
    #[serde(rename = "levelItem1")]
    pub level_item1: String,
    #[serde(rename = "levelItem2")]
    pub level_item2: String,
}

/// A study-abroad card with the split description and resolved asset bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramDisplay {
    pub country: String,
    pub description: String,
    pub universities: String,
    pub image: String,
    pub dotbg: String,
}

/// A timeline entry, already shaped for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryDisplay {
    pub year: i32,
    pub event: String,
}

/// First non-empty trimmed value, the unit step of every fallback chain.
pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_rejects_blank_and_whitespace() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(Some(" 4 months ")), Some("4 months".to_string()));
    }
}
