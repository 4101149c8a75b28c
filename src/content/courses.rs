//! Course transformer — field-resolution fallback chains and fixed-title ordering.
//!
//! Course rows carry a migration artifact: older rows encode duration and
//! levels inside the free-text `description`, newer rows have explicit
//! columns. Each display field resolves through an ordered chain of
//! `Option`-returning steps, short-circuiting on the first success and
//! terminating in a fixed default, so the transformer never emits an empty
//! `duration`, `image`, `levelItem1`, or `levelItem2`.
//!
//! The inverse transform ([`encode_legacy_description`]) is what the admin
//! write path stores back into `description` for read-compatibility with
//! pre-migration rows.

use std::sync::LazyLock;

use regex::Regex;

use super::{non_empty, CourseDisplay};
use crate::db::CourseRow;

/// Canonical catalog order for the public course section.
pub const COURSE_ORDER: [&str; 3] = ["General English", "IELTS Preparation", "Academic English"];

/// Static asset per canonical title; also consulted by `category`.
const COURSE_IMAGES: [(&str, &str); 3] = [
    ("General English", "/classroom2.svg"),
    ("IELTS Preparation", "/classroom1.png"),
    ("Academic English", "/office.svg"),
];

/// Final image fallback when neither title nor category is recognized.
pub const DEFAULT_COURSE_IMAGE: &str = "/classroom2.svg";

/// Link placeholder written by the admin form; course cards are not linked yet.
pub const COURSE_LINK_PLACEHOLDER: &str = "#";

const DEFAULT_DURATION: &str = "4 months";
const DEFAULT_LEVEL_ITEM1: &str = "Research methodology";
const DEFAULT_LEVEL_ITEM2: &str = "Academic writing";

/// Level vocabulary recognized inside legacy descriptions. "Upper Intermediate"
/// precedes "Intermediate" so the longer phrase is claimed first.
const LEVEL_VOCABULARY: [&str; 4] = ["Beginner", "Upper Intermediate", "Intermediate", "Advanced"];

static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d+)\s*months?\b").expect("duration pattern is valid"));

/// Extract a normalized `"<N> months"` duration from a legacy description.
fn duration_from_description(description: &str) -> Option<String> {
    DURATION_RE
        .captures(description)
        .map(|caps| format!("{} months", &caps[1]))
}

/// Levels present in a legacy description, in vocabulary order.
///
/// Matched phrases are removed before later checks so "Upper Intermediate"
/// is never double-counted as "Intermediate".
fn levels_from_description(description: &str) -> Vec<&'static str> {
    let mut remaining = description.to_string();
    let mut found = Vec::new();
    for level in LEVEL_VOCABULARY {
        if remaining.contains(level) {
            found.push(level);
            remaining = remaining.replace(level, "");
        }
    }
    found
}

/// Resolve the display duration: explicit column, then legacy extraction,
/// then the fixed default.
pub fn resolve_duration(duration: Option<&str>, description: &str) -> String {
    non_empty(duration)
        .or_else(|| duration_from_description(description))
        .unwrap_or_else(|| DEFAULT_DURATION.to_string())
}

fn image_for_key(key: &str) -> Option<String> {
    COURSE_IMAGES
        .iter()
        .find(|(title, _)| *title == key.trim())
        .map(|(_, asset)| asset.to_string())
}

/// Resolve the card image: explicit column, title-keyed asset, category-keyed
/// asset, then the default asset.
pub fn resolve_image(image: Option<&str>, title: &str, category: Option<&str>) -> String {
    non_empty(image)
        .or_else(|| image_for_key(title))
        .or_else(|| category.and_then(image_for_key))
        .unwrap_or_else(|| DEFAULT_COURSE_IMAGE.to_string())
}

/// Resolve both level items: explicit columns, then legacy extraction, then
/// the academic-track defaults.
pub fn resolve_levels(
    levelitem1: Option<&str>,
    levelitem2: Option<&str>,
    description: &str,
) -> (String, String) {
    let extracted = levels_from_description(description);
    let first = non_empty(levelitem1)
        .or_else(|| extracted.first().map(|l| l.to_string()))
        .unwrap_or_else(|| DEFAULT_LEVEL_ITEM1.to_string());
    let second = non_empty(levelitem2)
        .or_else(|| extracted.get(1).map(|l| l.to_string()))
        .unwrap_or_else(|| DEFAULT_LEVEL_ITEM2.to_string());
    (first, second)
}

/// Catalog rank of a title; unmatched titles rank after the fixed list.
fn rank(title: &str) -> usize {
    COURSE_ORDER
        .iter()
        .position(|known| *known == title)
        .unwrap_or(COURSE_ORDER.len())
}

/// Map raw course rows to display cards and apply the fixed-title ordering.
pub fn transform_courses(rows: Vec<CourseRow>) -> Vec<CourseDisplay> {
    let mut cards: Vec<CourseDisplay> = rows
        .into_iter()
        .map(|row| {
            let description = row.description.as_deref().unwrap_or("");
            let (level_item1, level_item2) = resolve_levels(
                row.levelitem1.as_deref(),
                row.levelitem2.as_deref(),
                description,
            );
            CourseDisplay {
                duration: resolve_duration(row.duration.as_deref(), description),
                image: resolve_image(row.image.as_deref(), &row.title, row.category.as_deref()),
                level_item1,
                level_item2,
                name: row.title,
            }
        })
        .collect();
    cards.sort_by(|a, b| (rank(&a.name), a.name.as_str()).cmp(&(rank(&b.name), b.name.as_str())));
    cards
}

/// Inverse transform used by the admin write path: re-encode the explicit
/// fields into the legacy description format older readers expect.
pub fn encode_legacy_description(duration: &str, levelitem1: &str, levelitem2: &str) -> String {
    format!("{} - {}, {}", duration, levelitem1, levelitem2)
}
