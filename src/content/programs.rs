//! Study-abroad transformer — delimited-description split and country assets.
//!
//! Program rows overload a single `description` column with two logical
//! values, stored as `"<main description>|<universities text>"`. The split
//! runs a strict priority chain: first-`|` split, then trailing-clause
//! patterns, then a sentence boundary before a recognized trigger token,
//! then placeholders. [`join_description`] is the inverse the admin write
//! path applies before persisting.
//!
//! Cards are rendered in store insertion order; unlike team and courses there
//! is no editorial re-sort.

use std::sync::LazyLock;

use regex::Regex;

use super::{non_empty, ProgramDisplay};
use crate::db::ProgramRow;

/// Shown when no universities clause can be recovered from a description.
pub const UNIVERSITIES_PLACEHOLDER: &str = "Contact us for more information";

/// Shown when a description is blank after all split attempts.
pub const DESCRIPTION_PLACEHOLDER: &str = "Study opportunities available";

/// Background image and decorative overlay for a destination country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryAssets {
    pub background: &'static str,
    pub dotbg: &'static str,
}

/// Static asset bundles for the six destination countries.
///
/// The first entry doubles as the fallback for unrecognized countries; the
/// fallback key itself is configurable via `Config::fallback_country`.
const COUNTRY_ASSETS: [(&str, CountryAssets); 6] = [
    ("China", CountryAssets { background: "/china.jpg", dotbg: "/dotbg1.svg" }),
    ("South Korea", CountryAssets { background: "/korea.jpg", dotbg: "/dotbg2.svg" }),
    ("Malaysia", CountryAssets { background: "/malaysia.jpg", dotbg: "/dotbg3.svg" }),
    ("Singapore", CountryAssets { background: "/singapore.jpg", dotbg: "/dotbg1.svg" }),
    ("Australia", CountryAssets { background: "/australia.jpg", dotbg: "/dotbg2.svg" }),
    ("United Kingdom", CountryAssets { background: "/uk.jpg", dotbg: "/dotbg3.svg" }),
];

/// Asset bundle for a country, falling back to `fallback`'s bundle (and
/// finally to the first map entry) when the country is unrecognized.
pub fn assets_for(country: &str, fallback: &str) -> CountryAssets {
    let lookup = |key: &str| {
        COUNTRY_ASSETS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, assets)| *assets)
    };
    lookup(country.trim())
        .or_else(|| lookup(fallback))
        .unwrap_or(COUNTRY_ASSETS[0].1)
}

/// Trailing universities clauses: counted-institution phrases or known
/// university-name fragments confined to the final sentence.
static TRAILING_CLAUSES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(
            r"(?i)\d+\+?\s+(?:universities|colleges)(?:\s+and\s+(?:universities|colleges))?[^.!?]*[.!?]?\s*$",
        )
        .expect("counted-institution pattern is valid"),
        Regex::new(r"(?:James Cook|Sejong|INTI)[^.!?]*[.!?]?\s*$")
            .expect("university-fragment pattern is valid"),
        Regex::new(r"University of [^.!?]*[.!?]?\s*$").expect("university-of pattern is valid"),
    ]
});

/// Tokens that mark the start of a universities clause mid-string.
static TRIGGER_TOKENS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+\+|James Cook|Sejong|INTI|University of")
        .expect("trigger-token pattern is valid")
});

/// Substitute the description placeholder for a blank parsed description.
fn finalize(description: &str, universities: &str) -> (String, String) {
    let description = if description.is_empty() {
        DESCRIPTION_PLACEHOLDER.to_string()
    } else {
        description.to_string()
    };
    (description, universities.to_string())
}

/// Split an overloaded description into `(description, universities)`.
///
/// Strategies, in strict priority order:
/// 1. Split on the first `|`, both halves trimmed. Taken verbatim: this arm
///    is the exact inverse of [`join_description`] and performs no
///    placeholder substitution.
/// 2. A trailing-clause pattern anchored at the string's end: the matched
///    suffix becomes `universities`.
/// 3. A sentence boundary immediately preceding a trigger token: the text
///    before the boundary becomes the description.
/// 4. No split is possible: the whole string is the description and
///    `universities` gets the contact placeholder.
pub fn split_description(raw: &str) -> (String, String) {
    if let Some(idx) = raw.find('|') {
        return (raw[..idx].trim().to_string(), raw[idx + 1..].trim().to_string());
    }
    for pattern in TRAILING_CLAUSES.iter() {
        if let Some(m) = pattern.find(raw) {
            return finalize(raw[..m.start()].trim(), raw[m.start()..].trim());
        }
    }
    if let Some(m) = TRIGGER_TOKENS.find(raw) {
        if let Some(boundary) = raw[..m.start()].rfind(['.', '!', '?']) {
            return finalize(raw[..=boundary].trim(), raw[boundary + 1..].trim());
        }
    }
    finalize(raw.trim(), UNIVERSITIES_PLACEHOLDER)
}

/// Inverse of [`split_description`] step 1, applied by the admin write path.
pub fn join_description(description: &str, universities: &str) -> String {
    format!("{}|{}", description, universities)
}

/// Map raw program rows to display cards, splitting descriptions and
/// resolving per-country assets. Insertion order is preserved.
pub fn transform_programs(rows: Vec<ProgramRow>, fallback_country: &str) -> Vec<ProgramDisplay> {
    rows.into_iter()
        .map(|row| {
            let (description, universities) =
                split_description(row.description.as_deref().unwrap_or(""));
            let assets = assets_for(&row.country, fallback_country);
            ProgramDisplay {
                description,
                universities,
                image: non_empty(row.image.as_deref())
                    .unwrap_or_else(|| assets.background.to_string()),
                dotbg: assets.dotbg.to_string(),
                country: row.country,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(country: &str, description: &str) -> ProgramRow {
        ProgramRow {
            id: 0,
            program_name: None,
            country: country.to_string(),
            description: Some(description.to_string()),
            image: None,
            link: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn pipe_delimited_description_splits_on_first_pipe() {
        let (d, u) = split_description("World-class education|220+ universities and colleges");
        assert_eq!(d, "World-class education");
        assert_eq!(u, "220+ universities and colleges");
    }

    #[test]
    fn only_the_first_pipe_is_a_separator() {
        let (d, u) = split_description("a|b|c");
        assert_eq!(d, "a");
        assert_eq!(u, "b|c");
    }

    #[test]
    fn trailing_counted_clause_is_recovered() {
        let (d, u) = split_description("Strong engineering schools. 40+ universities to choose from.");
        assert_eq!(d, "Strong engineering schools.");
        assert_eq!(u, "40+ universities to choose from.");
    }

    #[test]
    fn trailing_university_fragment_is_recovered() {
        let (d, u) = split_description("Tropical campuses. James Cook University Singapore");
        assert_eq!(d, "Tropical campuses.");
        assert_eq!(u, "James Cook University Singapore");
    }

    #[test]
    fn trigger_token_after_sentence_boundary_splits_there() {
        let (d, u) = split_description(
            "Affordable tuition and scholarships! Sejong, Yonsei and 30 partner campuses await you",
        );
        assert_eq!(d, "Affordable tuition and scholarships!");
        assert_eq!(u, "Sejong, Yonsei and 30 partner campuses await you");
    }

    #[test]
    fn counted_trigger_mid_string_splits_at_preceding_boundary() {
        let (d, u) = split_description("Great schools. 500+ options across two cities");
        assert_eq!(d, "Great schools.");
        assert_eq!(u, "500+ options across two cities");
    }

    #[test]
    fn trigger_without_preceding_boundary_falls_through_to_placeholder() {
        let (d, u) = split_description("Meet James Cook University staff. Visit our office.");
        assert_eq!(d, "Meet James Cook University staff. Visit our office.");
        assert_eq!(u, UNIVERSITIES_PLACEHOLDER);
    }

    #[test]
    fn degenerate_input_keeps_description_and_fills_placeholder() {
        let (d, u) = split_description("A warm and welcoming destination");
        assert_eq!(d, "A warm and welcoming destination");
        assert_eq!(u, UNIVERSITIES_PLACEHOLDER);
    }

    #[test]
    fn blank_description_gets_both_placeholders() {
        let (d, u) = split_description("   ");
        assert_eq!(d, DESCRIPTION_PLACEHOLDER);
        assert_eq!(u, UNIVERSITIES_PLACEHOLDER);
    }

    #[test]
    fn join_then_split_round_trips() {
        let joined = join_description("World-class education", "220+ universities and colleges");
        assert_eq!(
            split_description(&joined),
            (
                "World-class education".to_string(),
                "220+ universities and colleges".to_string()
            )
        );
    }

    #[test]
    fn known_country_gets_its_bundle() {
        let assets = assets_for("Malaysia", "China");
        assert_eq!(assets.background, "/malaysia.jpg");
    }

    #[test]
    fn unknown_country_falls_back_to_china_bundle() {
        let cards = transform_programs(vec![row("Brazil", "Sun and samba")], "China");
        assert_eq!(cards[0].image, "/china.jpg");
        assert_eq!(cards[0].dotbg, "/dotbg1.svg");
        assert_eq!(cards[0].country, "Brazil");
    }

    #[test]
    fn configured_fallback_country_overrides_the_default() {
        let assets = assets_for("Brazil", "Australia");
        assert_eq!(assets.background, "/australia.jpg");
    }

    #[test]
    fn explicit_image_overrides_country_background_but_not_dotbg() {
        let mut r = row("Singapore", "City campus|NUS and more");
        r.image = Some("/custom-banner.jpg".to_string());
        let cards = transform_programs(vec![r], "China");
        assert_eq!(cards[0].image, "/custom-banner.jpg");
        assert_eq!(cards[0].dotbg, "/dotbg1.svg");
    }

    #[test]
    fn insertion_order_is_preserved() {
        let cards = transform_programs(
            vec![row("Australia", "a|b"), row("China", "c|d"), row("Malaysia", "e|f")],
            "China",
        );
        let countries: Vec<String> = cards.into_iter().map(|c| c.country).collect();
        assert_eq!(countries, ["Australia", "China", "Malaysia"]);
    }
}
