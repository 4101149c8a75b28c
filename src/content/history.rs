//! History passthrough — timeline rows with a static fallback dataset.
//!
//! Rows arrive already shaped for display (ordering is done by the store
//! query). The one rule here is the availability fallback: when the store
//! has no rows, the public page substitutes the fixed founding timeline
//! wholesale, so the history section never renders empty.

use super::HistoryDisplay;
use crate::db::HistoryRow;

/// Founding timeline shown until real history rows exist.
pub const STATIC_TIMELINE: [(i32, &str); 5] = [
    (2009, "Opened as a two-room language school with a single General English group."),
    (2012, "First IELTS preparation cohort graduated with band scores above the national average."),
    (2015, "Study-abroad placement desk opened, sending the first students to partner campuses in Malaysia."),
    (2019, "Placed the one-thousandth student into a degree program abroad."),
    (2023, "Moved to the new campus with a dedicated admissions and visa support centre."),
];

/// Shape rows for display, substituting the static timeline when empty.
///
/// The substitution is wholesale, never a merge: either the store's rows or
/// the static dataset, verbatim.
pub fn timeline(rows: Vec<HistoryRow>) -> Vec<HistoryDisplay> {
    if rows.is_empty() {
        return static_timeline();
    }
    rows.into_iter()
        .map(|row| HistoryDisplay { year: row.year, event: row.event })
        .collect()
}

/// The static fallback timeline as display entries, in declaration order.
pub fn static_timeline() -> Vec<HistoryDisplay> {
    STATIC_TIMELINE
        .iter()
        .map(|(year, event)| HistoryDisplay { year: *year, event: event.to_string() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(year: i32, event: &str) -> HistoryRow {
        HistoryRow { id: 0, year, event: event.to_string(), created_at: Utc::now() }
    }

    #[test]
    fn empty_input_substitutes_the_static_timeline_verbatim() {
        let out = timeline(Vec::new());
        assert_eq!(out.len(), 5);
        for (entry, (year, event)) in out.iter().zip(STATIC_TIMELINE.iter()) {
            assert_eq!(entry.year, *year);
            assert_eq!(entry.event, *event);
        }
    }

    #[test]
    fn any_real_row_suppresses_the_static_timeline() {
        let out = timeline(vec![row(2024, "Opened a second branch.")]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].year, 2024);
        assert_eq!(out[0].event, "Opened a second branch.");
    }

    #[test]
    fn rows_pass_through_in_input_order() {
        let out = timeline(vec![row(2010, "a"), row(2008, "b"), row(2012, "c")]);
        let years: Vec<i32> = out.into_iter().map(|e| e.year).collect();
        assert_eq!(years, [2010, 2008, 2012]);
    }
}
