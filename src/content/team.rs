//! Team transformer — staff rows to display cards with fixed-name ordering.
//!
//! The public team section shows staff in a fixed editorial order, not
//! insertion order. The priority list below names the seven long-standing
//! staff members; anyone not on it (new hires, guest teachers) sorts after
//! all listed members, alphabetically. The order is total and deterministic:
//! the same input set always yields the same output sequence.

use super::TeamDisplay;
use crate::db::TeamMemberRow;

/// Editorial display order for known staff. Index is the sort rank.
pub const TEAM_ORDER: [&str; 7] = [
    "Malika Yusupova",
    "Aziz Karimov",
    "Dilnoza Rashidova",
    "Jasur Abdullayev",
    "Nilufar Saidova",
    "Sherzod Umarov",
    "Kamola Nazarova",
];

/// Rank of a name in the priority list; unknown names rank after all known ones.
fn rank(name: &str) -> usize {
    TEAM_ORDER
        .iter()
        .position(|known| *known == name)
        .unwrap_or(TEAM_ORDER.len())
}

/// Map raw staff rows to display cards and apply the fixed-name ordering.
///
/// Known names come first in `TEAM_ORDER` sequence; unknown names follow,
/// alphabetically among themselves. Empty input yields empty output.
pub fn transform_team(rows: Vec<TeamMemberRow>) -> Vec<TeamDisplay> {
    let mut cards: Vec<TeamDisplay> = rows
        .into_iter()
        .map(|row| TeamDisplay {
            image: row.image.unwrap_or_default(),
            position: row.role,
            ditem1: row.bio.unwrap_or_default(),
            ditem2: String::new(),
            ditem3: String::new(),
            name: row.name,
        })
        .collect();
    cards.sort_by(|a, b| (rank(&a.name), a.name.as_str()).cmp(&(rank(&b.name), b.name.as_str())));
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(name: &str) -> TeamMemberRow {
        TeamMemberRow {
            id: 0,
            name: name.to_string(),
            role: "Teacher".to_string(),
            image: Some("/staff.jpg".to_string()),
            bio: Some("bio".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn known_names_follow_priority_list() {
        let rows = vec![row("Kamola Nazarova"), row("Malika Yusupova"), row("Jasur Abdullayev")];
        let names: Vec<String> = transform_team(rows).into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["Malika Yusupova", "Jasur Abdullayev", "Kamola Nazarova"]);
    }

    #[test]
    fn unknown_names_sort_after_known_alphabetically() {
        let rows = vec![
            row("Zafar Olimov"),
            row("Aziz Karimov"),
            row("Bekzod Yuldashev"),
            row("Nilufar Saidova"),
        ];
        let names: Vec<String> = transform_team(rows).into_iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            ["Aziz Karimov", "Nilufar Saidova", "Bekzod Yuldashev", "Zafar Olimov"]
        );
    }

    #[test]
    fn ordering_is_independent_of_input_order() {
        let forward = vec![row("Aziz Karimov"), row("Zafar Olimov"), row("Kamola Nazarova")];
        let mut backward = forward.clone();
        backward.reverse();
        assert_eq!(transform_team(forward), transform_team(backward));
    }

    #[test]
    fn role_and_bio_map_to_position_and_ditem1() {
        let mut r = row("Aziz Karimov");
        r.role = "Head of IELTS".to_string();
        r.bio = Some("Ten years of exam preparation.".to_string());
        let cards = transform_team(vec![r]);
        assert_eq!(cards[0].position, "Head of IELTS");
        assert_eq!(cards[0].ditem1, "Ten years of exam preparation.");
        assert_eq!(cards[0].ditem2, "");
        assert_eq!(cards[0].ditem3, "");
    }

    #[test]
    fn missing_image_and_bio_become_empty_strings() {
        let mut r = row("Someone New");
        r.image = None;
        r.bio = None;
        let cards = transform_team(vec![r]);
        assert_eq!(cards[0].image, "");
        assert_eq!(cards[0].ditem1, "");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(transform_team(Vec::new()).is_empty());
    }
}
