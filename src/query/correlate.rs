use crate::model::{MatchKey, MatchRecord, PlayerAppearance};
use std::collections::HashSet;

/// Distinct (date, opponent) keys among the given appearances
pub fn match_keys(players: &[PlayerAppearance]) -> HashSet<MatchKey> {
    players.iter().map(PlayerAppearance::key).collect()
}

/// Matches the filtered appearances took part in.
///
/// Inner join on (date, opponent): each match whose key shows up among the
/// appearances is returned once, in match-table order. Appearances with no
/// match row are dropped.
pub fn correlate(filtered_players: &[PlayerAppearance], all_matches: &[MatchRecord]) -> Vec<MatchRecord> {
    let keys = match_keys(filtered_players);
    let mut emitted: HashSet<MatchKey> = HashSet::new();
    let mut out = Vec::new();

    for m in all_matches {
        let key = m.key();
        if keys.contains(&key) && emitted.insert(key) {
            out.push(m.clone());
        }
    }

    if out.len() < keys.len() {
        log::debug!(
            "{} appearance keys have no match row",
            keys.len() - out.len()
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::testing::{appearance, fixture};

    #[test]
    fn test_inner_join_dedupes_shared_matches() {
        let players = vec![
            appearance(2024, "2024-03-15", "U리그", "A대", "김철수"),
            appearance(2024, "2024-03-15", "U리그", "A대", "박민수"),
            appearance(2024, "2024-04-01", "U리그", "B대", "김철수"),
            // no match row for this one
            appearance(2024, "2024-05-01", "U리그", "Z대", "김철수"),
        ];
        let matches = vec![
            fixture(2024, "2024-03-15", "A대", "2:1"),
            fixture(2024, "2024-04-01", "B대", "0:0"),
            fixture(2024, "2024-04-01", "C대", "1:3"),
        ];

        let out = correlate(&players, &matches);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].opponent, "A대");
        assert_eq!(out[1].opponent, "B대");

        let keys = match_keys(&players);
        assert!(out.iter().all(|m| keys.contains(&m.key())));
    }

    #[test]
    fn test_same_opponent_different_day_not_joined() {
        let players = vec![appearance(2024, "2024-03-15", "U리그", "A대", "김철수")];
        let matches = vec![fixture(2024, "2024-09-15", "A대", "2:1")];
        assert!(correlate(&players, &matches).is_empty());
    }

    #[test]
    fn test_joins_across_date_spellings() {
        let players = vec![appearance(2024, "2024.3.15", "U리그", "A대", "김철수")];
        let matches = vec![fixture(2024, "2024-03-15", "A대", "2:1")];
        assert_eq!(correlate(&players, &matches).len(), 1);
    }

    #[test]
    fn test_empty_players_gives_no_matches() {
        let matches = vec![fixture(2024, "2024-03-15", "A대", "2:1")];
        assert!(correlate(&[], &matches).is_empty());
    }
}
