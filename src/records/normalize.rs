//! Coerce raw sheet rows into typed records.
//!
//! Year is strict: a row whose year can't be read fails the whole load.
//! Stat columns are lenient: anything unreadable counts as 0.

use super::reader::{MATCH_TABLE, PLAYER_TABLE};
use super::tables::{MatchRow, PlayerRow};
use crate::error::{RecordsError, Result};
use crate::model::{MatchDate, MatchKey, MatchRecord, PlayerAppearance, Role};
use std::collections::HashSet;

/// Normalize both sheets
pub fn normalize(
    player_rows: &[PlayerRow],
    match_rows: &[MatchRow],
) -> Result<(Vec<PlayerAppearance>, Vec<MatchRecord>)> {
    let players = normalize_players(player_rows)?;
    let matches = normalize_matches(match_rows)?;
    Ok((players, matches))
}

pub fn normalize_players(rows: &[PlayerRow]) -> Result<Vec<PlayerAppearance>> {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| -> Result<PlayerAppearance> {
            Ok(PlayerAppearance {
                year: parse_year(row.year.as_deref(), PLAYER_TABLE, idx + 1)?,
                match_date: MatchDate::parse(text(&row.date)),
                tournament: text(&row.tournament).to_string(),
                opponent: text(&row.opponent).to_string(),
                player_name: text(&row.player).to_string(),
                role: Role::from_str(text(&row.role)),
                minutes_played: parse_count(row.minutes.as_deref()),
                goals: parse_count(row.goals.as_deref()),
                assists: parse_count(row.assists.as_deref()),
                goals_conceded: parse_count(row.goals_conceded.as_deref()),
                man_of_match: parse_flag(row.mom.as_deref()),
                cautions: parse_count(row.cautions.as_deref()),
                note: optional_text(&row.note),
            })
        })
        .collect()
}

pub fn normalize_matches(rows: &[MatchRow]) -> Result<Vec<MatchRecord>> {
    let matches = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| -> Result<MatchRecord> {
            Ok(MatchRecord {
                year: parse_year(row.year.as_deref(), MATCH_TABLE, idx + 1)?,
                tournament: text(&row.tournament).to_string(),
                round: text(&row.round).to_string(),
                match_date: MatchDate::parse(text(&row.date)),
                opponent: text(&row.opponent).to_string(),
                score: text(&row.score).to_string(),
                scorers: text(&row.scorers).to_string(),
                man_of_match: text(&row.mom).to_string(),
                note: optional_text(&row.note),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    for key in duplicate_keys(&matches) {
        log::warn!(
            "Duplicate match key {} vs {} in match table",
            key.date,
            key.opponent
        );
    }

    Ok(matches)
}

/// (date, opponent) pairs that appear on more than one match row
pub fn duplicate_keys(matches: &[MatchRecord]) -> Vec<MatchKey> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut dups = Vec::new();
    for m in matches {
        let key = m.key();
        if !seen.insert(key.clone()) && reported.insert(key.clone()) {
            dups.push(key);
        }
    }
    dups
}

fn text(cell: &Option<String>) -> &str {
    cell.as_deref().map(str::trim).unwrap_or("")
}

fn optional_text(cell: &Option<String>) -> Option<String> {
    let s = text(cell);
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Parse a year cell; "2024" and spreadsheet-style "2024.0" are accepted
fn parse_year(cell: Option<&str>, table: &'static str, row: usize) -> Result<i32> {
    let raw = cell.unwrap_or("").trim();
    let year = raw.parse::<i32>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i32::MAX as f64)
            .map(|f| f as i32)
    });

    year.ok_or_else(|| RecordsError::InvalidYear {
        table,
        row,
        value: raw.to_string(),
    })
}

/// Parse a non-negative stat; anything unreadable is 0
pub fn parse_count(cell: Option<&str>) -> u32 {
    let raw = match cell.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return 0,
    };

    if let Ok(n) = raw.parse::<u32>() {
        return n;
    }

    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 => f.min(u32::MAX as f64) as u32,
        _ => {
            log::trace!("Treating stat '{}' as 0", raw);
            0
        }
    }
}

/// Parse the per-appearance MOM flag
pub fn parse_flag(cell: Option<&str>) -> bool {
    let raw = cell.unwrap_or("").trim();
    match raw.to_lowercase().as_str() {
        "true" | "y" | "yes" | "o" | "★" | "⭐" => true,
        _ => parse_count(Some(raw)) > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_row(year: &str, name: &str) -> PlayerRow {
        PlayerRow {
            year: Some(year.to_string()),
            date: Some("2024-03-15".to_string()),
            tournament: Some("U리그".to_string()),
            opponent: Some("A대".to_string()),
            player: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(Some("3")), 3);
        assert_eq!(parse_count(Some(" 2.0 ")), 2);
        assert_eq!(parse_count(Some("")), 0);
        assert_eq!(parse_count(None), 0);
        assert_eq!(parse_count(Some("abc")), 0);
        assert_eq!(parse_count(Some("-1")), 0);
        assert_eq!(parse_count(Some("NaN")), 0);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag(Some("1")));
        assert!(parse_flag(Some("1.0")));
        assert!(parse_flag(Some("⭐")));
        assert!(parse_flag(Some("TRUE")));
        assert!(!parse_flag(Some("0")));
        assert!(!parse_flag(Some("")));
        assert!(!parse_flag(None));
    }

    #[test]
    fn test_normalize_players_defaults() {
        let mut row = player_row("2024", "김철수");
        row.goals = Some("two".to_string());
        row.assists = Some("1".to_string());
        row.role = Some("선발".to_string());
        row.note = Some("  ".to_string());

        let players = normalize_players(&[row]).unwrap();
        let p = &players[0];
        assert_eq!(p.year, 2024);
        assert_eq!(p.goals, 0);
        assert_eq!(p.assists, 1);
        assert_eq!(p.minutes_played, 0);
        assert_eq!(p.role, Some(Role::Starter));
        assert_eq!(p.note, None);
        assert!(p.match_date.is_calendar_date());
    }

    #[test]
    fn test_year_is_strict() {
        let rows = vec![player_row("2024", "a"), player_row("twenty", "b")];
        let err = normalize_players(&rows).unwrap_err();
        match err {
            RecordsError::InvalidYear { table, row, value } => {
                assert_eq!(table, "player");
                assert_eq!(row, 2);
                assert_eq!(value, "twenty");
            }
            other => panic!("unexpected error: {other}"),
        }

        let rows = vec![player_row("", "a")];
        assert!(normalize_players(&rows).is_err());

        let rows = vec![player_row("2023.0", "a")];
        assert_eq!(normalize_players(&rows).unwrap()[0].year, 2023);
    }

    #[test]
    fn test_duplicate_match_keys() {
        let row = MatchRow {
            year: Some("2024".to_string()),
            date: Some("2024-03-15".to_string()),
            opponent: Some("A대".to_string()),
            score: Some("1:0".to_string()),
            ..Default::default()
        };
        let matches = normalize_matches(&[row.clone(), row.clone(), row]).unwrap();
        assert_eq!(matches.len(), 3);
        assert_eq!(duplicate_keys(&matches).len(), 1);
    }

    #[test]
    fn test_duplicate_keys_reported_once_in_table_order() {
        let row = |date: &str, opponent: &str| MatchRow {
            year: Some("2024".to_string()),
            date: Some(date.to_string()),
            opponent: Some(opponent.to_string()),
            score: Some("1:0".to_string()),
            ..Default::default()
        };
        let rows = vec![
            row("2024-06-20", "B대"),
            row("2024-03-15", "A대"),
            row("2024-06-20", "B대"),
            row("2024.3.15", "A대"),
            row("2024-06-20", "B대"),
            row("2024-07-01", "C대"),
        ];
        let keys = duplicate_keys(&normalize_matches(&rows).unwrap());
        let opponents: Vec<&str> = keys.iter().map(|k| k.opponent.as_str()).collect();
        assert_eq!(opponents, vec!["B대", "A대"]);
    }
}
