//! Row layouts for showing records in tables (terminal and spreadsheet)

use crate::model::{MatchRecord, PlayerAppearance};
use crate::query::{MatchLogEntry, RankingRow, YearLine};
use std::fmt;

/// One table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    fn text<S: Into<String>>(s: S) -> Cell {
        Cell::Text(s.into())
    }

    fn count(n: u32) -> Cell {
        Cell::Number(n as f64)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Number(n) => write!(f, "{}", n),
        }
    }
}

pub const PLAYER_HEADERS: [&str; 12] = [
    "연도", "대회명", "날짜", "상대팀", "선수명", "선발/교체",
    "출전시간", "득점", "도움", "MOM", "경고", "비고",
];

pub const MATCH_HEADERS: [&str; 9] = [
    "연도", "대회명", "라운드", "날짜", "상대팀", "스코어", "득점자", "MOM", "비고",
];

pub const RANKING_HEADERS: [&str; 6] = ["순위", "선수명", "출전", "득점", "도움", "MOM"];

pub fn player_row(p: &PlayerAppearance) -> Vec<Cell> {
    vec![
        Cell::Number(p.year as f64),
        Cell::text(p.tournament.as_str()),
        Cell::text(p.match_date.to_string()),
        Cell::text(p.opponent.as_str()),
        Cell::text(p.player_name.as_str()),
        Cell::text(p.role.map(|r| r.label()).unwrap_or("")),
        Cell::count(p.minutes_played),
        Cell::count(p.goals),
        Cell::count(p.assists),
        Cell::text(p.mom_display()),
        Cell::count(p.cautions),
        Cell::text(p.note.as_deref().unwrap_or("")),
    ]
}

pub fn match_row(m: &MatchRecord) -> Vec<Cell> {
    vec![
        Cell::Number(m.year as f64),
        Cell::text(m.tournament.as_str()),
        Cell::text(m.round.as_str()),
        Cell::text(m.match_date.to_string()),
        Cell::text(m.opponent.as_str()),
        Cell::text(m.score.as_str()),
        Cell::text(m.scorers.as_str()),
        Cell::text(m.man_of_match.as_str()),
        Cell::text(m.note.as_deref().unwrap_or("")),
    ]
}

pub fn ranking_row(r: &RankingRow) -> Vec<Cell> {
    vec![
        Cell::Number(r.rank as f64),
        Cell::text(r.tally.name.as_str()),
        Cell::count(r.tally.appearances),
        Cell::count(r.tally.goals),
        Cell::count(r.tally.assists),
        Cell::count(r.tally.mom),
    ]
}

/// Headers for the per-year breakdown; the fifth column follows the keeper flag
pub fn year_headers(goalkeeper: bool) -> [&'static str; 7] {
    let secondary = if goalkeeper { "실점" } else { "도움" };
    ["연도", "출전", "선발", "교체", "득점", secondary, "MOM"]
}

pub fn year_row(y: &YearLine) -> Vec<Cell> {
    vec![
        Cell::Number(y.year as f64),
        Cell::count(y.stats.appearances),
        Cell::count(y.stats.starts),
        Cell::count(y.stats.substitutes),
        Cell::count(y.stats.goals),
        Cell::count(y.secondary.value()),
        Cell::count(y.stats.mom),
    ]
}

pub fn match_log_headers(goalkeeper: bool) -> [&'static str; 9] {
    let secondary = if goalkeeper { "실점" } else { "도움" };
    ["날짜", "대회명", "상대팀", "선발/교체", "출전시간", "득점", secondary, "MOM", "비고"]
}

pub fn match_log_row(e: &MatchLogEntry, goalkeeper: bool) -> Vec<Cell> {
    let p = &e.appearance;
    let secondary = if goalkeeper { p.goals_conceded } else { p.assists };
    vec![
        Cell::text(p.match_date.to_string()),
        Cell::text(p.tournament.as_str()),
        Cell::text(p.opponent.as_str()),
        Cell::text(p.role.map(|r| r.label()).unwrap_or("")),
        Cell::text(e.minutes.as_str()),
        Cell::count(p.goals),
        Cell::count(secondary),
        Cell::text(e.mom_display()),
        Cell::text(p.note.as_deref().unwrap_or("")),
    ]
}

/// Render rows as tab-separated text
pub fn to_tsv(headers: &[&str], rows: &[Vec<Cell>]) -> String {
    let mut out = headers.join("\t");
    out.push('\n');
    for row in rows {
        let line: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        out.push_str(&line.join("\t"));
        out.push('\n');
    }
    out
}
