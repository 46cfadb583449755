//! Summary statistics over a filtered subset.
//!
//! Team mode (no player chosen) summarises results and ranks players.
//! Player mode summarises the chosen players' own appearances.

use crate::model::{format_minutes, parse_score, MatchRecord, Outcome, PlayerAppearance};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;

/// Win/draw/loss tally for a set of matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeamRecord {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    /// Matches whose score couldn't be read; not part of the tally
    pub unparsed: u32,
}

impl TeamRecord {
    pub fn played(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    pub fn goal_difference(&self) -> i64 {
        self.goals_for as i64 - self.goals_against as i64
    }

    /// Percentage of decided-or-drawn matches won
    pub fn win_rate(&self) -> f64 {
        if self.played() == 0 {
            0.0
        } else {
            self.wins as f64 / self.played() as f64 * 100.0
        }
    }
}

impl fmt::Display for TeamRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}W {}D {}L, {}:{} ({:+})",
            self.wins,
            self.draws,
            self.losses,
            self.goals_for,
            self.goals_against,
            self.goal_difference()
        )
    }
}

/// Tally W/D/L and goals from the match scores
pub fn team_record(matches: &[MatchRecord]) -> TeamRecord {
    let mut record = TeamRecord::default();
    for m in matches {
        let score = parse_score(&m.score);
        match score.outcome {
            Outcome::Win => record.wins += 1,
            Outcome::Draw => record.draws += 1,
            Outcome::Loss => record.losses += 1,
            Outcome::Unknown => {
                record.unparsed += 1;
                continue;
            }
        }
        record.goals_for = record.goals_for.saturating_add(score.goals_for);
        record.goals_against = record.goals_against.saturating_add(score.goals_against);
    }
    record
}

/// Headline figures shown above every view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Headline {
    pub matches: usize,
    pub goals: u32,
    pub mom_awards: u32,
}

pub fn headline(players: &[PlayerAppearance], matches: &[MatchRecord]) -> Headline {
    Headline {
        matches: matches.len(),
        goals: players.iter().fold(0u32, |acc, p| acc.saturating_add(p.goals)),
        mom_awards: players.iter().filter(|p| p.man_of_match).count() as u32,
    }
}

/// Per-player totals used by the ranking table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayerTally {
    pub name: String,
    pub appearances: u32,
    pub goals: u32,
    pub assists: u32,
    pub mom: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingRow {
    pub rank: usize,
    pub tally: PlayerTally,
}

fn tally_by_player(players: &[PlayerAppearance]) -> BTreeMap<&str, PlayerTally> {
    let mut by_name: BTreeMap<&str, PlayerTally> = BTreeMap::new();
    for p in players {
        let t = by_name
            .entry(p.player_name.as_str())
            .or_insert_with(|| PlayerTally {
                name: p.player_name.clone(),
                ..Default::default()
            });
        t.appearances += 1;
        t.goals = t.goals.saturating_add(p.goals);
        t.assists = t.assists.saturating_add(p.assists);
        t.mom += p.man_of_match as u32;
    }
    by_name
}

/// Players ranked by goals, then appearances, then name
pub fn ranking_table(players: &[PlayerAppearance]) -> Vec<RankingRow> {
    let mut tallies: Vec<PlayerTally> = tally_by_player(players).into_values().collect();
    tallies.sort_by(|a, b| {
        (Reverse(a.goals), Reverse(a.appearances), &a.name)
            .cmp(&(Reverse(b.goals), Reverse(b.appearances), &b.name))
    });

    tallies
        .into_iter()
        .enumerate()
        .map(|(i, tally)| RankingRow { rank: i + 1, tally })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopMom {
    pub name: String,
    pub count: u32,
}

/// Player with the most MOM awards; equal counts go to the name that sorts first
pub fn top_mom(players: &[PlayerAppearance]) -> Option<TopMom> {
    let mut best: Option<TopMom> = None;
    for (name, tally) in tally_by_player(players) {
        if tally.mom > best.as_ref().map_or(0, |b| b.count) {
            best = Some(TopMom {
                name: name.to_string(),
                count: tally.mom,
            });
        }
    }
    best
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamSummary {
    pub record: TeamRecord,
    pub top_mom: Option<TopMom>,
    pub ranking: Vec<RankingRow>,
}

pub fn team_summary(players: &[PlayerAppearance], matches: &[MatchRecord]) -> TeamSummary {
    TeamSummary {
        record: team_record(matches),
        top_mom: top_mom(players),
        ranking: ranking_table(players),
    }
}

/// Assists for outfield players, goals conceded for goalkeepers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryStat {
    Assists(u32),
    GoalsConceded(u32),
}

impl SecondaryStat {
    pub fn label(&self) -> &'static str {
        match self {
            SecondaryStat::Assists(_) => "Assists",
            SecondaryStat::GoalsConceded(_) => "Conceded",
        }
    }

    pub fn value(&self) -> u32 {
        match self {
            SecondaryStat::Assists(n) | SecondaryStat::GoalsConceded(n) => *n,
        }
    }
}

/// Summed stats over a group of appearances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatLine {
    pub appearances: u32,
    pub starts: u32,
    pub substitutes: u32,
    pub goals: u32,
    pub assists: u32,
    pub goals_conceded: u32,
    pub mom: u32,
    pub minutes: u32,
    pub cautions: u32,
}

impl StatLine {
    pub fn add(&mut self, p: &PlayerAppearance) {
        self.appearances += 1;
        self.starts += p.is_starter() as u32;
        self.substitutes += p.is_substitute() as u32;
        // Cells are clamped to u32::MAX on load, so totals saturate too
        self.goals = self.goals.saturating_add(p.goals);
        self.assists = self.assists.saturating_add(p.assists);
        self.goals_conceded = self.goals_conceded.saturating_add(p.goals_conceded);
        self.mom += p.man_of_match as u32;
        self.minutes = self.minutes.saturating_add(p.minutes_played);
        self.cautions = self.cautions.saturating_add(p.cautions);
    }

    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a PlayerAppearance>,
    {
        let mut line = StatLine::default();
        for p in rows {
            line.add(p);
        }
        line
    }

    pub fn secondary(&self, goalkeeper: bool) -> SecondaryStat {
        if goalkeeper {
            SecondaryStat::GoalsConceded(self.goals_conceded)
        } else {
            SecondaryStat::Assists(self.assists)
        }
    }
}

/// Goalkeeper if the group conceded at least one goal across its rows
pub fn is_goalkeeper(players: &[PlayerAppearance]) -> bool {
    players.iter().any(|p| p.goals_conceded > 0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearLine {
    pub year: i32,
    pub stats: StatLine,
    pub secondary: SecondaryStat,
}

/// Stats per season, newest first
pub fn year_breakdown(players: &[PlayerAppearance], goalkeeper: bool) -> Vec<YearLine> {
    let mut by_year: BTreeMap<i32, StatLine> = BTreeMap::new();
    for p in players {
        by_year.entry(p.year).or_default().add(p);
    }
    by_year
        .into_iter()
        .rev()
        .map(|(year, stats)| YearLine {
            year,
            stats,
            secondary: stats.secondary(goalkeeper),
        })
        .collect()
}

/// One line of a player's match log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchLogEntry {
    pub appearance: PlayerAppearance,
    /// e.g. "90'"
    pub minutes: String,
    pub man_of_match: bool,
}

impl MatchLogEntry {
    pub fn mom_display(&self) -> &'static str {
        self.appearance.mom_display()
    }
}

/// The appearances themselves, most recent first
pub fn match_log(players: &[PlayerAppearance]) -> Vec<MatchLogEntry> {
    let mut rows: Vec<&PlayerAppearance> = players.iter().collect();
    rows.sort_by(|a, b| b.match_date.cmp(&a.match_date));
    rows.into_iter()
        .map(|p| MatchLogEntry {
            appearance: p.clone(),
            minutes: format_minutes(p.minutes_played),
            man_of_match: p.man_of_match,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSummary {
    /// The chosen players, in name order
    pub players: Vec<String>,
    pub goalkeeper: bool,
    pub totals: StatLine,
    pub secondary: SecondaryStat,
    /// Present only when no year filter is applied
    pub by_year: Option<Vec<YearLine>>,
    pub match_log: Vec<MatchLogEntry>,
}

/// Summarise the chosen players' appearances
pub fn player_summary(players: &[PlayerAppearance], selected: &[String], year_filtered: bool) -> PlayerSummary {
    let goalkeeper = is_goalkeeper(players);
    let totals = StatLine::from_rows(players);

    PlayerSummary {
        players: selected.to_vec(),
        goalkeeper,
        totals,
        secondary: totals.secondary(goalkeeper),
        by_year: if year_filtered {
            None
        } else {
            Some(year_breakdown(players, goalkeeper))
        },
        match_log: match_log(players),
    }
}
