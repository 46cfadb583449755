//! Filtering of player appearances and cascading option lists.
//!
//! A selection holds a set of chosen values per dimension. Rows pass when,
//! for every non-empty dimension, their value is one of the chosen ones.
//! Option lists follow the fixed order year → date → tournament → opponent →
//! player: each dimension only offers values present after the dimensions
//! above it are applied.

use crate::model::{MatchDate, PlayerAppearance};
use std::collections::BTreeSet;
use std::fmt;

/// Filter dimensions, in cascade order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Year,
    Date,
    Tournament,
    Opponent,
    Player,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Year,
        Dimension::Date,
        Dimension::Tournament,
        Dimension::Opponent,
        Dimension::Player,
    ];

    /// Dimensions strictly above this one in the cascade
    pub fn upstream(self) -> impl Iterator<Item = Dimension> {
        Dimension::ALL.into_iter().take_while(move |d| *d != self)
    }

    pub fn from_str(s: &str) -> Option<Dimension> {
        match s.trim().to_lowercase().as_str() {
            "year" | "years" | "연도" => Some(Dimension::Year),
            "date" | "dates" | "날짜" => Some(Dimension::Date),
            "tournament" | "tournaments" | "대회명" => Some(Dimension::Tournament),
            "opponent" | "opponents" | "상대팀" => Some(Dimension::Opponent),
            "player" | "players" | "선수명" => Some(Dimension::Player),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Year => write!(f, "year"),
            Dimension::Date => write!(f, "date"),
            Dimension::Tournament => write!(f, "tournament"),
            Dimension::Opponent => write!(f, "opponent"),
            Dimension::Player => write!(f, "player"),
        }
    }
}

/// The user's chosen filter values. `FilterSelection::default()` selects everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub years: BTreeSet<i32>,
    pub dates: BTreeSet<MatchDate>,
    pub tournaments: BTreeSet<String>,
    pub opponents: BTreeSet<String>,
    pub players: BTreeSet<String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_years<I: IntoIterator<Item = i32>>(mut self, years: I) -> Self {
        self.years.extend(years);
        self
    }

    pub fn with_dates<I, S>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.dates
            .extend(dates.into_iter().map(|d| MatchDate::parse(d.as_ref())));
        self
    }

    pub fn with_tournaments<I, S>(mut self, tournaments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tournaments.extend(tournaments.into_iter().map(Into::into));
        self
    }

    pub fn with_opponents<I, S>(mut self, opponents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.opponents.extend(opponents.into_iter().map(Into::into));
        self
    }

    pub fn with_players<I, S>(mut self, players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.players.extend(players.into_iter().map(Into::into));
        self
    }

    /// Any player chosen: switches aggregation to player mode
    pub fn has_players(&self) -> bool {
        !self.players.is_empty()
    }

    pub fn has_years(&self) -> bool {
        !self.years.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        Dimension::ALL.iter().all(|d| !self.constrains(*d))
    }

    /// Whether the selection restricts this dimension
    pub fn constrains(&self, dim: Dimension) -> bool {
        match dim {
            Dimension::Year => !self.years.is_empty(),
            Dimension::Date => !self.dates.is_empty(),
            Dimension::Tournament => !self.tournaments.is_empty(),
            Dimension::Opponent => !self.opponents.is_empty(),
            Dimension::Player => !self.players.is_empty(),
        }
    }

    /// Whether a row passes the filter on a single dimension
    pub fn passes(&self, row: &PlayerAppearance, dim: Dimension) -> bool {
        match dim {
            Dimension::Year => self.years.is_empty() || self.years.contains(&row.year),
            Dimension::Date => {
                self.dates.is_empty() || self.dates.iter().any(|d| d.same_day(&row.match_date))
            }
            Dimension::Tournament => {
                self.tournaments.is_empty() || self.tournaments.contains(&row.tournament)
            }
            Dimension::Opponent => {
                self.opponents.is_empty() || self.opponents.contains(&row.opponent)
            }
            Dimension::Player => self.players.is_empty() || self.players.contains(&row.player_name),
        }
    }

    /// Whether a row passes every dimension
    pub fn matches(&self, row: &PlayerAppearance) -> bool {
        Dimension::ALL.iter().all(|d| self.passes(row, *d))
    }

    /// Whether a row passes every dimension above `dim`
    pub fn matches_upstream_of(&self, row: &PlayerAppearance, dim: Dimension) -> bool {
        dim.upstream().all(|d| self.passes(row, d))
    }

    /// Same selection without the player filter (team-mode baseline)
    pub fn without_players(&self) -> FilterSelection {
        FilterSelection {
            players: BTreeSet::new(),
            ..self.clone()
        }
    }

    /// Drop chosen values that the cascade no longer offers, top to bottom.
    ///
    /// After a change upstream (e.g. a different year) stale downstream picks
    /// would otherwise filter everything out.
    pub fn pruned(&self, players: &[PlayerAppearance]) -> FilterSelection {
        let mut out = FilterSelection::default();
        for dim in Dimension::ALL {
            let rows = upstream_rows(players, &out, dim);
            match dim {
                Dimension::Year => {
                    out.years = self
                        .years
                        .iter()
                        .filter(|y| rows.iter().any(|r| r.year == **y))
                        .copied()
                        .collect();
                }
                Dimension::Date => {
                    out.dates = self
                        .dates
                        .iter()
                        .filter(|d| rows.iter().any(|r| d.same_day(&r.match_date)))
                        .cloned()
                        .collect();
                }
                Dimension::Tournament => {
                    out.tournaments = retain_present(&self.tournaments, &rows, |r| &r.tournament);
                }
                Dimension::Opponent => {
                    out.opponents = retain_present(&self.opponents, &rows, |r| &r.opponent);
                }
                Dimension::Player => {
                    out.players = retain_present(&self.players, &rows, |r| &r.player_name);
                }
            }
        }
        out
    }
}

fn retain_present<F>(chosen: &BTreeSet<String>, rows: &[&PlayerAppearance], field: F) -> BTreeSet<String>
where
    F: Fn(&PlayerAppearance) -> &String,
{
    chosen
        .iter()
        .filter(|v| rows.iter().any(|r| field(*r) == *v))
        .cloned()
        .collect()
}

/// Rows matching the selection on every dimension
pub fn apply_filters(players: &[PlayerAppearance], sel: &FilterSelection) -> Vec<PlayerAppearance> {
    players.iter().filter(|p| sel.matches(p)).cloned().collect()
}

/// Rows that pass every filter above `dim` in the cascade
pub fn upstream_rows<'a>(
    players: &'a [PlayerAppearance],
    sel: &FilterSelection,
    dim: Dimension,
) -> Vec<&'a PlayerAppearance> {
    players
        .iter()
        .filter(|p| sel.matches_upstream_of(p, dim))
        .collect()
}

/// Years on offer, newest first
pub fn year_options(players: &[PlayerAppearance], sel: &FilterSelection) -> Vec<i32> {
    let set: BTreeSet<i32> = upstream_rows(players, sel, Dimension::Year)
        .iter()
        .map(|p| p.year)
        .collect();
    set.into_iter().rev().collect()
}

/// Match dates on offer, newest first, one entry per calendar day
pub fn date_options(players: &[PlayerAppearance], sel: &FilterSelection) -> Vec<MatchDate> {
    let set: BTreeSet<MatchDate> = upstream_rows(players, sel, Dimension::Date)
        .iter()
        .map(|p| p.match_date.clone())
        .collect();
    // Spellings of the same day sort next to each other
    let mut dates: Vec<MatchDate> = set.into_iter().rev().collect();
    dates.dedup_by(|a, b| a.same_day(b));
    dates
}

pub fn tournament_options(players: &[PlayerAppearance], sel: &FilterSelection) -> Vec<String> {
    text_options(players, sel, Dimension::Tournament, |p| &p.tournament)
}

pub fn opponent_options(players: &[PlayerAppearance], sel: &FilterSelection) -> Vec<String> {
    text_options(players, sel, Dimension::Opponent, |p| &p.opponent)
}

pub fn player_options(players: &[PlayerAppearance], sel: &FilterSelection) -> Vec<String> {
    text_options(players, sel, Dimension::Player, |p| &p.player_name)
}

fn text_options<F>(
    players: &[PlayerAppearance],
    sel: &FilterSelection,
    dim: Dimension,
    field: F,
) -> Vec<String>
where
    F: Fn(&PlayerAppearance) -> &String,
{
    let set: BTreeSet<&String> = upstream_rows(players, sel, dim)
        .into_iter()
        .map(field)
        .collect();
    set.into_iter().cloned().collect()
}

/// Option list for any dimension, as display strings
pub fn available_options(
    players: &[PlayerAppearance],
    sel: &FilterSelection,
    dim: Dimension,
) -> Vec<String> {
    match dim {
        Dimension::Year => year_options(players, sel).iter().map(|y| y.to_string()).collect(),
        Dimension::Date => date_options(players, sel).iter().map(|d| d.to_string()).collect(),
        Dimension::Tournament => tournament_options(players, sel),
        Dimension::Opponent => opponent_options(players, sel),
        Dimension::Player => player_options(players, sel),
    }
}
