use super::date::MatchDate;
use super::score::{parse_score, Score};

/// Natural key joining appearances to matches.
///
/// The date part is the normalized calendar date when there is one, so
/// "2024.3.15" on one sheet joins "2024-03-15" on the other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchKey {
    pub date: String,
    pub opponent: String,
}

impl MatchKey {
    pub fn new(match_date: &MatchDate, opponent: &str) -> Self {
        MatchKey {
            date: match_date.to_string(),
            opponent: opponent.to_string(),
        }
    }
}

/// One match from the result sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub year: i32,
    pub tournament: String,
    pub round: String,
    pub match_date: MatchDate,
    pub opponent: String,
    /// Raw score text, e.g. "2:1" or "1:1(4PSO3)"
    pub score: String,
    pub scorers: String,
    pub man_of_match: String,
    pub note: Option<String>,
}

impl MatchRecord {
    pub fn key(&self) -> MatchKey {
        MatchKey::new(&self.match_date, &self.opponent)
    }

    pub fn parsed_score(&self) -> Score {
        parse_score(&self.score)
    }
}
