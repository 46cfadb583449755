//! Match score parsing for the result sheet

use lazy_static::lazy_static;
use nom::{
    character::complete::{char, digit1, space0},
    combinator::{all_consuming, map_res},
    sequence::{delimited, separated_pair},
    IResult, Parser,
};
use regex::Regex;
use std::fmt;

lazy_static! {
    // Shoot-out and other annotations: "1:1(4PSO3)", "2:2 (aet)"
    static ref PAREN_SUFFIX: Regex = Regex::new(r"\s*\(.*$").unwrap();
}

/// Sentinel used in the result sheet for matches without a result
pub const NO_RESULT: &str = "-";

/// Result of a match from the club's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
    #[default]
    Unknown,
}

impl Outcome {
    pub fn from_goals(goals_for: u32, goals_against: u32) -> Self {
        if goals_for > goals_against {
            Outcome::Win
        } else if goals_for < goals_against {
            Outcome::Loss
        } else {
            Outcome::Draw
        }
    }

    /// Single-letter code used in compact tables
    pub fn code(&self) -> &'static str {
        match self {
            Outcome::Win => "W",
            Outcome::Draw => "D",
            Outcome::Loss => "L",
            Outcome::Unknown => "?",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Outcome::Unknown)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "Win"),
            Outcome::Draw => write!(f, "Draw"),
            Outcome::Loss => write!(f, "Loss"),
            Outcome::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A parsed score: first number is always the club's goals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub outcome: Outcome,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl Score {
    pub fn unknown() -> Self {
        Score::default()
    }

    pub fn goal_difference(&self) -> i64 {
        self.goals_for as i64 - self.goals_against as i64
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.outcome.is_known() {
            write!(f, "{}:{}", self.goals_for, self.goals_against)
        } else {
            write!(f, "{}", NO_RESULT)
        }
    }
}

fn goals(input: &str) -> IResult<&str, u32> {
    map_res(delimited(space0, digit1, space0), |s: &str| s.parse::<u32>()).parse(input)
}

/// Parse "for:against"
fn score_body(input: &str) -> IResult<&str, (u32, u32)> {
    separated_pair(goals, char(':'), goals).parse(input)
}

/// Parse a raw score cell like "2:1" or "1:1(4PSO3)".
///
/// Anything in parentheses is dropped before parsing, so a shoot-out never
/// changes the outcome. Empty cells, the "-" marker and anything that isn't
/// two colon-separated integers come back as `Outcome::Unknown` with 0:0.
pub fn parse_score(raw: &str) -> Score {
    let body = PAREN_SUFFIX.replace(raw.trim(), "");
    let body = body.trim();
    if body.is_empty() || body == NO_RESULT {
        return Score::unknown();
    }

    let parsed = all_consuming(score_body).parse(body);
    match parsed {
        Ok((_, (goals_for, goals_against))) => Score {
            outcome: Outcome::from_goals(goals_for, goals_against),
            goals_for,
            goals_against,
        },
        Err(_) => {
            log::debug!("Unparseable score '{}'", raw);
            Score::unknown()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_scores() {
        let s = parse_score("2:1");
        assert_eq!(s.outcome, Outcome::Win);
        assert_eq!((s.goals_for, s.goals_against), (2, 1));

        let s = parse_score("0:3");
        assert_eq!(s.outcome, Outcome::Loss);
        assert_eq!((s.goals_for, s.goals_against), (0, 3));

        let s = parse_score("0:0");
        assert_eq!(s.outcome, Outcome::Draw);
    }

    #[test]
    fn test_shootout_suffix_ignored() {
        let s = parse_score("1:1(4PSO3)");
        assert_eq!(s, parse_score("1:1"));
        assert_eq!(s.outcome, Outcome::Draw);
        assert_eq!((s.goals_for, s.goals_against), (1, 1));

        // Losing the shoot-out is still a draw
        assert_eq!(parse_score("2:2 (3PSO5)").outcome, Outcome::Draw);
        assert_eq!(parse_score("3:1(aet)"), parse_score("3:1"));
    }

    #[test]
    fn test_unknown_scores() {
        assert_eq!(parse_score("-"), Score::unknown());
        assert_eq!(parse_score(""), Score::unknown());
        assert_eq!(parse_score("   "), Score::unknown());
        assert_eq!(parse_score("abc"), Score::unknown());
        assert_eq!(parse_score("2-1"), Score::unknown());
        assert_eq!(parse_score("2:1:0"), Score::unknown());
        assert_eq!(parse_score("(4PSO3)"), Score::unknown());
    }

    #[test]
    fn test_whitespace_tolerated() {
        let s = parse_score(" 3 : 2 ");
        assert_eq!(s.outcome, Outcome::Win);
        assert_eq!((s.goals_for, s.goals_against), (3, 2));
    }

    #[test]
    fn test_display() {
        assert_eq!(parse_score("1:1(4PSO3)").to_string(), "1:1");
        assert_eq!(parse_score("x").to_string(), "-");
        assert_eq!(parse_score("0:2").goal_difference(), -2);
    }
}
