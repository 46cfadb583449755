use super::date::MatchDate;
use super::fixture::MatchKey;
use std::fmt;

/// How the player entered the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Starter,
    Substitute,
}

impl Role {
    /// Parse the sheet's role column ("선발"/"교체", or English)
    pub fn from_str(s: &str) -> Option<Role> {
        match s.trim().to_lowercase().as_str() {
            "선발" | "starter" | "start" | "starting" | "s" => Some(Role::Starter),
            "교체" | "substitute" | "sub" | "bench" | "b" => Some(Role::Substitute),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Starter => "선발",
            Role::Substitute => "교체",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One player's appearance in one match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerAppearance {
    pub year: i32,
    pub match_date: MatchDate,
    pub tournament: String,
    pub opponent: String,
    pub player_name: String,
    pub role: Option<Role>,
    pub minutes_played: u32,
    pub goals: u32,
    pub assists: u32,
    /// Only meaningful for goalkeepers
    pub goals_conceded: u32,
    pub man_of_match: bool,
    pub cautions: u32,
    pub note: Option<String>,
}

impl PlayerAppearance {
    pub fn key(&self) -> MatchKey {
        MatchKey::new(&self.match_date, &self.opponent)
    }

    pub fn is_starter(&self) -> bool {
        self.role == Some(Role::Starter)
    }

    pub fn is_substitute(&self) -> bool {
        self.role == Some(Role::Substitute)
    }

    /// Minutes as shown in match logs, e.g. "90'"
    pub fn minutes_display(&self) -> String {
        format_minutes(self.minutes_played)
    }

    pub fn mom_display(&self) -> &'static str {
        if self.man_of_match { "⭐" } else { "" }
    }
}

pub fn format_minutes(minutes: u32) -> String {
    format!("{}'", minutes)
}
