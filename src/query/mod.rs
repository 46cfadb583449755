pub mod aggregate;
pub mod correlate;
pub mod filter;

pub use aggregate::{
    headline, is_goalkeeper, match_log, player_summary, ranking_table, team_record, team_summary,
    top_mom, year_breakdown, Headline, MatchLogEntry, PlayerSummary, PlayerTally, RankingRow,
    SecondaryStat, StatLine, TeamRecord, TeamSummary, TopMom, YearLine,
};
pub use correlate::{correlate, match_keys};
pub use filter::{apply_filters, available_options, Dimension, FilterSelection};

use crate::dataset::Dataset;
use crate::model::{MatchRecord, PlayerAppearance};

/// Team-wide or per-player figures, depending on whether a player is chosen
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    Team(TeamSummary),
    Player(PlayerSummary),
}

/// Everything a view needs for one filter selection
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub filtered_players: Vec<PlayerAppearance>,
    pub correlated_matches: Vec<MatchRecord>,
    pub headline: Headline,
    pub summary: Summary,
}

impl Evaluation {
    /// No appearance matched the selection
    pub fn is_empty(&self) -> bool {
        self.filtered_players.is_empty()
    }

    pub fn team(&self) -> Option<&TeamSummary> {
        match &self.summary {
            Summary::Team(t) => Some(t),
            Summary::Player(_) => None,
        }
    }

    pub fn player(&self) -> Option<&PlayerSummary> {
        match &self.summary {
            Summary::Player(p) => Some(p),
            Summary::Team(_) => None,
        }
    }
}

/// Run one query against the loaded tables
pub fn evaluate(data: &Dataset, sel: &FilterSelection) -> Evaluation {
    let filtered_players = apply_filters(&data.players, sel);
    let correlated_matches = correlate(&filtered_players, &data.matches);
    let headline = headline(&filtered_players, &correlated_matches);

    let summary = if sel.has_players() {
        let selected: Vec<String> = sel.players.iter().cloned().collect();
        Summary::Player(player_summary(&filtered_players, &selected, sel.has_years()))
    } else {
        Summary::Team(team_summary(&filtered_players, &correlated_matches))
    };

    log::debug!(
        "Selection matched {} appearances and {} matches",
        filtered_players.len(),
        correlated_matches.len()
    );

    Evaluation {
        filtered_players,
        correlated_matches,
        headline,
        summary,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::model::{MatchDate, MatchRecord, PlayerAppearance};

    pub fn appearance(year: i32, date: &str, tournament: &str, opponent: &str, player: &str) -> PlayerAppearance {
        PlayerAppearance {
            year,
            match_date: MatchDate::parse(date),
            tournament: tournament.to_string(),
            opponent: opponent.to_string(),
            player_name: player.to_string(),
            role: None,
            minutes_played: 0,
            goals: 0,
            assists: 0,
            goals_conceded: 0,
            man_of_match: false,
            cautions: 0,
            note: None,
        }
    }

    pub fn fixture(year: i32, date: &str, opponent: &str, score: &str) -> MatchRecord {
        MatchRecord {
            year,
            tournament: "U리그".to_string(),
            round: String::new(),
            match_date: MatchDate::parse(date),
            opponent: opponent.to_string(),
            score: score.to_string(),
            scorers: String::new(),
            man_of_match: String::new(),
            note: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testing::{appearance, fixture};

    fn dataset() -> Dataset {
        let mut a = appearance(2023, "2023-05-01", "U리그", "A대", "김철수");
        a.goals = 1;
        a.man_of_match = true;
        let mut b = appearance(2024, "2024-03-15", "U리그", "B대", "김철수");
        b.goals = 2;
        let mut c = appearance(2024, "2024-03-15", "U리그", "B대", "박민수");
        c.goals_conceded = 1;
        let d = appearance(2024, "2024-06-01", "추계연맹전", "C대", "박민수");

        Dataset::new(
            vec![a, b, c, d],
            vec![
                fixture(2023, "2023-05-01", "A대", "1:0"),
                fixture(2024, "2024-03-15", "B대", "2:1"),
                fixture(2024, "2024-06-01", "C대", "0:0"),
                fixture(2024, "2024-09-01", "D대", "0:1"),
            ],
        )
    }

    #[test]
    fn test_team_mode() {
        let data = dataset();
        let eval = evaluate(&data, &FilterSelection::default());
        assert_eq!(eval.filtered_players.len(), 4);
        assert_eq!(eval.correlated_matches.len(), 3);
        assert_eq!(eval.headline.goals, 3);

        let team = eval.team().unwrap();
        assert_eq!((team.record.wins, team.record.draws, team.record.losses), (2, 1, 0));
        assert_eq!(team.top_mom.as_ref().unwrap().name, "김철수");
        assert_eq!(team.ranking[0].tally.name, "김철수");
    }

    #[test]
    fn test_player_mode_uses_player_keys() {
        let data = dataset();
        let sel = FilterSelection::new().with_players(["박민수"]);
        let eval = evaluate(&data, &sel);

        let opponents: Vec<&str> = eval
            .correlated_matches
            .iter()
            .map(|m| m.opponent.as_str())
            .collect();
        assert_eq!(opponents, vec!["B대", "C대"]);

        let player = eval.player().unwrap();
        assert!(player.goalkeeper);
        assert_eq!(player.secondary, SecondaryStat::GoalsConceded(1));
        assert!(player.by_year.is_some());
    }

    #[test]
    fn test_mode_switch_returns_to_baseline() {
        let data = dataset();
        let base = FilterSelection::new().with_years([2024]);
        let baseline = evaluate(&data, &base);

        let picked = base.clone().with_players(["김철수"]);
        assert!(evaluate(&data, &picked).player().is_some());
        // Year filter is on, so no per-year breakdown
        assert!(evaluate(&data, &picked).player().unwrap().by_year.is_none());

        let cleared = picked.without_players();
        let again = evaluate(&data, &cleared);
        assert_eq!(again, baseline);
        assert!(again.team().is_some());
    }

    #[test]
    fn test_empty_selection_result() {
        let data = dataset();
        let sel = FilterSelection::new().with_opponents(["없는팀"]);
        let eval = evaluate(&data, &sel);
        assert!(eval.is_empty());
        assert!(eval.correlated_matches.is_empty());
        let team = eval.team().unwrap();
        assert_eq!(team.record, TeamRecord::default());
        assert_eq!(team.top_mom, None);
    }
}
