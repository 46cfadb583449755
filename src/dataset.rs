//! The two loaded tables, replaced wholesale on reload

use crate::error::Result;
use crate::model::{MatchRecord, PlayerAppearance};
use crate::records::{self, reader::strip_bom};
use std::path::Path;

/// Default file names for the bundled sheets
pub const DEFAULT_PLAYER_FILE: &str = "player_records.csv";
pub const DEFAULT_MATCH_FILE: &str = "match_records.csv";

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub players: Vec<PlayerAppearance>,
    pub matches: Vec<MatchRecord>,
}

impl Dataset {
    pub fn new(players: Vec<PlayerAppearance>, matches: Vec<MatchRecord>) -> Self {
        Dataset { players, matches }
    }

    /// Load from pasted CSV text
    pub fn from_csv_str(player_csv: &str, match_csv: &str) -> Result<Self> {
        let player_rows = records::read_player_rows(strip_bom(player_csv).as_bytes())?;
        let match_rows = records::read_match_rows(strip_bom(match_csv).as_bytes())?;
        let (players, matches) = records::normalize(&player_rows, &match_rows)?;
        Ok(Dataset::new(players, matches))
    }

    /// Load from CSV files on disk
    pub fn from_paths(player_path: &Path, match_path: &Path) -> Result<Self> {
        let player_rows = records::read_player_file(player_path)?;
        let match_rows = records::read_match_file(match_path)?;
        let (players, matches) = records::normalize(&player_rows, &match_rows)?;
        log::debug!(
            "Loaded {} appearances from {} and {} matches from {}",
            players.len(),
            player_path.display(),
            matches.len(),
            match_path.display()
        );
        Ok(Dataset::new(players, matches))
    }

    /// Replace both tables from pasted text. On error the current tables are kept.
    pub fn reload_from_csv_str(&mut self, player_csv: &str, match_csv: &str) -> Result<()> {
        match Dataset::from_csv_str(player_csv, match_csv) {
            Ok(fresh) => {
                *self = fresh;
                Ok(())
            }
            Err(e) => {
                log::warn!("Reload failed, keeping previous data: {}", e);
                Err(e)
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.matches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordsError;
    use std::io::Write;

    const PLAYERS: &str = "연도,대회명,날짜,상대팀,선수명,선발/교체,출전시간,득점,도움,MOM,경고,비고
2024,U리그,2024-03-15,A대,김철수,선발,90,1,0,1,0,
";
    const MATCHES: &str = "연도,대회명,라운드,날짜,상대팀,스코어,득점자,MOM,비고
2024,U리그,1R,2024-03-15,A대,1:0,김철수,김철수,
";

    #[test]
    fn test_from_csv_str() {
        let data = Dataset::from_csv_str(PLAYERS, MATCHES).unwrap();
        assert_eq!(data.players.len(), 1);
        assert_eq!(data.matches.len(), 1);
        assert_eq!(data.matches[0].round, "1R");
        assert!(data.players[0].man_of_match);
    }

    #[test]
    fn test_reload_keeps_last_good() {
        let mut data = Dataset::from_csv_str(PLAYERS, MATCHES).unwrap();
        let bad_players = PLAYERS.replace("2024,U리그", "올해,U리그");

        let err = data.reload_from_csv_str(&bad_players, MATCHES).unwrap_err();
        assert!(matches!(err, RecordsError::InvalidYear { .. }));
        assert_eq!(data.players.len(), 1);
        assert_eq!(data.players[0].year, 2024);

        let more = format!("{}2024,U리그,2024-03-15,A대,이영희,교체,10,0,0,0,0,\n", PLAYERS);
        data.reload_from_csv_str(&more, MATCHES).unwrap();
        assert_eq!(data.players.len(), 2);
    }

    #[test]
    fn test_from_paths() {
        let dir = tempfile::tempdir().unwrap();
        let player_path = dir.path().join(DEFAULT_PLAYER_FILE);
        let match_path = dir.path().join(DEFAULT_MATCH_FILE);
        std::fs::File::create(&player_path)
            .unwrap()
            .write_all(PLAYERS.as_bytes())
            .unwrap();
        std::fs::File::create(&match_path)
            .unwrap()
            .write_all(MATCHES.as_bytes())
            .unwrap();

        let data = Dataset::from_paths(&player_path, &match_path).unwrap();
        assert_eq!(data.players.len(), 1);
        assert!(!data.is_empty());

        let missing = dir.path().join("nope.csv");
        let err = Dataset::from_paths(&missing, &match_path).unwrap_err();
        assert!(matches!(err, RecordsError::Io(_)));
    }
}
