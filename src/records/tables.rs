use serde::Deserialize;

/// A column the reader understands: the sheet's own header plus accepted aliases
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub required: bool,
}

impl Column {
    const fn required(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Column { name, aliases, required: true }
    }

    const fn optional(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Column { name, aliases, required: false }
    }

    /// Whether a header cell refers to this column (case-insensitive for aliases)
    pub fn matches(&self, header: &str) -> bool {
        let header = header.trim();
        header == self.name || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(header))
    }
}

pub const PLAYER_COLUMNS: &[Column] = &[
    Column::required("연도", &["year", "season"]),
    Column::required("날짜", &["date", "match_date"]),
    Column::required("대회명", &["tournament", "competition"]),
    Column::required("상대팀", &["opponent"]),
    Column::required("선수명", &["player", "player_name", "name"]),
    Column::optional("선발/교체", &["role", "start"]),
    Column::optional("출전시간", &["minutes", "minutes_played"]),
    Column::optional("득점", &["goals"]),
    Column::optional("도움", &["assists"]),
    Column::optional("실점", &["goals_conceded", "conceded"]),
    Column::optional("MOM", &["mom", "man_of_match"]),
    Column::optional("경고", &["cautions", "yellow", "yellow_cards"]),
    Column::optional("비고", &["note", "notes"]),
];

pub const MATCH_COLUMNS: &[Column] = &[
    Column::required("연도", &["year", "season"]),
    Column::optional("대회명", &["tournament", "competition"]),
    Column::optional("라운드", &["round"]),
    Column::required("날짜", &["date", "match_date"]),
    Column::required("상대팀", &["opponent"]),
    Column::required("스코어", &["score", "result"]),
    Column::optional("득점자", &["scorers"]),
    Column::optional("MOM", &["mom", "man_of_match"]),
    Column::optional("비고", &["note", "notes"]),
];

/// A row of the player sheet before normalization
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerRow {
    #[serde(rename = "연도")]
    pub year: Option<String>,
    #[serde(rename = "날짜")]
    pub date: Option<String>,
    #[serde(rename = "대회명")]
    pub tournament: Option<String>,
    #[serde(rename = "상대팀")]
    pub opponent: Option<String>,
    #[serde(rename = "선수명")]
    pub player: Option<String>,
    #[serde(rename = "선발/교체")]
    pub role: Option<String>,
    #[serde(rename = "출전시간")]
    pub minutes: Option<String>,
    #[serde(rename = "득점")]
    pub goals: Option<String>,
    #[serde(rename = "도움")]
    pub assists: Option<String>,
    #[serde(rename = "실점")]
    pub goals_conceded: Option<String>,
    #[serde(rename = "MOM")]
    pub mom: Option<String>,
    #[serde(rename = "경고")]
    pub cautions: Option<String>,
    #[serde(rename = "비고")]
    pub note: Option<String>,
}

/// A row of the match sheet before normalization
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchRow {
    #[serde(rename = "연도")]
    pub year: Option<String>,
    #[serde(rename = "대회명")]
    pub tournament: Option<String>,
    #[serde(rename = "라운드")]
    pub round: Option<String>,
    #[serde(rename = "날짜")]
    pub date: Option<String>,
    #[serde(rename = "상대팀")]
    pub opponent: Option<String>,
    #[serde(rename = "스코어")]
    pub score: Option<String>,
    #[serde(rename = "득점자")]
    pub scorers: Option<String>,
    #[serde(rename = "MOM")]
    pub mom: Option<String>,
    #[serde(rename = "비고")]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_matches_aliases() {
        let year = &PLAYER_COLUMNS[0];
        assert!(year.matches("연도"));
        assert!(year.matches("Year"));
        assert!(year.matches(" season "));
        assert!(!year.matches("date"));
    }

    #[test]
    fn test_required_columns() {
        let required: Vec<&str> = MATCH_COLUMNS
            .iter()
            .filter(|c| c.required)
            .map(|c| c.name)
            .collect();
        assert_eq!(required, vec!["연도", "날짜", "상대팀", "스코어"]);
    }
}
