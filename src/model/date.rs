use chrono::NaiveDate;
use std::fmt;

/// A match date as written in the sheet, plus its calendar date when the text
/// could be read as one.
///
/// Ordering is by calendar date first (unreadable dates sort lowest), then by
/// the raw text, so sorting always follows the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct MatchDate {
    date: Option<NaiveDate>,
    raw: String,
}

impl MatchDate {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        MatchDate {
            date: parse_calendar_date(raw),
            raw: raw.to_string(),
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_calendar_date(&self) -> bool {
        self.date.is_some()
    }

    /// Same calendar day, or identical text when either side isn't a date
    pub fn same_day(&self, other: &MatchDate) -> bool {
        match (self.date, other.date) {
            (Some(a), Some(b)) => a == b,
            _ => self.raw == other.raw,
        }
    }
}

impl From<&str> for MatchDate {
    fn from(s: &str) -> Self {
        MatchDate::parse(s)
    }
}

impl fmt::Display for MatchDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.date {
            Some(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            None => write!(f, "{}", self.raw),
        }
    }
}

/// Read "2024-03-15", "2024.3.15", "2024/03/15 00:00:00" or "20240315"
fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw
        .split(|c: char| !c.is_ascii_digit())
        .filter(|p| !p.is_empty())
        .collect();

    match parts.as_slice() {
        [digits] if digits.len() == 8 => NaiveDate::parse_from_str(digits, "%Y%m%d").ok(),
        [y, m, d, ..] if y.len() == 4 => {
            NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, d.parse().ok()?)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15);
        assert_eq!(MatchDate::parse("2024-03-15").date(), expected);
        assert_eq!(MatchDate::parse("2024.3.15").date(), expected);
        assert_eq!(MatchDate::parse("2024/03/15 00:00:00").date(), expected);
        assert_eq!(MatchDate::parse("20240315").date(), expected);
        assert_eq!(MatchDate::parse(" 2024-03-15 ").raw(), "2024-03-15");
    }

    #[test]
    fn test_unparseable_dates() {
        assert_eq!(MatchDate::parse("TBD").date(), None);
        assert_eq!(MatchDate::parse("").date(), None);
        assert_eq!(MatchDate::parse("2024-13-40").date(), None);
        assert_eq!(MatchDate::parse("15/03/24").date(), None);
    }

    #[test]
    fn test_calendar_order() {
        let mut dates: Vec<MatchDate> = ["2024.10.2", "2024-09-30", "TBD", "2023-12-31"]
            .iter()
            .map(|s| MatchDate::parse(s))
            .collect();
        dates.sort();
        let raws: Vec<&str> = dates.iter().map(|d| d.raw()).collect();
        assert_eq!(raws, vec!["TBD", "2023-12-31", "2024-09-30", "2024.10.2"]);
    }

    #[test]
    fn test_same_day() {
        assert!(MatchDate::parse("2024.3.15").same_day(&MatchDate::parse("2024-03-15")));
        assert!(MatchDate::parse("TBD").same_day(&MatchDate::parse("TBD")));
        assert!(!MatchDate::parse("TBD").same_day(&MatchDate::parse("2024-03-15")));
    }

    #[test]
    fn test_display_normalizes() {
        assert_eq!(MatchDate::parse("2024.3.5").to_string(), "2024-03-05");
        assert_eq!(MatchDate::parse("TBD").to_string(), "TBD");
    }
}
