use crate::error::Result;
use crate::query::{Evaluation, Summary};
use crate::view::{self, Cell};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;

/// Write the filtered rows and the summary for one selection to an Excel file
pub fn write_evaluation_to_xlsx(eval: &Evaluation, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let players: Vec<Vec<Cell>> = eval.filtered_players.iter().map(view::player_row).collect();
    write_table_sheet(workbook.add_worksheet(), "Players", &view::PLAYER_HEADERS, &players)?;

    let matches: Vec<Vec<Cell>> = eval.correlated_matches.iter().map(view::match_row).collect();
    write_table_sheet(workbook.add_worksheet(), "Matches", &view::MATCH_HEADERS, &matches)?;

    match &eval.summary {
        Summary::Team(team) => {
            let ranking: Vec<Vec<Cell>> = team.ranking.iter().map(view::ranking_row).collect();
            write_table_sheet(workbook.add_worksheet(), "Ranking", &view::RANKING_HEADERS, &ranking)?;
        }
        Summary::Player(player) => {
            let log: Vec<Vec<Cell>> = player
                .match_log
                .iter()
                .map(|e| view::match_log_row(e, player.goalkeeper))
                .collect();
            write_table_sheet(
                workbook.add_worksheet(),
                "Match Log",
                &view::match_log_headers(player.goalkeeper),
                &log,
            )?;

            if let Some(by_year) = &player.by_year {
                let rows: Vec<Vec<Cell>> = by_year.iter().map(view::year_row).collect();
                write_table_sheet(
                    workbook.add_worksheet(),
                    "By Year",
                    &view::year_headers(player.goalkeeper),
                    &rows,
                )?;
            }
        }
    }

    workbook.save(path)?;
    log::debug!("Wrote workbook {}", path.display());
    Ok(())
}

/// Write a header row and data rows to a worksheet
fn write_table_sheet(sheet: &mut Worksheet, name: &str, headers: &[&str], rows: &[Vec<Cell>]) -> Result<()> {
    // Header format
    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border_bottom(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        sheet.set_column_width(col as u16, column_width(header, rows, col))?;
    }

    let center_format = Format::new().set_align(FormatAlign::Center);
    let left_format = Format::new().set_align(FormatAlign::Left);

    for (row_idx, cells) in rows.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        for (col, cell) in cells.iter().enumerate() {
            match cell {
                Cell::Number(n) => {
                    sheet.write_number_with_format(row, col as u16, *n, &center_format)?;
                }
                Cell::Text(s) if !s.is_empty() => {
                    sheet.write_string_with_format(row, col as u16, s, &left_format)?;
                }
                Cell::Text(_) => {}
            }
        }
    }

    sheet.set_freeze_panes(1, 0)?;
    sheet.set_name(name)?;

    Ok(())
}

/// Rough width from the longest value in the column; Hangul counts double
fn column_width(header: &str, rows: &[Vec<Cell>], col: usize) -> f64 {
    let display_len = |s: &str| -> usize { s.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum() };
    let longest = rows
        .iter()
        .filter_map(|r| r.get(col))
        .map(|c| display_len(&c.to_string()))
        .chain(std::iter::once(display_len(header)))
        .max()
        .unwrap_or(8);
    (longest.clamp(6, 40) + 2) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::query::{evaluate, FilterSelection};
    use crate::query::testing::{appearance, fixture};

    fn dataset() -> Dataset {
        Dataset::new(
            vec![
                appearance(2024, "2024-03-15", "U리그", "A대", "김철수"),
                appearance(2024, "2024-03-15", "U리그", "A대", "박민수"),
            ],
            vec![fixture(2024, "2024-03-15", "A대", "2:1")],
        )
    }

    #[test]
    fn test_write_team_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("team.xlsx");
        let eval = evaluate(&dataset(), &FilterSelection::default());
        write_evaluation_to_xlsx(&eval, &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_player_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player.xlsx");
        let sel = FilterSelection::new().with_players(["김철수"]);
        let eval = evaluate(&dataset(), &sel);
        write_evaluation_to_xlsx(&eval, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_column_width_bounds() {
        let rows = vec![vec![Cell::Text("김철수".to_string())]];
        assert_eq!(column_width("선수명", &rows, 0), 8.0);
        assert_eq!(column_width("x", &[], 0), 8.0);
    }
}
