use super::tables::{Column, MatchRow, PlayerRow, MATCH_COLUMNS, PLAYER_COLUMNS};
use crate::error::{RecordsError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const PLAYER_TABLE: &str = "player";
pub const MATCH_TABLE: &str = "match";

/// Read the player sheet from CSV text
pub fn read_player_rows<R: Read>(rdr: R) -> Result<Vec<PlayerRow>> {
    read_rows(rdr, PLAYER_TABLE, PLAYER_COLUMNS)
}

/// Read the match sheet from CSV text
pub fn read_match_rows<R: Read>(rdr: R) -> Result<Vec<MatchRow>> {
    read_rows(rdr, MATCH_TABLE, MATCH_COLUMNS)
}

pub fn read_player_file(path: &Path) -> Result<Vec<PlayerRow>> {
    read_player_rows(File::open(path)?)
}

pub fn read_match_file(path: &Path) -> Result<Vec<MatchRow>> {
    read_match_rows(File::open(path)?)
}

/// Strip a leading UTF-8 byte order mark (spreadsheet exports often carry one)
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

fn read_rows<T, R>(rdr: R, table: &'static str, columns: &[Column]) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(rdr);

    let headers = canonical_headers(reader.headers()?, columns);
    check_required(&headers, table, columns)?;
    reader.set_headers(headers.clone());

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }

    log::debug!("Read {} rows from {} table", rows.len(), table);
    Ok(rows)
}

/// Rewrite alias headers ("year", "Date", ...) to the sheet's own column names
fn canonical_headers(headers: &StringRecord, columns: &[Column]) -> StringRecord {
    let mut claimed: Vec<&str> = Vec::new();
    headers
        .iter()
        .map(|h| {
            let h = strip_bom(h).trim();
            match columns.iter().find(|c| c.matches(h)) {
                Some(col) if !claimed.contains(&col.name) => {
                    claimed.push(col.name);
                    col.name.to_string()
                }
                _ => h.to_string(),
            }
        })
        .collect()
}

fn check_required(headers: &StringRecord, table: &'static str, columns: &[Column]) -> Result<()> {
    for col in columns.iter().filter(|c| c.required) {
        if !headers.iter().any(|h| h == col.name) {
            return Err(RecordsError::MissingColumn {
                table,
                column: col.name,
            });
        }
    }
    Ok(())
}
