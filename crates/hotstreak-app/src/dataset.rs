// Per-game statistics table loading.
//
// Reads the comprehensive player statistic CSV: one row per player per game,
// identifier columns followed by the eight category columns. Identifiers may
// be written as integral floats (`18200001.0`) when the exporting tool had
// missing values in the column.

use chrono::{NaiveDate, NaiveDateTime};
use hotstreak_core::{GameRecord, PlayerId, StatLine};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("{path} has no `{column}` column")]
    MissingColumn { path: String, column: &'static str },

    #[error("{path} produced zero valid game rows")]
    Empty { path: String },
}

/// Identifier columns every table must carry. Category columns may be absent.
const REQUIRED_COLUMNS: [&str; 4] = ["player_id", "player_name", "fixture_id", "played_on"];

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// One CSV row. Empty cells deserialize to `None`; extra columns are ignored.
#[derive(Debug, Deserialize)]
struct RawGameRow {
    player_id: String,
    #[serde(default)]
    player_name: String,
    #[serde(default)]
    fixture_id: Option<String>,
    #[serde(default)]
    played_on: Option<String>,
    #[serde(default)]
    points: Option<f64>,
    #[serde(default)]
    rebounds: Option<f64>,
    #[serde(default)]
    assists: Option<f64>,
    #[serde(default)]
    steals: Option<f64>,
    #[serde(default)]
    blocks: Option<f64>,
    #[serde(default, rename = "fg%")]
    fg_pct: Option<f64>,
    #[serde(default, rename = "ft%")]
    ft_pct: Option<f64>,
    #[serde(default, rename = "3pt%")]
    three_pt_pct: Option<f64>,
}

// ---------------------------------------------------------------------------
// Field parsing helpers
// ---------------------------------------------------------------------------

/// Parse a non-negative integral identifier written as `123` or `123.0`.
fn parse_identifier(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(id) = raw.parse::<u64>() {
        return Some(id);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Some(value as u64)
    } else {
        None
    }
}

/// Parse a game date, accepting an optional time-of-day suffix.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .ok()
}

/// Drop non-finite category values; they can't take part in a mean.
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn into_record(raw: RawGameRow) -> Option<GameRecord> {
    let Some(player_id) = parse_identifier(&raw.player_id) else {
        warn!("skipping row with invalid player_id '{}'", raw.player_id.trim());
        return None;
    };

    let fixture_id = raw.fixture_id.as_deref().and_then(parse_identifier);
    let played_on = match raw.played_on.as_deref() {
        Some(text) if !text.trim().is_empty() => {
            let parsed = parse_date(text);
            if parsed.is_none() {
                warn!("unparseable played_on '{}' for player {}", text.trim(), player_id);
            }
            parsed
        }
        _ => None,
    };

    Some(GameRecord {
        player_id: PlayerId(player_id),
        player_name: raw.player_name.trim().to_string(),
        fixture_id,
        played_on,
        stats: StatLine {
            points: finite(raw.points),
            rebounds: finite(raw.rebounds),
            assists: finite(raw.assists),
            steals: finite(raw.steals),
            blocks: finite(raw.blocks),
            fg_pct: finite(raw.fg_pct),
            ft_pct: finite(raw.ft_pct),
            three_pt_pct: finite(raw.three_pt_pct),
        },
    })
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Parse game rows from any reader. `path` only labels errors.
fn load_games_from_reader<R: Read>(rdr: R, path: &str) -> Result<Vec<GameRecord>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);

    let headers = reader.headers().map_err(|e| DatasetError::Csv {
        path: path.to_string(),
        source: e,
    })?;
    if let Some(column) = REQUIRED_COLUMNS
        .into_iter()
        .find(|column| !headers.iter().any(|h| h == *column))
    {
        return Err(DatasetError::MissingColumn {
            path: path.to_string(),
            column,
        });
    }

    let mut records = Vec::new();
    for result in reader.deserialize::<RawGameRow>() {
        match result {
            Ok(raw) => {
                if let Some(record) = into_record(raw) {
                    records.push(record);
                }
            }
            Err(e) => {
                warn!("skipping malformed game row: {}", e);
            }
        }
    }
    Ok(records)
}

/// Load the per-game table from a CSV file.
///
/// Fails with `DatasetError::Empty` when no row survives parsing, since no
/// query can be answered without data.
pub fn load_games(path: &Path) -> Result<Vec<GameRecord>, DatasetError> {
    let file = std::fs::File::open(path).map_err(|e| DatasetError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let records = load_games_from_reader(file, &path.display().to_string())?;

    if records.is_empty() {
        return Err(DatasetError::Empty {
            path: path.display().to_string(),
        });
    }
    info!("loaded {} game rows from {}", records.len(), path.display());
    Ok(records)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
