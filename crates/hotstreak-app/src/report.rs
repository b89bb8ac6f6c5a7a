// Streak result rendering: console text lines and JSON records.

use chrono::NaiveDate;
use hotstreak_core::{Category, PlayerId, StreakResult};
use serde::Serialize;
use std::io::{self, Write};

/// How results are written to the console.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    /// Text plus the sum, means and game count behind each streak.
    Detailed,
    /// One JSON object per line.
    Json,
}

/// Flat record written in JSON mode.
#[derive(Debug, Serialize)]
pub struct StreakRecord<'a> {
    pub player_id: PlayerId,
    pub player_name: &'a str,
    pub category: Category,
    pub season: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub best_sum: f64,
    pub season_mean: f64,
    pub window_mean: Option<f64>,
    pub games: usize,
}

impl<'a> StreakRecord<'a> {
    pub fn new(player_id: PlayerId, player_name: &'a str, result: &StreakResult) -> Self {
        Self {
            player_id,
            player_name,
            category: result.category,
            season: result.season_label(),
            start: result.start.map(|d| d.to_string()),
            end: result.end.map(|d| d.to_string()),
            best_sum: result.best_sum,
            season_mean: result.season_mean,
            window_mean: result.window_mean,
            games: result.games,
        }
    }
}

fn date_text(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.to_string(),
        None => "unknown date".to_string(),
    }
}

pub fn streak_line(result: &StreakResult) -> String {
    format!(
        "Best stretch for [{}] for [{}] season is between: {} & {}",
        result.category,
        result.season_label(),
        date_text(result.start),
        date_text(result.end)
    )
}

pub fn detail_line(result: &StreakResult) -> String {
    let window = match result.window_mean {
        Some(mean) => format!("{mean:.1}"),
        None => "n/a".to_string(),
    };
    format!(
        "  deviation sum {:.1} | season mean {:.1} over {} games | stretch mean {}",
        result.best_sum, result.season_mean, result.games, window
    )
}

fn category_banner(category: Category) -> String {
    format!("{:-^80}", format!("{category}"))
}

/// Write every result for one query, grouped by category in the order asked.
/// Categories without any season of data get a note instead of results.
pub fn write_results<W: Write>(
    out: &mut W,
    player_id: PlayerId,
    player_name: &str,
    categories: &[Category],
    results: &[StreakResult],
    format: OutputFormat,
) -> io::Result<()> {
    for &category in categories {
        let for_category: Vec<&StreakResult> =
            results.iter().filter(|r| r.category == category).collect();

        if format == OutputFormat::Json {
            for result in for_category {
                let record = StreakRecord::new(player_id, player_name, result);
                let line = serde_json::to_string(&record).map_err(io::Error::other)?;
                writeln!(out, "{line}")?;
            }
            continue;
        }

        writeln!(out, "{}", category_banner(category))?;
        if for_category.is_empty() {
            writeln!(out, "No regular-season data for [{category}].")?;
        }
        for result in for_category {
            writeln!(out, "{}", streak_line(result))?;
            if format == OutputFormat::Detailed {
                writeln!(out, "{}", detail_line(result))?;
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
