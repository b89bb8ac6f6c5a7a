// Per-category, per-season hot streak search.
//
// For each requested category and each supported season:
// 1. Restrict the player's regular-season games to the season
// 2. Build the deviation series (skip the season if it is empty)
// 3. Locate the best window of deviations
// 4. Map the window boundaries back to game dates

use crate::deviation::{build_series, DeviationSeries};
use crate::locator::{locate, BoundaryMode};
use crate::record::{Category, GameRecord, PlayerId};
use crate::season::{filter_regular_season, games_in_season, Season, SEASONS};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

/// A player's best stretch for one category in one season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreakResult {
    pub category: Category,
    pub season: Season,
    /// First and last game of the stretch. `None` when the table had no
    /// usable date for that game.
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Sum of deviations over the best window.
    pub best_sum: f64,
    /// Season mean for the category, rounded to one decimal.
    pub season_mean: f64,
    /// Games in the season with a recorded value for the category.
    pub games: usize,
    pub left_index: usize,
    pub right_index: usize,
    /// Mean raw value across the reported window. `None` when legacy
    /// boundaries come out reversed.
    pub window_mean: Option<f64>,
}

impl StreakResult {
    pub fn season_label(&self) -> String {
        self.season.label()
    }
}

fn window_mean(series: &DeviationSeries, left: usize, right: usize) -> Option<f64> {
    if left > right {
        return None;
    }
    let window = series.points.get(left..=right)?;
    let total: f64 = window.iter().map(|p| p.value).sum();
    Some(total / window.len() as f64)
}

/// Search settings shared by every (category, season) pair of a query.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreakFinder {
    pub mode: BoundaryMode,
}

impl StreakFinder {
    pub fn new(mode: BoundaryMode) -> Self {
        Self { mode }
    }

    /// Find the player's streak for every requested category in every season
    /// with data. Seasons without a recorded value are skipped.
    pub fn find(
        &self,
        records: &[GameRecord],
        player: PlayerId,
        categories: &[Category],
    ) -> Vec<StreakResult> {
        let games = filter_regular_season(records, player);
        debug!("player {} has {} regular-season games", player, games.len());

        let mut results = Vec::new();
        for &category in categories {
            for season in SEASONS {
                let season_games = games_in_season(&games, season);
                if let Some(result) = self.find_in_season(&season_games, category, season) {
                    results.push(result);
                }
            }
        }
        results
    }

    /// Streak for one category in one season's games, or `None` when the
    /// season has no recorded value for the category.
    pub fn find_in_season(
        &self,
        season_games: &[&GameRecord],
        category: Category,
        season: Season,
    ) -> Option<StreakResult> {
        let Some(series) = build_series(season_games, category) else {
            debug!("no {} data for {}, skipping", category, season);
            return None;
        };
        let located = locate(&series.deviations(), self.mode)?;

        let start = series.points[located.left_index].played_on;
        let end = series.points[located.right_index].played_on;
        info!(
            "best stretch category={} season={} start={:?} end={:?} sum={:.1}",
            category, season, start, end, located.best_sum
        );

        Some(StreakResult {
            category,
            season,
            start,
            end,
            best_sum: located.best_sum,
            season_mean: series.mean,
            games: series.len(),
            left_index: located.left_index,
            right_index: located.right_index,
            window_mean: window_mean(&series, located.left_index, located.right_index),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
