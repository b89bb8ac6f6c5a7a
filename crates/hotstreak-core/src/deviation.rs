// Per-season deviation series: each game's value minus the season mean.

use crate::record::{Category, GameRecord};
use chrono::NaiveDate;

/// One game's entry in a deviation series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviationPoint {
    /// `None` when the table had no usable date for the game.
    pub played_on: Option<NaiveDate>,
    pub value: f64,
    pub deviation: f64,
}

/// Deviations from the season mean for one category, in game order.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviationSeries {
    pub category: Category,
    /// Season mean, rounded to one decimal.
    pub mean: f64,
    pub points: Vec<DeviationPoint>,
}

impl DeviationSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn deviations(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.deviation).collect()
    }
}

/// Round to one decimal digit, ties to even on the exact binary value.
///
/// Float formatting is correctly rounded, so going through it gives the same
/// result as decimal rounding of the stored value (`0.35` is stored slightly
/// below the tie and becomes `0.3`).
pub fn round_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Build the deviation series for `category` from one season's games.
///
/// Games without a value for the category are left out entirely; undated
/// games with a value are kept. Returns `None` when no game has a value. The
/// mean is rounded before it is subtracted and every deviation is rounded
/// independently.
pub fn build_series(games: &[&GameRecord], category: Category) -> Option<DeviationSeries> {
    let present: Vec<(Option<NaiveDate>, f64)> = games
        .iter()
        .filter_map(|g| Some((g.played_on, g.value(category)?)))
        .collect();

    if present.is_empty() {
        return None;
    }

    let total: f64 = present.iter().map(|(_, v)| v).sum();
    let mean = round_tenth(total / present.len() as f64);

    let points = present
        .into_iter()
        .map(|(played_on, value)| DeviationPoint {
            played_on,
            value,
            deviation: round_tenth(value - mean),
        })
        .collect();

    Some(DeviationSeries {
        category,
        mean,
        points,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
