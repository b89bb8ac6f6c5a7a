// Per-game records and the statistical categories they carry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Numeric player identifier as it appears in the source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// The eight fantasy categories tracked per game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Points,
    Rebounds,
    Assists,
    Steals,
    Blocks,
    #[serde(rename = "fg%")]
    FieldGoalPct,
    #[serde(rename = "ft%")]
    FreeThrowPct,
    #[serde(rename = "3pt%")]
    ThreePointPct,
}

impl Category {
    /// Every category, in the order they are offered to the user.
    pub const ALL: [Category; 8] = [
        Category::Points,
        Category::Rebounds,
        Category::Assists,
        Category::Steals,
        Category::Blocks,
        Category::FieldGoalPct,
        Category::FreeThrowPct,
        Category::ThreePointPct,
    ];

    /// Column name of this category in the game table (`points`, `fg%`, ...).
    pub fn column_name(&self) -> &'static str {
        match self {
            Category::Points => "points",
            Category::Rebounds => "rebounds",
            Category::Assists => "assists",
            Category::Steals => "steals",
            Category::Blocks => "blocks",
            Category::FieldGoalPct => "fg%",
            Category::FreeThrowPct => "ft%",
            Category::ThreePointPct => "3pt%",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category `{0}`")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    /// Accepts the exact column names. Matching is case-insensitive and
    /// ignores surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.column_name() == wanted)
            .ok_or_else(|| ParseCategoryError(s.trim().to_string()))
    }
}

// ---------------------------------------------------------------------------
// Game records
// ---------------------------------------------------------------------------

/// Category values for one game. `None` means the value was not recorded,
/// which is different from a recorded zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    pub points: Option<f64>,
    pub rebounds: Option<f64>,
    pub assists: Option<f64>,
    pub steals: Option<f64>,
    pub blocks: Option<f64>,
    pub fg_pct: Option<f64>,
    pub ft_pct: Option<f64>,
    pub three_pt_pct: Option<f64>,
}

impl StatLine {
    pub fn get(&self, category: Category) -> Option<f64> {
        match category {
            Category::Points => self.points,
            Category::Rebounds => self.rebounds,
            Category::Assists => self.assists,
            Category::Steals => self.steals,
            Category::Blocks => self.blocks,
            Category::FieldGoalPct => self.fg_pct,
            Category::FreeThrowPct => self.ft_pct,
            Category::ThreePointPct => self.three_pt_pct,
        }
    }

    pub fn set(&mut self, category: Category, value: Option<f64>) {
        let slot = match category {
            Category::Points => &mut self.points,
            Category::Rebounds => &mut self.rebounds,
            Category::Assists => &mut self.assists,
            Category::Steals => &mut self.steals,
            Category::Blocks => &mut self.blocks,
            Category::FieldGoalPct => &mut self.fg_pct,
            Category::FreeThrowPct => &mut self.ft_pct,
            Category::ThreePointPct => &mut self.three_pt_pct,
        };
        *slot = value;
    }
}

/// One row of the per-game table.
///
/// `fixture_id` and `played_on` are optional because the source table
/// contains placeholder rows for players without any recorded game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub player_id: PlayerId,
    pub player_name: String,
    pub fixture_id: Option<u64>,
    pub played_on: Option<NaiveDate>,
    pub stats: StatLine,
}

impl GameRecord {
    pub fn value(&self, category: Category) -> Option<f64> {
        self.stats.get(category)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
