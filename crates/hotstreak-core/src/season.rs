// Season table and regular-season game filtering.
//
// Fixture identifiers encode the season in the millions digit group and the
// competition phase in the hundred-thousands group: regular-season games of
// season token `s` occupy `[s * 1_000_000 + 200_000, s * 1_000_000 + 400_000)`.

use crate::record::{GameRecord, PlayerId};
use serde::Serialize;
use std::fmt;
use std::ops::Range;

// ---------------------------------------------------------------------------
// Season table
// ---------------------------------------------------------------------------

const SEASON_STRIDE: u64 = 1_000_000;
const REGULAR_SEASON_START: u64 = 200_000;
const REGULAR_SEASON_END: u64 = 400_000;

/// A supported season, identified by the two-digit token of its starting year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Season {
    pub token: u8,
}

/// Every season the analysis covers, oldest first (2016-2017 through 2020-2021).
pub const SEASONS: [Season; 5] = [
    Season { token: 16 },
    Season { token: 17 },
    Season { token: 18 },
    Season { token: 19 },
    Season { token: 20 },
];

impl Season {
    /// Half-open fixture identifier range of this season's regular-season games.
    pub fn regular_season_range(&self) -> Range<u64> {
        let base = u64::from(self.token) * SEASON_STRIDE;
        base + REGULAR_SEASON_START..base + REGULAR_SEASON_END
    }

    pub fn contains(&self, fixture_id: u64) -> bool {
        self.regular_season_range().contains(&fixture_id)
    }

    /// Calendar years the season spans, e.g. `(2018, 2019)`.
    pub fn years(&self) -> (u16, u16) {
        let start = 2000 + u16::from(self.token);
        (start, start + 1)
    }

    /// Display label such as `2018-2019`.
    pub fn label(&self) -> String {
        let (start, end) = self.years();
        format!("{start}-{end}")
    }

    /// The supported season whose regular-season range holds `fixture_id`.
    pub fn for_fixture(fixture_id: u64) -> Option<Season> {
        SEASONS.into_iter().find(|s| s.contains(fixture_id))
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Whether a fixture identifier belongs to the regular season of any
/// supported season. Zero never does.
pub fn is_regular_season(fixture_id: u64) -> bool {
    Season::for_fixture(fixture_id).is_some()
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Keep the player's regular-season games, ordered by fixture identifier.
///
/// Records without a fixture identifier, with a zero identifier, or with an
/// identifier outside every supported regular season are dropped. Game dates
/// and category values are not inspected here; an undated game still counts
/// toward its season.
pub fn filter_regular_season(records: &[GameRecord], player: PlayerId) -> Vec<&GameRecord> {
    let mut games: Vec<&GameRecord> = records
        .iter()
        .filter(|r| r.player_id == player)
        .filter(|r| r.fixture_id.is_some_and(is_regular_season))
        .collect();
    // Stable, so duplicate fixture rows keep their table order.
    games.sort_by_key(|r| r.fixture_id);
    games
}

/// Restrict already-filtered games to one season, preserving order.
pub fn games_in_season<'a>(games: &[&'a GameRecord], season: Season) -> Vec<&'a GameRecord> {
    games
        .iter()
        .copied()
        .filter(|r| r.fixture_id.is_some_and(|id| season.contains(id)))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
