// Hot streak core: season filtering, deviation series and the
// maximum-subarray locator that finds a player's best stretch.

pub mod deviation;
pub mod locator;
pub mod record;
pub mod season;
pub mod streak;

pub use locator::BoundaryMode;
pub use record::{Category, GameRecord, PlayerId, StatLine};
pub use season::{Season, SEASONS};
pub use streak::{StreakFinder, StreakResult};
