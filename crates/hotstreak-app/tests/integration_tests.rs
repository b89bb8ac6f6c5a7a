// Integration tests for the hot streak finder.
//
// These load the fixture game table from disk and drive the library API the
// same way the binary does: dataset loading, player lookup, category
// selection, streak search and result rendering.

use std::path::PathBuf;

use chrono::NaiveDate;
use hotstreak_app::dataset::load_games;
use hotstreak_app::input::{parse_categories, InputError, PlayerDirectory};
use hotstreak_app::report::{write_results, OutputFormat};
use hotstreak_app::session::Session;
use hotstreak_core::{BoundaryMode, Category, GameRecord, PlayerId, StreakFinder, StreakResult};

// ===========================================================================
// Test helpers
// ===========================================================================

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/player_games.csv")
}

fn fixture_games() -> Vec<GameRecord> {
    load_games(&fixture_path()).expect("fixture CSV should load")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn span(start: NaiveDate, end: NaiveDate) -> (Option<NaiveDate>, Option<NaiveDate>) {
    (Some(start), Some(end))
}

fn search(mode: BoundaryMode, name: &str, selection: &str) -> Vec<StreakResult> {
    let games = fixture_games();
    let player = PlayerDirectory::from_records(&games).resolve(name).unwrap();
    let categories = parse_categories(selection).unwrap();
    StreakFinder::new(mode).find(&games, player, &categories)
}

// ===========================================================================
// Loading
// ===========================================================================

#[test]
fn fixture_loads_and_skips_malformed_row() {
    let games = fixture_games();
    assert_eq!(games.len(), 17);
    assert!(games.iter().all(|g| g.player_id != PlayerId(5)));
}

#[test]
fn directory_covers_named_players() {
    let games = fixture_games();
    let directory = PlayerDirectory::from_records(&games);

    assert_eq!(directory.len(), 3);
    assert_eq!(directory.resolve("A B"), Ok(PlayerId(2)));
    assert_eq!(directory.resolve("D E"), Ok(PlayerId(4)));
    assert_eq!(directory.resolve("F G"), Err(InputError::UnknownPlayer("F G".into())));
}

// ===========================================================================
// Streak search
// ===========================================================================

#[test]
fn points_streaks_for_each_season_with_games() {
    let results = search(BoundaryMode::Legacy, "A B", "points");
    assert_eq!(results.len(), 2);

    let first = &results[0];
    assert_eq!(first.season_label(), "2018-2019");
    assert_eq!(first.games, 9);
    assert_eq!((first.start, first.end), span(date(2018, 10, 24), date(2018, 10, 26)));

    let second = &results[1];
    assert_eq!(second.season_label(), "2019-2020");
    assert_eq!(second.games, 4);
    assert!((second.season_mean - 20.0).abs() < 1e-9);
}

#[test]
fn legacy_and_exact_boundaries_diverge_on_one_sided_best() {
    // 2019-2020 deviations are [10, -15, 5, 0]: the best window is the first
    // game alone, but the last crossing scan leaves both legacy boundaries on
    // the third game.
    let legacy = search(BoundaryMode::Legacy, "A B", "points");
    let exact = search(BoundaryMode::Exact, "A B", "points");

    assert_eq!(legacy[1].best_sum, 10.0);
    assert_eq!((legacy[1].start, legacy[1].end), span(date(2019, 10, 25), date(2019, 10, 25)));
    assert_eq!(legacy[1].window_mean, Some(25.0));

    assert_eq!(exact[1].best_sum, 10.0);
    assert_eq!((exact[1].start, exact[1].end), span(date(2019, 10, 23), date(2019, 10, 23)));
    assert_eq!(exact[1].window_mean, Some(30.0));

    // The 2018-2019 streak crosses the midpoint, so both modes agree.
    assert_eq!(legacy[0], exact[0]);
}

#[test]
fn rebounds_streak_ignores_seasons_without_values() {
    let results = search(BoundaryMode::Legacy, "A B", "rebounds");
    assert_eq!(results.len(), 1);
    assert_eq!((results[0].start, results[0].end), span(date(2018, 10, 20), date(2018, 10, 22)));
    assert!((results[0].best_sum - 10.5).abs() < 1e-9);
}

#[test]
fn all_categories_skip_empty_ones() {
    let results = search(BoundaryMode::Legacy, "A B", "all");
    let keys: Vec<(Category, String)> =
        results.iter().map(|r| (r.category, r.season_label())).collect();
    assert_eq!(
        keys,
        vec![
            (Category::Points, "2018-2019".to_string()),
            (Category::Points, "2019-2020".to_string()),
            (Category::Rebounds, "2018-2019".to_string()),
            (Category::Assists, "2018-2019".to_string()),
            (Category::Steals, "2018-2019".to_string()),
            (Category::Blocks, "2018-2019".to_string()),
        ]
    );
}

#[test]
fn player_without_fixtures_has_no_streaks() {
    assert!(search(BoundaryMode::Legacy, "D E", "all").is_empty());
}

// ===========================================================================
// Rendering and console session
// ===========================================================================

#[test]
fn rendered_text_matches_console_format() {
    let results = search(BoundaryMode::Legacy, "A B", "points");
    let mut out = Vec::new();
    let categories = [Category::Points];
    write_results(&mut out, PlayerId(2), "A B", &categories, &results, OutputFormat::Text).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains(
        "Best stretch for [points] for [2018-2019] season is between: 2018-10-24 & 2018-10-26"
    ));
    assert!(text.contains(
        "Best stretch for [points] for [2019-2020] season is between: 2019-10-25 & 2019-10-25"
    ));
}

#[test]
fn session_runs_two_searches() {
    let games = fixture_games();
    let script = "Nobody\nA B\npoints\nyes\nC D\nfg%,points\nno\n";
    let mut out = Vec::new();
    Session::new(&games, StreakFinder::default(), OutputFormat::Text, script.as_bytes(), &mut out)
        .run()
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(text.matches("INVALID INPUT").count(), 1);
    assert_eq!(text.matches("Best stretch for [points]").count(), 3);
    assert!(text.contains("No regular-season data for [fg%]."));
    assert!(text.contains("2018-10-27 & 2018-10-27"));
    assert!(text.ends_with("Execution complete. Goodbye.\n"));
}

#[test]
fn json_session_output_parses() {
    let games = fixture_games();
    let mut out = Vec::new();
    let script = "A B\npoints\nno\n";
    Session::new(&games, StreakFinder::default(), OutputFormat::Json, script.as_bytes(), &mut out)
        .run()
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    let records: Vec<serde_json::Value> = text
        .lines()
        .filter(|l| l.starts_with('{'))
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["end"], "2018-10-26");
    assert_eq!(records[1]["season"], "2019-2020");
}
