// Hot streak finder entry point.
//
// Startup sequence:
// 1. Parse command-line arguments
// 2. Load config (copying defaults on first run)
// 3. Initialize tracing (log to file, console is for results)
// 4. Load the per-game table
// 5. Run one search from arguments, or the interactive session

use hotstreak_app::config::{self, Config};
use hotstreak_app::dataset;
use hotstreak_app::input::{parse_categories, PlayerDirectory};
use hotstreak_app::report::{write_results, OutputFormat};
use hotstreak_app::session::Session;
use hotstreak_core::{BoundaryMode, StreakFinder};

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "hotstreak")]
#[command(
    about = "Find a player's hottest stretch of each season, per stat category",
    long_about = None
)]
struct Cli {
    /// Player display name. Runs a single search instead of prompting.
    #[arg(long)]
    player: Option<String>,

    /// Category name, comma-separated list, or "all" (with --player)
    #[arg(long, default_value = "all")]
    category: String,

    /// Games CSV path, overriding data.games_path from the config
    #[arg(long)]
    data: Option<PathBuf>,

    /// Report the boundaries of the winning window instead of the legacy ones
    #[arg(long)]
    exact_boundaries: bool,

    /// Print the deviation sum and means under each streak
    #[arg(long)]
    details: bool,

    /// Print one JSON object per streak
    #[arg(long, conflicts_with = "details")]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    // 1. Arguments
    let cli = Cli::parse();

    // 2. Config
    let config = config::load_config().context("failed to load configuration")?;

    // 3. Tracing
    init_tracing(&config)?;
    match &config.source {
        Some(path) => info!("Config loaded from {}", path.display()),
        None => info!("No config directory found, using built-in defaults"),
    }

    // 4. Games table
    let games_path = cli
        .data
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.data.games_path));
    let records = dataset::load_games(&games_path).context("failed to load player game data")?;

    let mode = if cli.exact_boundaries {
        BoundaryMode::Exact
    } else {
        config.analysis.boundary_mode
    };
    info!("Boundary mode: {:?}", mode);
    let finder = StreakFinder::new(mode);

    let format = if cli.json {
        OutputFormat::Json
    } else if cli.details {
        OutputFormat::Detailed
    } else {
        OutputFormat::Text
    };

    // 5. One-shot or interactive
    let stdout = std::io::stdout();
    match cli.player {
        Some(name) => {
            let directory = PlayerDirectory::from_records(&records);
            let player_id = directory.resolve(&name)?;
            let categories = parse_categories(&cli.category)?;
            let results = finder.find(&records, player_id, &categories);
            write_results(&mut stdout.lock(), player_id, name.trim(), &categories, &results, format)
                .context("failed to write results")?;
        }
        None => {
            let stdin = std::io::stdin();
            Session::new(&records, finder, format, stdin.lock(), stdout.lock())
                .run()
                .context("console session failed")?;
        }
    }

    info!("Hot streak finder finished");
    Ok(())
}

/// Initialize tracing to log to a file under the configured log directory.
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join(&config.logging.file))
        .context("failed to open log file")?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
