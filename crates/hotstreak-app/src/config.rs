// Configuration loading and parsing (config/hotstreak.toml).

use hotstreak_core::BoundaryMode;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_DIR: &str = "config";
const DEFAULTS_DIR: &str = "defaults";
const CONFIG_FILE: &str = "hotstreak.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub data: DataConfig,
    pub logging: LoggingConfig,
    pub analysis: AnalysisConfig,
    /// File the config was read from; `None` for the built-in defaults.
    pub source: Option<PathBuf>,
}

/// Raw deserialization target for hotstreak.toml.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    data: DataConfig,
    logging: LoggingConfig,
    #[serde(default)]
    analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// CSV table with one row per player per game.
    pub games_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Directory for the log file. Empty means the per-user data directory.
    #[serde(default)]
    pub dir: String,
    pub file: String,
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    pub filter: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub boundary_mode: BoundaryMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: DataConfig {
                games_path: "data/intermediate/comprehensive_player_statistic.csv".into(),
            },
            logging: LoggingConfig {
                dir: "logs".into(),
                file: "hotstreak.log".into(),
                filter: "hotstreak=debug,warn".into(),
            },
            analysis: AnalysisConfig::default(),
            source: None,
        }
    }
}

impl Config {
    /// Directory the log file goes in.
    pub fn log_dir(&self) -> PathBuf {
        if !self.logging.dir.trim().is_empty() {
            return PathBuf::from(&self.logging.dir);
        }
        directories::ProjectDirs::from("", "", "hotstreak")
            .map(|dirs| dirs.data_local_dir().join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/hotstreak.toml` relative to `base_dir`.
///
/// Does not copy defaults; prefer `load_config()`.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join(CONFIG_DIR).join(CONFIG_FILE);
    let text = read_file(&path)?;
    let file: ConfigFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let config = Config {
        data: file.data,
        logging: file.logging,
        analysis: file.analysis,
        source: Some(path),
    };

    validate(&config)?;

    Ok(config)
}

/// Copy `defaults/hotstreak.toml` to `config/hotstreak.toml` unless the
/// config file already exists. Returns the path written, if any.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join(CONFIG_DIR).join(CONFIG_FILE);
    if target.exists() {
        return Ok(None);
    }

    let source = base_dir.join(DEFAULTS_DIR).join(CONFIG_FILE);
    if !source.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no {CONFIG_DIR}/{CONFIG_FILE} and no {DEFAULTS_DIR}/{CONFIG_FILE} in {}",
                base_dir.display()
            ),
        });
    }

    std::fs::create_dir_all(base_dir.join(CONFIG_DIR)).map_err(|e| {
        ConfigError::DefaultsCopyError {
            message: format!("failed to create config directory: {e}"),
        }
    })?;
    std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
    })?;

    Ok(Some(target))
}

/// Load config relative to `base_dir`, copying defaults first. Falls back to
/// the built-in defaults when neither a config file nor a defaults file exists.
pub fn load_config_in(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_file = base_dir.join(CONFIG_DIR).join(CONFIG_FILE);
    let defaults_file = base_dir.join(DEFAULTS_DIR).join(CONFIG_FILE);
    if !config_file.exists() && !defaults_file.exists() {
        return Ok(Config::default());
    }
    ensure_config_file(base_dir)?;
    load_config_from(base_dir)
}

/// Convenience wrapper: loads config relative to the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_in(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data.games_path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.games_path".into(),
            message: "must not be empty".into(),
        });
    }

    if config.logging.file.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "logging.file".into(),
            message: "must not be empty".into(),
        });
    }

    if config.logging.filter.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "logging.filter".into(),
            message: "must not be empty".into(),
        });
    }

    if let Err(e) = tracing_subscriber::EnvFilter::try_new(&config.logging.filter) {
        return Err(ConfigError::ValidationError {
            field: "logging.filter".into(),
            message: format!("invalid filter directive: {e}"),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const VALID: &str = r#"
[data]
games_path = "tests/fixtures/player_games.csv"

[logging]
dir = "logs"
file = "hotstreak.log"
filter = "hotstreak=debug,warn"

[analysis]
boundary_mode = "exact"
"#;

    /// Fresh scratch directory under the system temp dir.
    fn scratch(name: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(format!("hotstreak_{name}"));
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        tmp
    }

    fn write_config(base: &Path, text: &str) {
        let dir = base.join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(CONFIG_FILE), text).unwrap();
    }

    #[test]
    fn load_valid_config() {
        let tmp = scratch("config_valid");
        write_config(&tmp, VALID);

        let config = load_config_from(&tmp).expect("should load valid config");
        assert_eq!(config.data.games_path, "tests/fixtures/player_games.csv");
        assert_eq!(config.logging.file, "hotstreak.log");
        assert_eq!(config.analysis.boundary_mode, BoundaryMode::Exact);
        assert_eq!(config.log_dir(), PathBuf::from("logs"));
        assert!(config.source.is_some_and(|p| p.ends_with("hotstreak.toml")));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn boundary_mode_defaults_to_legacy() {
        let tmp = scratch("config_default_mode");
        write_config(&tmp, &VALID.replace("[analysis]\nboundary_mode = \"exact\"\n", ""));

        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.analysis.boundary_mode, BoundaryMode::Legacy);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn project_defaults_file_is_valid() {
        let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
        let tmp = scratch("config_project_defaults");
        write_config(&tmp, &fs::read_to_string(manifest.join("defaults/hotstreak.toml")).unwrap());

        let config = load_config_from(&tmp).expect("shipped defaults should load");
        assert_eq!(config.analysis.boundary_mode, BoundaryMode::Legacy);
        assert_eq!(config.data.games_path, Config::default().data.games_path);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_games_path() {
        let tmp = scratch("config_empty_games_path");
        write_config(&tmp, &VALID.replace("tests/fixtures/player_games.csv", ""));

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "data.games_path"),
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_filter() {
        let tmp = scratch("config_empty_filter");
        write_config(&tmp, &VALID.replace("hotstreak=debug,warn", " "));

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "logging.filter"),
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_unknown_boundary_mode() {
        let tmp = scratch("config_unknown_mode");
        write_config(&tmp, &VALID.replace("\"exact\"", "\"fuzzy\""));

        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }), "got: {err}");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_config() {
        let tmp = scratch("config_missing");

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => assert!(path.ends_with(CONFIG_FILE)),
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = scratch("config_invalid_toml");
        write_config(&tmp, "this is not valid [[[ toml");

        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }), "got: {err}");

        let _ = fs::remove_dir_all(&tmp);
    }

    fn write_defaults(base: &Path, text: &str) {
        let dir = base.join(DEFAULTS_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(CONFIG_FILE), text).unwrap();
    }

    #[test]
    fn ensure_config_file_copies_default() {
        let tmp = scratch("config_ensure_copies");
        write_defaults(&tmp, VALID);

        let copied = ensure_config_file(&tmp).expect("should succeed");
        assert_eq!(copied, Some(tmp.join(CONFIG_DIR).join(CONFIG_FILE)));
        let content = fs::read_to_string(tmp.join(CONFIG_DIR).join(CONFIG_FILE)).unwrap();
        assert_eq!(content, VALID);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_keeps_existing() {
        let tmp = scratch("config_ensure_keeps");
        write_defaults(&tmp, VALID);
        write_config(&tmp, "# custom\n");

        let copied = ensure_config_file(&tmp).expect("should succeed");
        assert_eq!(copied, None);
        let content = fs::read_to_string(tmp.join(CONFIG_DIR).join(CONFIG_FILE)).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_errors_without_any_file() {
        let tmp = scratch("config_both_missing");
        fs::create_dir_all(tmp.join(DEFAULTS_DIR)).unwrap();

        let err = ensure_config_file(&tmp).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("no defaults/hotstreak.toml"), "got: {message}");
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn load_config_in_copies_then_loads() {
        let tmp = scratch("config_load_in");
        write_defaults(&tmp, VALID);

        let config = load_config_in(&tmp).expect("should load copied defaults");
        assert_eq!(config.analysis.boundary_mode, BoundaryMode::Exact);
        assert!(tmp.join(CONFIG_DIR).join(CONFIG_FILE).exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn built_in_defaults_without_config_dirs() {
        let tmp = scratch("config_builtin");

        let config = load_config_in(&tmp).expect("should fall back");
        assert!(config.source.is_none());
        assert_eq!(config.analysis.boundary_mode, BoundaryMode::Legacy);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn empty_log_dir_uses_user_data_dir() {
        let mut config = Config::default();
        config.logging.dir = String::new();
        assert!(config.log_dir().ends_with("logs"));
    }
}
