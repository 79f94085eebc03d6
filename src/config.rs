/// Service configuration.
///
/// Command-line flags, each with an environment fallback, are merged over
/// an optional TOML file. A flag or variable wins over the file. `main`
/// reads `.env` through `dotenv` before parsing, so local overrides do not
/// need to be exported.
///
/// | Flag                | Variable                  | Overrides         |
/// |---------------------|---------------------------|-------------------|
/// | `--config`          | `HEATMON_CONFIG`          | config file path  |
/// | `--stations-file`   | `HEATMON_STATIONS_FILE`   | `stations_file`   |
/// | `--log-level`       | `HEATMON_LOG_LEVEL`       | `logging.level`   |
/// | `--default-station` | `HEATMON_DEFAULT_STATION` | `default_station` |

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::logging::{self, LogLevel, Source};
use crate::model::HeatmonError;

#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about = "Classifies weather station heat index readings")]
pub struct Cli {
    /// Print the station verification report as JSON instead of the table
    #[arg(long)]
    pub json: bool,

    /// Path to a TOML config file
    #[arg(short, long, env = "HEATMON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Station TOML file; the built-in registry is used when unset
    #[arg(short, long, env = "HEATMON_STATIONS_FILE")]
    pub stations_file: Option<PathBuf>,

    /// Minimum log level: debug, info, warn or error
    #[arg(short, long, env = "HEATMON_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Station selected when the report opens
    #[arg(short, long, env = "HEATMON_DEFAULT_STATION")]
    pub default_station: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HeatmonConfig {
    /// Station TOML file. The built-in registry is used when unset.
    pub stations_file: Option<PathBuf>,
    /// Station selected when the dashboard opens.
    pub default_station: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// File this config was read from, if any.
    #[serde(skip)]
    pub loaded_from: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    pub file: Option<String>,
    #[serde(default = "default_timestamps")]
    pub timestamps: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timestamps() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
            timestamps: default_timestamps(),
        }
    }
}

impl LoggingConfig {
    pub fn min_level(&self) -> Result<LogLevel, HeatmonError> {
        self.level.parse()
    }
}

impl HeatmonConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, HeatmonError> {
        let config: HeatmonConfig = toml::from_str(s)
            .map_err(|e| HeatmonError::Config(format!("invalid config file: {}", e)))?;
        config.logging.min_level()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, HeatmonError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Lays command-line values over this config. Only flags that were
    /// given (or whose variable was set) replace file values.
    pub fn merge_cli(self, cli: &Cli) -> Result<Self, HeatmonError> {
        if let Some(level) = &cli.log_level {
            level.parse::<LogLevel>()?;
        }
        Ok(Self {
            stations_file: cli.stations_file.clone().or(self.stations_file),
            default_station: cli.default_station.clone().or(self.default_station),
            logging: LoggingConfig {
                level: cli.log_level.clone().unwrap_or(self.logging.level),
                ..self.logging
            },
            loaded_from: self.loaded_from,
        })
    }

    /// Reads the file named by `--config` (if any), then merges the rest
    /// of the command line over it.
    pub fn load(cli: &Cli) -> Result<Self, HeatmonError> {
        let base = match &cli.config {
            Some(path) => Self {
                loaded_from: Some(path.clone()),
                ..Self::from_file(path)?
            },
            None => Self::default(),
        };
        base.merge_cli(cli)
    }

    /// Logs where the effective settings came from. Call after the logger
    /// is installed.
    pub fn log_effective(&self) {
        match &self.loaded_from {
            Some(path) => logging::info(
                Source::Config,
                None,
                &format!("Loaded config from {}", path.display()),
            ),
            None => logging::info(Source::Config, None, "No config file; using defaults"),
        }
        let stations = self
            .stations_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in registry".to_string());
        logging::debug(
            Source::Config,
            None,
            &format!(
                "stations={} default_station={} log_level={}",
                stations,
                self.default_station.as_deref().unwrap_or("-"),
                self.logging.level
            ),
        );
    }
}
