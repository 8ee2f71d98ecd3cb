//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Environment variables, if `POOLSTAT_DB_PATH` is set and non-empty.
//!    Errors in the other variables are returned, not skipped.
//! 2. Otherwise a config file, probed from the standard locations
//!
//! Whatever the source, the result is validated before it is returned.
//!
//! ## Environment Variables
//! - `POOLSTAT_NAMESPACE`: Metric name prefix (default: none)
//! - `POOLSTAT_LISTEN_ADDR`: Scrape endpoint address (default: `127.0.0.1:9187`)
//! - `POOLSTAT_METRICS_PATH`: Scrape endpoint path (default: `/metrics`)
//! - `POOLSTAT_LOG`: Log filter directive (default: `info`)
//! - `POOLSTAT_LOG_FORMAT`: `pretty` or `json` (default: `pretty`)
//! - `POOLSTAT_DB_PATH`: Database file path (required)
//! - `POOLSTAT_DB_POOL_SIZE`: Connection pool size (default: 10)
//! - `POOLSTAT_DB_CONNECTION_TIMEOUT`: Connection timeout in seconds (default: 5)
//!
//! ## File Locations
//! Probed in order, first hit wins:
//! 1. `./poolstat.toml`, `./poolstat.json`
//! 2. `./config.toml`, `./config.json`
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use poolstat_domain::{
    DatabaseConfig, ExporterConfig, LogConfig, LogFormat, PoolStatError, Result,
};

const DB_PATH_VAR: &str = "POOLSTAT_DB_PATH";

const CONFIG_FILE_NAMES: [&str; 4] =
    ["poolstat.toml", "poolstat.json", "config.toml", "config.json"];

/// Load configuration, environment first, then file.
///
/// The environment is used whenever `POOLSTAT_DB_PATH` is set; any other
/// bad variable is then reported as is. Only without it are the standard
/// file locations probed.
///
/// # Errors
/// Returns `PoolStatError::Config` if the chosen source does not yield a
/// valid configuration.
pub fn load() -> Result<ExporterConfig> {
    load_or_file(None)
}

fn load_or_file(fallback: Option<PathBuf>) -> Result<ExporterConfig> {
    if env_opt(DB_PATH_VAR).is_none() {
        tracing::debug!("{} not set, loading configuration from file", DB_PATH_VAR);
        return load_from_file(fallback);
    }

    let config = load_from_env()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from `POOLSTAT_*` environment variables.
///
/// # Errors
/// Returns `PoolStatError::Config` if `POOLSTAT_DB_PATH` is missing, a
/// variable does not parse, or the result fails validation.
pub fn load_from_env() -> Result<ExporterConfig> {
    let defaults = ExporterConfig::default();

    let config = ExporterConfig {
        namespace: env_opt("POOLSTAT_NAMESPACE").unwrap_or(defaults.namespace),
        listen_addr: env_opt("POOLSTAT_LISTEN_ADDR").unwrap_or(defaults.listen_addr),
        metrics_path: env_opt("POOLSTAT_METRICS_PATH").unwrap_or(defaults.metrics_path),
        log: LogConfig {
            filter: env_opt("POOLSTAT_LOG").unwrap_or(defaults.log.filter),
            format: env_parse::<LogFormat>("POOLSTAT_LOG_FORMAT")?
                .unwrap_or(defaults.log.format),
        },
        database: DatabaseConfig {
            path: env_var(DB_PATH_VAR)?,
            pool_size: env_parse("POOLSTAT_DB_POOL_SIZE")?
                .unwrap_or(defaults.database.pool_size),
            connection_timeout_secs: env_parse("POOLSTAT_DB_CONNECTION_TIMEOUT")?
                .unwrap_or(defaults.database.connection_timeout_secs),
        },
    };

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file.
///
/// If `path` is `None`, uses [`probe_config_paths`]. The format is chosen
/// by extension: `.toml` or `.json`.
///
/// # Errors
/// Returns `PoolStatError::Config` if the file is missing or unreadable,
/// the format is unsupported or malformed, or validation fails.
pub fn load_from_file(path: Option<PathBuf>) -> Result<ExporterConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PoolStatError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PoolStatError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PoolStatError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

fn parse_config(contents: &str, path: &Path) -> Result<ExporterConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PoolStatError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PoolStatError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(PoolStatError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe the standard locations for a config file.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `PoolStatError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        PoolStatError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Optional environment variable; empty counts as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

/// Parse an optional environment variable.
///
/// # Errors
/// Returns `PoolStatError::Config` if the variable is set but does not
/// parse.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| PoolStatError::Config(format!("Invalid value for {}: {}", key, e)))
        })
        .transpose()
}
