//! courseai configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::scoring::ScoringCriteria;

/// Environment variable that overrides `scoring.time_limit_secs`.
pub const TIME_LIMIT_ENV: &str = "COURSEAI_TIME_LIMIT_SECS";

/// Top-level courseai configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseaiConfig {
    /// Criteria used for every score unless a command overrides them.
    #[serde(default)]
    pub scoring: ScoringCriteria,
    /// Output directory for graded reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Workers used by `courseai queue` when `--workers` is not given.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./courseai-results")
}
fn default_workers() -> usize {
    1
}

impl Default for CourseaiConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringCriteria::default(),
            output_dir: default_output_dir(),
            workers: default_workers(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `courseai.toml` in the current directory
/// 2. `~/.config/courseai/config.toml`
///
/// Environment variable override: `COURSEAI_TIME_LIMIT_SECS`.
pub fn load_config() -> Result<CourseaiConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<CourseaiConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("courseai.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("invalid config: {}", path.display()))?
        }
        None => CourseaiConfig::default(),
    };

    apply_env_overrides(config)
}

/// Parse and validate a config document.
pub fn parse_config_str(content: &str) -> Result<CourseaiConfig> {
    let mut config: CourseaiConfig = toml::from_str(content).context("failed to parse TOML")?;
    config.scoring = config.scoring.normalized();
    config.scoring.validate()?;
    anyhow::ensure!(config.workers >= 1, "workers must be at least 1");
    Ok(config)
}

fn apply_env_overrides(mut config: CourseaiConfig) -> Result<CourseaiConfig> {
    if let Ok(raw) = std::env::var(TIME_LIMIT_ENV) {
        let secs: f64 = raw
            .trim()
            .parse()
            .with_context(|| format!("{TIME_LIMIT_ENV} is not a number: '{raw}'"))?;
        config.scoring.time_limit = secs;
        config.scoring.validate()?;
    }
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("courseai"))
}
