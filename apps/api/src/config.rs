use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};

use crate::matching::{MatchingConfig, ScoreWeights};

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON seed for the in-memory directory. Empty directory when unset.
    pub catalog_path: Option<PathBuf>,
    pub matching: MatchingConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            catalog_path: lookup("CATALOG_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            matching: matching_from_lookup(&lookup)?,
        })
    }
}

fn matching_from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<MatchingConfig> {
    let defaults = MatchingConfig::default();

    let skill = parse_or(lookup, "MATCH_SKILL_WEIGHT", defaults.weights.skill)?;
    let margin_threshold = parse_or(lookup, "MATCH_MARGIN_THRESHOLD", defaults.margin_threshold)?;
    let tolerance = parse_or(lookup, "MATCH_SKILL_TOLERANCE", 0usize)?;

    let base = match lookup("MATCH_ELIGIBILITY_POLICY").as_deref().map(str::trim) {
        None | Some("") | Some("score_only") => defaults,
        Some("skill_gated") => MatchingConfig::skill_gated(tolerance),
        Some(other) => bail!(
            "MATCH_ELIGIBILITY_POLICY must be 'score_only' or 'skill_gated', got '{other}'"
        ),
    };

    let config = MatchingConfig {
        weights: ScoreWeights {
            skill,
            academic: 1.0 - skill,
        },
        margin_threshold,
        ..base
    };
    config
        .validate()
        .map_err(|e| anyhow!("invalid matching configuration: {e}"))?;
    Ok(config)
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
