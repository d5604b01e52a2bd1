//! Configuration for graph caching and trace settings.
//!
//! Load order: `hopgraph.toml` → environment variables → defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const CONFIG_FILE: &str = "hopgraph.toml";

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub cache: CacheConfig,
    pub trace: TraceConfig,
}

/// Path cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Memoize successful traces per ordered node pair.
    pub enabled: bool,
}

/// Path search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Initial capacity of path buffers until `optimize_trace` supplies a hint.
    pub reservation: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self { reservation: 5 }
    }
}

/// Accept `1`/`0`, `yes`/`no` and `on`/`off` as well as `true`/`false`.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

/// Apply a raw override value to a config field. Unparsable values leave
/// the field untouched.
fn apply_override<T>(var: &str, raw: &str, target: &mut T, parse: fn(&str) -> Option<T>) {
    match parse(raw) {
        Some(value) => *target = value,
        None => tracing::warn!("ignoring {}={:?}: unrecognized value", var, raw),
    }
}

/// Helper to read an env var and apply it to a config field.
fn env_override<T>(var: &str, target: &mut T, parse: fn(&str) -> Option<T>) {
    if let Ok(raw) = std::env::var(var) {
        apply_override(var, &raw, target, parse);
    }
}

impl GraphConfig {
    /// Load config from `hopgraph.toml` in `dir`, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read {}", config_path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse {}", config_path.display()))?
        } else {
            Self::default()
        };

        env_override(
            "HOPGRAPH_CACHE_ENABLED",
            &mut config.cache.enabled,
            parse_flag,
        );
        env_override(
            "HOPGRAPH_TRACE_RESERVATION",
            &mut config.trace.reservation,
            parse_number,
        );

        if config.trace.reservation == 0 {
            anyhow::bail!("trace.reservation must be greater than 0");
        }

        Ok(config)
    }
}
