// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the Chirpy service.
//!
//! Values come from the environment (after `.env` has been loaded). Anything
//! missing or unparseable falls back to its default.

use chirpy_common::{DEFAULT_MAX_CHIRP_LENGTH, DEFAULT_PROFANE_WORDS};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Platform marker that unlocks destructive admin operations.
pub const DEV_PLATFORM: &str = "dev";

/// Paths already routed; the metrics endpoint may not take one of these.
pub const RESERVED_PATHS: &[&str] = &[
    "/",
    "/app",
    "/api/healthz",
    "/api/validate_chirp",
    "/api/users",
    "/admin/metrics",
    "/admin/reset",
];

/// Configuration for the Chirpy service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Deployment platform; only `dev` allows the admin reset
    #[serde(default)]
    pub platform: String,

    /// Postgres connection string; in-memory users when absent
    #[serde(default)]
    pub db_url: Option<String>,

    /// Directory served under `/app/` (default: .)
    #[serde(default = "default_filepath_root")]
    pub filepath_root: String,

    /// Chirp validation configuration
    #[serde(default)]
    pub chirp: ChirpConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Chirp validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChirpConfig {
    /// Maximum chirp length in characters (default: 140)
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Words replaced with `****` (default: kerfuffle, sharbert, fornax)
    #[serde(default = "default_profane_words")]
    pub profane_words: Vec<String>,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics endpoint (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics endpoint path (default: /metrics)
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_filepath_root() -> String {
    ".".to_string()
}

fn default_max_length() -> usize {
    DEFAULT_MAX_CHIRP_LENGTH
}

fn default_profane_words() -> Vec<String> {
    DEFAULT_PROFANE_WORDS.iter().map(|w| w.to_string()).collect()
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            platform: String::new(),
            db_url: None,
            filepath_root: default_filepath_root(),
            chirp: ChirpConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for ChirpConfig {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
            profane_words: default_profane_words(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_metrics_path(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `BIND_ADDR`: Server bind address
    /// - `PLATFORM`: Deployment platform (`dev` enables `/admin/reset`)
    /// - `DB_URL`: Postgres connection string
    /// - `FILEPATH_ROOT`: Directory served under `/app/`
    /// - `MAX_CHIRP_LENGTH`: Chirp length limit
    /// - `PROFANE_WORDS`: Comma-separated denylist
    /// - `METRICS_ENABLED`, `METRICS_PATH`: Prometheus endpoint
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            bind_addr: non_empty("BIND_ADDR").unwrap_or(defaults.bind_addr),
            platform: lookup("PLATFORM").unwrap_or(defaults.platform),
            db_url: non_empty("DB_URL"),
            filepath_root: non_empty("FILEPATH_ROOT").unwrap_or(defaults.filepath_root),
            chirp: ChirpConfig {
                max_length: non_empty("MAX_CHIRP_LENGTH")
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(defaults.chirp.max_length),
                profane_words: non_empty("PROFANE_WORDS")
                    .map(|v| parse_word_list(&v))
                    .filter(|words| !words.is_empty())
                    .unwrap_or(defaults.chirp.profane_words),
            },
            metrics: MetricsConfig {
                enabled: non_empty("METRICS_ENABLED")
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(defaults.metrics.enabled),
                path: non_empty("METRICS_PATH")
                    .filter(|p| {
                        let usable = is_usable_metrics_path(p);
                        if !usable {
                            warn!(path = %p, "Ignoring METRICS_PATH, using /metrics");
                        }
                        usable
                    })
                    .unwrap_or(defaults.metrics.path),
            },
        }
    }

    /// Whether destructive admin operations are allowed.
    pub fn is_dev(&self) -> bool {
        self.platform == DEV_PLATFORM
    }
}

/// A metrics path must be absolute, free of route capture syntax and clear
/// of every other route, including everything under `/app/`.
pub fn is_usable_metrics_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.contains(['{', '}', '*'])
        && !path.starts_with("/app/")
        && !RESERVED_PATHS.contains(&path)
}

fn parse_word_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .collect()
}
