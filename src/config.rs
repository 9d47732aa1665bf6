// src/config.rs

//! Configuration file loading.
//!
//! The configuration is a JSON file (default `/etc/scalegrease.json`)
//! whose `runners` list controls which runners exist and in which order
//! recognition probes run:
//!
//! ```json
//! {
//!   "runners": [
//!     { "runner": "luigi", "command": ["luigi"] },
//!     { "runner": "hadoop", "command": ["hadoop", "jar"] },
//!     { "runner": "shell", "command": [] }
//!   ]
//! }
//! ```
//!
//! Environment variables in the file contents (`$VAR` or `${VAR}`) are
//! expanded before parsing; unknown variables are left untouched.

use std::fs;
use std::path::Path;

use regex::{Captures, Regex};
use serde::Deserialize;
use tracing::debug;

use crate::errors::Result;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_FILE: &str = "/etc/scalegrease.json";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Ordered runner list; order is dispatch order.
    pub runners: Vec<RunnerEntry>,
}

/// One configured runner: an identifier plus its command template.
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerEntry {
    pub runner: String,
    #[serde(default)]
    pub command: Vec<String>,
    /// Override for the jar listing command used by recognition probes.
    #[serde(default)]
    pub listing_command: Option<Vec<String>>,
}

/// Read and parse a configuration file, expanding environment variables
/// in its contents first.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let expanded = expand_env_vars(&contents)?;
    let config: Config = serde_json::from_str(&expanded)?;
    debug!(path = %path.display(), runners = config.runners.len(), "configuration read");
    Ok(config)
}

/// Expand `$VAR` and `${VAR}` occurrences from the process environment.
/// Variables that aren't set stay as written.
fn expand_env_vars(contents: &str) -> Result<String> {
    let pattern = Regex::new(r"\$(?:\{(\w+)\}|(\w+))")
        .map_err(|e| anyhow::anyhow!("invalid expansion pattern: {e}"))?;
    let expanded = pattern.replace_all(contents, |caps: &Captures<'_>| {
        let name = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        std::env::var(name).unwrap_or_else(|_| caps[0].to_string())
    });
    Ok(expanded.into_owned())
}
