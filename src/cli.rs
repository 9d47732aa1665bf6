// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::config::DEFAULT_CONFIG_FILE;

/// Command-line arguments for `greaserun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "greaserun",
    version,
    about = "Download a batch job artifact and hand it to a runner.",
    long_about = None
)]
pub struct CliArgs {
    /// Maven artifact to download and run, e.g.
    /// com.spotify.data:super-cruncher, or a path to a local jar.
    #[arg(value_name = "ARTIFACT")]
    pub jar_spec: String,

    /// Force a specific runner instead of probing, e.g. "hadoop".
    #[arg(long, short, value_name = "NAME")]
    pub runner: Option<String>,

    /// Read configuration from this file.
    #[arg(long, short, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SCALEGREASE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Arguments passed through to the job.
    #[arg(
        value_name = "JOB_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub job_args: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
