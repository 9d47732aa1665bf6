// src/runner/mod.rs

//! Job runners and runner dispatch.
//!
//! A runner is a strategy for executing a fetched jar. The set is closed:
//! [`ShellRunner`] (fallback, runs the job args as a command line),
//! [`HadoopRunner`] (hands crunch pipeline jars to `hadoop jar`) and
//! [`LuigiRunner`] (extracts bundled python code and hands the task to a
//! luigi wrapper). Each variant reports via `is_recognised` whether it can
//! run a given jar/argument combination.
//!
//! The [`Dispatcher`] holds the configured runners in order and picks the
//! first one that recognises the job. Name-based lookup exists only for
//! the `--runner` escape hatch; the strategies themselves are dispatched
//! structurally.

pub mod hadoop;
pub mod luigi;
pub mod shell;

use std::path::Path;

use crate::config::Config;
use crate::errors::{GreaseError, Result};

pub use hadoop::HadoopRunner;
pub use luigi::LuigiRunner;
pub use shell::ShellRunner;

/// The closed set of job execution strategies.
pub enum Runner {
    Shell(ShellRunner),
    Hadoop(HadoopRunner),
    Luigi(LuigiRunner),
}

impl Runner {
    /// Instantiate a runner from its configured identifier.
    pub fn from_config(identifier: &str, command: &[String], listing_command: Option<&[String]>) -> Result<Self> {
        match identifier.to_ascii_lowercase().as_str() {
            "shell" => Ok(Self::Shell(ShellRunner::new())),
            "hadoop" => Ok(Self::Hadoop(HadoopRunner::new(command, listing_command))),
            "luigi" => Ok(Self::Luigi(LuigiRunner::new(command))),
            other => Err(GreaseError::ConfigError(format!(
                "unknown runner '{other}' in configuration"
            ))),
        }
    }

    /// Registered display name, used for `--runner` lookup and logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Shell(_) => "ShellRunner",
            Self::Hadoop(_) => "HadoopRunner",
            Self::Luigi(_) => "LuigiRunner",
        }
    }

    /// Whether this runner can execute the given jar/argument pair.
    pub fn is_recognised(&self, jar_path: &Path, argv: &[String]) -> bool {
        match self {
            Self::Shell(shell) => shell.is_recognised(jar_path, argv),
            Self::Hadoop(hadoop) => hadoop.is_recognised(jar_path, argv),
            Self::Luigi(luigi) => luigi.is_recognised(jar_path, argv),
        }
    }

    /// Execute the job. A nonzero child exit surfaces as
    /// [`GreaseError::RunnerExecution`]; it is never retried here.
    pub fn run_job(&self, jar_path: &Path, spec: &str, argv: &[String]) -> Result<()> {
        match self {
            Self::Shell(shell) => shell.run_job(jar_path, spec, argv),
            Self::Hadoop(hadoop) => hadoop.run_job(jar_path, spec, argv),
            Self::Luigi(luigi) => luigi.run_job(jar_path, spec, argv),
        }
    }

    /// Case-insensitive name match, with or without the `Runner` suffix:
    /// requesting `hadoop` matches a runner registered as `HadoopRunner`.
    fn matches_name(&self, requested: &str) -> bool {
        let name = self.name();
        name.eq_ignore_ascii_case(requested)
            || name.eq_ignore_ascii_case(&format!("{requested}Runner"))
    }
}

/// Ordered, configured collection of runners.
///
/// Order is significant and caller-controlled: recognition probes run in
/// configuration order and the first match wins.
pub struct Dispatcher {
    runners: Vec<Runner>,
}

impl Dispatcher {
    pub fn new(runners: Vec<Runner>) -> Self {
        Self { runners }
    }

    /// Build the dispatcher from the ordered runner list in the config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let runners = config
            .runners
            .iter()
            .map(|entry| {
                Runner::from_config(
                    &entry.runner,
                    &entry.command,
                    entry.listing_command.as_deref(),
                )
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(runners))
    }

    /// First configured runner that recognises the job, if any.
    pub fn find_runner(&self, jar_path: &Path, argv: &[String]) -> Option<&Runner> {
        self.runners
            .iter()
            .find(|runner| runner.is_recognised(jar_path, argv))
    }

    /// Runner explicitly requested by name, if configured.
    pub fn runner_named(&self, requested: &str) -> Option<&Runner> {
        self.runners
            .iter()
            .find(|runner| runner.matches_name(requested))
    }
}
