// src/runner/shell.rs

//! Fallback runner: execute the job arguments as a command line.

use std::path::Path;

use tracing::info;

use crate::errors::{GreaseError, Result};
use crate::system;

/// Runs `argv + [jar_path, spec]` as one external command.
///
/// Recognises everything, so it belongs last in the configured runner
/// order.
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }

    pub fn is_recognised(&self, _jar_path: &Path, _argv: &[String]) -> bool {
        true
    }

    pub fn run_job(&self, jar_path: &Path, spec: &str, argv: &[String]) -> Result<()> {
        let mut cmd: Vec<String> = argv.to_vec();
        cmd.push(jar_path.display().to_string());
        cmd.push(spec.to_string());
        info!(cmd = %cmd.join(" "), "executing shell job");

        let result = system::run_command(&cmd, None)?;
        if !result.success() {
            return Err(GreaseError::RunnerExecution {
                code: result.exit_code,
                output: result.output,
            });
        }
        info!("{}", result.output);
        Ok(())
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new()
    }
}
