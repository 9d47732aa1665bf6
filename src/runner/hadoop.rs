// src/runner/hadoop.rs

//! Runner for crunch pipeline jars executed through `hadoop jar`.

use std::path::Path;

use tracing::{debug, info};

use crate::errors::{GreaseError, Result};
use crate::system;

/// Class entry that marks a jar as a crunch pipeline job.
const PIPELINE_CLASS: &str = "org/apache/crunch/Pipeline.class";

const DEFAULT_LISTING_COMMAND: [&str; 2] = ["jar", "tf"];

/// Hands recognised jars to hadoop with stdio inherited, so job progress
/// streams straight to the terminal.
pub struct HadoopRunner {
    command: Vec<String>,
    listing_command: Vec<String>,
}

impl HadoopRunner {
    pub fn new(command: &[String], listing_command: Option<&[String]>) -> Self {
        Self {
            command: command.to_vec(),
            listing_command: listing_command
                .map(<[String]>::to_vec)
                .unwrap_or_else(|| DEFAULT_LISTING_COMMAND.map(String::from).to_vec()),
        }
    }

    /// A jar is recognised when its entry listing contains the crunch
    /// `Pipeline` class. Any listing failure, including a missing listing
    /// tool, means "not ours".
    pub fn is_recognised(&self, jar_path: &Path, _argv: &[String]) -> bool {
        let mut cmd = self.listing_command.clone();
        cmd.push(jar_path.display().to_string());
        match system::run_command(&cmd, None) {
            Ok(listing) if listing.success() => {
                listing.output.lines().any(|line| line == PIPELINE_CLASS)
            }
            Ok(listing) => {
                debug!(
                    jar = %jar_path.display(),
                    exit_code = listing.exit_code,
                    "jar listing failed"
                );
                false
            }
            Err(err) => {
                debug!(jar = %jar_path.display(), error = %err, "jar listing failed");
                false
            }
        }
    }

    pub fn run_job(&self, jar_path: &Path, _spec: &str, argv: &[String]) -> Result<()> {
        let mut cmd = self.command.clone();
        cmd.push(jar_path.display().to_string());
        cmd.extend(argv.iter().cloned());
        info!(cmd = %cmd.join(" "), "executing hadoop job");

        let exit_code = system::run_interactive(&cmd)?;
        if exit_code != 0 {
            return Err(GreaseError::RunnerExecution {
                code: exit_code,
                output: String::new(),
            });
        }
        Ok(())
    }
}
