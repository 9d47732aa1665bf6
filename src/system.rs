// src/system.rs

//! Process execution layer.
//!
//! Everything this tool does ultimately shells out to an external command:
//! Maven for fetching, `jar` for listing, and whichever command a runner is
//! configured with. [`run_command`] is the captured-output variant with
//! stderr merged into stdout; [`run_interactive`] hands the terminal to the
//! child. Neither retries, and neither imposes a timeout: a job that hangs
//! hangs the whole invocation until killed externally.
//!
//! A nonzero exit is *not* an error at this layer. It is returned as a
//! value and each caller decides what it means (runners turn it into
//! `RunnerExecution`, the fetch path turns it into `Fetch`).

use std::collections::HashMap;
use std::io::Read;
use std::process::{Command, Stdio};

use anyhow::Context;
use tracing::debug;

use crate::errors::Result;

/// Exit code and combined stdout/stderr of a finished command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub output: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// How commands get run.
///
/// Production code uses [`ProcessRunner`]; tests that need to parse
/// command output (e.g. the Maven fetch path) can substitute a fake that
/// returns canned output without spawning anything.
pub trait CommandRunner {
    fn run(&self, cmd: &[String], env: Option<&HashMap<String, String>>) -> Result<CommandOutput>;
}

/// Real command runner used in production.
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, cmd: &[String], env: Option<&HashMap<String, String>>) -> Result<CommandOutput> {
        run_command(cmd, env)
    }
}

/// Run `cmd`, merging stderr into stdout, and block until it exits.
///
/// Both child streams are pointed at the write end of a single anonymous
/// pipe, so the combined output interleaves the way it would on a
/// terminal. `env = Some(map)` replaces the child environment wholesale;
/// `None` inherits the parent's.
pub fn run_command(
    cmd: &[String],
    env: Option<&HashMap<String, String>>,
) -> Result<CommandOutput> {
    let (program, args) = split_command(cmd)?;
    debug!(cmd = %cmd.join(" "), "running command");

    let (mut reader, writer) = std::io::pipe()?;
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(writer.try_clone()?)
        .stderr(writer);
    if let Some(env) = env {
        command.env_clear().envs(env);
    }
    let mut child = command
        .spawn()
        .with_context(|| format!("spawning '{program}'"))?;
    // Drop our copies of the pipe's write end, or the read below never
    // sees EOF.
    drop(command);

    let mut raw = Vec::new();
    reader
        .read_to_end(&mut raw)
        .with_context(|| format!("reading output of '{program}'"))?;
    let status = child
        .wait()
        .with_context(|| format!("waiting for '{program}'"))?;
    let exit_code = status.code().unwrap_or(-1);
    Ok(CommandOutput {
        exit_code,
        output: String::from_utf8_lossy(&raw).into_owned(),
    })
}

/// Run `cmd` with inherited stdio and return its exit code.
///
/// Used for jobs whose output should stream straight to the user's
/// terminal instead of being buffered.
pub fn run_interactive(cmd: &[String]) -> Result<i32> {
    let (program, args) = split_command(cmd)?;
    debug!(cmd = %cmd.join(" "), "running command with inherited stdio");

    let status = Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("spawning '{program}'"))?;
    Ok(status.code().unwrap_or(-1))
}

fn split_command(cmd: &[String]) -> Result<(&String, &[String])> {
    cmd.split_first()
        .ok_or_else(|| anyhow::anyhow!("empty command line").into())
}
