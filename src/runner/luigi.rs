// src/runner/luigi.rs

//! Runner for luigi tasks bundled as python code inside the jar.
//!
//! The jar carries its python sources under `python/`. Running a task
//! means extracting that subtree into a scratch directory, pointing
//! `PYTHONPATH` at it, and invoking the configured luigi wrapper with the
//! job arguments. The scratch directory lives exactly as long as one
//! `run_job` call: it is deleted on every exit path, whether the task
//! succeeds, exits nonzero, or extraction itself fails.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::TempDir;
use tracing::{debug, info};

use crate::errors::{GreaseError, Result};
use crate::system;

/// Jar entries under this prefix are the task's python code.
const RESOURCE_PREFIX: &str = "python/";

/// Environment variable telling the task which artifact it came from.
const ARTIFACT_SPEC_VAR: &str = "PLATFORM_ARTIFACT_SPEC";

const PYTHONPATH_VAR: &str = "PYTHONPATH";

const MODULE_FLAG: &str = "--module";
const TASK_FLAG: &str = "--task";

const PATH_LIST_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// Executes luigi tasks out of an extracted scratch directory.
pub struct LuigiRunner {
    command: Vec<String>,
    scratch_root: Option<PathBuf>,
}

impl LuigiRunner {
    pub fn new(command: &[String]) -> Self {
        Self {
            command: command.to_vec(),
            scratch_root: None,
        }
    }

    /// Create scratch directories under `root` instead of the system temp
    /// directory. Intended for tests.
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    /// Luigi jobs name a python module and a task class.
    pub fn is_recognised(&self, _jar_path: &Path, argv: &[String]) -> bool {
        argv.iter().any(|arg| arg == MODULE_FLAG) && argv.iter().any(|arg| arg == TASK_FLAG)
    }

    pub fn run_job(&self, jar_path: &Path, spec: &str, argv: &[String]) -> Result<()> {
        // Uniquely named so concurrent invocations can't collide; removed
        // when `scratch` goes out of scope, on every exit path.
        let mut builder = tempfile::Builder::new();
        builder.prefix("greasetask");
        let scratch = match &self.scratch_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        debug!(scratch = %scratch.path().display(), "extracting task resources");

        self.extract_resources(jar_path, scratch.path())?;
        self.run_task(spec, argv, scratch.path())?;

        // Explicit close on the success path so a deletion failure is
        // reported instead of swallowed by Drop.
        close_scratch(scratch)
    }

    /// Extract the jar entries under [`RESOURCE_PREFIX`] into `target`,
    /// leaving everything else in the jar alone.
    fn extract_resources(&self, jar_path: &Path, target: &Path) -> Result<()> {
        let file = fs::File::open(jar_path)?;
        let mut archive = zip::ZipArchive::new(file)?;
        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            if !entry.name().starts_with(RESOURCE_PREFIX) {
                continue;
            }
            // Entries with traversal tricks in their names don't get a
            // destination path and are skipped.
            let Some(relative) = entry.enclosed_name() else {
                continue;
            };
            let destination = target.join(relative);
            if entry.is_dir() {
                fs::create_dir_all(&destination)?;
                continue;
            }
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = fs::File::create(&destination)?;
            io::copy(&mut entry, &mut out)?;
        }
        Ok(())
    }

    /// Run the configured luigi wrapper with the job arguments, inside an
    /// environment that knows the artifact identity and can import the
    /// extracted python code.
    fn run_task(&self, spec: &str, argv: &[String], scratch: &Path) -> Result<()> {
        let mut env: HashMap<String, String> = std::env::vars().collect();
        env.insert(ARTIFACT_SPEC_VAR.to_string(), spec.to_string());

        let src_path = scratch.join("python").display().to_string();
        let python_path = match env.remove(PYTHONPATH_VAR) {
            Some(existing) if !existing.is_empty() => {
                format!("{existing}{PATH_LIST_SEPARATOR}{src_path}")
            }
            _ => src_path,
        };
        env.insert(PYTHONPATH_VAR.to_string(), python_path);

        let mut cmd = self.command.clone();
        cmd.extend(argv.iter().cloned());
        info!(cmd = %cmd.join(" "), "executing luigi task");

        let result = system::run_command(&cmd, Some(&env))?;
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

fn close_scratch(scratch: TempDir) -> Result<()> {
    let path = scratch.path().to_path_buf();
    scratch
        .close()
        .with_context(|| format!("removing scratch directory {}", path.display()))?;
    Ok(())
}
