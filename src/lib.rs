// src/lib.rs

pub mod artifact;
pub mod cli;
pub mod config;
pub mod deploy;
pub mod errors;
pub mod logging;
pub mod runner;
pub mod system;

use tracing::info;

use crate::cli::CliArgs;
use crate::config::load_config;
use crate::deploy::ArtifactStorage;
use crate::errors::{GreaseError, Result};
use crate::runner::Dispatcher;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - artifact resolution and fetch
/// - runner dispatch
/// - job execution
///
/// Strictly sequential: resolve → fetch → dispatch → run, with no retry,
/// timeout or cancellation anywhere along the way.
pub fn run(args: CliArgs) -> Result<()> {
    let config = load_config(&args.config_file)?;

    let storage = ArtifactStorage::resolve(&args.jar_spec)?;
    let (storage, job_args) = storage.fetch(&args.job_args)?;
    let jar_path = storage.jar_path()?;
    let spec = storage.spec();
    info!(jar = %jar_path.display(), spec = %spec, "artifact available");

    let dispatcher = Dispatcher::from_config(&config)?;
    let runner = match &args.runner {
        Some(name) => dispatcher.runner_named(name),
        None => dispatcher.find_runner(&jar_path, &job_args),
    }
    .ok_or_else(|| GreaseError::RunnerNotFound(args.jar_spec.clone()))?;

    info!(runner = runner.name(), "dispatching job");
    runner.run_job(&jar_path, &spec, &job_args)
}
