// tests/launch.rs

//! End-to-end: resolve a local jar, dispatch, run.

mod common;

use std::io::Write;

use common::args;
use scalegrease::cli::CliArgs;
use scalegrease::errors::GreaseError;
use tempfile::{NamedTempFile, TempDir};

fn cli_args(jar_spec: &str, config_file: &str, job_args: &[String]) -> CliArgs {
    CliArgs {
        jar_spec: jar_spec.to_string(),
        runner: None,
        config_file: config_file.to_string(),
        log_level: None,
        job_args: job_args.to_vec(),
    }
}

fn shell_only_config() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "runners": [ {{ "runner": "shell" }} ] }}"#).unwrap();
    file
}

#[test]
fn test_local_jar_runs_through_shell_runner() {
    let dir = TempDir::new().unwrap();
    let jar = dir.path().join("job.jar");
    std::fs::write(&jar, b"not inspected by the shell runner").unwrap();
    let config = shell_only_config();

    // The shell runner appends jar path and spec; the script records them.
    let seen = dir.path().join("seen.txt");
    let script = format!("printf '%s %s' \"$0\" \"$1\" > \"{}\"", seen.display());
    let job_args = args(&["sh", "-c", &script]);

    scalegrease::run(cli_args(
        jar.to_str().unwrap(),
        config.path().to_str().unwrap(),
        &job_args,
    ))
    .unwrap();

    let recorded = std::fs::read_to_string(&seen).unwrap();
    let jar_str = jar.display().to_string();
    assert_eq!(format!("{jar_str} {jar_str}"), recorded);
}

#[test]
fn test_failing_job_propagates_runner_error() {
    let dir = TempDir::new().unwrap();
    let jar = dir.path().join("job.jar");
    std::fs::write(&jar, b"jar bytes").unwrap();
    let config = shell_only_config();

    let result = scalegrease::run(cli_args(
        jar.to_str().unwrap(),
        config.path().to_str().unwrap(),
        &args(&["sh", "-c", "exit 7"]),
    ));

    assert!(matches!(
        result,
        Err(GreaseError::RunnerExecution { code: 7, .. })
    ));
}

#[test]
fn test_empty_runner_configuration_is_runner_not_found() {
    let dir = TempDir::new().unwrap();
    let jar = dir.path().join("job.jar");
    std::fs::write(&jar, b"jar bytes").unwrap();
    let mut config = NamedTempFile::new().unwrap();
    write!(config, r#"{{ "runners": [] }}"#).unwrap();

    let result = scalegrease::run(cli_args(
        jar.to_str().unwrap(),
        config.path().to_str().unwrap(),
        &[],
    ));

    assert!(matches!(result, Err(GreaseError::RunnerNotFound(_))));
}

#[test]
fn test_named_runner_selection_bypasses_probing() {
    let dir = TempDir::new().unwrap();
    let jar = dir.path().join("job.jar");
    std::fs::write(&jar, b"jar bytes").unwrap();
    let config = shell_only_config();

    let mut args_with_runner = cli_args(
        jar.to_str().unwrap(),
        config.path().to_str().unwrap(),
        &args(&["sh", "-c", "exit 0"]),
    );
    args_with_runner.runner = Some("shell".to_string());

    scalegrease::run(args_with_runner).unwrap();
}

#[test]
fn test_unconfigured_named_runner_is_runner_not_found() {
    let dir = TempDir::new().unwrap();
    let jar = dir.path().join("job.jar");
    std::fs::write(&jar, b"jar bytes").unwrap();
    let config = shell_only_config();

    let mut args_with_runner = cli_args(
        jar.to_str().unwrap(),
        config.path().to_str().unwrap(),
        &[],
    );
    args_with_runner.runner = Some("hadoop".to_string());

    let result = scalegrease::run(args_with_runner);
    assert!(matches!(result, Err(GreaseError::RunnerNotFound(_))));
}
