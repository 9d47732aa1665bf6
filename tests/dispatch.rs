// tests/dispatch.rs

mod common;

use std::path::Path;

use common::args;
use scalegrease::config::{Config, RunnerEntry};
use scalegrease::errors::GreaseError;
use scalegrease::runner::{Dispatcher, LuigiRunner, Runner, ShellRunner};

fn entry(runner: &str, command: &[&str]) -> RunnerEntry {
    RunnerEntry {
        runner: runner.to_string(),
        command: args(command),
        listing_command: None,
    }
}

#[test]
fn test_first_recognising_runner_wins() {
    // Both runners recognise these arguments; order decides.
    let luigi_args = args(&["--module", "crunchers", "--task", "Nightly"]);
    let jar = Path::new("/tmp/job.jar");

    let dispatcher = Dispatcher::new(vec![
        Runner::Shell(ShellRunner::new()),
        Runner::Luigi(LuigiRunner::new(&args(&["luigi"]))),
    ]);
    let selected = dispatcher.find_runner(jar, &luigi_args).unwrap();
    assert_eq!("ShellRunner", selected.name());

    let dispatcher = Dispatcher::new(vec![
        Runner::Luigi(LuigiRunner::new(&args(&["luigi"]))),
        Runner::Shell(ShellRunner::new()),
    ]);
    let selected = dispatcher.find_runner(jar, &luigi_args).unwrap();
    assert_eq!("LuigiRunner", selected.name());
}

#[test]
fn test_empty_runner_list_finds_nothing() {
    let dispatcher = Dispatcher::new(Vec::new());
    assert!(dispatcher.find_runner(Path::new("/tmp/job.jar"), &[]).is_none());
}

#[test]
fn test_unrecognised_job_finds_nothing() {
    // Luigi alone, and the job args carry neither of its flags.
    let dispatcher = Dispatcher::new(vec![Runner::Luigi(LuigiRunner::new(&args(&["luigi"])))]);
    assert!(
        dispatcher
            .find_runner(Path::new("/tmp/job.jar"), &args(&["--date", "today"]))
            .is_none()
    );
}

#[test]
fn test_runner_named_matches_case_insensitively_with_suffix() {
    let config = Config {
        runners: vec![
            entry("luigi", &["luigi"]),
            entry("hadoop", &["hadoop", "jar"]),
            entry("shell", &[]),
        ],
    };
    let dispatcher = Dispatcher::from_config(&config).unwrap();

    assert_eq!("HadoopRunner", dispatcher.runner_named("hadoop").unwrap().name());
    assert_eq!("HadoopRunner", dispatcher.runner_named("HADOOP").unwrap().name());
    assert_eq!(
        "HadoopRunner",
        dispatcher.runner_named("HadoopRunner").unwrap().name()
    );
    assert_eq!("LuigiRunner", dispatcher.runner_named("Luigi").unwrap().name());
    assert!(dispatcher.runner_named("spark").is_none());
}

#[test]
fn test_dispatcher_preserves_configuration_order() {
    let config = Config {
        runners: vec![entry("shell", &[]), entry("luigi", &["luigi"])],
    };
    let dispatcher = Dispatcher::from_config(&config).unwrap();

    let selected = dispatcher
        .find_runner(
            Path::new("/tmp/job.jar"),
            &args(&["--module", "m", "--task", "t"]),
        )
        .unwrap();
    assert_eq!("ShellRunner", selected.name());
}

#[test]
fn test_unknown_runner_identifier_is_a_config_error() {
    let config = Config {
        runners: vec![entry("spark", &["spark-submit"])],
    };
    match Dispatcher::from_config(&config) {
        Err(GreaseError::ConfigError(message)) => assert!(message.contains("spark")),
        other => panic!("Expected ConfigError, got: {:?}", other.map(|_| ())),
    }
}
