// tests/common/mod.rs

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use scalegrease::errors::Result;
use scalegrease::system::{CommandOutput, CommandRunner};
use zip::write::SimpleFileOptions;

/// Command runner that returns canned output and records the command
/// lines it was asked to run.
pub struct FakeRunner {
    pub exit_code: i32,
    pub output: String,
    pub commands: RefCell<Vec<Vec<String>>>,
}

impl FakeRunner {
    pub fn new(exit_code: i32, output: &str) -> Self {
        Self {
            exit_code,
            output: output.to_string(),
            commands: RefCell::new(Vec::new()),
        }
    }

    pub fn last_command(&self) -> Vec<String> {
        self.commands.borrow().last().cloned().unwrap_or_default()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, cmd: &[String], _env: Option<&HashMap<String, String>>) -> Result<CommandOutput> {
        self.commands.borrow_mut().push(cmd.to_vec());
        Ok(CommandOutput {
            exit_code: self.exit_code,
            output: self.output.clone(),
        })
    }
}

/// Write a small jar (zip) file at `path` with the given entries.
pub fn write_jar(path: &Path, entries: &[(&str, &str)]) {
    let file = fs::File::create(path).unwrap();
    let mut jar = zip::ZipWriter::new(file);
    for (name, contents) in entries {
        jar.start_file(*name, SimpleFileOptions::default()).unwrap();
        jar.write_all(contents.as_bytes()).unwrap();
    }
    jar.finish().unwrap();
}

/// String vector helper for command/argument literals.
pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
