// src/errors.rs

//! Crate-wide error type and `Result` alias.
//!
//! Every failure kind propagates unchanged to the top-level caller; there
//! is no retry or local recovery anywhere in this crate. The only
//! resilience layer is Maven's own local repository cache.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GreaseError {
    #[error("Invalid artifact spec '{0}': expected group:artifact[:version[:packaging[:classifier]]]")]
    SpecParse(String),

    #[error("Artifact fetch failed: {message}\nMaven output:\n{output}")]
    Fetch { message: String, output: String },

    #[error("No runner found for {0}")]
    RunnerNotFound(String),

    #[error("Job process exited with code {code}\nOutput:\n{output}")]
    RunnerExecution { code: i32, output: String },

    #[error("Jar path requested for {0} before it was fetched")]
    NotFetched(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Archive error: {0}")]
    ArchiveError(#[from] zip::result::ZipError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, GreaseError>;
