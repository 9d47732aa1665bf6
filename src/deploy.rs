// src/deploy.rs

//! Artifact acquisition.
//!
//! [`ArtifactStorage::resolve`] turns a user-given specifier into either a
//! local jar that is already on disk, or a Maven coordinate that still
//! needs fetching. A Maven storage is a two-state machine: it starts
//! `Unresolved` and transitions exactly once, on a successful fetch, to
//! `Resolved` with the canonical artifact Maven actually delivered.
//! `fetch` consumes the storage and returns the new value, so no reader
//! can ever observe a half-resolved storage.
//!
//! Maven never reports the resolved version directly; the only place it
//! shows up is a human-readable `Copying X to Y` line in the build output.
//! Scraping that line is fragile by nature, but Maven's text format is the
//! ground truth here. A build whose output doesn't match is treated as a
//! hard fetch failure, never as something to silently fall back from.

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, info};

use crate::artifact::{CanonicalArtifact, Coordinate};
use crate::errors::{GreaseError, Result};
use crate::system::{CommandRunner, ProcessRunner};

/// Offline switch consumed from the front of the job arguments.
const OFFLINE_FLAGS: [&str; 2] = ["--mvn-offline", "-o"];

const COPYING_PATTERN: &str = r"Copying (\S+) to (\S+)";

/// Where a runnable jar comes from.
pub enum ArtifactStorage {
    Local(LocalStorage),
    Maven(MavenStorage),
}

impl ArtifactStorage {
    /// Resolve a specifier to a storage.
    ///
    /// An existing filesystem path wins; anything else must parse as a
    /// Maven coordinate. A malformed path string that also fails
    /// coordinate parsing surfaces the parse error.
    pub fn resolve(jar_spec: &str) -> Result<Self> {
        if Path::new(jar_spec).exists() {
            debug!(path = jar_spec, "specifier is a local file");
            Ok(Self::Local(LocalStorage::new(jar_spec)))
        } else {
            Ok(Self::Maven(MavenStorage::new(Coordinate::parse(jar_spec)?)))
        }
    }

    /// Make the jar available locally, consuming any storage-level
    /// switches from the front of `argv` and returning the remaining job
    /// arguments.
    pub fn fetch(self, argv: &[String]) -> Result<(Self, Vec<String>)> {
        match self {
            Self::Local(local) => Ok((Self::Local(local), argv.to_vec())),
            Self::Maven(maven) => {
                let (maven, rest) = maven.fetch(argv)?;
                Ok((Self::Maven(maven), rest))
            }
        }
    }

    pub fn jar_path(&self) -> Result<PathBuf> {
        match self {
            Self::Local(local) => Ok(local.jar_path()),
            Self::Maven(maven) => maven.jar_path(),
        }
    }

    /// Canonical identity of the artifact, handed to runners.
    pub fn spec(&self) -> String {
        match self {
            Self::Local(local) => local.spec(),
            Self::Maven(maven) => maven.spec(),
        }
    }
}

/// A jar that already exists on local disk. Nothing to fetch.
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn jar_path(&self) -> PathBuf {
        self.path.clone()
    }

    pub fn spec(&self) -> String {
        self.path.display().to_string()
    }
}

enum FetchState {
    Unresolved,
    Resolved(CanonicalArtifact),
}

/// A jar that lives in a Maven repository and must be fetched.
pub struct MavenStorage {
    coordinate: Coordinate,
    cache_root: PathBuf,
    state: FetchState,
}

impl MavenStorage {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            cache_root: local_repository_root(),
            state: FetchState::Unresolved,
        }
    }

    /// Override the local repository root. Intended for tests.
    pub fn with_cache_root(mut self, cache_root: impl Into<PathBuf>) -> Self {
        self.cache_root = cache_root.into();
        self
    }

    /// The requested coordinate, fully expanded. A requested `LATEST`
    /// stays `LATEST` here even after fetching.
    pub fn spec(&self) -> String {
        self.coordinate.spec()
    }

    /// Path of the fetched jar inside the local repository.
    ///
    /// Fails with [`GreaseError::NotFetched`] before a successful
    /// [`fetch`](Self::fetch).
    pub fn jar_path(&self) -> Result<PathBuf> {
        match &self.state {
            FetchState::Resolved(artifact) => Ok(artifact.jar_path(&self.cache_root)),
            FetchState::Unresolved => Err(GreaseError::NotFetched(self.spec())),
        }
    }

    /// Fetch via Maven, transitioning to the resolved state.
    pub fn fetch(self, argv: &[String]) -> Result<(Self, Vec<String>)> {
        self.fetch_with(argv, &ProcessRunner)
    }

    /// Like [`fetch`](Self::fetch) with an explicit command runner.
    pub fn fetch_with(
        self,
        argv: &[String],
        runner: &dyn CommandRunner,
    ) -> Result<(Self, Vec<String>)> {
        let (offline, rest) = parse_args(argv);

        // Maven copies the jar into a throwaway directory; the path we
        // actually hand to the runner is recomputed against the local
        // repository below.
        let out_dir = tempfile::Builder::new().prefix("greaserun").tempdir()?;
        let mvn_cmd = self.maven_command(offline, out_dir.path());
        info!(cmd = %mvn_cmd.join(" "), "fetching artifact");

        let result = runner.run(&mvn_cmd, None)?;
        if !result.success() {
            return Err(GreaseError::Fetch {
                message: format!("maven exited with code {}", result.exit_code),
                output: result.output,
            });
        }

        let artifact = self.parse_maven_output(&result.output)?;
        info!(
            version = artifact.coordinate().version(),
            canonical_version = artifact.canonical_version(),
            "resolved artifact version"
        );
        Ok((
            Self {
                state: FetchState::Resolved(artifact),
                ..self
            },
            rest,
        ))
    }

    fn maven_command(&self, offline: bool, out_dir: &Path) -> Vec<String> {
        let mut cmd: Vec<String> = vec![
            "mvn".into(),
            "-e".into(),
            "org.apache.maven.plugins:maven-dependency-plugin:2.8:copy".into(),
            format!("-Dartifact={}", self.coordinate.spec()),
            format!("-DoutputDirectory={}", out_dir.display()),
        ];
        let mode = if offline { "--offline" } else { "--update-snapshots" };
        cmd.push(mode.to_string());
        cmd
    }

    /// Recover the resolved and canonical version strings from Maven's
    /// `Copying X to Y` line (first match only).
    fn parse_maven_output(&self, output: &str) -> Result<CanonicalArtifact> {
        let copying = Regex::new(COPYING_PATTERN)
            .map_err(|e| anyhow::anyhow!("invalid copying pattern: {e}"))?;
        let captures = copying.captures(output).ok_or_else(|| GreaseError::Fetch {
            message: "unexpected maven output: no 'Copying X to Y' line found".to_string(),
            output: output.to_string(),
        })?;

        let version = self.version_from_jar_name(&captures[1], output)?;
        let canonical_version = self.version_from_jar_name(&captures[2], output)?;
        Ok(CanonicalArtifact::new(
            self.coordinate.with_version(&version),
            canonical_version,
        ))
    }

    /// Strip `{artifact_id}-` and `-{classifier}.{packaging}` from the
    /// basename of a copied jar path, leaving the version in between.
    fn version_from_jar_name(&self, jar_path: &str, output: &str) -> Result<String> {
        let base = Path::new(jar_path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let prefix = format!("{}-", self.coordinate.artifact_id());
        let suffix = format!(
            "-{}.{}",
            self.coordinate.classifier(),
            self.coordinate.packaging()
        );
        base.strip_prefix(prefix.as_str())
            .and_then(|rest| rest.strip_suffix(suffix.as_str()))
            .filter(|version| !version.is_empty())
            .map(str::to_string)
            .ok_or_else(|| GreaseError::Fetch {
                message: format!(
                    "jar name '{base}' does not match artifact {}",
                    self.coordinate.spec()
                ),
                output: output.to_string(),
            })
    }
}

/// Consume a leading offline switch from the job arguments.
///
/// Only the front position counts; the same token later in the list
/// belongs to the job being launched.
fn parse_args(argv: &[String]) -> (bool, Vec<String>) {
    match argv.first() {
        Some(first) if OFFLINE_FLAGS.contains(&first.as_str()) => (true, argv[1..].to_vec()),
        _ => (false, argv.to_vec()),
    }
}

/// Maven's local repository, the source of truth for fetched jar bytes.
fn local_repository_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".m2")
        .join("repository")
}
