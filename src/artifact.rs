// src/artifact.rs

//! Maven artifact coordinates.
//!
//! A [`Coordinate`] is the parsed, fully defaulted form of a user-given
//! specifier such as `com.spotify.data:super-cruncher`. A
//! [`CanonicalArtifact`] additionally knows the exact version string Maven
//! resolved for it, which for a symbolic request like `LATEST` differs from
//! the requested version. Both are plain immutable values.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::{GreaseError, Result};

/// Sentinel version used when the specifier omits one.
pub const LATEST_VERSION: &str = "LATEST";

const DEFAULT_PACKAGING: &str = "jar";
const DEFAULT_CLASSIFIER: &str = "jar-with-dependencies";

/// A `group:artifact:version:packaging:classifier` coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate {
    group_id: String,
    artifact_id: String,
    version: String,
    packaging: String,
    classifier: String,
}

impl Coordinate {
    /// Parse a colon-separated specifier with 2 to 5 fields.
    ///
    /// Missing trailing fields take their defaults (`LATEST`, `jar`,
    /// `jar-with-dependencies`). No further validation happens here; Maven
    /// is the source of truth for whether the coordinate exists.
    pub fn parse(spec: &str) -> Result<Self> {
        let fields: Vec<&str> = spec.split(':').collect();
        if fields.len() < 2 || fields.len() > 5 {
            return Err(GreaseError::SpecParse(spec.to_string()));
        }
        if fields[0].is_empty() || fields[1].is_empty() {
            return Err(GreaseError::SpecParse(spec.to_string()));
        }
        let field = |i: usize, default: &str| -> String {
            fields
                .get(i)
                .filter(|f| !f.is_empty())
                .unwrap_or(&default)
                .to_string()
        };
        Ok(Self {
            group_id: fields[0].to_string(),
            artifact_id: fields[1].to_string(),
            version: field(2, LATEST_VERSION),
            packaging: field(3, DEFAULT_PACKAGING),
            classifier: field(4, DEFAULT_CLASSIFIER),
        })
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn packaging(&self) -> &str {
        &self.packaging
    }

    pub fn classifier(&self) -> &str {
        &self.classifier
    }

    /// Fully expanded spec string, defaults filled in.
    pub fn spec(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.version, self.packaging, self.classifier
        )
    }

    /// Repository-relative directory for this artifact, e.g.
    /// `com/spotify/data/super-cruncher`.
    pub fn path(&self) -> String {
        format!("{}/{}", self.group_id.replace('.', "/"), self.artifact_id)
    }

    /// Conventional jar file name for this coordinate's version.
    pub fn jar_name(&self) -> String {
        format!(
            "{}-{}-{}.{}",
            self.artifact_id, self.version, self.classifier, self.packaging
        )
    }

    /// Same coordinate with a different version field.
    pub fn with_version(&self, version: &str) -> Self {
        Self {
            version: version.to_string(),
            ..self.clone()
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spec())
    }
}

/// A coordinate whose version has been resolved by Maven.
///
/// `coordinate.version()` is the version directory Maven resolved a
/// symbolic request into (e.g. `0.0.1-SNAPSHOT` for `LATEST`), while
/// `canonical_version` is the exact, possibly timestamped version of the
/// file stored in the local repository (e.g. `0.0.1-30000101.123456-7`).
///
/// Only a successful fetch produces one of these; the constructor is
/// crate-private on purpose.
#[derive(Debug, Clone)]
pub struct CanonicalArtifact {
    coordinate: Coordinate,
    canonical_version: String,
}

impl CanonicalArtifact {
    pub(crate) fn new(coordinate: Coordinate, canonical_version: impl Into<String>) -> Self {
        Self {
            coordinate,
            canonical_version: canonical_version.into(),
        }
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    pub fn canonical_version(&self) -> &str {
        &self.canonical_version
    }

    /// File name of the cached jar, built from the canonical version.
    pub fn jar_name(&self) -> String {
        format!(
            "{}-{}-{}.{}",
            self.coordinate.artifact_id(),
            self.canonical_version,
            self.coordinate.classifier(),
            self.coordinate.packaging()
        )
    }

    /// Location of the jar inside the local repository.
    ///
    /// Recomputed from first principles against `cache_root` rather than
    /// taken from Maven's own output path, so concurrent independent
    /// fetches of the same artifact converge on the same file.
    pub fn jar_path(&self, cache_root: &Path) -> PathBuf {
        cache_root
            .join(self.coordinate.path())
            .join(self.coordinate.version())
            .join(self.jar_name())
    }
}
