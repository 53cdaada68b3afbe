// ABOUTME: Kubernetes minor version parsing and source URLs for changelogs and release notes.
// ABOUTME: Only builds URLs; fetching is left to the caller.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::VersionError;

/// GKE release notes page.
pub const RELEASE_NOTES_URL: &str = "https://docs.cloud.google.com/kubernetes-engine/docs/release-notes";

const CHANGELOG_URL_BASE: &str =
    "https://raw.githubusercontent.com/kubernetes/kubernetes/refs/heads/master/CHANGELOG";

static MINOR_VERSION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+$").unwrap());

/// A Kubernetes minor version such as `1.33`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MinorVersion(String);

impl MinorVersion {
    /// Parses a trimmed `MAJOR.MINOR` string.
    pub fn parse(s: &str) -> Result<Self, VersionError> {
        let trimmed = s.trim();
        if !MINOR_VERSION_RE.is_match(trimmed) {
            return Err(VersionError::InvalidMinor(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raw URL of the upstream changelog file for this minor version.
    pub fn changelog_url(&self) -> String {
        format!("{}/CHANGELOG-{}.md", CHANGELOG_URL_BASE, self.0)
    }
}

impl FromStr for MinorVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MinorVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
