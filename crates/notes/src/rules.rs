// ABOUTME: Serializable rule tables for the release-notes extractor and changelog filter.
// ABOUTME: Builtin defaults are embedded JSON; callers may load overrides from a string or file.

//! Rule configuration.
//!
//! Rules are plain data. They are compiled once into a
//! [`ReleaseNotesExtractor`](crate::release_notes::ReleaseNotesExtractor) and a
//! [`ChangelogFilter`](crate::changelog::ChangelogFilter), which are then shared by
//! reference for every document processed.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// Embedded JSON holding the default rule set.
const BUILTIN_RULES_JSON: &str = include_str!("../data/default_rules.json");

/// Locates a node whose ancestor subtree should be deleted.
///
/// Matches elements whose `attribute` value ends with the literal `suffix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionAnchor {
    pub attribute: String,
    pub suffix: String,
}

impl ExclusionAnchor {
    pub fn new(attribute: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            suffix: suffix.into(),
        }
    }

    /// Renders the anchor as an attribute-suffix CSS selector, e.g. `[data-text$="Version updates"]`.
    pub fn to_css(&self) -> String {
        let escaped = self.suffix.replace('\\', "\\\\").replace('"', "\\\"");
        format!("[{}$=\"{}\"]", self.attribute, escaped)
    }
}

fn default_ancestor_depth() -> usize {
    2
}

/// Rules for isolating release blocks in rendered HTML release notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseNotesRules {
    /// Applied in order; each rule's deletions land before the next rule matches.
    #[serde(default)]
    pub exclusion_anchors: Vec<ExclusionAnchor>,
    /// How many parent hops separate an anchor from the subtree that gets deleted.
    #[serde(default = "default_ancestor_depth")]
    pub ancestor_depth: usize,
    pub release_block_selector: String,
}

/// Rules for trimming a versioned Markdown changelog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogRules {
    pub version_heading_pattern: String,
    #[serde(default)]
    pub ignored_section_prefixes: Vec<String>,
    /// Heading prefixes that close an ignored subsection.
    #[serde(default)]
    pub section_heading_prefixes: Vec<String>,
}

/// The complete rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub release_notes: ReleaseNotesRules,
    pub changelog: ChangelogRules,
}

impl Rules {
    /// Parses a rule set from JSON.
    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a rule set from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, RulesError> {
        let json = fs::read_to_string(path).map_err(|source| RulesError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

impl Default for Rules {
    fn default() -> Self {
        load_builtin_rules()
    }
}

/// Loads the builtin rule set from embedded JSON.
///
/// # Panics
///
/// Panics if the embedded JSON is malformed.
pub fn load_builtin_rules() -> Rules {
    Rules::from_json(BUILTIN_RULES_JSON).expect("failed to parse builtin rules")
}
