// ABOUTME: Line-oriented filter that keeps only version sections of a Markdown changelog.
// ABOUTME: Skips named subsections (dependencies, downloads) until the next top-level heading.

//! Changelog filtering.
//!
//! The filter is a three-state machine driven one line at a time:
//!
//! - `SeekingFirstVersion`: everything is dropped until a version heading.
//!   That heading is re-evaluated as `Emitting`.
//! - `Emitting`: lines are kept, except an ignored-section header, which is
//!   dropped and switches to `Ignoring`.
//! - `Ignoring`: lines are dropped. Another ignored-section header keeps the
//!   state. A section heading switches back to `Emitting` and is re-evaluated
//!   there.
//!
//! Ignored-section headers take precedence over section headings, so a
//! heading like `## Dependencies` never reopens emission.

use regex::Regex;
use tracing::{debug, trace};

use crate::error::RulesError;
use crate::rules::{load_builtin_rules, ChangelogRules};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SeekingFirstVersion,
    Emitting,
    Ignoring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disposition {
    Emit,
    Discard,
}

/// Compiled changelog rules. Build once, share by reference.
#[derive(Debug, Clone)]
pub struct ChangelogFilter {
    version_heading: Regex,
    ignored_prefixes: Vec<String>,
    section_prefixes: Vec<String>,
}

impl ChangelogFilter {
    /// Compiles the given rules. Fails only on an invalid version heading pattern.
    pub fn new(rules: &ChangelogRules) -> Result<Self, RulesError> {
        let version_heading =
            Regex::new(&rules.version_heading_pattern).map_err(|source| {
                RulesError::InvalidPattern {
                    pattern: rules.version_heading_pattern.clone(),
                    source,
                }
            })?;

        Ok(Self {
            version_heading,
            ignored_prefixes: rules.ignored_section_prefixes.clone(),
            section_prefixes: rules.section_heading_prefixes.clone(),
        })
    }

    /// Compiles the builtin rules.
    ///
    /// # Panics
    ///
    /// Panics if the embedded version heading pattern is invalid.
    pub fn builtin() -> Self {
        Self::new(&load_builtin_rules().changelog).expect("builtin changelog rules")
    }

    /// Returns the lines of `changelog` that belong to version sections, each
    /// terminated by `\n`, in their original order.
    ///
    /// Input without any version heading yields an empty string.
    pub fn filter(&self, changelog: &str) -> String {
        let mut out = String::with_capacity(changelog.len());
        let mut state = State::SeekingFirstVersion;
        let mut emitted = 0usize;
        let mut discarded = 0usize;

        for line in changelog.lines() {
            let (next, disposition) = self.step(state, line);
            if next != state {
                trace!(from = ?state, to = ?next, line, "changelog state change");
            }
            state = next;

            match disposition {
                Disposition::Emit => {
                    out.push_str(line);
                    out.push('\n');
                    emitted += 1;
                }
                Disposition::Discard => discarded += 1,
            }
        }

        debug!(emitted, discarded, final_state = ?state, "filtered changelog");
        out
    }

    fn step(&self, state: State, line: &str) -> (State, Disposition) {
        match state {
            State::SeekingFirstVersion => {
                if self.is_version_heading(line) {
                    self.step(State::Emitting, line)
                } else {
                    (State::SeekingFirstVersion, Disposition::Discard)
                }
            }
            _ if self.is_ignored_header(line) => (State::Ignoring, Disposition::Discard),
            State::Ignoring if self.is_section_heading(line) => self.step(State::Emitting, line),
            State::Ignoring => (State::Ignoring, Disposition::Discard),
            State::Emitting => (State::Emitting, Disposition::Emit),
        }
    }

    /// True if `line` opens a version section.
    pub fn is_version_heading(&self, line: &str) -> bool {
        self.version_heading.is_match(line)
    }

    /// True if `line` opens a subsection whose body is dropped.
    pub fn is_ignored_header(&self, line: &str) -> bool {
        self.ignored_prefixes
            .iter()
            .any(|prefix| line.starts_with(prefix.as_str()))
    }

    /// True if `line` is a heading at one of the levels that close an ignored subsection.
    pub fn is_section_heading(&self, line: &str) -> bool {
        self.section_prefixes
            .iter()
            .any(|prefix| line.starts_with(prefix.as_str()))
    }
}

impl Default for ChangelogFilter {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Filters a changelog using the builtin rules.
///
/// Compiles the rules on every call; hold a [`ChangelogFilter`] for repeated use.
pub fn filter_changelog(changelog: &str) -> String {
    ChangelogFilter::builtin().filter(changelog)
}
