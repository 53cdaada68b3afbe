// ABOUTME: Library entry point for trimming release notes and changelogs before upgrade analysis.
// ABOUTME: Re-exports the extractor, the changelog filter, rule loading, and prompt rendering.

//! Upgrade notes - keeps only the upgrade-relevant parts of release documents.
//!
//! Two independent transforms are provided:
//!
//! - [`ReleaseNotesExtractor`] prunes excluded subtrees from parsed HTML release
//!   notes and returns the text of the remaining release blocks.
//! - [`ChangelogFilter`] keeps the version sections of a Markdown changelog,
//!   dropping dependency and download listings.
//!
//! Both are compiled once from [`Rules`] and never fail on input documents.
//!
//! # Example
//!
//! ```
//! use upgrade_notes::{load_builtin_rules, ChangelogFilter};
//!
//! let rules = load_builtin_rules();
//! let filter = ChangelogFilter::new(&rules.changelog).unwrap();
//! let kept = filter.filter("toc\n# v1.33.1\n## Dependencies\n- go 1.24\n## Changes\n- fix\n");
//! assert_eq!(kept, "# v1.33.1\n## Changes\n- fix\n");
//! ```

pub mod changelog;
pub mod decode;
pub mod error;
pub mod prompt;
pub mod release_notes;
pub mod rules;
pub mod version;

pub use crate::changelog::{filter_changelog, ChangelogFilter};
pub use crate::decode::decode_body;
pub use crate::error::{PromptError, RulesError, VersionError};
pub use crate::prompt::{render_upgrade_risk_report, PromptResult, UpgradeRiskReportArgs};
pub use crate::release_notes::{extract_release_content, ReleaseNotesExtractor};
pub use crate::rules::{load_builtin_rules, ChangelogRules, ExclusionAnchor, ReleaseNotesRules, Rules};
pub use crate::version::{MinorVersion, RELEASE_NOTES_URL};

/// Re-exported so callers can build documents for [`ReleaseNotesExtractor::extract`].
pub use scraper::Html;
