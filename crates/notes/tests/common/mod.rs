// ABOUTME: Shared fixtures and helpers for upgrade-notes integration tests.
// ABOUTME: Loads documents from tests/fixtures and builds ad-hoc HTML and changelog inputs.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

/// Absolute path to a file in the fixtures directory.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load a fixture file as text.
pub fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read fixture {:?}: {}", path, e))
}

/// Join lines with `\n`, without a trailing terminator.
pub fn changelog(lines: &[&str]) -> String {
    lines.join("\n")
}

/// Split filter output back into lines.
pub fn output_lines(output: &str) -> Vec<&str> {
    output.lines().collect()
}

/// Wraps a body fragment in a minimal HTML document.
pub fn html_page(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>t</title></head><body>{}</body></html>",
        body
    )
}

/// Collapse whitespace runs so extracted text compares independent of markup indentation.
pub fn normalize_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
