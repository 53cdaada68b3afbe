// ABOUTME: Release-notes extractor that prunes excluded subtrees from a parsed HTML document.
// ABOUTME: Concatenates the text of the remaining release blocks in document order.

//! HTML release-notes extraction.
//!
//! Extraction runs in two passes over a mutable [`scraper::Html`] tree:
//!
//! 1. For each exclusion anchor, in rule order, every matching element is
//!    located, the tree is climbed `ancestor_depth` element parents, and that
//!    ancestor is detached. All deletions for one rule land before the next
//!    rule is matched, so anchors already inside a detached subtree are simply
//!    not found.
//! 2. Every remaining release block contributes its full text, with no
//!    separator, in document order.
//!
//! Anchors without enough element ancestors are skipped.

use ego_tree::{NodeId, NodeRef};
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, trace};

use crate::error::RulesError;
use crate::rules::{load_builtin_rules, ReleaseNotesRules};

/// A compiled exclusion anchor with its source CSS kept for diagnostics.
#[derive(Debug, Clone)]
struct CompiledAnchor {
    css: String,
    selector: Selector,
}

/// Compiled release-notes rules. Build once, share by reference.
#[derive(Debug, Clone)]
pub struct ReleaseNotesExtractor {
    anchors: Vec<CompiledAnchor>,
    ancestor_depth: usize,
    release_block: Selector,
}

fn compile_selector(css: &str) -> Result<Selector, RulesError> {
    Selector::parse(css).map_err(|e| RulesError::invalid_selector(css, e))
}

impl ReleaseNotesExtractor {
    /// Compiles the given rules. Fails only on unparseable selectors.
    pub fn new(rules: &ReleaseNotesRules) -> Result<Self, RulesError> {
        let anchors = rules
            .exclusion_anchors
            .iter()
            .map(|anchor| {
                let css = anchor.to_css();
                let selector = compile_selector(&css)?;
                Ok(CompiledAnchor { css, selector })
            })
            .collect::<Result<Vec<_>, RulesError>>()?;

        Ok(Self {
            anchors,
            ancestor_depth: rules.ancestor_depth,
            release_block: compile_selector(&rules.release_block_selector)?,
        })
    }

    /// Compiles the builtin rules.
    ///
    /// # Panics
    ///
    /// Panics if the embedded rule selectors are invalid.
    pub fn builtin() -> Self {
        Self::new(&load_builtin_rules().release_notes).expect("builtin release notes rules")
    }

    /// Removes excluded subtrees from `doc`, then returns the concatenated text
    /// of every remaining release block.
    ///
    /// The document is mutated in place and should not be reused afterwards.
    pub fn extract(&self, doc: &mut Html) -> String {
        for anchor in &self.anchors {
            self.remove_anchored(doc, anchor);
        }

        let mut blocks = 0usize;
        let content: String = attached_matches(doc, &self.release_block)
            .inspect(|_| blocks += 1)
            .map(|el| el.text().collect::<String>())
            .collect();
        debug!(blocks, bytes = content.len(), "collected release blocks");
        content
    }

    /// Parses `html` as a full document and extracts from it.
    pub fn extract_html(&self, html: &str) -> String {
        let mut doc = Html::parse_document(html);
        self.extract(&mut doc)
    }

    /// Detaches the ancestors of every attached match and returns how many were detached.
    fn remove_anchored(&self, doc: &mut Html, anchor: &CompiledAnchor) -> usize {
        let mut skipped = 0usize;
        let doomed: Vec<NodeId> = attached_matches(doc, &anchor.selector)
            .filter_map(|el| {
                let target = ancestor_at(*el, self.ancestor_depth);
                if target.is_none() {
                    skipped += 1;
                }
                target
            })
            .collect();

        for id in &doomed {
            if let Some(mut node) = doc.tree.get_mut(*id) {
                node.detach();
            }
        }

        debug!(
            anchor = %anchor.css,
            removed = doomed.len(),
            skipped,
            "applied exclusion anchor"
        );
        doomed.len()
    }
}

impl Default for ReleaseNotesExtractor {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Elements still reachable from the document root that match `selector`, in document order.
///
/// `Html::select` walks node storage, which still holds detached subtrees.
fn attached_matches<'a>(
    doc: &'a Html,
    selector: &'a Selector,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    doc.tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(move |el| selector.matches(el))
}

/// Climbs `depth` element parents from `node`.
///
/// Returns `None` when the chain runs out or reaches a non-element (the
/// document root) before `depth` hops.
fn ancestor_at(node: NodeRef<'_, Node>, depth: usize) -> Option<NodeId> {
    let mut current = node;
    for hop in 0..depth {
        match current.parent() {
            Some(parent) if parent.value().is_element() => current = parent,
            _ => {
                trace!(hop, depth, "anchor ancestry too shallow");
                return None;
            }
        }
    }
    Some(current.id())
}

/// Extracts release content using the builtin rules.
///
/// Compiles the rules on every call; hold a [`ReleaseNotesExtractor`] for repeated use.
pub fn extract_release_content(doc: &mut Html) -> String {
    ReleaseNotesExtractor::builtin().extract(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ExclusionAnchor;
    use pretty_assertions::assert_eq;

    fn rules(anchors: Vec<ExclusionAnchor>, depth: usize) -> ReleaseNotesRules {
        ReleaseNotesRules {
            exclusion_anchors: anchors,
            ancestor_depth: depth,
            release_block_selector: ".releases".to_string(),
        }
    }

    #[test]
    fn release_block_inside_removed_ancestor_is_dropped() {
        let html = r#"<html><body>
            <div class="releases"><p>GKE 1.30 is GA</p></div>
            <section>
              <div><h3 data-text="October 1, 2025 Version updates">Version updates</h3></div>
              <div class="releases"><p>Bumped to 1.31.2</p></div>
            </section>
        </body></html>"#;

        let text = ReleaseNotesExtractor::builtin().extract_html(html);
        assert_eq!(text, "GKE 1.30 is GA");
    }

    #[test]
    fn nested_block_in_removed_subtree_does_not_leak() {
        let html = r#"<div class="releases">A</div><section><div><h3 data-text="Version updates">v</h3></div><div class="releases">LEAK</div></section>"#;
        assert_eq!(ReleaseNotesExtractor::builtin().extract_html(html), "A");
    }

    #[test]
    fn removing_the_html_element_leaves_nothing() {
        // h3 -> body -> html, so the whole document element is detached.
        let html = r#"<html><body><h3 data-text="Version updates">v</h3><div class="releases">gone</div></body></html>"#;
        assert_eq!(ReleaseNotesExtractor::builtin().extract_html(html), "");
    }

    #[test]
    fn anchors_inside_removed_subtrees_are_not_matched() {
        let mut doc = Html::parse_document(
            r#"<div class="releases"><section><div><h3 data-text="Version updates">v</h3></div>
               <article><div><h3 data-text="Version updates">w</h3></div><p>inner</p></article></section>
               <p>kept</p></div>"#,
        );
        let extractor = ReleaseNotesExtractor::builtin();
        let anchor = &extractor.anchors[0];
        assert_eq!(extractor.remove_anchored(&mut doc, anchor), 1);
        let remaining = attached_matches(&doc, &anchor.selector).count();
        assert_eq!(remaining, 0);
        assert_eq!(extractor.extract(&mut doc).trim(), "kept");
    }

    #[test]
    fn blocks_are_concatenated_without_separator() {
        let html = r#"<div class="releases">one</div><p>noise</p><div class="releases">two</div>"#;
        let text = ReleaseNotesExtractor::builtin().extract_html(html);
        assert_eq!(text, "onetwo");
    }

    #[test]
    fn free_function_uses_builtin_rules() {
        let mut doc = Html::parse_document(
            r#"<div class="releases"><div><div><h3 data-text="Security updates">s</h3></div></div>ok</div>"#,
        );
        assert_eq!(extract_release_content(&mut doc), "ok");
    }

    #[test]
    fn no_release_blocks_yields_empty_string() {
        let html = "<html><body><p>nothing to see</p></body></html>";
        assert_eq!(ReleaseNotesExtractor::builtin().extract_html(html), "");
    }

    #[test]
    fn shallow_anchor_is_ignored() {
        // p -> body -> html -> document; the document is not an element.
        let html = r#"<body class="releases"><p data-text="Security updates">patched</p></body>"#;
        let extractor = ReleaseNotesExtractor::new(&rules(
            vec![ExclusionAnchor::new("data-text", "Security updates")],
            3,
        ))
        .unwrap();
        assert_eq!(extractor.extract_html(html), "patched");
    }

    #[test]
    fn depth_zero_removes_only_the_anchor() {
        let html = r#"<div class="releases">keep <span data-text="x Version updates">drop</span></div>"#;
        let extractor = ReleaseNotesExtractor::new(&rules(
            vec![ExclusionAnchor::new("data-text", "Version updates")],
            0,
        ))
        .unwrap();
        assert_eq!(extractor.extract_html(html), "keep ");
    }

    #[test]
    fn later_rule_anchor_inside_removed_subtree_is_skipped() {
        // The security anchor sits in the subtree the version anchor removes.
        let html = r#"<div class="releases">
            <article><div><h3 data-text="Version updates">v</h3></div>
              <div><h3 data-text="Security updates">s</h3></div></article>
            <aside><div><h3 data-text="Security updates">s2</h3></div></aside>
            <p>kept</p>
        </div>"#;
        let extractor = ReleaseNotesExtractor::new(&rules(
            vec![
                ExclusionAnchor::new("data-text", "Version updates"),
                ExclusionAnchor::new("data-text", "Security updates"),
            ],
            2,
        ))
        .unwrap();
        let text = extractor.extract_html(html);
        assert_eq!(text.trim(), "kept");
    }

    #[test]
    fn suffix_match_is_literal_and_anchored_at_end() {
        let html = r#"<div class="releases">
            <section><div><h3 data-text="Version updates (old)">old</h3></div></section>
        </div>"#;
        let text = ReleaseNotesExtractor::builtin().extract_html(html);
        assert!(text.contains("old"));
    }

    #[test]
    fn invalid_block_selector_fails_to_compile() {
        let mut bad = rules(vec![], 2);
        bad.release_block_selector = "[[[".to_string();
        let err = ReleaseNotesExtractor::new(&bad).unwrap_err();
        assert!(matches!(err, RulesError::InvalidSelector { .. }));
    }
}
