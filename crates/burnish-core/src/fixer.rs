//! Structural fix engine
//!
//! A fix never mutates a tree: it locates the offending node in the
//! original tree, synthesizes a replacement green subtree, and produces a
//! new root that shares every untouched subtree with the original.
//!
//! Batch application builds all edits against the original tree first
//! (order-independent, since spans may not overlap), then substitutes every
//! target in a single recursive rewrite pass. Nothing is re-parsed and no
//! edit is applied against an already-edited tree, so span invalidation
//! cannot occur within a batch.

use std::collections::HashMap;

use rowan::{GreenNode, Language, NodeOrToken, TextRange};

use crate::diagnostics::{Diagnostic, Location};
use crate::error::BurnishError;
use crate::result::Result;
use crate::syntax::{CsLanguage, CsSyntaxNode};

/// A single node replacement, built against one specific tree
#[derive(Debug, Clone)]
pub struct Edit {
    /// The node to replace, in the original tree
    pub target: CsSyntaxNode,
    /// The replacement subtree
    pub replacement: GreenNode,
    /// The diagnostic this edit resolves
    pub diagnostic: Diagnostic,
}

impl Edit {
    /// The byte span this edit touches
    pub fn span(&self) -> TextRange {
        self.target.text_range()
    }

    /// Whether two edits touch overlapping spans
    pub fn conflicts_with(&self, other: &Edit) -> bool {
        let a = self.span();
        let b = other.span();
        a.start() < b.end() && b.start() < a.end()
    }
}

/// Builds replacement edits for one rule's diagnostics
///
/// A fixer is not a diagnosis: it assumes the diagnostic identified a valid
/// target, but re-locates and re-validates it at fix time, failing with
/// [`BurnishError::FixError`] instead of guessing when a precondition does
/// not hold.
pub trait Fixer: Send + Sync {
    /// The rule whose diagnostics this fixer resolves
    fn rule_id(&self) -> &'static str;

    /// Locate the target in `root` and build its replacement
    fn build_edit(&self, root: &CsSyntaxNode, diagnostic: &Diagnostic) -> Result<Edit>;

    /// Apply this fixer to a single diagnostic, producing a new tree
    fn fix(&self, root: &CsSyntaxNode, diagnostic: &Diagnostic) -> Result<CsSyntaxNode> {
        let edit = self.build_edit(root, diagnostic)?;
        Ok(apply_edit(&edit))
    }
}

/// Apply one edit, producing the new tree root
pub fn apply_edit(edit: &Edit) -> CsSyntaxNode {
    let green = edit.target.replace_with(edit.replacement.clone());
    CsSyntaxNode::new_root(green)
}

/// A fix that was abandoned; its diagnostic stays reported, unfixed
#[derive(Debug)]
pub struct SkippedFix {
    pub diagnostic: Diagnostic,
    pub reason: BurnishError,
}

/// Result of a batch fix over one document
#[derive(Debug)]
pub struct FixOutcome {
    /// The rewritten tree (the original root if nothing applied)
    pub root: CsSyntaxNode,
    /// Number of edits applied
    pub applied: usize,
    /// Fixes abandoned on precondition failures
    pub skipped: Vec<SkippedFix>,
}

/// Apply a fixer to every diagnostic of one rule in a single rewrite pass
///
/// All diagnostics must come from the same rule and the same tree. A
/// precondition failure abandons only that fix; overlapping edit spans fail
/// the whole batch, naming the two conflicting diagnostics.
pub fn apply_all(
    root: &CsSyntaxNode,
    fixer: &dyn Fixer,
    diagnostics: &[Diagnostic],
) -> Result<FixOutcome> {
    let mut edits: Vec<Edit> = Vec::new();
    let mut skipped = Vec::new();

    for diagnostic in diagnostics {
        if diagnostic.rule_id != fixer.rule_id() {
            return Err(BurnishError::fix_error(
                fixer.rule_id(),
                format!(
                    "batch contains a diagnostic from '{}'; batches are per-rule",
                    diagnostic.rule_id
                ),
            ));
        }
        match fixer.build_edit(root, diagnostic) {
            Ok(edit) => edits.push(edit),
            Err(reason) => {
                tracing::warn!(
                    rule = fixer.rule_id(),
                    error = %reason,
                    "fix abandoned for one diagnostic"
                );
                skipped.push(SkippedFix {
                    diagnostic: diagnostic.clone(),
                    reason,
                });
            }
        }
    }

    edits.sort_by_key(|e| u32::from(e.span().start()));
    // Sorted by start, any overlap implies an overlapping adjacent pair
    for pair in edits.windows(2) {
        if pair[0].conflicts_with(&pair[1]) {
            return Err(BurnishError::edit_conflict(
                pair[0].diagnostic.describe(),
                pair[1].diagnostic.describe(),
            ));
        }
    }

    if edits.is_empty() {
        return Ok(FixOutcome {
            root: root.clone(),
            applied: 0,
            skipped,
        });
    }

    let mut targets: HashMap<EditKey, GreenNode> = HashMap::new();
    for edit in &edits {
        targets.insert(edit_key(&edit.target), edit.replacement.clone());
    }

    let applied = edits.len();
    let green = rewrite(root, &targets);
    Ok(FixOutcome {
        root: CsSyntaxNode::new_root(green),
        applied,
        skipped,
    })
}

/// (start, end, raw kind) identity of a target node within one tree
type EditKey = (u32, u32, u16);

fn edit_key(node: &CsSyntaxNode) -> EditKey {
    let range = node.text_range();
    (
        range.start().into(),
        range.end().into(),
        CsLanguage::kind_to_raw(node.kind()).0,
    )
}

/// Single-pass recursive rewrite: substitute targets, reuse untouched green
/// subtrees as-is
fn rewrite(node: &CsSyntaxNode, targets: &HashMap<EditKey, GreenNode>) -> GreenNode {
    if let Some(replacement) = targets.get(&edit_key(node)) {
        return replacement.clone();
    }

    let range = node.text_range();
    let (start, end): (u32, u32) = (range.start().into(), range.end().into());
    let contains_target = targets
        .keys()
        .any(|&(s, e, _)| start <= s && e <= end);
    if !contains_target {
        // Shared, byte-identical subtree
        return node.green().into_owned();
    }

    let children: Vec<NodeOrToken<GreenNode, rowan::GreenToken>> = node
        .children_with_tokens()
        .map(|element| match element {
            NodeOrToken::Node(child) => NodeOrToken::Node(rewrite(&child, targets)),
            NodeOrToken::Token(token) => NodeOrToken::Token(token.green().to_owned()),
        })
        .collect();

    GreenNode::new(CsLanguage::kind_to_raw(node.kind()), children)
}

/// Find the node at a diagnostic's span satisfying a predicate
///
/// Fixers use this to re-locate their target; `None` means the construct is
/// no longer present in this tree.
pub fn node_at_location(
    root: &CsSyntaxNode,
    location: &Location,
    predicate: impl Fn(&CsSyntaxNode) -> bool,
) -> Option<CsSyntaxNode> {
    let (start, end) = location.span();
    let range = TextRange::new((start as u32).into(), (end as u32).into());
    if !root.text_range().contains_range(range) {
        return None;
    }

    let element = root.covering_element(range);
    let mut current = match element {
        NodeOrToken::Node(node) => Some(node),
        NodeOrToken::Token(token) => token.parent(),
    };

    while let Some(node) = current {
        if node.text_range() == range && predicate(&node) {
            return Some(node);
        }
        current = node.parent();
    }
    None
}
