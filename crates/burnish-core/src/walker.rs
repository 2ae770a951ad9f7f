//! Tree traversal and rule dispatch
//!
//! The walker visits every node exactly once, depth-first pre-order, and
//! dispatches each node to the rules subscribed to its kind. Rule failures
//! are isolated per node: they surface as engine warnings next to the
//! ordinary diagnostics and never abort the walk of unrelated nodes.

use std::sync::atomic::{AtomicBool, Ordering};

use rowan::WalkEvent;

use crate::diagnostics::{Diagnostic, Location};
use crate::error::BurnishError;
use crate::registry::{RuleContext, RuleRegistry};
use crate::result::Result;
use crate::syntax::CsSyntaxNode;

/// An isolated rule failure, reported alongside diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineWarning {
    /// The rule whose evaluation failed
    pub rule_id: String,
    /// The node being evaluated when it failed
    pub location: Location,
    /// The underlying error, rendered
    pub message: String,
}

/// Output of one walk: diagnostics in traversal (= source) order plus any
/// isolated rule failures
#[derive(Debug, Default)]
pub struct WalkReport {
    pub diagnostics: Vec<Diagnostic>,
    pub warnings: Vec<EngineWarning>,
}

impl WalkReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.warnings.is_empty()
    }
}

/// Dispatches visited nodes to subscribed rules and collects diagnostics
pub struct Walker<'a> {
    registry: &'a RuleRegistry,
    ctx: &'a RuleContext,
}

impl<'a> Walker<'a> {
    pub fn new(registry: &'a RuleRegistry, ctx: &'a RuleContext) -> Self {
        Self { registry, ctx }
    }

    /// Walk the tree and collect diagnostics
    pub fn run(&self, root: &CsSyntaxNode) -> WalkReport {
        let mut report = WalkReport::default();
        for event in root.preorder() {
            if let WalkEvent::Enter(node) = event {
                self.visit(&node, &mut report);
            }
        }
        tracing::debug!(
            diagnostics = report.diagnostics.len(),
            warnings = report.warnings.len(),
            "walk finished"
        );
        report
    }

    /// Walk the tree, checking the flag between node visits
    ///
    /// Cancellation is cooperative and coarse-grained: it is only observed
    /// between nodes, never mid-evaluation, so no partial per-node state can
    /// leak out.
    pub fn run_cancellable(&self, root: &CsSyntaxNode, cancel: &AtomicBool) -> Result<WalkReport> {
        let mut report = WalkReport::default();

        for event in root.preorder() {
            let WalkEvent::Enter(node) = event else {
                continue;
            };
            if cancel.load(Ordering::Relaxed) {
                return Err(BurnishError::Cancelled);
            }
            self.visit(&node, &mut report);
        }

        Ok(report)
    }

    fn visit(&self, node: &CsSyntaxNode, report: &mut WalkReport) {
        for rule in self.registry.rules_for(node.kind()) {
            let descriptor = rule.descriptor();
            match rule.check(node, self.ctx) {
                Ok(Some(mut diagnostic)) => {
                    diagnostic.severity = self.registry.severity_for(descriptor);
                    report.diagnostics.push(diagnostic);
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(
                        rule = descriptor.id,
                        error = %err,
                        "rule evaluation failed; continuing walk"
                    );
                    report.warnings.push(EngineWarning {
                        rule_id: descriptor.id.to_string(),
                        location: self.ctx.location_of(node),
                        message: err.to_string(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use crate::registry::{Rule, RuleCategory, RuleDescriptor};
    use crate::syntax::{CsSyntaxKind, parse};
    use std::sync::Arc;

    struct NameCollector;

    static NAME_DESCRIPTOR: RuleDescriptor = RuleDescriptor {
        id: "style/sample-names",
        name: "SampleNames",
        title: "Flags every name expression",
        message_template: "name '{0}'",
        category: RuleCategory::Style,
        severity: Severity::Info,
        kinds: &[CsSyntaxKind::NameExpression],
    };

    impl Rule for NameCollector {
        fn descriptor(&self) -> &RuleDescriptor {
            &NAME_DESCRIPTOR
        }

        fn check(&self, node: &CsSyntaxNode, ctx: &RuleContext) -> Result<Option<Diagnostic>> {
            let text = node.text().to_string();
            if text == "boom" {
                return Err(BurnishError::rule_error(
                    NAME_DESCRIPTOR.id,
                    "synthetic failure",
                ));
            }
            Ok(Some(Diagnostic::new(
                NAME_DESCRIPTOR.id,
                NAME_DESCRIPTOR.severity,
                NAME_DESCRIPTOR.format_message(&[text.as_str()]),
                ctx.location_of(node),
            )))
        }
    }

    fn registry() -> RuleRegistry {
        let mut registry = RuleRegistry::new();
        registry.register(Arc::new(NameCollector)).unwrap();
        registry
    }

    #[test]
    fn diagnostics_arrive_in_source_order() {
        let root = parse("alpha(); beta(); gamma();").syntax();
        let ctx = RuleContext::for_tree("test.cs", &root);
        let report = Walker::new(&registry(), &ctx).run(&root);

        let messages: Vec<_> = report
            .diagnostics
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(
            messages,
            vec!["name 'alpha'", "name 'beta'", "name 'gamma'"]
        );
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn rule_failures_are_isolated() {
        let root = parse("good(); boom(); fine();").syntax();
        let ctx = RuleContext::for_tree("test.cs", &root);
        let report = Walker::new(&registry(), &ctx).run(&root);

        // The failing node is skipped; the rest of the walk continues
        assert_eq!(report.diagnostics.len(), 2);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].rule_id, "style/sample-names");
        assert!(report.warnings[0].message.contains("synthetic failure"));
    }

    #[test]
    fn disabled_rules_produce_nothing() {
        let root = parse("alpha();").syntax();
        let ctx = RuleContext::for_tree("test.cs", &root);
        let mut registry = registry();
        registry.disable("style/sample-names");

        let report = Walker::new(&registry, &ctx).run(&root);
        assert!(report.is_clean());
    }

    #[test]
    fn cancellation_stops_the_walk() {
        let root = parse("alpha();").syntax();
        let ctx = RuleContext::for_tree("test.cs", &root);
        let cancel = AtomicBool::new(true);

        let result = Walker::new(&registry(), &ctx).run_cancellable(&root, &cancel);
        assert!(matches!(result, Err(BurnishError::Cancelled)));
    }

    #[test]
    fn severity_override_applies_to_emitted_diagnostics() {
        let root = parse("alpha();").syntax();
        let ctx = RuleContext::for_tree("test.cs", &root);
        let mut registry = registry();
        registry.set_severity("style/sample-names", Severity::Error);

        let report = Walker::new(&registry, &ctx).run(&root);
        assert_eq!(report.diagnostics[0].severity, Severity::Error);
    }
}
