//! Rule descriptors and the kind-dispatch registry
//!
//! The registry is built once at startup: every rule declares the node kinds
//! it subscribes to, and dispatch is an explicit kind -> rule-list map, not
//! runtime type inspection.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::LintConfig;
use crate::diagnostics::{Diagnostic, Location, Severity, SourceMap};
use crate::error::BurnishError;
use crate::result::Result;
use crate::syntax::{CsSyntaxKind, CsSyntaxNode, CsSyntaxToken};

/// Immutable metadata describing a rule, defined once at registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDescriptor {
    /// Unique identifier, `<category>/<rule-name>` in kebab-case
    pub id: &'static str,
    /// Short PascalCase name
    pub name: &'static str,
    /// Human-readable title
    pub title: &'static str,
    /// Message template with positional `{0}`/`{1}` placeholders
    pub message_template: &'static str,
    /// Category this rule belongs to
    pub category: RuleCategory,
    /// Default severity level
    pub severity: Severity,
    /// Node kinds this rule subscribes to
    pub kinds: &'static [CsSyntaxKind],
}

impl RuleDescriptor {
    /// Substitute positional parameters into the message template
    pub fn format_message(&self, args: &[&str]) -> String {
        let mut message = self.message_template.to_string();
        for (i, arg) in args.iter().enumerate() {
            message = message.replace(&format!("{{{i}}}"), arg);
        }
        message
    }

    /// Validate the descriptor shape
    pub fn validate(&self) -> Result<()> {
        let segments: Vec<&str> = self.id.split('/').collect();
        if segments.len() != 2 {
            return Err(BurnishError::registry_error(format!(
                "rule id '{}' must follow '<category>/<rule-name>' format",
                self.id
            )));
        }

        for segment in &segments {
            if !is_valid_slug(segment) {
                return Err(BurnishError::registry_error(format!(
                    "rule id segment '{segment}' must be lower-case and use hyphenated segments"
                )));
            }
        }

        if segments[0] != self.category.slug() {
            return Err(BurnishError::registry_error(format!(
                "rule id category '{}' must match metadata category '{}'",
                segments[0],
                self.category.slug()
            )));
        }

        if self.name.trim().is_empty() || self.title.trim().is_empty() {
            return Err(BurnishError::registry_error(format!(
                "rule '{}' must have a name and title",
                self.id
            )));
        }

        if self.kinds.is_empty() {
            return Err(BurnishError::registry_error(format!(
                "rule '{}' must subscribe to at least one node kind",
                self.id
            )));
        }

        Ok(())
    }
}

fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Categories for organizing rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    /// Correctness issues such as semantic violations
    Correctness,
    /// Suspicious patterns that often indicate bugs
    Suspicious,
    /// Excessive complexity that reduces readability
    Complexity,
    /// Performance and optimization suggestions
    Performance,
    /// Style and formatting preferences
    Style,
    /// Experimental or incubating rules
    Nursery,
}

impl RuleCategory {
    /// The kebab-case slug used in rule ids and filtering
    pub fn slug(&self) -> &'static str {
        match self {
            RuleCategory::Correctness => "correctness",
            RuleCategory::Suspicious => "suspicious",
            RuleCategory::Complexity => "complexity",
            RuleCategory::Performance => "performance",
            RuleCategory::Style => "style",
            RuleCategory::Nursery => "nursery",
        }
    }

    /// Parse a category from its slug
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "correctness" => Some(RuleCategory::Correctness),
            "suspicious" => Some(RuleCategory::Suspicious),
            "complexity" => Some(RuleCategory::Complexity),
            "performance" => Some(RuleCategory::Performance),
            "style" => Some(RuleCategory::Style),
            "nursery" => Some(RuleCategory::Nursery),
            _ => None,
        }
    }
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Per-file context handed to rules: path annotation, source text, and the
/// source map used to anchor diagnostics
#[derive(Debug, Clone)]
pub struct RuleContext {
    file: PathBuf,
    source: String,
    source_map: SourceMap,
}

impl RuleContext {
    /// Create a context from a file path and its source text
    pub fn new(file: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        let source = source.into();
        let source_map = SourceMap::new(&source);
        Self {
            file: file.into(),
            source,
            source_map,
        }
    }

    /// Create a context from a file path and a tree root
    pub fn for_tree(file: impl Into<PathBuf>, root: &CsSyntaxNode) -> Self {
        Self::new(file, root.text().to_string())
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Location of a node's span
    pub fn location_of(&self, node: &CsSyntaxNode) -> Location {
        let range = node.text_range();
        self.source_map.span_to_location(
            usize::from(range.start()),
            usize::from(range.end()),
            &self.source,
            &self.file,
        )
    }

    /// Location of a token's span
    pub fn location_of_token(&self, token: &CsSyntaxToken) -> Location {
        let range = token.text_range();
        self.source_map.span_to_location(
            usize::from(range.start()),
            usize::from(range.end()),
            &self.source,
            &self.file,
        )
    }
}

/// A linting rule: a pure function from a subscribed node to at most one
/// diagnostic
///
/// Implementations must be deterministic and must not mutate shared state;
/// the walker may evaluate them in any order.
pub trait Rule: Send + Sync {
    /// The rule's immutable descriptor
    fn descriptor(&self) -> &RuleDescriptor;

    /// Evaluate one node. Called only for nodes whose kind is in the
    /// descriptor's subscription set. An `Err` aborts this rule for this
    /// node only; the walk continues elsewhere.
    fn check(&self, node: &CsSyntaxNode, ctx: &RuleContext) -> Result<Option<Diagnostic>>;
}

/// Registry mapping node kinds to the rules subscribed to them
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Arc<dyn Rule>>,
    by_kind: HashMap<CsSyntaxKind, Vec<usize>>,
    disabled: HashSet<String>,
    severity_overrides: HashMap<String, Severity>,
}

impl RuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule, validating its descriptor and id uniqueness
    pub fn register(&mut self, rule: Arc<dyn Rule>) -> Result<()> {
        let descriptor = rule.descriptor();
        descriptor.validate()?;

        if self.rules.iter().any(|r| r.descriptor().id == descriptor.id) {
            return Err(BurnishError::registry_error(format!(
                "rule '{}' is already registered",
                descriptor.id
            )));
        }

        let index = self.rules.len();
        for &kind in descriptor.kinds {
            self.by_kind.entry(kind).or_default().push(index);
        }
        tracing::debug!(rule = descriptor.id, "registered rule");
        self.rules.push(rule);
        Ok(())
    }

    /// Disable a rule id; the walker skips dispatch to it
    pub fn disable(&mut self, id: &str) {
        self.disabled.insert(id.to_string());
    }

    /// Re-enable a previously disabled rule id
    pub fn enable(&mut self, id: &str) {
        self.disabled.remove(id);
    }

    pub fn is_disabled(&self, id: &str) -> bool {
        self.disabled.contains(id)
    }

    /// Override the severity diagnostics of a rule are emitted with
    pub fn set_severity(&mut self, id: &str, severity: Severity) {
        self.severity_overrides.insert(id.to_string(), severity);
    }

    /// The effective severity for a rule
    pub fn severity_for(&self, descriptor: &RuleDescriptor) -> Severity {
        self.severity_overrides
            .get(descriptor.id)
            .copied()
            .unwrap_or(descriptor.severity)
    }

    /// Apply a configuration: disabled ids and severity overrides
    pub fn apply_config(&mut self, config: &LintConfig) {
        for (id, rule_config) in config.rules() {
            if !rule_config.enabled {
                self.disable(id);
            }
            if let Some(severity) = rule_config.severity {
                self.set_severity(id, severity);
            }
        }
    }

    /// Enabled rules subscribed to a kind, in registration order
    pub fn rules_for(&self, kind: CsSyntaxKind) -> impl Iterator<Item = &Arc<dyn Rule>> {
        self.by_kind
            .get(&kind)
            .into_iter()
            .flatten()
            .map(|&i| &self.rules[i])
            .filter(|r| !self.disabled.contains(r.descriptor().id))
    }

    /// Look up a rule by id
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Rule>> {
        self.rules.iter().find(|r| r.descriptor().id == id)
    }

    /// All registered rule ids, in registration order
    pub fn ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.descriptor().id).collect()
    }

    /// Enumerate the descriptors of every registered rule
    pub fn descriptors(&self) -> impl Iterator<Item = &RuleDescriptor> {
        self.rules.iter().map(|r| r.descriptor())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopRule(RuleDescriptor);

    impl Rule for NoopRule {
        fn descriptor(&self) -> &RuleDescriptor {
            &self.0
        }

        fn check(&self, _node: &CsSyntaxNode, _ctx: &RuleContext) -> Result<Option<Diagnostic>> {
            Ok(None)
        }
    }

    fn descriptor(id: &'static str) -> RuleDescriptor {
        RuleDescriptor {
            id,
            name: "Noop",
            title: "Does nothing",
            message_template: "nothing to see",
            category: RuleCategory::Style,
            severity: Severity::Warning,
            kinds: &[CsSyntaxKind::IfStatement],
        }
    }

    #[test]
    fn message_template_substitution() {
        let descriptor = RuleDescriptor {
            message_template: "Convert '{0}' to the explicit type '{1}'",
            ..descriptor("style/sample-rule")
        };
        assert_eq!(
            descriptor.format_message(&["int", "Int32"]),
            "Convert 'int' to the explicit type 'Int32'"
        );
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(descriptor("style/good-rule").validate().is_ok());
        assert!(descriptor("BadRule").validate().is_err());
        assert!(descriptor("style/Bad").validate().is_err());
        assert!(descriptor("nope/good-rule").validate().is_err());
        assert!(descriptor("style/a/b").validate().is_err());
    }

    #[test]
    fn rejects_duplicate_registration() {
        let mut registry = RuleRegistry::new();
        registry
            .register(Arc::new(NoopRule(descriptor("style/dup-rule"))))
            .unwrap();
        assert!(
            registry
                .register(Arc::new(NoopRule(descriptor("style/dup-rule"))))
                .is_err()
        );
    }

    #[test]
    fn disabled_rules_skip_dispatch() {
        let mut registry = RuleRegistry::new();
        registry
            .register(Arc::new(NoopRule(descriptor("style/sample-rule"))))
            .unwrap();
        assert_eq!(registry.rules_for(CsSyntaxKind::IfStatement).count(), 1);

        registry.disable("style/sample-rule");
        assert_eq!(registry.rules_for(CsSyntaxKind::IfStatement).count(), 0);

        registry.enable("style/sample-rule");
        assert_eq!(registry.rules_for(CsSyntaxKind::IfStatement).count(), 1);
    }

    #[test]
    fn severity_overrides_apply() {
        let mut registry = RuleRegistry::new();
        let rule = NoopRule(descriptor("style/sample-rule"));
        let descriptor = rule.0.clone();
        registry.register(Arc::new(rule)).unwrap();

        assert_eq!(registry.severity_for(&descriptor), Severity::Warning);
        registry.set_severity("style/sample-rule", Severity::Error);
        assert_eq!(registry.severity_for(&descriptor), Severity::Error);
    }
}
