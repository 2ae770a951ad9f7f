//! Built-in rules and their fixers

use std::sync::Arc;

use burnish_core::{Fixer, Result, Rule, RuleRegistry};

pub mod assert_message;
pub mod braces;
pub mod predefined_type;

pub use assert_message::{ASSERT_WITHOUT_MESSAGE, AssertMessageFix, AssertMessageRule};
pub use braces::{BraceEnforcementRule, BraceFix, IF_ELSE_BRACES};
pub use predefined_type::{EXPLICIT_TYPE_NAMES, PredefinedTypeFix, PredefinedTypeRule};

/// All built-in rules, in registration order
pub fn all_rules() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(BraceEnforcementRule),
        Arc::new(PredefinedTypeRule),
        Arc::new(AssertMessageRule),
    ]
}

/// Build a registry holding every built-in rule
///
/// Runs the startup consistency checks (alias-map completeness) before any
/// rule is registered.
pub fn registry() -> Result<RuleRegistry> {
    predefined_type::validate_type_map()?;

    let mut registry = RuleRegistry::new();
    for rule in all_rules() {
        registry.register(rule)?;
    }
    tracing::debug!(rules = registry.len(), "built-in registry ready");
    Ok(registry)
}

/// The fixer for a built-in rule id, if the rule has one
pub fn fixer_for(rule_id: &str) -> Option<Box<dyn Fixer>> {
    match rule_id {
        IF_ELSE_BRACES => Some(Box::new(BraceFix::new())),
        EXPLICIT_TYPE_NAMES => Some(Box::new(PredefinedTypeFix)),
        ASSERT_WITHOUT_MESSAGE => Some(Box::new(AssertMessageFix)),
        _ => None,
    }
}
