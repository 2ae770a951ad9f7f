//! Message injection for bare assert calls
//!
//! An assertion invoked with only its boolean condition gives no hint of
//! what failed. The fix adds a second string-literal argument whose text is
//! the condition's own source text, making the assertion self-documenting.

use burnish_core::syntax::ast::{AstNode, InvocationExpression};
use burnish_core::syntax::factory;
use burnish_core::{
    BurnishError, CsSyntaxKind, CsSyntaxNode, Diagnostic, Edit, Fixer, Result, Rule, RuleCategory,
    RuleContext, RuleDescriptor, Severity, node_at_location,
};

/// Rule ID for assert message injection
pub const ASSERT_WITHOUT_MESSAGE: &str = "suspicious/assert-without-message";

static DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    id: ASSERT_WITHOUT_MESSAGE,
    name: "AssertWithoutMessage",
    title: "Call assert methods with a message parameter",
    message_template: "Call to '{0}' should pass a message parameter",
    category: RuleCategory::Suspicious,
    severity: Severity::Warning,
    kinds: &[CsSyntaxKind::InvocationExpression],
};

/// The assertion method name the rule recognizes (`Assert`, `Debug.Assert`)
const ASSERT_NAME: &str = "Assert";

/// Flags assert calls invoked with exactly one argument and no message
pub struct AssertMessageRule;

impl Rule for AssertMessageRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &DESCRIPTOR
    }

    fn check(&self, node: &CsSyntaxNode, ctx: &RuleContext) -> Result<Option<Diagnostic>> {
        let Some(call) = InvocationExpression::cast(node.clone()) else {
            return Ok(None);
        };
        if call.callee_name().as_deref() != Some(ASSERT_NAME) {
            return Ok(None);
        }
        let Some(arguments) = call.argument_list() else {
            return Ok(None);
        };
        if arguments.arguments().count() != 1 {
            return Ok(None);
        }

        Ok(Some(Diagnostic::new(
            DESCRIPTOR.id,
            DESCRIPTOR.severity,
            DESCRIPTOR.format_message(&[ASSERT_NAME]),
            ctx.location_of(node),
        )))
    }
}

/// Rebuilds the argument list as `(condition, "condition")`
///
/// Fails rather than guesses when the argument list does not hold exactly
/// one argument at fix time.
pub struct AssertMessageFix;

impl Fixer for AssertMessageFix {
    fn rule_id(&self) -> &'static str {
        ASSERT_WITHOUT_MESSAGE
    }

    fn build_edit(&self, root: &CsSyntaxNode, diagnostic: &Diagnostic) -> Result<Edit> {
        let call = node_at_location(root, &diagnostic.location, |n| {
            n.kind() == CsSyntaxKind::InvocationExpression
        })
        .and_then(InvocationExpression::cast)
        .ok_or_else(|| {
            BurnishError::fix_error(ASSERT_WITHOUT_MESSAGE, "assert call is no longer present")
        })?;

        let list = call.argument_list().ok_or_else(|| {
            BurnishError::fix_error(ASSERT_WITHOUT_MESSAGE, "assert call has no argument list")
        })?;

        let arguments: Vec<_> = list.arguments().collect();
        if arguments.len() != 1 {
            return Err(BurnishError::fix_error(
                ASSERT_WITHOUT_MESSAGE,
                format!(
                    "expected exactly one argument, found {}",
                    arguments.len()
                ),
            ));
        }

        let condition = arguments[0].syntax();
        let message = condition.text().to_string();
        let replacement = factory::argument_list_with_message(condition, &message);

        Ok(Edit {
            target: list.syntax().clone(),
            replacement,
            diagnostic: diagnostic.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burnish_core::{RuleRegistry, WalkReport, Walker, parse};
    use std::sync::Arc;

    fn walk(source: &str) -> WalkReport {
        let root = parse(source).syntax();
        let ctx = RuleContext::for_tree("test.cs", &root);
        let mut registry = RuleRegistry::new();
        registry.register(Arc::new(AssertMessageRule)).unwrap();
        Walker::new(&registry, &ctx).run(&root)
    }

    #[test]
    fn fires_on_bare_assert() {
        let report = walk("Assert(x > 0);");
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(
            report.diagnostics[0].message,
            "Call to 'Assert' should pass a message parameter"
        );
    }

    #[test]
    fn fires_on_qualified_assert() {
        let report = walk("Debug.Assert(ready);");
        assert_eq!(report.diagnostics.len(), 1);
    }

    #[test]
    fn silent_when_message_is_present() {
        assert!(walk("Assert(x > 0, \"x must be positive\");").is_clean());
    }

    #[test]
    fn silent_on_other_calls() {
        assert!(walk("Require(x > 0);").is_clean());
    }

    #[test]
    fn fix_injects_the_condition_text() {
        let root = parse("Debug.Assert(x > 0);").syntax();
        let ctx = RuleContext::for_tree("test.cs", &root);
        let mut registry = RuleRegistry::new();
        registry.register(Arc::new(AssertMessageRule)).unwrap();
        let report = Walker::new(&registry, &ctx).run(&root);

        let fixed = AssertMessageFix
            .fix(&root, &report.diagnostics[0])
            .unwrap();
        assert_eq!(
            fixed.text().to_string(),
            "Debug.Assert(x > 0, \"x > 0\");"
        );
    }

    #[test]
    fn fix_fails_on_unexpected_argument_count() {
        // Diagnose against one tree, then try to fix a different tree where
        // the call already has two arguments at the same span
        let root = parse("Assert(a);").syntax();
        let ctx = RuleContext::for_tree("test.cs", &root);
        let mut registry = RuleRegistry::new();
        registry.register(Arc::new(AssertMessageRule)).unwrap();
        let report = Walker::new(&registry, &ctx).run(&root);
        let diagnostic = &report.diagnostics[0];

        let changed = parse("Assert(a,b);").syntax();
        // Same span, but the argument list no longer holds exactly one
        let mut stale = diagnostic.clone();
        stale.location.length = "Assert(a,b)".len();
        let result = AssertMessageFix.fix(&changed, &stale);
        assert!(matches!(result, Err(BurnishError::FixError { .. })));
    }
}
