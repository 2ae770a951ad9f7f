//! End-to-end engine tests with a custom rule and fixer
//!
//! The built-in rules live in `burnish-rules`; these tests exercise the
//! engine surface the way a host with its own rules would.

use std::sync::Arc;

use rowan::NodeOrToken;

use burnish_core::syntax::factory;
use burnish_core::{
    BurnishError, CsSyntaxKind, CsSyntaxNode, Diagnostic, Edit, Fixer, Result, Rule, RuleCategory,
    RuleContext, RuleDescriptor, RuleRegistry, Severity, Walker, apply_all, node_at_location,
    parse,
};

/// Flags calls to `println` and renames them to `WriteLine`
struct NoPrintln;

static DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    id: "style/no-println",
    name: "NoPrintln",
    title: "Use WriteLine instead of println",
    message_template: "Replace '{0}' with 'WriteLine'",
    category: RuleCategory::Style,
    severity: Severity::Warning,
    kinds: &[CsSyntaxKind::InvocationExpression],
};

impl Rule for NoPrintln {
    fn descriptor(&self) -> &RuleDescriptor {
        &DESCRIPTOR
    }

    fn check(&self, node: &CsSyntaxNode, ctx: &RuleContext) -> Result<Option<Diagnostic>> {
        let callee = node
            .children()
            .find(|n| n.kind() == CsSyntaxKind::NameExpression);
        let Some(callee) = callee else {
            return Ok(None);
        };
        if callee.text() != "println" {
            return Ok(None);
        }
        Ok(Some(Diagnostic::new(
            DESCRIPTOR.id,
            DESCRIPTOR.severity,
            DESCRIPTOR.format_message(&["println"]),
            ctx.location_of(&callee),
        )))
    }
}

struct NoPrintlnFix;

impl Fixer for NoPrintlnFix {
    fn rule_id(&self) -> &'static str {
        DESCRIPTOR.id
    }

    fn build_edit(&self, root: &CsSyntaxNode, diagnostic: &Diagnostic) -> Result<Edit> {
        let target = node_at_location(root, &diagnostic.location, |n| {
            n.kind() == CsSyntaxKind::NameExpression && n.text() == "println"
        })
        .ok_or_else(|| BurnishError::fix_error(self.rule_id(), "call is no longer present"))?;

        let replacement = factory::node(
            CsSyntaxKind::NameExpression,
            vec![NodeOrToken::Token(factory::token(
                CsSyntaxKind::Ident,
                "WriteLine",
            ))],
        );
        Ok(Edit {
            target,
            replacement,
            diagnostic: diagnostic.clone(),
        })
    }
}

fn registry() -> RuleRegistry {
    let mut registry = RuleRegistry::new();
    registry.register(Arc::new(NoPrintln)).unwrap();
    registry
}

#[test]
fn lint_fix_relint_converges() {
    let source = "println(a);\nprintln(b);\nother(c);\n";
    let root = parse(source).syntax();
    let ctx = RuleContext::for_tree("app.cs", &root);
    let registry = registry();

    let report = Walker::new(&registry, &ctx).run(&root);
    assert_eq!(report.diagnostics.len(), 2);

    let outcome = apply_all(&root, &NoPrintlnFix, &report.diagnostics).unwrap();
    assert_eq!(outcome.applied, 2);
    assert_eq!(
        outcome.root.text().to_string(),
        "WriteLine(a);\nWriteLine(b);\nother(c);\n"
    );

    // Verification walk over the new tree finds nothing left to fix
    let ctx = RuleContext::for_tree("app.cs", &outcome.root);
    let report = Walker::new(&registry, &ctx).run(&outcome.root);
    assert!(report.diagnostics.is_empty());
}

#[test]
fn diagnostic_contract_exposes_one_based_lines_and_columns() {
    let source = "ok();\r\nprintln(x);\r\n";
    let root = parse(source).syntax();
    let ctx = RuleContext::for_tree("src\\main.cs", &root);

    let report = Walker::new(&registry(), &ctx).run(&root);
    assert_eq!(report.diagnostics.len(), 1);

    let diagnostic = &report.diagnostics[0];
    assert_eq!(diagnostic.rule_id, "style/no-println");
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert_eq!(diagnostic.message, "Replace 'println' with 'WriteLine'");
    // CRLF before line 2 does not skew the position
    assert_eq!(diagnostic.location.line, 2);
    assert_eq!(diagnostic.location.column, 1);
    assert_eq!(diagnostic.location.offset, 7);
}

#[test]
fn old_tree_remains_valid_while_new_tree_exists() {
    let source = "println(a);";
    let root = parse(source).syntax();
    let ctx = RuleContext::for_tree("app.cs", &root);

    let report = Walker::new(&registry(), &ctx).run(&root);
    let fixed = NoPrintlnFix.fix(&root, &report.diagnostics[0]).unwrap();

    // Readers holding the old tree still see the original text
    assert_eq!(root.text().to_string(), "println(a);");
    assert_eq!(fixed.text().to_string(), "WriteLine(a);");
}
