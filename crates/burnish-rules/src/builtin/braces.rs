//! Brace enforcement for if/else branch bodies
//!
//! Fires when a branch body is a single statement not wrapped in a block.
//! An else clause whose body is another if statement is never flagged; the
//! nested if is checked independently on its own visit.

use std::sync::Arc;

use burnish_core::syntax::ast::{AstNode, ElseClause, IfStatement};
use burnish_core::syntax::factory;
use burnish_core::{
    BurnishError, CsSyntaxKind, CsSyntaxNode, DefaultFormatter, Diagnostic, Edit, Fixer,
    Formatter, Result, Rule, RuleCategory, RuleContext, RuleDescriptor, Severity,
    node_at_location,
};

/// Rule ID for brace enforcement
pub const IF_ELSE_BRACES: &str = "style/if-else-braces";

static DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    id: IF_ELSE_BRACES,
    name: "IfElseBraces",
    title: "If and else branches must wrap their bodies in braces",
    message_template: "'{0}' branch body must be wrapped in braces",
    category: RuleCategory::Style,
    severity: Severity::Warning,
    kinds: &[CsSyntaxKind::IfStatement, CsSyntaxKind::ElseClause],
};

/// Flags if/else branch bodies that are not blocks
pub struct BraceEnforcementRule;

impl Rule for BraceEnforcementRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &DESCRIPTOR
    }

    fn check(&self, node: &CsSyntaxNode, ctx: &RuleContext) -> Result<Option<Diagnostic>> {
        let (keyword, body) = match node.kind() {
            CsSyntaxKind::IfStatement => {
                let Some(stmt) = IfStatement::cast(node.clone()) else {
                    return Ok(None);
                };
                ("if", stmt.body())
            }
            CsSyntaxKind::ElseClause => {
                let Some(clause) = ElseClause::cast(node.clone()) else {
                    return Ok(None);
                };
                let body = clause.body();
                // `else if` chains: the nested if owns the check
                if body
                    .as_ref()
                    .is_some_and(|b| b.kind() == CsSyntaxKind::IfStatement)
                {
                    return Ok(None);
                }
                ("else", body)
            }
            _ => return Ok(None),
        };

        let Some(body) = body else {
            return Ok(None);
        };
        if body.kind() == CsSyntaxKind::Block {
            return Ok(None);
        }

        // The span is the branch body itself: the node the fix wraps
        Ok(Some(Diagnostic::new(
            DESCRIPTOR.id,
            DESCRIPTOR.severity,
            DESCRIPTOR.format_message(&[keyword]),
            ctx.location_of(&body),
        )))
    }
}

/// Wraps the offending branch body in a new block
///
/// The block contains the original statement verbatim as its only member;
/// layout of the new braces is delegated to the formatter collaborator.
pub struct BraceFix {
    formatter: Arc<dyn Formatter>,
}

impl BraceFix {
    pub fn new() -> Self {
        Self {
            formatter: Arc::new(DefaultFormatter),
        }
    }

    /// Use the host's formatter for brace placement
    pub fn with_formatter(formatter: Arc<dyn Formatter>) -> Self {
        Self { formatter }
    }
}

impl Default for BraceFix {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixer for BraceFix {
    fn rule_id(&self) -> &'static str {
        IF_ELSE_BRACES
    }

    fn build_edit(&self, root: &CsSyntaxNode, diagnostic: &Diagnostic) -> Result<Edit> {
        let target = node_at_location(root, &diagnostic.location, |n| {
            n.kind().is_statement()
                && n.parent().is_some_and(|p| {
                    matches!(
                        p.kind(),
                        CsSyntaxKind::IfStatement | CsSyntaxKind::ElseClause
                    )
                })
        })
        .ok_or_else(|| {
            BurnishError::fix_error(IF_ELSE_BRACES, "branch body is no longer present")
        })?;

        if target.kind() == CsSyntaxKind::Block {
            return Err(BurnishError::fix_error(
                IF_ELSE_BRACES,
                "branch body is already a block",
            ));
        }

        let replacement = self
            .formatter
            .format_replacement(factory::block_wrapping(&target));
        Ok(Edit {
            target,
            replacement,
            diagnostic: diagnostic.clone(),
        })
    }
}
