//! Predefined-type alias replacement
//!
//! Every predefined-type alias reference is flagged with its canonical
//! explicit type name, except `void`, which denotes absence of a value and
//! is not an aliasable type. The alias map is a fixed immutable table,
//! validated for completeness against the grammar's alias set at startup.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use burnish_core::syntax::PREDEFINED_TYPE_ALIASES;
use burnish_core::syntax::ast::{AstNode, PredefinedType};
use burnish_core::syntax::factory;
use burnish_core::{
    BurnishError, CsSyntaxKind, CsSyntaxNode, Diagnostic, Edit, Fixer, Result, Rule, RuleCategory,
    RuleContext, RuleDescriptor, Severity, node_at_location,
};

/// Rule ID for predefined-type replacement
pub const EXPLICIT_TYPE_NAMES: &str = "style/explicit-type-names";

/// The `void` alias denotes the absence of a value, not an aliasable type
const VOID_ALIAS: &str = "void";

/// Alias spelling -> canonical explicit type name
static TYPE_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("bool", "Boolean"),
        ("byte", "Byte"),
        ("char", "Char"),
        ("decimal", "Decimal"),
        ("double", "Double"),
        ("float", "Single"),
        ("int", "Int32"),
        ("long", "Int64"),
        ("object", "Object"),
        ("sbyte", "SByte"),
        ("short", "Int16"),
        ("string", "String"),
        ("ulong", "UInt64"),
        ("ushort", "UInt16"),
    ])
});

static DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    id: EXPLICIT_TYPE_NAMES,
    name: "ExplicitTypeNames",
    title: "Use explicit types instead of predefined aliases for better portability",
    message_template: "Convert '{0}' to the explicit type '{1}'",
    category: RuleCategory::Style,
    severity: Severity::Warning,
    kinds: &[CsSyntaxKind::PredefinedType],
};

/// Check the alias map against the grammar's alias set
///
/// Called once at registry construction; a mismatch means the grammar and
/// the map drifted apart and linting predefined types would be unreliable.
pub fn validate_type_map() -> Result<()> {
    for alias in PREDEFINED_TYPE_ALIASES {
        if *alias == VOID_ALIAS {
            continue;
        }
        if !TYPE_MAP.contains_key(alias) {
            return Err(BurnishError::registry_error(format!(
                "predefined-type map is missing alias '{alias}'"
            )));
        }
    }
    for alias in TYPE_MAP.keys() {
        if !PREDEFINED_TYPE_ALIASES.contains(alias) {
            return Err(BurnishError::registry_error(format!(
                "predefined-type map contains unknown alias '{alias}'"
            )));
        }
    }
    Ok(())
}

/// Flags predefined-type alias references
pub struct PredefinedTypeRule;

impl Rule for PredefinedTypeRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &DESCRIPTOR
    }

    fn check(&self, node: &CsSyntaxNode, ctx: &RuleContext) -> Result<Option<Diagnostic>> {
        let Some(ty) = PredefinedType::cast(node.clone()) else {
            return Ok(None);
        };
        let Some(alias) = ty.text() else {
            return Ok(None);
        };

        // Don't touch the void
        if alias == VOID_ALIAS {
            return Ok(None);
        }

        let canonical = *TYPE_MAP.get(alias.as_str()).ok_or_else(|| {
            BurnishError::internal_error(format!(
                "predefined type '{alias}' is missing from the canonical map"
            ))
        })?;

        Ok(Some(Diagnostic::new(
            DESCRIPTOR.id,
            DESCRIPTOR.severity,
            DESCRIPTOR.format_message(&[alias.as_str(), canonical]),
            ctx.location_of(node),
        )))
    }
}

/// Replaces an alias reference with its canonical type name
///
/// A token-level rename: the node keeps its position in its parent and
/// carries no trivia of its own, so no layout work is needed.
pub struct PredefinedTypeFix;

impl Fixer for PredefinedTypeFix {
    fn rule_id(&self) -> &'static str {
        EXPLICIT_TYPE_NAMES
    }

    fn build_edit(&self, root: &CsSyntaxNode, diagnostic: &Diagnostic) -> Result<Edit> {
        let target = node_at_location(root, &diagnostic.location, |n| {
            n.kind() == CsSyntaxKind::PredefinedType
        })
        .ok_or_else(|| {
            BurnishError::fix_error(EXPLICIT_TYPE_NAMES, "type reference is no longer present")
        })?;

        let alias = PredefinedType::cast(target.clone())
            .and_then(|t| t.text())
            .ok_or_else(|| {
                BurnishError::fix_error(EXPLICIT_TYPE_NAMES, "type reference has no alias token")
            })?;

        let canonical = *TYPE_MAP.get(alias.as_str()).ok_or_else(|| {
            BurnishError::internal_error(format!(
                "predefined type '{alias}' is missing from the canonical map"
            ))
        })?;

        Ok(Edit {
            target,
            replacement: factory::named_type(canonical),
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
        registry.register(Arc::new(PredefinedTypeRule)).unwrap();
        Walker::new(&registry, &ctx).run(&root)
    }

    #[test]
    fn type_map_matches_the_grammar() {
        validate_type_map().unwrap();
        assert_eq!(TYPE_MAP.len(), 14);
    }

    #[test]
    fn every_alias_proposes_its_canonical_name() {
        for (alias, canonical) in TYPE_MAP.iter() {
            let source = format!("{alias} x = y;");
            let report = walk(&source);
            assert_eq!(report.diagnostics.len(), 1, "{alias}");
            assert_eq!(
                report.diagnostics[0].message,
                format!("Convert '{alias}' to the explicit type '{canonical}'")
            );
        }
    }

    #[test]
    fn void_is_exempt() {
        assert!(walk("void x = y;").is_clean());
    }

    #[test]
    fn fires_in_expression_position() {
        let report = walk("string.Join(sep, parts);");
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].location.offset, 0);
        assert_eq!(report.diagnostics[0].location.length, "string".len());
    }

    #[test]
    fn named_types_never_fire() {
        assert!(walk("Int32 x = 1; DateTime d = now();").is_clean());
    }
}
