//! Formatter collaborator for synthesized replacements
//!
//! Fixers are responsible for structural correctness only; layout of a
//! freshly synthesized node is delegated here. Hosts with a real formatter
//! implement [`Formatter`] against their own conventions.

use rowan::{GreenNode, Language, NodeOrToken};

use crate::syntax::factory::{self, GreenElement};
use crate::syntax::{CsLanguage, CsSyntaxKind};

/// Normalizes the layout of replacement nodes before they enter a tree
pub trait Formatter: Send + Sync {
    /// Return the replacement with normalized whitespace
    fn format_replacement(&self, replacement: GreenNode) -> GreenNode;
}

/// Leaves replacements exactly as synthesized
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughFormatter;

impl Formatter for PassthroughFormatter {
    fn format_replacement(&self, replacement: GreenNode) -> GreenNode {
        replacement
    }
}

/// Single-line layout: one space between the elements of a synthesized
/// block, so a wrapped statement reads `{ statement }`
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFormatter;

impl Formatter for DefaultFormatter {
    fn format_replacement(&self, replacement: GreenNode) -> GreenNode {
        if CsLanguage::kind_from_raw(replacement.kind()) != CsSyntaxKind::Block {
            return replacement;
        }

        let elements: Vec<GreenElement> = replacement
            .children()
            .map(|child| match child {
                NodeOrToken::Node(node) => NodeOrToken::Node(node.to_owned()),
                NodeOrToken::Token(token) => NodeOrToken::Token(token.to_owned()),
            })
            .collect();

        let is_trivia = |e: &GreenElement| match e {
            NodeOrToken::Token(t) => CsLanguage::kind_from_raw(t.kind()).is_trivia(),
            NodeOrToken::Node(_) => false,
        };

        let mut spaced: Vec<GreenElement> = Vec::with_capacity(elements.len() * 2);
        for (i, element) in elements.into_iter().enumerate() {
            if i > 0 && !is_trivia(&element) && spaced.last().is_some_and(|prev| !is_trivia(prev))
            {
                spaced.push(NodeOrToken::Token(factory::whitespace(" ")));
            }
            spaced.push(element);
        }

        factory::node(CsSyntaxKind::Block, spaced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{CsSyntaxNode, factory, parse};

    #[test]
    fn default_formatter_spaces_block_elements() {
        let root = parse("if (x) go();").syntax();
        let stmt = root
            .descendants()
            .find(|n| n.kind() == CsSyntaxKind::ExpressionStatement)
            .unwrap();
        let block = DefaultFormatter.format_replacement(factory::block_wrapping(&stmt));
        assert_eq!(
            CsSyntaxNode::new_root(block).text().to_string(),
            "{ go(); }"
        );
    }

    #[test]
    fn default_formatter_ignores_non_blocks() {
        let formatted = DefaultFormatter.format_replacement(factory::named_type("Int32"));
        assert_eq!(CsSyntaxNode::new_root(formatted).text().to_string(), "Int32");
    }

    #[test]
    fn passthrough_formatter_changes_nothing() {
        let root = parse("if (x) go();").syntax();
        let stmt = root
            .descendants()
            .find(|n| n.kind() == CsSyntaxKind::ExpressionStatement)
            .unwrap();
        let formatted = PassthroughFormatter.format_replacement(factory::block_wrapping(&stmt));
        assert_eq!(
            CsSyntaxNode::new_root(formatted).text().to_string(),
            "{go();}"
        );
    }
}
