//! Green-node construction for replacement subtrees
//!
//! Fixers synthesize replacements here and reuse original green subtrees
//! verbatim, so untouched text stays byte-identical through a rewrite.

use rowan::{GreenNode, GreenToken, Language, NodeOrToken};

use super::{CsLanguage, CsSyntaxKind, CsSyntaxNode};

/// A green child element
pub type GreenElement = NodeOrToken<GreenNode, GreenToken>;

fn raw(kind: CsSyntaxKind) -> rowan::SyntaxKind {
    CsLanguage::kind_to_raw(kind)
}

/// Build a green token
pub fn token(kind: CsSyntaxKind, text: &str) -> GreenToken {
    GreenToken::new(raw(kind), text)
}

/// Build a whitespace trivia token
pub fn whitespace(text: &str) -> GreenToken {
    token(CsSyntaxKind::Whitespace, text)
}

/// Build a green node from child elements
pub fn node(kind: CsSyntaxKind, children: Vec<GreenElement>) -> GreenNode {
    GreenNode::new(raw(kind), children)
}

/// The green subtree of an existing node, shared, byte-identical
pub fn green_of(node: &CsSyntaxNode) -> GreenNode {
    node.green().into_owned()
}

/// Wrap a statement in a new block: `{` statement `}`
///
/// Layout is intentionally bare; the formatter collaborator normalizes
/// spacing afterwards.
pub fn block_wrapping(statement: &CsSyntaxNode) -> GreenNode {
    node(
        CsSyntaxKind::Block,
        vec![
            NodeOrToken::Token(token(CsSyntaxKind::LBrace, "{")),
            NodeOrToken::Node(green_of(statement)),
            NodeOrToken::Token(token(CsSyntaxKind::RBrace, "}")),
        ],
    )
}

/// A named-type node carrying a canonical type identifier
pub fn named_type(name: &str) -> GreenNode {
    node(
        CsSyntaxKind::NamedType,
        vec![NodeOrToken::Token(token(CsSyntaxKind::Ident, name))],
    )
}

/// A string-literal token quoting `text`, escaping as needed
pub fn string_literal(text: &str) -> GreenToken {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    token(CsSyntaxKind::StringLiteral, &quoted)
}

/// An argument node holding a string-literal message
pub fn message_argument(message: &str) -> GreenNode {
    node(
        CsSyntaxKind::Argument,
        vec![NodeOrToken::Node(node(
            CsSyntaxKind::LiteralExpression,
            vec![NodeOrToken::Token(string_literal(message))],
        ))],
    )
}

/// Rebuild an argument list as `(` condition `, "message")`
///
/// The condition argument's green subtree is reused verbatim.
pub fn argument_list_with_message(condition: &CsSyntaxNode, message: &str) -> GreenNode {
    node(
        CsSyntaxKind::ArgumentList,
        vec![
            NodeOrToken::Token(token(CsSyntaxKind::LParen, "(")),
            NodeOrToken::Node(green_of(condition)),
            NodeOrToken::Token(token(CsSyntaxKind::Comma, ",")),
            NodeOrToken::Token(whitespace(" ")),
            NodeOrToken::Node(message_argument(message)),
            NodeOrToken::Token(token(CsSyntaxKind::RParen, ")")),
        ],
    )
}
