//! Lossless syntax tree for C#-style source
//!
//! Implements the engine's syntax model on Rowan's green/red tree pattern:
//!
//! - **Green tree**: immutable, position-independent storage with structural
//!   sharing. Every edit produces a new root; unedited subtrees are shared,
//!   never copied, and nothing is mutated in place.
//! - **Red tree**: on-demand view with parent pointers and offsets, used for
//!   traversal and node lookup.
//!
//! Trivia (whitespace, comments, line breaks) is kept in the tree, so
//! `parse(source).text() == source` holds and source-to-source rewrites
//! preserve untouched formatting byte for byte.
//!
//! The engine itself is generic over node kinds: rules subscribe to
//! [`CsSyntaxKind`] values and the walker dispatches on them. The reference
//! lexer/parser in this module cover the statement-level subset the built-in
//! rules need; a host with a full grammar supplies its own trees.

mod kind;
mod language;

pub mod ast;
pub mod factory;
pub mod lexer;
pub mod parser;

pub use kind::CsSyntaxKind;
pub use language::{CsLanguage, CsSyntaxElement, CsSyntaxNode, CsSyntaxToken};
pub use lexer::PREDEFINED_TYPE_ALIASES;
pub use parser::{Parse, ParseError, parse};
