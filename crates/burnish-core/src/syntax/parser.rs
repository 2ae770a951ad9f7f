//! Reference recursive-descent parser producing a lossless CST
//!
//! Covers the statement/expression/type subset the built-in rules need:
//! blocks, if/else, expression statements, local declarations, invocations,
//! member access, binary operators, and predefined/named type references.
//! Hosts with a full grammar feed their own trees to the engine; this parser
//! exists so the engine and its rules are testable end to end.
//!
//! Trivia discipline: whitespace and comments between sibling constructs are
//! attached to the enclosing node, never to the start of a child node. A
//! statement node's span therefore covers exactly its own tokens, which is
//! what diagnostic spans and node replacement rely on.

use std::ops::Range;

use rowan::{GreenNode, GreenNodeBuilder, Language};

use super::lexer::{self, LexedToken};
use super::{CsLanguage, CsSyntaxKind, CsSyntaxNode};

/// A parse error with its byte span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: Range<usize>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// Result of parsing: the green tree plus accumulated errors
#[derive(Debug, Clone)]
pub struct Parse {
    green: GreenNode,
    pub errors: Vec<ParseError>,
}

impl Parse {
    /// Construct the red tree root
    pub fn syntax(&self) -> CsSyntaxNode {
        CsSyntaxNode::new_root(self.green.clone())
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse source text into a lossless CST
pub fn parse(source: &str) -> Parse {
    let (tokens, lex_errors) = lexer::lex(source);
    let mut errors: Vec<ParseError> = lex_errors
        .into_iter()
        .map(|e| ParseError::new(e.message, e.span))
        .collect();

    let mut parser = Parser {
        tokens,
        pos: 0,
        builder: GreenNodeBuilder::new(),
        errors: Vec::new(),
        source_len: source.len(),
    };

    let green = parser.parse_source_file();
    errors.append(&mut parser.errors);

    Parse { green, errors }
}

struct Parser {
    tokens: Vec<LexedToken>,
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<ParseError>,
    source_len: usize,
}

fn raw(kind: CsSyntaxKind) -> rowan::SyntaxKind {
    CsLanguage::kind_to_raw(kind)
}

impl Parser {
    fn parse_source_file(&mut self) -> GreenNode {
        self.builder.start_node(raw(CsSyntaxKind::SourceFile));
        while self.peek().is_some() {
            self.parse_statement();
        }
        self.eat_trivia();
        self.builder.finish_node();
        std::mem::replace(&mut self.builder, GreenNodeBuilder::new()).finish()
    }

    // ---- statements ----

    fn parse_statement(&mut self) {
        match self.peek() {
            Some(CsSyntaxKind::LBrace) => self.parse_block(),
            Some(CsSyntaxKind::IfKw) => self.parse_if_statement(),
            Some(CsSyntaxKind::PredefinedTypeKw)
                if self.peek_nth(1) == Some(CsSyntaxKind::Ident) =>
            {
                self.parse_local_declaration()
            }
            Some(CsSyntaxKind::Ident) if self.peek_nth(1) == Some(CsSyntaxKind::Ident) => {
                self.parse_local_declaration()
            }
            Some(_) => self.parse_expression_statement(),
            None => {}
        }
    }

    fn parse_block(&mut self) {
        self.start_node(CsSyntaxKind::Block);
        self.expect(CsSyntaxKind::LBrace, "'{'");
        loop {
            match self.peek() {
                Some(CsSyntaxKind::RBrace) | None => break,
                _ => self.parse_statement(),
            }
        }
        self.expect(CsSyntaxKind::RBrace, "'}'");
        self.builder.finish_node();
    }

    fn parse_if_statement(&mut self) {
        self.start_node(CsSyntaxKind::IfStatement);
        self.bump(); // "if"
        self.expect(CsSyntaxKind::LParen, "'('");
        self.parse_expression();
        self.expect(CsSyntaxKind::RParen, "')'");
        self.parse_statement();
        if self.peek() == Some(CsSyntaxKind::ElseKw) {
            self.start_node(CsSyntaxKind::ElseClause);
            self.bump(); // "else"
            self.parse_statement();
            self.builder.finish_node();
        }
        self.builder.finish_node();
    }

    fn parse_local_declaration(&mut self) {
        self.start_node(CsSyntaxKind::LocalDeclaration);
        self.parse_type();
        self.expect(CsSyntaxKind::Ident, "identifier");
        if self.peek() == Some(CsSyntaxKind::Assign) {
            self.bump();
            self.parse_expression();
        }
        self.expect(CsSyntaxKind::Semicolon, "';'");
        self.builder.finish_node();
    }

    fn parse_expression_statement(&mut self) {
        self.start_node(CsSyntaxKind::ExpressionStatement);
        self.parse_expression();
        self.expect(CsSyntaxKind::Semicolon, "';'");
        self.builder.finish_node();
    }

    fn parse_type(&mut self) {
        match self.peek() {
            Some(CsSyntaxKind::PredefinedTypeKw) => {
                self.start_node(CsSyntaxKind::PredefinedType);
                self.bump();
                self.builder.finish_node();
            }
            Some(CsSyntaxKind::Ident) => {
                self.start_node(CsSyntaxKind::NamedType);
                self.bump();
                self.builder.finish_node();
            }
            _ => self.error_here("expected a type"),
        }
    }

    // ---- expressions ----

    fn parse_expression(&mut self) {
        self.parse_binary(0);
    }

    fn parse_binary(&mut self, min_precedence: u8) {
        self.eat_trivia();
        let checkpoint = self.builder.checkpoint();
        self.parse_postfix();

        loop {
            let Some(kind) = self.peek() else { break };
            let Some(precedence) = kind.binary_precedence() else {
                break;
            };
            if precedence < min_precedence {
                break;
            }
            self.builder
                .start_node_at(checkpoint, raw(CsSyntaxKind::BinaryExpression));
            self.bump(); // operator
            self.parse_binary(precedence + 1);
            self.builder.finish_node();
        }
    }

    fn parse_postfix(&mut self) {
        self.eat_trivia();
        let checkpoint = self.builder.checkpoint();
        self.parse_primary();

        loop {
            match self.peek() {
                Some(CsSyntaxKind::Dot) => {
                    self.builder
                        .start_node_at(checkpoint, raw(CsSyntaxKind::MemberAccessExpression));
                    self.bump(); // "."
                    self.expect(CsSyntaxKind::Ident, "member name");
                    self.builder.finish_node();
                }
                Some(CsSyntaxKind::LParen) => {
                    self.builder
                        .start_node_at(checkpoint, raw(CsSyntaxKind::InvocationExpression));
                    self.parse_argument_list();
                    self.builder.finish_node();
                }
                _ => break,
            }
        }
    }

    fn parse_argument_list(&mut self) {
        self.start_node(CsSyntaxKind::ArgumentList);
        self.expect(CsSyntaxKind::LParen, "'('");
        if !matches!(self.peek(), Some(CsSyntaxKind::RParen) | None) {
            loop {
                self.start_node(CsSyntaxKind::Argument);
                self.parse_expression();
                self.builder.finish_node();
                if self.peek() == Some(CsSyntaxKind::Comma) {
                    self.bump();
                } else {
                    break;
                }
            }
        }
        self.expect(CsSyntaxKind::RParen, "')'");
        self.builder.finish_node();
    }

    fn parse_primary(&mut self) {
        match self.peek() {
            Some(CsSyntaxKind::Ident) => {
                self.start_node(CsSyntaxKind::NameExpression);
                self.bump();
                self.builder.finish_node();
            }
            Some(CsSyntaxKind::NumberLiteral) | Some(CsSyntaxKind::StringLiteral) => {
                self.start_node(CsSyntaxKind::LiteralExpression);
                self.bump();
                self.builder.finish_node();
            }
            // Predefined type in expression position (`string.Join(...)`)
            Some(CsSyntaxKind::PredefinedTypeKw) => {
                self.start_node(CsSyntaxKind::PredefinedType);
                self.bump();
                self.builder.finish_node();
            }
            Some(CsSyntaxKind::LParen) => {
                self.start_node(CsSyntaxKind::ParenthesizedExpression);
                self.bump();
                self.parse_expression();
                self.expect(CsSyntaxKind::RParen, "')'");
                self.builder.finish_node();
            }
            Some(_) => {
                self.error_here("expected an expression");
                self.start_node(CsSyntaxKind::ErrorNode);
                self.bump();
                self.builder.finish_node();
            }
            None => self.error_here("expected an expression"),
        }
    }

    // ---- token plumbing ----

    /// Emit pending trivia tokens into the currently open node
    fn eat_trivia(&mut self) {
        while let Some(tok) = self.tokens.get(self.pos) {
            if !tok.kind.is_trivia() {
                break;
            }
            self.builder.token(raw(tok.kind), &tok.text);
            self.pos += 1;
        }
    }

    /// Flush trivia into the parent, then open a node
    fn start_node(&mut self, kind: CsSyntaxKind) {
        self.eat_trivia();
        self.builder.start_node(raw(kind));
    }

    /// Emit the next non-trivia token (and any trivia before it)
    fn bump(&mut self) {
        self.eat_trivia();
        if let Some(tok) = self.tokens.get(self.pos) {
            self.builder.token(raw(tok.kind), &tok.text);
            self.pos += 1;
        }
    }

    fn expect(&mut self, kind: CsSyntaxKind, what: &str) -> bool {
        if self.peek() == Some(kind) {
            self.bump();
            true
        } else {
            self.error_here(&format!("expected {what}"));
            false
        }
    }

    fn peek(&self) -> Option<CsSyntaxKind> {
        self.tokens[self.pos..]
            .iter()
            .find(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
    }

    fn peek_nth(&self, n: usize) -> Option<CsSyntaxKind> {
        self.tokens[self.pos..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
            .map(|t| t.kind)
    }

    fn error_here(&mut self, message: &str) {
        let span = self.tokens[self.pos..]
            .iter()
            .find(|t| !t.kind.is_trivia())
            .map(|t| t.span.clone())
            .unwrap_or(self.source_len..self.source_len);
        self.errors.push(ParseError::new(message, span));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> CsSyntaxNode {
        let parse = parse(source);
        assert!(
            !parse.has_errors(),
            "unexpected errors in {source:?}: {:?}",
            parse.errors
        );
        parse.syntax()
    }

    #[test]
    fn round_trips_losslessly() {
        let sources = [
            "if (x > 0) print(x);",
            "if (c) { a(); } else b();",
            "int x = 5; // trailing comment\n",
            "/* header */\nstring s = \"hi\";\r\n",
            "if (a) { } else if (b) { c(); }",
            "Debug.Assert(x > 0 && y < 2);",
        ];
        for source in sources {
            assert_eq!(parse_ok(source).text().to_string(), source);
        }
    }

    #[test]
    fn if_statement_structure() {
        let root = parse_ok("if (x > 0) print(x);");
        let if_stmt = root.first_child().unwrap();
        assert_eq!(if_stmt.kind(), CsSyntaxKind::IfStatement);

        let kinds: Vec<_> = if_stmt.children().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                CsSyntaxKind::BinaryExpression,
                CsSyntaxKind::ExpressionStatement,
            ]
        );
    }

    #[test]
    fn statement_spans_exclude_surrounding_trivia() {
        let source = "if (x > 0) print(x);";
        let root = parse_ok(source);
        let body = root
            .descendants()
            .find(|n| n.kind() == CsSyntaxKind::ExpressionStatement)
            .unwrap();
        assert_eq!(body.text().to_string(), "print(x);");
        assert_eq!(usize::from(body.text_range().start()), 11);
    }

    #[test]
    fn else_clause_owns_its_body() {
        let root = parse_ok("if (c) { a(); } else b();");
        let else_clause = root
            .descendants()
            .find(|n| n.kind() == CsSyntaxKind::ElseClause)
            .unwrap();
        let body = else_clause
            .children()
            .find(|n| n.kind().is_statement())
            .unwrap();
        assert_eq!(body.text().to_string(), "b();");
    }

    #[test]
    fn else_if_nests_inside_else_clause() {
        let root = parse_ok("if (a) { } else if (b) { c(); }");
        let else_clause = root
            .descendants()
            .find(|n| n.kind() == CsSyntaxKind::ElseClause)
            .unwrap();
        let body = else_clause
            .children()
            .find(|n| n.kind().is_statement())
            .unwrap();
        assert_eq!(body.kind(), CsSyntaxKind::IfStatement);
    }

    #[test]
    fn invocation_arguments() {
        let root = parse_ok("Assert(x > 0);");
        let args: Vec<_> = root
            .descendants()
            .filter(|n| n.kind() == CsSyntaxKind::Argument)
            .collect();
        assert_eq!(args.len(), 1);
        assert_eq!(args[0].text().to_string(), "x > 0");
    }

    #[test]
    fn declaration_with_predefined_type() {
        let root = parse_ok("int x = 5;");
        let ty = root
            .descendants()
            .find(|n| n.kind() == CsSyntaxKind::PredefinedType)
            .unwrap();
        assert_eq!(ty.text().to_string(), "int");
    }

    #[test]
    fn recovers_from_garbage_without_losing_text() {
        let source = "if (x ?? 0) print(x);";
        let parse = parse(source);
        assert!(parse.has_errors());
        assert_eq!(parse.syntax().text().to_string(), source);
    }
}
