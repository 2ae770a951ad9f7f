//! Typed AST layer over the CST
//!
//! Ergonomic, type-safe wrappers over raw CST nodes. Each wrapper implements
//! `cast()` to safely convert from CST nodes.

use super::{CsSyntaxKind, CsSyntaxNode, CsSyntaxToken};

/// Helper trait for casting CST nodes to typed wrappers
pub trait AstNode: Sized {
    fn can_cast(kind: CsSyntaxKind) -> bool;
    fn cast(node: CsSyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &CsSyntaxNode;
}

macro_rules! ast_node {
    ($(#[$doc:meta])* $name:ident, $kind:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            syntax: CsSyntaxNode,
        }

        impl AstNode for $name {
            fn can_cast(kind: CsSyntaxKind) -> bool {
                kind == CsSyntaxKind::$kind
            }

            fn cast(node: CsSyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self { syntax: node })
                } else {
                    None
                }
            }

            fn syntax(&self) -> &CsSyntaxNode {
                &self.syntax
            }
        }
    };
}

fn token_of_kind(parent: &CsSyntaxNode, kind: CsSyntaxKind) -> Option<CsSyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == kind)
}

fn statement_child(parent: &CsSyntaxNode) -> Option<CsSyntaxNode> {
    parent.children().find(|n| n.kind().is_statement())
}

ast_node!(
    /// Root node: a sequence of statements
    SourceFile,
    SourceFile
);

ast_node!(
    /// `{ ... }`
    Block,
    Block
);

ast_node!(
    /// `if (condition) body` with an optional else clause
    IfStatement,
    IfStatement
);

ast_node!(
    /// `else body`, owned by its if statement
    ElseClause,
    ElseClause
);

ast_node!(ExpressionStatement, ExpressionStatement);

ast_node!(
    /// `type name (= initializer)? ;`
    LocalDeclaration,
    LocalDeclaration
);

ast_node!(
    /// A predefined-type alias reference (`int`, `string`, ...)
    PredefinedType,
    PredefinedType
);

ast_node!(NamedType, NamedType);

ast_node!(
    /// `callee(arguments)`
    InvocationExpression,
    InvocationExpression
);

ast_node!(ArgumentList, ArgumentList);

ast_node!(Argument, Argument);

ast_node!(MemberAccessExpression, MemberAccessExpression);

ast_node!(NameExpression, NameExpression);

impl SourceFile {
    pub fn statements(&self) -> impl Iterator<Item = CsSyntaxNode> + '_ {
        self.syntax.children().filter(|n| n.kind().is_statement())
    }
}

impl Block {
    pub fn statements(&self) -> impl Iterator<Item = CsSyntaxNode> + '_ {
        self.syntax.children().filter(|n| n.kind().is_statement())
    }
}

impl IfStatement {
    /// The condition expression between the parentheses
    pub fn condition(&self) -> Option<CsSyntaxNode> {
        self.syntax.children().find(|n| n.kind().is_expression())
    }

    /// The branch body statement (a block or a single statement)
    pub fn body(&self) -> Option<CsSyntaxNode> {
        statement_child(&self.syntax)
    }

    pub fn else_clause(&self) -> Option<ElseClause> {
        self.syntax.children().find_map(ElseClause::cast)
    }
}

impl ElseClause {
    /// The branch body statement (a block, a nested if, or a single statement)
    pub fn body(&self) -> Option<CsSyntaxNode> {
        statement_child(&self.syntax)
    }
}

impl LocalDeclaration {
    pub fn ty(&self) -> Option<CsSyntaxNode> {
        self.syntax.children().find(|n| {
            matches!(
                n.kind(),
                CsSyntaxKind::PredefinedType | CsSyntaxKind::NamedType
            )
        })
    }

    pub fn name(&self) -> Option<String> {
        token_of_kind(&self.syntax, CsSyntaxKind::Ident).map(|t| t.text().to_string())
    }
}

impl PredefinedType {
    /// The alias keyword token
    pub fn token(&self) -> Option<CsSyntaxToken> {
        token_of_kind(&self.syntax, CsSyntaxKind::PredefinedTypeKw)
    }

    /// The alias spelling (`int`, `bool`, ...)
    pub fn text(&self) -> Option<String> {
        self.token().map(|t| t.text().to_string())
    }
}

impl InvocationExpression {
    /// The callee expression (name or member access)
    pub fn callee(&self) -> Option<CsSyntaxNode> {
        self.syntax.children().find(|n| n.kind().is_expression())
    }

    /// The simple name the call resolves through: for `Debug.Assert(..)`
    /// this is `Assert`, for `Assert(..)` it is `Assert`
    pub fn callee_name(&self) -> Option<String> {
        let callee = self.callee()?;
        match callee.kind() {
            CsSyntaxKind::NameExpression => Some(callee.text().to_string()),
            CsSyntaxKind::MemberAccessExpression => callee
                .children_with_tokens()
                .filter_map(|e| e.into_token())
                .filter(|t| t.kind() == CsSyntaxKind::Ident)
                .last()
                .map(|t| t.text().to_string()),
            _ => None,
        }
    }

    pub fn argument_list(&self) -> Option<ArgumentList> {
        self.syntax.children().find_map(ArgumentList::cast)
    }
}

impl ArgumentList {
    pub fn arguments(&self) -> impl Iterator<Item = Argument> + '_ {
        self.syntax.children().filter_map(Argument::cast)
    }
}

impl Argument {
    /// The argument's expression node
    pub fn expression(&self) -> Option<CsSyntaxNode> {
        self.syntax.children().find(|n| n.kind().is_expression())
    }

    /// Exact source text of the argument
    pub fn text(&self) -> String {
        self.syntax.text().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parser::parse;

    fn first<N: AstNode>(source: &str) -> N {
        let root = parse(source).syntax();
        root.descendants().find_map(N::cast).expect("node not found")
    }

    #[test]
    fn if_statement_accessors() {
        let if_stmt: IfStatement = first("if (x > 0) print(x); else stop();");
        assert_eq!(if_stmt.condition().unwrap().text().to_string(), "x > 0");
        assert_eq!(if_stmt.body().unwrap().text().to_string(), "print(x);");
        let else_clause = if_stmt.else_clause().unwrap();
        assert_eq!(else_clause.body().unwrap().text().to_string(), "stop();");
    }

    #[test]
    fn callee_name_through_member_access() {
        let call: InvocationExpression = first("Debug.Assert(x > 0);");
        assert_eq!(call.callee_name().as_deref(), Some("Assert"));
        assert_eq!(call.argument_list().unwrap().arguments().count(), 1);
    }

    #[test]
    fn callee_name_plain() {
        let call: InvocationExpression = first("Assert(ready);");
        assert_eq!(call.callee_name().as_deref(), Some("Assert"));
    }

    #[test]
    fn declaration_accessors() {
        let decl: LocalDeclaration = first("int count = 3;");
        assert_eq!(decl.ty().unwrap().kind(), CsSyntaxKind::PredefinedType);
        assert_eq!(decl.name().as_deref(), Some("count"));
    }
}
