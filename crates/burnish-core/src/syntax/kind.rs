//! Syntax kind enumeration for the C#-style CST
//!
//! Defines every node and token type the reference grammar produces, in
//! numbered bands: trivia, keywords, punctuation, literals, then structure
//! nodes.

/// Syntax kind for C#-style language elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum CsSyntaxKind {
    // ==================
    // Trivia (0-9)
    // ==================
    /// Whitespace (spaces, tabs)
    Whitespace = 0,
    /// Line comment starting with //
    CommentLine = 1,
    /// Block comment /* ... */
    CommentBlock = 2,
    /// Line break (\n, \r\n, or \r)
    Newline = 3,

    // ==================
    // Keywords (10-39)
    // ==================
    /// "if" keyword
    IfKw = 10,
    /// "else" keyword
    ElseKw = 11,
    /// A predefined-type alias keyword (int, bool, string, void, ...)
    PredefinedTypeKw = 12,

    // ==================
    // Punctuation & operators (40-99)
    // ==================
    LParen = 40,
    RParen = 41,
    LBrace = 42,
    RBrace = 43,
    Semicolon = 44,
    Comma = 45,
    Dot = 46,
    /// "="
    Assign = 47,
    /// "=="
    EqEq = 48,
    /// "!="
    Neq = 49,
    /// "<"
    Lt = 50,
    /// ">"
    Gt = 51,
    /// "<="
    Le = 52,
    /// ">="
    Ge = 53,
    Plus = 54,
    Minus = 55,
    Star = 56,
    Slash = 57,
    Percent = 58,
    /// "&&"
    AmpAmp = 59,
    /// "||"
    PipePipe = 60,
    /// "!"
    Bang = 61,

    // ==================
    // Literals & identifiers (100-149)
    // ==================
    Ident = 100,
    NumberLiteral = 101,
    StringLiteral = 102,

    // ==================
    // Special tokens (150-199)
    // ==================
    /// Unrecognized input
    Error = 150,
    Eof = 151,

    // ==================
    // Structure nodes (200+)
    // ==================
    SourceFile = 200,
    Block = 201,
    IfStatement = 202,
    ElseClause = 203,
    ExpressionStatement = 204,
    LocalDeclaration = 205,

    /// A predefined-type alias reference (`int`, `string`, ...)
    PredefinedType = 210,
    /// A type named by identifier (`Int32`, `DateTime`, ...)
    NamedType = 211,

    NameExpression = 220,
    LiteralExpression = 221,
    MemberAccessExpression = 222,
    InvocationExpression = 223,
    ArgumentList = 224,
    Argument = 225,
    BinaryExpression = 226,
    ParenthesizedExpression = 227,

    /// Node wrapping unparseable input during recovery
    ErrorNode = 240,
}

impl CsSyntaxKind {
    /// Whitespace, comments, and line breaks
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            CsSyntaxKind::Whitespace
                | CsSyntaxKind::CommentLine
                | CsSyntaxKind::CommentBlock
                | CsSyntaxKind::Newline
        )
    }

    /// Statement-level node kinds
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            CsSyntaxKind::Block
                | CsSyntaxKind::IfStatement
                | CsSyntaxKind::ExpressionStatement
                | CsSyntaxKind::LocalDeclaration
                | CsSyntaxKind::ErrorNode
        )
    }

    /// Expression-level node kinds
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            CsSyntaxKind::NameExpression
                | CsSyntaxKind::LiteralExpression
                | CsSyntaxKind::MemberAccessExpression
                | CsSyntaxKind::InvocationExpression
                | CsSyntaxKind::BinaryExpression
                | CsSyntaxKind::ParenthesizedExpression
        )
    }

    /// Binary operator tokens, with their precedence (higher binds tighter)
    pub fn binary_precedence(self) -> Option<u8> {
        match self {
            CsSyntaxKind::PipePipe => Some(1),
            CsSyntaxKind::AmpAmp => Some(2),
            CsSyntaxKind::EqEq | CsSyntaxKind::Neq => Some(3),
            CsSyntaxKind::Lt | CsSyntaxKind::Gt | CsSyntaxKind::Le | CsSyntaxKind::Ge => Some(4),
            CsSyntaxKind::Plus | CsSyntaxKind::Minus => Some(5),
            CsSyntaxKind::Star | CsSyntaxKind::Slash | CsSyntaxKind::Percent => Some(6),
            _ => None,
        }
    }
}

impl std::fmt::Display for CsSyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
