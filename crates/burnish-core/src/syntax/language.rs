//! Rowan language implementation for the C#-style grammar
//!
//! Connects `CsSyntaxKind` to Rowan's generic CST infrastructure.

use rowan::Language;

use super::CsSyntaxKind;

/// Language implementation for the C#-style grammar
///
/// Zero-sized type implementing `rowan::Language` to bridge between our
/// syntax kinds and Rowan's generic tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CsLanguage;

/// Syntax node over the C#-style language
pub type CsSyntaxNode = rowan::SyntaxNode<CsLanguage>;
/// Syntax token over the C#-style language
pub type CsSyntaxToken = rowan::SyntaxToken<CsLanguage>;
/// Node-or-token element over the C#-style language
pub type CsSyntaxElement = rowan::SyntaxElement<CsLanguage>;

impl Language for CsLanguage {
    type Kind = CsSyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        match raw.0 {
            // Trivia
            0 => CsSyntaxKind::Whitespace,
            1 => CsSyntaxKind::CommentLine,
            2 => CsSyntaxKind::CommentBlock,
            3 => CsSyntaxKind::Newline,

            // Keywords (10-39)
            10 => CsSyntaxKind::IfKw,
            11 => CsSyntaxKind::ElseKw,
            12 => CsSyntaxKind::PredefinedTypeKw,

            // Punctuation & operators (40-99)
            40 => CsSyntaxKind::LParen,
            41 => CsSyntaxKind::RParen,
            42 => CsSyntaxKind::LBrace,
            43 => CsSyntaxKind::RBrace,
            44 => CsSyntaxKind::Semicolon,
            45 => CsSyntaxKind::Comma,
            46 => CsSyntaxKind::Dot,
            47 => CsSyntaxKind::Assign,
            48 => CsSyntaxKind::EqEq,
            49 => CsSyntaxKind::Neq,
            50 => CsSyntaxKind::Lt,
            51 => CsSyntaxKind::Gt,
            52 => CsSyntaxKind::Le,
            53 => CsSyntaxKind::Ge,
            54 => CsSyntaxKind::Plus,
            55 => CsSyntaxKind::Minus,
            56 => CsSyntaxKind::Star,
            57 => CsSyntaxKind::Slash,
            58 => CsSyntaxKind::Percent,
            59 => CsSyntaxKind::AmpAmp,
            60 => CsSyntaxKind::PipePipe,
            61 => CsSyntaxKind::Bang,

            // Literals & identifiers (100-149)
            100 => CsSyntaxKind::Ident,
            101 => CsSyntaxKind::NumberLiteral,
            102 => CsSyntaxKind::StringLiteral,

            // Special tokens (150-199)
            150 => CsSyntaxKind::Error,
            151 => CsSyntaxKind::Eof,

            // Structure nodes (200+)
            200 => CsSyntaxKind::SourceFile,
            201 => CsSyntaxKind::Block,
            202 => CsSyntaxKind::IfStatement,
            203 => CsSyntaxKind::ElseClause,
            204 => CsSyntaxKind::ExpressionStatement,
            205 => CsSyntaxKind::LocalDeclaration,
            210 => CsSyntaxKind::PredefinedType,
            211 => CsSyntaxKind::NamedType,
            220 => CsSyntaxKind::NameExpression,
            221 => CsSyntaxKind::LiteralExpression,
            222 => CsSyntaxKind::MemberAccessExpression,
            223 => CsSyntaxKind::InvocationExpression,
            224 => CsSyntaxKind::ArgumentList,
            225 => CsSyntaxKind::Argument,
            226 => CsSyntaxKind::BinaryExpression,
            227 => CsSyntaxKind::ParenthesizedExpression,
            240 => CsSyntaxKind::ErrorNode,

            other => {
                tracing::warn!("Unknown syntax kind: {other}");
                CsSyntaxKind::Error
            }
        }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        rowan::SyntaxKind(kind as u16)
    }
}
