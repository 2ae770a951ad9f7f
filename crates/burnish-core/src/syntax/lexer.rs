//! Trivia-preserving lexer for the reference grammar
//!
//! Preserves ALL source information (whitespace, comments, line breaks) so
//! the CST round-trips losslessly: `parse(source).text() == source`.

use std::ops::Range;

use super::CsSyntaxKind;

/// The predefined-type alias set of the grammar
///
/// This is the authoritative alias list rules validate against; `void` is
/// part of the grammar but denotes absence of a value.
pub const PREDEFINED_TYPE_ALIASES: &[&str] = &[
    "bool", "byte", "char", "decimal", "double", "float", "int", "long", "object", "sbyte",
    "short", "string", "ulong", "ushort", "void",
];

/// Simple span representing a byte range in the source
pub type LexSpan = Range<usize>;

/// A lexer error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerError {
    pub message: String,
    pub span: LexSpan,
}

impl LexerError {
    pub fn new(message: impl Into<String>, span: LexSpan) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// A token with its syntax kind and span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexedToken {
    pub kind: CsSyntaxKind,
    pub text: String,
    pub span: LexSpan,
}

impl LexedToken {
    pub fn new(kind: CsSyntaxKind, text: impl Into<String>, span: LexSpan) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

/// Result returned by the lexer
pub type LexResult = (Vec<LexedToken>, Vec<LexerError>);

/// Lex input preserving all trivia
pub fn lex(input: &str) -> LexResult {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = 0usize;

    while i < len {
        let start = i;
        let b = bytes[i];

        match b {
            b' ' | b'\t' => {
                while i < len && (bytes[i] == b' ' || bytes[i] == b'\t') {
                    i += 1;
                }
                tokens.push(LexedToken::new(
                    CsSyntaxKind::Whitespace,
                    &input[start..i],
                    start..i,
                ));
            }
            b'\r' => {
                i += 1;
                if i < len && bytes[i] == b'\n' {
                    i += 1;
                }
                tokens.push(LexedToken::new(
                    CsSyntaxKind::Newline,
                    &input[start..i],
                    start..i,
                ));
            }
            b'\n' => {
                i += 1;
                tokens.push(LexedToken::new(
                    CsSyntaxKind::Newline,
                    &input[start..i],
                    start..i,
                ));
            }
            b'/' if i + 1 < len && bytes[i + 1] == b'/' => {
                while i < len && bytes[i] != b'\n' && bytes[i] != b'\r' {
                    i += 1;
                }
                tokens.push(LexedToken::new(
                    CsSyntaxKind::CommentLine,
                    &input[start..i],
                    start..i,
                ));
            }
            b'/' if i + 1 < len && bytes[i + 1] == b'*' => {
                i += 2;
                let mut closed = false;
                while i < len {
                    if bytes[i] == b'*' && i + 1 < len && bytes[i + 1] == b'/' {
                        i += 2;
                        closed = true;
                        break;
                    }
                    i += 1;
                }
                if !closed {
                    errors.push(LexerError::new("unterminated block comment", start..i));
                }
                tokens.push(LexedToken::new(
                    CsSyntaxKind::CommentBlock,
                    &input[start..i],
                    start..i,
                ));
            }
            b'"' => {
                i += 1;
                let mut closed = false;
                while i < len {
                    match bytes[i] {
                        b'\\' if i + 1 < len => i += 2,
                        b'"' => {
                            i += 1;
                            closed = true;
                            break;
                        }
                        b'\n' | b'\r' => break,
                        _ => i += 1,
                    }
                }
                if !closed {
                    errors.push(LexerError::new("unterminated string literal", start..i));
                }
                tokens.push(LexedToken::new(
                    CsSyntaxKind::StringLiteral,
                    &input[start..i],
                    start..i,
                ));
            }
            b'0'..=b'9' => {
                while i < len && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                if i < len && bytes[i] == b'.' && i + 1 < len && bytes[i + 1].is_ascii_digit() {
                    i += 1;
                    while i < len && bytes[i].is_ascii_digit() {
                        i += 1;
                    }
                }
                tokens.push(LexedToken::new(
                    CsSyntaxKind::NumberLiteral,
                    &input[start..i],
                    start..i,
                ));
            }
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                while i < len && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                let text = &input[start..i];
                let kind = keyword_kind(text);
                tokens.push(LexedToken::new(kind, text, start..i));
            }
            _ => {
                if let Some((kind, width)) = operator_kind(bytes, i) {
                    i += width;
                    tokens.push(LexedToken::new(kind, &input[start..i], start..i));
                } else {
                    // Skip a full UTF-8 code point, not just one byte
                    let ch_len = input[start..].chars().next().map_or(1, char::len_utf8);
                    i += ch_len;
                    errors.push(LexerError::new(
                        format!("unexpected character '{}'", &input[start..i]),
                        start..i,
                    ));
                    tokens.push(LexedToken::new(
                        CsSyntaxKind::Error,
                        &input[start..i],
                        start..i,
                    ));
                }
            }
        }
    }

    (tokens, errors)
}

fn keyword_kind(text: &str) -> CsSyntaxKind {
    match text {
        "if" => CsSyntaxKind::IfKw,
        "else" => CsSyntaxKind::ElseKw,
        _ if PREDEFINED_TYPE_ALIASES.contains(&text) => CsSyntaxKind::PredefinedTypeKw,
        _ => CsSyntaxKind::Ident,
    }
}

fn operator_kind(bytes: &[u8], i: usize) -> Option<(CsSyntaxKind, usize)> {
    let two = |a: u8, b: u8| i + 1 < bytes.len() && bytes[i] == a && bytes[i + 1] == b;

    if two(b'=', b'=') {
        return Some((CsSyntaxKind::EqEq, 2));
    }
    if two(b'!', b'=') {
        return Some((CsSyntaxKind::Neq, 2));
    }
    if two(b'<', b'=') {
        return Some((CsSyntaxKind::Le, 2));
    }
    if two(b'>', b'=') {
        return Some((CsSyntaxKind::Ge, 2));
    }
    if two(b'&', b'&') {
        return Some((CsSyntaxKind::AmpAmp, 2));
    }
    if two(b'|', b'|') {
        return Some((CsSyntaxKind::PipePipe, 2));
    }

    let kind = match bytes[i] {
        b'(' => CsSyntaxKind::LParen,
        b')' => CsSyntaxKind::RParen,
        b'{' => CsSyntaxKind::LBrace,
        b'}' => CsSyntaxKind::RBrace,
        b';' => CsSyntaxKind::Semicolon,
        b',' => CsSyntaxKind::Comma,
        b'.' => CsSyntaxKind::Dot,
        b'=' => CsSyntaxKind::Assign,
        b'<' => CsSyntaxKind::Lt,
        b'>' => CsSyntaxKind::Gt,
        b'+' => CsSyntaxKind::Plus,
        b'-' => CsSyntaxKind::Minus,
        b'*' => CsSyntaxKind::Star,
        b'/' => CsSyntaxKind::Slash,
        b'%' => CsSyntaxKind::Percent,
        b'!' => CsSyntaxKind::Bang,
        _ => return None,
    };
    Some((kind, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<CsSyntaxKind> {
        lex(input).0.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_if_statement() {
        assert_eq!(
            kinds("if (x > 0) print(x);"),
            vec![
                CsSyntaxKind::IfKw,
                CsSyntaxKind::Whitespace,
                CsSyntaxKind::LParen,
                CsSyntaxKind::Ident,
                CsSyntaxKind::Whitespace,
                CsSyntaxKind::Gt,
                CsSyntaxKind::Whitespace,
                CsSyntaxKind::NumberLiteral,
                CsSyntaxKind::RParen,
                CsSyntaxKind::Whitespace,
                CsSyntaxKind::Ident,
                CsSyntaxKind::LParen,
                CsSyntaxKind::Ident,
                CsSyntaxKind::RParen,
                CsSyntaxKind::Semicolon,
            ]
        );
    }

    #[test]
    fn classifies_predefined_type_keywords() {
        for alias in PREDEFINED_TYPE_ALIASES {
            let (tokens, errors) = lex(alias);
            assert!(errors.is_empty());
            assert_eq!(tokens[0].kind, CsSyntaxKind::PredefinedTypeKw, "{alias}");
        }
        assert_eq!(kinds("uint")[0], CsSyntaxKind::Ident);
    }

    #[test]
    fn tokens_cover_input_exactly() {
        let input = "int x = 1; // note\r\nif (x) { y(); }\n";
        let (tokens, errors) = lex(input);
        assert!(errors.is_empty());
        let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(rebuilt, input);
    }

    #[test]
    fn crlf_is_one_newline_token() {
        let (tokens, _) = lex("x\r\ny");
        assert_eq!(tokens[1].kind, CsSyntaxKind::Newline);
        assert_eq!(tokens[1].text, "\r\n");
    }

    #[test]
    fn reports_unterminated_string() {
        let (tokens, errors) = lex("\"oops");
        assert_eq!(errors.len(), 1);
        assert_eq!(tokens[0].kind, CsSyntaxKind::StringLiteral);
    }
}
