use std::fmt::Display;

use crate::Span;

/// Token classes produced by the lexer.
///
/// Identifiers and operator symbols share the `Word` kind; the parser tells them
/// apart by position and by the precedence of their leading character.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    String,
    Number,

    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,

    Arrow, // =>
    Dot,
    Comma,
    Equal,
    Tilde,
    QuestionMark,
    Colon,
    Semicolon,

    Word,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} `{}`", self.kind, self.value)
    }
}

impl Token {
    pub fn is_word(&self, text: &str) -> bool {
        self.kind == TokenKind::Word && self.value == text
    }

    pub fn debug(&self) {
        println!(
            "{:>4}..{:<4} {:<12} {}",
            self.span.start.0, self.span.end.0, self.kind, self.value
        );
    }
}
