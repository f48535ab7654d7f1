use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER,
};

use super::tokens::{Token, TokenKind};

pub type RegexHandler = fn(&mut Lexer, &str);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

impl RegexPattern {
    fn new(pattern: &str, handler: RegexHandler) -> Self {
        // Anchored: a pattern only ever matches at the lexer's current position.
        RegexPattern {
            regex: Regex::new(&format!("^(?:{})", pattern)).unwrap(),
            handler,
        }
    }
}

lazy_static! {
    // Order is significant: patterns overlap and the first match wins.
    static ref TOKEN_PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern::new(r#""(\\.|[^"\\])*""#, MK_DEFAULT_HANDLER!(TokenKind::String)),
        RegexPattern::new(r"[0-9]+(\.[0-9]*)?", MK_DEFAULT_HANDLER!(TokenKind::Number)),
        RegexPattern::new(r"\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly)),
        RegexPattern::new(r"\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly)),
        RegexPattern::new(r"\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen)),
        RegexPattern::new(r"\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen)),
        RegexPattern::new(r"\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket)),
        RegexPattern::new(r"\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket)),
        RegexPattern::new(r"=>", MK_DEFAULT_HANDLER!(TokenKind::Arrow)),
        RegexPattern::new(r"\.", MK_DEFAULT_HANDLER!(TokenKind::Dot)),
        RegexPattern::new(r",", MK_DEFAULT_HANDLER!(TokenKind::Comma)),
        RegexPattern::new(r"=", MK_DEFAULT_HANDLER!(TokenKind::Equal)),
        RegexPattern::new(r"~", MK_DEFAULT_HANDLER!(TokenKind::Tilde)),
        RegexPattern::new(r"\?", MK_DEFAULT_HANDLER!(TokenKind::QuestionMark)),
        RegexPattern::new(r":", MK_DEFAULT_HANDLER!(TokenKind::Colon)),
        RegexPattern::new(r";", MK_DEFAULT_HANDLER!(TokenKind::Semicolon)),
        RegexPattern::new(r"\$?([A-Za-z_]+|[!@%^&*|\-+/`<>]+)", MK_DEFAULT_HANDLER!(TokenKind::Word)),
    ];

    static ref IGNORE_PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern::new(r"\s+", skip_handler),
        RegexPattern::new(r"#[^\n]*", skip_handler),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: &str, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            tokens: vec![],
            source: String::from(source),
            pos: 0,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn get_position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    /// Span covering the next `len` bytes from the current position.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: self.get_position(),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }

    /// Runs the first pattern of `patterns` that matches at the current position.
    fn apply_first(&mut self, patterns: &[RegexPattern]) -> bool {
        for pattern in patterns {
            let matched = match pattern.regex.find(self.remainder()) {
                Some(found) => found.as_str().to_string(),
                None => continue,
            };

            (pattern.handler)(self, &matched);
            return true;
        }

        false
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) {
    lexer.advance_n(matched.len());
}

/// Splits `source` into tokens, dropping whitespace and `#` line comments.
///
/// Fails on the first position where neither a token nor an ignorable pattern
/// matches; the error carries the unconsumed remainder.
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        if lex.apply_first(&TOKEN_PATTERNS) || lex.apply_first(&IGNORE_PATTERNS) {
            continue;
        }

        return Err(Error::new(
            ErrorImpl::UnrecognisedToken {
                token: lex.remainder().to_string(),
            },
            lex.get_position(),
        ));
    }

    tracing::debug!("tokenized {} bytes into {} tokens", lex.source.len(), lex.tokens.len());
    Ok(lex.tokens)
}
