//! Parser state and combinators.
//!
//! This module contains the `Parser` struct and the combinators every
//! grammar rule is built from. The parser owns the token vector and walks
//! it with an index cursor; backtracking saves and restores that index.
//!
//! Rule failures are ordinary `Err` values. `or`, `optional` and the `many`
//! family catch them, rewind the cursor, and carry on; only a failure nobody
//! catches reaches the caller of `parse`.

use std::rc::Rc;

use crate::{
    ast::statements::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{lookups::Rule, stmt::parse_program};

/// The furthest point any `consume` failed at, and what it wanted there.
#[derive(Debug, Clone, Default)]
struct Failure {
    pos: usize,
    expected: Vec<String>,
}

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token stream and tracks the current position in
/// it. It provides the token-level primitives (`consume`, `consume_word`)
/// and the backtracking combinators (`or`, `optional`, `many`,
/// `many_required`, `many_with_separator`).
pub struct Parser {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The name of the source file being parsed
    file: Rc<String>,
    /// Diagnostic only; never rolled back and never read by the grammar
    furthest_failure: Option<Failure>,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Vector of tokens to parse
    /// * `file` - Reference-counted string containing the source file name
    pub fn new(tokens: Vec<Token>, file: Rc<String>) -> Self {
        Parser {
            tokens,
            pos: 0,
            file,
            furthest_failure: None,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Returns the token `offset` places past the cursor without advancing.
    pub fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.pos < self.tokens.len()
    }

    /// Saves the cursor so a speculative rule can be undone.
    pub fn snapshot(&self) -> usize {
        self.pos
    }

    /// Rewinds the cursor to a value returned by `snapshot`.
    pub fn restore(&mut self, snapshot: usize) {
        self.pos = snapshot;
    }

    /// Returns the source position of the current token.
    ///
    /// At the end of input this is the end of the last token.
    pub fn get_position(&self) -> Position {
        self.position_at(self.pos)
    }

    fn position_at(&self, pos: usize) -> Position {
        match self.tokens.get(pos) {
            Some(token) => token.span.start.clone(),
            None => match self.tokens.last() {
                Some(token) => token.span.end.clone(),
                None => Position(0, Rc::clone(&self.file)),
            },
        }
    }

    /// Records a failed expectation at the cursor and builds the error for it.
    fn expected(&mut self, expected: String) -> Error {
        let pos = self.pos;
        let further = match &self.furthest_failure {
            Some(failure) => failure.pos < pos,
            None => true,
        };

        if further {
            self.furthest_failure = Some(Failure {
                pos,
                expected: vec![expected.clone()],
            });
        } else if let Some(failure) = self.furthest_failure.as_mut() {
            if failure.pos == pos && !failure.expected.contains(&expected) {
                failure.expected.push(expected.clone());
            }
        }

        match self.current_token() {
            Some(token) => Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: token.value.clone(),
                    message: format!("expected {}", expected),
                },
                token.span.start.clone(),
            ),
            None => Error::new(ErrorImpl::UnexpectedEndOfInput { expected }, self.get_position()),
        }
    }

    /// Consumes a token of the given kind and returns its text.
    ///
    /// # Returns
    ///
    /// Returns Ok(text) if the current token matches, otherwise an Error that
    /// callers may catch to backtrack.
    pub fn consume(&mut self, kind: TokenKind) -> Result<String, Error> {
        if let Some(token) = self.tokens.get(self.pos) {
            if token.kind == kind {
                let value = token.value.clone();
                self.pos += 1;
                return Ok(value);
            }
        }

        Err(self.expected(kind.to_string()))
    }

    /// Consumes a `Word` token whose text is exactly `text`.
    ///
    /// Symbols such as `<`, `>`, `|` and `&` are not punctuation tokens, so
    /// grammar rules that need them match on the word text.
    pub fn consume_word(&mut self, text: &str) -> Result<(), Error> {
        if let Some(token) = self.tokens.get(self.pos) {
            if token.is_word(text) {
                self.pos += 1;
                return Ok(());
            }
        }

        Err(self.expected(format!("`{}`", text)))
    }

    /// Tries each rule in order from the same starting point.
    ///
    /// The first rule to succeed wins. A failed rule is rewound before the
    /// next is tried, so if every rule fails the cursor is exactly where it
    /// was before the call.
    ///
    /// # Arguments
    ///
    /// * `rule_name` - Name reported when no rule matches
    /// * `rules` - Alternatives, in priority order
    pub fn or<T>(&mut self, rule_name: &'static str, rules: &[Rule<T>]) -> Result<T, Error> {
        let snapshot = self.snapshot();

        for (index, rule) in rules.iter().enumerate() {
            match rule(self) {
                Ok(value) => return Ok(value),
                Err(error) => {
                    tracing::trace!(
                        "{}: alternative {} failed at token {}: {}",
                        rule_name,
                        index,
                        self.pos,
                        error
                    );
                    self.restore(snapshot);
                }
            }
        }

        Err(Error::new(
            ErrorImpl::NoRuleMatched { rule: rule_name },
            self.get_position(),
        ))
    }

    /// Runs `rule`, rewinding and returning `None` if it fails.
    pub fn optional<T, R>(&mut self, rule: R) -> Option<T>
    where
        R: FnOnce(&mut Parser) -> Result<T, Error>,
    {
        let snapshot = self.snapshot();

        match rule(self) {
            Ok(value) => Some(value),
            Err(_) => {
                self.restore(snapshot);
                None
            }
        }
    }

    /// Applies `rule` until it fails or the input runs out.
    ///
    /// The failing attempt is rewound. Zero matches is a valid result. A
    /// match that consumes nothing ends the loop, since repeating it would
    /// never make progress.
    pub fn many<T, R>(&mut self, mut rule: R) -> Vec<T>
    where
        R: FnMut(&mut Parser) -> Result<T, Error>,
    {
        let mut out = vec![];

        while self.has_tokens() {
            let snapshot = self.snapshot();

            match rule(self) {
                Ok(value) => {
                    out.push(value);
                    if self.pos == snapshot {
                        break;
                    }
                }
                Err(_) => {
                    self.restore(snapshot);
                    break;
                }
            }
        }

        out
    }

    /// Like `many`, but zero matches is an error.
    ///
    /// The failure is recorded at the cursor, so a rule that was needed at
    /// the end of input is reported as `UnexpectedEndOfInput`.
    pub fn many_required<T, R>(&mut self, rule_name: &'static str, rule: R) -> Result<Vec<T>, Error>
    where
        R: FnMut(&mut Parser) -> Result<T, Error>,
    {
        let out = self.many(rule);

        if out.is_empty() {
            return Err(self.expected(rule_name.to_string()));
        }

        Ok(out)
    }

    /// Parses `rule` repeatedly with `separator` between elements.
    ///
    /// The first element is optional even when later ones are present, so a
    /// leading separator is accepted. When `at_least_one` is set, a missing
    /// first element is an error.
    pub fn many_with_separator<T, R, S>(
        &mut self,
        rule_name: &'static str,
        mut rule: R,
        mut separator: S,
        at_least_one: bool,
    ) -> Result<Vec<T>, Error>
    where
        R: FnMut(&mut Parser) -> Result<T, Error>,
        S: FnMut(&mut Parser) -> Result<(), Error>,
    {
        let first = self.optional(&mut rule);

        if at_least_one && first.is_none() {
            return Err(self.expected(rule_name.to_string()));
        }

        let rest = self.many(|parser| {
            separator(parser)?;
            rule(parser)
        });

        Ok(first.into_iter().chain(rest).collect())
    }

    /// Builds the error reported when tokens are left over after `program`.
    ///
    /// Points at the furthest failed expectation when there is one, since
    /// that is usually where the input went wrong.
    fn trailing_error(&self) -> Error {
        let leftover = self
            .current_token()
            .map(|token| token.value.clone())
            .unwrap_or_default();

        match &self.furthest_failure {
            Some(failure) if failure.pos >= self.pos => {
                let expected = failure.expected.join(" or ");
                match self.tokens.get(failure.pos) {
                    Some(token) => Error::new(
                        ErrorImpl::UnexpectedTokenDetailed {
                            token: token.value.clone(),
                            message: format!("expected {}", expected),
                        },
                        token.span.start.clone(),
                    ),
                    None => Error::new(
                        ErrorImpl::UnexpectedEndOfInput { expected },
                        self.position_at(failure.pos),
                    ),
                }
            }
            _ => Error::new(
                ErrorImpl::TrailingTokens { token: leftover },
                self.get_position(),
            ),
        }
    }
}

/// Parses a stream of tokens into a `Program`.
///
/// This is the main entry point for parsing. It runs the `program` rule and
/// then requires that every token was consumed.
///
/// # Arguments
///
/// * `tokens` - Vector of tokens to parse
/// * `file` - Reference-counted string containing the source file name
///
/// # Returns
///
/// The top-level statements in source order, or the Error describing where
/// parsing stopped.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<Program, Error> {
    let mut parser = Parser::new(tokens, file);

    let body = parse_program(&mut parser);

    if parser.has_tokens() {
        return Err(parser.trailing_error());
    }

    tracing::debug!("parsed {} top-level statements", body.len());
    Ok(Program { body })
}

/// Separator rule matching one token of `kind`.
pub fn token_separator(kind: TokenKind) -> impl FnMut(&mut Parser) -> Result<(), Error> {
    move |parser: &mut Parser| parser.consume(kind).map(|_| ())
}

/// Separator rule matching the word `text`, e.g. `|` between union members.
pub fn word_separator(text: &'static str) -> impl FnMut(&mut Parser) -> Result<(), Error> {
    move |parser: &mut Parser| parser.consume_word(text)
}
