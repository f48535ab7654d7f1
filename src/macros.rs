//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a lexer handler that emits the matched text
//!
//! These macros reduce boilerplate in the lexer pattern table.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's source text
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a lexer handler for a pattern whose whole match becomes one token.
///
/// The handler pushes a token of the given kind carrying the matched text and
/// advances the lexer past it.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new(r"^\(").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr) => {
        |lexer: &mut $crate::lexer::lexer::Lexer, matched: &str| {
            let span = lexer.span_of(matched.len());
            tracing::trace!("{:?} {:?} at {}", $kind, matched, span.start.0);
            lexer.push($crate::MK_TOKEN!($kind, String::from(matched), span));
            lexer.advance_n(matched.len());
        }
    };
}
