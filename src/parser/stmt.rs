use crate::{
    ast::{
        ast::Stmt,
        statements::{GenericTypeDefinitionStmt, TypeDefinitionStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    expr::parse_expr,
    parser::{token_separator, Parser},
    types::parse_type,
};

/// Parses `;`-separated statements, tolerating leading and trailing `;`.
///
/// Never fails: it stops at the first statement it cannot parse and leaves
/// the remaining tokens for `parse` to report.
pub fn parse_program(parser: &mut Parser) -> Vec<Stmt> {
    let body = parser
        .many_with_separator("program", parse_stmt, token_separator(TokenKind::Semicolon), false)
        .unwrap_or_default();

    parser.many(|parser| parser.consume(TokenKind::Semicolon));

    body
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    // Expressions first: `Name = ...` is an assignment whenever the right-hand
    // side parses as a value.
    parser.or(
        "statement",
        &[
            parse_expression_stmt,
            parse_type_definition_stmt,
            parse_generic_type_definition_stmt,
        ],
    )
}

/// An expression that ends at a statement boundary.
///
/// Without the boundary check `Point = {x: Num}` would stop after `Point` as
/// a bare reference, and the type definition alternative would never run.
///
/// A statement opening with a generic header `Name<A, B> =` is never an
/// expression: `Vec<T> = [T]` would otherwise read as `Vec < (T >= [T])`.
pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if starts_generic_header(parser) {
        if let Some(token) = parser.current_token() {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: token.value.clone(),
                    message: String::from("generic type header is not an expression"),
                },
                token.span.start.clone(),
            ));
        }
    }

    let expr = parse_expr(parser)?;

    match parser.current_token() {
        None => Ok(Stmt::Expression(expr)),
        Some(token) if token.kind == TokenKind::Semicolon => Ok(Stmt::Expression(expr)),
        Some(token) => Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.value.clone(),
                message: String::from("expected `;` or end of input after expression"),
            },
            token.span.start.clone(),
        )),
    }
}

/// Looks ahead, without consuming, for `Word < Word,* > =`.
fn starts_generic_header(parser: &Parser) -> bool {
    let is_kind = |offset: usize, kind: TokenKind| {
        parser.peek(offset).is_some_and(|token| token.kind == kind)
    };
    let is_word = |offset: usize, text: &str| {
        parser.peek(offset).is_some_and(|token| token.is_word(text))
    };

    if !is_kind(0, TokenKind::Word) || !is_word(1, "<") {
        return false;
    }

    let mut offset = 2;
    loop {
        if !is_kind(offset, TokenKind::Word) {
            return false;
        }
        offset += 1;

        if is_kind(offset, TokenKind::Comma) {
            offset += 1;
        } else if is_word(offset, ">") {
            return is_kind(offset + 1, TokenKind::Equal);
        } else {
            return false;
        }
    }
}

pub fn parse_type_definition_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let name = parser.consume(TokenKind::Word)?;
    parser.consume(TokenKind::Equal)?;
    let type_ = parse_type(parser)?;

    Ok(Stmt::TypeDefinition(TypeDefinitionStmt { name, type_ }))
}

pub fn parse_generic_type_definition_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let name = parser.consume(TokenKind::Word)?;
    parser.consume_word("<")?;
    let parameters = parser.many_with_separator(
        "type parameters",
        |parser| parser.consume(TokenKind::Word),
        token_separator(TokenKind::Comma),
        true,
    )?;
    parser.consume_word(">")?;
    parser.consume(TokenKind::Equal)?;
    let type_ = parse_type(parser)?;

    Ok(Stmt::GenericTypeDefinition(GenericTypeDefinitionStmt {
        name,
        parameters,
        type_,
    }))
}
