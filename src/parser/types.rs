//! Type parsing implementation.
//!
//! This module handles parsing of type annotations and type definitions'
//! right-hand sides. It supports:
//!
//! - Function types `(a: A, b: B) => R`
//! - Array types `[A, B]`
//! - Parenthesized types `(A | B)`
//! - Dictionary types `{x: A; y: B}`
//! - Number and string literal types
//! - Named references with optional generic arguments `Pair<A, B>`
//! - Union (`|`) and intersection (`&`) types, intersection binding tighter
//!
//! `<`, `>`, `|` and `&` are lexed as `Word` tokens and matched by text.

use crate::{
    ast::{
        ast::TypeNode,
        types::{
            ArrayType, DictionaryType, FunctionType, IntersectionType, NumberLiteralType,
            ReferenceType, StringLiteralType, UnionType,
        },
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_number_text, parse_variable_declaration, strip_quotes},
    parser::{token_separator, word_separator, Parser},
};

/// Parses a full type: a union of intersections of primary types.
pub fn parse_type(parser: &mut Parser) -> Result<TypeNode, Error> {
    let mut members = parser.many_with_separator(
        "union type",
        parse_intersection_type,
        word_separator("|"),
        true,
    )?;

    if members.len() == 1 {
        if let Some(single) = members.pop() {
            return Ok(single);
        }
    }

    Ok(TypeNode::Union(UnionType { members }))
}

pub fn parse_intersection_type(parser: &mut Parser) -> Result<TypeNode, Error> {
    let mut members = parser.many_with_separator(
        "intersection type",
        parse_primary_type,
        word_separator("&"),
        true,
    )?;

    if members.len() == 1 {
        if let Some(single) = members.pop() {
            return Ok(single);
        }
    }

    Ok(TypeNode::Intersection(IntersectionType { members }))
}

pub fn parse_primary_type(parser: &mut Parser) -> Result<TypeNode, Error> {
    parser.or(
        "type",
        &[
            parse_function_type,
            parse_array_type,
            parse_grouping_type,
            parse_dictionary_type,
            parse_number_type,
            parse_string_type,
            parse_reference_type,
        ],
    )
}

pub fn parse_function_type(parser: &mut Parser) -> Result<TypeNode, Error> {
    parser.consume(TokenKind::OpenParen)?;
    let parameters = parser.many_with_separator(
        "parameters",
        parse_variable_declaration,
        token_separator(TokenKind::Comma),
        false,
    )?;
    parser.consume(TokenKind::CloseParen)?;
    parser.consume(TokenKind::Arrow)?;

    let return_type = parse_type(parser)?;

    Ok(TypeNode::Function(FunctionType {
        parameters,
        return_type: Box::new(return_type),
    }))
}

pub fn parse_array_type(parser: &mut Parser) -> Result<TypeNode, Error> {
    parser.consume(TokenKind::OpenBracket)?;
    let elements = parser.many_with_separator(
        "array type",
        parse_type,
        token_separator(TokenKind::Comma),
        false,
    )?;
    parser.consume(TokenKind::CloseBracket)?;

    Ok(TypeNode::Array(ArrayType { elements }))
}

pub fn parse_grouping_type(parser: &mut Parser) -> Result<TypeNode, Error> {
    parser.consume(TokenKind::OpenParen)?;
    let type_ = parse_type(parser)?;
    parser.consume(TokenKind::CloseParen)?;

    Ok(type_)
}

pub fn parse_dictionary_type(parser: &mut Parser) -> Result<TypeNode, Error> {
    parser.consume(TokenKind::OpenCurly)?;
    let entries = parser.many_with_separator(
        "dictionary type",
        |parser| {
            let key = parser.consume(TokenKind::Word)?;
            parser.consume(TokenKind::Colon)?;
            Ok((key, parse_type(parser)?))
        },
        token_separator(TokenKind::Semicolon),
        false,
    )?;
    parser.consume(TokenKind::CloseCurly)?;

    Ok(TypeNode::Dictionary(DictionaryType { entries }))
}

pub fn parse_number_type(parser: &mut Parser) -> Result<TypeNode, Error> {
    let position = parser.get_position();
    let text = parser.consume(TokenKind::Number)?;

    Ok(TypeNode::Number(NumberLiteralType {
        value: parse_number_text(&text, position)?,
    }))
}

pub fn parse_string_type(parser: &mut Parser) -> Result<TypeNode, Error> {
    let text = parser.consume(TokenKind::String)?;

    Ok(TypeNode::String(StringLiteralType {
        value: strip_quotes(&text),
    }))
}

pub fn parse_reference_type(parser: &mut Parser) -> Result<TypeNode, Error> {
    let name = parser.consume(TokenKind::Word)?;
    let arguments = parser
        .optional(|parser| {
            parser.consume_word("<")?;
            let arguments = parser.many_with_separator(
                "type arguments",
                parse_type,
                token_separator(TokenKind::Comma),
                true,
            )?;
            parser.consume_word(">")?;
            Ok(arguments)
        })
        .unwrap_or_default();

    Ok(TypeNode::Reference(ReferenceType { name, arguments }))
}
