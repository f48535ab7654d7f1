use crate::{
    ast::{
        ast::Node,
        expressions::{
            ArrayExpr, AssignmentExpr, CallExpr, DictionaryExpr, FunctionLiteralExpr,
            ModifierAssignmentExpr, NumberExpr, StringExpr, SymbolExpr, VariableDeclaration,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position,
};

use super::{
    lookups::binding_power,
    parser::{token_separator, Parser},
    types::parse_type,
};

/// Parses a run of primary terms and folds the operators in it.
///
/// The run alternates operand, operator, operand, so it must have an odd
/// length. Operators are reduced left to right with a two-stack scan; equal
/// binding powers reduce the operator already on the stack first, which makes
/// every operator left-associative.
pub fn parse_expr(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    let terms = parser.many_required("expression", parse_primary_expr)?;

    if terms.len() % 2 == 0 {
        return Err(Error::new(
            ErrorImpl::EvenTermCount { terms: terms.len() },
            start,
        ));
    }

    reduce_terms(terms, start)
}

fn reduce_terms(terms: Vec<Node>, start: Position) -> Result<Node, Error> {
    let mut terms = terms.into_iter();
    let mut operands: Vec<Node> = terms.next().into_iter().collect();
    let mut operators: Vec<Node> = vec![];

    while let Some(operator) = terms.next() {
        let Some(operand) = terms.next() else {
            return Err(Error::new(ErrorImpl::EvenTermCount { terms: operands.len() * 2 }, start));
        };

        let incoming = binding_power(&operator);
        while operators
            .last()
            .is_some_and(|top| binding_power(top) >= incoming)
        {
            reduce_top(&mut operands, &mut operators, &start)?;
        }

        operators.push(operator);
        operands.push(operand);
    }

    while !operators.is_empty() {
        reduce_top(&mut operands, &mut operators, &start)?;
    }

    match (operands.pop(), operands.is_empty()) {
        (Some(root), true) => Ok(root),
        (root, _) => Err(Error::new(
            ErrorImpl::UnreducibleExpression {
                remaining: operands.len() + usize::from(root.is_some()),
            },
            start,
        )),
    }
}

/// Pops one operator and two operands and pushes the call they form.
fn reduce_top(operands: &mut Vec<Node>, operators: &mut Vec<Node>, start: &Position) -> Result<(), Error> {
    let (Some(operator), Some(right), Some(left)) = (operators.pop(), operands.pop(), operands.pop())
    else {
        return Err(Error::new(
            ErrorImpl::UnreducibleExpression { remaining: operands.len() },
            start.clone(),
        ));
    };

    operands.push(Node::FunctionCall(CallExpr {
        callee: Box::new(operator),
        arguments: vec![left, right],
    }));

    Ok(())
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Node, Error> {
    // Function literals, groupings, assignments and calls can all start with
    // the same tokens; the first alternative that parses wins.
    parser.or(
        "primary",
        &[
            parse_function_literal_expr,
            parse_grouping_expr,
            parse_assignment_expr,
            parse_prefix_call_expr,
            parse_symbol_expr,
            parse_literal_expr,
        ],
    )
}

pub fn parse_function_literal_expr(parser: &mut Parser) -> Result<Node, Error> {
    parser.consume(TokenKind::OpenParen)?;
    let parameters = parser.many_with_separator(
        "parameters",
        parse_variable_declaration,
        token_separator(TokenKind::Comma),
        false,
    )?;
    parser.consume(TokenKind::CloseParen)?;
    parser.consume(TokenKind::Arrow)?;

    let body = parse_expr(parser)?;

    Ok(Node::FunctionLiteral(FunctionLiteralExpr {
        parameters,
        body: Box::new(body),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Node, Error> {
    parser.consume(TokenKind::OpenParen)?;
    let expr = parse_expr(parser)?;
    parser.consume(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_variable_declaration(parser: &mut Parser) -> Result<VariableDeclaration, Error> {
    let name = parser.consume(TokenKind::Word)?;
    let type_annotation = parser.optional(|parser| {
        parser.consume(TokenKind::Colon)?;
        parse_type(parser)
    });

    Ok(VariableDeclaration {
        name,
        type_annotation,
    })
}

/// What follows the target of an assignment.
enum AssignmentTail {
    Plain(Node),
    Modifier { modifier_function: Node, value: Node },
}

pub fn parse_assignment_expr(parser: &mut Parser) -> Result<Node, Error> {
    let target = parse_variable_declaration(parser)?;

    let tail = parser.or(
        "assignment",
        &[parse_plain_assignment_tail, parse_modifier_assignment_tail],
    )?;

    Ok(match tail {
        AssignmentTail::Plain(value) => Node::Assignment(AssignmentExpr {
            target,
            value: Box::new(value),
        }),
        AssignmentTail::Modifier {
            modifier_function,
            value,
        } => Node::ModifierAssignment(ModifierAssignmentExpr {
            target,
            modifier_function: Box::new(modifier_function),
            value: Box::new(value),
        }),
    })
}

fn parse_plain_assignment_tail(parser: &mut Parser) -> Result<AssignmentTail, Error> {
    parser.consume(TokenKind::Equal)?;
    Ok(AssignmentTail::Plain(parse_expr(parser)?))
}

fn parse_modifier_assignment_tail(parser: &mut Parser) -> Result<AssignmentTail, Error> {
    // No assignment alternative here: `x incr= 1` must not read `incr = 1`
    // as a nested assignment.
    let modifier_function = parser.or(
        "modifier",
        &[parse_grouping_expr, parse_prefix_call_expr, parse_symbol_expr],
    )?;
    parser.consume(TokenKind::Equal)?;
    let value = parse_expr(parser)?;

    Ok(AssignmentTail::Modifier {
        modifier_function,
        value,
    })
}

/// Parses `callee(args)`, `(expr)(args)` and chained calls like `f(1)(2)`.
pub fn parse_prefix_call_expr(parser: &mut Parser) -> Result<Node, Error> {
    let callee = parser.or(
        "callee",
        &[parse_grouping_expr, parse_symbol_expr, parse_assignment_expr],
    )?;

    let argument_lists = parser.many_required("arguments", parse_argument_list)?;

    Ok(argument_lists
        .into_iter()
        .fold(callee, |callee, arguments| {
            Node::FunctionCall(CallExpr {
                callee: Box::new(callee),
                arguments,
            })
        }))
}

fn parse_argument_list(parser: &mut Parser) -> Result<Vec<Node>, Error> {
    parser.consume(TokenKind::OpenParen)?;
    let arguments = parser.many_with_separator(
        "arguments",
        parse_expr,
        token_separator(TokenKind::Comma),
        false,
    )?;
    parser.consume(TokenKind::CloseParen)?;

    Ok(arguments)
}

pub fn parse_symbol_expr(parser: &mut Parser) -> Result<Node, Error> {
    let name = parser.consume(TokenKind::Word)?;
    Ok(Node::VariableReference(SymbolExpr { name }))
}

pub fn parse_literal_expr(parser: &mut Parser) -> Result<Node, Error> {
    parser.or(
        "literal",
        &[
            parse_string_expr,
            parse_number_expr,
            parse_array_expr,
            parse_dictionary_expr,
        ],
    )
}

pub fn parse_string_expr(parser: &mut Parser) -> Result<Node, Error> {
    let text = parser.consume(TokenKind::String)?;
    Ok(Node::String(StringExpr {
        value: strip_quotes(&text),
    }))
}

/// Drops the first and last character of a string token.
pub fn strip_quotes(text: &str) -> String {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    String::from(chars.as_str())
}

pub fn parse_number_expr(parser: &mut Parser) -> Result<Node, Error> {
    let position = parser.get_position();
    let text = parser.consume(TokenKind::Number)?;

    Ok(Node::Number(NumberExpr {
        value: parse_number_text(&text, position)?,
    }))
}

/// Parses number token text as a finite 64-bit float.
pub fn parse_number_text(text: &str, position: Position) -> Result<f64, Error> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::new(
            ErrorImpl::NumberParseError {
                token: String::from(text),
            },
            position,
        )),
    }
}

pub fn parse_array_expr(parser: &mut Parser) -> Result<Node, Error> {
    parser.consume(TokenKind::OpenBracket)?;
    let elements = parser.many_with_separator(
        "array",
        parse_expr,
        token_separator(TokenKind::Comma),
        false,
    )?;
    parser.consume(TokenKind::CloseBracket)?;

    Ok(Node::Array(ArrayExpr { elements }))
}

pub fn parse_dictionary_expr(parser: &mut Parser) -> Result<Node, Error> {
    parser.consume(TokenKind::OpenCurly)?;
    let entries = parser.many_with_separator(
        "dictionary",
        parse_dictionary_entry,
        token_separator(TokenKind::Semicolon),
        false,
    )?;
    parser.consume(TokenKind::CloseCurly)?;

    Ok(Node::Dictionary(DictionaryExpr { entries }))
}

fn parse_dictionary_entry(parser: &mut Parser) -> Result<(String, Node), Error> {
    let key = parser.consume(TokenKind::Word)?;
    parser.consume(TokenKind::Equal)?;
    let value = parse_expr(parser)?;

    Ok((key, value))
}
