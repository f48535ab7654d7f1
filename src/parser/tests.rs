//! Unit tests for the parser module.
//!
//! This module contains tests for:
//! - The backtracking combinators and cursor restoration
//! - Operator precedence and associativity
//! - Literals, assignments, function literals and calls
//! - Type annotations and type definitions
//! - Failure cases

use std::rc::Rc;

use crate::{
    ast::{
        ast::{Node, Stmt, TypeNode},
        expressions::{CallExpr, NumberExpr, SymbolExpr},
        statements::Program,
        types::ReferenceType,
    },
    errors::errors::{Error, ErrorImpl, ErrorPhase},
    lexer::lexer::tokenize,
};

use super::{
    expr::{parse_grouping_expr, parse_function_literal_expr, parse_number_expr, parse_string_expr},
    lookups::{binding_power, BindingPower},
    parser::{parse, token_separator, Parser},
};

fn parse_str(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source, Some("test.wl".to_string())).unwrap();
    parse(tokens, Rc::new("test.wl".to_string()))
}

fn render(source: &str) -> Vec<String> {
    parse_str(source)
        .unwrap()
        .iter()
        .map(|stmt| stmt.to_string())
        .collect()
}

fn parser_for(source: &str) -> Parser {
    let tokens = tokenize(source, Some("test.wl".to_string())).unwrap();
    Parser::new(tokens, Rc::new("test.wl".to_string()))
}

fn number(value: f64) -> Node {
    Node::Number(NumberExpr { value })
}

fn symbol(name: &str) -> Node {
    Node::VariableReference(SymbolExpr {
        name: name.to_string(),
    })
}

fn call(callee: Node, arguments: Vec<Node>) -> Node {
    Node::FunctionCall(CallExpr {
        callee: Box::new(callee),
        arguments,
    })
}

// COMBINATORS

#[test]
fn test_or_restores_cursor_when_every_rule_fails() {
    let mut parser = parser_for("foo bar");
    let before = parser.snapshot();

    let result = parser.or("literal", &[parse_number_expr, parse_string_expr]);

    assert!(result.is_err());
    assert_eq!(parser.snapshot(), before);
}

#[test]
fn test_or_restores_partial_consumption() {
    // Both rules consume `(` before failing further in.
    let mut parser = parser_for("(1, 2");
    let before = parser.snapshot();

    let result = parser.or("primary", &[parse_grouping_expr, parse_function_literal_expr]);

    assert!(matches!(
        result.unwrap_err().get_internal_error(),
        ErrorImpl::NoRuleMatched { rule: "primary" }
    ));
    assert_eq!(parser.snapshot(), before);
    assert_eq!(parser.current_token().unwrap().value, "(");
}

#[test]
fn test_or_takes_first_success() {
    let mut parser = parser_for("(1)");
    let result = parser
        .or("primary", &[parse_function_literal_expr, parse_grouping_expr])
        .unwrap();

    assert_eq!(result, number(1.0));
    assert!(!parser.has_tokens());
}

#[test]
fn test_optional_rewinds_on_failure() {
    let mut parser = parser_for("(1");
    assert!(parser.optional(parse_grouping_expr).is_none());
    assert_eq!(parser.snapshot(), 0);
}

#[test]
fn test_many_stops_at_first_failure() {
    let mut parser = parser_for("1 2 x");
    let numbers = parser.many(parse_number_expr);

    assert_eq!(numbers, vec![number(1.0), number(2.0)]);
    assert_eq!(parser.snapshot(), 2);
}

#[test]
fn test_many_required_rejects_zero_matches() {
    let mut parser = parser_for("x");
    assert!(parser.many_required("numbers", parse_number_expr).is_err());
    assert_eq!(parser.snapshot(), 0);
}

#[test]
fn test_many_with_separator_accepts_leading_separator() {
    let mut parser = parser_for(", 1, 2");
    let numbers = parser
        .many_with_separator("numbers", parse_number_expr, token_separator(crate::lexer::tokens::TokenKind::Comma), false)
        .unwrap();

    assert_eq!(numbers, vec![number(1.0), number(2.0)]);
}

#[test]
fn test_many_with_separator_leaves_dangling_separator() {
    let mut parser = parser_for("1, 2,");
    let numbers = parser
        .many_with_separator("numbers", parse_number_expr, token_separator(crate::lexer::tokens::TokenKind::Comma), true)
        .unwrap();

    assert_eq!(numbers.len(), 2);
    assert_eq!(parser.current_token().unwrap().value, ",");
}

// PRECEDENCE

#[test]
fn test_binding_power_uses_first_character() {
    assert_eq!(binding_power(&symbol("^")), BindingPower::Exponent);
    assert_eq!(binding_power(&symbol("**")), BindingPower::Multiplicative);
    assert_eq!(binding_power(&symbol("%")), BindingPower::Multiplicative);
    assert_eq!(binding_power(&symbol("+")), BindingPower::Additive);
    assert_eq!(binding_power(&symbol("->")), BindingPower::Additive);
    assert_eq!(binding_power(&symbol("<>")), BindingPower::Relational);
    assert_eq!(binding_power(&symbol("!")), BindingPower::Equality);
    assert_eq!(binding_power(&symbol("add")), BindingPower::Default);
    assert_eq!(binding_power(&symbol("$+")), BindingPower::Default);
    assert_eq!(binding_power(&number(1.0)), BindingPower::Default);
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let program = parse_str("2 + 3 * 4").unwrap();

    assert_eq!(
        program.body,
        vec![Stmt::Expression(call(
            symbol("+"),
            vec![number(2.0), call(symbol("*"), vec![number(3.0), number(4.0)])]
        ))]
    );
}

#[test]
fn test_subtraction_is_left_associative() {
    let program = parse_str("a - b - c").unwrap();

    assert_eq!(
        program.body,
        vec![Stmt::Expression(call(
            symbol("-"),
            vec![call(symbol("-"), vec![symbol("a"), symbol("b")]), symbol("c")]
        ))]
    );
}

#[test]
fn test_precedence_levels() {
    assert_eq!(render("2 ^ 3 * 4"), vec!["(* (^ 2 3) 4)"]);
    assert_eq!(render("1 < 2 + 3"), vec!["(< 1 (+ 2 3))"]);
    assert_eq!(render("a ! b < c"), vec!["(! a (< b c))"]);
    assert_eq!(render("1 * 2 + 3 * 4"), vec!["(+ (* 1 2) (* 3 4))"]);
}

#[test]
fn test_word_operators_bind_loosest() {
    assert_eq!(render("2 add 3"), vec!["(add 2 3)"]);
    assert_eq!(render("2 add 3 * 4"), vec!["(add 2 (* 3 4))"]);
    assert_eq!(render("1 * 2 add 3"), vec!["(add (* 1 2) 3)"]);
    assert_eq!(render("a max b max c"), vec!["(max (max a b) c)"]);
}

#[test]
fn test_parenthesized_grouping() {
    assert_eq!(render("(1 + 2) * 3"), vec!["(* (+ 1 2) 3)"]);
    assert_eq!(render("((4))"), vec!["4"]);
}

#[test]
fn test_even_term_count_is_an_error() {
    let error = parse_str("2 +").unwrap_err();
    assert_eq!(error.get_phase(), ErrorPhase::Parse);

    assert!(parse_str("1 2").is_err());
}

// LITERALS

#[test]
fn test_number_literal() {
    assert_eq!(parse_str("42").unwrap().body, vec![Stmt::Expression(number(42.0))]);
    assert_eq!(parse_str("3.25").unwrap().body, vec![Stmt::Expression(number(3.25))]);
    assert_eq!(parse_str("7.").unwrap().body, vec![Stmt::Expression(number(7.0))]);
}

#[test]
fn test_number_out_of_range_is_an_error() {
    let source = format!("1{}", "0".repeat(400));
    assert!(parse_str(&source).is_err());
}

#[test]
fn test_string_literal_strips_quotes_only() {
    let program = parse_str(r#""say \"hi\"""#).unwrap();

    match &program.body[0] {
        Stmt::Expression(Node::String(string)) => assert_eq!(string.value, r#"say \"hi\""#),
        other => panic!("expected string, got {:?}", other),
    }
}

#[test]
fn test_array_literal() {
    let program = parse_str("[1, 2, 3]").unwrap();

    match &program.body[0] {
        Stmt::Expression(Node::Array(array)) => {
            assert_eq!(array.elements, vec![number(1.0), number(2.0), number(3.0)]);
        }
        other => panic!("expected array, got {:?}", other),
    }

    assert_eq!(render("[]"), vec!["[]"]);
    assert_eq!(render("[1 + 2, [x]]"), vec!["[(+ 1 2), [x]]"]);
}

#[test]
fn test_dictionary_literal() {
    let program = parse_str("{x = 1; y = 2}").unwrap();

    match &program.body[0] {
        Stmt::Expression(Node::Dictionary(dictionary)) => {
            assert_eq!(
                dictionary.entries,
                vec![("x".to_string(), number(1.0)), ("y".to_string(), number(2.0))]
            );
        }
        other => panic!("expected dictionary, got {:?}", other),
    }
}

#[test]
fn test_dictionary_keeps_duplicate_keys() {
    assert_eq!(render("{x = 1; x = 2}"), vec!["{x = 1; x = 2}"]);
    assert_eq!(render("{}"), vec!["{}"]);
}

// ASSIGNMENTS, FUNCTIONS, CALLS

#[test]
fn test_function_literal_assignment_and_call() {
    assert_eq!(
        render("add = (a, b) => a + b; add(2, 4)"),
        vec!["(= add (fn (a, b) (+ a b)))", "(add 2 4)"]
    );
}

#[test]
fn test_assignment_structure() {
    let program = parse_str("x = 1 + 2").unwrap();

    match &program.body[0] {
        Stmt::Expression(Node::Assignment(assignment)) => {
            assert_eq!(assignment.target.name, "x");
            assert!(assignment.target.type_annotation.is_none());
            assert_eq!(
                *assignment.value,
                call(symbol("+"), vec![number(1.0), number(2.0)])
            );
        }
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn test_typed_assignment() {
    let program = parse_str("$x: Num = 5").unwrap();

    match &program.body[0] {
        Stmt::Expression(Node::Assignment(assignment)) => {
            assert_eq!(assignment.target.name, "$x");
            assert_eq!(
                assignment.target.type_annotation,
                Some(TypeNode::Reference(ReferenceType {
                    name: "Num".to_string(),
                    arguments: vec![],
                }))
            );
        }
        other => panic!("expected assignment, got {:?}", other),
    }

    assert_eq!(render("x: Box<Num> = 1"), vec!["(= x: Box<Num> 1)"]);
}

#[test]
fn test_modifier_assignment() {
    let program = parse_str("x incr= 1").unwrap();

    match &program.body[0] {
        Stmt::Expression(Node::ModifierAssignment(assignment)) => {
            assert_eq!(assignment.target.name, "x");
            assert_eq!(*assignment.modifier_function, symbol("incr"));
            assert_eq!(*assignment.value, number(1.0));
        }
        other => panic!("expected modifier assignment, got {:?}", other),
    }

    assert_eq!(render("total + = 2 * 3"), vec!["(+= total (* 2 3))"]);
}

#[test]
fn test_function_literals() {
    assert_eq!(render("() => 1"), vec!["(fn () 1)"]);
    assert_eq!(
        render("(a: Num, b: Str) => a"),
        vec!["(fn (a: Num, b: Str) a)"]
    );
    assert_eq!(
        render("compose = (f, g) => (x) => f(g(x))"),
        vec!["(= compose (fn (f, g) (fn (x) (f (g x)))))"]
    );
}

#[test]
fn test_calls() {
    assert_eq!(render("f()"), vec!["(f)"]);
    assert_eq!(render("max(1 + 2, 3)"), vec!["(max (+ 1 2) 3)"]);
    assert_eq!(render("f(1)(2)"), vec!["((f 1) 2)"]);
    assert_eq!(render("f(1) + g(2)"), vec!["(+ (f 1) (g 2))"]);
}

#[test]
fn test_grouping_shadows_call_on_parenthesized_callee() {
    // `(f)` is taken as a grouping, leaving the two-term run `f 1`.
    assert!(parse_str("(f)(1)").is_err());
    assert_eq!(render("f(1)"), vec!["(f 1)"]);
}

#[test]
fn test_unclosed_call_is_an_error() {
    assert!(parse_str("f(1, 2").is_err());
}

// STATEMENTS

#[test]
fn test_empty_program() {
    assert!(parse_str("").unwrap().body.is_empty());
    assert!(parse_str(";;").unwrap().body.is_empty());
}

#[test]
fn test_leading_and_trailing_semicolons() {
    assert_eq!(render("; 1; 2;"), vec!["1", "2"]);
}

#[test]
fn test_empty_statement_between_separators_is_an_error() {
    assert_eq!(render("2;3"), vec!["2", "3"]);
    assert!(parse_str("2;;3").is_err());
}

#[test]
fn test_statements_need_separators() {
    // Without `;` the two calls form one run of two terms.
    assert!(parse_str("f(1) g(2)").is_err());
}

#[test]
fn test_type_definition() {
    assert_eq!(
        render("Point = {x: Num; y: Num}"),
        vec!["(type Point {x: Num; y: Num})"]
    );
    assert_eq!(render("Pair<A, B> = [A, B]"), vec!["(type Pair<A, B> [A, B])"]);
}

#[test]
fn test_expression_wins_over_type_definition() {
    // Both right-hand sides are valid expressions, so both are assignments.
    let program = parse_str("Id = Num; Name = \"a\" | \"b\"").unwrap();
    assert!(matches!(program.body[0], Stmt::Expression(Node::Assignment(_))));
    assert!(matches!(program.body[1], Stmt::Expression(Node::Assignment(_))));

    let program = parse_str("Point = {x: Num}").unwrap();
    match &program.body[0] {
        Stmt::TypeDefinition(definition) => {
            assert_eq!(definition.name, "Point");
            assert!(matches!(definition.type_, TypeNode::Dictionary(_)));
        }
        other => panic!("expected type definition, got {:?}", other),
    }
}

#[test]
fn test_generic_type_definition_structure() {
    let program = parse_str("Map<K, V> = [[K, V]]").unwrap();

    match &program.body[0] {
        Stmt::GenericTypeDefinition(definition) => {
            assert_eq!(definition.name, "Map");
            assert_eq!(definition.parameters, vec!["K".to_string(), "V".to_string()]);
            assert!(matches!(definition.type_, TypeNode::Array(_)));
        }
        other => panic!("expected generic type definition, got {:?}", other),
    }
}

#[test]
fn test_single_parameter_generic_type_definition() {
    let program = parse_str("Vec<T> = [T]").unwrap();

    match &program.body[0] {
        Stmt::GenericTypeDefinition(definition) => {
            assert_eq!(definition.name, "Vec");
            assert_eq!(definition.parameters, vec!["T".to_string()]);
        }
        other => panic!("expected generic type definition, got {:?}", other),
    }

    assert_eq!(
        render("Box<T> = {value: T}; a < b"),
        vec!["(type Box<T> {value: T})", "(< a b)"]
    );
}

#[test]
fn test_union_and_intersection_types() {
    assert_eq!(render("x: A | B & C = 1"), vec!["(= x: (A | (B & C)) 1)"]);
    assert_eq!(render("x: (A | B) & C = 1"), vec!["(= x: ((A | B) & C) 1)"]);
    assert_eq!(
        render("f: (a: Num) => Num | Str = g"),
        vec!["(= f: ((a: Num) => (Num | Str)) g)"]
    );
    assert_eq!(
        render("Status = {code: 200 | 404; text: \"ok\"}"),
        vec!["(type Status {code: (200 | 404); text: \"ok\"})"]
    );
}

#[test]
fn test_array_type_annotation() {
    assert_eq!(
        render("xs: [Num, Str] = [1, \"a\"]"),
        vec!["(= xs: [Num, Str] [1, \"a\"])"]
    );
}

#[test]
fn test_mixed_program() {
    let source = "
        Vec<T> = [T];
        $add = ($a: Num, $b: Num) => $a + $b;
        2 add 3; # this comment is rad!
        add(2, 4)
    ";

    assert_eq!(
        render(source),
        vec![
            "(type Vec<T> [T])",
            "(= $add (fn ($a: Num, $b: Num) (+ $a $b)))",
            "(add 2 3)",
            "(add 2 4)",
        ]
    );
}

// ERRORS

#[test]
fn test_trailing_tokens_are_an_error() {
    assert!(parse_str("1 )").is_err());
    assert!(parse_str("x = 1 2").is_err());
}

#[test]
fn test_error_points_at_furthest_failure() {
    let error = parse_str("add(2, )").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_position().0, 7);
    match error.get_internal_error() {
        ErrorImpl::UnexpectedTokenDetailed { token, .. } => assert_eq!(token, ")"),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_error_at_end_of_input() {
    let error = parse_str("f(1,").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedEndOfInput");
    assert_eq!(error.get_position().0, 4);

    let error = parse_str("x =").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedEndOfInput");
    assert_eq!(error.get_position().0, 3);
}
