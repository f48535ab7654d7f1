//! Type annotation definitions for the AST.
//!
//! Each type form mirrors a value-level construct:
//!
//! - Array types list their element types like an array literal
//! - Function types list typed parameters followed by `=>` and a return type
//! - Dictionary types list `key: type` entries separated by `;`
//! - Number and string literal types are the literals themselves
//!
//! Union (`|`) and intersection (`&`) types combine the forms above, and
//! named references (optionally with generic arguments) point at type
//! definitions.

use super::{ast::TypeNode, expressions::VariableDeclaration};

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub elements: Vec<TypeNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub parameters: Vec<VariableDeclaration>,
    pub return_type: Box<TypeNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryType {
    pub entries: Vec<(String, TypeNode)>,
}

/// Represents a literal string type such as `"ok"`.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteralType {
    pub value: String,
}

/// Represents a literal number type such as `404`.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberLiteralType {
    pub value: f64,
}

/// `A | B | C`, at least two members.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionType {
    pub members: Vec<TypeNode>,
}

/// `A & B & C`, at least two members.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionType {
    pub members: Vec<TypeNode>,
}

/// Represents a named type, resolved later against the type definitions.
/// `Pair<Num, Str>` carries its generic arguments in order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceType {
    pub name: String,
    pub arguments: Vec<TypeNode>,
}
