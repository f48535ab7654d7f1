use std::fmt::{Display, Formatter, Result};

use super::{
    expressions::{
        ArrayExpr, AssignmentExpr, CallExpr, DictionaryExpr, FunctionLiteralExpr,
        ModifierAssignmentExpr, NumberExpr, StringExpr, SymbolExpr, VariableDeclaration,
    },
    statements::{GenericTypeDefinitionStmt, TypeDefinitionStmt},
    types::{
        ArrayType, DictionaryType, FunctionType, IntersectionType, NumberLiteralType,
        ReferenceType, StringLiteralType, UnionType,
    },
};

/// Expression node.
///
/// Every value-level construct of the language is one of these variants.
/// Binary operators do not get their own variant: `a + b` is a
/// `FunctionCall` whose callee is the `+` reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    FunctionLiteral(FunctionLiteralExpr),
    Assignment(AssignmentExpr),
    ModifierAssignment(ModifierAssignmentExpr),
    VariableDeclaration(VariableDeclaration),
    VariableReference(SymbolExpr),
    FunctionCall(CallExpr),
    String(StringExpr),
    Number(NumberExpr),
    Array(ArrayExpr),
    Dictionary(DictionaryExpr),
}

impl Node {
    /// The referenced name, if this node is a bare variable reference.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Node::VariableReference(symbol) => Some(&symbol.name),
            _ => None,
        }
    }
}

/// Type annotation node, mirroring the value-level literals.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    Array(ArrayType),
    Function(FunctionType),
    Dictionary(DictionaryType),
    String(StringLiteralType),
    Number(NumberLiteralType),
    Union(UnionType),
    Intersection(IntersectionType),
    Reference(ReferenceType),
}

/// Top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(Node),
    TypeDefinition(TypeDefinitionStmt),
    GenericTypeDefinition(GenericTypeDefinitionStmt),
}

fn write_separated<T: Display>(f: &mut Formatter<'_>, items: &[T], separator: &str) -> Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            write!(f, "{}", separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl Display for VariableDeclaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match &self.type_annotation {
            Some(type_) => write!(f, "{}: {}", self.name, type_),
            None => write!(f, "{}", self.name),
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Node::FunctionLiteral(function) => {
                write!(f, "(fn (")?;
                write_separated(f, &function.parameters, ", ")?;
                write!(f, ") {})", function.body)
            }
            Node::Assignment(assignment) => {
                write!(f, "(= {} {})", assignment.target, assignment.value)
            }
            Node::ModifierAssignment(assignment) => write!(
                f,
                "({}= {} {})",
                assignment.modifier_function, assignment.target, assignment.value
            ),
            Node::VariableDeclaration(declaration) => write!(f, "{}", declaration),
            Node::VariableReference(symbol) => write!(f, "{}", symbol.name),
            Node::FunctionCall(call) => {
                write!(f, "({}", call.callee)?;
                for argument in &call.arguments {
                    write!(f, " {}", argument)?;
                }
                write!(f, ")")
            }
            Node::String(string) => write!(f, "\"{}\"", string.value),
            Node::Number(number) => write!(f, "{}", number.value),
            Node::Array(array) => {
                write!(f, "[")?;
                write_separated(f, &array.elements, ", ")?;
                write!(f, "]")
            }
            Node::Dictionary(dictionary) => {
                write!(f, "{{")?;
                for (index, (key, value)) in dictionary.entries.iter().enumerate() {
                    if index > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{} = {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Display for TypeNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            TypeNode::Array(array) => {
                write!(f, "[")?;
                write_separated(f, &array.elements, ", ")?;
                write!(f, "]")
            }
            TypeNode::Function(function) => {
                write!(f, "((")?;
                write_separated(f, &function.parameters, ", ")?;
                write!(f, ") => {})", function.return_type)
            }
            TypeNode::Dictionary(dictionary) => {
                write!(f, "{{")?;
                for (index, (key, value)) in dictionary.entries.iter().enumerate() {
                    if index > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            TypeNode::String(string) => write!(f, "\"{}\"", string.value),
            TypeNode::Number(number) => write!(f, "{}", number.value),
            TypeNode::Union(union) => {
                write!(f, "(")?;
                write_separated(f, &union.members, " | ")?;
                write!(f, ")")
            }
            TypeNode::Intersection(intersection) => {
                write!(f, "(")?;
                write_separated(f, &intersection.members, " & ")?;
                write!(f, ")")
            }
            TypeNode::Reference(reference) => {
                write!(f, "{}", reference.name)?;
                if !reference.arguments.is_empty() {
                    write!(f, "<")?;
                    write_separated(f, &reference.arguments, ", ")?;
                    write!(f, ">")?;
                }
                Ok(())
            }
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Stmt::Expression(node) => write!(f, "{}", node),
            Stmt::TypeDefinition(definition) => {
                write!(f, "(type {} {})", definition.name, definition.type_)
            }
            Stmt::GenericTypeDefinition(definition) => {
                write!(f, "(type {}<", definition.name)?;
                write_separated(f, &definition.parameters, ", ")?;
                write!(f, "> {})", definition.type_)
            }
        }
    }
}
