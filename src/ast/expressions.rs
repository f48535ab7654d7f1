use super::ast::{Node, TypeNode};

// LITERALS

/// Number Expression
/// Represents a numeric literal in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberExpr {
    pub value: f64,
}

/// String Expression
/// Represents a string literal in the AST, without its surrounding quotes.
/// Escape sequences are kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct StringExpr {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpr {
    pub elements: Vec<Node>,
}

/// Dictionary Expression
/// Entries keep source order. Duplicate keys are all kept.
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryExpr {
    pub entries: Vec<(String, Node)>,
}

// NAMES

/// Symbol Expression
/// Represents a bare word in the AST. This includes operator symbols such as
/// `+`, which become the callee of a binary call.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub name: String,
}

/// A name with an optional type annotation, as written on the left of `=`
/// or in a parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub name: String,
    pub type_annotation: Option<TypeNode>,
}

// COMPOUND

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub target: VariableDeclaration,
    pub value: Box<Node>,
}

/// Modifier Assignment Expression
/// `x incr= 1`: the modifier function sits between the target and `=`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifierAssignmentExpr {
    pub target: VariableDeclaration,
    pub modifier_function: Box<Node>,
    pub value: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteralExpr {
    pub parameters: Vec<VariableDeclaration>,
    pub body: Box<Node>,
}

/// Call Expression
/// Produced both by explicit `callee(args)` calls and by infix operators,
/// in which case `arguments` is `[left, right]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Node>,
    pub arguments: Vec<Node>,
}
