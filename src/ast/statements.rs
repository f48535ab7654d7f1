use std::slice::Iter;

use super::ast::{Stmt, TypeNode};

/// The parse result: top-level statements in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub body: Vec<Stmt>,
}

impl Program {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

/// `Name = Type`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinitionStmt {
    pub name: String,
    pub type_: TypeNode,
}

/// `Name<A, B> = Type`
#[derive(Debug, Clone, PartialEq)]
pub struct GenericTypeDefinitionStmt {
    pub name: String,
    pub parameters: Vec<String>,
    pub type_: TypeNode,
}
