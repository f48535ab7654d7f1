//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the backtracking recursive-descent parser that
//! transforms a token sequence into a `Program`. It handles:
//!
//! - Ordered-choice combinators with cursor snapshot/restore
//! - Expression parsing as a run of primary terms folded by operator
//!   precedence (binding power keyed on an operator's first character)
//! - Literals, assignments, function literals and calls
//! - Type annotations and type definitions
//!
//! Grammar rules are plain functions `fn(&mut Parser) -> Result<T, Error>`,
//! so they can be handed to the combinators as data.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
