use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{ast::ast::Node, errors::errors::Error};

use super::parser::Parser;

/// Operator precedence, lowest first.
///
/// Any word can be used as an infix operator; only its first character
/// decides how tightly it binds.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Exponent,
}

/// A grammar rule, passed around as data to `Parser::or`.
pub type Rule<T> = fn(&mut Parser) -> Result<T, Error>;

lazy_static! {
    pub static ref OPERATOR_LOOKUP: HashMap<char, BindingPower> = {
        let mut map = HashMap::new();
        map.insert('^', BindingPower::Exponent);

        map.insert('*', BindingPower::Multiplicative);
        map.insert('%', BindingPower::Multiplicative);
        map.insert('/', BindingPower::Multiplicative);

        map.insert('+', BindingPower::Additive);
        map.insert('-', BindingPower::Additive);

        map.insert('>', BindingPower::Relational);
        map.insert('<', BindingPower::Relational);

        map.insert('=', BindingPower::Equality);
        map.insert('!', BindingPower::Equality);
        map
    };
}

/// Binding power of `node` in operator position.
///
/// Only variable references act as operators; every other node, and any
/// word whose first character is not in the table, gets `Default`.
pub fn binding_power(node: &Node) -> BindingPower {
    node.as_symbol()
        .and_then(|name| name.chars().next())
        .and_then(|first| OPERATOR_LOOKUP.get(&first).copied())
        .unwrap_or(BindingPower::Default)
}
