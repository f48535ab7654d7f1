//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a flat sequence of tokens for parsing. It handles:
//!
//! - Tokenization using an ordered table of anchored regex patterns
//! - Identifiers and operator symbols, both lexed as `Word` tokens
//! - Token span tracking for error reporting
//! - Whitespace and `#` line comments, which are dropped

pub mod lexer;
pub mod tokens;
