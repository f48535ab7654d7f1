#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Byte offset into a source file, together with the file's name.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Tokenizes and parses `source` in one step.
pub fn parse_source(source: &str, file: Option<String>) -> Result<ast::statements::Program, Error> {
    let file_name = Rc::new(file.clone().unwrap_or_else(|| String::from("shell")));
    let tokens = lexer::lexer::tokenize(source, file)?;
    parser::parser::parse(tokens, file_name)
}

/// Finds the line containing byte offset `position`.
///
/// Returns the 1-based line number, the line's text, and the offset of
/// `position` within that line. An offset at the very end of the source maps
/// to the end of the last line.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((line_number, line.to_string(), pos - start));
        }

        start = end;
        line_number += 1;
    }

    // End of input: point just past the last character.
    let last = source.split_inclusive('\n').last().unwrap_or("");
    Some((line_number.saturating_sub(1).max(1), last.to_string(), last.len()))
}


/// Prints `error` with the offending source line and a caret under the
/// reported position.
pub fn display_error(error: &Error, source: &str, file: &str) {
    /*
        Error: UnexpectedTokenDetailed (Unexpected token: `)`, expected Word)
        -> main.wl
           |
        20 | add(2, )
           | -------^
    */

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}", error.get_error_name());
    } else {
        eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    eprintln!("-> {}", file);

    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_position().0)
    else {
        return;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    eprintln!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    eprintln!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += c.len_utf8();
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
