#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod registry;
pub mod session;
pub mod type_checker;

extern crate regex;

/// A location inside a source file. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(line: u32, column: u32, file: Rc<String>) -> Self {
        Position { line, column, file }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start.clone(),
            end: other.end.clone(),
        }
    }
}

/// Returns the text of a 1-based line, without its line terminator.
pub fn get_line(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source
        .split('\n')
        .nth((line - 1) as usize)
        .map(|text| text.trim_end_matches('\r'))
}

/// Renders an error against the source it was reported in.
///
/// ```text
/// error[TypeChecker]: TypeMatchError (Expected type `num`, received `string`)
/// -> main.sc
///    |
/// 20 | num a = "x";
///    | --------^
/// ```
pub fn render_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    let mut output = String::new();
    if let ErrorTip::None = error.get_tip() {
        output.push_str(&format!(
            "error[{}]: {}\n",
            error.get_stage(),
            error.get_error_name()
        ));
    } else {
        output.push_str(&format!(
            "error[{}]: {} ({})\n",
            error.get_stage(),
            error.get_error_name(),
            error.get_tip()
        ));
    }
    output.push_str(&format!("-> {}\n", position.file));
    output.push_str(&format!("{:>padding$}\n", "|"));

    if let Some(line_text) = get_line(source, position.line) {
        let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
        output.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

        let column = position.column.max(1) as usize;
        let arrows = column.saturating_sub(removed_whitespace).max(1);
        output.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    }

    output
}

pub fn display_error(error: &Error, source: &str) {
    eprint!("{}", render_error(error, source));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::{
        errors::errors::{Error, ErrorImpl},
        Position,
    };

    #[test]
    fn test_get_line() {
        let source = "Hello, world!\nsecond\r\n\nTesting { }\n";
        assert_eq!(super::get_line(source, 1), Some("Hello, world!"));
        assert_eq!(super::get_line(source, 2), Some("second"));
        assert_eq!(super::get_line(source, 4), Some("Testing { }"));
        assert_eq!(super::get_line(source, 0), None);
        assert_eq!(super::get_line(source, 9), None);
    }

    #[test]
    fn test_render_error_points_at_column() {
        let source = "num a = 1;\n    string b = 2;\n";
        let error = Error::new(
            ErrorImpl::TypeMatchError {
                expected: "string".to_string(),
                received: "num".to_string(),
            },
            Position::new(2, 16, Rc::new("main.sc".to_string())),
        );

        let rendered = super::render_error(&error, source);
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[0].starts_with("error[TypeChecker]: TypeMatchError"));
        assert_eq!(lines[1], "-> main.sc");
        assert_eq!(lines[3], "2 | string b = 2;");
        assert_eq!(lines[4], "  | -----------^");
    }
}
