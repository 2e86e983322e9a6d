mod parser;
mod parser_error;
mod scanner;

pub use crate::parser::*;
pub use crate::scanner::{Scanner, Token, TokenType};

use ast::{Node, Program};
pub use parser_error::*;

/**
 * Parse the input string and returns a tuple with the program and errors.
 * The program may be incomplete when there are parser errors
 */
pub fn parse(source: &str) -> (Program, Vec<ParserError>) {
    let scanner = Scanner::new(source);
    let mut parser = Parser::new(scanner);
    parser.parse()
}

/// Parses a lone SassScript expression, e.g. for `sassy eval`.
pub fn parse_expression(source: &str) -> Result<Box<dyn Node>, ParserError> {
    let scanner = Scanner::new(source);
    let mut parser = Parser::new(scanner);
    parser.parse_expression()
}

/**
 * Parse the input and returns a complete program
 * Function will panic if there are any parser errors
 */
pub fn parse_panic(source: &str) -> Program {
    let (program, errors) = parse(source);

    if errors.is_empty() {
        return program;
    }

    println!(
        "Errors found while parsing the source, found {} errors",
        errors.len()
    );

    for e in errors {
        println!("{e:#?}");
    }

    panic!("parsed with errors");
}
