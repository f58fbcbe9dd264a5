//! Lexer, recursive-descent parser and tree-walking interpreter for LET, a
//! small expression language of integers, `minus`, `iszero`, `if` and `let`.
//!
//! ```
//! assert_eq!(let_lang::run("let x = 10 in minus(x, 3)").unwrap(), "7");
//! ```

pub mod ast;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod tokeniser;

pub use error::Error;

/// Tokenise, parse and evaluate a program, returning the rendered result.
pub fn run(program_string: &str) -> Result<String, Error> {
    let tokens = tokeniser::tokenise(program_string);
    let expression = parser::parse(tokens)?;
    Ok(interpreter::evaluate(&expression)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{interpreter::EvalError, parser::ParseError, tokeniser::TokenKind};

    #[test]
    fn run_program() {
        assert_eq!(run("if iszero(minus(4, 4)) then 1 else 2"), Ok("1".to_string()));
    }

    #[test]
    fn run_reports_parse_errors() {
        assert!(matches!(
            run("minus(1, 2"),
            Err(Error::Parse(ParseError::Expected {
                expected: TokenKind::RightParen,
                ..
            }))
        ));
    }

    #[test]
    fn run_reports_eval_errors() {
        assert_eq!(
            run("let x = x in x"),
            Err(Error::Eval(EvalError::UnboundVariable {
                name: "x".to_string()
            }))
        );
    }
}
