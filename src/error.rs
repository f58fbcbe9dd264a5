use thiserror::Error;

use crate::{interpreter::EvalError, parser::ParseError};

/// Any failure of the tokenise, parse, interpret pipeline.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}
