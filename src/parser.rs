use thiserror::Error;

use crate::{
    ast::{BoxExpr, Expression},
    tokeniser::{Token, TokenKind},
};

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ParseError {
    #[error("unexpected token: expected {expected}, found {found}")]
    Expected { expected: TokenKind, found: Token },
    #[error("unexpected token: expected an expression, found {found}")]
    UnexpectedToken { found: Token },
    #[error("unrecognised character '{text}'")]
    UnknownCharacter { text: String },
    #[error("integer literal {text} does not fit in 64 bits")]
    IntegerOutOfRange { text: String },
    #[error("unexpected trailing input: {found}")]
    TrailingInput { found: Token },
    #[error("expressions nested more than {limit} deep")]
    TooDeep { limit: usize },
}

/// Deepest expression nesting accepted. Parsing, printing and evaluation all
/// recurse once per level, so this bounds their stack use.
pub const MAX_NESTING: usize = 256;

/// The tokens still to be consumed, front of the program on top of the stack.
struct TokenStack {
    tokens: Vec<Token>,
    depth: usize,
}

impl TokenStack {
    fn new(mut tokens: Vec<Token>) -> Self {
        tokens.reverse();
        Self { tokens, depth: 0 }
    }

    fn peek_kind(&self) -> TokenKind {
        self.tokens
            .last()
            .map_or(TokenKind::EndOfInput, |token| token.kind)
    }

    /// Remove the next token. Running off the end reads as `EndOfInput`.
    fn pop(&mut self) -> Token {
        self.tokens.pop().unwrap_or_else(Token::end_of_input)
    }

    /// Consume the next token, which must be of kind `expected`.
    fn expect(&mut self, expected: TokenKind) -> Result<Token, ParseError> {
        let token = self.pop();
        if token.kind == expected {
            Ok(token)
        } else {
            Err(mismatch(expected, token))
        }
    }

    /// Check the next token without consuming it.
    fn expect_next(&self, expected: TokenKind) -> Result<(), ParseError> {
        if self.peek_kind() == expected {
            Ok(())
        } else {
            let found = self.tokens.last().cloned().unwrap_or_else(Token::end_of_input);
            Err(mismatch(expected, found))
        }
    }
}

fn mismatch(expected: TokenKind, found: Token) -> ParseError {
    if found.kind == TokenKind::Unknown {
        ParseError::UnknownCharacter { text: found.text }
    } else {
        ParseError::Expected { expected, found }
    }
}

/// Parse a list of tokens and return an AST - a single expression.
///
/// The whole token list must be consumed: anything other than `EndOfInput`
/// after the root expression is an error.
pub fn parse(tokens: Vec<Token>) -> Result<BoxExpr, ParseError> {
    let mut tokens = TokenStack::new(tokens);
    let root = parse_expression(&mut tokens)?;

    let next = tokens.pop();
    match next.kind {
        TokenKind::EndOfInput => Ok(root),
        TokenKind::Unknown => Err(ParseError::UnknownCharacter { text: next.text }),
        _ => Err(ParseError::TrailingInput { found: next }),
    }
}

fn parse_expression(tokens: &mut TokenStack) -> Result<BoxExpr, ParseError> {
    if tokens.depth >= MAX_NESTING {
        return Err(ParseError::TooDeep { limit: MAX_NESTING });
    }
    tokens.depth += 1;
    let expr = parse_production(tokens)?;
    tokens.depth -= 1;
    Ok(expr)
}

fn parse_production(tokens: &mut TokenStack) -> Result<BoxExpr, ParseError> {
    let token = tokens.pop();

    match token.kind {
        TokenKind::Identifier => Ok(Box::new(Expression::Variable(token.text))),
        TokenKind::IntegerLiteral => match token.text.parse::<i64>() {
            Ok(value) => Ok(Expression::int(value)),
            Err(_) => Err(ParseError::IntegerOutOfRange { text: token.text }),
        },
        TokenKind::Minus => {
            tokens.expect(TokenKind::LeftParen)?;
            let first = parse_expression(tokens)?;
            tokens.expect(TokenKind::Comma)?;
            let second = parse_expression(tokens)?;
            tokens.expect(TokenKind::RightParen)?;
            Ok(Expression::minus(first, second))
        }
        TokenKind::IsZero => {
            tokens.expect(TokenKind::LeftParen)?;
            let value = parse_expression(tokens)?;
            tokens.expect(TokenKind::RightParen)?;
            Ok(Expression::is_zero(value))
        }
        TokenKind::If => {
            // iszero is the only operator producing a boolean.
            tokens.expect_next(TokenKind::IsZero)?;
            let predicate = parse_expression(tokens)?;
            tokens.expect(TokenKind::Then)?;
            let yes = parse_expression(tokens)?;
            tokens.expect(TokenKind::Else)?;
            let no = parse_expression(tokens)?;
            Ok(Expression::condition(predicate, yes, no))
        }
        TokenKind::Let => {
            let name = tokens.expect(TokenKind::Identifier)?.text;
            tokens.expect(TokenKind::Equals)?;
            let value = parse_expression(tokens)?;
            tokens.expect(TokenKind::In)?;
            let body = parse_expression(tokens)?;
            Ok(Expression::binding(name, value, body))
        }
        TokenKind::Unknown => Err(ParseError::UnknownCharacter { text: token.text }),
        TokenKind::LeftParen
        | TokenKind::RightParen
        | TokenKind::Comma
        | TokenKind::Equals
        | TokenKind::Then
        | TokenKind::Else
        | TokenKind::In
        | TokenKind::EndOfInput => Err(ParseError::UnexpectedToken { found: token }),
    }
}
