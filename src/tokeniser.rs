use std::{collections::HashMap, fmt::Display};

use lazy_static::lazy_static;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum TokenKind {
    Identifier,
    IntegerLiteral,
    LeftParen,
    RightParen,
    Comma,
    Equals,
    Minus,
    IsZero,
    If,
    Then,
    Else,
    Let,
    In,
    EndOfInput,
    Unknown,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A lexeme together with the kind it was classified as.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn end_of_input() -> Self {
        Self::new(TokenKind::EndOfInput, "")
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::EndOfInput => write!(f, "EndOfInput"),
            kind => write!(f, "{kind} '{}'", self.text),
        }
    }
}

lazy_static! {
    /// Words that are reserved and never lexed as identifiers.
    static ref KEYWORDS: HashMap<&'static str, TokenKind> = HashMap::from([
        ("minus", TokenKind::Minus),
        ("iszero", TokenKind::IsZero),
        ("if", TokenKind::If),
        ("then", TokenKind::Then),
        ("else", TokenKind::Else),
        ("let", TokenKind::Let),
        ("in", TokenKind::In),
    ]);
}

enum CharClass {
    Digit,
    Letter,
    Whitespace,
    Other,
}

impl From<char> for CharClass {
    fn from(character: char) -> Self {
        if character.is_ascii_digit() {
            Self::Digit
        } else if character.is_alphabetic() {
            Self::Letter
        } else if character.is_whitespace() {
            Self::Whitespace
        } else {
            Self::Other
        }
    }
}

#[derive(PartialEq)]
enum BufferedType {
    Number,
    Word,
}

/// Turn the contents of the character buffer into a token, if there is one.
/// Leaves the buffer empty and the buffered type reset to None.
fn flush_char_buf(
    buf_type: &mut Option<BufferedType>,
    char_buf: &mut String,
    tokens: &mut Vec<Token>,
) {
    match buf_type.take() {
        Some(BufferedType::Number) => {
            tokens.push(Token::new(TokenKind::IntegerLiteral, char_buf.as_str()));
        }
        Some(BufferedType::Word) => {
            let kind = KEYWORDS
                .get(char_buf.as_str())
                .copied()
                .unwrap_or(TokenKind::Identifier);
            tokens.push(Token::new(kind, char_buf.as_str()));
        }
        None => {}
    }
    char_buf.clear();
}

/// Buffer `character` as part of a run of `run_type`, flushing any run of a different type first.
fn extend_run(
    run_type: BufferedType,
    character: char,
    buf_type: &mut Option<BufferedType>,
    char_buf: &mut String,
    tokens: &mut Vec<Token>,
) {
    if buf_type.as_ref().is_some_and(|buffered| *buffered != run_type) {
        flush_char_buf(buf_type, char_buf, tokens);
    }
    *buf_type = Some(run_type);
    char_buf.push(character);
}

fn punctuation(character: char) -> TokenKind {
    match character {
        '(' => TokenKind::LeftParen,
        ')' => TokenKind::RightParen,
        ',' => TokenKind::Comma,
        '=' => TokenKind::Equals,
        _ => TokenKind::Unknown,
    }
}

/// Tokenise a program string. Always terminated by an `EndOfInput` token.
///
/// Characters that match no rule become `Unknown` tokens rather than errors;
/// the parser is responsible for rejecting them.
pub fn tokenise(program_string: &str) -> Vec<Token> {
    let mut char_buf = String::new();
    let mut buf_type: Option<BufferedType> = None;
    let mut tokens = Vec::new();

    for character in program_string.chars() {
        match CharClass::from(character) {
            CharClass::Digit => extend_run(
                BufferedType::Number,
                character,
                &mut buf_type,
                &mut char_buf,
                &mut tokens,
            ),
            CharClass::Letter => extend_run(
                BufferedType::Word,
                character,
                &mut buf_type,
                &mut char_buf,
                &mut tokens,
            ),
            CharClass::Whitespace => flush_char_buf(&mut buf_type, &mut char_buf, &mut tokens),
            CharClass::Other => {
                flush_char_buf(&mut buf_type, &mut char_buf, &mut tokens);
                tokens.push(Token::new(punctuation(character), character));
            }
        }
    }

    flush_char_buf(&mut buf_type, &mut char_buf, &mut tokens);
    tokens.push(Token::end_of_input());

    tokens
}
