//! This lexer tokenizes a single line of source.
use regex::Regex;

use super::config::Limits;
use super::diagnostics::Diagnostics;
use super::error::{Error, Mnemonic};

/// Fields starting with a digit, or a minus sign directly followed by one.
const NUMBER_PATTERN: &str = r"^-?[0-9]";

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TokenKind {
    Label,
    Mov,
    Add,
    Sub,
    Jmp,
    Register,
    Number,
    Invalid,
    EndOfInput,
}

impl TokenKind {
    /// The instruction this token starts, if it starts one.
    pub fn mnemonic(&self) -> Option<Mnemonic> {
        match self {
            TokenKind::Mov => Some(Mnemonic::Mov),
            TokenKind::Add => Some(Mnemonic::Add),
            TokenKind::Sub => Some(Mnemonic::Sub),
            TokenKind::Jmp => Some(Mnemonic::Jmp),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: &str) -> Self {
        Token { kind, text: text.to_owned() }
    }

    /// The terminal marker closing every line's token sequence.
    pub fn end() -> Self {
        Token { kind: TokenKind::EndOfInput, text: String::new() }
    }
}

pub struct Lexer {
    limits: Limits,
    number: Regex,
}

impl Lexer {
    pub fn new(limits: Limits) -> Self {
        Lexer {
            limits,
            number: Regex::new(NUMBER_PATTERN).expect("number pattern is a valid regex"),
        }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Splits `line` on whitespace and classifies every field.
    /// The returned sequence always ends with an `EndOfInput` token.
    /// Unclassifiable fields are reported to `sink` and kept as `Invalid`.
    pub fn tokenize(&self, line: &str, sink: &mut dyn Diagnostics) -> Result<Vec<Token>, Error> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() > self.limits.max_fields() {
            return Err(Error::CapacityExceeded {
                fields: fields.len(),
                max: self.limits.max_fields(),
            });
        }

        let mut tokens: Vec<Token> = Vec::with_capacity(fields.len() + 1);
        for (position, field) in fields.into_iter().enumerate() {
            let kind = self.classify(field);
            let text = truncate(field, self.limits.max_token_length);
            if kind == TokenKind::Invalid {
                sink.report(Error::InvalidToken { text: text.to_owned(), position }.to_string());
            }
            trace!("field {}: {:?} `{}`", position, kind, text);
            tokens.push(Token::new(kind, text));
        }
        tokens.push(Token::end());

        Ok(tokens)
    }

    /// First matching rule wins.
    fn classify(&self, field: &str) -> TokenKind {
        if let Some(kind) = tokenize_op(field) {
            return kind;
        }
        if field.contains(':') {
            return TokenKind::Label;
        }
        if field.starts_with('R') {
            return TokenKind::Register;
        }
        if self.number.is_match(field) {
            return TokenKind::Number;
        }
        TokenKind::Invalid
    }
}

fn tokenize_op(field: &str) -> Option<TokenKind> {
    match field {
        "MOV" => Some(TokenKind::Mov),
        "ADD" => Some(TokenKind::Add),
        "SUB" => Some(TokenKind::Sub),
        "JMP" => Some(TokenKind::Jmp),
        _ => None,
    }
}

/// Cuts `field` down to at most `max` characters on a char boundary.
fn truncate(field: &str, max: usize) -> &str {
    match field.char_indices().nth(max) {
        Some((idx, _)) => &field[..idx],
        None => field,
    }
}
