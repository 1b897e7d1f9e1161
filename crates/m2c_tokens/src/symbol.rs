use crate::token::Token;
use m2c_source::Position;
use std::fmt::{Display, Formatter};

/// A token together with where it starts and, for tokens whose text matters, its lexeme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub token: Token,
    pub position: Position,
    pub lexeme: Option<String>,
}

impl Symbol {
    /// Creates a new symbol
    pub fn new(token: Token, position: Position, lexeme: impl Into<Option<String>>) -> Self {
        Self {
            token,
            position,
            lexeme: lexeme.into(),
        }
    }

    /// The end of file symbol at `position`
    pub fn end_of_file(position: Position) -> Self {
        Self::new(Token::EndOfFile, position, None)
    }

    pub fn lexeme(&self) -> Option<&str> {
        self.lexeme.as_deref()
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.lexeme {
            Some(lexeme) => write!(f, "{} {lexeme:?}", self.token),
            None => write!(f, "{}", self.token),
        }
    }
}
