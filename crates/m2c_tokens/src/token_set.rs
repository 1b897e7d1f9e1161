use crate::token::Token;
use itertools::Itertools;
use std::fmt::{Debug, Display, Formatter};
use strum::IntoEnumIterator;

/// An immutable set of tokens, stored as one bit per token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TokenSet {
    bits: u128,
    count: u8,
}

impl TokenSet {
    /// The set with no tokens
    pub const EMPTY: TokenSet = TokenSet { bits: 0, count: 0 };

    const fn from_bits(bits: u128) -> Self {
        Self {
            bits,
            count: bits.count_ones() as u8,
        }
    }

    /// Creates a set containing exactly `tokens`
    pub const fn of(tokens: &[Token]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < tokens.len() {
            bits |= 1u128 << (tokens[i] as u8);
            i += 1;
        }
        Self::from_bits(bits)
    }

    pub const fn union(self, other: TokenSet) -> Self {
        Self::from_bits(self.bits | other.bits)
    }

    /// This set with one more token
    pub const fn with(self, token: Token) -> Self {
        Self::from_bits(self.bits | 1u128 << (token as u8))
    }

    pub const fn is_element(&self, token: Token) -> bool {
        self.bits & (1u128 << (token as u8)) != 0
    }

    /// The number of tokens in this set
    pub const fn len(&self) -> usize {
        self.count as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterates the tokens of this set in alphabet order
    pub fn iter(&self) -> impl Iterator<Item = Token> + '_ {
        Token::iter().filter(|token| self.is_element(*token))
    }
}

impl FromIterator<Token> for TokenSet {
    fn from_iter<T: IntoIterator<Item = Token>>(iter: T) -> Self {
        iter.into_iter().fold(TokenSet::EMPTY, TokenSet::with)
    }
}

impl Display for TokenSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.iter().join(", "))
    }
}

impl Debug for TokenSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Creates a [`TokenSet`](crate::TokenSet) from [`Token`](crate::Token) variant names,
/// usable in constant expressions.
#[macro_export]
macro_rules! token_set {
    ($($token:ident),* $(,)?) => {
        $crate::TokenSet::of(&[$($crate::Token::$token),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    const STATEMENT_END: TokenSet = token_set![Semicolon, End, Else];

    #[test]
    fn test_membership() {
        assert!(STATEMENT_END.is_element(Token::End));
        assert!(!STATEMENT_END.is_element(Token::Begin));
        assert_eq!(STATEMENT_END.len(), 3);
    }

    #[test]
    fn test_duplicates_count_once() {
        let set = token_set![End, End, Period];
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_union_and_with() {
        let set = STATEMENT_END.union(token_set![Until]).with(Token::EndOfFile);
        assert_eq!(set.len(), 5);
        assert!(set.is_element(Token::Until));
        assert!(set.is_element(Token::EndOfFile));
        assert!(TokenSet::EMPTY.is_empty());
    }

    #[test]
    fn test_edges_of_the_alphabet() {
        let set = token_set![Unknown, EndOfFile];
        assert!(set.is_element(Token::Unknown));
        assert!(set.is_element(Token::EndOfFile));
        assert!(!set.is_element(Token::Identifier));
    }

    #[test]
    fn test_collect_and_display() {
        let set: TokenSet = [Token::Comma, Token::Semicolon].into_iter().collect();
        assert_eq!(set, token_set![Semicolon, Comma]);
        assert_eq!(set.to_string(), "{';', ','}");
    }
}
