//! Sets the parser skips to after a syntax error.
//!
//! The parser always stops at end of file as well, whether or not a set lists it.

use m2c_tokens::{token_set, TokenSet};

/// After the header of a program module
pub const IMPORT_OR_BLOCK: TokenSet = token_set![
    Import, From, Const, Type, Var, Procedure, Module, Begin, End
];

/// After the header of a definition module
pub const IMPORT_OR_DEFINITION: TokenSet = token_set![
    Import, From, Export, Const, Type, Var, Procedure, End
];

/// Inside the declarations of a block
pub const DECLARATION_OR_BODY: TokenSet = token_set![
    Const, Type, Var, Procedure, Module, Begin, End
];

/// Inside the definitions of a definition module
pub const DEFINITION_OR_END: TokenSet = token_set![Const, Type, Var, Procedure, End];

/// Inside a field list sequence
pub const FIELD_LIST_OR_END: TokenSet = token_set![Semicolon, End, Bar, Else];

/// Inside a statement sequence
pub const STATEMENT_OR_END: TokenSet = token_set![
    Semicolon, End, Else, Elsif, Until, Bar, If, Case, While, Repeat, Loop, For, With, Return,
    Exit
];

/// Between a declared name and its type
pub const TYPE_OR_SEMICOLON: TokenSet = token_set![
    Semicolon, Identifier, LBracket, LParen, Array, Record, Set, Pointer, Procedure
];

/// After a procedure header
pub const PROCEDURE_BLOCK_OR_END: TokenSet = token_set![
    Semicolon, Const, Type, Var, Procedure, Begin, End
];

/// After the closing identifier of a compilation unit
pub const MODULE_END: TokenSet = token_set![Period];

#[cfg(test)]
mod tests {
    use super::*;
    use m2c_tokens::Token;
    use test_log::test;

    #[test]
    fn test_statement_resync_stops_at_terminators() {
        for token in [Token::Semicolon, Token::End, Token::Until, Token::Bar] {
            assert!(STATEMENT_OR_END.is_element(token), "{token}");
        }
        assert!(!STATEMENT_OR_END.is_element(Token::Identifier));
    }

    #[test]
    fn test_block_sets() {
        assert!(DECLARATION_OR_BODY.is_element(Token::Begin));
        assert!(!DEFINITION_OR_END.is_element(Token::Begin));
        assert!(IMPORT_OR_BLOCK.is_element(Token::From));
        assert!(IMPORT_OR_DEFINITION.is_element(Token::Export));
        assert!(!IMPORT_OR_BLOCK.is_element(Token::Export));
    }

    #[test]
    fn test_type_resync_starts_types() {
        assert!(TYPE_OR_SEMICOLON.is_element(Token::Record));
        assert!(FIELD_LIST_OR_END.is_element(Token::Else));
        assert!(PROCEDURE_BLOCK_OR_END.is_element(Token::Begin));
        assert_eq!(MODULE_END.len(), 1);
    }
}
