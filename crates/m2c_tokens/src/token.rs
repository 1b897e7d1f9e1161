//! The token alphabet

use std::fmt::{Display, Formatter};
use strum::{EnumCount, EnumIter, IntoStaticStr};

/// The kind of a lexical symbol
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, EnumIter, EnumCount, IntoStaticStr,
)]
#[repr(u8)]
pub enum Token {
    /// An illegal character, or an operator whose capability is off
    Unknown,

    And,
    Arglist,
    Array,
    Begin,
    By,
    Case,
    Const,
    Definition,
    Div,
    Do,
    Else,
    Elsif,
    End,
    Exit,
    Export,
    For,
    From,
    If,
    Implementation,
    Import,
    In,
    Loop,
    Mod,
    Module,
    Not,
    Of,
    Or,
    Pointer,
    Procedure,
    Qualified,
    Record,
    Repeat,
    Return,
    Set,
    Then,
    To,
    Type,
    Until,
    Var,
    While,
    With,

    Identifier,

    IntLiteral,
    RealLiteral,
    CharLiteral,
    StringLiteral,

    MalformedString,
    MalformedInteger,
    MalformedReal,

    /// +
    Plus,
    /// -
    Minus,
    /// *
    Asterisk,
    /// /
    Solidus,
    /// \
    Backslash,
    /// =
    Equal,
    /// `#`, or `<>` with synonyms
    NotEqual,
    /// <
    Less,
    /// <=
    LessEqual,
    /// >
    Greater,
    /// >=
    GreaterEqual,
    /// :=
    Assign,
    /// :
    Colon,
    /// ;
    Semicolon,
    /// ,
    Comma,
    /// .
    Period,
    /// ..
    Range,
    /// |
    Bar,
    /// ^
    Deref,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    /// ++
    PlusPlus,
    /// --
    MinusMinus,

    EndOfFile,
}

/// The broad class a token belongs to
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TokenCategory {
    Unknown,
    ReservedWord,
    Identifier,
    Literal,
    Malformed,
    Punctuation,
    EndOfFile,
}

impl Token {
    /// Gets the category of this token
    pub const fn category(self) -> TokenCategory {
        use Token::*;
        match self {
            Unknown => TokenCategory::Unknown,
            And | Arglist | Array | Begin | By | Case | Const | Definition | Div | Do | Else
            | Elsif | End | Exit | Export | For | From | If | Implementation | Import | In
            | Loop | Mod | Module | Not | Of | Or | Pointer | Procedure | Qualified | Record
            | Repeat | Return | Set | Then | To | Type | Until | Var | While | With => {
                TokenCategory::ReservedWord
            }
            Identifier => TokenCategory::Identifier,
            IntLiteral | RealLiteral | CharLiteral | StringLiteral => TokenCategory::Literal,
            MalformedString | MalformedInteger | MalformedReal => TokenCategory::Malformed,
            Plus | Minus | Asterisk | Solidus | Backslash | Equal | NotEqual | Less
            | LessEqual | Greater | GreaterEqual | Assign | Colon | Semicolon | Comma | Period
            | Range | Bar | Deref | LParen | RParen | LBracket | RBracket | LBrace | RBrace
            | PlusPlus | MinusMinus => TokenCategory::Punctuation,
            EndOfFile => TokenCategory::EndOfFile,
        }
    }

    pub const fn is_reserved_word(self) -> bool {
        matches!(self.category(), TokenCategory::ReservedWord)
    }

    /// Whether the symbol of this token carries its lexeme
    pub const fn has_lexeme(self) -> bool {
        matches!(
            self.category(),
            TokenCategory::Identifier
                | TokenCategory::Literal
                | TokenCategory::Malformed
                | TokenCategory::Unknown
        )
    }

    /// The fixed source spelling of this token, if it has one
    pub const fn spelling(self) -> Option<&'static str> {
        use Token::*;
        let spelling = match self {
            And => "AND",
            Arglist => "ARGLIST",
            Array => "ARRAY",
            Begin => "BEGIN",
            By => "BY",
            Case => "CASE",
            Const => "CONST",
            Definition => "DEFINITION",
            Div => "DIV",
            Do => "DO",
            Else => "ELSE",
            Elsif => "ELSIF",
            End => "END",
            Exit => "EXIT",
            Export => "EXPORT",
            For => "FOR",
            From => "FROM",
            If => "IF",
            Implementation => "IMPLEMENTATION",
            Import => "IMPORT",
            In => "IN",
            Loop => "LOOP",
            Mod => "MOD",
            Module => "MODULE",
            Not => "NOT",
            Of => "OF",
            Or => "OR",
            Pointer => "POINTER",
            Procedure => "PROCEDURE",
            Qualified => "QUALIFIED",
            Record => "RECORD",
            Repeat => "REPEAT",
            Return => "RETURN",
            Set => "SET",
            Then => "THEN",
            To => "TO",
            Type => "TYPE",
            Until => "UNTIL",
            Var => "VAR",
            While => "WHILE",
            With => "WITH",
            Plus => "+",
            Minus => "-",
            Asterisk => "*",
            Solidus => "/",
            Backslash => "\\",
            Equal => "=",
            NotEqual => "#",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            Assign => ":=",
            Colon => ":",
            Semicolon => ";",
            Comma => ",",
            Period => ".",
            Range => "..",
            Bar => "|",
            Deref => "^",
            LParen => "(",
            RParen => ")",
            LBracket => "[",
            RBracket => "]",
            LBrace => "{",
            RBrace => "}",
            PlusPlus => "++",
            MinusMinus => "--",
            _ => return None,
        };
        Some(spelling)
    }

    /// Looks up the reserved word spelled `word`
    pub fn reserved_word(word: &str) -> Option<Token> {
        use Token::*;
        let token = match word {
            "AND" => And,
            "ARGLIST" => Arglist,
            "ARRAY" => Array,
            "BEGIN" => Begin,
            "BY" => By,
            "CASE" => Case,
            "CONST" => Const,
            "DEFINITION" => Definition,
            "DIV" => Div,
            "DO" => Do,
            "ELSE" => Else,
            "ELSIF" => Elsif,
            "END" => End,
            "EXIT" => Exit,
            "EXPORT" => Export,
            "FOR" => For,
            "FROM" => From,
            "IF" => If,
            "IMPLEMENTATION" => Implementation,
            "IMPORT" => Import,
            "IN" => In,
            "LOOP" => Loop,
            "MOD" => Mod,
            "MODULE" => Module,
            "NOT" => Not,
            "OF" => Of,
            "OR" => Or,
            "POINTER" => Pointer,
            "PROCEDURE" => Procedure,
            "QUALIFIED" => Qualified,
            "RECORD" => Record,
            "REPEAT" => Repeat,
            "RETURN" => Return,
            "SET" => Set,
            "THEN" => Then,
            "TO" => To,
            "TYPE" => Type,
            "UNTIL" => Until,
            "VAR" => Var,
            "WHILE" => While,
            "WITH" => With,
            _ => return None,
        };
        Some(token)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.spelling() {
            Some(spelling) => write!(f, "'{spelling}'"),
            None => {
                let text = match self {
                    Token::Unknown => "unknown symbol",
                    Token::Identifier => "identifier",
                    Token::IntLiteral => "integer literal",
                    Token::RealLiteral => "real literal",
                    Token::CharLiteral => "character literal",
                    Token::StringLiteral => "string literal",
                    Token::MalformedString => "malformed string",
                    Token::MalformedInteger => "malformed integer",
                    Token::MalformedReal => "malformed real",
                    Token::EndOfFile => "end of file",
                    other => other.into(),
                };
                write!(f, "{text}")
            }
        }
    }
}
