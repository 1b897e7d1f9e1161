//! FIRST and FOLLOW sets of every production.
//!
//! Most productions have a single entry. A few have a base and an alternate
//! entry, chosen by a [`Selection`] rule when the set is looked up.

use crate::production::Production;
use m2c_capabilities::{Capabilities, Capability};
use m2c_tokens::{token_set, TokenSet};

pub mod resync;

/// How the entry of a production is chosen
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Selection {
    Unconditional(TokenSet),
    /// Formal parameter attribution: the alternate entry is always used
    AlwaysAlternate { base: TokenSet, alternate: TokenSet },
    /// Variant record field lists: FIRST uses the alternate while variant records
    /// are enabled, FOLLOW uses it while they are disabled
    VariantRecords { base: TokenSet, alternate: TokenSet },
}

const EXPRESSION_FIRST: TokenSet = token_set![
    Plus,
    Minus,
    IntLiteral,
    RealLiteral,
    CharLiteral,
    StringLiteral,
    LBrace,
    Identifier,
    LParen,
    Not
];
const FACTOR_FIRST: TokenSet = token_set![
    IntLiteral,
    RealLiteral,
    CharLiteral,
    StringLiteral,
    LBrace,
    Identifier,
    LParen,
    Not
];
const TYPE_FIRST: TokenSet = token_set![
    Identifier, LBracket, LParen, Array, Record, Set, Pointer, Procedure
];
const STATEMENT_FIRST: TokenSet = token_set![
    Identifier, If, Case, While, Repeat, Loop, For, With, To, Return, Exit
];
const DECLARATION_FIRST: TokenSet = token_set![Const, Type, Var, Procedure, Module];
const DEFINITION_FIRST: TokenSet = token_set![Const, Type, Var, Procedure];

const IMPORT_FOLLOW: TokenSet = token_set![
    From, Import, Export, Const, Type, Var, Procedure, Module, Begin, End
];
const TYPE_FOLLOW: TokenSet = token_set![Semicolon, End, Bar, Else];
const SIMPLE_TYPE_FOLLOW: TokenSet = TYPE_FOLLOW.union(token_set![Comma, Of]);
const STATEMENT_SEQUENCE_FOLLOW: TokenSet = token_set![End, Else, Elsif, Until, Bar];
const STATEMENT_FOLLOW: TokenSet = STATEMENT_SEQUENCE_FOLLOW.with(m2c_tokens::Token::Semicolon);
const EXPRESSION_FOLLOW: TokenSet = token_set![
    Semicolon, End, Else, Elsif, Until, Bar, Then, Of, Do, To, By, Comma, RBracket, RParen,
    RBrace, Range, Colon
];
const SIMPLE_EXPRESSION_FOLLOW: TokenSet = EXPRESSION_FOLLOW.union(token_set![
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    In
]);
const TERM_FOLLOW: TokenSet = SIMPLE_EXPRESSION_FOLLOW.union(token_set![Plus, Minus, Or]);
const FACTOR_FOLLOW: TokenSet =
    TERM_FOLLOW.union(token_set![Asterisk, Solidus, Div, Mod, And, Backslash]);
const DESIGNATOR_FOLLOW: TokenSet =
    FACTOR_FOLLOW.union(token_set![Assign, PlusPlus, MinusMinus, LParen, LBrace]);

/// The FIRST entry of a production
pub fn first_entry(production: Production) -> Selection {
    use Production::*;
    use Selection::*;
    match production {
        CompilationUnit => Unconditional(token_set![Definition, Implementation, Module]),
        DefinitionModule => Unconditional(token_set![Definition]),
        ProgramModule | ModuleDeclaration => Unconditional(token_set![Module]),
        ModulePriority | Subrange => Unconditional(token_set![LBracket]),
        ImportList => Unconditional(token_set![From, Import]),
        QualifiedImport => Unconditional(token_set![Import]),
        UnqualifiedImport => Unconditional(token_set![From]),
        ExportList => Unconditional(token_set![Export]),
        IdentList | ConstDefinition | TypeDefinition | TypeDeclaration | VariableDeclaration
        | AssignmentOrProcCall | Designator | Qualident => Unconditional(token_set![Identifier]),
        Definition => Unconditional(DEFINITION_FIRST),
        ProcedureHeader | ProcedureDeclaration | ProcedureType => {
            Unconditional(token_set![Procedure])
        }
        FormalParamList | FormalTypeList | Enumeration | ActualParameters | TrackingRef => {
            Unconditional(token_set![LParen])
        }
        FormalParams => AlwaysAlternate {
            base: token_set![Var, Identifier],
            alternate: token_set![Const, Var, Identifier],
        },
        AttributedFormalType => AlwaysAlternate {
            base: token_set![Array, Identifier],
            alternate: token_set![Arglist, Array, Identifier],
        },
        FormalType => Unconditional(token_set![Array, Identifier]),
        Type => Unconditional(TYPE_FIRST),
        SimpleType => Unconditional(token_set![Identifier, LBracket, LParen]),
        ArrayType => Unconditional(token_set![Array]),
        RecordType => Unconditional(token_set![Record]),
        FieldListSequence | FieldList => VariantRecords {
            base: token_set![Identifier, Plus],
            alternate: token_set![Identifier, Case],
        },
        VariantFieldList | CaseStatement => Unconditional(token_set![Case]),
        Variant | CaseLabelList | CaseLabels | Case | ExpressionList | ConstExpression
        | Expression | SimpleExpression | Element => Unconditional(EXPRESSION_FIRST),
        IndeterminateField => Unconditional(token_set![Plus]),
        SetType => Unconditional(token_set![Set]),
        PointerType => Unconditional(token_set![Pointer]),
        Block => Unconditional(DECLARATION_FIRST.union(token_set![Begin, End])),
        Declaration => Unconditional(DECLARATION_FIRST),
        StatementSequence | Statement => Unconditional(STATEMENT_FIRST),
        ReturnStatement => Unconditional(token_set![Return]),
        IfStatement => Unconditional(token_set![If]),
        WhileStatement => Unconditional(token_set![While]),
        RepeatStatement => Unconditional(token_set![Repeat]),
        LoopStatement => Unconditional(token_set![Loop]),
        ForStatement => Unconditional(token_set![For]),
        WithStatement => Unconditional(token_set![With]),
        ToDoStatement => Unconditional(token_set![To]),
        TaskToDo => Unconditional(token_set![StringLiteral]),
        Selector => Unconditional(token_set![Period, LBracket, Deref]),
        Term | Factor => Unconditional(FACTOR_FIRST),
        SetValue => Unconditional(token_set![LBrace]),
    }
}

/// The FOLLOW entry of a production
pub fn follow_entry(production: Production) -> Selection {
    use Production::*;
    use Selection::*;
    match production {
        CompilationUnit | DefinitionModule | ProgramModule => Unconditional(token_set![EndOfFile]),
        ModulePriority => Unconditional(token_set![Semicolon]),
        ImportList | QualifiedImport | UnqualifiedImport => Unconditional(IMPORT_FOLLOW),
        ExportList => Unconditional(DECLARATION_FIRST.union(token_set![Begin, End])),
        IdentList => Unconditional(token_set![Semicolon, Colon, RParen]),
        Definition => Unconditional(DEFINITION_FIRST.with(m2c_tokens::Token::End)),
        ConstDefinition | TypeDefinition | TypeDeclaration | VariableDeclaration
        | ProcedureHeader | FormalParamList | ProcedureDeclaration | ModuleDeclaration => {
            Unconditional(token_set![Semicolon])
        }
        FormalParams => Unconditional(token_set![Semicolon, RParen]),
        AttributedFormalType => AlwaysAlternate {
            base: token_set![Semicolon, RParen],
            alternate: token_set![Semicolon, RParen, Comma],
        },
        FormalType => Unconditional(token_set![Semicolon, RParen, Comma]),
        Type | ArrayType | RecordType | SetType | PointerType | ProcedureType | FormalTypeList => {
            Unconditional(TYPE_FOLLOW)
        }
        SimpleType | Subrange | Enumeration => Unconditional(SIMPLE_TYPE_FOLLOW),
        FieldListSequence => VariantRecords {
            base: token_set![End, Bar, Else],
            alternate: token_set![End],
        },
        FieldList => VariantRecords {
            base: token_set![Semicolon, End, Bar, Else],
            alternate: token_set![Semicolon, End],
        },
        VariantFieldList | IndeterminateField => Unconditional(token_set![Semicolon, End, Bar, Else]),
        Variant | Case => Unconditional(token_set![Bar, Else, End]),
        CaseLabelList => Unconditional(token_set![Colon]),
        CaseLabels => Unconditional(token_set![Comma, Colon]),
        Block => Unconditional(token_set![Identifier]),
        Declaration => Unconditional(DECLARATION_FIRST.union(token_set![Begin, End])),
        StatementSequence => Unconditional(STATEMENT_SEQUENCE_FOLLOW),
        Statement | AssignmentOrProcCall | ReturnStatement | IfStatement | CaseStatement
        | WhileStatement | RepeatStatement | LoopStatement | ForStatement | WithStatement
        | ToDoStatement => Unconditional(STATEMENT_FOLLOW),
        TrackingRef => Unconditional(token_set![StringLiteral]),
        TaskToDo => Unconditional(token_set![Semicolon, End]),
        Designator => Unconditional(DESIGNATOR_FOLLOW),
        Selector => Unconditional(DESIGNATOR_FOLLOW.union(token_set![Period, LBracket, Deref])),
        ExpressionList => Unconditional(token_set![RBracket, RParen]),
        ConstExpression | Expression | Element => Unconditional(EXPRESSION_FOLLOW),
        SimpleExpression => Unconditional(SIMPLE_EXPRESSION_FOLLOW),
        Term => Unconditional(TERM_FOLLOW),
        Factor | ActualParameters | SetValue => Unconditional(FACTOR_FOLLOW),
        Qualident => Unconditional(token_set![
            Semicolon, RParen, Comma, Of, LBracket, End, Bar, Else
        ]),
    }
}

/// The FIRST set of `production` under `capabilities`
pub fn first(production: Production, capabilities: &Capabilities) -> TokenSet {
    match first_entry(production) {
        Selection::Unconditional(set) => set,
        Selection::AlwaysAlternate { alternate, .. } => alternate,
        Selection::VariantRecords { base, alternate } => {
            if capabilities.is_enabled(Capability::VariantRecords) {
                alternate
            } else {
                base
            }
        }
    }
}

/// The FOLLOW set of `production` under `capabilities`
pub fn follow(production: Production, capabilities: &Capabilities) -> TokenSet {
    match follow_entry(production) {
        Selection::Unconditional(set) => set,
        Selection::AlwaysAlternate { alternate, .. } => alternate,
        Selection::VariantRecords { base, alternate } => {
            if capabilities.is_enabled(Capability::VariantRecords) {
                base
            } else {
                alternate
            }
        }
    }
}
