//! Node kinds and their shapes

use strum::{Display, EnumIter, IntoStaticStr};

/// The shape of a node kind
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Arity {
    /// Exactly this many child slots, some of which may hold [`NodeId::EMPTY`](crate::NodeId::EMPTY)
    Fixed(usize),
    /// Any number of children
    List,
    /// No children, carries source text
    Terminal,
}

/// The tag of a syntax tree node
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, EnumIter, IntoStaticStr, Display)]
pub enum NodeKind {
    /// The absent-child sentinel
    Empty,

    // compilation units
    DefinitionModule,
    ImplementationModule,
    ProgramModule,
    ImportList,
    QualifiedImport,
    UnqualifiedImport,
    QualifiedExport,
    UnqualifiedExport,
    IdentList,
    Qualident,

    // declarations
    DefinitionList,
    DeclarationList,
    ConstSection,
    TypeSection,
    VarSection,
    ConstDecl,
    TypeDecl,
    OpaqueType,
    VarDecl,
    ProcHeader,
    FormalParams,
    FormalParamSection,
    ConstAttr,
    VarAttr,
    OpenArray,
    ArgList,
    ProcDecl,
    ModuleDecl,
    Block,

    // types
    Subrange,
    Enumeration,
    ArrayType,
    IndexTypes,
    RecordType,
    FieldListSeq,
    FieldList,
    VariantFieldList,
    VariantList,
    Variant,
    CaseLabelList,
    Range,
    IndeterminateField,
    SetType,
    PointerType,
    ProcedureType,
    FormalTypeList,
    FormalTypeItem,

    // statements
    StatementSeq,
    Assignment,
    ProcCall,
    Increment,
    Decrement,
    Return,
    Exit,
    If,
    ElsifList,
    Elsif,
    CaseStatement,
    CaseList,
    CaseBranch,
    While,
    Repeat,
    Loop,
    For,
    With,
    ToDo,
    TrackingRef,
    TaskList,
    Task,

    // expressions
    FieldSelect,
    Index,
    Deref,
    FunctionCall,
    ActualParams,
    ExprList,
    Eq,
    Neq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    In,
    Add,
    Sub,
    Or,
    Mul,
    RealDiv,
    IntDiv,
    Mod,
    And,
    SetDiff,
    Neg,
    Not,
    SetValue,

    // terminals
    Ident,
    IntValue,
    RealValue,
    CharValue,
    StringValue,
}

impl NodeKind {
    /// The shape nodes of this kind must have
    pub const fn arity(self) -> Arity {
        use NodeKind::*;
        match self {
            Empty | ConstAttr | VarAttr | Exit => Arity::Fixed(0),

            QualifiedImport | QualifiedExport | UnqualifiedExport | OpaqueType | OpenArray
            | ArgList | Enumeration | SetType | PointerType | Increment | Decrement | Return
            | Loop | Deref | Neg | Not => Arity::Fixed(1),

            UnqualifiedImport | ConstDecl | TypeDecl | VarDecl | ProcDecl | Block | ArrayType
            | RecordType | FieldList | Variant | Range | ProcedureType | FormalTypeItem
            | Assignment | ProcCall | Elsif | CaseBranch | While | Repeat | With | ToDo
            | TrackingRef | Task | FieldSelect | Index | FunctionCall | Eq | Neq | Lt | LtEq
            | Gt | GtEq | In | Add | Sub | Or | Mul | RealDiv | IntDiv | Mod | And | SetDiff
            | SetValue => Arity::Fixed(2),

            ProcHeader | FormalParamSection | Subrange | IndeterminateField | CaseStatement => {
                Arity::Fixed(3)
            }

            DefinitionModule | ImplementationModule | ProgramModule | VariantFieldList | If => {
                Arity::Fixed(4)
            }

            ModuleDecl | For => Arity::Fixed(5),

            ImportList | IdentList | Qualident | DefinitionList | DeclarationList
            | ConstSection | TypeSection | VarSection | FormalParams | IndexTypes
            | FieldListSeq | VariantList | CaseLabelList | FormalTypeList | StatementSeq
            | ElsifList | CaseList | TaskList | ActualParams | ExprList => Arity::List,

            Ident | IntValue | RealValue | CharValue | StringValue => Arity::Terminal,
        }
    }

    /// The child slot that may be filled in after construction, if any.
    ///
    /// Subranges and set values are parsed before it is known whether a type
    /// identifier precedes them; the identifier is spliced into slot 0 afterwards.
    pub const fn splice_slot(self) -> Option<usize> {
        match self {
            NodeKind::Subrange | NodeKind::SetValue => Some(0),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        self.into()
    }
}
