use strum::{Display, EnumCount, EnumIter};

/// The grammar productions, one parser method each
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, EnumIter, EnumCount, Display)]
#[strum(serialize_all = "camelCase")]
pub enum Production {
    CompilationUnit,
    DefinitionModule,
    ProgramModule,
    ModulePriority,
    ImportList,
    QualifiedImport,
    UnqualifiedImport,
    ExportList,
    IdentList,
    Definition,
    ConstDefinition,
    TypeDefinition,
    TypeDeclaration,
    VariableDeclaration,
    ProcedureHeader,
    FormalParamList,
    FormalParams,
    AttributedFormalType,
    FormalType,
    Type,
    SimpleType,
    Subrange,
    Enumeration,
    ArrayType,
    RecordType,
    FieldListSequence,
    FieldList,
    VariantFieldList,
    Variant,
    CaseLabelList,
    CaseLabels,
    IndeterminateField,
    SetType,
    PointerType,
    ProcedureType,
    FormalTypeList,
    Block,
    Declaration,
    ProcedureDeclaration,
    ModuleDeclaration,
    StatementSequence,
    Statement,
    AssignmentOrProcCall,
    ActualParameters,
    ReturnStatement,
    IfStatement,
    CaseStatement,
    Case,
    WhileStatement,
    RepeatStatement,
    LoopStatement,
    ForStatement,
    WithStatement,
    ToDoStatement,
    TrackingRef,
    TaskToDo,
    Designator,
    Selector,
    ExpressionList,
    ConstExpression,
    Expression,
    SimpleExpression,
    Term,
    Factor,
    SetValue,
    Element,
    Qualident,
}
