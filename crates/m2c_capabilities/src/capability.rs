//! The individual language capabilities

use crate::error::CapabilityError;
use std::str::FromStr;
use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// A named language feature that can be switched on or off
#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    EnumIter,
    EnumCount,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Capability {
    /// `&` for `AND`, `~` for `NOT` and `<>` for `#`
    Synonyms,
    /// Suffix literals ending in `B` (octal integer) or `C` (octal character code)
    OctalLiterals,
    /// A single interior `_` inside identifiers
    LowlineIdentifiers,
    /// `\n`, `\t` and `\\` inside string literals
    EscapeTabAndNewline,
    /// `\` as the set difference operator
    BackslashSetDiff,
    /// `!` comments running to the end of the line
    LineComments,
    /// `0x` and `0u` prefixed number literals
    PrefixLiterals,
    /// `H`, `B` and `C` suffixed number literals; the complement of [`PrefixLiterals`](Self::PrefixLiterals)
    SuffixLiterals,
    /// `<* ... *>` pragmas
    IsoPragmaDelimiters,
    /// `(*$ ... *)` pragmas; the complement of [`IsoPragmaDelimiters`](Self::IsoPragmaDelimiters)
    IntraCommentPragmas,
    /// `x++` and `x--` statements
    PostfixIncDec,
    /// `CASE` variant parts inside records
    VariantRecords,
    /// `RECORD (Base)` records extending another record type
    ExtensibleRecords,
    /// `+ field: ARRAY n OF T` trailing fields of runtime length
    IndeterminateRecords,
    /// Modules declared inside blocks
    LocalModules,
    /// `FROM M IMPORT x;`
    UnqualifiedImport,
    /// Recorded for later phases, no effect on lexing or parsing
    Coroutines,
    /// `WITH` statements
    WithStatement,
    /// `TO DO` task lists
    ToDoStatement,
    /// `LOOP` statements and `EXIT`
    LoopStatement,
    /// `CONST` formal parameters
    ConstParameters,
    /// `ARGLIST OF T` formal types
    VariadicParameters,
    /// `EXPORT` lists in definition modules
    ExportLists,
}

impl Capability {
    /// Looks up a capability by its kebab-case name
    pub fn from_name(name: &str) -> Result<Self, CapabilityError> {
        Self::from_str(name).map_err(|_| CapabilityError::Unknown(name.to_string()))
    }

    /// The kebab-case name of this capability
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// The capability this one is stored as the negation of, if any
    pub const fn complement(self) -> Option<Capability> {
        match self {
            Capability::PrefixLiterals => Some(Capability::SuffixLiterals),
            Capability::SuffixLiterals => Some(Capability::PrefixLiterals),
            Capability::IsoPragmaDelimiters => Some(Capability::IntraCommentPragmas),
            Capability::IntraCommentPragmas => Some(Capability::IsoPragmaDelimiters),
            _ => None,
        }
    }

    /// Whether this capability has its own storage, rather than being derived from its complement
    pub const fn is_stored(self) -> bool {
        !matches!(
            self,
            Capability::SuffixLiterals | Capability::IntraCommentPragmas
        )
    }

    pub(crate) const fn bit(self) -> u32 {
        1 << (self as u32)
    }
}
