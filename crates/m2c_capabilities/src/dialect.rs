//! Dialect presets

use crate::capability::Capability;
use crate::error::CapabilityError;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use Capability::*;

/// A named assignment of every capability
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Default, EnumIter, EnumString, IntoStaticStr, Display,
)]
pub enum Dialect {
    /// Programming in Modula-2, third edition
    #[strum(serialize = "pim3")]
    Pim3,
    /// Programming in Modula-2, fourth edition
    #[default]
    #[strum(serialize = "pim4")]
    Pim4,
    /// PIM4 with the extensions of the m2c front end
    #[strum(serialize = "ext")]
    Extended,
}

// Entries are applied in order through the invariant-checking setter, so every
// capability a later entry depends on must come first.
const PIM3: &[(Capability, bool)] = &[
    (Synonyms, true),
    (PrefixLiterals, false),
    (OctalLiterals, true),
    (LowlineIdentifiers, false),
    (EscapeTabAndNewline, false),
    (BackslashSetDiff, false),
    (LineComments, false),
    (IsoPragmaDelimiters, false),
    (PostfixIncDec, false),
    (VariantRecords, true),
    (ExtensibleRecords, false),
    (IndeterminateRecords, false),
    (UnqualifiedImport, true),
    (LocalModules, true),
    (Coroutines, true),
    (WithStatement, true),
    (ToDoStatement, false),
    (LoopStatement, true),
    (ConstParameters, false),
    (VariadicParameters, false),
    (ExportLists, true),
];

const PIM4: &[(Capability, bool)] = &[
    (Synonyms, true),
    (PrefixLiterals, false),
    (OctalLiterals, true),
    (LowlineIdentifiers, false),
    (EscapeTabAndNewline, false),
    (BackslashSetDiff, false),
    (LineComments, false),
    (IsoPragmaDelimiters, false),
    (PostfixIncDec, false),
    (VariantRecords, true),
    (ExtensibleRecords, false),
    (IndeterminateRecords, false),
    (UnqualifiedImport, true),
    (LocalModules, true),
    (Coroutines, true),
    (WithStatement, true),
    (ToDoStatement, false),
    (LoopStatement, true),
    (ConstParameters, false),
    (VariadicParameters, false),
    (ExportLists, false),
];

const EXTENDED: &[(Capability, bool)] = &[
    (Synonyms, false),
    (OctalLiterals, false),
    (PrefixLiterals, true),
    (LowlineIdentifiers, true),
    (EscapeTabAndNewline, true),
    (BackslashSetDiff, true),
    (LineComments, true),
    (IsoPragmaDelimiters, true),
    (PostfixIncDec, true),
    (VariantRecords, false),
    (ExtensibleRecords, true),
    (IndeterminateRecords, true),
    (LocalModules, false),
    (UnqualifiedImport, false),
    (Coroutines, false),
    (WithStatement, false),
    (ToDoStatement, true),
    (LoopStatement, true),
    (ConstParameters, true),
    (VariadicParameters, true),
    (ExportLists, false),
];

impl Dialect {
    /// Looks up a dialect by its name
    pub fn from_name(name: &str) -> Result<Self, CapabilityError> {
        Self::from_str(name).map_err(|_| CapabilityError::UnknownDialect(name.to_string()))
    }

    /// The value of every stored capability under this dialect, in application order
    pub fn preset(self) -> &'static [(Capability, bool)] {
        match self {
            Dialect::Pim3 => PIM3,
            Dialect::Pim4 => PIM4,
            Dialect::Extended => EXTENDED,
        }
    }

    /// The preset value of a single capability
    pub fn default_value(self, capability: Capability) -> bool {
        let (stored, negate) = match capability.complement() {
            Some(other) if !capability.is_stored() => (other, true),
            _ => (capability, false),
        };
        self.preset()
            .iter()
            .find(|(c, _)| *c == stored)
            .map(|(_, value)| *value ^ negate)
            .unwrap_or(false)
    }

    /// Whether the dialect pins `capability` to its preset value
    pub fn is_fixed(self, capability: Capability) -> bool {
        match self {
            Dialect::Pim3 | Dialect::Pim4 => matches!(
                capability,
                ExtensibleRecords | IndeterminateRecords | ToDoStatement
            ),
            Dialect::Extended => matches!(
                capability,
                VariantRecords | LocalModules | Coroutines | WithStatement
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;
    use test_log::test;

    #[test]
    fn test_presets_assign_every_stored_capability_once() {
        for dialect in Dialect::iter() {
            for capability in Capability::iter().filter(|c| c.is_stored()) {
                let count = dialect
                    .preset()
                    .iter()
                    .filter(|(c, _)| *c == capability)
                    .count();
                assert_eq!(count, 1, "{capability} in {dialect}");
            }
            assert!(dialect.preset().iter().all(|(c, _)| c.is_stored()));
        }
    }

    #[test]
    fn test_default_values() {
        assert!(Dialect::Pim4.default_value(SuffixLiterals));
        assert!(!Dialect::Extended.default_value(SuffixLiterals));
        assert!(Dialect::Extended.default_value(IsoPragmaDelimiters));
        assert!(Dialect::Pim3.default_value(IntraCommentPragmas));
        assert!(Dialect::Pim3.default_value(ExportLists));
        assert!(!Dialect::Pim4.default_value(ExportLists));
    }

    #[test]
    fn test_dialect_names() {
        assert_eq!(Dialect::from_name("ext"), Ok(Dialect::Extended));
        assert_eq!(Dialect::Pim3.to_string(), "pim3");
        assert_eq!(Dialect::default(), Dialect::Pim4);
        assert!(Dialect::from_name("iso").is_err());
    }

    #[test]
    fn test_fixed_capabilities() {
        assert!(Dialect::Pim4.is_fixed(ExtensibleRecords));
        assert!(!Dialect::Pim4.is_fixed(VariantRecords));
        assert!(Dialect::Extended.is_fixed(VariantRecords));
        assert!(!Dialect::Extended.is_fixed(Synonyms));
    }
}
