//! The capability set consulted by the lexer and parser

use crate::builder::CapabilitiesBuilder;
use crate::capability::Capability;
use crate::dialect::Dialect;
use crate::error::CapabilityError;
use strum::IntoEnumIterator;
use tracing::{debug, trace};

use Capability::*;

const RECORD_FLAGS: u32 = VariantRecords.bit() | ExtensibleRecords.bit() | IndeterminateRecords.bit();

/// The set of capabilities in effect for one compilation.
///
/// The setters keep these rules at all times:
/// * octal literals are never on together with prefix literals
/// * variant records exclude both extensible and indeterminate records
/// * local modules require unqualified import
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Capabilities {
    flags: u32,
    dialect: Dialect,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

impl Capabilities {
    /// Creates the capability set of the given dialect
    pub fn new(dialect: Dialect) -> Self {
        let mut capabilities = Self { flags: 0, dialect };
        capabilities.set_dialect(dialect);
        capabilities
    }

    /// Starts building a capability set
    pub fn builder() -> CapabilitiesBuilder {
        CapabilitiesBuilder::new()
    }

    /// The dialect most recently applied
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Whether `capability` is on
    pub fn is_enabled(&self, capability: Capability) -> bool {
        if capability.is_stored() {
            self.flags & capability.bit() != 0
        } else {
            match capability.complement() {
                Some(other) => !self.is_enabled(other),
                None => false,
            }
        }
    }

    fn raw_set(&mut self, capability: Capability, value: bool) {
        if value {
            self.flags |= capability.bit();
        } else {
            self.flags &= !capability.bit();
        }
    }

    /// Turns `capability` on or off.
    ///
    /// Returns `false` and leaves the set untouched when the request would
    /// break one of the combination rules. Some requests force a dependent
    /// capability off instead.
    pub fn set(&mut self, capability: Capability, value: bool) -> bool {
        if !capability.is_stored() {
            return match capability.complement() {
                Some(other) => self.set(other, !value),
                None => false,
            };
        }

        let accepted = match (capability, value) {
            (OctalLiterals, true) => !self.is_enabled(PrefixLiterals),
            (PrefixLiterals, true) => {
                self.raw_set(OctalLiterals, false);
                true
            }
            (VariantRecords, true) => {
                self.raw_set(ExtensibleRecords, false);
                self.raw_set(IndeterminateRecords, false);
                true
            }
            (ExtensibleRecords | IndeterminateRecords, true) => {
                !self.is_enabled(VariantRecords)
            }
            (LocalModules, true) => self.is_enabled(UnqualifiedImport),
            (UnqualifiedImport, false) => {
                self.raw_set(LocalModules, false);
                true
            }
            _ => true,
        };

        if accepted {
            self.raw_set(capability, value);
        } else {
            trace!("rejected setting {capability} to {value}");
        }
        accepted
    }

    /// Turns a capability on or off by its name
    pub fn set_by_name(&mut self, name: &str, value: bool) -> Result<bool, CapabilityError> {
        let capability = Capability::from_name(name)?;
        Ok(self.set(capability, value))
    }

    /// Replaces every capability with the preset of `dialect`
    pub fn set_dialect(&mut self, dialect: Dialect) {
        self.flags &= !RECORD_FLAGS;
        for &(capability, value) in dialect.preset() {
            self.set(capability, value);
        }
        self.dialect = dialect;
        debug!("applied dialect {dialect}: {:#010x}", self.flags);
    }

    /// Whether `capability` may still be changed under the current dialect
    pub fn is_mutable_for_current_dialect(&self, capability: Capability) -> bool {
        !self.dialect.is_fixed(capability)
    }

    /// The capabilities that are on
    pub fn enabled(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::iter().filter(|c| self.is_enabled(*c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn all_off() -> Capabilities {
        Capabilities {
            flags: 0,
            dialect: Dialect::Pim4,
        }
    }

    #[test]
    fn test_octal_rejected_under_prefix() {
        let mut caps = all_off();
        assert!(caps.set(PrefixLiterals, true));
        assert!(!caps.set(OctalLiterals, true));
        assert!(!caps.is_enabled(OctalLiterals));
    }

    #[test]
    fn test_prefix_forces_octal_off() {
        let mut caps = all_off();
        assert!(caps.set(OctalLiterals, true));
        assert!(caps.set(PrefixLiterals, true));
        assert!(!caps.is_enabled(OctalLiterals));
    }

    #[test]
    fn test_disabling_suffix_forces_octal_off() {
        let mut caps = all_off();
        assert!(caps.set(OctalLiterals, true));
        assert!(caps.is_enabled(SuffixLiterals));
        assert!(caps.set(SuffixLiterals, false));
        assert!(caps.is_enabled(PrefixLiterals));
        assert!(!caps.is_enabled(OctalLiterals));
    }

    #[test]
    fn test_variant_excludes_extensible() {
        let mut caps = all_off();
        assert!(caps.set(VariantRecords, true));
        assert!(!caps.set(ExtensibleRecords, true));
        assert!(!caps.is_enabled(ExtensibleRecords));
        assert!(!caps.set(IndeterminateRecords, true));
        assert!(!caps.is_enabled(IndeterminateRecords));
    }

    #[test]
    fn test_variant_forces_record_extensions_off() {
        let mut caps = all_off();
        assert!(caps.set(ExtensibleRecords, true));
        assert!(caps.set(IndeterminateRecords, true));
        assert!(caps.set(VariantRecords, true));
        assert!(!caps.is_enabled(ExtensibleRecords));
        assert!(!caps.is_enabled(IndeterminateRecords));
    }

    #[test]
    fn test_local_modules_require_unqualified_import() {
        let mut caps = all_off();
        assert!(!caps.set(LocalModules, true));
        assert!(caps.set(UnqualifiedImport, true));
        assert!(caps.set(LocalModules, true));
        assert!(caps.set(UnqualifiedImport, false));
        assert!(!caps.is_enabled(LocalModules));
    }

    #[test]
    fn test_complements() {
        let mut caps = all_off();
        assert!(caps.is_enabled(IntraCommentPragmas));
        assert!(caps.set(IntraCommentPragmas, false));
        assert!(caps.is_enabled(IsoPragmaDelimiters));
    }

    #[test]
    fn test_dialect_table() {
        let pim3 = Capabilities::new(Dialect::Pim3);
        let pim4 = Capabilities::new(Dialect::Pim4);
        let ext = Capabilities::new(Dialect::Extended);

        for caps in [&pim3, &pim4] {
            assert!(caps.is_enabled(Synonyms));
            assert!(caps.is_enabled(OctalLiterals));
            assert!(caps.is_enabled(SuffixLiterals));
            assert!(caps.is_enabled(VariantRecords));
            assert!(caps.is_enabled(LocalModules));
            assert!(caps.is_enabled(WithStatement));
            assert!(!caps.is_enabled(LowlineIdentifiers));
            assert!(!caps.is_enabled(ToDoStatement));
        }
        assert!(pim3.is_enabled(ExportLists));
        assert!(!pim4.is_enabled(ExportLists));

        assert!(!ext.is_enabled(Synonyms));
        assert!(ext.is_enabled(PrefixLiterals));
        assert!(!ext.is_enabled(OctalLiterals));
        assert!(ext.is_enabled(ExtensibleRecords));
        assert!(ext.is_enabled(IndeterminateRecords));
        assert!(!ext.is_enabled(VariantRecords));
        assert!(!ext.is_enabled(LocalModules));
        assert!(ext.is_enabled(IsoPragmaDelimiters));
        assert!(ext.is_enabled(ConstParameters));
        assert!(ext.is_enabled(VariadicParameters));
        assert!(ext.is_enabled(LoopStatement));
    }

    #[test]
    fn test_dialect_matches_preset() {
        for dialect in Dialect::iter() {
            let caps = Capabilities::new(dialect);
            for capability in Capability::iter() {
                assert_eq!(
                    caps.is_enabled(capability),
                    dialect.default_value(capability),
                    "{capability} in {dialect}"
                );
            }
        }
    }

    #[test]
    fn test_switching_dialects() {
        let mut caps = Capabilities::new(Dialect::Extended);
        caps.set_dialect(Dialect::Pim4);
        assert_eq!(caps, Capabilities::new(Dialect::Pim4));
        caps.set_dialect(Dialect::Extended);
        assert_eq!(caps, Capabilities::new(Dialect::Extended));
    }

    #[test]
    fn test_set_by_name() {
        let mut caps = Capabilities::default();
        assert_eq!(caps.set_by_name("line-comments", true), Ok(true));
        assert!(caps.is_enabled(LineComments));
        assert!(caps.set_by_name("line_comments", true).is_err());
    }

    #[test]
    fn test_mutability() {
        let caps = Capabilities::new(Dialect::Pim4);
        assert!(!caps.is_mutable_for_current_dialect(ToDoStatement));
        assert!(caps.is_mutable_for_current_dialect(LineComments));
    }

    #[test]
    fn test_enabled_lists_on_capabilities() {
        let caps = Capabilities::new(Dialect::Pim4);
        let enabled = caps.enabled().collect::<Vec<_>>();
        assert!(enabled.contains(&Synonyms));
        assert!(!enabled.contains(&PrefixLiterals));
    }
}
