use crate::capabilities::Capabilities;
use crate::capability::Capability;
use crate::dialect::Dialect;
use crate::error::CapabilityError;

/// Collects a dialect and individual overrides, then applies them all at once.
#[derive(Debug, Default, Clone)]
pub struct CapabilitiesBuilder {
    dialect: Dialect,
    requests: Vec<(Capability, bool)>,
}

impl CapabilitiesBuilder {
    /// Creates a new builder for the default dialect
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the dialect the overrides are applied on top of
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Requests `capability` be switched on
    pub fn enable(self, capability: Capability) -> Self {
        self.set(capability, true)
    }

    /// Requests `capability` be switched off
    pub fn disable(self, capability: Capability) -> Self {
        self.set(capability, false)
    }

    /// Requests `capability` be switched to `value`. Requests are applied in order.
    pub fn set(mut self, capability: Capability, value: bool) -> Self {
        self.requests.push((capability, value));
        self
    }

    /// Builds the capability set.
    ///
    /// # Error
    /// Fails on the first request that changes a capability the dialect fixes,
    /// or that breaks a combination rule.
    pub fn build(self) -> Result<Capabilities, CapabilityError> {
        let mut capabilities = Capabilities::new(self.dialect);
        for (capability, value) in self.requests {
            if capabilities.is_enabled(capability) == value {
                continue;
            }
            if !capabilities.is_mutable_for_current_dialect(capability) {
                return Err(CapabilityError::FixedByDialect {
                    capability,
                    dialect: self.dialect,
                });
            }
            if !capabilities.set(capability, value) {
                return Err(CapabilityError::Rejected { capability, value });
            }
        }
        Ok(capabilities)
    }
}
