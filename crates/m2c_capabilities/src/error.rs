use crate::capability::Capability;
use crate::dialect::Dialect;
use thiserror::Error;

/// Errors raised while configuring capabilities
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("unknown capability {0:?}")]
    Unknown(String),
    #[error("unknown dialect {0:?}")]
    UnknownDialect(String),
    #[error("capability {capability} is fixed under dialect {dialect}")]
    FixedByDialect {
        capability: Capability,
        dialect: Dialect,
    },
    #[error("can not {} capability {capability} with the current settings", verb(.value))]
    Rejected { capability: Capability, value: bool },
}

fn verb(value: &bool) -> &'static str {
    if *value {
        "enable"
    } else {
        "disable"
    }
}
