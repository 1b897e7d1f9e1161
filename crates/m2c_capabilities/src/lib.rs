#![doc = include_str!("../README.md")]

mod builder;
mod capabilities;
mod capability;
mod dialect;
mod error;

pub use self::{
    builder::CapabilitiesBuilder, capabilities::Capabilities, capability::Capability,
    dialect::Dialect, error::CapabilityError,
};
