#![doc = include_str!("../README.md")]

mod buffer;
pub mod error;
pub mod position;

pub use self::{
    buffer::{SourceBuffer, SourceStatus, EOT},
    error::SourceError,
    position::{LimitViolation, Position, MAX_COLUMNS, MAX_LINES},
};
