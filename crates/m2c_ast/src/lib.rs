#![doc = include_str!("../README.md")]

mod arena;
mod display;
mod error;
pub mod kind;

pub use self::{
    arena::{Ast, NodeId},
    display::AstDisplay,
    error::AstError,
    kind::{Arity, NodeKind},
};
