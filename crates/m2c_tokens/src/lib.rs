#![doc = include_str!("../README.md")]

mod symbol;
pub mod token;
mod token_set;

pub use m2c_source::Position;

pub use self::{
    symbol::Symbol,
    token::{Token, TokenCategory},
    token_set::TokenSet,
};
