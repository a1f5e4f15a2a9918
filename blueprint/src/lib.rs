#![doc = include_str!("../README.md")]

pub mod circuits;
pub mod component;
pub mod components;
pub mod error;

#[cfg(test)]
mod tests;

pub use component::{Component, ComponentLayout, SelectorKey};
pub use error::{BlueprintError, CircuitGateError};
