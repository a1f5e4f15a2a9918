//! Helpers shared by the blueprint crates: conversions between field
//! elements and big integers, limb decomposition of foreign field elements,
//! serde adapters for arkworks types and the Pallas base field used as
//! native field.

pub mod biguint_helpers;
pub mod field_helpers;
pub mod foreign_field;
pub mod pasta;
pub mod serialization;

pub use biguint_helpers::BigUintHelpers;
pub use field_helpers::{FieldHelpers, Two};
pub use foreign_field::ForeignElement;
