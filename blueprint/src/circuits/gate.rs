//! This module implements gates and copy constraints.

use crate::circuits::{expr::Expr, wires::Variable};
use ark_ff::PrimeField;
use serde::{Deserialize, Serialize};

/// A polynomial that must vanish on every row its gate's selector is enabled on.
/// Only [`crate::circuits::Circuit::add_constraint`] builds one, after checking
/// that every variable is relative and within the gate window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "F: PrimeField")]
pub struct Constraint<F> {
    pub id: usize,
    pub expr: Expr<F>,
}

/// A selector together with the constraints it switches on
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "F: PrimeField")]
pub struct Gate<F> {
    pub selector: usize,
    pub constraints: Vec<Constraint<F>>,
}

impl<F: PrimeField> Gate<F> {
    /// Maximal degree of the gate's constraints, without the selector
    pub fn degree(&self) -> u64 {
        self.constraints
            .iter()
            .map(|c| c.expr.degree())
            .max()
            .unwrap_or(0)
    }
}

/// Two absolute cells asserted to hold the same value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CopyConstraint {
    pub left: Variable,
    pub right: Variable,
}
