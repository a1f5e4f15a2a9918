//! The constraint side of a construction session: gates and copy constraints.

use crate::{
    circuits::{
        assignment::Assignment,
        expr::Expr,
        gate::{Constraint, CopyConstraint, Gate},
        wires::Variable,
    },
    error::{BlueprintError, CircuitGateError, CircuitGateResult, Result},
};
use ark_ff::PrimeField;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "F: PrimeField")]
pub struct Circuit<F> {
    gates: Vec<Gate<F>>,
    copy_constraints: Vec<CopyConstraint>,
    next_constraint_id: usize,
}

impl<F> Default for Circuit<F> {
    fn default() -> Self {
        Self {
            gates: vec![],
            copy_constraints: vec![],
            next_constraint_id: 0,
        }
    }
}

impl<F: PrimeField> Circuit<F> {
    /// Turns an expression into a gate constraint. Every cell it reads must
    /// be relative, at most one row away from the selector's row.
    pub fn add_constraint(&mut self, expr: Expr<F>) -> Result<Constraint<F>> {
        for var in expr.variables() {
            if !var.relative {
                return Err(BlueprintError::AbsoluteVariableInGate(var));
            }
            if !(-1..=1).contains(&var.rotation) {
                return Err(BlueprintError::RowOffsetOutOfWindow(var.rotation));
            }
        }
        let id = self.next_constraint_id;
        self.next_constraint_id += 1;
        Ok(Constraint { id, expr })
    }

    /// Attaches `constraints` to `selector` and returns the gate's index
    pub fn add_gate(&mut self, selector: usize, constraints: Vec<Constraint<F>>) -> usize {
        debug!(
            "gate on selector {} with {} constraints",
            selector,
            constraints.len()
        );
        self.gates.push(Gate {
            selector,
            constraints,
        });
        self.gates.len() - 1
    }

    /// Asserts two absolute cells equal
    pub fn add_copy_constraint(&mut self, (left, right): (Variable, Variable)) -> Result<()> {
        for var in [left, right] {
            if var.relative {
                return Err(BlueprintError::RelativeVariable(var));
            }
        }
        self.copy_constraints.push(CopyConstraint { left, right });
        Ok(())
    }

    pub fn gates(&self) -> &[Gate<F>] {
        &self.gates
    }

    pub fn copy_constraints(&self) -> &[CopyConstraint] {
        &self.copy_constraints
    }

    pub fn constraints_amount(&self) -> usize {
        self.gates.iter().map(|g| g.constraints.len()).sum()
    }

    /// Maximal constraint degree, the selector included
    pub fn max_degree(&self) -> u64 {
        self.gates
            .iter()
            .map(|g| g.degree() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Gate constraints `assignment` violates, gate by gate and row by row
    fn gate_failures<'a>(
        &'a self,
        assignment: &'a Assignment<F>,
    ) -> impl Iterator<Item = CircuitGateError> + 'a {
        self.gates.iter().flat_map(move |gate| {
            assignment.selector_rows(gate.selector).flat_map(move |row| {
                let cell = move |var: &Variable| {
                    var.resolve(row)
                        .map(|v| assignment.cell_or_zero(&v))
                        .unwrap_or_else(F::zero)
                };
                gate.constraints
                    .iter()
                    .enumerate()
                    .filter(move |(_, c)| !c.expr.evaluate(&cell).is_zero())
                    .map(move |(i, _)| CircuitGateError::Constraint {
                        selector: gate.selector,
                        constraint: i,
                        row,
                    })
            })
        })
    }

    /// Every gate constraint `assignment` violates, with the row it fails on
    pub fn unsatisfied_constraints(&self, assignment: &Assignment<F>) -> Vec<CircuitGateError> {
        self.gate_failures(assignment).collect()
    }

    /// Checks `assignment` against every gate on every row its selector is
    /// enabled on, then every copy constraint. Unwritten cells count as zero.
    pub fn verify_witness(&self, assignment: &Assignment<F>) -> CircuitGateResult<()> {
        if let Some(failure) = self.gate_failures(assignment).next() {
            return Err(failure);
        }

        for copy in &self.copy_constraints {
            if assignment.cell_or_zero(&copy.left) != assignment.cell_or_zero(&copy.right) {
                return Err(CircuitGateError::CopyConstraint {
                    left: copy.left,
                    right: copy.right,
                });
            }
        }

        Ok(())
    }
}
