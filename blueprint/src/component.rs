//! The protocol every component follows to lay out its witness, emit its
//! gates and wire its inputs.
//!
//! All operations take the construction session explicitly: the circuit, the
//! assignment and the first row of the instance. A component owns the rows
//! `start_row..start_row + rows_amount()` and hands the rows after its own to
//! its sub-components.

use crate::{
    circuits::{assignment::Assignment, circuit::Circuit, wires::ColumnType},
    error::{BlueprintError, Result},
};
use ark_ff::PrimeField;
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifies the gates of a component configuration. Instances with equal
/// keys share their selectors.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SelectorKey {
    pub component: String,
    pub config: String,
}

impl Display for SelectorKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.component, self.config)
    }
}

/// Columns a component instance works on
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ComponentLayout {
    pub witness: Vec<usize>,
    pub constant: Vec<usize>,
    pub public_input: Vec<usize>,
}

impl ComponentLayout {
    pub fn new(
        witness: Vec<usize>,
        constant: Vec<usize>,
        public_input: Vec<usize>,
        witness_amount: usize,
    ) -> Result<Self> {
        if witness.len() != witness_amount {
            return Err(BlueprintError::WitnessAmount {
                expected: witness_amount,
                got: witness.len(),
            });
        }
        Ok(Self {
            witness,
            constant,
            public_input,
        })
    }

    /// The table column of the component's `i`-th witness column
    pub fn w(&self, i: usize) -> usize {
        self.witness[i]
    }

    /// Checks every column against the session's table
    pub fn check<F: PrimeField>(&self, assignment: &Assignment<F>) -> Result<()> {
        let columns = [
            (ColumnType::Witness, &self.witness),
            (ColumnType::Constant, &self.constant),
            (ColumnType::PublicInput, &self.public_input),
        ];
        for (typ, indices) in columns {
            for &index in indices {
                assignment.check_column(typ, index)?;
            }
        }
        Ok(())
    }
}

pub trait Component<F: PrimeField> {
    type Input;
    type Output;

    /// Witness columns every instance needs
    const WITNESS_AMOUNT: usize = 9;

    fn rows_amount(&self) -> usize;

    /// Consecutive selectors the component's gates use
    fn gates_amount(&self) -> usize;

    fn selector_key(&self) -> SelectorKey;

    fn layout(&self) -> &ComponentLayout;

    /// Output variables of an instance placed at `start_row`
    fn output(&self, start_row: usize) -> Self::Output;

    /// Writes the witness of an instance placed at `start_row`, sub-components included
    fn generate_assignments(
        &self,
        assignment: &mut Assignment<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Output>;

    /// Emits the gates on selectors `first_selector..first_selector + gates_amount()`.
    /// Called once per configuration; [`Component::gate_selector`] takes care of it.
    fn generate_gates(
        &self,
        circuit: &mut Circuit<F>,
        assignment: &Assignment<F>,
        input: &Self::Input,
        first_selector: usize,
    ) -> Result<()>;

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        assignment: &Assignment<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<()>;

    /// Places an instance at `start_row`: selectors, copy constraints and
    /// sub-components
    fn generate_circuit(
        &self,
        circuit: &mut Circuit<F>,
        assignment: &mut Assignment<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Output>;

    /// First selector of this configuration, allocating it and emitting the
    /// gates if no instance with the same key was placed before
    fn gate_selector(
        &self,
        circuit: &mut Circuit<F>,
        assignment: &mut Assignment<F>,
        input: &Self::Input,
    ) -> Result<usize> {
        let key = self.selector_key();
        if let Some(first) = assignment.find_selector(&key) {
            trace!("reusing selector {} for {}", first, key);
            return Ok(first);
        }
        let first = assignment.allocate_selector(key, self.gates_amount())?;
        self.generate_gates(circuit, assignment, input, first)?;
        Ok(first)
    }
}
