//! Range check of native limbs against a declared bit width.

pub mod circuitgates;
pub mod witness;

use crate::{
    circuits::{assignment::Assignment, circuit::Circuit, wires::Variable},
    component::{Component, ComponentLayout, SelectorKey},
    error::{BlueprintError, Result},
};
use ark_ff::PrimeField;
use blueprint_utils::FieldHelpers;
use std::marker::PhantomData;

/// Crumbs held by a row
pub const CRUMBS_PER_ROW: usize = 8;

/// Widest limb a range check accepts
pub const MAX_BITS: usize = 128;

const NAME: &str = "range_check";

/// Proves that each of `limbs_amount` input limbs is smaller than `2^bits`
#[derive(Clone, Debug)]
pub struct RangeCheck<F> {
    layout: ComponentLayout,
    bits: usize,
    limbs_amount: usize,
    _field: PhantomData<F>,
}

impl<F: PrimeField> RangeCheck<F> {
    pub fn new(witness: Vec<usize>, bits: usize, limbs_amount: usize) -> Result<Self> {
        Self::with_columns(witness, vec![], vec![], bits, limbs_amount)
    }

    pub fn with_columns(
        witness: Vec<usize>,
        constant: Vec<usize>,
        public_input: Vec<usize>,
        bits: usize,
        limbs_amount: usize,
    ) -> Result<Self> {
        if !(1..=MAX_BITS).contains(&bits) {
            return Err(BlueprintError::RangeCheckWidth(bits));
        }
        let layout = ComponentLayout::new(
            witness,
            constant,
            public_input,
            <Self as Component<F>>::WITNESS_AMOUNT,
        )?;
        Ok(Self {
            layout,
            bits,
            limbs_amount,
            _field: PhantomData,
        })
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Crumbs per limb
    pub fn crumbs(&self) -> usize {
        (self.bits + 1) / 2
    }

    /// Rows of a limb on which the chain gate is enabled
    pub fn chain_rows(&self) -> usize {
        (self.crumbs() - 1) / CRUMBS_PER_ROW
    }

    /// Crumbs on the last row of a limb
    pub fn tail_crumbs(&self) -> usize {
        self.crumbs() - CRUMBS_PER_ROW * self.chain_rows()
    }

    pub fn rows_per_limb(&self) -> usize {
        self.chain_rows() + 1
    }

    fn check_input(&self, input: &[Variable]) -> Result<()> {
        if input.len() != self.limbs_amount {
            return Err(BlueprintError::InputAmount {
                expected: self.limbs_amount,
                got: input.len(),
            });
        }
        Ok(())
    }
}

impl<F: PrimeField> Component<F> for RangeCheck<F> {
    type Input = Vec<Variable>;
    type Output = ();

    fn rows_amount(&self) -> usize {
        self.limbs_amount * self.rows_per_limb()
    }

    fn gates_amount(&self) -> usize {
        2
    }

    fn selector_key(&self) -> SelectorKey {
        SelectorKey {
            component: NAME.to_string(),
            config: format!("bits={},witness={:?}", self.bits, self.layout.witness),
        }
    }

    fn layout(&self) -> &ComponentLayout {
        &self.layout
    }

    fn output(&self, _start_row: usize) -> Self::Output {}

    fn generate_assignments(
        &self,
        assignment: &mut Assignment<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Output> {
        self.check_input(input)?;
        self.layout.check(assignment)?;

        for (j, var) in input.iter().enumerate() {
            let value = assignment.var_value(var)?.to_biguint();
            let first_row = start_row + j * self.rows_per_limb();
            let rows = witness::limb_rows::<F>(&value, self.chain_rows(), self.tail_crumbs());
            for (r, cells) in rows.into_iter().enumerate() {
                for (i, cell) in cells.into_iter().enumerate() {
                    assignment.set_witness(self.layout.w(i), first_row + r, cell)?;
                }
            }
        }

        Ok(())
    }

    fn generate_gates(
        &self,
        circuit: &mut Circuit<F>,
        _assignment: &Assignment<F>,
        _input: &Self::Input,
        first_selector: usize,
    ) -> Result<()> {
        let chain = circuitgates::chain_constraints::<F>(&self.layout)
            .into_iter()
            .map(|expr| circuit.add_constraint(expr))
            .collect::<Result<Vec<_>>>()?;
        circuit.add_gate(first_selector, chain);

        let odd_bits = self.bits % 2 == 1;
        let tail = circuitgates::tail_constraints::<F>(&self.layout, self.tail_crumbs(), odd_bits)
            .into_iter()
            .map(|expr| circuit.add_constraint(expr))
            .collect::<Result<Vec<_>>>()?;
        circuit.add_gate(first_selector + 1, tail);

        Ok(())
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        _assignment: &Assignment<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<()> {
        for (j, var) in input.iter().enumerate() {
            let first_row = start_row + j * self.rows_per_limb();
            let acc = Variable::witness_at(self.layout.w(0), first_row);
            circuit.add_copy_constraint((*var, acc))?;
        }
        Ok(())
    }

    fn generate_circuit(
        &self,
        circuit: &mut Circuit<F>,
        assignment: &mut Assignment<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Output> {
        self.check_input(input)?;
        self.layout.check(assignment)?;

        let first_selector = self.gate_selector(circuit, assignment, input)?;
        assignment.reserve_rows(start_row, self.rows_amount(), NAME)?;

        for j in 0..self.limbs_amount {
            let first_row = start_row + j * self.rows_per_limb();
            for r in 0..self.chain_rows() {
                assignment.enable_selector(first_selector, first_row + r)?;
            }
            assignment.enable_selector(first_selector + 1, first_row + self.chain_rows())?;
        }

        self.generate_copy_constraints(circuit, assignment, input, start_row)?;

        Ok(())
    }
}
