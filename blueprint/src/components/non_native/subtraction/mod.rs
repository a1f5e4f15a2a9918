//! Subtraction `(a - b) mod p` in a foreign field.
//!
//! Inputs are expected to be canonical residues with range checked limbs.
//! This is not enforced: a non-canonical input is logged and produces a
//! witness that generally fails the gate, never a panic.

pub mod circuitgates;
pub mod witness;

use crate::{
    circuits::{assignment::Assignment, circuit::Circuit, wires::Variable},
    component::{Component, ComponentLayout, SelectorKey},
    components::{
        non_native::{
            bigint_to_field, check_foreign_modulus, check_native_field, compose,
            ForeignFieldParams, ForeignRange, LIMB_BITS, LIMB_COUNT,
        },
        range_check::RangeCheck,
    },
    error::Result,
};
use ark_ff::PrimeField;
use blueprint_utils::{BigUintHelpers, FieldHelpers};
use log::{debug, warn};
use num_bigint::BigUint;
use std::marker::PhantomData;

const NAME: &str = "non_native_subtraction";

/// Rows of the subtraction gate, before the sub-components
const OWN_ROWS: usize = 2;

/// Width of the first three chunks of the low limb borrow
pub const BORROW_CHUNK_BITS: u64 = 22;

/// Offset keeping the low limb borrow non-negative
pub const BORROW_OFFSET_BITS: u64 = 67;

/// Witness columns of `a0..a3` on the gate row
const A_COLUMNS: [usize; LIMB_COUNT] = [0, 3, 4, 5];

/// Witness columns of `b0..b3` on the gate row
const B_COLUMNS: [usize; LIMB_COUNT] = [1, 6, 7, 8];

const Q_COLUMN: usize = 2;

/// Witness column of the low limb borrow, on the row before the gate row
const BORROW_COLUMN: usize = 7;

/// Witness column of the first borrow chunk, the others following it
const BORROW_CHUNKS_COLUMN: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubtractionInput {
    pub a: [Variable; LIMB_COUNT],
    pub b: [Variable; LIMB_COUNT],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubtractionOutput {
    /// limbs of `(a - b) mod p`
    pub output: [Variable; LIMB_COUNT],
}

/// `(a - b) mod p` over the foreign field `FF`
#[derive(Clone, Debug)]
pub struct Subtraction<F, FF> {
    layout: ComponentLayout,
    result_range: ForeignRange<F, FF>,
    borrow_range: RangeCheck<F>,
    borrow_top_range: RangeCheck<F>,
    _field: PhantomData<FF>,
}

impl<F: PrimeField, FF: ForeignFieldParams> Subtraction<F, FF> {
    pub fn new(witness: Vec<usize>) -> Result<Self> {
        Self::with_columns(witness, vec![], vec![])
    }

    pub fn with_columns(
        witness: Vec<usize>,
        constant: Vec<usize>,
        public_input: Vec<usize>,
    ) -> Result<Self> {
        check_foreign_modulus(&FF::modulus())?;
        check_native_field::<F>()?;
        let layout = ComponentLayout::new(
            witness,
            constant,
            public_input,
            <Self as Component<F>>::WITNESS_AMOUNT,
        )?;
        let witness = layout.witness.clone();
        Ok(Self {
            result_range: ForeignRange::new(witness.clone())?,
            borrow_range: RangeCheck::new(witness.clone(), BORROW_CHUNK_BITS as usize, 3)?,
            borrow_top_range: RangeCheck::new(witness, 2, 1)?,
            layout,
            _field: PhantomData,
        })
    }

    fn a_cell(&self, i: usize, start_row: usize) -> Variable {
        Variable::witness_at(self.layout.w(A_COLUMNS[i]), start_row + 1)
    }

    fn b_cell(&self, i: usize, start_row: usize) -> Variable {
        Variable::witness_at(self.layout.w(B_COLUMNS[i]), start_row + 1)
    }

    fn borrow_chunk_cell(&self, i: usize, start_row: usize) -> Variable {
        Variable::witness_at(self.layout.w(BORROW_CHUNKS_COLUMN + i), start_row)
    }

    fn result_range_row(&self, start_row: usize) -> usize {
        start_row + OWN_ROWS
    }

    fn borrow_range_row(&self, start_row: usize) -> usize {
        self.result_range_row(start_row) + self.result_range.rows_amount()
    }

    fn borrow_top_range_row(&self, start_row: usize) -> usize {
        self.borrow_range_row(start_row) + self.borrow_range.rows_amount()
    }

    fn borrow_range_input(&self, start_row: usize) -> Vec<Variable> {
        (0..3)
            .map(|i| self.borrow_chunk_cell(i, start_row))
            .collect()
    }

    fn borrow_top_range_input(&self, start_row: usize) -> Vec<Variable> {
        vec![self.borrow_chunk_cell(3, start_row)]
    }

    fn read_limbs(
        assignment: &Assignment<F>,
        vars: &[Variable; LIMB_COUNT],
    ) -> Result<[F; LIMB_COUNT]> {
        let mut limbs = [F::zero(); LIMB_COUNT];
        for (limb, var) in limbs.iter_mut().zip(vars) {
            *limb = assignment.var_value(var)?;
        }
        Ok(limbs)
    }

    fn is_canonical(limbs: &[BigUint; LIMB_COUNT], modulus: &BigUint) -> bool {
        limbs.iter().all(|l| l.bitlen() <= LIMB_BITS) && compose(limbs) < *modulus
    }
}

impl<F: PrimeField, FF: ForeignFieldParams> Component<F> for Subtraction<F, FF> {
    type Input = SubtractionInput;
    type Output = SubtractionOutput;

    fn rows_amount(&self) -> usize {
        OWN_ROWS
            + self.result_range.rows_amount()
            + self.borrow_range.rows_amount()
            + self.borrow_top_range.rows_amount()
    }

    fn gates_amount(&self) -> usize {
        1
    }

    fn selector_key(&self) -> SelectorKey {
        SelectorKey {
            component: NAME.to_string(),
            config: format!("{},witness={:?}", FF::NAME, self.layout.witness),
        }
    }

    fn layout(&self) -> &ComponentLayout {
        &self.layout
    }

    fn output(&self, start_row: usize) -> Self::Output {
        SubtractionOutput {
            output: std::array::from_fn(|i| {
                Variable::witness_at(self.layout.w(i), start_row + OWN_ROWS)
            }),
        }
    }

    fn generate_assignments(
        &self,
        assignment: &mut Assignment<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Output> {
        self.layout.check(assignment)?;

        let modulus = FF::modulus();
        let a = Self::read_limbs(assignment, &input.a)?;
        let b = Self::read_limbs(assignment, &input.b)?;
        let a_big = a.map(|limb| limb.to_biguint());
        let b_big = b.map(|limb| limb.to_biguint());

        if !Self::is_canonical(&a_big, &modulus) || !Self::is_canonical(&b_big, &modulus) {
            warn!(
                "{} subtraction at row {} has a non-canonical input",
                FF::NAME,
                start_row
            );
        }

        let witness = witness::compute(&a_big, &b_big, &modulus);

        // borrow row
        for (i, chunk) in witness.borrow_chunks.into_iter().enumerate() {
            let cell = self.borrow_chunk_cell(i, start_row);
            assignment.set_var(&cell, F::from(chunk))?;
        }
        assignment.set_witness(
            self.layout.w(BORROW_COLUMN),
            start_row,
            bigint_to_field(&witness.borrow),
        )?;

        // gate row
        for i in 0..LIMB_COUNT {
            assignment.set_var(&self.a_cell(i, start_row), a[i])?;
            assignment.set_var(&self.b_cell(i, start_row), b[i])?;
        }
        assignment.set_witness(
            self.layout.w(Q_COLUMN),
            start_row + 1,
            bigint_to_field(&witness.quotient),
        )?;

        // result row, shared with the canonicality check
        let output = self.output(start_row);
        for (var, limb) in output.output.iter().zip(witness.result) {
            assignment.set_var(var, F::from(limb))?;
        }

        self.result_range.generate_assignments(
            assignment,
            &output.output,
            self.result_range_row(start_row),
        )?;
        self.borrow_range.generate_assignments(
            assignment,
            &self.borrow_range_input(start_row),
            self.borrow_range_row(start_row),
        )?;
        self.borrow_top_range.generate_assignments(
            assignment,
            &self.borrow_top_range_input(start_row),
            self.borrow_top_range_row(start_row),
        )?;

        Ok(output)
    }

    fn generate_gates(
        &self,
        circuit: &mut Circuit<F>,
        _assignment: &Assignment<F>,
        _input: &Self::Input,
        first_selector: usize,
    ) -> Result<()> {
        let constraints = circuitgates::constraints::<F>(&self.layout, &FF::modulus())
            .into_iter()
            .map(|expr| circuit.add_constraint(expr))
            .collect::<Result<Vec<_>>>()?;
        debug!("{} subtraction gate, {} constraints", FF::NAME, constraints.len());
        circuit.add_gate(first_selector, constraints);
        Ok(())
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        _assignment: &Assignment<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<()> {
        for i in 0..LIMB_COUNT {
            circuit.add_copy_constraint((input.a[i], self.a_cell(i, start_row)))?;
            circuit.add_copy_constraint((input.b[i], self.b_cell(i, start_row)))?;
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
        self.layout.check(assignment)?;

        let selector = self.gate_selector(circuit, assignment, input)?;
        assignment.reserve_rows(start_row, OWN_ROWS, NAME)?;
        assignment.enable_selector(selector, start_row + 1)?;

        self.generate_copy_constraints(circuit, assignment, input, start_row)?;

        let output = self.output(start_row);
        self.result_range.generate_circuit(
            circuit,
            assignment,
            &output.output,
            self.result_range_row(start_row),
        )?;
        self.borrow_range.generate_circuit(
            circuit,
            assignment,
            &self.borrow_range_input(start_row),
            self.borrow_range_row(start_row),
        )?;
        self.borrow_top_range.generate_circuit(
            circuit,
            assignment,
            &self.borrow_top_range_input(start_row),
            self.borrow_top_range_row(start_row),
        )?;

        Ok(output)
    }
}
