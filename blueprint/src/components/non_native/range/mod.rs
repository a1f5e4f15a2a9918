//! Proves that a foreign element given as 4 limbs is a canonical residue.

pub mod circuitgates;
pub mod witness;

use crate::{
    circuits::{assignment::Assignment, circuit::Circuit, wires::Variable},
    component::{Component, ComponentLayout, SelectorKey},
    components::{
        non_native::{
            binary_modulus_complement, check_foreign_modulus, check_native_field,
            ForeignFieldParams, ForeignLimbs, LIMB_BITS, LIMB_COUNT,
        },
        range_check::RangeCheck,
    },
    error::Result,
};
use ark_ff::PrimeField;
use log::warn;
use std::marker::PhantomData;

const NAME: &str = "non_native_range";

/// Rows of the canonicality gate, before the range checks
const OWN_ROWS: usize = 2;

/// `x < p` for a foreign element `x` of the field `FF`.
///
/// An input limb that already is the cell the gate reads it from is used in
/// place. Any other input is copied into the gate's row and wired to it.
#[derive(Clone, Debug)]
pub struct ForeignRange<F, FF> {
    layout: ComponentLayout,
    range: RangeCheck<F>,
    _field: PhantomData<FF>,
}

impl<F: PrimeField, FF: ForeignFieldParams> ForeignRange<F, FF> {
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
        let range = RangeCheck::new(layout.witness.clone(), LIMB_BITS, 2 * LIMB_COUNT)?;
        Ok(Self {
            layout,
            range,
            _field: PhantomData,
        })
    }

    fn x_cell(&self, i: usize, row: usize) -> Variable {
        Variable::witness_at(self.layout.w(i), row)
    }

    fn y_cell(&self, i: usize, row: usize) -> Variable {
        Variable::witness_at(self.layout.w(i), row + 1)
    }

    fn in_place(&self, input: &[Variable; LIMB_COUNT], i: usize, row: usize) -> bool {
        input[i] == self.x_cell(i, row)
    }

    /// The limbs of `x` and `y`, as checked by the range check
    fn range_input(&self, row: usize) -> Vec<Variable> {
        (0..LIMB_COUNT)
            .map(|i| self.x_cell(i, row))
            .chain((0..LIMB_COUNT).map(|i| self.y_cell(i, row)))
            .collect()
    }
}

impl<F: PrimeField, FF: ForeignFieldParams> Component<F> for ForeignRange<F, FF> {
    type Input = [Variable; LIMB_COUNT];
    type Output = ();

    fn rows_amount(&self) -> usize {
        OWN_ROWS + Component::<F>::rows_amount(&self.range)
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

    fn output(&self, _start_row: usize) -> Self::Output {}

    fn generate_assignments(
        &self,
        assignment: &mut Assignment<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Output> {
        self.layout.check(assignment)?;

        let mut limbs = [F::zero(); LIMB_COUNT];
        for (i, limb) in limbs.iter_mut().enumerate() {
            *limb = assignment.var_value(&input[i])?;
            if !self.in_place(input, i, start_row) {
                assignment.set_witness(self.layout.w(i), start_row, *limb)?;
            }
        }
        let x = ForeignLimbs::<F>::new(limbs);

        if x.to_biguint() >= FF::modulus() {
            warn!(
                "{} value at row {} is not a canonical residue",
                FF::NAME,
                start_row
            );
        }

        let (y, k) = witness::upper_bound(&x.to_limbs(), &binary_modulus_complement(&FF::modulus()));
        for (j, carry) in k.into_iter().enumerate() {
            assignment.set_witness(self.layout.w(LIMB_COUNT + j), start_row, F::from(carry))?;
        }
        for (i, limb) in y.into_iter().enumerate() {
            assignment.set_witness(self.layout.w(i), start_row + 1, F::from(limb))?;
        }

        self.range.generate_assignments(
            assignment,
            &self.range_input(start_row),
            start_row + OWN_ROWS,
        )
    }

    fn generate_gates(
        &self,
        circuit: &mut Circuit<F>,
        _assignment: &Assignment<F>,
        _input: &Self::Input,
        first_selector: usize,
    ) -> Result<()> {
        let complement = binary_modulus_complement(&FF::modulus());
        let constraints = circuitgates::constraints::<F>(&self.layout, &complement)
            .into_iter()
            .map(|expr| circuit.add_constraint(expr))
            .collect::<Result<Vec<_>>>()?;
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
        for (i, var) in input.iter().enumerate() {
            if !self.in_place(input, i, start_row) {
                circuit.add_copy_constraint((*var, self.x_cell(i, start_row)))?;
            }
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
        assignment.enable_selector(selector, start_row)?;

        self.generate_copy_constraints(circuit, assignment, input, start_row)?;

        self.range.generate_circuit(
            circuit,
            assignment,
            &self.range_input(start_row),
            start_row + OWN_ROWS,
        )
    }
}
