use super::framework::TestFramework;
use crate::{
    circuits::wires::Variable,
    component::Component,
    components::range_check::RangeCheck,
    error::{BlueprintError, CircuitGateError},
};
use blueprint_utils::{pasta::Fp, tests::make_test_rng};
use num_bigint::{BigUint, RandBigInt};

fn witness_columns() -> Vec<usize> {
    (0..9).collect()
}

/// Range checks `values` on `bits` bits from row 0
fn range_check(bits: usize, values: &[BigUint]) -> TestFramework<Fp> {
    let mut test = TestFramework::<Fp>::default();
    let input: Vec<Variable> = values
        .iter()
        .map(|v| test.public_input(Fp::from(v.clone())))
        .collect();
    let component = RangeCheck::<Fp>::new(witness_columns(), bits, values.len()).unwrap();
    test.place(&component, &input, 0).unwrap();
    test
}

fn max_value(bits: usize) -> BigUint {
    (BigUint::from(1u32) << bits) - 1u32
}

#[test]
fn test_range_check_rows() {
    let expected = [
        (1, 1),
        (2, 1),
        (16, 1),
        (17, 2),
        (22, 2),
        (32, 2),
        (66, 5),
        (128, 8),
    ];
    for (bits, rows_per_limb) in expected {
        let component = RangeCheck::<Fp>::new(witness_columns(), bits, 3).unwrap();
        assert_eq!(component.rows_per_limb(), rows_per_limb, "bits = {bits}");
        assert_eq!(component.rows_amount(), 3 * rows_per_limb);
        assert_eq!(component.gates_amount(), 2);
    }
}

#[test]
fn test_range_check_bounds() {
    for bits in [1, 2, 15, 16, 17, 22, 33, 66, 127, 128] {
        let max = max_value(bits);
        range_check(bits, &[BigUint::from(0u32), max.clone()])
            .verify()
            .unwrap_or_else(|e| panic!("bits = {bits}: {e}"));

        let over = max + 1u32;
        assert!(
            range_check(bits, &[over]).verify().is_err(),
            "bits = {bits}: 2^bits accepted"
        );
    }
}

#[test]
fn test_range_check_random() {
    let rng = &mut make_test_rng(None);
    for bits in [3, 22, 66] {
        let bound = BigUint::from(1u32) << bits;
        let values: Vec<BigUint> = (0..4).map(|_| rng.gen_biguint_below(&bound)).collect();
        assert_eq!(range_check(bits, &values).verify(), Ok(()));
    }
}

#[test]
fn test_range_check_odd_top_crumb() {
    // 2^17 fits the crumbs of a 17-bit limb but its top crumb is 2
    let test = range_check(17, &[BigUint::from(1u32) << 17]);
    let failures = test.unsatisfied();
    // tail gate (selector 1) on the tail row, boolean constraint of the only tail crumb
    assert_eq!(
        failures,
        vec![CircuitGateError::Constraint {
            selector: 1,
            constraint: 1,
            row: 1,
        }]
    );
}

#[test]
fn test_range_check_overflow_tail() {
    let test = range_check(16, &[BigUint::from(1u32) << 16]);
    assert_eq!(
        test.verify(),
        Err(CircuitGateError::Constraint {
            selector: 1,
            constraint: 0,
            row: 0,
        })
    );
}

#[test]
fn test_range_check_copy_constraint() {
    let mut test = range_check(22, &[BigUint::from(5u32)]);
    assert_eq!(test.circuit().copy_constraints().len(), 1);
    // the accumulator no longer matches the input
    test.assignment_mut()
        .overwrite_witness(0, 0, Fp::from(6u32));
    assert!(test.verify().is_err());
}

#[test]
fn test_range_check_width() {
    assert_eq!(
        RangeCheck::<Fp>::new(witness_columns(), 0, 1).unwrap_err(),
        BlueprintError::RangeCheckWidth(0)
    );
    assert_eq!(
        RangeCheck::<Fp>::new(witness_columns(), 129, 1).unwrap_err(),
        BlueprintError::RangeCheckWidth(129)
    );
}

#[test]
fn test_range_check_input_amount() {
    let mut test = TestFramework::<Fp>::default();
    let var = test.public_input(Fp::from(1u32));
    let component = RangeCheck::<Fp>::new(witness_columns(), 8, 2).unwrap();
    assert_eq!(
        test.place(&component, &vec![var], 0),
        Err(BlueprintError::InputAmount {
            expected: 2,
            got: 1
        })
    );
}

#[test]
fn test_range_check_unassigned_input() {
    let mut test = TestFramework::<Fp>::default();
    let var = Variable::public_input_at(0, 3);
    let component = RangeCheck::<Fp>::new(witness_columns(), 8, 1).unwrap();
    assert_eq!(
        test.place(&component, &vec![var], 0),
        Err(BlueprintError::UnassignedCell(var))
    );
}
