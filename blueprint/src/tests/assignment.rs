use super::framework::TestFramework;
use crate::{
    circuits::{
        expr::prologue::*,
        wires::{ColumnType, Variable},
        ArithmetizationParams, Assignment, Circuit,
    },
    component::{Component, SelectorKey},
    components::non_native::{Curve25519Base, Subtraction, SubtractionInput},
    error::{BlueprintError, CircuitGateError},
};
use blueprint_utils::pasta::Fp;
use num_bigint::BigUint;

fn assignment() -> Assignment<Fp> {
    Assignment::new(ArithmetizationParams::default()).unwrap()
}

fn key(config: &str) -> SelectorKey {
    SelectorKey {
        component: "test".to_string(),
        config: config.to_string(),
    }
}

#[test]
fn test_params_validation() {
    assert_eq!(ArithmetizationParams::default().validate(), Ok(()));
    for params in [
        ArithmetizationParams {
            witness_columns: 0,
            ..ArithmetizationParams::default()
        },
        ArithmetizationParams {
            selector_columns: 0,
            ..ArithmetizationParams::default()
        },
    ] {
        assert!(matches!(
            Assignment::<Fp>::new(params),
            Err(BlueprintError::InvalidParams(_))
        ));
    }
}

#[test]
fn test_params_serialization() {
    let params = ArithmetizationParams {
        witness_columns: 15,
        ..ArithmetizationParams::default()
    };
    let json = serde_json::to_string(&params).unwrap();
    let back: ArithmetizationParams = serde_json::from_str(&json).unwrap();
    assert_eq!(back, params);
}

#[test]
fn test_cells() {
    let mut assignment = assignment();
    assert_eq!(assignment.witness(3, 7), None);
    assert_eq!(assignment.rows_amount(), 0);

    assignment.set_witness(3, 7, Fp::from(5u32)).unwrap();
    assignment.set_constant(0, 2, Fp::from(1u32)).unwrap();
    assert_eq!(assignment.witness(3, 7), Some(Fp::from(5u32)));
    assert_eq!(assignment.witness(3, 6), None);
    assert_eq!(assignment.constant(0, 2), Some(Fp::from(1u32)));
    assert_eq!(assignment.rows_amount(), 8);

    let var = Variable::witness_at(3, 7);
    assert_eq!(assignment.var_value(&var), Ok(Fp::from(5u32)));
    assert_eq!(
        assignment.cell_or_zero(&Variable::witness_at(3, 8)),
        Fp::from(0u32)
    );
}

#[test]
#[should_panic(expected = "Witness cell (3, 7) is assigned twice")]
fn test_cells_write_once() {
    let mut assignment = assignment();
    assignment.set_witness(3, 7, Fp::from(5u32)).unwrap();
    let _ = assignment.set_witness(3, 7, Fp::from(5u32));
}

#[test]
fn test_cells_out_of_range() {
    let mut assignment = assignment();
    assert_eq!(
        assignment.set_witness(9, 0, Fp::from(1u32)),
        Err(BlueprintError::ColumnOutOfRange {
            typ: ColumnType::Witness,
            index: 9,
            available: 9
        })
    );
    assert_eq!(
        assignment.set_public_input(1, 0, Fp::from(1u32)),
        Err(BlueprintError::ColumnOutOfRange {
            typ: ColumnType::PublicInput,
            index: 1,
            available: 1
        })
    );
}

#[test]
fn test_var_value_errors() {
    let assignment = assignment();
    let unassigned = Variable::witness_at(0, 4);
    assert_eq!(
        assignment.var_value(&unassigned),
        Err(BlueprintError::UnassignedCell(unassigned))
    );
    let relative = Variable::witness(0, 1);
    assert_eq!(
        assignment.var_value(&relative),
        Err(BlueprintError::RelativeVariable(relative))
    );
}

#[test]
fn test_variable_resolution() {
    assert_eq!(
        Variable::witness(2, -1).resolve(5),
        Some(Variable::witness_at(2, 4))
    );
    assert_eq!(Variable::witness(2, -1).resolve(0), None);
    let absolute = Variable::constant_at(0, 3);
    assert_eq!(absolute.resolve(10), Some(absolute));
    assert_eq!(absolute.row(), Some(3));
    assert_eq!(Variable::witness(0, 0).row(), None);
}

#[test]
fn test_selectors() {
    let mut assignment = Assignment::<Fp>::new(ArithmetizationParams {
        selector_columns: 3,
        ..ArithmetizationParams::default()
    })
    .unwrap();

    assert_eq!(assignment.find_selector(&key("a")), None);
    assert_eq!(assignment.allocate_selector(key("a"), 2), Ok(0));
    assert_eq!(assignment.find_selector(&key("a")), Some(0));
    assert_eq!(assignment.find_selector(&key("b")), None);
    assert_eq!(
        assignment.allocate_selector(key("b"), 2),
        Err(BlueprintError::SelectorCapacity {
            component: "test".to_string(),
            capacity: 3
        })
    );
    assert_eq!(assignment.allocate_selector(key("b"), 1), Ok(2));
    assert_eq!(assignment.selectors_amount(), 3);

    assignment.enable_selector(1, 4).unwrap();
    assignment.enable_selector(1, 2).unwrap();
    assert!(assignment.selector_enabled(1, 4));
    assert!(!assignment.selector_enabled(1, 3));
    assert!(!assignment.selector_enabled(0, 4));
    assert!(!assignment.selector_enabled(7, 0));
    assert_eq!(assignment.selector_rows(1).collect::<Vec<_>>(), vec![2, 4]);
    assert_eq!(assignment.rows_amount(), 5);

    assert_eq!(
        assignment.enable_selector(3, 0),
        Err(BlueprintError::UnallocatedSelector(3))
    );
}

#[test]
fn test_reserve_rows() {
    let mut assignment = assignment();
    assignment.reserve_rows(0, 4, "first").unwrap();
    assignment.reserve_rows(4, 2, "second").unwrap();
    assert_eq!(
        assignment.reserve_rows(5, 3, "third"),
        Err(BlueprintError::RowOverlap {
            component: "third",
            owner: "second".to_string(),
            start: 5,
            end: 8
        })
    );
    assignment.reserve_rows(8, 1, "third").unwrap();
    assert_eq!(assignment.windows().len(), 3);
    assert_eq!(assignment.rows_amount(), 9);

    assert_eq!(
        assignment.reserve_rows(usize::MAX, 2, "fourth"),
        Err(BlueprintError::RowIndexOverflow {
            component: "fourth",
            start: usize::MAX,
            amount: 2
        })
    );
    assert_eq!(assignment.windows().len(), 3);
}

#[test]
fn test_constraint_validation() {
    let mut circuit = Circuit::<Fp>::default();
    let first = circuit.add_constraint(witness_curr(0) - witness_next(1)).unwrap();
    let second = circuit.add_constraint(witness_prev(2).square()).unwrap();
    assert_eq!((first.id, second.id), (0, 1));

    let far = Variable::witness(0, 2);
    assert_eq!(
        circuit.add_constraint(E::cell(far)).unwrap_err(),
        BlueprintError::RowOffsetOutOfWindow(2)
    );
    let absolute = Variable::witness_at(0, 2);
    assert_eq!(
        circuit.add_constraint(E::cell(absolute) + E::one()).unwrap_err(),
        BlueprintError::AbsoluteVariableInGate(absolute)
    );

    let relative = Variable::witness(0, 0);
    assert_eq!(
        circuit
            .add_copy_constraint((relative, Variable::witness_at(0, 0)))
            .unwrap_err(),
        BlueprintError::RelativeVariable(relative)
    );
}

#[test]
fn test_verify_witness() {
    // w0 * w1 = w2 on the row after w0 + w1 = w2
    let mut circuit = Circuit::<Fp>::default();
    let mut assignment = assignment();
    let sum = circuit
        .add_constraint(witness_curr(0) + witness_curr(1) - witness_curr(2))
        .unwrap();
    let product = circuit
        .add_constraint(witness_next(0) * witness_next(1) - witness_next(2))
        .unwrap();
    let selector = assignment.allocate_selector(key("mix"), 1).unwrap();
    circuit.add_gate(selector, vec![sum, product]);
    assert_eq!(circuit.max_degree(), 3);
    assert_eq!(circuit.constraints_amount(), 2);

    for (row, cells) in [[2u32, 3, 5], [4, 6, 24]].into_iter().enumerate() {
        for (col, value) in cells.into_iter().enumerate() {
            assignment.set_witness(col, row, Fp::from(value)).unwrap();
        }
    }
    assignment.enable_selector(selector, 0).unwrap();
    assert_eq!(circuit.verify_witness(&assignment), Ok(()));

    // an unwritten cell counts as zero
    circuit
        .add_copy_constraint((Variable::witness_at(3, 0), Variable::witness_at(3, 5)))
        .unwrap();
    assert_eq!(circuit.verify_witness(&assignment), Ok(()));

    let left = Variable::witness_at(0, 0);
    let right = Variable::witness_at(0, 1);
    circuit.add_copy_constraint((left, right)).unwrap();
    assert_eq!(
        circuit.verify_witness(&assignment),
        Err(CircuitGateError::CopyConstraint { left, right })
    );

    assignment.overwrite_witness(2, 1, Fp::from(23u32));
    assert_eq!(
        circuit.verify_witness(&assignment),
        Err(CircuitGateError::Constraint {
            selector,
            constraint: 1,
            row: 0
        })
    );
    assert_eq!(
        circuit.unsatisfied_constraints(&assignment),
        vec![CircuitGateError::Constraint {
            selector,
            constraint: 1,
            row: 0
        }]
    );

    // the first gate failure is reported before any copy constraint
    assignment.overwrite_witness(1, 0, Fp::from(4u32));
    let failures = circuit.unsatisfied_constraints(&assignment);
    assert_eq!(failures.len(), 2);
    assert_eq!(
        failures[0],
        CircuitGateError::Constraint {
            selector,
            constraint: 0,
            row: 0
        }
    );
    assert_eq!(circuit.verify_witness(&assignment), Err(failures[0].clone()));
}

#[test]
fn test_serialization() {
    let mut circuit = Circuit::<Fp>::default();
    let mut assignment = assignment();
    let constraint = circuit
        .add_constraint(witness_curr(0) - constant(Fp::from(7u32)))
        .unwrap();
    let selector = assignment.allocate_selector(key("seven"), 1).unwrap();
    circuit.add_gate(selector, vec![constraint]);
    assignment.set_witness(0, 1, Fp::from(7u32)).unwrap();
    assignment.enable_selector(selector, 1).unwrap();
    assignment.reserve_rows(1, 1, "seven").unwrap();

    let bytes = rmp_serde::to_vec(&circuit).unwrap();
    let circuit_back: Circuit<Fp> = rmp_serde::from_slice(&bytes).unwrap();
    assert_eq!(circuit_back, circuit);

    let bytes = rmp_serde::to_vec(&assignment).unwrap();
    let assignment_back: Assignment<Fp> = rmp_serde::from_slice(&bytes).unwrap();
    assert_eq!(assignment_back.witness(0, 1), Some(Fp::from(7u32)));
    assert_eq!(assignment_back.windows(), assignment.windows());
    assert_eq!(assignment_back.find_selector(&key("seven")), Some(selector));
    assert_eq!(circuit_back.verify_witness(&assignment_back), Ok(()));
}

#[test]
fn test_selector_reuse_after_serialization() {
    let component = Subtraction::<Fp, Curve25519Base>::new((0..9).collect()).unwrap();
    let mut test = TestFramework::<Fp>::default();
    let input = SubtractionInput {
        a: test.foreign_input(&BigUint::from(7u32)),
        b: test.foreign_input(&BigUint::from(9u32)),
    };
    test.place(&component, &input, 0).unwrap();
    let gates = test.circuit().gates().len();
    let selectors = test.assignment().selectors_amount();

    let bytes = rmp_serde::to_vec(test.assignment()).unwrap();
    *test.assignment_mut() = rmp_serde::from_slice(&bytes).unwrap();
    assert_eq!(
        test.assignment().find_selector(&component.selector_key()),
        Some(0)
    );

    let input = SubtractionInput {
        a: test.foreign_input(&BigUint::from(3u32)),
        b: test.foreign_input(&BigUint::from(1u32)),
    };
    let output = test
        .place(&component, &input, component.rows_amount())
        .unwrap();
    assert_eq!(test.circuit().gates().len(), gates);
    assert_eq!(test.assignment().selectors_amount(), selectors);
    assert_eq!(test.verify(), Ok(()));
    assert_eq!(test.foreign_value(&output.output), BigUint::from(2u32));
}
