//! This module implements the [`BlueprintError`] and [`CircuitGateError`] types.

use crate::circuits::wires::{ColumnType, Variable};
use thiserror::Error;

/// Errors raised while configuring a component or generating its circuit and witness
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlueprintError {
    #[error("the component uses {expected} witness columns, got {got}")]
    WitnessAmount { expected: usize, got: usize },

    #[error("the component takes {expected} input variables, got {got}")]
    InputAmount { expected: usize, got: usize },

    #[error("{typ:?} column {index} does not exist (the table has {available})")]
    ColumnOutOfRange {
        typ: ColumnType,
        index: usize,
        available: usize,
    },

    #[error("no selector left for {component} (capacity: {capacity})")]
    SelectorCapacity {
        component: String,
        capacity: usize,
    },

    #[error("rows {start}..{end} of {component} overlap rows owned by {owner}")]
    RowOverlap {
        component: &'static str,
        owner: String,
        start: usize,
        end: usize,
    },

    #[error("{amount} rows of {component} from row {start} overflow the row index")]
    RowIndexOverflow {
        component: &'static str,
        start: usize,
        amount: usize,
    },

    #[error("selector {0} is enabled before being allocated")]
    UnallocatedSelector(usize),

    #[error("rotation {0} is outside of the gate window [-1, 1]")]
    RowOffsetOutOfWindow(i64),

    #[error("gate constraints take relative variables only, got {0:?}")]
    AbsoluteVariableInGate(Variable),

    #[error("expected an absolute variable, got {0:?}")]
    RelativeVariable(Variable),

    #[error("cell {0:?} is read before being assigned")]
    UnassignedCell(Variable),

    #[error("foreign modulus has {bits} bits, at most {max} are supported")]
    ForeignModulusTooLarge { bits: u64, max: u64 },

    #[error("native field has {bits} bits, at least {min} are needed")]
    NativeFieldTooSmall { bits: u32, min: u32 },

    #[error("range check width {0} is not in 1..=128")]
    RangeCheckWidth(usize),

    #[error("invalid arithmetization parameters: {0}")]
    InvalidParams(&'static str),
}

/// Errors found when checking an assignment against a circuit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CircuitGateError {
    #[error("constraint {constraint} of selector {selector} does not hold at row {row}")]
    Constraint {
        selector: usize,
        constraint: usize,
        row: usize,
    },

    #[error("copy constraint {left:?} == {right:?} does not hold")]
    CopyConstraint { left: Variable, right: Variable },
}

pub type Result<T> = std::result::Result<T, BlueprintError>;

/// Result of checking an assignment
pub type CircuitGateResult<T> = std::result::Result<T, CircuitGateError>;
