//! This module implements the addressing of table cells.

use serde::{Deserialize, Serialize};

/// The kind of table a column belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColumnType {
    Witness,
    PublicInput,
    Constant,
}

/// A reference to a cell of the table.
///
/// A relative variable points `rotation` rows away from the row a gate is
/// evaluated on. An absolute variable points at row `rotation` itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    pub typ: ColumnType,
    pub index: usize,
    pub rotation: i64,
    pub relative: bool,
}

impl Variable {
    /// Witness cell relative to the current row
    pub fn witness(index: usize, rotation: i64) -> Self {
        Self {
            typ: ColumnType::Witness,
            index,
            rotation,
            relative: true,
        }
    }

    /// Constant cell relative to the current row
    pub fn constant(index: usize, rotation: i64) -> Self {
        Self {
            typ: ColumnType::Constant,
            index,
            rotation,
            relative: true,
        }
    }

    /// Witness cell at a fixed row
    pub fn witness_at(index: usize, row: usize) -> Self {
        Self::absolute(ColumnType::Witness, index, row)
    }

    /// Public input cell at a fixed row
    pub fn public_input_at(index: usize, row: usize) -> Self {
        Self::absolute(ColumnType::PublicInput, index, row)
    }

    /// Constant cell at a fixed row
    pub fn constant_at(index: usize, row: usize) -> Self {
        Self::absolute(ColumnType::Constant, index, row)
    }

    fn absolute(typ: ColumnType, index: usize, row: usize) -> Self {
        Self {
            typ,
            index,
            rotation: row as i64,
            relative: false,
        }
    }

    /// The row of an absolute variable
    pub fn row(&self) -> Option<usize> {
        if self.relative {
            None
        } else {
            usize::try_from(self.rotation).ok()
        }
    }

    /// Turns a relative variable into the absolute one it denotes when a gate
    /// is evaluated on `row`. Absolute variables are returned as they are.
    /// Returns `None` when the rotation points above the first row.
    pub fn resolve(&self, row: usize) -> Option<Self> {
        if !self.relative {
            return Some(*self);
        }
        let row = (row as i64).checked_add(self.rotation)?;
        let row = usize::try_from(row).ok()?;
        Some(Self::absolute(self.typ, self.index, row))
    }
}
