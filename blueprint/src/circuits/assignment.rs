//! The table of values a circuit is checked against.
//!
//! Cells are written once. Selectors are allocated here as well, since the
//! same selector column must be found again by every later instance of a
//! component with the same configuration.

use crate::{
    circuits::{
        params::ArithmetizationParams,
        wires::{ColumnType, Variable},
    },
    component::SelectorKey,
    error::{BlueprintError, Result},
};
use ark_ff::PrimeField;
use blueprint_utils::serialization::SerdeAs;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::collections::BTreeMap;

/// Rows owned by one component instance
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowWindow {
    pub start: usize,
    pub end: usize,
    pub component: String,
}

#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "F: PrimeField")]
pub struct Assignment<F> {
    params: ArithmetizationParams,

    #[serde_as(as = "Vec<Vec<Option<SerdeAs>>>")]
    witness: Vec<Vec<Option<F>>>,

    #[serde_as(as = "Vec<Vec<Option<SerdeAs>>>")]
    public_input: Vec<Vec<Option<F>>>,

    #[serde_as(as = "Vec<Vec<Option<SerdeAs>>>")]
    constant: Vec<Vec<Option<F>>>,

    /// activation bitmap, one per allocated selector
    selectors: Vec<Vec<bool>>,

    /// first selector of every configuration placed so far
    #[serde_as(as = "Vec<(_, _)>")]
    selector_cache: BTreeMap<SelectorKey, usize>,

    windows: Vec<RowWindow>,
}

impl<F: PrimeField> Assignment<F> {
    pub fn new(params: ArithmetizationParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            witness: vec![vec![]; params.witness_columns],
            public_input: vec![vec![]; params.public_input_columns],
            constant: vec![vec![]; params.constant_columns],
            selectors: vec![],
            selector_cache: BTreeMap::new(),
            windows: vec![],
        })
    }

    pub fn params(&self) -> &ArithmetizationParams {
        &self.params
    }

    fn table(&self, typ: ColumnType) -> &Vec<Vec<Option<F>>> {
        match typ {
            ColumnType::Witness => &self.witness,
            ColumnType::PublicInput => &self.public_input,
            ColumnType::Constant => &self.constant,
        }
    }

    fn table_mut(&mut self, typ: ColumnType) -> &mut Vec<Vec<Option<F>>> {
        match typ {
            ColumnType::Witness => &mut self.witness,
            ColumnType::PublicInput => &mut self.public_input,
            ColumnType::Constant => &mut self.constant,
        }
    }

    /// Checks that a column exists in this session's table
    pub fn check_column(&self, typ: ColumnType, index: usize) -> Result<()> {
        let available = self.table(typ).len();
        if index >= available {
            return Err(BlueprintError::ColumnOutOfRange {
                typ,
                index,
                available,
            });
        }
        Ok(())
    }

    fn get(&self, typ: ColumnType, col: usize, row: usize) -> Option<F> {
        self.table(typ)
            .get(col)
            .and_then(|column| column.get(row))
            .copied()
            .flatten()
    }

    /// Writes a cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell already holds a value.
    fn set(&mut self, typ: ColumnType, col: usize, row: usize, value: F) -> Result<()> {
        self.check_column(typ, col)?;
        let column = &mut self.table_mut(typ)[col];
        if column.len() <= row {
            column.resize(row + 1, None);
        }
        assert!(
            column[row].is_none(),
            "{typ:?} cell ({col}, {row}) is assigned twice"
        );
        column[row] = Some(value);
        Ok(())
    }

    pub fn witness(&self, col: usize, row: usize) -> Option<F> {
        self.get(ColumnType::Witness, col, row)
    }

    pub fn set_witness(&mut self, col: usize, row: usize, value: F) -> Result<()> {
        self.set(ColumnType::Witness, col, row, value)
    }

    pub fn public_input(&self, col: usize, row: usize) -> Option<F> {
        self.get(ColumnType::PublicInput, col, row)
    }

    pub fn set_public_input(&mut self, col: usize, row: usize, value: F) -> Result<()> {
        self.set(ColumnType::PublicInput, col, row, value)
    }

    pub fn constant(&self, col: usize, row: usize) -> Option<F> {
        self.get(ColumnType::Constant, col, row)
    }

    pub fn set_constant(&mut self, col: usize, row: usize, value: F) -> Result<()> {
        self.set(ColumnType::Constant, col, row, value)
    }

    /// Replaces a written witness cell, to build invalid witnesses in tests
    #[cfg(test)]
    pub(crate) fn overwrite_witness(&mut self, col: usize, row: usize, value: F) {
        self.witness[col][row] = Some(value);
    }

    /// Value of an absolute variable; the cell must have been written
    pub fn var_value(&self, var: &Variable) -> Result<F> {
        let row = var.row().ok_or(BlueprintError::RelativeVariable(*var))?;
        self.check_column(var.typ, var.index)?;
        self.get(var.typ, var.index, row)
            .ok_or(BlueprintError::UnassignedCell(*var))
    }

    /// Writes the cell an absolute variable points at
    pub fn set_var(&mut self, var: &Variable, value: F) -> Result<()> {
        let row = var.row().ok_or(BlueprintError::RelativeVariable(*var))?;
        self.set(var.typ, var.index, row, value)
    }

    /// Value of an absolute variable, unwritten cells being zero
    pub fn cell_or_zero(&self, var: &Variable) -> F {
        var.row()
            .and_then(|row| self.get(var.typ, var.index, row))
            .unwrap_or_else(F::zero)
    }

    //
    // Selectors
    //

    pub fn find_selector(&self, key: &SelectorKey) -> Option<usize> {
        self.selector_cache.get(key).copied()
    }

    /// Allocates `gates_amount` consecutive selectors for `key` and returns the first one
    pub fn allocate_selector(&mut self, key: SelectorKey, gates_amount: usize) -> Result<usize> {
        let first = self.selectors.len();
        if first + gates_amount > self.params.selector_columns {
            return Err(BlueprintError::SelectorCapacity {
                component: key.component,
                capacity: self.params.selector_columns,
            });
        }
        self.selectors
            .extend(std::iter::repeat(vec![]).take(gates_amount));
        debug!(
            "allocated selectors {}..{} for {}",
            first,
            first + gates_amount,
            key
        );
        self.selector_cache.insert(key, first);
        Ok(first)
    }

    /// Switches selector `index` on at `row`
    pub fn enable_selector(&mut self, index: usize, row: usize) -> Result<()> {
        let bitmap = self
            .selectors
            .get_mut(index)
            .ok_or(BlueprintError::UnallocatedSelector(index))?;
        if bitmap.len() <= row {
            bitmap.resize(row + 1, false);
        }
        bitmap[row] = true;
        Ok(())
    }

    pub fn selector_enabled(&self, index: usize, row: usize) -> bool {
        self.selectors
            .get(index)
            .and_then(|bitmap| bitmap.get(row))
            .copied()
            .unwrap_or(false)
    }

    /// Rows selector `index` is enabled on, in increasing order
    pub fn selector_rows(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.selectors
            .get(index)
            .into_iter()
            .flat_map(|bitmap| bitmap.iter().enumerate())
            .filter_map(|(row, enabled)| enabled.then_some(row))
    }

    pub fn selectors_amount(&self) -> usize {
        self.selectors.len()
    }

    //
    // Row windows
    //

    /// Records that `component` owns rows `start..start + amount`
    pub fn reserve_rows(
        &mut self,
        start: usize,
        amount: usize,
        component: &'static str,
    ) -> Result<()> {
        let end = start
            .checked_add(amount)
            .ok_or(BlueprintError::RowIndexOverflow {
                component,
                start,
                amount,
            })?;
        if let Some(owner) = self
            .windows
            .iter()
            .find(|w| start < w.end && w.start < end)
        {
            return Err(BlueprintError::RowOverlap {
                component,
                owner: owner.component.clone(),
                start,
                end,
            });
        }
        trace!("{} placed on rows {}..{}", component, start, end);
        self.windows.push(RowWindow {
            start,
            end,
            component: component.to_string(),
        });
        Ok(())
    }

    pub fn windows(&self) -> &[RowWindow] {
        &self.windows
    }

    /// Number of rows in use, by cells or by reserved windows
    pub fn rows_amount(&self) -> usize {
        let cells = [&self.witness, &self.public_input, &self.constant]
            .into_iter()
            .flatten()
            .map(Vec::len);
        let selectors = self.selectors.iter().map(Vec::len);
        let windows = self.windows.iter().map(|w| w.end);
        cells.chain(selectors).chain(windows).max().unwrap_or(0)
    }
}
