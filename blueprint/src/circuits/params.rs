//! Shape of the table a construction session fills.

use crate::error::{BlueprintError, Result};
use serde::{Deserialize, Serialize};

/// Amount of columns of each kind and the selector capacity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArithmetizationParams {
    pub witness_columns: usize,
    pub public_input_columns: usize,
    pub constant_columns: usize,
    pub selector_columns: usize,
}

impl Default for ArithmetizationParams {
    fn default() -> Self {
        Self {
            witness_columns: 9,
            public_input_columns: 1,
            constant_columns: 1,
            selector_columns: 16,
        }
    }
}

impl ArithmetizationParams {
    pub fn validate(&self) -> Result<()> {
        if self.witness_columns == 0 {
            return Err(BlueprintError::InvalidParams("no witness column"));
        }
        if self.selector_columns == 0 {
            return Err(BlueprintError::InvalidParams("no selector column"));
        }
        Ok(())
    }
}
