//! Conversions between native field elements and big integers.

use ark_ff::{Field, PrimeField};
use num_bigint::BigUint;

/// Field element helpers
pub trait FieldHelpers<F> {
    /// Canonical integer representative
    fn to_biguint(&self) -> BigUint
    where
        F: PrimeField;
}

impl<F: Field> FieldHelpers<F> for F {
    fn to_biguint(&self) -> BigUint
    where
        F: PrimeField,
    {
        (*self).into()
    }
}

/// Powers of two in a field
pub trait Two<F> {
    /// 2
    fn two() -> F;

    /// 2^pow
    fn two_pow(pow: u64) -> F;
}

impl<F: Field> Two<F> for F {
    fn two() -> F {
        F::from(2u8)
    }

    fn two_pow(pow: u64) -> F {
        F::two().pow([pow])
    }
}
