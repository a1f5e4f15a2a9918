//! Limb decomposition of foreign field elements.
//!
//! A foreign value is held as `N` native field elements, each carrying `B`
//! bits of the integer in little-endian order. Limbs are split with exact big
//! integer shifts so `B` need not be a multiple of 8.

use crate::field_helpers::FieldHelpers;
use ark_ff::PrimeField;
use num_bigint::BigUint;
use std::fmt::{Debug, Formatter};

/// The foreign field modulus of secp256k1 (big endian),
/// `2^256 - 2^32 - 2^9 - 2^8 - 2^7 - 2^6 - 2^4 - 1`
pub const SECP256K1_MOD: &[u8] = &[
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF, 0xFC, 0x2F,
];

/// Splits a big integer into `N` integer limbs of `B` bits.
/// The top limb is not masked: whatever does not fit in the lower
/// `N - 1` limbs lands there.
pub fn split_limbs<const B: usize, const N: usize>(big: &BigUint) -> [BigUint; N] {
    let mask = (BigUint::from(1u32) << B) - 1u32;
    std::array::from_fn(|i| {
        let shifted = big >> (B * i);
        if i + 1 == N {
            shifted
        } else {
            shifted & &mask
        }
    })
}

/// The integer `\sum_i limbs[i] 2^{B i}`
pub fn compose_limbs<const B: usize>(limbs: &[BigUint]) -> BigUint {
    limbs
        .iter()
        .enumerate()
        .fold(BigUint::from(0u32), |acc, (i, limb)| acc + (limb << (B * i)))
}

/// Represents a foreign field element as `N` limbs of `B` bits
#[derive(Clone, PartialEq, Eq)]
pub struct ForeignElement<F: PrimeField, const B: usize, const N: usize> {
    /// limbs in little endian order
    pub limbs: [F; N],
}

impl<F: PrimeField, const B: usize, const N: usize> Debug for ForeignElement<F, B, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ForeignElement(")?;
        for (i, limb) in self.limbs.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", limb.to_biguint())?;
        }
        write!(f, ")")
    }
}

impl<F: PrimeField, const B: usize, const N: usize> ForeignElement<F, B, N> {
    /// Creates a new foreign element from an array containing N limbs
    pub fn new(limbs: [F; N]) -> Self {
        Self { limbs }
    }

    /// Initializes a new foreign element from a big unsigned integer.
    /// Integers wider than `N * B` bits keep their excess in the top limb,
    /// reduced modulo the native field.
    pub fn from_biguint(big: &BigUint) -> Self {
        let limbs = split_limbs::<B, N>(big).map(F::from);
        Self { limbs }
    }

    /// Integer value of every limb
    pub fn to_limbs(&self) -> [BigUint; N] {
        self.limbs.map(|limb| limb.to_biguint())
    }

    /// Obtains the big integer representation of the foreign field element
    pub fn to_biguint(&self) -> BigUint {
        compose_limbs::<B>(&self.to_limbs())
    }
}
