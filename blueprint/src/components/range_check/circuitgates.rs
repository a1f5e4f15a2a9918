//! Range check gates.

use crate::{
    circuits::expr::{
        constraints::{boolean, crumb},
        prologue::*,
    },
    component::ComponentLayout,
};
use ark_ff::PrimeField;
use blueprint_utils::Two;

use super::CRUMBS_PER_ROW;

//~ A limb `v` of at most `bits` bits is split into `k = ceil(bits / 2)` crumbs
//~ (2-bit chunks) `v = \sum_i c_i 4^i`, eight crumbs per row, little-endian.
//~ Column `W0` holds the running accumulator: on row `r` of the limb it
//~ contains `v >> 16r`.
//~
//~ | col | `Chain`             | `Tail`                |
//~ | --- | ------------------- | --------------------- |
//~ |   0 | `acc_r`             | `acc_last`            |
//~ |   1 | `c_{8r}`            | `c_{8r}`              |
//~ | ... | ...                 | ...                   |
//~ |   8 | `c_{8r+7}`          | `c_{8r+7}` (or zero)  |
//~
//~ The chain gate links a row to the next one
//~
//~ - `acc_r = \sum_{i<8} c_{8r+i} 4^i + 4^8 acc_{r+1}`
//~
//~ and the tail gate closes the limb with the remaining `m = k - 8 * chain` crumbs
//~
//~ - `acc_last = \sum_{i<m} c_{8r+i} 4^i`
//~
//~ Every crumb satisfies `c (c - 1) (c - 2) (c - 3) = 0`; when `bits` is odd the
//~ topmost crumb is boolean instead. A limb of `2^bits` or more cannot be
//~ written as such a sum, so the tail gate fails on it.

/// Constraints of the chain gate, enabled on every row of a limb but the last
pub fn chain_constraints<F: PrimeField>(layout: &ComponentLayout) -> Vec<E<F>> {
    let acc_curr = witness_curr::<F>(layout.w(0));
    let acc_next = witness_next::<F>(layout.w(0));
    let crumbs: Vec<E<F>> = (0..CRUMBS_PER_ROW)
        .map(|i| witness_curr(layout.w(i + 1)))
        .collect();

    let sum: E<F> = crumbs
        .iter()
        .enumerate()
        .map(|(i, c)| c.clone() * constant(F::two_pow(2 * i as u64)))
        .sum();

    let mut res = vec![acc_curr - (sum + constant(F::two_pow(16)) * acc_next)];
    res.extend(crumbs.iter().map(crumb));
    res
}

/// Constraints of the tail gate, enabled on the last row of a limb
pub fn tail_constraints<F: PrimeField>(
    layout: &ComponentLayout,
    tail_crumbs: usize,
    odd_bits: bool,
) -> Vec<E<F>> {
    let acc = witness_curr::<F>(layout.w(0));
    let crumbs: Vec<E<F>> = (0..tail_crumbs)
        .map(|i| witness_curr(layout.w(i + 1)))
        .collect();

    let sum: E<F> = crumbs
        .iter()
        .enumerate()
        .map(|(i, c)| c.clone() * constant(F::two_pow(2 * i as u64)))
        .sum();

    let mut res = vec![acc - sum];
    for (i, c) in crumbs.iter().enumerate() {
        if odd_bits && i + 1 == tail_crumbs {
            // the top crumb only holds one bit
            res.push(boolean(c));
        } else {
            res.push(crumb(c));
        }
    }
    res
}
