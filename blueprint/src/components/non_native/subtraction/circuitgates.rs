//! Foreign field subtraction gate.

use crate::{
    circuits::expr::{constraints::boolean, prologue::*},
    component::ComponentLayout,
    components::non_native::{split, LIMB_BITS, LIMB_COUNT},
};
use ark_ff::PrimeField;
use blueprint_utils::Two;
use num_bigint::BigUint;

use super::{
    A_COLUMNS, BORROW_CHUNKS_COLUMN, BORROW_CHUNK_BITS, BORROW_COLUMN, BORROW_OFFSET_BITS,
    B_COLUMNS, Q_COLUMN,
};

//~ This gate constrains
//~
//~     $$a - b + q \cdot p = r$$
//~
//~ for foreign elements `a`, `b`, `r` given as 66-bit limbs and a borrow bit
//~ `q`, set exactly when `a < b`.
//~
//~ | row | 0    | 1    | 2   | 3         | 4         | 5         | 6         | 7    | 8    |
//~ | --- | ---- | ---- | --- | --------- | --------- | --------- | --------- | ---- | ---- |
//~ | s   |      |      |     | `u0c0`    | `u0c1`    | `u0c2`    | `u0c3`    | `u0` |      |
//~ | s+1 | `a0` | `b0` | `q` | `a1`      | `a2`      | `a3`      | `b1`      | `b2` | `b3` |
//~ | s+2 | `r0` | `r1` | `r2`| `r3`      |           |           |           |      |      |
//~
//~ The selector is enabled on row `s+1`. The constraints are
//~
//~ 1. `u0 2^66 = a0 + q p0 + 2^67 - b0 - r0`, with `u0` the low limb borrow
//~    shifted by `2^67` to stay non-negative
//~ 2. `q (q - 1) = 0`
//~ 3. `u0 = u0c0 + u0c1 2^22 + u0c2 2^44 + u0c3 2^66`, the chunks being range
//~    checked to 22, 22, 22 and 2 bits
//~ 4. `\sum a_i 2^{66i} - \sum b_i 2^{66i} + q (p mod n) - \sum r_i 2^{66i} = 0`
//~    over the native field
//~
//~ With range checked limbs, the left side of (1) is below `2^136`, so (1) holds
//~ over the integers and `a - b + q p - r` is a multiple of `2^66`. By (4) it is
//~ also a multiple of the native modulus `n`, and as its absolute value is below
//~ `2^266 < n 2^66` for `n > 2^200`, it is zero.

/// Constraints of the subtraction gate
pub fn constraints<F: PrimeField>(layout: &ComponentLayout, modulus: &BigUint) -> Vec<E<F>> {
    let p = split(modulus);
    let modulus_lo = constant(F::from(p[0].clone()));
    // p mod n
    let modulus_native = constant(F::from(modulus.clone()));

    let a = A_COLUMNS.map(|col| witness_curr::<F>(layout.w(col)));
    let b = B_COLUMNS.map(|col| witness_curr::<F>(layout.w(col)));
    let q = witness_curr::<F>(layout.w(Q_COLUMN));
    let r: [E<F>; LIMB_COUNT] = std::array::from_fn(|i| witness_next(layout.w(i)));

    let u0 = witness_prev::<F>(layout.w(BORROW_COLUMN));
    let chunks: [E<F>; 4] =
        std::array::from_fn(|i| witness_prev(layout.w(BORROW_CHUNKS_COLUMN + i)));

    let limbs = |x: &[E<F>; LIMB_COUNT]| -> E<F> {
        x.iter()
            .enumerate()
            .map(|(i, limb)| limb.clone() * constant(F::two_pow((LIMB_BITS * i) as u64)))
            .sum()
    };

    let borrow = u0.clone() * constant(F::two_pow(LIMB_BITS as u64))
        - (a[0].clone() + q.clone() * modulus_lo + constant(F::two_pow(BORROW_OFFSET_BITS))
            - b[0].clone()
            - r[0].clone());

    let chunk_sum: E<F> = chunks
        .iter()
        .enumerate()
        .map(|(i, c)| c.clone() * constant(F::two_pow(BORROW_CHUNK_BITS * i as u64)))
        .sum();

    let native = limbs(&a) - limbs(&b) + q.clone() * modulus_native - limbs(&r);

    vec![borrow, boolean(&q), u0 - chunk_sum, native]
}
