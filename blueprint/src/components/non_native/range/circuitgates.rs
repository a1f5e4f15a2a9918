//! Canonicality gate of a foreign element.

use crate::{
    circuits::expr::{constraints::boolean, prologue::*},
    component::ComponentLayout,
    components::non_native::{LIMB_BITS, LIMB_COUNT},
};
use ark_ff::PrimeField;
use blueprint_utils::Two;
use num_bigint::BigUint;

//~ Let `x = x0 + x1 2^66 + x2 2^132 + x3 2^198` with 66-bit limbs and
//~ `c = 2^264 - p` with limbs `c0..c3`. Then `x < p` iff `y = x + c < 2^264`.
//~ The gate computes `y` limb by limb with boolean carries `k0, k1, k2` and no
//~ carry out of the top limb:
//~
//~ - `y0 + k0 2^66 = x0 + c0`
//~ - `y1 + k1 2^66 = x1 + c1 + k0`
//~ - `y2 + k2 2^66 = x2 + c2 + k1`
//~ - `y3 = x3 + c3 + k2`
//~
//~ | row | 0    | 1    | 2    | 3    | 4    | 5    | 6    |
//~ | --- | ---- | ---- | ---- | ---- | ---- | ---- | ---- |
//~ | t   | `x0` | `x1` | `x2` | `x3` | `k0` | `k1` | `k2` |
//~ | t+1 | `y0` | `y1` | `y2` | `y3` |      |      |      |
//~
//~ All of `x0..x3` and `y0..y3` are then range checked to 66 bits, from row
//~ `t+2` on. As all terms are below `2^68` the limb equations hold over the
//~ integers, and `y3 < 2^66` leaves no room for a value of `p` or more.

/// Constraints of the canonicality gate, enabled on the `x` row
pub fn constraints<F: PrimeField>(
    layout: &ComponentLayout,
    complement: &[BigUint; LIMB_COUNT],
) -> Vec<E<F>> {
    let two_to_limb = constant(F::two_pow(LIMB_BITS as u64));

    let x: Vec<E<F>> = (0..LIMB_COUNT).map(|i| witness_curr(layout.w(i))).collect();
    let y: Vec<E<F>> = (0..LIMB_COUNT).map(|i| witness_next(layout.w(i))).collect();
    let k: Vec<E<F>> = (0..LIMB_COUNT - 1)
        .map(|j| witness_curr(layout.w(LIMB_COUNT + j)))
        .collect();
    let c: Vec<E<F>> = complement
        .iter()
        .map(|c| constant(F::from(c.clone())))
        .collect();

    let mut res: Vec<E<F>> = k.iter().map(boolean).collect();

    for i in 0..LIMB_COUNT {
        let carry_in = if i == 0 { E::zero() } else { k[i - 1].clone() };
        let lhs = if i + 1 == LIMB_COUNT {
            y[i].clone()
        } else {
            y[i].clone() + k[i].clone() * two_to_limb.clone()
        };
        res.push(lhs - (x[i].clone() + c[i].clone() + carry_in));
    }

    res
}
