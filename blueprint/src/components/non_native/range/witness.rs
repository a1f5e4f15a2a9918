//! Canonicality witness computation.

use crate::components::non_native::{LIMB_BITS, LIMB_COUNT};
use num_bigint::BigUint;

/// Limbs of `y = x + c` and the carries between them, `c` being the limbs of
/// `2^264 - p`. The top limb of `y` keeps whatever carries out of it.
pub fn upper_bound(
    x: &[BigUint; LIMB_COUNT],
    complement: &[BigUint; LIMB_COUNT],
) -> ([BigUint; LIMB_COUNT], [BigUint; LIMB_COUNT - 1]) {
    let mut y: [BigUint; LIMB_COUNT] = Default::default();
    let mut k: [BigUint; LIMB_COUNT - 1] = Default::default();
    let mut carry = BigUint::default();

    for i in 0..LIMB_COUNT {
        let sum = &x[i] + &complement[i] + &carry;
        if i + 1 == LIMB_COUNT {
            y[i] = sum;
        } else {
            carry = &sum >> LIMB_BITS;
            y[i] = sum - (&carry << LIMB_BITS);
            k[i] = carry.clone();
        }
    }

    (y, k)
}
