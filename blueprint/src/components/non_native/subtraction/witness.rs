//! Foreign field subtraction witness computation.

use crate::components::non_native::{compose, split, LIMB_BITS, LIMB_COUNT};
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;

use super::{BORROW_CHUNK_BITS, BORROW_OFFSET_BITS};

/// Bits covered by the borrow chunks
const BORROW_BITS: usize = 3 * BORROW_CHUNK_BITS as usize + 2;

/// Exact integer values of the subtraction witness
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubtractionWitness {
    /// limbs of `(a - b) mod p`
    pub result: [BigUint; LIMB_COUNT],
    /// borrow bit, outside `{0, 1}` only for non-canonical inputs
    pub quotient: BigInt,
    /// low limb borrow, shifted by `2^67`
    pub borrow: BigInt,
    /// chunks of `borrow` of 22, 22, 22 and 2 bits
    pub borrow_chunks: [BigUint; 4],
}

/// Computes the witness of `a - b mod p` from the limbs of `a` and `b`.
/// The result is the true modular difference and the quotient is recovered
/// from it, so the witness is exact even when the inputs are not canonical.
pub fn compute(
    a: &[BigUint; LIMB_COUNT],
    b: &[BigUint; LIMB_COUNT],
    modulus: &BigUint,
) -> SubtractionWitness {
    let modulus_int = BigInt::from(modulus.clone());
    let a_int = BigInt::from(compose(a));
    let b_int = BigInt::from(compose(b));

    let result_int = (&a_int - &b_int).mod_floor(&modulus_int);
    let quotient = (&result_int - &a_int + &b_int).div_floor(&modulus_int);

    // result_int is in [0, p)
    let result = split(result_int.magnitude());
    let modulus_lo = BigInt::from(split(modulus)[0].clone());

    let numerator = BigInt::from(a[0].clone()) + &quotient * modulus_lo
        + (BigInt::from(1u32) << BORROW_OFFSET_BITS)
        - BigInt::from(b[0].clone())
        - BigInt::from(result[0].clone());
    let borrow = numerator.div_floor(&(BigInt::from(1u32) << LIMB_BITS));

    let borrow_bits = if borrow.sign() == Sign::Minus {
        borrow
            .mod_floor(&(BigInt::from(1u32) << BORROW_BITS))
            .magnitude()
            .clone()
    } else {
        borrow.magnitude().clone()
    };
    let chunk_mask = (BigUint::from(1u32) << BORROW_CHUNK_BITS) - 1u32;
    let borrow_chunks = std::array::from_fn(|i| {
        let shifted = &borrow_bits >> (BORROW_CHUNK_BITS as usize * i);
        if i == 3 {
            shifted
        } else {
            shifted & &chunk_mask
        }
    });

    SubtractionWitness {
        result,
        quotient,
        borrow,
        borrow_chunks,
    }
}
