//! Bit-level helpers on big unsigned integers.

use num_bigint::BigUint;

/// Helpers for BigUint
pub trait BigUintHelpers {
    /// Returns the minimum number of bits required to represent a BigUint.
    /// As opposed to BigUint::bits, this function returns 1 for the input zero
    fn bitlen(&self) -> usize;

    /// Little-endian chunks of `width` bits, exactly `count` of them.
    /// Bits above `width * count` are dropped.
    fn to_chunks(&self, width: usize, count: usize) -> Vec<BigUint>;

    /// `2^exp`
    fn two_pow(exp: usize) -> BigUint;
}

impl BigUintHelpers for BigUint {
    fn bitlen(&self) -> usize {
        if self.bits() == 0 {
            1
        } else {
            self.bits() as usize
        }
    }

    fn to_chunks(&self, width: usize, count: usize) -> Vec<BigUint> {
        let mask = Self::two_pow(width) - 1u32;
        (0..count)
            .map(|i| (self >> (width * i)) & &mask)
            .collect()
    }

    fn two_pow(exp: usize) -> BigUint {
        BigUint::from(1u32) << exp
    }
}
