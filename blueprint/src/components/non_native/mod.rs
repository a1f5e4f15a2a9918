//! Foreign field arithmetic over 4 limbs of 66 bits.
//!
//! A foreign element `x < p` is held as `x = x0 + x1 2^66 + x2 2^132 + x3 2^198`,
//! each limb a native field element. Moduli up to 257 bits fit, leaving room
//! for the `2^264 - p` offset used by the canonicality check.

pub mod range;
pub mod subtraction;

pub use range::ForeignRange;
pub use subtraction::{Subtraction, SubtractionInput, SubtractionOutput};

use crate::error::{BlueprintError, Result};
use ark_ff::PrimeField;
use blueprint_utils::{
    foreign_field::{compose_limbs, split_limbs, SECP256K1_MOD},
    ForeignElement,
};
use num_bigint::{BigInt, BigUint, Sign};

/// Bits per limb
pub const LIMB_BITS: usize = 66;

/// Limbs per foreign element
pub const LIMB_COUNT: usize = 4;

/// `LIMB_BITS * LIMB_COUNT`
pub const BINARY_MODULUS_EXP: usize = 264;

pub const MAX_FOREIGN_MODULUS_BITS: u64 = 257;

/// Smallest native field the limb identities stay sound in
pub const MIN_NATIVE_BITS: u32 = 201;

/// Foreign element split in limbs
pub type ForeignLimbs<F> = ForeignElement<F, LIMB_BITS, LIMB_COUNT>;

/// A foreign prime field
pub trait ForeignFieldParams: 'static {
    const NAME: &'static str;

    fn modulus() -> BigUint;
}

/// Base field of Curve25519, `2^255 - 19`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Curve25519Base;

impl ForeignFieldParams for Curve25519Base {
    const NAME: &'static str = "curve25519_base";

    fn modulus() -> BigUint {
        (BigUint::from(1u32) << 255) - 19u32
    }
}

/// Base field of secp256k1
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1Base;

impl ForeignFieldParams for Secp256k1Base {
    const NAME: &'static str = "secp256k1_base";

    fn modulus() -> BigUint {
        BigUint::from_bytes_be(SECP256K1_MOD)
    }
}

/// Integer limbs of `big`, the top one unmasked
pub fn split(big: &BigUint) -> [BigUint; LIMB_COUNT] {
    split_limbs::<LIMB_BITS, LIMB_COUNT>(big)
}

/// The integer the limbs stand for
pub fn compose(limbs: &[BigUint]) -> BigUint {
    compose_limbs::<LIMB_BITS>(limbs)
}

/// Limbs of `2^264 - p`
pub fn binary_modulus_complement(modulus: &BigUint) -> [BigUint; LIMB_COUNT] {
    split(&((BigUint::from(1u32) << BINARY_MODULUS_EXP) - modulus))
}

/// Maps a signed integer to the native field
pub fn bigint_to_field<F: PrimeField>(x: &BigInt) -> F {
    let (sign, magnitude) = x.clone().into_parts();
    let value = F::from(magnitude);
    if sign == Sign::Minus {
        -value
    } else {
        value
    }
}

/// Rejects moduli without room for the canonicality offset
pub fn check_foreign_modulus(modulus: &BigUint) -> Result<()> {
    if modulus.bits() > MAX_FOREIGN_MODULUS_BITS {
        return Err(BlueprintError::ForeignModulusTooLarge {
            bits: modulus.bits(),
            max: MAX_FOREIGN_MODULUS_BITS,
        });
    }
    Ok(())
}

/// Rejects native fields in which the limb identities could wrap around
pub fn check_native_field<F: PrimeField>() -> Result<()> {
    if F::MODULUS_BIT_SIZE < MIN_NATIVE_BITS {
        return Err(BlueprintError::NativeFieldTooSmall {
            bits: F::MODULUS_BIT_SIZE,
            min: MIN_NATIVE_BITS,
        });
    }
    Ok(())
}
