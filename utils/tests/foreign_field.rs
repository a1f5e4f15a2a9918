use ark_ff::Zero;
use blueprint_utils::{
    foreign_field::{compose_limbs, split_limbs, SECP256K1_MOD},
    pasta::Fp,
    tests::make_test_rng,
    ForeignElement,
};
use num_bigint::{BigUint, RandBigInt};

const TEST_B_1: usize = 66;
const TEST_N_1: usize = 4;
const TEST_B_2: usize = 15;
const TEST_N_2: usize = 18;

fn secp256k1_modulus() -> BigUint {
    BigUint::from_bytes_be(SECP256K1_MOD)
}

#[test]
fn test_to_biguint() {
    let big = secp256k1_modulus();
    let fe = ForeignElement::<Fp, TEST_B_1, TEST_N_1>::from_biguint(&big);
    assert_eq!(fe.to_biguint(), big);
    let fe2 = ForeignElement::<Fp, TEST_B_2, TEST_N_2>::from_biguint(&big);
    assert_eq!(fe2.to_biguint(), big);
}

#[test]
fn test_limb_widths() {
    let big = secp256k1_modulus();
    let limbs = split_limbs::<TEST_B_1, TEST_N_1>(&big);
    for limb in &limbs[..3] {
        assert!(limb.bits() <= 66);
    }
    // 256 - 3 * 66
    assert_eq!(limbs[3].bits(), 58);
    assert_eq!(compose_limbs::<TEST_B_1>(&limbs), big);
}

#[test]
fn test_unmasked_top_limb() {
    // 2^264 does not fit in 4 x 66 bits, the excess stays in the top limb
    let big = BigUint::from(1u32) << 264;
    let limbs = split_limbs::<TEST_B_1, TEST_N_1>(&big);
    assert!(limbs[..3].iter().all(Zero::is_zero));
    assert_eq!(limbs[3], BigUint::from(1u32) << 66);
    let fe = ForeignElement::<Fp, TEST_B_1, TEST_N_1>::from_biguint(&big);
    assert_eq!(fe.to_limbs(), limbs);
    assert_eq!(fe.to_biguint(), big);
}

#[test]
fn test_compose_wide_limbs() {
    // limbs wider than B still carry into the next position
    let limbs = [BigUint::from(1u32) << 66, BigUint::from(3u32)];
    assert_eq!(
        compose_limbs::<TEST_B_1>(&limbs),
        BigUint::from(4u32) << 66
    );
}

#[test]
fn test_random_elements() {
    let modulus = secp256k1_modulus();
    let rng = &mut make_test_rng(None);
    for _ in 0..20 {
        let big = rng.gen_biguint_below(&modulus);
        let fe = ForeignElement::<Fp, TEST_B_1, TEST_N_1>::from_biguint(&big);
        assert_eq!(ForeignElement::new(fe.limbs), fe);
        assert_eq!(fe.to_biguint(), big);
        let fe2 = ForeignElement::<Fp, TEST_B_2, TEST_N_2>::from_biguint(&big);
        assert_eq!(fe2.to_biguint(), big);
    }
}
