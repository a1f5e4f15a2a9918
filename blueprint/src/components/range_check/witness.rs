//! Range check witness computation.

use ark_ff::PrimeField;
use blueprint_utils::BigUintHelpers;
use num_bigint::BigUint;

use super::CRUMBS_PER_ROW;

/// Cells `[acc, c_0, ..., c_7]` of every row of one limb.
///
/// The accumulators are the exact shifts of `value`, so a value wider than
/// the checked width shows up in the tail row instead of being truncated.
pub fn limb_rows<F: PrimeField>(
    value: &BigUint,
    chain_rows: usize,
    tail_crumbs: usize,
) -> Vec<[F; CRUMBS_PER_ROW + 1]> {
    (0..=chain_rows)
        .map(|r| {
            let acc = value >> (2 * CRUMBS_PER_ROW * r);
            let used = if r == chain_rows {
                tail_crumbs
            } else {
                CRUMBS_PER_ROW
            };
            let mut row = [F::zero(); CRUMBS_PER_ROW + 1];
            for (cell, crumb) in row.iter_mut().skip(1).zip(acc.to_chunks(2, used)) {
                *cell = F::from(crumb);
            }
            row[0] = F::from(acc);
            row
        })
        .collect()
}
