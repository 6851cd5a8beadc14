use bitvec::prelude::*;
use itertools::Itertools;
use num_integer::Integer;

use crate::machine::BitMask;

/// A subset of buttons, each pressed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination {
    /// How many of the pressed buttons toggle each position (not reduced mod 2).
    pub per_bit: Vec<u64>,
    pub buttons_pressed: usize,
}

/// Builds every subset of `buttons`, indexed by the subset bitmask: bit `j` of
/// the index selects `buttons[j]`.
///
/// Every button must only address positions below `budget_len`.
pub fn enumerate_combinations(buttons: &[BitMask], budget_len: usize) -> Vec<Combination> {
    let k = buttons.len();
    assert!(
        k < usize::BITS as usize,
        "cannot enumerate every subset of {k} buttons"
    );
    for button in buttons {
        assert!(
            button
                .view_bits::<Lsb0>()
                .last_one()
                .is_none_or(|bit| bit < budget_len),
            "button {button:#b} addresses lights beyond the {budget_len} budget positions"
        );
    }

    (0..1usize << k)
        .map(|subset| {
            let mut per_bit = vec![0; budget_len];
            for j in subset.view_bits::<Lsb0>().iter_ones() {
                for bit in buttons[j].view_bits::<Lsb0>().iter_ones() {
                    per_bit[bit] += 1;
                }
            }
            Combination {
                per_bit,
                buttons_pressed: subset.count_ones() as usize,
            }
        })
        .collect()
}

/// A combination fits the remaining budget when it never overshoots a
/// position and leaves an even remainder everywhere.
pub fn is_compatible(combination: &Combination, budget: &[u64]) -> bool {
    combination
        .per_bit
        .iter()
        .zip_eq(budget)
        .all(|(&count, &remaining)| count <= remaining && count.is_odd() == remaining.is_odd())
}
