use miette::*;
use std::collections::HashMap;

use crate::combination::{enumerate_combinations, is_compatible, Combination};
use crate::machine::{parse_machines, Machine};
use crate::total_presses;

// -----------------------------------------------------------------------------
// Parity-Recursive Solver
// -----------------------------------------------------------------------------

/// Finds the fewest presses that drain a joltage budget to exactly zero.
///
/// Any optimal press sequence can be split into the buttons pressed an odd
/// number of times (a single subset, pressed once each) plus pairs of presses.
/// The subset must match the parity of the budget everywhere; once it is
/// subtracted, the pairs cover a budget that is even everywhere, i.e. twice a
/// smaller instance of the same problem:
///
/// `solve(B) = min over compatible C of 2 * solve((B - C) / 2) + |C|`
pub struct JoltageSolver {
    /// Every subset of the machine's buttons, shared by all recursive calls.
    combinations: Vec<Combination>,
    /// Outcome per remaining budget, including infeasible ones.
    cache: HashMap<Vec<u64>, Option<u64>>,
}

impl JoltageSolver {
    pub fn new(machine: &Machine) -> Self {
        let combinations = enumerate_combinations(machine.buttons(), machine.budget().len());
        tracing::debug!(
            buttons = machine.buttons().len(),
            combinations = combinations.len(),
            "enumerated button combinations"
        );

        Self {
            combinations,
            cache: HashMap::new(),
        }
    }

    /// Returns the minimal press count for `budget`, or `None` if no sequence
    /// of whole presses drains it.
    pub fn solve(&mut self, budget: &[u64]) -> Option<u64> {
        reduce(&self.combinations, budget, &mut self.cache)
    }
}

fn reduce(
    combinations: &[Combination],
    budget: &[u64],
    cache: &mut HashMap<Vec<u64>, Option<u64>>,
) -> Option<u64> {
    if budget.iter().all(|&remaining| remaining == 0) {
        return Some(0);
    }
    if let Some(&known) = cache.get(budget) {
        return known;
    }

    // Ties keep the first minimum in enumeration order
    let best = combinations
        .iter()
        .filter(|combination| is_compatible(combination, budget))
        .filter_map(|combination| {
            let halved = halve_remainder(budget, combination);
            // A total that does not fit in u64 counts as unreachable
            reduce(combinations, &halved, cache)?
                .checked_mul(2)?
                .checked_add(combination.buttons_pressed as u64)
        })
        .min();

    cache.insert(budget.to_vec(), best);
    best
}

/// `(budget - combination) / 2`. Exact, since a compatible combination leaves
/// an even remainder at every position.
fn halve_remainder(budget: &[u64], combination: &Combination) -> Vec<u64> {
    budget
        .iter()
        .zip(&combination.per_bit)
        .map(|(remaining, count)| (remaining - count) / 2)
        .collect()
}

impl Machine {
    /// Fewest presses that raise every counter to exactly its joltage.
    pub fn min_joltage_presses(&self) -> Option<u64> {
        let presses = JoltageSolver::new(self).solve(self.budget());
        tracing::debug!(?presses, "solved joltage budget");
        presses
    }
}

// -----------------------------------------------------------------------------
// Main Process
// -----------------------------------------------------------------------------

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let machines = parse_machines(input)?;

    let total = total_presses(&machines, Machine::min_joltage_presses)
        .ok_or_else(|| miette!("total press count does not fit in u64"))?;

    Ok(total.to_string())
}
