pub mod combination;
pub mod machine;
pub mod part1;
pub mod part2;

use machine::Machine;
use rayon::prelude::*;

/// Sums the press counts of every machine in the batch, or `None` if the total
/// does not fit in a `u64`.
///
/// Machines for which `solve` finds no press sequence contribute nothing to
/// the total; they are reported through `tracing` instead.
pub fn total_presses<F>(machines: &[Machine], solve: F) -> Option<u64>
where
    F: Fn(&Machine) -> Option<u64> + Sync,
{
    machines
        .par_iter()
        .enumerate()
        .map(|(idx, machine)| {
            solve(machine).or_else(|| {
                tracing::warn!(machine = idx, "no press sequence satisfies machine");
                Some(0)
            })
        })
        .try_reduce(|| 0, u64::checked_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_infeasible_machines() {
        let machines = vec![
            Machine::new(0b11, vec![0b01, 0b10], vec![1, 1]),
            Machine::new(0b01, vec![0b11], vec![1, 0]),
            Machine::new(0b10, vec![0b10], vec![0, 3]),
        ];

        assert_eq!(total_presses(&machines, Machine::min_joltage_presses), Some(5));
    }

    #[test]
    fn empty_batch_sums_to_zero() {
        assert_eq!(total_presses(&[], Machine::min_toggle_presses), Some(0));
    }

    #[test]
    fn overflowing_total_is_rejected() {
        let machines = vec![
            Machine::new(0b1, vec![0b1], vec![1]),
            Machine::new(0b1, vec![0b1], vec![1]),
        ];

        assert_eq!(total_presses(&machines, |_| Some(u64::MAX)), None);
        assert_eq!(total_presses(&machines[..1], |_| Some(u64::MAX)), Some(u64::MAX));
    }
}
