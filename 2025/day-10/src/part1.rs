use miette::*;
use std::collections::{HashSet, VecDeque};

use crate::machine::{parse_machines, BitMask, Machine};
use crate::total_presses;

impl Machine {
    /// Fewest button presses that turn the all-off panel into the target
    /// light pattern, ignoring joltage.
    ///
    /// Plain BFS over the implicit graph of light states: every button is an
    /// edge `mask -> mask ^ button`, so the first time the target is dequeued
    /// its level is the shortest press count. Returns `None` when no sequence
    /// of presses reaches the target.
    pub fn min_toggle_presses(&self) -> Option<u64> {
        let start: BitMask = 0;

        // Zero is a real state (all lights off), not a sentinel
        let mut visited: HashSet<BitMask> = HashSet::from([start]);
        let mut queue = VecDeque::from([(start, 0u64)]);

        while let Some((mask, presses)) = queue.pop_front() {
            if mask == self.target() {
                return Some(presses);
            }

            for &button in self.buttons() {
                let next = mask ^ button;
                if visited.insert(next) {
                    queue.push_back((next, presses + 1));
                }
            }
        }

        tracing::debug!(
            explored = visited.len(),
            target = self.target(),
            "target unreachable"
        );
        None
    }
}

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let machines = parse_machines(input)?;

    let total = total_presses(&machines, Machine::min_toggle_presses)
        .ok_or_else(|| miette!("total press count does not fit in u64"))?;

    Ok(total.to_string())
}
