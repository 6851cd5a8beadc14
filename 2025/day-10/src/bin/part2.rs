use miette::*;

use aoc2025_day_10::part2;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let input = include_str!("../../input2.txt");
    let presses = part2::process(input)?;
    println!("Fewest presses to reach every joltage: {presses}");
    Ok(())
}
