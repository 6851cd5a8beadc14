use chumsky::prelude::*;
use miette::*;

/// A set of lights, one bit per position, Least Significant Bit first.
pub type BitMask = u64;

/// Number of lights a single [`BitMask`] can address.
pub const MAX_LIGHTS: usize = BitMask::BITS as usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    /// Lights that must be on once the machine is initialised.
    target: BitMask,
    /// Lights toggled by each button.
    buttons: Vec<BitMask>,
    /// Joltage each position has to reach.
    budget: Vec<u64>,
}

impl Machine {
    pub fn new(target: BitMask, buttons: Vec<BitMask>, budget: Vec<u64>) -> Self {
        Self {
            target,
            buttons,
            budget,
        }
    }

    pub fn target(&self) -> BitMask {
        self.target
    }

    pub fn buttons(&self) -> &[BitMask] {
        &self.buttons
    }

    pub fn budget(&self) -> &[u64] {
        &self.budget
    }
}

fn parser<'a>() -> impl Parser<'a, &'a str, Vec<Machine>, extra::Err<Rich<'a, char>>> {
    // Custom whitespace parser that excludes newlines
    let hspace = one_of(" \t").repeated();

    let light = choice((just('.').to(false), just('#').to(true)));

    // [.##.]
    let diagram = light
        .repeated()
        .collect::<Vec<bool>>()
        .delimited_by(just('['), just(']'))
        .try_map(|lights, span| {
            if lights.len() > MAX_LIGHTS {
                return Err(Rich::custom(
                    span,
                    format!("at most {MAX_LIGHTS} lights are supported, found {}", lights.len()),
                ));
            }
            Ok(lights
                .into_iter()
                .enumerate()
                .filter(|&(_, on)| on)
                .fold(0, |mask: BitMask, (i, _)| mask | (1 << i)))
        });

    // (0,2,3)
    let position = text::int(10)
        .from_str::<usize>()
        .try_map(|parsed, span| match parsed {
            Ok(i) if i < MAX_LIGHTS => Ok(i),
            _ => Err(Rich::custom(
                span,
                format!("light is out of range, only {MAX_LIGHTS} are addressable"),
            )),
        });

    let button = position
        .separated_by(just(','))
        .collect::<Vec<usize>>()
        .delimited_by(just('('), just(')'))
        .map(|positions| {
            positions
                .into_iter()
                .fold(0, |mask: BitMask, i| mask | (1 << i))
        });

    // {3,5,4,7}
    let budget = text::int(10)
        .from_str::<u64>()
        .try_map(|parsed, span| {
            parsed.map_err(|e| Rich::custom(span, format!("invalid joltage: {e}")))
        })
        .separated_by(just(','))
        .collect::<Vec<u64>>()
        .delimited_by(just('{'), just('}'));

    let machine = diagram
        .then_ignore(hspace.clone())
        .then(button.padded_by(hspace.clone()).repeated().collect::<Vec<BitMask>>())
        .then(budget)
        .then_ignore(hspace)
        .try_map(|((target, buttons), budget): ((BitMask, Vec<BitMask>), Vec<u64>), span| {
            // Every toggled light needs a joltage counter
            let counters = budget.len();
            if let Some(button) = buttons
                .iter()
                .find(|&&button| counters < MAX_LIGHTS && button >> counters != 0)
            {
                return Err(Rich::custom(
                    span,
                    format!(
                        "button {button:#b} toggles lights without a joltage counter \
                         ({counters} given)"
                    ),
                ));
            }
            Ok(Machine::new(target, buttons, budget))
        });

    machine
        .separated_by(text::newline())
        .allow_trailing()
        .collect()
}

/// Parses one machine per line of puzzle input.
#[tracing::instrument(skip(input))]
pub fn parse_machines(input: &str) -> Result<Vec<Machine>> {
    let machines = parser()
        .parse(input)
        .into_result()
        .map_err(|e| miette!("Parse failed: {:?}", e))?;

    tracing::debug!(count = machines.len(), "parsed machines");
    Ok(machines)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[test]
    fn parses_sample_line() -> Result<()> {
        let machines = parse_machines("[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}")?;

        assert_eq!(
            machines,
            vec![Machine::new(
                0b0110,
                vec![0b1000, 0b1010, 0b0100, 0b1100, 0b0101, 0b0011],
                vec![3, 5, 4, 7],
            )]
        );
        Ok(())
    }

    #[test]
    fn parses_multiple_lines_with_trailing_newline() -> Result<()> {
        let input = "[#] (0) {1}\n[..] () (1) {0,2}\n";
        let machines = parse_machines(input)?;

        assert_eq!(machines.len(), 2);
        assert_eq!(machines[1].target(), 0);
        assert_eq!(machines[1].buttons(), &[0b00, 0b10]);
        assert_eq!(machines[1].budget(), &[0, 2]);
        Ok(())
    }

    #[rstest]
    #[case::unknown_light("[.#x] (0) {1,1,1}")]
    #[case::missing_budget("[.#] (0) (1)")]
    #[case::light_out_of_range("[.#] (64) {1,1}")]
    #[case::negative_budget("[#] (0) {-1}")]
    #[case::button_without_counter("[..] (0) (1,2) {1,1}")]
    #[case::position_overflow("[.#] (99999999999999999999999) {1,1}")]
    #[case::budget_overflow("[#] (0) {99999999999999999999999}")]
    fn rejects_malformed_input(#[case] input: &str) {
        assert!(parse_machines(input).is_err());
    }

    #[test]
    fn rejects_oversized_diagram() {
        let input = format!("[{}] (0) {{1}}", "#".repeat(MAX_LIGHTS + 1));
        assert!(parse_machines(&input).is_err());
    }

    #[test]
    fn accepts_full_width_diagram() -> Result<()> {
        let budget = vec!["1"; MAX_LIGHTS].join(",");
        let input = format!("[{}] (63) {{{budget}}}", "#".repeat(MAX_LIGHTS));
        let machines = parse_machines(&input)?;

        assert_eq!(machines[0].target(), BitMask::MAX);
        assert_eq!(machines[0].buttons(), &[1u64 << 63]);
        Ok(())
    }
}
