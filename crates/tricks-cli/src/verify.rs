use std::fmt;

use tracing::{Level, event};
use tricks_core::game::mind_reader::{MAX_NUMBER, MindReaderGame, truthful_answers};
use tricks_core::game::twenty_one::TwentyOneGame;
use tricks_core::model::packet::{PACKET_SIZE, REVEAL_INDEX};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvergenceFailure {
    pub seed: u64,
    pub start: usize,
    pub final_index: Option<usize>,
}

/// Outcome of replaying both tricks for every possible secret.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub deals: u64,
    pub convergence_cases: usize,
    pub convergence_failures: Vec<ConvergenceFailure>,
    pub numbers_checked: usize,
    pub bitmask_failures: Vec<u8>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.convergence_failures.is_empty() && self.bitmask_failures.is_empty()
    }
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "21-card trick: {} deals x {PACKET_SIZE} start positions = {} cases, {} failures",
            self.deals,
            self.convergence_cases,
            self.convergence_failures.len()
        )?;
        for failure in &self.convergence_failures {
            writeln!(
                f,
                "  seed {} start {} ended at {:?}",
                failure.seed, failure.start, failure.final_index
            )?;
        }
        writeln!(
            f,
            "Mind reader: {} numbers, {} failures",
            self.numbers_checked,
            self.bitmask_failures.len()
        )?;
        if !self.bitmask_failures.is_empty() {
            writeln!(f, "  misread: {:?}", self.bitmask_failures)?;
        }
        if self.is_ok() {
            write!(f, "All checks passed.")
        } else {
            write!(f, "Checks FAILED.")
        }
    }
}

/// Plays every secret through the public game API with truthful answers.
pub fn verify(deals: u64) -> VerifyReport {
    let mut report = VerifyReport {
        deals,
        ..VerifyReport::default()
    };

    for seed in 0..deals {
        let start_game = TwentyOneGame::with_seed(seed);
        for start in 0..PACKET_SIZE {
            report.convergence_cases += 1;
            let target = start_game.packet().cards()[start];
            let mut game = start_game.clone();
            while !game.is_complete() {
                let Some(row) = game.packet().row_of(target) else {
                    break;
                };
                match game.select_row(row.number()) {
                    Ok(next) => game = next,
                    Err(_) => break,
                }
            }
            let final_index = game.packet().position(target);
            if game.reveal() != Some(target) || final_index != Some(REVEAL_INDEX) {
                report.convergence_failures.push(ConvergenceFailure {
                    seed,
                    start,
                    final_index,
                });
            }
        }
    }

    for number in 1..=MAX_NUMBER {
        report.numbers_checked += 1;
        let revealed = truthful_answers(number)
            .into_iter()
            .try_fold(MindReaderGame::new_game(), |game, yes| game.answer(yes))
            .ok()
            .and_then(|game| game.reveal());
        if revealed != Some(number) {
            report.bitmask_failures.push(number);
        }
    }

    event!(
        target: "tricks_cli::verify",
        Level::INFO,
        deals,
        cases = report.convergence_cases,
        ok = report.is_ok()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::verify;

    #[test]
    fn small_sweep_passes() {
        let report = verify(4);
        assert!(report.is_ok(), "{report}");
        assert_eq!(report.convergence_cases, 4 * 21);
        assert_eq!(report.numbers_checked, 63);
        assert!(report.to_string().ends_with("All checks passed."));
    }
}
