//! How the host asks the player for a row or a yes/no answer.
//!
//! [`LinePrompter`] reads one line per question from any `BufRead`, which is
//! what piped and scripted sessions use. With the `cli` feature,
//! [`TerminalPrompter`] asks through `dialoguer` widgets when stdin is a TTY.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tricks_core::TrickError;

/// Reply to a single question.
#[derive(Debug)]
pub enum Answer<T> {
    Given(T),
    /// Input the core never sees; the host reports it and asks again.
    Invalid(InputError),
    Quit,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("'{0}' is not a row number; choose row 1, 2 or 3")]
    NotARow(String),
    #[error("'{0}' is not an answer; reply yes or no")]
    NotAnAnswer(String),
    #[error("{0}")]
    Rejected(#[from] TrickError),
}

pub trait Prompter {
    /// Asks for a 1-based row number. Range checks are left to the core.
    fn row(&mut self, out: &mut dyn Write, question: &str) -> io::Result<Answer<u8>>;

    fn yes_no(&mut self, out: &mut dyn Write, question: &str) -> io::Result<Answer<bool>>;
}

pub struct LinePrompter<R> {
    input: R,
}

impl<R: BufRead> LinePrompter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    fn ask(&mut self, out: &mut dyn Write, question: &str, hint: &str) -> io::Result<Option<String>> {
        write!(out, "{question} ({hint}, q to quit): ")?;
        out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        // The prompt has no trailing newline and piped input is not shown,
        // so close the line before the next output.
        writeln!(out)?;

        let line = line.trim();
        if is_quit(line) {
            return Ok(None);
        }
        Ok(Some(line.to_string()))
    }
}

impl<R: BufRead> Prompter for LinePrompter<R> {
    fn row(&mut self, out: &mut dyn Write, question: &str) -> io::Result<Answer<u8>> {
        let Some(line) = self.ask(out, question, "1-3")? else {
            return Ok(Answer::Quit);
        };
        Ok(match line.parse::<u8>() {
            Ok(row) => Answer::Given(row),
            Err(_) => Answer::Invalid(InputError::NotARow(line)),
        })
    }

    fn yes_no(&mut self, out: &mut dyn Write, question: &str) -> io::Result<Answer<bool>> {
        let Some(line) = self.ask(out, question, "yes/no")? else {
            return Ok(Answer::Quit);
        };
        Ok(match parse_answer(&line) {
            Some(yes) => Answer::Given(yes),
            None => Answer::Invalid(InputError::NotAnAnswer(line)),
        })
    }
}

#[cfg(feature = "cli")]
pub use terminal::TerminalPrompter;

#[cfg(feature = "cli")]
mod terminal {
    use std::io::{self, Write};

    use dialoguer::{Confirm, Select};

    use super::{Answer, Prompter};

    const ROW_LABELS: [&str; 3] = ["Row 1", "Row 2", "Row 3"];

    /// Arrow-key row picker and y/n confirm; Esc or `q` quits.
    #[derive(Debug, Default)]
    pub struct TerminalPrompter;

    impl Prompter for TerminalPrompter {
        fn row(&mut self, _: &mut dyn Write, question: &str) -> io::Result<Answer<u8>> {
            let picked = Select::new()
                .with_prompt(question)
                .report(false)
                .items(&ROW_LABELS)
                .default(0)
                .interact_opt()
                .map_err(|dialoguer::Error::IO(e)| e)?;
            Ok(match picked {
                Some(index) => Answer::Given(index as u8 + 1),
                None => Answer::Quit,
            })
        }

        fn yes_no(&mut self, _: &mut dyn Write, question: &str) -> io::Result<Answer<bool>> {
            let confirmed = Confirm::new()
                .with_prompt(question)
                .report(false)
                .interact_opt()
                .map_err(|dialoguer::Error::IO(e)| e)?;
            Ok(match confirmed {
                Some(yes) => Answer::Given(yes),
                None => Answer::Quit,
            })
        }
    }
}

fn parse_answer(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

fn is_quit(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "q" | "quit")
}
