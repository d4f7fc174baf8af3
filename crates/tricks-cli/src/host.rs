//! Terminal host: owns the session state between input events, renders
//! whatever the core returns and feeds each answer back to it.

use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::{info, warn};
use tricks_core::game::mind_reader::MindReaderGame;
use tricks_core::game::serialization::{Session, SessionSnapshot, SnapshotError};
use tricks_core::game::twenty_one::{ROUNDS, TwentyOneGame};

use crate::config::HostConfig;
use crate::prompt::{Answer, InputError, LinePrompter, Prompter};
use crate::render::{card_label, render_bit_card, render_rows};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trick {
    TwentyOne,
    MindReader,
}

impl Trick {
    pub const fn label(self) -> &'static str {
        match self {
            Trick::TwentyOne => "twenty-one",
            Trick::MindReader => "mind-reader",
        }
    }

    fn owns(self, session: &Session) -> bool {
        matches!(
            (self, session),
            (Trick::TwentyOne, Session::TwentyOne(_)) | (Trick::MindReader, Session::MindReader(_))
        )
    }
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to access session state {path:?}: {source}")]
    StateIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to load session state {path:?}: {source}")]
    StateLoad {
        path: PathBuf,
        #[source]
        source: SnapshotError,
    },
    #[error("failed to encode session state: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub games_completed: usize,
    pub rejected_inputs: usize,
    /// What each completed game revealed, in order.
    pub reveals: Vec<String>,
}

const ROW_QUESTION: &str = "Which row holds your card?";
const CARD_QUESTION: &str = "Is your number on this card?";
const AGAIN_QUESTION: &str = "Play again?";

pub struct Host<P, W> {
    prompter: P,
    output: W,
    config: HostConfig,
    rng: StdRng,
    state_path: Option<PathBuf>,
}

impl<R: BufRead, W: Write> Host<LinePrompter<R>, W> {
    /// Line-oriented host, one answer per line of `input`.
    pub fn new(input: R, output: W, config: HostConfig) -> Self {
        Self::with_prompter(LinePrompter::new(input), output, config)
    }
}

impl<P: Prompter, W: Write> Host<P, W> {
    pub fn with_prompter(prompter: P, output: W, config: HostConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            prompter,
            output,
            config,
            rng,
            state_path: None,
        }
    }

    /// Persist the session after every accepted input and resume from it.
    pub fn with_state_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_path = Some(path.into());
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn run(&mut self, trick: Trick) -> Result<SessionSummary, HostError> {
        let mut summary = SessionSummary::default();
        let mut session = self.resume_or_start(trick)?;
        info!(
            target: "tricks_cli::host",
            trick = trick.label(),
            seed = ?self.config.seed,
            "session started"
        );
        self.intro(trick)?;

        loop {
            if session.is_complete() {
                let revealed = self.reveal(&session)?;
                summary.games_completed += 1;
                summary.reveals.push(revealed);
                if !self.ask_play_again(&mut summary)? {
                    break;
                }
                session = self.fresh(trick);
                self.persist(&session)?;
                continue;
            }

            self.show(&session)?;
            let next = match &session {
                Session::TwentyOne(game) => {
                    match self.prompter.row(&mut self.output, ROW_QUESTION)? {
                        Answer::Given(row) => game
                            .select_row(row)
                            .map(Session::TwentyOne)
                            .map_err(InputError::from),
                        Answer::Invalid(err) => Err(err),
                        Answer::Quit => break,
                    }
                }
                Session::MindReader(game) => {
                    match self.prompter.yes_no(&mut self.output, CARD_QUESTION)? {
                        Answer::Given(yes) => game
                            .answer(yes)
                            .map(Session::MindReader)
                            .map_err(InputError::from),
                        Answer::Invalid(err) => Err(err),
                        Answer::Quit => break,
                    }
                }
            };

            match next {
                Ok(next) => {
                    session = next;
                    self.persist(&session)?;
                }
                Err(err) => {
                    summary.rejected_inputs += 1;
                    writeln!(self.output, "{err}")?;
                }
            }
        }

        writeln!(self.output, "Goodbye!")?;
        info!(
            target: "tricks_cli::host",
            trick = trick.label(),
            games = summary.games_completed,
            rejected = summary.rejected_inputs,
            "session finished"
        );
        Ok(summary)
    }

    fn fresh(&mut self, trick: Trick) -> Session {
        match trick {
            Trick::TwentyOne => Session::TwentyOne(TwentyOneGame::new_game(&mut self.rng)),
            Trick::MindReader => Session::MindReader(MindReaderGame::new_game()),
        }
    }

    fn resume_or_start(&mut self, trick: Trick) -> Result<Session, HostError> {
        let Some(path) = self.state_path.clone() else {
            return Ok(self.fresh(trick));
        };
        if !path.exists() {
            return Ok(self.fresh(trick));
        }

        let json = fs::read_to_string(&path).map_err(|source| HostError::StateIo {
            path: path.clone(),
            source,
        })?;
        let session = SessionSnapshot::from_json(&json)
            .and_then(SessionSnapshot::restore)
            .map_err(|source| HostError::StateLoad {
                path: path.clone(),
                source,
            })?;

        if trick.owns(&session) {
            info!(target: "tricks_cli::host", path = %path.display(), "resumed session");
            Ok(session)
        } else {
            warn!(
                target: "tricks_cli::host",
                path = %path.display(),
                "state file belongs to another trick; starting fresh"
            );
            Ok(self.fresh(trick))
        }
    }

    fn persist(&self, session: &Session) -> Result<(), HostError> {
        let Some(path) = self.state_path.as_ref() else {
            return Ok(());
        };
        let json = SessionSnapshot::to_json(session)?;
        fs::write(path, json).map_err(|source| HostError::StateIo {
            path: path.clone(),
            source,
        })
    }

    fn intro(&mut self, trick: Trick) -> Result<(), HostError> {
        match trick {
            Trick::TwentyOne => writeln!(
                self.output,
                "Pick a card from the 21 below and keep it in mind. \
                 Each round, tell me which row it is in."
            )?,
            Trick::MindReader => writeln!(
                self.output,
                "Think of a number between 1 and 63. I'll guess it!"
            )?,
        }
        Ok(())
    }

    fn show(&mut self, session: &Session) -> Result<(), HostError> {
        match session {
            Session::TwentyOne(game) => {
                if self.config.display.show_round_banner {
                    writeln!(self.output, "--- Round {} of {ROUNDS} ---", game.round() + 1)?;
                }
                let rows = render_rows(&game.rows(), self.config.display.card_style);
                write!(self.output, "{rows}")?;
            }
            Session::MindReader(game) => {
                if let Some(card) = game.current_card() {
                    write!(self.output, "{}", render_bit_card(card))?;
                }
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn reveal(&mut self, session: &Session) -> Result<String, HostError> {
        let revealed = match session {
            Session::TwentyOne(game) => {
                let Some(card) = game.reveal() else {
                    return Ok(String::new());
                };
                let label = card_label(card, self.config.display.card_style);
                writeln!(self.output, "Your card is... {label}!")?;
                label
            }
            Session::MindReader(game) => {
                let Some(number) = game.reveal() else {
                    return Ok(String::new());
                };
                if number == 0 {
                    writeln!(
                        self.output,
                        "You said no to every card. Was your number between 1 and 63?"
                    )?;
                } else {
                    writeln!(self.output, "Your number is... {number}!")?;
                }
                number.to_string()
            }
        };
        info!(target: "tricks_cli::host", revealed = %revealed, "trick revealed");
        Ok(revealed)
    }

    fn ask_play_again(&mut self, summary: &mut SessionSummary) -> Result<bool, HostError> {
        loop {
            match self.prompter.yes_no(&mut self.output, AGAIN_QUESTION)? {
                Answer::Given(again) => return Ok(again),
                Answer::Quit => return Ok(false),
                Answer::Invalid(err) => {
                    summary.rejected_inputs += 1;
                    writeln!(self.output, "{err}")?;
                }
            }
        }
    }
}
