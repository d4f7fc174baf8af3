use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tricks_cli::config::HostConfig;
use tricks_cli::host::{Host, SessionSummary, Trick};
use tricks_cli::logging::init_logging;
use tricks_cli::prompt::Prompter;
use tricks_cli::verify::verify;
use tricks_core::AppInfo;

const DEFAULT_VERIFY_DEALS: u64 = 64;

/// Two classic self-working card tricks for the terminal.
#[derive(Debug, Parser)]
#[command(name = "tricks", author, version, about = "Twenty-one card trick and binary mind reader")]
struct Cli {
    /// Path to an optional YAML configuration file.
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Override the shuffle seed.
    #[arg(long, value_name = "SEED", global = true)]
    seed: Option<u64>,

    /// Enable structured JSON logs regardless of config.
    #[arg(long, global = true)]
    log_structured: bool,

    /// Save the session here after every answer and resume from it on start.
    #[arg(long, value_name = "FILE", global = true)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Find the player's card among 21 in three rounds.
    TwentyOne,
    /// Guess a number from 1 to 63 from six yes/no answers.
    MindReader,
    /// Replay every possible secret and check both tricks land.
    Verify {
        /// Number of seeded deals to sweep for the 21-card trick.
        #[arg(long, value_name = "COUNT", default_value_t = DEFAULT_VERIFY_DEALS)]
        deals: u64,
    },
}

impl Command {
    fn session_label(&self) -> &'static str {
        match self {
            Command::TwentyOne => Trick::TwentyOne.label(),
            Command::MindReader => Trick::MindReader.label(),
            Command::Verify { .. } => "verify",
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => HostConfig::from_path(path)?,
        None => HostConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    if cli.log_structured {
        config.logging.enable_structured = true;
    }

    config.validate()?;

    let log_path = config.resolved_log_path(cli.command.session_label());
    let logging_guard = init_logging(&config.logging, &log_path)?;
    if let Some(guard) = logging_guard.as_ref() {
        eprintln!("Structured log: {}", guard.log_path.display());
    }

    let trick = match cli.command {
        Command::TwentyOne => Trick::TwentyOne,
        Command::MindReader => Trick::MindReader,
        Command::Verify { deals } => {
            let report = verify(deals);
            println!("{report}");
            if !report.is_ok() {
                anyhow::bail!("{} self-check failed", AppInfo::name());
            }
            return Ok(());
        }
    };

    println!("{} {} ({})", AppInfo::name(), AppInfo::version(), AppInfo::codename());

    let summary = play(trick, config, cli.state)?;
    if summary.rejected_inputs > 0 {
        println!(
            "({} input{} re-prompted)",
            summary.rejected_inputs,
            if summary.rejected_inputs == 1 { "" } else { "s" }
        );
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn play(trick: Trick, config: HostConfig, state: Option<PathBuf>) -> anyhow::Result<SessionSummary> {
    use std::io::IsTerminal;
    use tricks_cli::prompt::TerminalPrompter;

    if io::stdin().is_terminal() {
        let host = Host::with_prompter(TerminalPrompter, io::stdout(), config);
        return finish(host, trick, state);
    }
    finish(Host::new(io::stdin().lock(), io::stdout(), config), trick, state)
}

#[cfg(not(feature = "cli"))]
fn play(trick: Trick, config: HostConfig, state: Option<PathBuf>) -> anyhow::Result<SessionSummary> {
    finish(Host::new(io::stdin().lock(), io::stdout(), config), trick, state)
}

fn finish<P: Prompter, W: Write>(
    mut host: Host<P, W>,
    trick: Trick,
    state: Option<PathBuf>,
) -> anyhow::Result<SessionSummary> {
    if let Some(state) = state {
        host = host.with_state_file(state);
    }
    Ok(host.run(trick)?)
}
