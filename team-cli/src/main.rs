use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use url::Url;

use team_cli::app::{self, Command};
use team_cli::config::CalculatorConfig;
use team_cli::logging;
use team_cli::session::Step;
use team_core::InputField;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Splits a hockey team's season costs between its players.
///
/// Loads the last saved scenario, applies any parameters from `--url`,
/// runs one command and prints the cost breakdown with a share link.
#[derive(Debug, Parser)]
#[command(name = "team-cost")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Snapshot store backend (`sqlite` or `memory`).
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Store connection string.
    /// For SQLite this is a file path (e.g. `team-cost.db`) or `:memory:`.
    #[arg(long, global = true)]
    db: Option<String>,

    /// Starting link; its query parameters override the saved scenario.
    #[arg(long, global = true)]
    url: Option<Url>,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Print the cost breakdown (default).
    Show,
    /// Set a field, e.g. `set hours 12.5` or `set teamName "Ice Hawks"`.
    Set { field: InputField, value: String },
    /// Step a numeric field up.
    Inc {
        field: InputField,
        #[arg(long, default_value_t = 1)]
        times: u32,
    },
    /// Step a numeric field down.
    Dec {
        field: InputField,
        #[arg(long, default_value_t = 1)]
        times: u32,
    },
    /// Restore the defaults and delete the saved scenario.
    Reset,
    /// Print only the share link.
    Share,
}

impl From<CliCommand> for Command {
    fn from(command: CliCommand) -> Self {
        match command {
            CliCommand::Show => Command::Show,
            CliCommand::Set { field, value } => Command::Set { field, value },
            CliCommand::Inc { field, times } => Command::Step {
                field,
                direction: Step::Up,
                times,
            },
            CliCommand::Dec { field, times } => Command::Step {
                field,
                direction: Step::Down,
                times,
            },
            CliCommand::Reset => Command::Reset,
            CliCommand::Share => Command::Share,
        }
    }
}

// ─── config ──────────────────────────────────────────────────────────────────

/// Reads the config file, if any, and layers the command-line overrides on
/// top of it.
fn load_config(cli: &Cli) -> anyhow::Result<CalculatorConfig> {
    let mut config = match &cli.config {
        Some(path) => CalculatorConfig::load(path)?,
        None => CalculatorConfig::default(),
    };
    if let Some(backend) = &cli.backend {
        config.store.backend = backend.clone();
    }
    if let Some(db) = &cli.db {
        config.store.connection_string = db.clone();
    }
    Ok(config)
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_default_logging();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    logging::apply_config(&config.logging)?;

    let command = cli.command.map(Command::from).unwrap_or(Command::Show);
    debug!(?command, backend = %config.store.backend, "starting");

    let mut session = app::open_session(&config, cli.url).await?;
    let output = app::run(&mut session, command).await?;
    print!("{output}");

    Ok(())
}
