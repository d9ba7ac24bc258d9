use anyhow::{Context, Result};
use team_core::InputField;
use team_core::store::{MemoryStoreFactory, SnapshotStoreRegistry};
use team_db_sqlite::SqliteStoreFactory;
use tracing::{debug, info};
use url::Url;

use crate::config::CalculatorConfig;
use crate::report::Breakdown;
use crate::session::{CalculatorSession, Step};

/// Build a [`SnapshotStoreRegistry`] with every backend compiled into this
/// binary.
///
/// To add a new backend, register its factory here.
pub fn build_registry() -> SnapshotStoreRegistry {
    let mut registry = SnapshotStoreRegistry::new();
    registry.register(Box::new(MemoryStoreFactory));
    registry.register(Box::new(SqliteStoreFactory));
    registry
}

/// What one invocation does to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the breakdown and share link.
    Show,
    /// Set a field from text.
    Set { field: InputField, value: String },
    /// Step a numeric field `times` times.
    Step {
        field: InputField,
        direction: Step,
        times: u32,
    },
    /// Restore defaults and forget the stored snapshot.
    Reset,
    /// Print only the share link.
    Share,
}

/// Opens the configured store and starts a session on it.
///
/// `url` overrides the configured share base; its query string, if any,
/// is applied over the stored snapshot.
pub async fn open_session(
    config: &CalculatorConfig,
    url: Option<Url>,
) -> Result<CalculatorSession> {
    let registry = build_registry();
    debug!(
        backend = %config.store.backend,
        available = ?registry.available_backends(),
        "opening snapshot store"
    );
    let store = registry
        .create(&config.store)
        .await
        .with_context(|| format!("Failed to open '{}' store", config.store.backend))?;

    let url = match url {
        Some(url) => url,
        None => config.share_base()?,
    };

    let stepper_configs = InputField::NUMERIC
        .into_iter()
        .filter_map(|field| config.stepper_config(field).map(|c| (field, c)))
        .collect();

    CalculatorSession::start(store, config.defaults.clone(), stepper_configs, url)
        .await
        .context("Failed to start session")
}

/// Runs `command` against `session` and returns the text to print.
pub async fn run(
    session: &mut CalculatorSession,
    command: Command,
) -> Result<String> {
    match command {
        Command::Show => {}
        Command::Set { field, value } => {
            let changed = session
                .set_field(field, &value)
                .await
                .with_context(|| format!("Failed to set {field}"))?;
            if !changed {
                info!(%field, "value unchanged");
            }
        }
        Command::Step {
            field,
            direction,
            times,
        } => {
            for applied in 0..times {
                let outcome = session
                    .step(field, direction)
                    .await
                    .with_context(|| format!("Failed to step {field}"))?;
                if !outcome.changed() {
                    info!(%field, value = %outcome.value, applied, "reached bound, stopping");
                    break;
                }
            }
        }
        Command::Reset => {
            session.reset().await.context("Failed to reset")?;
        }
        Command::Share => return Ok(format!("{}\n", session.url())),
    }

    Ok(render(session))
}

/// Breakdown followed by the share link.
pub fn render(session: &CalculatorSession) -> String {
    let breakdown = Breakdown {
        inputs: session.inputs(),
        results: session.results(),
    };
    format!("{breakdown}\nShare: {}\n", session.url())
}
