//! One calculator session: the inputs being edited, their steppers, the
//! derived results, the snapshot store and the current share URL.
//!
//! Startup precedence is defaults, then the stored snapshot, then the
//! query string of the starting URL. The share URL always carries the
//! complete parameter set, from startup on. Every committed change recomputes
//! the results, saves a snapshot and replaces the current URL with one
//! carrying the new parameter set.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use team_core::query::{apply_url, share_url, strip_query};
use team_core::store::SnapshotStore;
use team_core::{
    BoundedStepper, CostInputs, CostModel, CostResults, InputField, StepOutcome, StepperConfig,
    StepperError, StoreError,
};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid stepper for '{field}': {source}")]
    Stepper {
        field: InputField,
        #[source]
        source: StepperError,
    },

    #[error("'{0}' is free text and cannot be stepped")]
    NotNumeric(InputField),
}

/// Direction of a stepper nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

pub struct CalculatorSession {
    defaults: CostInputs,
    stepper_configs: BTreeMap<InputField, StepperConfig>,
    inputs: CostInputs,
    results: CostResults,
    steppers: BTreeMap<InputField, BoundedStepper>,
    url: Url,
    store: Box<dyn SnapshotStore>,
}

impl CalculatorSession {
    /// Loads the session state.
    ///
    /// The share URL starts out carrying the full loaded parameter set.
    ///
    /// `stepper_configs` supplies bounds per numeric field; fields missing
    /// from it use [`InputField::default_stepper_config`].
    pub async fn start(
        store: Box<dyn SnapshotStore>,
        defaults: CostInputs,
        stepper_configs: BTreeMap<InputField, StepperConfig>,
        url: Url,
    ) -> Result<Self, SessionError> {
        let mut inputs = defaults.clone();

        if let Some(stored) = store.load().await? {
            debug!("restoring stored snapshot");
            inputs = stored;
        }

        let overridden = apply_url(&mut inputs, &url);
        if !overridden.is_empty() {
            debug!(?overridden, "applied url parameters");
        }

        let steppers = build_steppers(&stepper_configs, &inputs)?;
        let results = CostModel::compute(&inputs);
        let url = share_url(&url, &inputs);

        Ok(Self {
            defaults,
            stepper_configs,
            inputs,
            results,
            steppers,
            url,
            store,
        })
    }

    pub fn inputs(&self) -> &CostInputs {
        &self.inputs
    }

    pub fn results(&self) -> &CostResults {
        &self.results
    }

    /// The current share link.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn stepper(
        &self,
        field: InputField,
    ) -> Option<&BoundedStepper> {
        self.steppers.get(&field)
    }

    /// Replaces the team name.
    ///
    /// Returns `true` when the name changed and was committed.
    pub async fn set_team_name(
        &mut self,
        name: &str,
    ) -> Result<bool, SessionError> {
        if self.inputs.team_name == name {
            return Ok(false);
        }
        self.inputs.team_name = name.to_string();
        self.commit(InputField::TeamName).await?;
        Ok(true)
    }

    /// Sets `field` from user text.
    ///
    /// The team name is taken verbatim. Numeric text goes through the
    /// field's stepper, unclamped, with unparseable text becoming zero.
    /// Returns `true` when a change was committed.
    pub async fn set_field(
        &mut self,
        field: InputField,
        raw: &str,
    ) -> Result<bool, SessionError> {
        if !field.is_numeric() {
            return self.set_team_name(raw).await;
        }
        let outcome = self
            .steppers
            .get_mut(&field)
            .ok_or(SessionError::NotNumeric(field))?
            .set_raw(raw);
        self.apply_outcome(field, &outcome).await?;
        Ok(outcome.changed())
    }

    pub async fn increment(
        &mut self,
        field: InputField,
    ) -> Result<StepOutcome, SessionError> {
        self.step(field, Step::Up).await
    }

    pub async fn decrement(
        &mut self,
        field: InputField,
    ) -> Result<StepOutcome, SessionError> {
        self.step(field, Step::Down).await
    }

    /// Nudges `field` one step in `direction`.
    pub async fn step(
        &mut self,
        field: InputField,
        direction: Step,
    ) -> Result<StepOutcome, SessionError> {
        let stepper = self
            .steppers
            .get_mut(&field)
            .ok_or(SessionError::NotNumeric(field))?;
        let outcome = match direction {
            Step::Up => stepper.increment(),
            Step::Down => stepper.decrement(),
        };
        self.apply_outcome(field, &outcome).await?;
        Ok(outcome)
    }

    /// Restores the defaults, deletes the stored snapshot and strips the
    /// parameters from the current URL.
    pub async fn reset(&mut self) -> Result<(), SessionError> {
        self.inputs = self.defaults.clone();
        self.steppers = build_steppers(&self.stepper_configs, &self.inputs)?;
        self.results = CostModel::compute(&self.inputs);
        self.store.clear().await?;
        self.url = strip_query(&self.url);
        info!("session reset to defaults");
        Ok(())
    }

    async fn apply_outcome(
        &mut self,
        field: InputField,
        outcome: &StepOutcome,
    ) -> Result<(), SessionError> {
        let Some(changed) = &outcome.notification else {
            debug!(%field, "no change to commit");
            return Ok(());
        };
        self.inputs.set_numeric(field, changed.value);
        self.sync_stepper(field);
        self.commit(field).await
    }

    /// Keeps a stepper equal to the stored field after lossy conversions
    /// (the player count only holds whole, non-negative numbers).
    fn sync_stepper(
        &mut self,
        field: InputField,
    ) {
        let (Some(stepper), Some(stored)) = (self.steppers.get_mut(&field), self.inputs.numeric(field))
        else {
            return;
        };
        if stepper.value() != stored {
            stepper.set_value(stored);
        }
    }

    async fn commit(
        &mut self,
        field: InputField,
    ) -> Result<(), SessionError> {
        self.results = CostModel::compute(&self.inputs);
        self.store.save(&self.inputs).await?;
        self.url = share_url(&self.url, &self.inputs);
        info!(%field, value = %self.inputs.field_text(field), "committed change");
        Ok(())
    }
}

fn build_steppers(
    configs: &BTreeMap<InputField, StepperConfig>,
    inputs: &CostInputs,
) -> Result<BTreeMap<InputField, BoundedStepper>, SessionError> {
    let mut steppers = BTreeMap::new();
    for field in InputField::NUMERIC {
        let Some(config) = configs
            .get(&field)
            .copied()
            .or_else(|| field.default_stepper_config())
        else {
            continue;
        };
        let value = inputs.numeric(field).unwrap_or(Decimal::ZERO);
        let stepper = BoundedStepper::new(config, value)
            .map_err(|source| SessionError::Stepper { field, source })?;
        steppers.insert(field, stepper);
    }
    Ok(steppers)
}
