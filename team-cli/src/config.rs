//! TOML configuration for the `team-cost` binary.
//!
//! Every section is optional; a missing file section falls back to the
//! built-in defaults.
//!
//! ```toml
//! [defaults]
//! team_name = "Ice Hawks"
//! cost_per_hour_of_ice = 220
//! number_of_players = 15
//!
//! [steppers.hours]
//! min = 1
//! step = "0.25"
//!
//! [store]
//! backend = "sqlite"
//! connection_string = "team-cost.db"
//! snapshot_key = "team-cost-splitter"
//!
//! [share]
//! base_url = "https://rink.example.org/costs/"
//!
//! [logging]
//! level = "debug"
//! file = "team-cost.log"
//! console = true
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use team_core::store::StoreConfig;
use team_core::{CostInputs, InputField, StepperConfig, StepperError};
use thiserror::Error;
use url::Url;

/// Link base used when no `[share] base_url` is configured.
pub const DEFAULT_SHARE_BASE: &str = "http://localhost/team-cost-splitter/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid stepper for '{field}': {source}")]
    InvalidStepper {
        field: InputField,
        #[source]
        source: StepperError,
    },

    #[error("'{0}' is not a numeric field and cannot have a stepper")]
    NonNumericStepper(InputField),

    #[error("invalid share base url '{url}': {source}")]
    InvalidShareUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    pub base_url: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SHARE_BASE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level or full filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// Append log records to this file as well.
    pub file: Option<PathBuf>,
    /// Write log records to stderr.
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            console: true,
        }
    }
}

/// Everything the binary can be configured with.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Starting values, also restored by `reset`.
    pub defaults: CostInputs,
    /// Per-field overrides of the built-in stepper settings.
    pub steppers: BTreeMap<InputField, StepperConfig>,
    pub store: StoreConfig,
    pub share: ShareConfig,
    pub logging: LoggingConfig,
}

impl CalculatorConfig {
    /// Reads and validates the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks stepper overrides and the share base.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (&field, stepper) in &self.steppers {
            if !field.is_numeric() {
                return Err(ConfigError::NonNumericStepper(field));
            }
            stepper
                .validate()
                .map_err(|source| ConfigError::InvalidStepper { field, source })?;
        }
        self.share_base()?;
        Ok(())
    }

    /// The stepper settings for `field`: the override if one is configured,
    /// the built-in setting otherwise. `None` for the team name.
    pub fn stepper_config(
        &self,
        field: InputField,
    ) -> Option<StepperConfig> {
        if !field.is_numeric() {
            return None;
        }
        self.steppers
            .get(&field)
            .copied()
            .or_else(|| field.default_stepper_config())
    }

    pub fn share_base(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.share.base_url).map_err(|source| ConfigError::InvalidShareUrl {
            url: self.share.base_url.clone(),
            source,
        })
    }
}
