use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::Result;

const DEFAULTS: &str = include_str!("../config/default.toml");

/// How a double answers invocations that match no configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Return the declared type default
    #[default]
    Loose,
    /// Fail with `DoubleError::UnconfiguredInvocation`
    Strict,
}

/// Settings applied to newly created doubles
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DoubleSettings {
    pub strictness: Strictness,
    /// Emit a trace event for every recorded invocation
    pub log_invocations: bool,
}

impl Default for DoubleSettings {
    fn default() -> Self {
        Self {
            strictness: Strictness::Loose,
            log_invocations: true,
        }
    }
}

impl DoubleSettings {
    pub fn strict() -> Self {
        Self {
            strictness: Strictness::Strict,
            ..Self::default()
        }
    }

    /// Load settings from the built-in defaults and `STANDIN_*` environment variables
    ///
    /// e.g. `STANDIN_STRICTNESS=strict`, `STANDIN_LOG_INVOCATIONS=false`
    pub fn from_env() -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(DEFAULTS, FileFormat::Toml))
            .add_source(Environment::with_prefix("STANDIN").try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Load settings from the built-in defaults overlaid with a TOML document
    pub fn from_toml_str(overrides: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(DEFAULTS, FileFormat::Toml))
            .add_source(File::from_str(overrides, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
