use super::{
    composition::CompositionConfig,
    evolution::EvolutionConfig,
    traits::ConfigSection,
};
use crate::error::TunesmithError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides, e.g. `TUNESMITH_EVOLUTION__POPULATION_SIZE=80`.
pub const ENV_PREFIX: &str = "TUNESMITH";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub composition: CompositionConfig,
    pub evolution: EvolutionConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), TunesmithError> {
        validate_section(&self.composition)?;
        validate_section(&self.evolution)?;
        Ok(())
    }
}

/// Validate one section, tagging the message with its table name.
fn validate_section<S: ConfigSection>(section: &S) -> Result<(), TunesmithError> {
    section.validate().map_err(|e| match e {
        TunesmithError::Configuration(msg) => {
            TunesmithError::Configuration(format!("[{}] {}", S::section_name(), msg))
        }
        TunesmithError::DegenerateConfiguration(msg) => {
            TunesmithError::DegenerateConfiguration(format!("[{}] {}", S::section_name(), msg))
        }
        other => other,
    })
}

pub struct ConfigManager {
    config: AppConfig,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Layer defaults, an optional config file and `TUNESMITH_*` environment
    /// variables, in that order of precedence.
    pub fn load(path: Option<&Path>) -> Result<Self, TunesmithError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?);

        if let Some(path) = path {
            log::debug!("Reading configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(Self { config })
    }

    /// Write the active configuration as TOML that `load` reads back unchanged.
    pub fn save_to_file(&self, path: &Path) -> Result<(), TunesmithError> {
        let rendered = toml::to_string_pretty(&self.config).map_err(|e| {
            TunesmithError::Configuration(format!("Cannot render configuration: {}", e))
        })?;
        std::fs::write(path, rendered)?;
        Ok(())
    }

    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    /// Apply an edit and re-validate. The previous configuration is kept
    /// if validation fails.
    pub fn update<F>(&mut self, f: F) -> Result<(), TunesmithError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.config.clone();
        f(&mut candidate);
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
