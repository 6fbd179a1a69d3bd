//! Deployment configuration.

use serde::Deserialize;
use thiserror::Error;

/// Environment variable listing installed models, comma-separated.
pub const MODULES_VAR: &str = "PRODPARTY_MODULES";
/// Environment variable holding the log filter.
pub const LOG_VAR: &str = "RUST_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no installed models configured")]
    NoModels,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModuleConfig {
    /// Host models available in this deployment (e.g. `"sale.sale"`).
    pub installed_models: Vec<String>,
    /// `tracing-subscriber` filter directive.
    pub log_filter: String,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            installed_models: [
                "production",
                "production.bom.input",
                "production.bom.output",
                "stock.move",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            log_filter: "info".to_string(),
        }
    }
}

impl ModuleConfig {
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)?;
        config.validated()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build from a variable lookup; unset variables keep their defaults.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(models) = lookup(MODULES_VAR) {
            config.installed_models = models
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(filter) = lookup(LOG_VAR) {
            config.log_filter = filter;
        }
        config.validated()
    }

    pub fn has_model(&self, model: &str) -> bool {
        self.installed_models.iter().any(|m| m == model)
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.installed_models.is_empty() {
            return Err(ConfigError::NoModels);
        }
        Ok(self)
    }
}
