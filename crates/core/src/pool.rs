//! Model registry (the "pool") of a deployment.
//!
//! Host models are registered by name (e.g. `"production"`, `"sale.sale"`).
//! Modules extend registered models; integrations that may not be installed
//! are looked up with [`Pool::get`], which returns `None` when absent.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{DomainError, DomainResult};

/// Read-only handle on a registered model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelHandle<'a> {
    name: &'a str,
    extended_by: &'a [String],
}

impl<'a> ModelHandle<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Modules that registered an extension of this model, in registration order.
    pub fn extended_by(&self) -> &'a [String] {
        self.extended_by
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pool {
    models: BTreeSet<String>,
    extensions: BTreeMap<String, Vec<String>>,
}

impl Pool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_models<I, S>(models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut pool = Self::new();
        for model in models {
            pool.register_model(model);
        }
        pool
    }

    /// Register a host model. Registering twice is a no-op.
    pub fn register_model(&mut self, name: impl Into<String>) {
        self.models.insert(name.into());
    }

    pub fn has_model(&self, name: &str) -> bool {
        self.models.contains(name)
    }

    /// Look up a model; `None` means the feature is not installed.
    pub fn get(&self, name: &str) -> Option<ModelHandle<'_>> {
        let name = self.models.get(name)?.as_str();
        let extended_by = self
            .extensions
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        Some(ModelHandle { name, extended_by })
    }

    /// Record that `module` extends `model`.
    ///
    /// The model must already be registered; extending twice from the same
    /// module is a no-op.
    pub fn extend(&mut self, module: &str, model: &str) -> DomainResult<()> {
        if !self.has_model(model) {
            return Err(DomainError::not_found(format!(
                "model '{model}' required by module '{module}'"
            )));
        }
        let modules = self.extensions.entry(model.to_string()).or_default();
        if !modules.iter().any(|m| m == module) {
            modules.push(module.to_string());
        }
        tracing::debug!(module, model, "model extended");
        Ok(())
    }

    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_none_for_missing_model() {
        let pool = Pool::with_models(["production"]);
        assert!(pool.get("sale.sale").is_none());
        assert_eq!(pool.get("production").map(|h| h.name()), Some("production"));
    }

    #[test]
    fn extend_requires_registered_model() {
        let mut pool = Pool::new();
        let err = pool.extend("mod_a", "stock.move").unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn extend_is_idempotent_per_module() {
        let mut pool = Pool::with_models(["stock.move"]);
        pool.extend("mod_a", "stock.move").unwrap();
        pool.extend("mod_a", "stock.move").unwrap();
        pool.extend("mod_b", "stock.move").unwrap();

        let handle = pool.get("stock.move").unwrap();
        assert_eq!(handle.extended_by(), ["mod_a".to_string(), "mod_b".to_string()]);
    }
}
