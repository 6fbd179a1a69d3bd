//! Registration of the stock owner extensions.

use prodparty_core::{DomainResult, Pool};

pub const MODULE_NAME: &str = "production_external_party";

/// Host models this module extends.
pub const EXTENDED_MODELS: [&str; 4] = [
    "production",
    "production.bom.input",
    "production.bom.output",
    "stock.move",
];

/// Register the module's extensions; every extended model must be installed.
pub fn register(pool: &mut Pool) -> DomainResult<()> {
    for model in EXTENDED_MODELS {
        pool.extend(MODULE_NAME, model)?;
    }
    tracing::info!(module = MODULE_NAME, "module registered");
    Ok(())
}
