//! Sales domain module.
//!
//! Sales are an optional integration: a deployment may not have them
//! installed. Consumers resolve [`SaleIntegration`] from the model pool and
//! degrade gracefully when it is absent.

pub mod order;

pub use order::{Sale, SaleIntegration, SaleLine};
