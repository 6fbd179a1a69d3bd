//! `prodparty-module`: wires the stock owner extensions into a deployment.
//!
//! - [`config`]: which host models are installed, log filter
//! - [`registration`]: extension registration in the model pool
//! - [`deployment`]: bootstrap and the entry points built from it

pub mod config;
pub mod deployment;
pub mod registration;

pub use config::{ConfigError, ModuleConfig};
pub use deployment::{Deployment, bootstrap};
pub use registration::{EXTENDED_MODELS, MODULE_NAME, register};
