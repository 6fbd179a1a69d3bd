//! `prodparty-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the domain error model, and the model registry used to resolve
//! optional integrations at runtime.

pub mod entity;
pub mod error;
pub mod id;
pub mod pool;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{
    BomId, CompanyId, LocationId, MoveId, PartyId, ProductId, ProductionId, SaleId, SaleLineId,
    UomId, UserId,
};
pub use pool::{ModelHandle, Pool};
