//! Production domain module with stock owner support.
//!
//! A production order may consume or produce the stock of an external party
//! (its *stock owner*) instead of the company's own stock. Moves generated from
//! party-tracked BOM lines are attributed to that party through `party_used`.
//!
//! Host behavior lives behind [`ProductionBase`] and [`prodparty_stock::MoveBase`];
//! the stock owner logic is layered on top by [`StockOwnerProduction`] and
//! [`ProductionMove`]. Edits run through an [`EditSession`] which dispatches
//! change hooks according to an [`OnChangeTable`].

pub mod base;
pub mod bom;
pub mod changes;
pub mod move_party;
pub mod on_change;
pub mod origin;
pub mod production;
pub mod session;
pub mod stock_owner;
pub mod store;

pub use base::{ProductionBase, StandardProduction};
pub use bom::{Bom, BomCatalog, BomLine};
pub use changes::ProductionChanges;
pub use move_party::ProductionMove;
pub use on_change::{Hook, OnChangeTable, Subscription};
pub use origin::Origin;
pub use production::{Field, FieldEdit, Production, ProductionState};
pub use session::EditSession;
pub use stock_owner::StockOwnerProduction;
pub use store::{ProductionReader, ProductionStore};

#[cfg(test)]
pub(crate) mod testing;
