//! Stock domain module: locations, moves and party checks.
//!
//! Pure domain logic (no IO, no storage). Moves carry the party whose stock
//! they use (`party_used`); [`party_check`] decides which party a move must be
//! checked against and validates the two agree.

pub mod location;
pub mod moves;
pub mod party_check;

pub use location::{Location, LocationType, Warehouse};
pub use moves::{MoveState, MoveValues, Shipment, StockMove};
pub use party_check::{MoveBase, StandardMove, check_party_used};
