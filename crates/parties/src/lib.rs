//! Parties domain module (customers, suppliers and stock owners).
//!
//! Only the identity and display name of a party matter to the production and
//! stock modules; they reference parties through [`PartyRef`].

pub mod party;

pub use party::{Party, PartyRef};
