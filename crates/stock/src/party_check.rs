//! Which party a move is checked against, and the `party_used` check.

use prodparty_auth::AccessContext;
use prodparty_core::{DomainError, DomainResult, PartyId};

use crate::{LocationType, Shipment, StockMove};

/// Base party-check behavior of stock moves.
///
/// Extensions wrap an implementation of this trait and fall back to it for
/// moves they do not handle.
pub trait MoveBase {
    /// Party the move's ownership rules are evaluated against.
    fn get_party_to_check(
        &self,
        ctx: &AccessContext,
        mv: &StockMove,
    ) -> DomainResult<Option<PartyId>>;

    /// Location types whose moves are subject to the party check.
    fn location_types_to_check_party(&self) -> Vec<LocationType>;
}

/// Host behavior: the shipment's customer or supplier, checked on storage
/// locations.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMove;

impl MoveBase for StandardMove {
    fn get_party_to_check(
        &self,
        _ctx: &AccessContext,
        mv: &StockMove,
    ) -> DomainResult<Option<PartyId>> {
        Ok(match &mv.shipment {
            Some(Shipment::Customer { party }) | Some(Shipment::Supplier { party }) => {
                Some(party.id)
            }
            Some(Shipment::Internal) | None => None,
        })
    }

    fn location_types_to_check_party(&self) -> Vec<LocationType> {
        vec![LocationType::Storage]
    }
}

/// Reject a move whose `party_used` disagrees with its party to check.
///
/// Only moves touching a location type returned by
/// [`MoveBase::location_types_to_check_party`] are checked, and only when both
/// parties are known.
pub fn check_party_used<M>(base: &M, ctx: &AccessContext, mv: &StockMove) -> DomainResult<()>
where
    M: MoveBase + ?Sized,
{
    let Some(used) = &mv.party_used else {
        return Ok(());
    };
    let checked = base
        .location_types_to_check_party()
        .into_iter()
        .any(|kind| mv.touches(kind));
    if !checked {
        return Ok(());
    }

    match base.get_party_to_check(ctx, mv)? {
        Some(expected) if expected != used.id => {
            tracing::warn!(
                move_id = %mv.id,
                party_used = %used.id,
                party_to_check = %expected,
                "party used does not match party to check"
            );
            Err(DomainError::validation(format!(
                "move {} uses stock of '{}' but must be checked against party {}",
                mv.id, used.rec_name, expected
            )))
        }
        _ => Ok(()),
    }
}
