//! Stock owner extension of stock moves.

use prodparty_auth::AccessContext;
use prodparty_core::{DomainResult, PartyId};
use prodparty_stock::{LocationType, MoveBase, StockMove};

use crate::ProductionReader;

/// Checks moves of productions against the production's stock owner.
///
/// The production is read with access checks suspended: whoever may see the
/// move may learn which party it is checked against, even without access to
/// the production itself.
#[derive(Debug)]
pub struct ProductionMove<'a, B, R: ?Sized> {
    base: B,
    productions: &'a R,
}

impl<'a, B, R> ProductionMove<'a, B, R>
where
    B: MoveBase,
    R: ProductionReader + ?Sized,
{
    pub fn new(base: B, productions: &'a R) -> Self {
        Self { base, productions }
    }

    fn production_owner(
        &self,
        ctx: &AccessContext,
        mv: &StockMove,
    ) -> Option<DomainResult<Option<PartyId>>> {
        let production = mv.production_input.or(mv.production_output)?;
        let _guard = ctx.without_access_check();
        let owner = self
            .productions
            .stock_owner(ctx, production)
            .map(|owner| owner.map(|p| p.id));
        Some(owner)
    }
}

impl<B, R> MoveBase for ProductionMove<'_, B, R>
where
    B: MoveBase,
    R: ProductionReader + ?Sized,
{
    fn get_party_to_check(
        &self,
        ctx: &AccessContext,
        mv: &StockMove,
    ) -> DomainResult<Option<PartyId>> {
        match self.production_owner(ctx, mv) {
            Some(owner) => owner,
            None => self.base.get_party_to_check(ctx, mv),
        }
    }

    fn location_types_to_check_party(&self) -> Vec<LocationType> {
        let mut types = self.base.location_types_to_check_party();
        if !types.contains(&LocationType::Production) {
            types.push(LocationType::Production);
        }
        types
    }
}
