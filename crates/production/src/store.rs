//! In-memory production records with access-checked reads.

use std::collections::HashMap;

use prodparty_auth::{AccessContext, Permission};
use prodparty_core::{DomainError, DomainResult, Entity, ProductionId};
use prodparty_parties::PartyRef;

use crate::Production;

/// Read access to the stock owner of saved productions.
pub trait ProductionReader {
    fn stock_owner(
        &self,
        ctx: &AccessContext,
        id: ProductionId,
    ) -> DomainResult<Option<PartyRef>>;
}

#[derive(Debug, Clone, Default)]
pub struct ProductionStore {
    records: HashMap<ProductionId, Production>,
}

impl ProductionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a production, returning the previous version if any.
    pub fn insert(&mut self, production: Production) -> Option<Production> {
        self.records.insert(production.id(), production)
    }

    /// Requires `production.read` unless access checks are suspended.
    pub fn get(&self, ctx: &AccessContext, id: ProductionId) -> DomainResult<&Production> {
        ctx.ensure(&Permission::PRODUCTION_READ)?;
        self.records
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("production {id}")))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ProductionReader for ProductionStore {
    fn stock_owner(
        &self,
        ctx: &AccessContext,
        id: ProductionId,
    ) -> DomainResult<Option<PartyRef>> {
        Ok(self.get(ctx, id)?.stock_owner.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use prodparty_auth::Principal;
    use prodparty_core::UserId;

    #[test]
    fn reads_require_permission() {
        let fx = Fixture::new();
        let mut production = fx.production(1.0);
        production.stock_owner = Some(fx.acme.clone());
        let id = production.id;
        let mut store = ProductionStore::new();
        store.insert(production);

        let clerk = AccessContext::new(Principal::new(UserId::new(), []));
        let err = store.stock_owner(&clerk, id).unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));

        let manager = AccessContext::new(Principal::new(
            UserId::new(),
            [Permission::PRODUCTION_READ],
        ));
        assert_eq!(store.stock_owner(&manager, id).unwrap(), Some(fx.acme.clone()));
    }

    #[test]
    fn unknown_production_is_not_found() {
        let store = ProductionStore::new();
        let ctx = AccessContext::new(Principal::root());
        let err = store.get(&ctx, ProductionId::new()).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
        assert!(store.is_empty());
    }
}
