//! Stock owner extension of production orders.

use std::collections::HashSet;

use prodparty_core::{CompanyId, Pool, ProductId};
use prodparty_parties::PartyRef;
use prodparty_sales::SaleIntegration;
use prodparty_stock::{Location, MoveValues, StockMove};

use crate::{
    BomLine, Field, Hook, OnChangeTable, Origin, Production, ProductionBase, ProductionChanges,
};

/// Adds the stock owner to a host production behavior `B`.
///
/// Moves generated from `party_stock` BOM lines are attributed to the stock
/// owner, and the owner follows the sale a production originates from when
/// sales are installed.
#[derive(Debug, Clone)]
pub struct StockOwnerProduction<B> {
    base: B,
    sales: Option<SaleIntegration>,
}

impl<B: ProductionBase> StockOwnerProduction<B> {
    /// Resolves the optional sale integration from `pool` once.
    pub fn new(base: B, pool: &Pool) -> Self {
        let sales = SaleIntegration::lookup(pool);
        if sales.is_none() {
            tracing::debug!("sales not installed, stock owner will not follow origin");
        }
        Self { base, sales }
    }

    pub fn base(&self) -> &B {
        &self.base
    }

    /// Subscribe the stock owner hooks and make the host hooks read the owner.
    ///
    /// The owner and origin hooks re-explode the BOM, so they also read
    /// whatever the BOM hook reads.
    pub fn declare(table: &mut OnChangeTable) {
        for hook in [Hook::Product, Hook::Bom, Hook::Uom, Hook::Quantity] {
            table.add_dependency(hook, Field::StockOwner);
        }
        let explode = table.depends(Hook::Bom);
        table
            .subscribe(
                Field::StockOwner,
                Hook::StockOwner,
                [Field::StockOwner].into_iter().chain(explode.iter().copied()),
            )
            .subscribe(
                Field::Origin,
                Hook::Origin,
                [Field::Origin, Field::StockOwner]
                    .into_iter()
                    .chain(explode.iter().copied()),
            );
    }

    /// Stock owner implied by an origin document.
    fn owner_from_origin(origin: Option<&Origin>) -> Option<PartyRef> {
        match origin? {
            Origin::Sale(sale) => sale.party.clone(),
            Origin::SaleLine(line) => line.party().cloned(),
            Origin::Other { .. } => None,
        }
    }
}

impl<B: ProductionBase> ProductionBase for StockOwnerProduction<B> {
    fn product_defaults(&self, production: &Production) -> ProductionChanges {
        self.base.product_defaults(production)
    }

    fn explode_move_values(
        &self,
        production: &Production,
        from_location: &Location,
        to_location: &Location,
        company: CompanyId,
        bom_line: &BomLine,
        quantity: f64,
    ) -> MoveValues {
        let mut values = self.base.explode_move_values(
            production,
            from_location,
            to_location,
            company,
            bom_line,
            quantity,
        );
        if bom_line.party_stock {
            if let Some(owner) = &production.stock_owner {
                values.party_used = Some(owner.clone());
            }
        }
        values
    }

    fn set_moves(&self, production: &mut Production) {
        self.base.set_moves(production);

        let Some(owner) = production.stock_owner.clone() else {
            return;
        };
        let Some(bom) = &production.bom else {
            return;
        };
        let tracked_inputs = bom.party_stock_inputs();
        let tracked_outputs = bom.party_stock_outputs();

        let stamped = stamp(&mut production.inputs, &tracked_inputs, &owner)
            + stamp(&mut production.outputs, &tracked_outputs, &owner);
        tracing::info!(
            production = %production.id,
            stock_owner = %owner.id,
            stamped,
            "stock owner applied to production moves"
        );
    }

    fn on_change_stock_owner(&self, production: &mut Production) -> ProductionChanges {
        self.explode_bom(production)
    }

    fn on_change_origin(&self, production: &mut Production) -> ProductionChanges {
        let mut changes = self.base.on_change_origin(production);
        if self.sales.is_none() {
            return changes;
        }

        let owner = Self::owner_from_origin(production.origin.as_ref());
        if PartyRef::same(owner.as_ref(), production.stock_owner.as_ref()) {
            return changes;
        }

        tracing::info!(
            production = %production.id,
            origin = production.origin.as_ref().map(Origin::model),
            stock_owner = ?owner.as_ref().map(|p| p.id),
            "stock owner derived from origin"
        );
        production.stock_owner = owner.clone();
        changes.stock_owner = Some(owner);
        changes.merge(self.explode_bom(production));
        changes
    }
}

/// Set `party_used` on every move of a tracked product; returns the count.
fn stamp(moves: &mut [StockMove], products: &HashSet<ProductId>, owner: &PartyRef) -> usize {
    if products.is_empty() {
        return 0;
    }
    let mut count = 0;
    for mv in moves.iter_mut().filter(|m| products.contains(&m.product)) {
        mv.party_used = Some(owner.clone());
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StandardProduction;
    use crate::testing::{Fixture, party};
    use prodparty_core::{Entity, SaleId, SaleLineId};
    use prodparty_sales::{Sale, SaleLine};
    use proptest::prelude::*;

    fn with_sales(fx: &Fixture) -> StockOwnerProduction<StandardProduction> {
        let pool = Pool::with_models(["production", "stock.move", "sale.sale", "sale.line"]);
        StockOwnerProduction::new(StandardProduction::new(fx.catalog()), &pool)
    }

    fn without_sales(fx: &Fixture) -> StockOwnerProduction<StandardProduction> {
        let pool = Pool::with_models(["production", "stock.move"]);
        StockOwnerProduction::new(StandardProduction::new(fx.catalog()), &pool)
    }

    fn sale(owner: Option<PartyRef>) -> Sale {
        Sale::new(SaleId::new(), "S001", owner)
    }

    #[test]
    fn declare_subscribes_owner_hooks_and_dependencies() {
        let mut table = OnChangeTable::host();
        StockOwnerProduction::<StandardProduction>::declare(&mut table);

        for hook in [Hook::Product, Hook::Bom, Hook::Uom, Hook::Quantity] {
            assert!(table.depends(hook).contains(&Field::StockOwner), "{hook:?}");
        }
        assert_eq!(table.hooks_for(Field::StockOwner)[0].hook, Hook::StockOwner);
        assert_eq!(table.hooks_for(Field::Origin)[0].hook, Hook::Origin);
        assert!(table.depends(Hook::StockOwner).contains(&Field::Bom));
        assert!(table.depends(Hook::Origin).contains(&Field::Quantity));

        // Declaring twice changes nothing.
        let snapshot = table.clone();
        StockOwnerProduction::<StandardProduction>::declare(&mut table);
        assert_eq!(table, snapshot);
    }

    #[test]
    fn move_values_use_owner_only_for_party_stock_lines() {
        let fx = Fixture::new();
        let ext = without_sales(&fx);
        let mut production = fx.production(1.0);
        production.stock_owner = Some(fx.acme.clone());

        let changes = ext.explode_bom(&production);
        let inputs = changes.inputs.unwrap();
        let flour = inputs.iter().find(|m| m.product == fx.flour.id()).unwrap();
        let milk = inputs.iter().find(|m| m.product == fx.milk.id()).unwrap();

        assert_eq!(flour.party_used, Some(fx.acme.clone()));
        assert_eq!(milk.party_used, None);
        assert!(changes.outputs.unwrap().iter().all(|m| m.party_used.is_none()));
    }

    #[test]
    fn move_values_without_owner_are_base_values() {
        let fx = Fixture::new();
        let ext = without_sales(&fx);
        let production = fx.production(1.0);
        let line = &fx.bom.inputs[0];

        let extended = ext.explode_move_values(
            &production,
            &fx.storage,
            &fx.production_location,
            fx.company,
            line,
            2.0,
        );
        let base = ext.base().explode_move_values(
            &production,
            &fx.storage,
            &fx.production_location,
            fx.company,
            line,
            2.0,
        );
        assert_eq!(extended, base);
    }

    #[test]
    fn on_change_stock_owner_reexplodes_with_new_owner() {
        let fx = Fixture::new();
        let ext = without_sales(&fx);
        let mut production = fx.production(3.0);
        production.stock_owner = Some(fx.acme.clone());

        let first = ext.on_change_stock_owner(&mut production);
        let second = ext.on_change_stock_owner(&mut production);

        assert_eq!(first, second);
        assert_eq!(first.inputs.as_ref().map(Vec::len), Some(2));
        assert!(first.stock_owner.is_none());
    }

    #[test]
    fn origin_sale_sets_owner_and_reexplodes() {
        let fx = Fixture::new();
        let ext = with_sales(&fx);
        let mut production = fx.production(1.0);
        production.origin = Some(Origin::Sale(sale(Some(fx.acme.clone()))));

        let changes = ext.on_change_origin(&mut production);

        assert_eq!(production.stock_owner, Some(fx.acme.clone()));
        assert_eq!(changes.stock_owner, Some(Some(fx.acme.clone())));
        let inputs = changes.inputs.unwrap();
        let flour = inputs.iter().find(|m| m.product == fx.flour.id()).unwrap();
        assert_eq!(flour.party_used, Some(fx.acme.clone()));
        assert!(changes.outputs.is_some());
    }

    #[test]
    fn origin_sale_line_uses_parent_sale_party() {
        let fx = Fixture::new();
        let ext = with_sales(&fx);
        let globex = party("Globex");
        let line = SaleLine::new(
            SaleLineId::new(),
            sale(Some(globex.clone())),
            &fx.bread,
            1.0,
        )
        .unwrap();
        let mut production = fx.production(1.0);
        production.stock_owner = Some(fx.acme.clone());
        production.origin = Some(Origin::SaleLine(line));

        let changes = ext.on_change_origin(&mut production);

        assert_eq!(production.stock_owner, Some(globex.clone()));
        let map = changes.to_field_map();
        assert_eq!(map["stock_owner.rec_name"], "Globex");
    }

    #[test]
    fn clearing_origin_clears_owner() {
        let fx = Fixture::new();
        let ext = with_sales(&fx);
        let mut production = fx.production(1.0);
        production.stock_owner = Some(fx.acme.clone());
        production.origin = None;

        let changes = ext.on_change_origin(&mut production);

        assert_eq!(production.stock_owner, None);
        assert_eq!(changes.stock_owner, Some(None));
        assert!(changes.to_field_map()["stock_owner"].is_null());
        let inputs = changes.inputs.unwrap();
        assert!(inputs.iter().all(|m| m.party_used.is_none()));
    }

    #[test]
    fn unchanged_owner_proposes_nothing() {
        let fx = Fixture::new();
        let ext = with_sales(&fx);
        let mut production = fx.production(1.0);
        production.stock_owner = Some(fx.acme.clone());
        production.origin = Some(Origin::Sale(sale(Some(fx.acme.clone()))));

        assert!(ext.on_change_origin(&mut production).is_empty());
    }

    #[test]
    fn origin_is_ignored_without_sales() {
        let fx = Fixture::new();
        let ext = without_sales(&fx);
        let mut production = fx.production(1.0);
        production.stock_owner = Some(fx.acme.clone());
        production.origin = Some(Origin::Sale(sale(Some(party("Globex")))));

        assert!(ext.on_change_origin(&mut production).is_empty());
        assert_eq!(production.stock_owner, Some(fx.acme.clone()));
    }

    #[test]
    fn foreign_origin_clears_owner_when_sales_installed() {
        let fx = Fixture::new();
        let ext = with_sales(&fx);
        let mut production = fx.production(1.0);
        production.stock_owner = Some(fx.acme.clone());
        production.origin = Some(Origin::Other {
            model: "stock.shipment.internal".to_string(),
            id: "42".to_string(),
        });

        ext.on_change_origin(&mut production);
        assert_eq!(production.stock_owner, None);
    }

    #[test]
    fn set_moves_stamps_tracked_products_only() {
        let fx = Fixture::new();
        let ext = without_sales(&fx);
        let mut production = fx.production(2.0);
        production.stock_owner = Some(fx.acme.clone());

        ext.set_moves(&mut production);

        for mv in &production.inputs {
            if mv.product == fx.flour.id() {
                assert_eq!(mv.party_used, Some(fx.acme.clone()));
            } else {
                assert_eq!(mv.party_used, None);
            }
        }
        assert!(production.outputs.iter().all(|m| m.party_used.is_none()));
    }

    #[test]
    fn set_moves_without_owner_or_bom_leaves_moves_unattributed() {
        let fx = Fixture::new();
        let ext = without_sales(&fx);

        let mut production = fx.production(2.0);
        ext.set_moves(&mut production);
        assert_eq!(production.inputs.len(), 2);
        assert!(production.inputs.iter().all(|m| m.party_used.is_none()));

        let mut production = fx.production(2.0);
        production.stock_owner = Some(fx.acme.clone());
        production.bom = None;
        ext.set_moves(&mut production);
        assert!(production.inputs.is_empty());
    }

    #[test]
    fn set_moves_stamps_tracked_outputs() {
        let fx = Fixture::new();
        let ext = without_sales(&fx);
        let mut production = fx.production(1.0);
        let mut bom = fx.bom.clone();
        bom.outputs[0].party_stock = true;
        production.bom = Some(bom);
        production.stock_owner = Some(fx.acme.clone());

        ext.set_moves(&mut production);

        assert_eq!(production.outputs.len(), 1);
        assert_eq!(production.outputs[0].party_used, Some(fx.acme.clone()));
    }

    proptest! {
        #[test]
        fn party_used_requires_owner_and_flag(
            flags in prop::collection::vec(any::<bool>(), 1..6),
            has_owner in any::<bool>(),
            quantity in 1u32..50,
        ) {
            let fx = Fixture::new();
            let ext = without_sales(&fx);
            let mut bom = fx.bom.clone();
            bom.inputs = flags
                .iter()
                .map(|flag| {
                    BomLine::new(&crate::testing::product("IN"), 1.0)
                        .unwrap()
                        .with_party_stock(*flag)
                })
                .collect();
            let mut production = fx.production(f64::from(quantity));
            production.bom = Some(bom);
            production.stock_owner = has_owner.then(|| fx.acme.clone());

            let inputs = ext.explode_bom(&production).inputs.unwrap();
            prop_assert_eq!(inputs.len(), flags.len());
            for (values, flag) in inputs.iter().zip(&flags) {
                let expected = (*flag && has_owner).then(|| fx.acme.clone());
                prop_assert_eq!(&values.party_used, &expected);
            }

            ext.set_moves(&mut production);
            for (mv, flag) in production.inputs.iter().zip(&flags) {
                let expected = (*flag && has_owner).then(|| fx.acme.clone());
                prop_assert_eq!(&mv.party_used, &expected);
            }
        }

        #[test]
        fn reexplosion_is_idempotent(quantity in 0u32..1_000, owned in any::<bool>()) {
            let fx = Fixture::new();
            let ext = without_sales(&fx);
            let mut production = fx.production(f64::from(quantity));
            production.stock_owner = owned.then(|| fx.acme.clone());

            let first = ext.on_change_stock_owner(&mut production);
            production.apply_changes(&first);
            let second = ext.on_change_stock_owner(&mut production);

            prop_assert_eq!(first, second);
            prop_assert_eq!(production.inputs.len(), fx.bom.inputs.len());
        }
    }
}
