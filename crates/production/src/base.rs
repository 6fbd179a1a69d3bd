//! Host production behavior.

use prodparty_core::{CompanyId, Entity};
use prodparty_stock::{Location, MoveValues};

use crate::{BomCatalog, BomLine, Production, ProductionChanges};

/// Production behavior the stock owner logic builds on.
///
/// Implementors provide the host-specific pieces ([`product_defaults`],
/// [`explode_move_values`], [`set_moves`]). The provided change hooks call
/// back into `self`, so a wrapper overriding `explode_move_values` sees its
/// values used by every BOM explosion.
///
/// [`product_defaults`]: ProductionBase::product_defaults
/// [`explode_move_values`]: ProductionBase::explode_move_values
/// [`set_moves`]: ProductionBase::set_moves
pub trait ProductionBase {
    /// Defaults proposed when the product changes (UoM, BOM).
    fn product_defaults(&self, production: &Production) -> ProductionChanges;

    /// Values of the move generated for one BOM line.
    fn explode_move_values(
        &self,
        production: &Production,
        from_location: &Location,
        to_location: &Location,
        company: CompanyId,
        bom_line: &BomLine,
        quantity: f64,
    ) -> MoveValues;

    /// Materialize `inputs` and `outputs` from the BOM.
    fn set_moves(&self, production: &mut Production);

    /// Hosts without an origin hook propose nothing.
    fn on_change_origin(&self, _production: &mut Production) -> ProductionChanges {
        ProductionChanges::default()
    }

    /// Hosts without a stock owner propose nothing.
    fn on_change_stock_owner(&self, _production: &mut Production) -> ProductionChanges {
        ProductionChanges::default()
    }

    /// Propose inputs and outputs for the current product, BOM, UoM and
    /// quantity. Proposes empty inputs and outputs while any of them (or the
    /// locations) is missing, so earlier moves never outlive their BOM.
    fn explode_bom(&self, production: &Production) -> ProductionChanges {
        let Some(explosion) = Explosion::of(production) else {
            return ProductionChanges {
                inputs: Some(Vec::new()),
                outputs: Some(Vec::new()),
                ..ProductionChanges::default()
            };
        };
        let company = production.company;

        let inputs = explosion
            .inputs
            .iter()
            .map(|(line, quantity)| {
                self.explode_move_values(
                    production,
                    explosion.storage,
                    explosion.location,
                    company,
                    line,
                    *quantity,
                )
            })
            .collect();
        let outputs = explosion
            .outputs
            .iter()
            .map(|(line, quantity)| {
                self.explode_move_values(
                    production,
                    explosion.location,
                    explosion.storage,
                    company,
                    line,
                    *quantity,
                )
            })
            .collect();

        ProductionChanges {
            inputs: Some(inputs),
            outputs: Some(outputs),
            ..ProductionChanges::default()
        }
    }

    fn on_change_product(&self, production: &mut Production) -> ProductionChanges {
        let mut changes = self.product_defaults(production);
        production.apply_changes(&changes);
        changes.merge(self.explode_bom(production));
        changes
    }

    fn on_change_bom(&self, production: &mut Production) -> ProductionChanges {
        self.explode_bom(production)
    }

    fn on_change_uom(&self, production: &mut Production) -> ProductionChanges {
        self.explode_bom(production)
    }

    fn on_change_quantity(&self, production: &mut Production) -> ProductionChanges {
        self.explode_bom(production)
    }
}

/// BOM lines with their quantities for one production.
pub(crate) struct Explosion<'a> {
    pub(crate) storage: &'a Location,
    pub(crate) location: &'a Location,
    pub(crate) inputs: Vec<(&'a BomLine, f64)>,
    pub(crate) outputs: Vec<(&'a BomLine, f64)>,
}

impl<'a> Explosion<'a> {
    pub(crate) fn of(production: &'a Production) -> Option<Self> {
        let bom = production.bom.as_ref()?;
        let product = production.product.as_ref()?;
        production.uom.as_ref()?;
        let storage = &production.warehouse.as_ref()?.storage;
        let location = production.location.as_ref()?;

        let quantity = production.quantity.unwrap_or(0.0);
        let factor = bom.compute_factor(product.id(), quantity)?;
        let scale = |lines: &'a [BomLine]| {
            lines
                .iter()
                .map(|l| (l, l.compute_quantity(factor)))
                .collect::<Vec<_>>()
        };

        Some(Self {
            storage,
            location,
            inputs: scale(bom.inputs.as_slice()),
            outputs: scale(bom.outputs.as_slice()),
        })
    }
}

/// Host production behavior backed by a BOM catalog.
#[derive(Debug, Clone, Default)]
pub struct StandardProduction {
    boms: BomCatalog,
}

impl StandardProduction {
    pub fn new(boms: BomCatalog) -> Self {
        Self { boms }
    }
}

impl ProductionBase for StandardProduction {
    fn product_defaults(&self, production: &Production) -> ProductionChanges {
        let Some(product) = &production.product else {
            return ProductionChanges {
                bom: Some(None),
                uom: Some(None),
                ..ProductionChanges::default()
            };
        };

        let mut changes = ProductionChanges::default();
        if production.uom.is_none() {
            changes.uom = Some(Some(product.default_uom().clone()));
        }
        let bom_fits = production
            .bom
            .as_ref()
            .is_some_and(|b| b.produces(product.id()));
        if !bom_fits {
            changes.bom = Some(self.boms.boms_for(product.id()).first().cloned());
        }
        changes
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
        MoveValues {
            product: bom_line.product,
            uom: bom_line.uom.clone(),
            quantity,
            from_location: from_location.clone(),
            to_location: to_location.clone(),
            company,
            planned_date: production.planned_date,
            party_used: None,
        }
    }

    /// Moves are built from product, UoM and quantity only; BOM line flags are
    /// not consulted.
    fn set_moves(&self, production: &mut Production) {
        let Some((inputs, outputs)) = Explosion::of(production).map(|explosion| {
            let to_values = |line: &BomLine, quantity: f64, from: &Location, to: &Location| {
                MoveValues {
                    product: line.product,
                    uom: line.uom.clone(),
                    quantity,
                    from_location: from.clone(),
                    to_location: to.clone(),
                    company: production.company,
                    planned_date: production.planned_date,
                    party_used: None,
                }
            };
            let inputs: Vec<MoveValues> = explosion
                .inputs
                .iter()
                .map(|(l, q)| to_values(l, *q, explosion.storage, explosion.location))
                .collect();
            let outputs: Vec<MoveValues> = explosion
                .outputs
                .iter()
                .map(|(l, q)| to_values(l, *q, explosion.location, explosion.storage))
                .collect();
            (inputs, outputs)
        }) else {
            production.inputs.clear();
            production.outputs.clear();
            return;
        };

        let inputs = production.new_moves(&inputs, true);
        let outputs = production.new_moves(&outputs, false);
        tracing::debug!(
            production = %production.id,
            inputs = inputs.len(),
            outputs = outputs.len(),
            "production moves materialized"
        );
        production.inputs = inputs;
        production.outputs = outputs;
    }
}
