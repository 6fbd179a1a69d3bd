//! Shared fixtures for unit tests.

use prodparty_core::{BomId, CompanyId, LocationId, PartyId, ProductId, ProductionId, UomId};
use prodparty_parties::PartyRef;
use prodparty_products::{Product, Uom};
use prodparty_stock::{Location, LocationType, Warehouse};

use crate::{Bom, BomCatalog, BomLine, Production};

pub(crate) fn product(code: &str) -> Product {
    product_with_rounding(code, 1.0)
}

pub(crate) fn product_with_rounding(code: &str, rounding: f64) -> Product {
    let uom = Uom::new(UomId::new(), "u", rounding).unwrap();
    Product::new(ProductId::new(), code, code.to_lowercase(), uom).unwrap()
}

pub(crate) fn party(name: &str) -> PartyRef {
    PartyRef {
        id: PartyId::new(),
        rec_name: name.to_string(),
    }
}

/// Bread made of party-tracked flour and company milk.
pub(crate) struct Fixture {
    pub(crate) flour: Product,
    pub(crate) milk: Product,
    pub(crate) bread: Product,
    pub(crate) bom: Bom,
    pub(crate) storage: Location,
    pub(crate) production_location: Location,
    pub(crate) warehouse: Warehouse,
    pub(crate) company: CompanyId,
    pub(crate) acme: PartyRef,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        let flour = product("FLOUR");
        let milk = product("MILK");
        let bread = product("BREAD");
        let bom = Bom::new(
            BomId::new(),
            "Bread",
            vec![
                BomLine::new(&flour, 2.0).unwrap().with_party_stock(true),
                BomLine::new(&milk, 1.0).unwrap(),
            ],
            vec![BomLine::new(&bread, 1.0).unwrap()],
        )
        .unwrap();
        let storage = Location::new(LocationId::new(), "STO", LocationType::Storage);
        let production_location =
            Location::new(LocationId::new(), "PROD", LocationType::Production);
        let warehouse = Warehouse::new(
            Location::new(LocationId::new(), "WH", LocationType::Warehouse),
            storage.clone(),
        )
        .unwrap();

        Self {
            flour,
            milk,
            bread,
            bom,
            storage,
            production_location,
            warehouse,
            company: CompanyId::new(),
            acme: party("Acme"),
        }
    }

    pub(crate) fn catalog(&self) -> BomCatalog {
        let mut catalog = BomCatalog::new();
        catalog.insert(self.bom.clone());
        catalog
    }

    /// Draft production of `quantity` bread, without stock owner or moves.
    pub(crate) fn production(&self, quantity: f64) -> Production {
        let mut production = Production::new(ProductionId::new(), self.company)
            .with_locations(self.warehouse.clone(), self.production_location.clone());
        production.product = Some(self.bread.clone());
        production.uom = Some(self.bread.default_uom().clone());
        production.bom = Some(self.bom.clone());
        production.quantity = Some(quantity);
        production
    }
}
