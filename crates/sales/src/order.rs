use serde::{Deserialize, Serialize};

use prodparty_core::{DomainError, DomainResult, Entity, Pool, ProductId, SaleId, SaleLineId};
use prodparty_parties::PartyRef;
use prodparty_products::Product;

/// Sale order header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub number: String,
    /// Customer; unset while the sale is being drafted.
    pub party: Option<PartyRef>,
}

impl Sale {
    pub const MODEL: &'static str = "sale.sale";

    pub fn new(id: SaleId, number: impl Into<String>, party: Option<PartyRef>) -> Self {
        Self {
            id,
            number: number.into(),
            party,
        }
    }
}

impl Entity for Sale {
    type Id = SaleId;

    fn id(&self) -> SaleId {
        self.id
    }
}

/// Sale order line, carrying a snapshot of its parent sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    pub id: SaleLineId,
    pub sale: Sale,
    pub product: ProductId,
    pub quantity: f64,
}

impl SaleLine {
    pub const MODEL: &'static str = "sale.line";

    pub fn new(id: SaleLineId, sale: Sale, product: &Product, quantity: f64) -> DomainResult<Self> {
        if quantity <= 0.0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        Ok(Self {
            id,
            sale,
            product: product.id(),
            quantity,
        })
    }

    /// Party of the parent sale.
    pub fn party(&self) -> Option<&PartyRef> {
        self.sale.party.as_ref()
    }
}

impl Entity for SaleLine {
    type Id = SaleLineId;

    fn id(&self) -> SaleLineId {
        self.id
    }
}

/// Proof that sale orders and lines are installed in this deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleIntegration {
    _private: (),
}

impl SaleIntegration {
    /// Both `sale.sale` and `sale.line` must be registered.
    pub fn lookup(pool: &Pool) -> Option<Self> {
        pool.get(Sale::MODEL)?;
        pool.get(SaleLine::MODEL)?;
        Some(Self { _private: () })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodparty_core::{PartyId, UomId};
    use prodparty_products::Uom;

    fn product() -> Product {
        let uom = Uom::new(UomId::new(), "u", 1.0).unwrap();
        Product::new(ProductId::new(), "W-1", "Widget", uom).unwrap()
    }

    #[test]
    fn sale_line_party_comes_from_parent_sale() {
        let party = PartyRef {
            id: PartyId::new(),
            rec_name: "Acme".to_string(),
        };
        let sale = Sale::new(SaleId::new(), "S001", Some(party.clone()));
        let line = SaleLine::new(SaleLineId::new(), sale, &product(), 3.0).unwrap();
        assert_eq!(line.party(), Some(&party));
    }

    #[test]
    fn sale_line_rejects_non_positive_quantity() {
        let sale = Sale::new(SaleId::new(), "S001", None);
        let err = SaleLine::new(SaleLineId::new(), sale, &product(), 0.0).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn integration_requires_both_models() {
        assert!(SaleIntegration::lookup(&Pool::with_models(["production"])).is_none());
        assert!(SaleIntegration::lookup(&Pool::with_models(["sale.sale"])).is_none());
        assert!(SaleIntegration::lookup(&Pool::with_models(["sale.sale", "sale.line"])).is_some());
    }
}
