use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use prodparty_core::{BomId, DomainError, DomainResult, Entity, ProductId};
use prodparty_products::{Product, Uom};

/// Input or output line of a bill of materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomLine {
    pub product: ProductId,
    pub uom: Uom,
    pub quantity: f64,
    /// Moves generated from this line use the production's stock owner stock.
    pub party_stock: bool,
}

impl BomLine {
    pub fn new(product: &Product, quantity: f64) -> DomainResult<Self> {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(DomainError::validation(format!(
                "bom line quantity for {} must be a non-negative number",
                product.rec_name()
            )));
        }
        Ok(Self {
            product: product.id(),
            uom: product.default_uom().clone(),
            quantity,
            party_stock: false,
        })
    }

    pub fn with_party_stock(mut self, party_stock: bool) -> Self {
        self.party_stock = party_stock;
        self
    }

    /// Line quantity for a production `factor` times the BOM, rounded to the
    /// line's unit.
    pub fn compute_quantity(&self, factor: f64) -> f64 {
        self.uom.round(self.quantity * factor)
    }
}

/// Bill of materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bom {
    pub id: BomId,
    pub name: String,
    pub inputs: Vec<BomLine>,
    pub outputs: Vec<BomLine>,
}

impl Bom {
    pub fn new(
        id: BomId,
        name: impl Into<String>,
        inputs: Vec<BomLine>,
        outputs: Vec<BomLine>,
    ) -> DomainResult<Self> {
        if outputs.is_empty() {
            return Err(DomainError::validation("bom must have at least one output"));
        }
        Ok(Self {
            id,
            name: name.into(),
            inputs,
            outputs,
        })
    }

    pub fn produces(&self, product: ProductId) -> bool {
        self.outputs.iter().any(|l| l.product == product)
    }

    /// How many times the BOM must run to produce `quantity` of `product`.
    ///
    /// `None` when the BOM does not output the product (or outputs none of it).
    pub fn compute_factor(&self, product: ProductId, quantity: f64) -> Option<f64> {
        let output: f64 = self
            .outputs
            .iter()
            .filter(|l| l.product == product)
            .map(|l| l.quantity)
            .sum();
        if output > 0.0 {
            Some(quantity / output)
        } else {
            None
        }
    }

    /// Distinct products of the party-tracked input lines.
    pub fn party_stock_inputs(&self) -> HashSet<ProductId> {
        party_stock_products(&self.inputs)
    }

    /// Distinct products of the party-tracked output lines.
    pub fn party_stock_outputs(&self) -> HashSet<ProductId> {
        party_stock_products(&self.outputs)
    }
}

fn party_stock_products(lines: &[BomLine]) -> HashSet<ProductId> {
    lines
        .iter()
        .filter(|l| l.party_stock)
        .map(|l| l.product)
        .collect()
}

impl Entity for Bom {
    type Id = BomId;

    fn id(&self) -> BomId {
        self.id
    }
}

/// BOMs available per produced product, in registration order.
#[derive(Debug, Clone, Default)]
pub struct BomCatalog {
    by_product: HashMap<ProductId, Vec<Bom>>,
}

impl BomCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bom` under every product it outputs.
    pub fn insert(&mut self, bom: Bom) {
        let mut products: Vec<ProductId> = bom.outputs.iter().map(|l| l.product).collect();
        products.sort();
        products.dedup();
        for product in products {
            self.by_product.entry(product).or_default().push(bom.clone());
        }
    }

    pub fn boms_for(&self, product: ProductId) -> &[Bom] {
        self.by_product
            .get(&product)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
