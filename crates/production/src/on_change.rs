//! Which change hooks run when a field is edited.

use std::collections::BTreeMap;

use crate::{Field, Production, ProductionBase, ProductionChanges};

/// Change hooks of a production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    Product,
    Bom,
    Uom,
    Quantity,
    StockOwner,
    Origin,
}

impl Hook {
    pub fn name(self) -> &'static str {
        match self {
            Hook::Product => "on_change_product",
            Hook::Bom => "on_change_bom",
            Hook::Uom => "on_change_uom",
            Hook::Quantity => "on_change_quantity",
            Hook::StockOwner => "on_change_stock_owner",
            Hook::Origin => "on_change_origin",
        }
    }

    pub fn run<P>(self, behavior: &P, production: &mut Production) -> ProductionChanges
    where
        P: ProductionBase + ?Sized,
    {
        match self {
            Hook::Product => behavior.on_change_product(production),
            Hook::Bom => behavior.on_change_bom(production),
            Hook::Uom => behavior.on_change_uom(production),
            Hook::Quantity => behavior.on_change_quantity(production),
            Hook::StockOwner => behavior.on_change_stock_owner(production),
            Hook::Origin => behavior.on_change_origin(production),
        }
    }
}

/// A hook subscribed to a field, with the fields it reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub hook: Hook,
    pub depends: Vec<Field>,
}

/// Field → subscribed hooks, run in subscription order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnChangeTable {
    subscriptions: BTreeMap<Field, Vec<Subscription>>,
}

impl OnChangeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hooks of the host production model.
    pub fn host() -> Self {
        use Field::*;

        let mut table = Self::new();
        table
            .subscribe(Product, Hook::Product, [Product, Bom, Uom, Quantity])
            .subscribe(Bom, Hook::Bom, [Product, Bom, Uom, Quantity])
            .subscribe(Uom, Hook::Uom, [Product, Bom, Uom, Quantity])
            .subscribe(Quantity, Hook::Quantity, [Product, Bom, Uom, Quantity]);
        table
    }

    /// Subscribe `hook` to edits of `field`. A hook subscribed twice to the
    /// same field keeps one subscription with the union of dependencies.
    pub fn subscribe(
        &mut self,
        field: Field,
        hook: Hook,
        depends: impl IntoIterator<Item = Field>,
    ) -> &mut Self {
        let subscriptions = self.subscriptions.entry(field).or_default();
        match subscriptions.iter_mut().find(|s| s.hook == hook) {
            Some(existing) => {
                for dep in depends {
                    if !existing.depends.contains(&dep) {
                        existing.depends.push(dep);
                    }
                }
            }
            None => {
                let mut deps = Vec::new();
                for dep in depends {
                    if !deps.contains(&dep) {
                        deps.push(dep);
                    }
                }
                subscriptions.push(Subscription { hook, depends: deps });
            }
        }
        self
    }

    /// Declare that `hook` also reads `field`, wherever it is subscribed.
    pub fn add_dependency(&mut self, hook: Hook, field: Field) -> &mut Self {
        for sub in self.subscriptions.values_mut().flatten() {
            if sub.hook == hook && !sub.depends.contains(&field) {
                sub.depends.push(field);
            }
        }
        self
    }

    pub fn hooks_for(&self, field: Field) -> &[Subscription] {
        self.subscriptions
            .get(&field)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Fields read by `hook`, across all its subscriptions.
    pub fn depends(&self, hook: Hook) -> Vec<Field> {
        let mut fields = Vec::new();
        for sub in self.subscriptions.values().flatten() {
            if sub.hook != hook {
                continue;
            }
            for dep in &sub.depends {
                if !fields.contains(dep) {
                    fields.push(*dep);
                }
            }
        }
        fields
    }
}
