use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use prodparty_core::{CompanyId, Entity, MoveId, ProductionId};
use prodparty_parties::PartyRef;
use prodparty_products::{Product, Uom};
use prodparty_stock::{Location, MoveValues, StockMove, Warehouse};

use crate::{Bom, Origin, ProductionChanges};

/// Production lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductionState {
    Request,
    Draft,
    Waiting,
    Assigned,
    Running,
    Done,
    Cancel,
}

impl ProductionState {
    /// Whether user-editable fields may still change.
    pub fn is_editable(self) -> bool {
        matches!(self, ProductionState::Request | ProductionState::Draft)
    }
}

/// Editable fields of a production, as named by change hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Product,
    Bom,
    Uom,
    Quantity,
    StockOwner,
    Origin,
    PlannedDate,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Product => "product",
            Field::Bom => "bom",
            Field::Uom => "uom",
            Field::Quantity => "quantity",
            Field::StockOwner => "stock_owner",
            Field::Origin => "origin",
            Field::PlannedDate => "planned_date",
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user edit of one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Product(Option<Product>),
    Bom(Option<Bom>),
    Uom(Option<Uom>),
    Quantity(Option<f64>),
    StockOwner(Option<PartyRef>),
    Origin(Option<Origin>),
    PlannedDate(Option<NaiveDate>),
}

impl FieldEdit {
    pub fn field(&self) -> Field {
        match self {
            FieldEdit::Product(_) => Field::Product,
            FieldEdit::Bom(_) => Field::Bom,
            FieldEdit::Uom(_) => Field::Uom,
            FieldEdit::Quantity(_) => Field::Quantity,
            FieldEdit::StockOwner(_) => Field::StockOwner,
            FieldEdit::Origin(_) => Field::Origin,
            FieldEdit::PlannedDate(_) => Field::PlannedDate,
        }
    }
}

/// Production order record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Production {
    pub id: ProductionId,
    pub state: ProductionState,
    pub company: CompanyId,
    pub warehouse: Option<Warehouse>,
    /// Production location goods are consumed into and produced from.
    pub location: Option<Location>,
    pub product: Option<Product>,
    pub bom: Option<Bom>,
    pub uom: Option<Uom>,
    pub quantity: Option<f64>,
    pub planned_date: Option<NaiveDate>,
    pub origin: Option<Origin>,
    /// Party whose stock is used instead of the company's.
    pub stock_owner: Option<PartyRef>,
    pub inputs: Vec<StockMove>,
    pub outputs: Vec<StockMove>,
}

impl Production {
    pub fn new(id: ProductionId, company: CompanyId) -> Self {
        Self {
            id,
            state: ProductionState::Draft,
            company,
            warehouse: None,
            location: None,
            product: None,
            bom: None,
            uom: None,
            quantity: None,
            planned_date: None,
            origin: None,
            stock_owner: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn with_locations(mut self, warehouse: Warehouse, location: Location) -> Self {
        self.warehouse = Some(warehouse);
        self.location = Some(location);
        self
    }

    /// Every editable field, `stock_owner` included, is frozen once the
    /// production leaves `request`/`draft`.
    pub fn is_readonly(&self, _field: Field) -> bool {
        !self.state.is_editable()
    }

    pub fn apply_edit(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::Product(v) => self.product = v,
            FieldEdit::Bom(v) => self.bom = v,
            FieldEdit::Uom(v) => self.uom = v,
            FieldEdit::Quantity(v) => self.quantity = v,
            FieldEdit::StockOwner(v) => self.stock_owner = v,
            FieldEdit::Origin(v) => self.origin = v,
            FieldEdit::PlannedDate(v) => self.planned_date = v,
        }
    }

    /// Merge proposed values into the in-session record.
    ///
    /// Proposed inputs/outputs replace the current collections.
    pub fn apply_changes(&mut self, changes: &ProductionChanges) {
        if let Some(bom) = &changes.bom {
            self.bom = bom.clone();
        }
        if let Some(uom) = &changes.uom {
            self.uom = uom.clone();
        }
        if let Some(owner) = &changes.stock_owner {
            self.stock_owner = owner.clone();
        }
        if let Some(inputs) = &changes.inputs {
            self.inputs = self.new_moves(inputs, true);
        }
        if let Some(outputs) = &changes.outputs {
            self.outputs = self.new_moves(outputs, false);
        }
    }

    pub(crate) fn new_moves(&self, values: &[MoveValues], input: bool) -> Vec<StockMove> {
        values
            .iter()
            .cloned()
            .map(|v| {
                let mut mv = StockMove::from_values(MoveId::new(), v);
                if input {
                    mv.production_input = Some(self.id);
                } else {
                    mv.production_output = Some(self.id);
                }
                mv
            })
            .collect()
    }
}

impl Entity for Production {
    type Id = ProductionId;

    fn id(&self) -> ProductionId {
        self.id
    }
}
