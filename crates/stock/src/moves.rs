use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use prodparty_core::{CompanyId, Entity, MoveId, ProductId, ProductionId};
use prodparty_parties::PartyRef;
use prodparty_products::Uom;

use crate::Location;

/// Moves generated for productions start as drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveState {
    Draft,
}

/// Shipment a move belongs to, with the party it is exchanged with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shipment {
    Customer { party: PartyRef },
    Supplier { party: PartyRef },
    Internal,
}

/// Values of a move that is proposed but not yet created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveValues {
    pub product: ProductId,
    pub uom: Uom,
    pub quantity: f64,
    pub from_location: Location,
    pub to_location: Location,
    pub company: CompanyId,
    pub planned_date: Option<NaiveDate>,
    pub party_used: Option<PartyRef>,
}

impl MoveValues {
    /// Field → value map as sent back to an editing client.
    ///
    /// References are emitted as ids; `party_used` additionally carries its
    /// display name under `party_used.rec_name`.
    pub fn to_field_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("product".into(), json!(self.product));
        map.insert("uom".into(), json!(self.uom.id));
        map.insert("quantity".into(), json!(self.quantity));
        map.insert("from_location".into(), json!(self.from_location.id));
        map.insert("to_location".into(), json!(self.to_location.id));
        map.insert("company".into(), json!(self.company));
        map.insert("planned_date".into(), json!(self.planned_date));
        if let Some(party) = &self.party_used {
            map.insert("party_used".into(), json!(party.id));
            map.insert("party_used.rec_name".into(), json!(party.rec_name));
        }
        map
    }
}

/// Stock move record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMove {
    pub id: MoveId,
    pub product: ProductId,
    pub uom: Uom,
    pub quantity: f64,
    pub from_location: Location,
    pub to_location: Location,
    pub company: CompanyId,
    pub planned_date: Option<NaiveDate>,
    pub state: MoveState,
    /// Party whose stock is used by this move, if not the company's own.
    pub party_used: Option<PartyRef>,
    /// Production consuming this move (non-owning back-reference).
    pub production_input: Option<ProductionId>,
    /// Production generating this move (non-owning back-reference).
    pub production_output: Option<ProductionId>,
    pub shipment: Option<Shipment>,
}

impl StockMove {
    pub fn from_values(id: MoveId, values: MoveValues) -> Self {
        Self {
            id,
            product: values.product,
            uom: values.uom,
            quantity: values.quantity,
            from_location: values.from_location,
            to_location: values.to_location,
            company: values.company,
            planned_date: values.planned_date,
            state: MoveState::Draft,
            party_used: values.party_used,
            production_input: None,
            production_output: None,
            shipment: None,
        }
    }

    pub fn touches(&self, kind: crate::LocationType) -> bool {
        self.from_location.kind == kind || self.to_location.kind == kind
    }
}

impl Entity for StockMove {
    type Id = MoveId;

    fn id(&self) -> MoveId {
        self.id
    }
}
