use serde_json::{Map, Value, json};

use prodparty_parties::PartyRef;
use prodparty_products::Uom;
use prodparty_stock::MoveValues;

use crate::Bom;

/// Field values proposed by a change hook.
///
/// Each field is `None` when the hook leaves it untouched; `Some(None)` clears
/// a reference. Proposed `inputs`/`outputs` replace the whole collection, so
/// applying the same proposal twice yields the same record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductionChanges {
    pub bom: Option<Option<Bom>>,
    pub uom: Option<Option<Uom>>,
    pub stock_owner: Option<Option<PartyRef>>,
    pub inputs: Option<Vec<MoveValues>>,
    pub outputs: Option<Vec<MoveValues>>,
}

impl ProductionChanges {
    pub fn is_empty(&self) -> bool {
        self.bom.is_none()
            && self.uom.is_none()
            && self.stock_owner.is_none()
            && self.inputs.is_none()
            && self.outputs.is_none()
    }

    /// Overlay `other`; fields it proposes win.
    pub fn merge(&mut self, other: ProductionChanges) {
        let ProductionChanges {
            bom,
            uom,
            stock_owner,
            inputs,
            outputs,
        } = other;
        if bom.is_some() {
            self.bom = bom;
        }
        if uom.is_some() {
            self.uom = uom;
        }
        if stock_owner.is_some() {
            self.stock_owner = stock_owner;
        }
        if inputs.is_some() {
            self.inputs = inputs;
        }
        if outputs.is_some() {
            self.outputs = outputs;
        }
    }

    /// Field name → value map for the editing client.
    ///
    /// References are sent as ids (or `null` when cleared); the stock owner's
    /// display name goes under `stock_owner.rec_name`.
    pub fn to_field_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if let Some(bom) = &self.bom {
            map.insert("bom".into(), json!(bom.as_ref().map(|b| b.id)));
        }
        if let Some(uom) = &self.uom {
            map.insert("uom".into(), json!(uom.as_ref().map(|u| u.id)));
        }
        if let Some(owner) = &self.stock_owner {
            match owner {
                Some(party) => {
                    map.insert("stock_owner".into(), json!(party.id));
                    map.insert("stock_owner.rec_name".into(), json!(party.rec_name));
                }
                None => {
                    map.insert("stock_owner".into(), Value::Null);
                }
            }
        }
        if let Some(inputs) = &self.inputs {
            map.insert("inputs".into(), moves_value(inputs));
        }
        if let Some(outputs) = &self.outputs {
            map.insert("outputs".into(), moves_value(outputs));
        }
        map
    }
}

fn moves_value(moves: &[MoveValues]) -> Value {
    Value::Array(
        moves
            .iter()
            .map(|m| Value::Object(m.to_field_map()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::party;

    #[test]
    fn merge_prefers_proposed_fields() {
        let acme = party("Acme");
        let mut changes = ProductionChanges {
            stock_owner: Some(Some(acme)),
            inputs: Some(vec![]),
            ..ProductionChanges::default()
        };
        changes.merge(ProductionChanges {
            stock_owner: Some(None),
            ..ProductionChanges::default()
        });

        assert_eq!(changes.stock_owner, Some(None));
        assert_eq!(changes.inputs, Some(vec![]));
    }

    #[test]
    fn field_map_reports_owner_and_rec_name() {
        let acme = party("Acme");
        let changes = ProductionChanges {
            stock_owner: Some(Some(acme.clone())),
            ..ProductionChanges::default()
        };
        let map = changes.to_field_map();
        assert_eq!(map["stock_owner"], json!(acme.id));
        assert_eq!(map["stock_owner.rec_name"], json!("Acme"));
        assert!(!map.contains_key("inputs"));
    }

    #[test]
    fn field_map_reports_cleared_owner_as_null() {
        let changes = ProductionChanges {
            stock_owner: Some(None),
            ..ProductionChanges::default()
        };
        let map = changes.to_field_map();
        assert_eq!(map["stock_owner"], Value::Null);
        assert!(!map.contains_key("stock_owner.rec_name"));
    }

    #[test]
    fn empty_changes_are_empty() {
        assert!(ProductionChanges::default().is_empty());
        assert!(ProductionChanges::default().to_field_map().is_empty());
    }
}
