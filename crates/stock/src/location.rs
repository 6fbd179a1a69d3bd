use serde::{Deserialize, Serialize};

use prodparty_core::{DomainError, DomainResult, Entity, LocationId};

/// Location type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    Supplier,
    Customer,
    LostFound,
    Warehouse,
    Storage,
    Production,
    View,
}

impl LocationType {
    pub fn as_str(self) -> &'static str {
        match self {
            LocationType::Supplier => "supplier",
            LocationType::Customer => "customer",
            LocationType::LostFound => "lost_found",
            LocationType::Warehouse => "warehouse",
            LocationType::Storage => "storage",
            LocationType::Production => "production",
            LocationType::View => "view",
        }
    }
}

impl core::fmt::Display for LocationType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub kind: LocationType,
}

impl Location {
    pub fn new(id: LocationId, name: impl Into<String>, kind: LocationType) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
        }
    }
}

impl Entity for Location {
    type Id = LocationId;

    fn id(&self) -> LocationId {
        self.id
    }
}

/// Warehouse with the storage location goods are consumed from and produced to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub location: Location,
    pub storage: Location,
}

impl Warehouse {
    pub fn new(location: Location, storage: Location) -> DomainResult<Self> {
        if location.kind != LocationType::Warehouse {
            return Err(DomainError::validation(format!(
                "warehouse location must be of type warehouse, got {}",
                location.kind
            )));
        }
        if storage.kind != LocationType::Storage {
            return Err(DomainError::validation(format!(
                "storage location must be of type storage, got {}",
                storage.kind
            )));
        }
        Ok(Self { location, storage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warehouse_requires_storage_location() {
        let wh = Location::new(LocationId::new(), "WH", LocationType::Warehouse);
        let prod = Location::new(LocationId::new(), "PROD", LocationType::Production);
        let err = Warehouse::new(wh, prod).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("production")));
    }

    #[test]
    fn location_type_serializes_snake_case() {
        let json = serde_json::to_string(&LocationType::LostFound).unwrap();
        assert_eq!(json, "\"lost_found\"");
        assert_eq!(LocationType::LostFound.as_str(), "lost_found");
    }
}
