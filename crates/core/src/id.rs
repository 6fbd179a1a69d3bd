//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $t:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(Uuid);

        impl $t {
            /// Create a new identifier.
            ///
            /// Uses UUIDv7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $t {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$t> for Uuid {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(uuid))
            }
        }
    };
}

uuid_id!(
    /// Identifier of a party (customer, supplier, stock owner).
    PartyId,
    "PartyId"
);
uuid_id!(
    /// Identifier of a product.
    ProductId,
    "ProductId"
);
uuid_id!(
    /// Identifier of a unit of measure.
    UomId,
    "UomId"
);
uuid_id!(
    /// Identifier of a bill of materials.
    BomId,
    "BomId"
);
uuid_id!(
    /// Identifier of a production order.
    ProductionId,
    "ProductionId"
);
uuid_id!(
    /// Identifier of a stock move.
    MoveId,
    "MoveId"
);
uuid_id!(
    /// Identifier of a stock location.
    LocationId,
    "LocationId"
);
uuid_id!(
    /// Identifier of the owning company.
    CompanyId,
    "CompanyId"
);
uuid_id!(
    /// Identifier of a sale order.
    SaleId,
    "SaleId"
);
uuid_id!(
    /// Identifier of a sale order line.
    SaleLineId,
    "SaleLineId"
);
uuid_id!(
    /// Identifier of a user (actor identity).
    UserId,
    "UserId"
);
