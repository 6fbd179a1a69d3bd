use serde::{Deserialize, Serialize};

use prodparty_core::{DomainError, DomainResult, Entity, ProductId};

use crate::Uom;

/// Product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    code: String,
    name: String,
    default_uom: Uom,
}

impl Product {
    pub fn new(
        id: ProductId,
        code: impl Into<String>,
        name: impl Into<String>,
        default_uom: Uom,
    ) -> DomainResult<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(DomainError::validation("code cannot be empty"));
        }
        Ok(Self {
            id,
            code,
            name: name.into(),
            default_uom,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_uom(&self) -> &Uom {
        &self.default_uom
    }

    pub fn rec_name(&self) -> String {
        format!("[{}] {}", self.code, self.name)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}
