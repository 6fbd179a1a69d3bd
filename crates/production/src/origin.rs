use serde::{Deserialize, Serialize};

use prodparty_sales::{Sale, SaleLine};

/// Document a production order was created from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Origin {
    Sale(Sale),
    SaleLine(SaleLine),
    /// Any other document, referenced by model name and record id.
    Other { model: String, id: String },
}

impl Origin {
    pub fn model(&self) -> &str {
        match self {
            Origin::Sale(_) => Sale::MODEL,
            Origin::SaleLine(_) => SaleLine::MODEL,
            Origin::Other { model, .. } => model,
        }
    }
}
