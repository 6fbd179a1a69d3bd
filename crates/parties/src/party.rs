use serde::{Deserialize, Serialize};

use prodparty_core::{DomainError, DomainResult, Entity, PartyId};

/// Party record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    id: PartyId,
    name: String,
    code: Option<String>,
}

impl Party {
    pub fn new(id: PartyId, name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(Self {
            id,
            name,
            code: None,
        })
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Human-readable label shown wherever the party is referenced.
    pub fn rec_name(&self) -> String {
        match &self.code {
            Some(code) => format!("[{code}] {}", self.name),
            None => self.name.clone(),
        }
    }

    pub fn to_ref(&self) -> PartyRef {
        PartyRef {
            id: self.id,
            rec_name: self.rec_name(),
        }
    }
}

impl Entity for Party {
    type Id = PartyId;

    fn id(&self) -> PartyId {
        self.id
    }
}

/// Reference to a party: identity plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyRef {
    pub id: PartyId,
    pub rec_name: String,
}

impl PartyRef {
    /// Identity comparison of two optional references.
    pub fn same(a: Option<&PartyRef>, b: Option<&PartyRef>) -> bool {
        a.map(|p| p.id) == b.map(|p| p.id)
    }
}

impl From<&Party> for PartyRef {
    fn from(party: &Party) -> Self {
        party.to_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_name() {
        let err = Party::new(PartyId::new(), "   ").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn rec_name_includes_code_when_present() {
        let party = Party::new(PartyId::new(), "Acme").unwrap();
        assert_eq!(party.rec_name(), "Acme");

        let party = party.with_code("C042");
        assert_eq!(party.rec_name(), "[C042] Acme");
        assert_eq!(party.to_ref().rec_name, "[C042] Acme");
    }

    #[test]
    fn same_compares_identity_not_label() {
        let id = PartyId::new();
        let a = PartyRef {
            id,
            rec_name: "Acme".to_string(),
        };
        let b = PartyRef {
            id,
            rec_name: "Acme Corp".to_string(),
        };
        assert!(PartyRef::same(Some(&a), Some(&b)));
        assert!(!PartyRef::same(Some(&a), None));
        assert!(PartyRef::same(None, None));
    }
}
