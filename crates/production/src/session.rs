//! Editing a production before it is saved.

use prodparty_core::{DomainError, DomainResult};

use crate::{FieldEdit, OnChangeTable, Production, ProductionBase, ProductionChanges};

/// One user's edits of an unsaved production.
///
/// Each edit runs the hooks subscribed to the edited field and merges their
/// proposals into the record; nothing is visible outside the session until
/// [`EditSession::save`].
pub struct EditSession<'a, P: ?Sized> {
    behavior: &'a P,
    table: &'a OnChangeTable,
    record: Production,
}

impl<'a, P> EditSession<'a, P>
where
    P: ProductionBase + ?Sized,
{
    pub fn open(behavior: &'a P, table: &'a OnChangeTable, record: Production) -> Self {
        Self {
            behavior,
            table,
            record,
        }
    }

    pub fn record(&self) -> &Production {
        &self.record
    }

    /// Apply a user edit and return the merged proposals of the hooks it
    /// triggered.
    pub fn edit(&mut self, edit: FieldEdit) -> DomainResult<ProductionChanges> {
        let field = edit.field();
        if self.record.is_readonly(field) {
            return Err(DomainError::read_only(field.as_str()));
        }
        self.record.apply_edit(edit);

        let table = self.table;
        let mut merged = ProductionChanges::default();
        for sub in table.hooks_for(field) {
            tracing::debug!(
                production = %self.record.id,
                %field,
                hook = sub.hook.name(),
                depends = ?sub.depends,
                "running change hook"
            );
            let changes = sub.hook.run(self.behavior, &mut self.record);
            self.record.apply_changes(&changes);
            merged.merge(changes);
        }
        Ok(merged)
    }

    /// Materialize moves and hand the record back for persistence.
    pub fn save(mut self) -> Production {
        self.behavior.set_moves(&mut self.record);
        self.record
    }
}
