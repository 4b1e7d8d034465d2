use crate::error::IngestError;
use crate::model::field::Field;
use crate::model::row::{RowId, StagedRow};
use crate::model::validation::ValidationError;

/// Ordered working set of staged rows.
///
/// Display order is the vector order; lookups always go through `RowId`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewStore {
    rows: Vec<StagedRow>,
}

impl ReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[StagedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: RowId) -> Option<&StagedRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Current display position of a row.
    pub fn position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id)
    }

    /// Replaces the working set with freshly processed rows.
    pub fn populate(&mut self, rows: Vec<StagedRow>, errors: &[ValidationError]) {
        self.rows = rows;
        self.apply_errors(errors);
    }

    /// Updates one cell and drops the row's error until the next revalidation.
    pub fn edit(
        &mut self,
        id: RowId,
        field: Field,
        value: impl Into<String>,
    ) -> Result<(), IngestError> {
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(IngestError::UnknownRow(id))?;
        row.set(field, value);
        row.clear_error();
        Ok(())
    }

    pub fn delete(&mut self, id: RowId) -> Result<StagedRow, IngestError> {
        let position = self.position(id).ok_or(IngestError::UnknownRow(id))?;
        Ok(self.rows.remove(position))
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Copy of the working set with every annotation cleared, ready to resubmit.
    pub fn revalidation_payload(&self) -> Vec<StagedRow> {
        self.rows
            .iter()
            .cloned()
            .map(|mut r| {
                r.clear_error();
                r
            })
            .collect()
    }

    /// Merges a validation response into the working set.
    ///
    /// Annotations are taken from the echoed rows by id; values already in
    /// the store are kept. Errors that carry no id are matched by their row
    /// number against the current order.
    pub fn merge_validation(&mut self, data: &[StagedRow], errors: &[ValidationError]) {
        for row in &mut self.rows {
            row.error_message = data
                .iter()
                .find(|d| d.id == row.id)
                .map(|d| d.error_message.clone())
                .unwrap_or_default();
        }
        self.apply_errors(errors);
    }

    fn apply_errors(&mut self, errors: &[ValidationError]) {
        for err in errors {
            let target = match err.row_id {
                Some(id) => self.rows.iter_mut().find(|r| r.id == id),
                None => err.position().and_then(|p| self.rows.get_mut(p)),
            };
            if let Some(row) = target {
                if row.is_valid() {
                    row.error_message = err.message.clone();
                }
            }
        }
    }

    pub fn invalid_count(&self) -> usize {
        self.rows.iter().filter(|r| !r.is_valid()).count()
    }

    /// True when every row's annotation is empty or whitespace.
    pub fn all_valid(&self) -> bool {
        self.rows.iter().all(StagedRow::is_valid)
    }
}
