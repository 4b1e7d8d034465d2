//! Error taxonomy of the ingestion workflow.

use crate::model::field::Field;
use crate::model::row::RowId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// File unreadable or not tabular.
    #[error("Could not read CSV: {0}")]
    Parse(String),

    /// One or more logical fields have no source column.
    #[error("Every field must be mapped to a column; missing: {}", field_list(.0))]
    MappingIncomplete(Vec<Field>),

    /// A mapping names a column the uploaded file does not have.
    #[error("Column '{0}' is not in the uploaded file")]
    UnknownColumn(String),

    #[error("{0} row(s) still have validation errors")]
    RowsInvalid(usize),

    #[error("The terms of service must be accepted before saving")]
    TermsNotAccepted,

    #[error("There are no rows to save")]
    NothingToCommit,

    /// Rows were edited after the last validation pass.
    #[error("Edited rows must be revalidated before saving")]
    RevalidationRequired,

    /// Network failure or non-2xx response from the service.
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Another request is still in progress")]
    Busy,

    #[error("Row {0} is not in the working set")]
    UnknownRow(RowId),
}

fn field_list(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.wire_name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_incomplete_names_the_fields() {
        let err = IngestError::MappingIncomplete(vec![Field::City, Field::Sqft]);
        assert_eq!(
            err.to_string(),
            "Every field must be mapped to a column; missing: City, Square Footage"
        );
    }
}
