use crate::model::row::RowId;
use serde::{Deserialize, Serialize};

/// Offset between a row's position in the submitted array and the row number
/// reported to the user: one for 1-based counting, one for the header row.
pub const HEADER_ROW_OFFSET: usize = 2;

/// A per-row validation failure reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Spreadsheet-style row number: array position + `HEADER_ROW_OFFSET`.
    pub row: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_id: Option<RowId>,
    pub message: String,
}

impl ValidationError {
    pub fn at_position(position: usize, row_id: RowId, message: impl Into<String>) -> Self {
        Self {
            row: position + HEADER_ROW_OFFSET,
            row_id: Some(row_id),
            message: message.into(),
        }
    }

    /// Array position this error refers to, if the row number is in range.
    pub fn position(&self) -> Option<usize> {
        self.row.checked_sub(HEADER_ROW_OFFSET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_number_includes_header_offset() {
        let err = ValidationError::at_position(0, RowId::new(), "Address is required");
        assert_eq!(err.row, 2);
        assert_eq!(err.position(), Some(0));
    }

    #[test]
    fn out_of_range_row_has_no_position() {
        let err = ValidationError {
            row: 1,
            row_id: None,
            message: "x".into(),
        };
        assert_eq!(err.position(), None);
    }
}
