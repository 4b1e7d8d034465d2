//! Mapping from the six logical lease fields to source CSV columns.

use crate::error::IngestError;
use crate::model::field::Field;
use serde::{Deserialize, Serialize};

/// The user's choice of source column for each logical field.
///
/// Serialized as `{"company": "...", "address": "...", ...}`; the same source
/// column may back several fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMapping {
    pub company: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub lease_date: String,
    pub sqft: String,
}

impl FieldMapping {
    pub fn column(&self, field: Field) -> &str {
        match field {
            Field::Company => &self.company,
            Field::Address => &self.address,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::LeaseDate => &self.lease_date,
            Field::Sqft => &self.sqft,
        }
    }

    pub fn set(&mut self, field: Field, column: impl Into<String>) {
        let column = column.into();
        match field {
            Field::Company => self.company = column,
            Field::Address => self.address = column,
            Field::City => self.city = column,
            Field::State => self.state = column,
            Field::LeaseDate => self.lease_date = column,
            Field::Sqft => self.sqft = column,
        }
    }

    /// Fields with no selected column, in grid order.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.column(*f).trim().is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn ensure_complete(&self) -> Result<(), IngestError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(IngestError::MappingIncomplete(missing))
        }
    }
}
