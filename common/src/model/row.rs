//! Staged rows: the normalized, editable records shown in the review grid.

use crate::model::field::Field;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identity of a staged row, assigned at normalization time.
///
/// Row positions shift when rows are deleted; every lookup goes through this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(Uuid);

impl RowId {
    pub fn new() -> Self {
        RowId(Uuid::new_v4())
    }
}

impl Default for RowId {
    fn default() -> Self {
        RowId::new()
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A normalized row with canonical field names and its current error annotation.
///
/// On the wire the values use the display column names (`"Company Name"`, ...)
/// and the annotation is `"errorMessage"`; an empty message means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedRow {
    #[serde(rename = "row_id", default)]
    pub id: RowId,
    #[serde(rename = "Company Name", default, deserialize_with = "lenient_string")]
    pub company: String,
    #[serde(rename = "Address", default, deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(rename = "City", default, deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(rename = "State", default, deserialize_with = "lenient_string")]
    pub state: String,
    #[serde(rename = "Lease Expiration Date", default, deserialize_with = "lenient_string")]
    pub lease_date: String,
    #[serde(rename = "Square Footage", default, deserialize_with = "lenient_string")]
    pub sqft: String,
    #[serde(rename = "errorMessage", default, deserialize_with = "lenient_string")]
    pub error_message: String,
}

impl StagedRow {
    /// Empty row with a freshly generated id.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = (Field, S)>,
        S: Into<String>,
    {
        let mut row = Self::new();
        for (field, value) in values {
            row.set(field, value);
        }
        row
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Company => &self.company,
            Field::Address => &self.address,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::LeaseDate => &self.lease_date,
            Field::Sqft => &self.sqft,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Company => self.company = value,
            Field::Address => self.address = value,
            Field::City => self.city = value,
            Field::State => self.state = value,
            Field::LeaseDate => self.lease_date = value,
            Field::Sqft => self.sqft = value,
        }
    }

    /// Whitespace-only messages count as no error.
    pub fn is_valid(&self) -> bool {
        self.error_message.trim().is_empty()
    }

    pub fn clear_error(&mut self) {
        self.error_message.clear();
    }
}

/// Accepts strings, numbers, booleans and null; spreadsheets and browser
/// grids often send square footage as a JSON number.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientString;

    impl<'de> Visitor<'de> for LenientString {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number, boolean or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_owned())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<String, D2::Error> {
            d.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(LenientString)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn uses_display_names_on_the_wire() {
        let row = StagedRow::with_values([(Field::Company, "Acme"), (Field::Sqft, "10000")]);
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["Company Name"], "Acme");
        assert_eq!(value["Square Footage"], "10000");
        assert_eq!(value["errorMessage"], "");
        assert_eq!(value["row_id"], row.id.to_string());
    }

    #[test]
    fn accepts_numbers_and_nulls() {
        let row: StagedRow = serde_json::from_value(json!({
            "Company Name": "Acme",
            "Square Footage": 10000,
            "City": null
        }))
        .unwrap();
        assert_eq!(row.sqft, "10000");
        assert_eq!(row.city, "");
        assert!(row.is_valid());
    }

    #[test]
    fn missing_row_id_gets_a_fresh_one() {
        let a: StagedRow = serde_json::from_value(json!({"Company Name": "A"})).unwrap();
        let b: StagedRow = serde_json::from_value(json!({"Company Name": "B"})).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn whitespace_error_message_is_valid() {
        let mut row = StagedRow::new();
        row.error_message = "  ".into();
        assert!(row.is_valid());
        row.error_message = "Address is required".into();
        assert!(!row.is_valid());
        row.clear_error();
        assert!(row.is_valid());
    }
}
