use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six logical lease fields a source column can be mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Company,
    Address,
    City,
    State,
    LeaseDate,
    Sqft,
}

impl Field {
    /// All fields, in grid column order.
    pub const ALL: [Field; 6] = [
        Field::Company,
        Field::Address,
        Field::City,
        Field::State,
        Field::LeaseDate,
        Field::Sqft,
    ];

    /// Column name used for this field in row objects on the wire.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Field::Company => "Company Name",
            Field::Address => "Address",
            Field::City => "City",
            Field::State => "State",
            Field::LeaseDate => "Lease Expiration Date",
            Field::Sqft => "Square Footage",
        }
    }

    /// Lowercase key used by mappings and persisted records.
    pub const fn key(self) -> &'static str {
        match self {
            Field::Company => "company",
            Field::Address => "address",
            Field::City => "city",
            Field::State => "state",
            Field::LeaseDate => "lease_date",
            Field::Sqft => "sqft",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.wire_name() == name)
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}
