//! Field-level validation of staged rows.
//!
//! Rules run in a fixed order and the first failure is the row's only
//! message: company, address, city and state (only when required by
//! configuration), lease expiration date, square footage.

use crate::error::ServiceError;
use chrono::NaiveDate;
use common::model::field::Field;
use common::model::row::StagedRow;
use common::model::validation::ValidationError;
use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Digits with optional thousands separators and an optional decimal part.
const SQFT_PATTERN: &str = r"^(\d{1,3}(,\d{3})+|\d+)(\.\d+)?$";

pub const DEFAULT_DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
];

/// Configurable part of the rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    /// `chrono` format strings accepted for the lease expiration date.
    pub date_formats: Vec<String>,
    pub require_city: bool,
    pub require_state: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
            require_city: false,
            require_state: false,
        }
    }
}

/// Annotated rows plus the error list, both in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub rows: Vec<StagedRow>,
    pub errors: Vec<ValidationError>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct FieldValidator {
    rules: ValidationRules,
    sqft_re: Regex,
}

impl FieldValidator {
    pub fn new(rules: ValidationRules) -> Result<Self, ServiceError> {
        let sqft_re = Regex::new(SQFT_PATTERN)
            .map_err(|e| ServiceError::Config(format!("Regex error: {e}")))?;
        Ok(Self { rules, sqft_re })
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    pub fn parse_lease_date(&self, value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        self.rules
            .date_formats
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
    }

    pub fn parse_sqft(&self, value: &str) -> Option<f64> {
        let value = value.trim();
        if !self.sqft_re.is_match(value) {
            return None;
        }
        value
            .replace(',', "")
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite() && *n >= 0.0)
    }

    /// The first rule this row breaks, if any.
    pub fn check_row(&self, row: &StagedRow) -> Option<String> {
        let required = |field: Field| {
            row.get(field)
                .trim()
                .is_empty()
                .then(|| format!("{field} is required"))
        };

        required(Field::Company)
            .or_else(|| required(Field::Address))
            .or_else(|| self.rules.require_city.then(|| required(Field::City)).flatten())
            .or_else(|| self.rules.require_state.then(|| required(Field::State)).flatten())
            .or_else(|| {
                required(Field::LeaseDate).or_else(|| {
                    self.parse_lease_date(&row.lease_date).is_none().then(|| {
                        format!(
                            "{} '{}' is not a valid date",
                            Field::LeaseDate,
                            row.lease_date.trim()
                        )
                    })
                })
            })
            .or_else(|| {
                required(Field::Sqft).or_else(|| {
                    self.parse_sqft(&row.sqft).is_none().then(|| {
                        format!(
                            "{} '{}' must be a non-negative number",
                            Field::Sqft,
                            row.sqft.trim()
                        )
                    })
                })
            })
    }

    /// Annotates every row; the result has the same order as `rows`.
    pub fn validate(&self, rows: Vec<StagedRow>) -> ValidationOutcome {
        let checked: Vec<(StagedRow, Option<String>)> = rows
            .into_par_iter()
            .map(|mut row| {
                let message = self.check_row(&row);
                row.error_message = message.clone().unwrap_or_default();
                (row, message)
            })
            .collect();

        let mut outcome = ValidationOutcome::default();
        for (position, (row, message)) in checked.into_iter().enumerate() {
            if let Some(message) = message {
                outcome
                    .errors
                    .push(ValidationError::at_position(position, row.id, message));
            }
            outcome.rows.push(row);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> FieldValidator {
        FieldValidator::new(ValidationRules::default()).unwrap()
    }

    fn row(values: [&str; 6]) -> StagedRow {
        StagedRow::with_values(Field::ALL.into_iter().zip(values))
    }

    fn acme() -> StagedRow {
        row(["Acme", "123 Main", "Seattle", "WA", "2025-01-01", "10000"])
    }

    #[test]
    fn valid_row_gets_empty_message() {
        let outcome = validator().validate(vec![acme()]);
        assert!(outcome.is_valid());
        assert_eq!(outcome.rows[0].error_message, "");
    }

    #[test]
    fn invalid_date_is_reported_on_the_date_field() {
        let mut bad = acme();
        bad.lease_date = "not-a-date".into();
        let outcome = validator().validate(vec![bad]);

        let message = &outcome.rows[0].error_message;
        assert!(message.contains("Lease Expiration Date"), "{message}");
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].row, 2);
    }

    #[test]
    fn first_failing_rule_wins() {
        let outcome = validator().validate(vec![row(["", "", "", "", "bad", "-1"])]);
        assert_eq!(outcome.rows[0].error_message, "Company Name is required");

        let outcome = validator().validate(vec![row(["Acme", "", "", "", "bad", "-1"])]);
        assert_eq!(outcome.rows[0].error_message, "Address is required");

        let outcome = validator().validate(vec![row(["Acme", "1 Main", "", "", "bad", "-1"])]);
        assert_eq!(
            outcome.rows[0].error_message,
            "Lease Expiration Date 'bad' is not a valid date"
        );

        let outcome =
            validator().validate(vec![row(["Acme", "1 Main", "", "", "2025-01-01", "-1"])]);
        assert_eq!(
            outcome.rows[0].error_message,
            "Square Footage '-1' must be a non-negative number"
        );
    }

    #[test]
    fn city_and_state_are_optional_by_default() {
        let outcome =
            validator().validate(vec![row(["Acme", "1 Main", "", "", "2025-01-01", "1"])]);
        assert!(outcome.is_valid());
    }

    #[test]
    fn city_and_state_can_be_required() {
        let rules = ValidationRules {
            require_city: true,
            require_state: true,
            ..ValidationRules::default()
        };
        let validator = FieldValidator::new(rules).unwrap();

        let outcome = validator.validate(vec![row(["Acme", "1 Main", "", "", "2025-01-01", "1"])]);
        assert_eq!(outcome.rows[0].error_message, "City is required");

        let outcome =
            validator.validate(vec![row(["Acme", "1 Main", "Tacoma", "", "2025-01-01", "1"])]);
        assert_eq!(outcome.rows[0].error_message, "State is required");
    }

    #[test]
    fn accepts_each_default_date_format() {
        let v = validator();
        for value in [
            "2025-01-31",
            "01/31/2025",
            "01-31-2025",
            "2025/01/31",
            "January 31, 2025",
            "Jan 31, 2025",
            "31 January 2025",
        ] {
            assert_eq!(
                v.parse_lease_date(value),
                NaiveDate::from_ymd_opt(2025, 1, 31),
                "{value}"
            );
        }
        assert_eq!(v.parse_lease_date("2025-02-30"), None);
    }

    #[test]
    fn date_formats_come_from_configuration() {
        let rules = ValidationRules {
            date_formats: vec!["%d.%m.%Y".into()],
            ..ValidationRules::default()
        };
        let v = FieldValidator::new(rules).unwrap();
        assert!(v.parse_lease_date("31.01.2025").is_some());
        assert!(v.parse_lease_date("2025-01-31").is_none());
    }

    #[test]
    fn square_footage_formats() {
        let v = validator();
        assert_eq!(v.parse_sqft("10000"), Some(10000.0));
        assert_eq!(v.parse_sqft("10,000"), Some(10000.0));
        assert_eq!(v.parse_sqft("1,250.5"), Some(1250.5));
        assert_eq!(v.parse_sqft("0"), Some(0.0));
        assert_eq!(v.parse_sqft("-5"), None);
        assert_eq!(v.parse_sqft("10,00"), None);
        assert_eq!(v.parse_sqft("abc"), None);
        assert_eq!(v.parse_sqft(""), None);
    }

    #[test]
    fn output_keeps_input_order_and_offsets() {
        let rows: Vec<StagedRow> = (0..50)
            .map(|i| {
                let mut r = acme();
                r.company = format!("Co {i}");
                if i % 7 == 0 {
                    r.address.clear();
                }
                r
            })
            .collect();
        let ids: Vec<_> = rows.iter().map(|r| r.id).collect();

        let outcome = validator().validate(rows);

        assert_eq!(outcome.rows.iter().map(|r| r.id).collect::<Vec<_>>(), ids);
        let error_rows: Vec<usize> = outcome.errors.iter().map(|e| e.row).collect();
        assert_eq!(error_rows, vec![2, 9, 16, 23, 30, 37, 44, 51]);
        for err in &outcome.errors {
            assert_eq!(err.row_id, Some(ids[err.row - 2]));
        }
    }

    #[test]
    fn revalidating_unchanged_rows_is_deterministic() {
        let mut bad = acme();
        bad.sqft = "lots".into();
        let rows = vec![acme(), bad];

        let first = validator().validate(rows.clone());
        let second = validator().validate(first.rows.clone());

        assert_eq!(first, second);
    }
}
