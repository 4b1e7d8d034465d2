//! Projection of raw CSV records onto the six canonical lease fields.

use crate::ingest::table::RawTable;
use common::error::IngestError;
use common::model::field::Field;
use common::model::mapping::FieldMapping;
use common::model::row::StagedRow;

/// Resolves each field's mapped column to its index in `headers`.
pub fn resolve_columns(
    headers: &[String],
    mapping: &FieldMapping,
) -> Result<Vec<(Field, usize)>, IngestError> {
    mapping.ensure_complete()?;
    Field::ALL
        .into_iter()
        .map(|field| {
            let column = mapping.column(field).trim();
            headers
                .iter()
                .position(|h| h == column)
                .map(|idx| (field, idx))
                .ok_or_else(|| IngestError::UnknownColumn(column.to_string()))
        })
        .collect()
}

/// Trims a cell, drops one layer of surrounding quotes and replaces
/// non-breaking spaces.
fn normalize_cell(cell: &str) -> String {
    let s = cell.trim();
    let s = s
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| s.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(s);
    s.replace('\u{00A0}', " ").trim().to_string()
}

fn project(raw: &[String], columns: &[(Field, usize)]) -> StagedRow {
    let mut row = StagedRow::new();
    for &(field, idx) in columns {
        let value = raw.get(idx).map(|c| normalize_cell(c)).unwrap_or_default();
        row.set(field, value);
    }
    row
}

/// One staged row per raw record, each with a fresh id. Empty records are
/// kept; the validator decides whether they are acceptable.
pub fn normalize(table: &RawTable, mapping: &FieldMapping) -> Result<Vec<StagedRow>, IngestError> {
    let columns = resolve_columns(&table.headers, mapping)?;
    Ok(table.rows.iter().map(|raw| project(raw, &columns)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn headers() -> Vec<String> {
        ["Co", "Addr", "Ct", "St", "Exp", "SF"]
            .iter()
            .map(|h| h.to_string())
            .collect()
    }

    fn mapping() -> FieldMapping {
        FieldMapping {
            company: "Co".into(),
            address: "Addr".into(),
            city: "Ct".into(),
            state: "St".into(),
            lease_date: "Exp".into(),
            sqft: "SF".into(),
        }
    }

    fn table(rows: Vec<Vec<&str>>) -> RawTable {
        RawTable {
            headers: headers(),
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(str::to_string).collect())
                .collect(),
        }
    }

    #[test]
    fn projects_through_the_mapping() {
        let rows = normalize(
            &table(vec![vec!["Acme", "123 Main", "Seattle", "WA", "2025-01-01", "10000"]]),
            &mapping(),
        )
        .unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.company, "Acme");
        assert_eq!(row.address, "123 Main");
        assert_eq!(row.city, "Seattle");
        assert_eq!(row.state, "WA");
        assert_eq!(row.lease_date, "2025-01-01");
        assert_eq!(row.sqft, "10000");
        assert!(row.is_valid());
    }

    #[test]
    fn empty_and_short_records_still_produce_rows() {
        let rows = normalize(
            &table(vec![vec![], vec!["", "", "", "", "", ""], vec!["Acme"]]),
            &mapping(),
        )
        .unwrap();

        assert_eq!(rows.len(), 3);
        for field in Field::ALL {
            assert_eq!(rows[0].get(field), "");
            assert_eq!(rows[1].get(field), "");
        }
        assert_eq!(rows[2].company, "Acme");
        assert_eq!(rows[2].sqft, "");
    }

    #[test]
    fn every_row_gets_its_own_id() {
        let rows = normalize(&table(vec![vec!["A"], vec!["B"], vec!["C"]]), &mapping()).unwrap();
        let ids: HashSet<_> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn one_column_may_back_several_fields() {
        let mut m = mapping();
        m.city = "Addr".into();
        let rows = normalize(&table(vec![vec!["A", "Downtown"]]), &m).unwrap();
        assert_eq!(rows[0].address, "Downtown");
        assert_eq!(rows[0].city, "Downtown");
    }

    #[test]
    fn incomplete_mapping_is_rejected() {
        let mut m = mapping();
        m.sqft.clear();
        assert_eq!(
            normalize(&table(vec![]), &m),
            Err(IngestError::MappingIncomplete(vec![Field::Sqft]))
        );
    }

    #[test]
    fn unknown_column_is_rejected() {
        let mut m = mapping();
        m.state = "Province".into();
        assert_eq!(
            normalize(&table(vec![]), &m),
            Err(IngestError::UnknownColumn("Province".into()))
        );
    }

    #[test]
    fn cells_are_cleaned() {
        assert_eq!(normalize_cell("  'Acme'  "), "Acme");
        assert_eq!(normalize_cell("\"1 Main\""), "1 Main");
        assert_eq!(normalize_cell("10\u{00A0}000 "), "10 000");
    }
}
