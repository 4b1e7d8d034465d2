//! SQLite persistence of committed lease records.
//!
//! Each operation opens its own connection to the database file; callers run
//! these from a blocking thread.

use chrono::{DateTime, NaiveDate, Utc};
use common::model::upload::{PersistedRecord, UploadHistoryEntry};
use rusqlite::{params, Connection, Row};
use std::path::{Path, PathBuf};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS csv_uploads (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     TEXT NOT NULL,
    company     TEXT NOT NULL,
    address     TEXT NOT NULL,
    city        TEXT NOT NULL,
    state       TEXT NOT NULL,
    lease_date  TEXT NOT NULL,
    sqft        REAL NOT NULL,
    uploaded_at TEXT NOT NULL,
    upload_date TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_csv_uploads_user_date ON csv_uploads (user_id, upload_date);
";

#[derive(Debug, Clone)]
pub struct UploadStore {
    path: PathBuf,
}

impl UploadStore {
    /// Opens (creating if needed) the database at `path` and ensures the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, rusqlite::Error> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        store.connect()?.execute_batch(SCHEMA)?;
        Ok(store)
    }

    fn connect(&self) -> Result<Connection, rusqlite::Error> {
        Connection::open(&self.path)
    }

    /// Inserts all records in one transaction; either every record is stored or none.
    pub fn save(&self, records: &[PersistedRecord]) -> Result<usize, rusqlite::Error> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO csv_uploads
                    (user_id, company, address, city, state, lease_date, sqft, uploaded_at, upload_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for record in records {
                stmt.execute(params![
                    record.user_id,
                    record.company,
                    record.address,
                    record.city,
                    record.state,
                    record.lease_date,
                    record.sqft,
                    record.uploaded_at,
                    record.uploaded_at.date_naive(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(records.len())
    }

    /// Per-day upload counts for a user, newest day first.
    pub fn history(&self, user_id: &str) -> Result<Vec<UploadHistoryEntry>, rusqlite::Error> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT upload_date, MAX(uploaded_at), COUNT(*)
             FROM csv_uploads
             WHERE user_id = ?1
             GROUP BY upload_date
             ORDER BY upload_date DESC",
        )?;
        let entries = stmt
            .query_map(params![user_id], |row| {
                Ok(UploadHistoryEntry {
                    date: row.get::<_, NaiveDate>(0)?,
                    uploaded_at: row.get::<_, DateTime<Utc>>(1)?,
                    count: row.get::<_, i64>(2)? as usize,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn records_by_date(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<PersistedRecord>, rusqlite::Error> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, company, address, city, state, lease_date, sqft, uploaded_at
             FROM csv_uploads
             WHERE user_id = ?1 AND upload_date = ?2
             ORDER BY id",
        )?;
        let records = stmt
            .query_map(params![user_id, date], record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Deletes every record the user uploaded on `date`; returns how many went.
    pub fn delete_by_date(&self, user_id: &str, date: NaiveDate) -> Result<usize, rusqlite::Error> {
        let conn = self.connect()?;
        conn.execute(
            "DELETE FROM csv_uploads WHERE user_id = ?1 AND upload_date = ?2",
            params![user_id, date],
        )
    }
}

fn record_from_row(row: &Row<'_>) -> Result<PersistedRecord, rusqlite::Error> {
    Ok(PersistedRecord {
        id: Some(row.get(0)?),
        user_id: row.get(1)?,
        company: row.get(2)?,
        address: row.get(3)?,
        city: row.get(4)?,
        state: row.get(5)?,
        lease_date: row.get(6)?,
        sqft: row.get(7)?,
        uploaded_at: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn store() -> (TempDir, UploadStore) {
        let dir = TempDir::new().unwrap();
        let store = UploadStore::open(dir.path().join("uploads.sqlite")).unwrap();
        (dir, store)
    }

    fn record(user: &str, company: &str, at: DateTime<Utc>) -> PersistedRecord {
        PersistedRecord {
            id: None,
            user_id: user.into(),
            company: company.into(),
            address: "123 Main".into(),
            city: "Seattle".into(),
            state: "WA".into(),
            lease_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            sqft: 10000.0,
            uploaded_at: at,
        }
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn saves_and_reads_back_by_day() {
        let (_dir, store) = store();
        let saved = store
            .save(&[record("u1", "Acme", at(3, 9)), record("u1", "Globex", at(3, 9))])
            .unwrap();
        assert_eq!(saved, 2);

        let records = store.records_by_date("u1", day(3)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].company, "Acme");
        assert_eq!(records[0].lease_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(records[0].uploaded_at, at(3, 9));
        assert!(records[0].id.is_some());
        assert!(store.records_by_date("u1", day(4)).unwrap().is_empty());
        assert!(store.records_by_date("u2", day(3)).unwrap().is_empty());
    }

    #[test]
    fn history_groups_by_day_newest_first() {
        let (_dir, store) = store();
        store.save(&[record("u1", "A", at(3, 9))]).unwrap();
        store
            .save(&[record("u1", "B", at(3, 15)), record("u1", "C", at(3, 15))])
            .unwrap();
        store.save(&[record("u1", "D", at(5, 8))]).unwrap();
        store.save(&[record("u2", "E", at(5, 8))]).unwrap();

        let history = store.history("u1").unwrap();
        assert_eq!(
            history,
            vec![
                UploadHistoryEntry { date: day(5), uploaded_at: at(5, 8), count: 1 },
                UploadHistoryEntry { date: day(3), uploaded_at: at(3, 15), count: 3 },
            ]
        );
    }

    #[test]
    fn delete_removes_only_that_day() {
        let (_dir, store) = store();
        store
            .save(&[record("u1", "A", at(3, 9)), record("u1", "B", at(4, 9))])
            .unwrap();
        store.save(&[record("u2", "C", at(3, 9))]).unwrap();

        assert_eq!(store.delete_by_date("u1", day(3)).unwrap(), 1);
        assert!(store.records_by_date("u1", day(3)).unwrap().is_empty());
        assert_eq!(store.records_by_date("u1", day(4)).unwrap().len(), 1);
        assert_eq!(store.records_by_date("u2", day(3)).unwrap().len(), 1);
        assert_eq!(store.delete_by_date("u1", day(3)).unwrap(), 0);
    }

    #[test]
    fn reopening_keeps_existing_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("uploads.sqlite");
        UploadStore::open(&path)
            .unwrap()
            .save(&[record("u1", "A", at(3, 9))])
            .unwrap();

        let reopened = UploadStore::open(&path).unwrap();
        assert_eq!(reopened.history("u1").unwrap().len(), 1);
    }
}
